//! Scripts for deploying the Balloons token and the DEX, and seeding the DEX
//! liquidity pool.

pub mod bootstrap;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod errors;

/// Our deploy utils
pub mod deploy;

/// Our output utils
pub mod output_writer;

pub mod tx;
