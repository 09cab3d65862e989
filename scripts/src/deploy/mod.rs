//! Our deploy utils: compiled artifacts, address prediction and the
//! deployments registry

pub mod address;
pub mod artifacts;
pub mod registry;
