//! Transaction plumbing: the chain client, the contract ABIs, and typed
//! senders and readers on top of them

pub mod abi;
pub mod client;
pub mod reader;
pub mod sender;
