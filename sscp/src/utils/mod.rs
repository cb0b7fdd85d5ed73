//! Small helpers shared across the crate: hex formatting for trace
//! output and timeout plumbing for the transport layer.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
