// sscp-rs/sscp/src/lib.rs

//! sscp
//!
//! Pure Rust host-side client for SSCPv2 (Smart Secure Communication
//! Protocol, version 2) couplers — NFC readers driven by a control
//! panel over RS-232 or RS-485.
//!
//! After a mutual-authentication handshake under a long-term 16-byte
//! key, every command/response pair is AES-CBC encrypted, HMAC-SHA-256
//! signed, and bound to a strictly increasing counter that defeats
//! replay.
//!
//! ```no_run
//! use sscp::prelude::*;
//!
//! # fn main() -> sscp::Result<()> {
//! let coupler = Coupler::open("/dev/ttyUSB0", Baudrate::B38400)?;
//! let mut coupler = coupler.authenticate(None)?; // default transport key
//! coupler.outputs(0x02, 0x0A, 0x00)?;
//! match coupler.scan_nfc()? {
//!     TagInfo::IsoA { uid, .. } => println!("tag {}", uid.to_hex()),
//!     _ => println!("no tag"),
//! }
//! # Ok(())
//! # }
//! ```
pub mod commands;
pub mod constants;
pub mod context;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod secure;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`
// and the newtypes in `types` are available for consumers and for the
// `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
