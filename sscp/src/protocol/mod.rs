// sscp-rs/sscp/src/protocol/mod.rs

pub mod codec;
pub mod crc;
pub mod frame;

pub use codec::exchange_raw;
pub use crc::{crc16, crc16_parts};
pub use frame::Frame;
