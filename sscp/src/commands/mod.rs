// sscp-rs/sscp/src/commands/mod.rs

//! Thin command wrappers over the secure exchange. Each wrapper owns a
//! fixed 24-bit command header and the marshalling of its payloads; the
//! counter, keys, CRC and IV handling all stay below in the pipeline.

pub mod config;
pub mod info;
pub mod outputs;
pub mod scan;
pub mod transceive;
