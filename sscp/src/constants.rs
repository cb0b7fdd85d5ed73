// sscp-rs/sscp/src/constants.rs
//! Protocol constants shared across the crate

/// Start-of-frame sentinel, first byte of every SSCP frame
pub const SOF: u8 = 0x02;

/// Protocol byte for the authentication handshake
pub const PROTOCOL_AUTHENTICATE: u8 = 0x20;

/// Protocol byte for secure (encrypted + signed) exchanges
pub const PROTOCOL_SECURE: u8 = 0x21;

/// Maximum frame payload length, enforced on both encode and decode
pub const MAX_PAYLOAD_LEN: usize = 4096;

/// Time budget for the first response byte, in milliseconds. Generous:
/// the coupler may be busy with RF before it starts answering.
pub const RESPONSE_FIRST_TIMEOUT_MS: u64 = 2000;

/// Time budget for every subsequent byte, in milliseconds. The link must
/// not stall mid-frame.
pub const RESPONSE_NEXT_TIMEOUT_MS: u64 = 200;

/// Attempts per secure exchange before a transport timeout becomes fatal
pub const MAX_TIMEOUT_RETRY: u32 = 3;

/// Minimum interval between two consecutive scan commands, in
/// milliseconds. The coupler handles scans slowly.
pub const SCAN_GUARD_TIME_MS: u64 = 500;

/// SSCP command headers (`type:8 ‖ code:16`). The exchange pipeline
/// treats these as opaque; wrappers pass them in.
pub const CMD_CHANGE_READER_KEYS: u32 = 0x00_0003;
pub const CMD_SET_BAUDRATE: u32 = 0x00_0005;
pub const CMD_SET_RS485_ADDRESS: u32 = 0x00_0006;
pub const CMD_OUTPUTS: u32 = 0x00_0007;
pub const CMD_GET_INFOS: u32 = 0x00_0008;
pub const CMD_SCAN_A_RAW: u32 = 0x00_000F;
pub const CMD_GET_SERIAL_NUMBER: u32 = 0x00_001F;
pub const CMD_OUTPUT_RGB: u32 = 0x00_0050;
pub const CMD_RELEASE_RF: u32 = 0x00_0052;
pub const CMD_GET_READER_TYPE: u32 = 0x00_0057;
pub const CMD_EXTERNAL_LED_COLORS: u32 = 0x00_005A;
pub const CMD_TRANSCEIVE_APDU: u32 = 0x00_005F;
pub const CMD_SCAN_GLOBAL: u32 = 0x00_00B0;

/// Transport key used when the caller does not provide one
pub const DEFAULT_AUTH_KEY: [u8; 16] = [
    0xE7, 0x4A, 0x54, 0x0F, 0xA0, 0x7C, 0x4D, 0xB1,
    0xB4, 0x64, 0x21, 0x12, 0x6D, 0xF7, 0xAD, 0x36,
];
