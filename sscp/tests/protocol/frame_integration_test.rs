use sscp::constants::{PROTOCOL_AUTHENTICATE, SOF};
use sscp::protocol::{crc16, Frame};

// The round-1 authenticate frame for address 0x00 with the fixed
// self-test RndA, byte for byte.
const ROUND1_FRAME: [u8; 25] = [
    0x02, 0x00, 0x12, 0x00, 0x20, 0x00, 0x00, 0x75, 0xCC, 0xF7, 0xB1, 0xF7, 0xFE, 0xA6, 0xF7,
    0x58, 0x71, 0xFC, 0xF6, 0xDC, 0x75, 0x59, 0x23, 0xEC, 0x43,
];

#[test]
fn known_frame_encodes_bit_exactly() {
    let payload = &ROUND1_FRAME[5..23];
    let frame = Frame::encode(0x00, PROTOCOL_AUTHENTICATE, payload).unwrap();
    assert_eq!(frame, ROUND1_FRAME);
}

#[test]
fn known_frame_decodes() {
    let decoded = Frame::decode(&ROUND1_FRAME).unwrap();
    assert_eq!(decoded.address, 0x00);
    assert_eq!(decoded.protocol, PROTOCOL_AUTHENTICATE);
    assert_eq!(decoded.payload.len(), 18);
    assert_eq!(&decoded.payload[..2], &[0x00, 0x00]);
}

#[test]
fn crc_covers_header_and_payload() {
    // CRC region: LEN ‖ ADDR ‖ PROTO ‖ payload (22 bytes)
    let crc = crc16(&ROUND1_FRAME[1..23]);
    assert_eq!(crc.to_be_bytes(), [0xEC, 0x43]);
}

#[test]
fn sof_constant_is_stx() {
    assert_eq!(SOF, 0x02);
    assert_eq!(ROUND1_FRAME[0], SOF);
}

#[test]
fn each_corrupted_byte_is_caught() {
    for idx in 1..ROUND1_FRAME.len() {
        let mut bad = ROUND1_FRAME;
        bad[idx] ^= 0x01;
        assert!(
            Frame::decode(&bad).is_err(),
            "corruption at byte {} went unnoticed",
            idx
        );
    }
}
