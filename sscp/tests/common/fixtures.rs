// fixtures.rs — shared helpers for driving a secure coupler over a mock
#![allow(dead_code)]

use sscp::constants::PROTOCOL_SECURE;
use sscp::protocol::Frame;
use sscp::secure::crypto;
use sscp::secure::SessionKeys;
use sscp::test_support::{encode_secure_response, test_session_keys};
use sscp::transport::MockTransport;
use sscp::types::CommandHeader;

pub const REPLY_IV: [u8; 16] = [
    0x1A, 0x0F, 0xD2, 0xC3, 0x3B, 0x87, 0x4A, 0x6C,
    0xE5, 0x2D, 0x90, 0xB1, 0xF4, 0x68, 0x3D, 0x57,
];

/// Queue a framed, well-formed secure reply on the mock.
pub fn seed_reply(
    mock: &mut MockTransport,
    counter: u32,
    header: CommandHeader,
    data: &[u8],
    status: u8,
) {
    let keys = test_session_keys();
    let payload = encode_secure_response(&keys, counter, header, data, status, &REPLY_IV);
    mock.push_response(Frame::encode(0x00, PROTOCOL_SECURE, &payload).unwrap());
}

/// Transport shim that logs every sent frame into a shared buffer and
/// delegates to an inner mock, so tests can inspect traffic after the
/// coupler has taken ownership of the transport.
pub struct Tee {
    pub inner: MockTransport,
    pub sent: std::rc::Rc<std::cell::RefCell<Vec<Vec<u8>>>>,
}

impl Tee {
    pub fn new(inner: MockTransport) -> (Self, std::rc::Rc<std::cell::RefCell<Vec<Vec<u8>>>>) {
        let sent = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        (
            Self {
                inner,
                sent: std::rc::Rc::clone(&sent),
            },
            sent,
        )
    }
}

impl sscp::Transport for Tee {
    fn send(&mut self, data: &[u8]) -> sscp::Result<()> {
        self.sent.borrow_mut().push(data.to_vec());
        self.inner.send(data)
    }

    fn receive_exact(
        &mut self,
        buf: &mut [u8],
        first_byte: std::time::Duration,
        inter_byte: std::time::Duration,
    ) -> sscp::Result<()> {
        self.inner.receive_exact(buf, first_byte, inter_byte)
    }

    fn set_baudrate(&mut self, baudrate: sscp::Baudrate) -> sscp::Result<()> {
        self.inner.set_baudrate(baudrate)
    }
}

/// Parsed plaintext of a secure command a test captured from the mock.
pub struct SentCommand {
    pub counter: u32,
    pub kind: u8,
    pub code: u16,
    pub data: Vec<u8>,
}

/// Decode and decrypt a captured wire frame back into the command the
/// wrapper marshalled, so tests can assert on payload bytes.
pub fn decode_sent_command(frame: &[u8], keys: &SessionKeys) -> SentCommand {
    let decoded = Frame::decode(frame).unwrap();
    assert_eq!(decoded.protocol, PROTOCOL_SECURE);
    let payload = decoded.payload;
    assert!(payload.len() >= 32 && payload.len() % 16 == 0);

    let (cipher, iv_bytes) = payload.split_at(payload.len() - 16);
    let mut iv = [0u8; 16];
    iv.copy_from_slice(iv_bytes);
    let mut plain = cipher.to_vec();
    crypto::cbc_decrypt(&keys.cipher_ab, &iv, &mut plain).unwrap();

    let counter = u32::from_be_bytes([plain[0], plain[1], plain[2], plain[3]]);
    let kind = plain[4];
    let code = u16::from_be_bytes([plain[5], plain[6]]);
    let declared = u16::from_be_bytes([plain[7], plain[8]]) as usize;
    assert!(declared >= 1, "length field counts the reserved byte");
    let data_len = declared - 1;
    let data = plain[10..10 + data_len].to_vec();

    // The HMAC the host attached must verify under its signing key
    crypto::hmac_verify(
        &keys.sign_ab,
        &plain[..10 + data_len],
        &plain[10 + data_len..10 + data_len + 32],
    )
    .unwrap();

    SentCommand {
        counter,
        kind,
        code,
        data,
    }
}
