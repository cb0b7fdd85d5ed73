use crate::common::fixtures::{decode_sent_command, seed_reply, Tee};
use sscp::constants::{CMD_RELEASE_RF, CMD_TRANSCEIVE_APDU};
use sscp::test_support::{secure_coupler_at, secure_coupler_with, test_session_keys};
use sscp::transport::MockTransport;
use sscp::types::CommandHeader;
use sscp::Error;

const TRANSCEIVE: CommandHeader = CommandHeader::new(CMD_TRANSCEIVE_APDU);
const SELECT_MF: [u8; 7] = [0x00, 0xA4, 0x04, 0x00, 0x02, 0x3F, 0x00];

#[test]
fn apdu_roundtrip() {
    let mut mock = MockTransport::new();
    // status 0x00 + R-APDU 90 00
    seed_reply(&mut mock, 2, TRANSCEIVE, &[0x00, 0x90, 0x00], 0x00);
    let (tee, sent) = Tee::new(mock);
    let mut coupler = secure_coupler_at(Box::new(tee), 1);

    let r_apdu = coupler.transceive_apdu(&SELECT_MF).unwrap();
    assert_eq!(r_apdu, vec![0x90, 0x00]);

    let sent = sent.borrow();
    let cmd = decode_sent_command(&sent[0], &test_session_keys());
    assert_eq!(cmd.kind, 0x00);
    assert_eq!(cmd.code, CMD_TRANSCEIVE_APDU as u16);
    assert_eq!(cmd.data, SELECT_MF.to_vec());
}

#[test]
fn card_mute_or_removed() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, TRANSCEIVE, &[0x01], 0x00);
    let mut coupler = secure_coupler_with(mock);
    assert!(matches!(
        coupler.transceive_apdu(&SELECT_MF),
        Err(Error::NfcCardMuteOrRemoved)
    ));
}

#[test]
fn card_comm_error() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, TRANSCEIVE, &[0x02], 0x00);
    let mut coupler = secure_coupler_with(mock);
    assert!(matches!(
        coupler.transceive_apdu(&SELECT_MF),
        Err(Error::NfcCardCommError)
    ));
}

#[test]
fn unknown_first_byte_status() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, TRANSCEIVE, &[0x07, 0x90, 0x00], 0x00);
    let mut coupler = secure_coupler_with(mock);
    assert!(matches!(
        coupler.transceive_apdu(&SELECT_MF),
        Err(Error::UnsupportedResponseStatus(0x07))
    ));
}

#[test]
fn empty_transceive_response() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, TRANSCEIVE, &[], 0x00);
    let mut coupler = secure_coupler_with(mock);
    assert!(matches!(
        coupler.transceive_apdu(&SELECT_MF),
        Err(Error::WrongResponseLength(0))
    ));
}

#[test]
fn release_sends_no_data() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, CommandHeader::new(CMD_RELEASE_RF), &[], 0x00);
    let (tee, sent) = Tee::new(mock);
    let mut coupler = secure_coupler_at(Box::new(tee), 1);
    coupler.release_nfc().unwrap();

    let sent = sent.borrow();
    let cmd = decode_sent_command(&sent[0], &test_session_keys());
    assert_eq!(cmd.code, CMD_RELEASE_RF as u16);
    assert!(cmd.data.is_empty());
}
