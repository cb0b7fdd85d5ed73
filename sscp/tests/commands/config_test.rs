use crate::common::fixtures::{decode_sent_command, seed_reply, Tee};
use sscp::constants::{CMD_SET_BAUDRATE, CMD_SET_RS485_ADDRESS};
use sscp::test_support::{secure_coupler_at, test_session_keys};
use sscp::transport::MockTransport;
use sscp::types::{Baudrate, CommandHeader};

#[test]
fn set_baudrate_sends_selector_then_reconfigures_locally() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, CommandHeader::new(CMD_SET_BAUDRATE), &[], 0x00);
    let (tee, sent) = Tee::new(mock);
    let mut coupler = secure_coupler_at(Box::new(tee), 1);
    coupler.set_baudrate(Baudrate::B115200).unwrap();

    let sent = sent.borrow();
    let cmd = decode_sent_command(&sent[0], &test_session_keys());
    assert_eq!(cmd.code, CMD_SET_BAUDRATE as u16);
    assert_eq!(cmd.data, vec![4]); // selector for 115200
}

#[test]
fn set_rs485_address_updates_selection() {
    let mut mock = MockTransport::new();
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_SET_RS485_ADDRESS),
        &[],
        0x00,
    );
    let (tee, sent) = Tee::new(mock);
    let mut coupler = secure_coupler_at(Box::new(tee), 1);
    assert_eq!(coupler.address(), 0x00);
    coupler.set_rs485_address(0x09).unwrap();
    assert_eq!(coupler.address(), 0x09);

    let sent = sent.borrow();
    let cmd = decode_sent_command(&sent[0], &test_session_keys());
    assert_eq!(cmd.data, vec![0x09]);
}

#[test]
fn set_rs485_address_validates_range() {
    let mock = MockTransport::new();
    let mut coupler = secure_coupler_at(Box::new(mock), 1);
    assert!(coupler.set_rs485_address(0xF0).is_err());
    // Rejected before anything was sent
    assert_eq!(coupler.statistics().bytes_sent, 0);
}
