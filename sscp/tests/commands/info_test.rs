use crate::common::fixtures::seed_reply;
use sscp::constants::{CMD_GET_INFOS, CMD_GET_READER_TYPE, CMD_GET_SERIAL_NUMBER};
use sscp::test_support::secure_coupler_with;
use sscp::transport::MockTransport;
use sscp::types::{Baudrate, CommandHeader};
use sscp::Error;

#[test]
fn get_infos_parses_fields() {
    let mut mock = MockTransport::new();
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_GET_INFOS),
        &[0x13, 0x02, 0x01, 0x0C, 0xE4],
        0x00,
    );
    let mut coupler = secure_coupler_with(mock);

    let info = coupler.get_infos().unwrap();
    assert_eq!(info.version, 0x13);
    assert_eq!(info.baudrate_selector, 0x02);
    assert_eq!(info.baudrate(), Some(Baudrate::B38400));
    assert_eq!(info.address, 0x01);
    assert_eq!(info.voltage, 0x0CE4); // 3300 mV
}

#[test]
fn get_infos_short_response() {
    let mut mock = MockTransport::new();
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_GET_INFOS),
        &[0x13, 0x02],
        0x00,
    );
    let mut coupler = secure_coupler_with(mock);
    assert!(matches!(
        coupler.get_infos(),
        Err(Error::UnsupportedResponseLength(2))
    ));
}

#[test]
fn serial_number_formatting() {
    let mut mock = MockTransport::new();
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_GET_SERIAL_NUMBER),
        &[b'S', 0xDE, 0xAD, 0x01, 0x9F],
        0x00,
    );
    let mut coupler = secure_coupler_with(mock);
    assert_eq!(coupler.get_serial_number().unwrap(), "SDEAD019F");
}

#[test]
fn serial_number_strict_length() {
    let mut mock = MockTransport::new();
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_GET_SERIAL_NUMBER),
        &[b'S', 0xDE, 0xAD, 0x01, 0x9F, 0x00],
        0x00,
    );
    let mut coupler = secure_coupler_with(mock);
    assert!(matches!(
        coupler.get_serial_number(),
        Err(Error::UnsupportedResponseLength(6))
    ));
}

#[test]
fn reader_type_stops_at_nul() {
    let mut mock = MockTransport::new();
    let mut data = b"WAL-x86".to_vec();
    data.push(0x00);
    data.extend_from_slice(&[0xAA, 0xBB]); // trailing garbage after EOT
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_GET_READER_TYPE),
        &data,
        0x00,
    );
    let mut coupler = secure_coupler_with(mock);
    assert_eq!(coupler.get_reader_type().unwrap(), "WAL-x86");
}

#[test]
fn reader_type_without_nul() {
    let mut mock = MockTransport::new();
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_GET_READER_TYPE),
        b"SpringPark",
        0x00,
    );
    let mut coupler = secure_coupler_with(mock);
    assert_eq!(coupler.get_reader_type().unwrap(), "SpringPark");
}
