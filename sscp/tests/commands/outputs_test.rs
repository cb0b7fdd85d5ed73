use crate::common::fixtures::{decode_sent_command, seed_reply, Tee};
use sscp::constants::{CMD_EXTERNAL_LED_COLORS, CMD_OUTPUTS, CMD_OUTPUT_RGB};
use sscp::test_support::{secure_coupler_at, test_session_keys};
use sscp::transport::MockTransport;
use sscp::types::CommandHeader;

#[test]
fn outputs_marshals_three_bytes() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, CommandHeader::new(CMD_OUTPUTS), &[], 0x00);
    let (tee, sent) = Tee::new(mock);
    let mut coupler = secure_coupler_at(Box::new(tee), 1);
    coupler.outputs(0x02, 0x0A, 0x02).unwrap();

    let sent = sent.borrow();
    let cmd = decode_sent_command(&sent[0], &test_session_keys());
    assert_eq!(cmd.code, CMD_OUTPUTS as u16);
    assert_eq!(cmd.data, vec![0x02, 0x0A, 0x02]);
}

#[test]
fn outputs_rgb_marshals_color_big_endian() {
    let mut mock = MockTransport::new();
    seed_reply(&mut mock, 2, CommandHeader::new(CMD_OUTPUT_RGB), &[], 0x00);
    let (tee, sent) = Tee::new(mock);
    let mut coupler = secure_coupler_at(Box::new(tee), 1);
    coupler.outputs_rgb(0x20_40_80, 0x0A, 0x00).unwrap();

    let sent = sent.borrow();
    let cmd = decode_sent_command(&sent[0], &test_session_keys());
    assert_eq!(cmd.code, CMD_OUTPUT_RGB as u16);
    assert_eq!(cmd.data, vec![0x20, 0x40, 0x80, 0x0A, 0x00]);
}

#[test]
fn external_led_colors_marshals_triplets() {
    let mut mock = MockTransport::new();
    seed_reply(
        &mut mock,
        2,
        CommandHeader::new(CMD_EXTERNAL_LED_COLORS),
        &[],
        0x00,
    );
    let (tee, sent) = Tee::new(mock);
    let mut coupler = secure_coupler_at(Box::new(tee), 1);
    coupler
        .external_led_colors(0xFF_00_00, 0x00_FF_00, 0x00_00_FF)
        .unwrap();

    let sent = sent.borrow();
    let cmd = decode_sent_command(&sent[0], &test_session_keys());
    assert_eq!(
        cmd.data,
        vec![0xFF, 0x00, 0x00, 0x00, 0xFF, 0x00, 0x00, 0x00, 0xFF]
    );
}
