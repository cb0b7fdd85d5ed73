//! Scan throttling: back-to-back scans must be spaced by the guard
//! interval, measured with the monotonic clock.

use std::time::{Duration, Instant};

use crate::common::fixtures::seed_reply;
use sscp::constants::{CMD_SCAN_GLOBAL, SCAN_GUARD_TIME_MS};
use sscp::test_support::secure_coupler_with;
use sscp::transport::MockTransport;
use sscp::types::{CommandHeader, TagInfo};

#[test]
fn back_to_back_scans_are_throttled() {
    let mut mock = MockTransport::new();
    let scan = CommandHeader::new(CMD_SCAN_GLOBAL);
    seed_reply(&mut mock, 2, scan, &[0x00], 0x00); // no tag
    seed_reply(&mut mock, 4, scan, &[0x00], 0x00);
    let mut coupler = secure_coupler_with(mock);

    let start = Instant::now();
    assert_eq!(coupler.scan_nfc().unwrap(), TagInfo::None);
    let first_done = start.elapsed();
    // First scan arms the guard but does not wait
    assert!(first_done < Duration::from_millis(SCAN_GUARD_TIME_MS / 2));

    assert_eq!(coupler.scan_nfc().unwrap(), TagInfo::None);
    let both_done = start.elapsed();
    assert!(
        both_done >= Duration::from_millis(SCAN_GUARD_TIME_MS - 50),
        "second scan returned after {:?}, guard is {}ms",
        both_done,
        SCAN_GUARD_TIME_MS
    );
}

#[test]
fn explicit_guard_and_wait() {
    let mock = MockTransport::new();
    let mut coupler = secure_coupler_with(mock);

    coupler.guard_time(Duration::from_millis(80));
    let start = Instant::now();
    coupler.wait_guard_time();
    assert!(start.elapsed() >= Duration::from_millis(75));

    // Consumed: a second wait is free
    let start = Instant::now();
    coupler.wait_guard_time();
    assert!(start.elapsed() < Duration::from_millis(10));
}
