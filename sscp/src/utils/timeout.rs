//! Timeout helpers. SSCP uses a two-level receive timeout: a long one
//! for the first response byte and a short one for every byte after it.

use std::time::Duration;

use crate::constants::{RESPONSE_FIRST_TIMEOUT_MS, RESPONSE_NEXT_TIMEOUT_MS};

/// Convert milliseconds to Duration.
pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Default budget for the first response byte.
pub fn first_byte_timeout() -> Duration {
    ms(RESPONSE_FIRST_TIMEOUT_MS)
}

/// Default budget for each subsequent byte.
pub fn inter_byte_timeout() -> Duration {
    ms(RESPONSE_NEXT_TIMEOUT_MS)
}
