use chrono::{TimeZone, Utc};

use getrandom::fill;

pub fn now_ts() -> i64 {
    Utc::now().timestamp()
}

pub fn ts_to_rfc3339(ts: i64) -> String {
    Utc.timestamp_opt(ts, 0)
        .single()
        .unwrap_or_default()
        .to_rfc3339()
}

/// Uniform value in `low..=high`.
///
/// Falls back to `low` if the platform RNG is unavailable; callers retry on collision anyway.
pub fn random_in_range(low: u32, high: u32) -> u32 {
    debug_assert!(low <= high);
    let mut bytes = [0u8; 4];
    if let Err(e) = fill(&mut bytes) {
        tracing::error!(error = %e, "Failed to generate random bytes");
        return low;
    }
    let span = high - low + 1;
    low + u32::from_le_bytes(bytes) % span
}
