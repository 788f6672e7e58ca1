//! Request timestamps.
//!
//! Every signed request carries `request_timestamp`, the current Unix time in
//! seconds. The server rejects requests whose timestamp drifts too far from its
//! own clock, so the source is pluggable for tests and clock-skew correction.

use time::OffsetDateTime;

/// Trait for providing the `request_timestamp` of a signed request.
pub trait TimestampProvider: Send + Sync {
    /// Current Unix time in whole seconds.
    fn unix_timestamp(&self) -> i64;
}

/// Reads the system clock, rounding milliseconds to the nearest second.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimestampProvider for SystemClock {
    fn unix_timestamp(&self) -> i64 {
        let millis = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        round_millis_to_secs(millis)
    }
}

fn round_millis_to_secs(millis: i128) -> i64 {
    ((millis + 500).div_euclid(1000)) as i64
}

/// A provider that always returns the same timestamp.
///
/// Makes signatures reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimestamp(pub i64);

impl TimestampProvider for FixedTimestamp {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding() {
        assert_eq!(round_millis_to_secs(1_700_000_000_499), 1_700_000_000);
        assert_eq!(round_millis_to_secs(1_700_000_000_500), 1_700_000_001);
        assert_eq!(round_millis_to_secs(0), 0);
    }

    #[test]
    fn test_system_clock_is_seconds() {
        let now = SystemClock.unix_timestamp();
        // After 2020-01-01 and before the year 2100 in seconds, not millis.
        assert!(now > 1_577_836_800);
        assert!(now < 4_102_444_800);
    }

    #[test]
    fn test_fixed_timestamp() {
        assert_eq!(FixedTimestamp(42).unix_timestamp(), 42);
    }
}
