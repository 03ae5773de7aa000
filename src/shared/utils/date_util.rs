use jiff::{SignedDuration, Timestamp};

// Type aliases used across the crate
pub type DateTime = Timestamp;
pub type Duration = SignedDuration;

pub struct DateUtil;

impl DateUtil {
    /// Current UTC instant
    pub fn now() -> DateTime {
        Timestamp::now()
    }

    pub fn to_rfc3339(dt: &DateTime) -> String {
        dt.to_string()
    }
}

// Duration helpers
impl DateUtil {
    /// Convert a std duration (as used by tokio timers) into a signed one
    pub fn from_std(duration: std::time::Duration) -> Result<Duration, jiff::Error> {
        SignedDuration::try_from(duration)
    }
}

// DateTime operations
impl DateUtil {
    pub fn add_duration(dt: &DateTime, duration: Duration) -> Result<DateTime, jiff::Error> {
        dt.checked_add(duration)
    }

    pub fn is_past(dt: &DateTime) -> bool {
        dt <= &Self::now()
    }
}
