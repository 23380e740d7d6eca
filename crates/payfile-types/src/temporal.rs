use chrono::{DateTime, Utc};

/// Wall-clock instant attached to payment files and event metadata.
pub type Timestamp = DateTime<Utc>;

/// The current wall-clock time in UTC.
pub fn now() -> Timestamp {
    Utc::now()
}
