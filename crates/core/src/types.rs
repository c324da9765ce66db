/// Records are keyed by opaque string ids.
pub type RecordId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
