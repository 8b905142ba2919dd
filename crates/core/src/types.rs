/// Persisted row identifiers are PostgreSQL BIGSERIAL.
pub type RowId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
