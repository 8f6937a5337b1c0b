/// Integer surrogate keys (products, brands, check-ins, ...) are
/// PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// Profiles are keyed by the auth principal's UUID.
pub type ProfileId = uuid::Uuid;

/// Locations are keyed by UUID.
pub type LocationId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
