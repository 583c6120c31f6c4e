/// User ids are opaque strings issued by the external directory.
pub type UserId = String;

/// Page ids are opaque strings issued by the external directory.
pub type PageId = String;

/// Canvas component ids are generated v4 UUIDs, unique within a canvas.
pub type ComponentId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
