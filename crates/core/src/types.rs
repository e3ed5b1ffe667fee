//! Shared identifier and timestamp aliases.

use serde::{Deserialize, Serialize};

/// All record primary keys are UUIDs, generated app-side as UUIDv7 so that
/// id order agrees with creation order within a timestamp tick.
pub type RecordId = uuid::Uuid;

/// Organization (tenant) identifier.
pub type OrgId = uuid::Uuid;

/// Profile identifier (weak actor references).
pub type ProfileId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Location of an uploaded file in the external blob store.
///
/// The blob store is an upstream collaborator: callers store the file
/// first and hand the resulting reference to this subsystem, which never
/// interprets file contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobRef {
    /// Opaque storage key/location returned by the blob store.
    pub key: String,
    /// Filename the blob was stored under.
    pub file_name: String,
}
