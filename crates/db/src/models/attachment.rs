//! Attachment model: an uploaded file attached to any registered entity
//! kind. File contents live in the external blob store; only the opaque
//! location is recorded here.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use keel_core::types::Timestamp;

/// A row from the `attachments` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Attachment {
    pub id: Uuid,
    pub org_id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    /// Opaque blob store key; never interpreted by this subsystem.
    pub file_key: String,
    /// Filename the blob was stored under.
    pub file_name: String,
    /// Display name, resolved at write time (caller override or
    /// `file_name`).
    pub name: String,
    /// Weak reference to the uploading profile.
    pub uploaded_by: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new attachment.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAttachment {
    pub org_id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub file_key: String,
    pub file_name: String,
    pub name: String,
    pub uploaded_by: Option<Uuid>,
}
