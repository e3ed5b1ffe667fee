//! Comment model: a text note attached to any registered entity kind.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use keel_core::types::Timestamp;

/// A row from the `comments` table.
///
/// `(entity_type, entity_id)` is a generic reference to the commented-on
/// entity; the target is never embedded and may no longer exist.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub org_id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub text: String,
    /// Weak reference to the authoring profile; `None` once the profile
    /// is removed.
    pub author_id: Option<Uuid>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new comment.
///
/// `entity_type` is expected to already be a resolved registry token;
/// the service layer performs the resolution.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateComment {
    pub org_id: Uuid,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub text: String,
    pub author_id: Option<Uuid>,
}
