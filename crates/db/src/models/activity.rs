//! Activity model: the append-only, tenant-scoped audit trail.
//!
//! Activity rows are immutable once written; the repository exposes no
//! update or delete. `entity_type` here is free-form text rather than a
//! registry token: activity may reference kinds outside the registry
//! (e.g. `team`), matching how the trail is actually used.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use keel_core::types::Timestamp;

/// A row from the `activities` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ActivityRecord {
    pub id: Uuid,
    pub org_id: Uuid,
    /// Weak reference to the acting profile.
    pub user_id: Option<Uuid>,
    /// Action token from the closed set (`create`, `update`, `delete`,
    /// `view`, `comment`, `assign`).
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    /// Display label of the target, captured at write time and never
    /// kept in sync afterwards. Empty when the target could not be
    /// located.
    pub entity_name: String,
    pub description: String,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for appending a new activity record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateActivity {
    pub org_id: Uuid,
    pub user_id: Option<Uuid>,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub entity_name: String,
    pub description: String,
}

/// Filter parameters for querying the trail within one organization.
///
/// The two indexed access patterns are "activity for one entity"
/// (`entity_type` + `entity_id`) and "activity for a tenant over time"
/// (`from`/`to`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityFilter {
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub action: Option<String>,
    pub user_id: Option<Uuid>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}
