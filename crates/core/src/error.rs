//! Domain error taxonomy shared across the workspace.

use crate::types::{OrgId, RecordId};

/// Domain-level error for record-relationship operations.
///
/// Storage failures are not represented here; they stay `sqlx::Error` in
/// the repository layer and are wrapped by the service crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Malformed input: empty text, oversized field, invalid org binding.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The entity type name is not in the registry.
    #[error("Unknown entity type: {token:?}")]
    UnknownEntityType { token: String },

    /// The caller's organization does not match the target's.
    #[error("Cross-tenant access denied")]
    CrossTenant { caller_org: OrgId, target_org: OrgId },

    /// An org-scoped lookup found nothing.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: RecordId },
}
