//! Collaborator seams.
//!
//! Organizations, profiles, and the business entities themselves are
//! owned by other parts of the platform. This subsystem consumes them
//! through narrow lookup traits, injected as trait objects at
//! construction time.
//!
//! All lookups return `Option` rather than `Result`: a missing record is
//! an expected, tolerated answer (dangling references are a state, not
//! an error). Implementations are expected to swallow their own
//! transport failures into `None` or handle them upstream.

use async_trait::async_trait;

use keel_core::entity_type::EntityType;
use keel_core::error::CoreError;
use keel_core::types::{OrgId, ProfileId};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Organizations
// ---------------------------------------------------------------------------

/// A tenant organization as seen by this subsystem.
#[derive(Debug, Clone)]
pub struct OrgEntry {
    pub id: OrgId,
    pub name: String,
    pub is_active: bool,
}

/// Lookup of tenant organizations by id.
#[async_trait]
pub trait OrgDirectory: Send + Sync {
    async fn find(&self, org_id: OrgId) -> Option<OrgEntry>;
}

// ---------------------------------------------------------------------------
// Profiles
// ---------------------------------------------------------------------------

/// Lookup of profile display names for weak actor references.
#[async_trait]
pub trait ProfileDirectory: Send + Sync {
    /// `None` when the profile no longer exists; listings then omit the
    /// author/uploader detail instead of failing.
    async fn display_name(&self, profile_id: ProfileId) -> Option<String>;
}

// ---------------------------------------------------------------------------
// Business entities
// ---------------------------------------------------------------------------

/// What the catalog knows about a referenced business entity.
#[derive(Debug, Clone)]
pub struct TargetEntry {
    /// The organization that owns the entity.
    pub org_id: OrgId,
    /// Display label, denormalized into activity rows at write time.
    pub display_name: String,
    pub is_active: bool,
}

/// Lookup of business entities targeted by generic references.
///
/// `locate` is best-effort: `None` means the target is unknown or gone,
/// which write paths treat optimistically (the reference is stored
/// anyway) and read paths treat as a dangling reference.
#[async_trait]
pub trait EntityCatalog: Send + Sync {
    async fn locate(&self, entity_type: EntityType, entity_id: Uuid) -> Option<TargetEntry>;
}

// ---------------------------------------------------------------------------
// Shared checks
// ---------------------------------------------------------------------------

/// Require that the caller's org binding names an existing, active
/// organization. Every write path runs this before persisting anything.
pub(crate) async fn require_active_org(
    orgs: &dyn OrgDirectory,
    org_id: OrgId,
) -> Result<OrgEntry, CoreError> {
    match orgs.find(org_id).await {
        Some(org) if org.is_active => Ok(org),
        Some(_) => Err(CoreError::Validation(format!(
            "Organization {org_id} is inactive"
        ))),
        None => Err(CoreError::Validation(format!(
            "Unknown organization: {org_id}"
        ))),
    }
}
