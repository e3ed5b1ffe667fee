//! Tenant scope guard.
//!
//! Single enforcement point for multi-tenant isolation on write paths.
//! Every create for comments, attachments, and activity records passes
//! through [`authorize_org`] before anything is persisted. Read paths are
//! protected separately: every repository query carries a mandatory
//! `org_id = $n` predicate.

use crate::error::CoreError;
use crate::types::OrgId;

/// Authorize a caller to write against a target organization.
///
/// Fails with [`CoreError::CrossTenant`] when the orgs differ. Violations
/// are logged at `warn!` so security review can pick them up.
pub fn authorize_org(caller_org: OrgId, target_org: OrgId) -> Result<(), CoreError> {
    if caller_org == target_org {
        return Ok(());
    }

    tracing::warn!(
        caller_org = %caller_org,
        target_org = %target_org,
        "Cross-tenant write rejected"
    );

    Err(CoreError::CrossTenant {
        caller_org,
        target_org,
    })
}
