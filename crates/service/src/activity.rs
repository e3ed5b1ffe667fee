//! Audit trail operations.

use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use keel_core::activity::ActivityAction;
use keel_core::content::{validate_description, validate_entity_name};
use keel_core::error::CoreError;
use keel_core::pagination::{Page, PageRequest};
use keel_core::types::{OrgId, ProfileId, Timestamp};
use keel_db::models::activity::{ActivityFilter, ActivityRecord, CreateActivity};
use keel_db::repositories::ActivityRepo;
use keel_db::DbPool;

use crate::collaborators::{require_active_org, OrgDirectory};
use crate::error::ServiceResult;
use crate::retry::with_retry;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Filter parameters for querying the trail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityQuery {
    pub entity_type: Option<String>,
    pub entity_id: Option<Uuid>,
    pub action: Option<ActivityAction>,
    pub user: Option<ProfileId>,
    pub from: Option<Timestamp>,
    pub to: Option<Timestamp>,
}

impl ActivityQuery {
    fn into_filter(self) -> ActivityFilter {
        ActivityFilter {
            entity_type: self
                .entity_type
                .map(|t| t.trim().to_ascii_lowercase()),
            entity_id: self.entity_id,
            action: self.action.map(|a| a.as_str().to_string()),
            user_id: self.user,
            from: self.from,
            to: self.to,
        }
    }
}

// ---------------------------------------------------------------------------
// ActivityService
// ---------------------------------------------------------------------------

/// Records and queries the append-only, tenant-scoped audit trail.
pub struct ActivityService {
    pool: DbPool,
    orgs: Arc<dyn OrgDirectory>,
}

impl ActivityService {
    pub fn new(pool: DbPool, orgs: Arc<dyn OrgDirectory>) -> Self {
        ActivityService { pool, orgs }
    }

    /// Record an action taken against an entity.
    ///
    /// Succeeds unless the org binding itself is invalid: the entity
    /// reference is never checked against the registry or the target
    /// table, since the trail keeps history for unknown and deleted
    /// entities alike. (This is deliberately laxer than the validation
    /// on comment/attachment targets: the trail accepts kinds like
    /// `team` that the registry does not carry.)
    pub async fn record(
        &self,
        org_id: OrgId,
        user: Option<ProfileId>,
        action: ActivityAction,
        type_name: &str,
        entity_id: Uuid,
        entity_name: &str,
        description: Option<&str>,
    ) -> ServiceResult<ActivityRecord> {
        let entity_type = type_name.trim().to_ascii_lowercase();
        if entity_type.is_empty() {
            return Err(CoreError::Validation("Entity type cannot be empty".to_string()).into());
        }
        validate_entity_name(entity_name).map_err(CoreError::Validation)?;
        let description = description.unwrap_or_default();
        validate_description(description).map_err(CoreError::Validation)?;

        require_active_org(self.orgs.as_ref(), org_id).await?;

        let input = CreateActivity {
            org_id,
            user_id: user,
            action: action.as_str().to_string(),
            entity_type,
            entity_id,
            entity_name: entity_name.to_string(),
            description: description.to_string(),
        };

        let record =
            with_retry("activity.append", || ActivityRepo::append(&self.pool, &input)).await?;

        tracing::info!(
            activity_id = %record.id,
            org_id = %org_id,
            action = %record.action,
            entity_type = %record.entity_type,
            entity_id = %record.entity_id,
            "Activity recorded"
        );

        Ok(record)
    }

    /// Query the trail for one organization, newest first.
    pub async fn query(
        &self,
        org_id: OrgId,
        query: ActivityQuery,
        page: &PageRequest,
    ) -> ServiceResult<Page<ActivityRecord>> {
        let filter = query.into_filter();
        let page = ActivityRepo::query(&self.pool, org_id, &filter, page).await?;
        Ok(page)
    }

    /// Count trail records matching the filter.
    pub async fn count(&self, org_id: OrgId, query: ActivityQuery) -> ServiceResult<i64> {
        let filter = query.into_filter();
        let total = ActivityRepo::count(&self.pool, org_id, &filter).await?;
        Ok(total)
    }
}
