//! Shared fixtures for service integration tests.
//!
//! Collaborator lookups (orgs, profiles, business entities) are in-memory
//! fakes; only the record store itself runs against the real database.

// Each test binary uses a different slice of the world.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use keel_core::entity_type::EntityType;
use keel_service::collaborators::{
    EntityCatalog, OrgDirectory, OrgEntry, ProfileDirectory, TargetEntry,
};
use keel_service::{ActivityService, RelationService};

// ---------------------------------------------------------------------------
// Fake collaborators
// ---------------------------------------------------------------------------

pub struct FakeOrgs(HashMap<Uuid, OrgEntry>);

#[async_trait]
impl OrgDirectory for FakeOrgs {
    async fn find(&self, org_id: Uuid) -> Option<OrgEntry> {
        self.0.get(&org_id).cloned()
    }
}

pub struct FakeProfiles(HashMap<Uuid, String>);

#[async_trait]
impl ProfileDirectory for FakeProfiles {
    async fn display_name(&self, profile_id: Uuid) -> Option<String> {
        self.0.get(&profile_id).cloned()
    }
}

pub struct FakeCatalog(HashMap<(EntityType, Uuid), TargetEntry>);

#[async_trait]
impl EntityCatalog for FakeCatalog {
    async fn locate(&self, entity_type: EntityType, entity_id: Uuid) -> Option<TargetEntry> {
        self.0.get(&(entity_type, entity_id)).cloned()
    }
}

// ---------------------------------------------------------------------------
// World
// ---------------------------------------------------------------------------

/// A ready-to-use service pair plus the fixture ids it knows about.
pub struct World {
    pub relations: RelationService,
    pub activity: ActivityService,
    /// Active org owning `lead`.
    pub org_a: Uuid,
    /// Active org owning `account_b`.
    pub org_b: Uuid,
    /// Org present in the directory but deactivated.
    pub org_inactive: Uuid,
    /// Profile known to the directory as "Dana Reyes".
    pub author: Uuid,
    /// Profile id with no directory entry (removed profile).
    pub ghost_author: Uuid,
    /// Lead owned by `org_a`, display name "Northwind Traders".
    pub lead: Uuid,
    /// Account owned by `org_b`.
    pub account_b: Uuid,
}

pub fn build_world(pool: PgPool) -> World {
    init_tracing();

    let org_a = Uuid::now_v7();
    let org_b = Uuid::now_v7();
    let org_inactive = Uuid::now_v7();
    let author = Uuid::now_v7();
    let ghost_author = Uuid::now_v7();
    let lead = Uuid::now_v7();
    let account_b = Uuid::now_v7();

    let orgs = Arc::new(FakeOrgs(HashMap::from([
        (
            org_a,
            OrgEntry {
                id: org_a,
                name: "Alpha Org".to_string(),
                is_active: true,
            },
        ),
        (
            org_b,
            OrgEntry {
                id: org_b,
                name: "Beta Org".to_string(),
                is_active: true,
            },
        ),
        (
            org_inactive,
            OrgEntry {
                id: org_inactive,
                name: "Closed Org".to_string(),
                is_active: false,
            },
        ),
    ])));

    let profiles = Arc::new(FakeProfiles(HashMap::from([(
        author,
        "Dana Reyes".to_string(),
    )])));

    let catalog = Arc::new(FakeCatalog(HashMap::from([
        (
            (EntityType::Lead, lead),
            TargetEntry {
                org_id: org_a,
                display_name: "Northwind Traders".to_string(),
                is_active: true,
            },
        ),
        (
            (EntityType::Account, account_b),
            TargetEntry {
                org_id: org_b,
                display_name: "Globex".to_string(),
                is_active: true,
            },
        ),
    ])));

    World {
        relations: RelationService::new(pool.clone(), orgs.clone(), profiles, catalog),
        activity: ActivityService::new(pool, orgs),
        org_a,
        org_b,
        org_inactive,
        author,
        ghost_author,
        lead,
        account_b,
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
