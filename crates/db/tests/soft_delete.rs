//! Integration tests for soft-delete behaviour.
//!
//! Exercises the repository layer to verify that:
//! - Deactivated records are hidden from `find_by_id` and list queries
//! - Deactivation is idempotent (second call succeeds, same final state)
//! - Deactivation is org-scoped (another tenant cannot soft-delete)

use sqlx::PgPool;
use uuid::Uuid;

use keel_core::pagination::PageRequest;
use keel_db::models::activity::CreateActivity;
use keel_db::models::attachment::CreateAttachment;
use keel_db::models::comment::CreateComment;
use keel_db::repositories::{AttachmentRepo, CommentRepo};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_comment(org_id: Uuid, entity_id: Uuid) -> CreateComment {
    CreateComment {
        org_id,
        entity_type: "task".to_string(),
        entity_id,
        text: "soft delete test".to_string(),
        author_id: None,
    }
}

fn new_attachment(org_id: Uuid, entity_id: Uuid) -> CreateAttachment {
    CreateAttachment {
        org_id,
        entity_type: "task".to_string(),
        entity_id,
        file_key: "blobs/soft-delete".to_string(),
        file_name: "notes.txt".to_string(),
        name: "notes.txt".to_string(),
        uploaded_by: None,
    }
}

fn stub_activity(org_id: Uuid, entity_id: Uuid) -> CreateActivity {
    CreateActivity {
        org_id,
        user_id: None,
        action: "comment".to_string(),
        entity_type: "task".to_string(),
        entity_id,
        entity_name: String::new(),
        description: String::new(),
    }
}

// ---------------------------------------------------------------------------
// Test: deactivate hides the comment from reads
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_hides_comment(pool: PgPool) {
    let org = Uuid::now_v7();
    let task = Uuid::now_v7();

    let comment = CommentRepo::create(&pool, &new_comment(org, task), &stub_activity(org, task))
        .await
        .unwrap();

    let found = CommentRepo::deactivate(&pool, comment.id, org, None)
        .await
        .unwrap();
    assert!(found);

    let by_id = CommentRepo::find_by_id(&pool, comment.id, org).await.unwrap();
    assert!(by_id.is_none(), "deactivated comment must not be findable");

    let page = CommentRepo::list_for_entity(&pool, org, "task", task, &PageRequest::first())
        .await
        .unwrap();
    assert!(page.items.is_empty(), "deactivated comment must not be listed");
}

// ---------------------------------------------------------------------------
// Test: deactivate is idempotent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_is_idempotent(pool: PgPool) {
    let org = Uuid::now_v7();
    let task = Uuid::now_v7();

    let comment = CommentRepo::create(&pool, &new_comment(org, task), &stub_activity(org, task))
        .await
        .unwrap();

    let first = CommentRepo::deactivate(&pool, comment.id, org, None)
        .await
        .unwrap();
    let second = CommentRepo::deactivate(&pool, comment.id, org, None)
        .await
        .unwrap();

    assert!(first);
    assert!(second, "second deactivation must succeed, not error");

    let page = CommentRepo::list_for_entity(&pool, org, "task", task, &PageRequest::first())
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

// ---------------------------------------------------------------------------
// Test: another org cannot deactivate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_is_org_scoped(pool: PgPool) {
    let org = Uuid::now_v7();
    let other_org = Uuid::now_v7();
    let task = Uuid::now_v7();

    let comment = CommentRepo::create(&pool, &new_comment(org, task), &stub_activity(org, task))
        .await
        .unwrap();

    let found = CommentRepo::deactivate(&pool, comment.id, other_org, None)
        .await
        .unwrap();
    assert!(!found, "cross-org deactivate must not match any row");

    // Still visible to the owning org.
    let by_id = CommentRepo::find_by_id(&pool, comment.id, org).await.unwrap();
    assert!(by_id.is_some());
}

// ---------------------------------------------------------------------------
// Test: the pattern is identical for attachments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivate_attachment(pool: PgPool) {
    let org = Uuid::now_v7();
    let task = Uuid::now_v7();

    let attachment = AttachmentRepo::create(
        &pool,
        &new_attachment(org, task),
        &stub_activity(org, task),
    )
    .await
    .unwrap();

    assert!(AttachmentRepo::deactivate(&pool, attachment.id, org, None)
        .await
        .unwrap());
    assert!(AttachmentRepo::deactivate(&pool, attachment.id, org, None)
        .await
        .unwrap());

    let by_id = AttachmentRepo::find_by_id(&pool, attachment.id, org)
        .await
        .unwrap();
    assert!(by_id.is_none());
}
