//! Integration tests for service-level soft deletion.

mod common;

use assert_matches::assert_matches;
use sqlx::PgPool;
use uuid::Uuid;

use keel_core::error::CoreError;
use keel_core::pagination::PageRequest;
use keel_core::types::BlobRef;
use keel_service::ServiceError;

use common::build_world;

// ---------------------------------------------------------------------------
// Test: deactivating a comment hides it and is idempotent
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivate_comment_is_idempotent(pool: PgPool) {
    let w = build_world(pool);

    let comment = w
        .relations
        .attach_comment(w.org_a, w.author, "lead", w.lead, "to be removed")
        .await
        .unwrap();

    w.relations
        .deactivate_comment(w.org_a, comment.id, Some(w.author))
        .await
        .unwrap();
    // Second call: same final state, no error.
    w.relations
        .deactivate_comment(w.org_a, comment.id, Some(w.author))
        .await
        .unwrap();

    let page = w
        .relations
        .list_comments(w.org_a, "lead", w.lead, &PageRequest::first())
        .await
        .unwrap();
    assert!(page.items.is_empty());
}

// ---------------------------------------------------------------------------
// Test: unknown ids and foreign orgs get NotFound
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivate_unknown_comment_fails(pool: PgPool) {
    let w = build_world(pool);

    let err = w
        .relations
        .deactivate_comment(w.org_a, Uuid::now_v7(), None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::NotFound { .. }));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivate_from_foreign_org_fails(pool: PgPool) {
    let w = build_world(pool);

    let comment = w
        .relations
        .attach_comment(w.org_a, w.author, "lead", w.lead, "org a's comment")
        .await
        .unwrap();

    // Org B sees NotFound, and the comment stays visible in org A.
    let err = w
        .relations
        .deactivate_comment(w.org_b, comment.id, None)
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::Core(CoreError::NotFound { .. }));

    let page = w
        .relations
        .list_comments(w.org_a, "lead", w.lead, &PageRequest::first())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
}

// ---------------------------------------------------------------------------
// Test: attachments follow the same pattern
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_deactivate_attachment(pool: PgPool) {
    let w = build_world(pool);

    let attachment = w
        .relations
        .attach_file(
            w.org_a,
            w.author,
            "lead",
            w.lead,
            BlobRef {
                key: "org-blobs/2026/old.pdf".to_string(),
                file_name: "old.pdf".to_string(),
            },
            None,
        )
        .await
        .unwrap();

    w.relations
        .deactivate_attachment(w.org_a, attachment.id, Some(w.author))
        .await
        .unwrap();
    w.relations
        .deactivate_attachment(w.org_a, attachment.id, Some(w.author))
        .await
        .unwrap();

    let page = w
        .relations
        .list_attachments(w.org_a, "lead", w.lead, &PageRequest::first())
        .await
        .unwrap();
    assert!(page.items.is_empty());
}
