//! Repository for the `attachments` table.
//!
//! Structurally the comment repository's twin; only the payload columns
//! differ (blob location and display name instead of text).

use sqlx::PgPool;
use uuid::Uuid;

use keel_core::pagination::{clamp_limit, Page, PageRequest, PageToken};

use crate::models::activity::CreateActivity;
use crate::models::attachment::{Attachment, CreateAttachment};
use crate::repositories::activity_repo::{into_page, split_token, ActivityRepo};

/// Column list for `attachments` queries.
const COLUMNS: &str = "\
    id, org_id, entity_type, entity_id, file_key, file_name, name, \
    uploaded_by, created_by, updated_by, is_active, created_at, updated_at";

/// Create and read operations for attachments.
pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Create an attachment and its audit record as one atomic unit.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAttachment,
        activity: &CreateActivity,
    ) -> Result<Attachment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO attachments \
                (id, org_id, entity_type, entity_id, file_key, file_name, \
                 name, uploaded_by, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        let attachment = sqlx::query_as::<_, Attachment>(&query)
            .bind(Uuid::now_v7())
            .bind(input.org_id)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.file_key)
            .bind(&input.file_name)
            .bind(&input.name)
            .bind(input.uploaded_by)
            .bind(input.uploaded_by)
            .fetch_one(&mut *tx)
            .await?;

        ActivityRepo::insert(&mut *tx, activity).await?;

        tx.commit().await?;
        Ok(attachment)
    }

    /// Find an active attachment by id within one organization.
    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM attachments \
             WHERE id = $1 AND org_id = $2 AND is_active = TRUE"
        );
        sqlx::query_as::<_, Attachment>(&query)
            .bind(id)
            .bind(org_id)
            .fetch_optional(pool)
            .await
    }

    /// List active attachments on one entity, newest first.
    pub async fn list_for_entity(
        pool: &PgPool,
        org_id: Uuid,
        entity_type: &str,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> Result<Page<Attachment>, sqlx::Error> {
        let limit = clamp_limit(page.limit);
        let (cursor_at, cursor_id) = split_token(&page.token);

        let query = format!(
            "SELECT {COLUMNS} FROM attachments \
             WHERE org_id = $1 AND entity_type = $2 AND entity_id = $3 \
               AND is_active = TRUE \
               AND ($4::timestamptz IS NULL \
                    OR (created_at, id) < ($4::timestamptz, $5::uuid)) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $6"
        );
        let rows = sqlx::query_as::<_, Attachment>(&query)
            .bind(org_id)
            .bind(entity_type)
            .bind(entity_id)
            .bind(cursor_at)
            .bind(cursor_id)
            .bind(limit + 1)
            .fetch_all(pool)
            .await?;

        Ok(into_page(rows, limit, |a| PageToken {
            created_at: a.created_at,
            id: a.id,
        }))
    }

    /// Soft-delete an attachment. Idempotent; `false` only when the id
    /// does not exist in the caller's organization.
    pub async fn deactivate(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
        actor: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE attachments \
             SET is_active = FALSE, updated_at = NOW(), updated_by = $3 \
             WHERE id = $1 AND org_id = $2",
        )
        .bind(id)
        .bind(org_id)
        .bind(actor)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
