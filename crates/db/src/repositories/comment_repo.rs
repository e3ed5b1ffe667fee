//! Repository for the `comments` table.

use sqlx::PgPool;
use uuid::Uuid;

use keel_core::pagination::{clamp_limit, Page, PageRequest, PageToken};

use crate::models::activity::CreateActivity;
use crate::models::comment::{Comment, CreateComment};
use crate::repositories::activity_repo::{into_page, split_token, ActivityRepo};

/// Column list for `comments` queries.
const COLUMNS: &str = "\
    id, org_id, entity_type, entity_id, text, author_id, \
    created_by, updated_by, is_active, created_at, updated_at";

/// Create and read operations for comments.
pub struct CommentRepo;

impl CommentRepo {
    /// Create a comment and its audit record as one atomic unit.
    ///
    /// Both rows are inserted in a single transaction: either the comment
    /// and its activity are durably recorded together, or neither is.
    pub async fn create(
        pool: &PgPool,
        input: &CreateComment,
        activity: &CreateActivity,
    ) -> Result<Comment, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO comments \
                (id, org_id, entity_type, entity_id, text, author_id, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {COLUMNS}"
        );
        let comment = sqlx::query_as::<_, Comment>(&query)
            .bind(Uuid::now_v7())
            .bind(input.org_id)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.text)
            .bind(input.author_id)
            .bind(input.author_id)
            .fetch_one(&mut *tx)
            .await?;

        ActivityRepo::insert(&mut *tx, activity).await?;

        tx.commit().await?;
        Ok(comment)
    }

    /// Find an active comment by id within one organization.
    pub async fn find_by_id(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments \
             WHERE id = $1 AND org_id = $2 AND is_active = TRUE"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(id)
            .bind(org_id)
            .fetch_optional(pool)
            .await
    }

    /// List active comments on one entity, newest first.
    ///
    /// Ordered by `(created_at DESC, id DESC)`; the page token resumes
    /// after the last row seen and the listing is stable across repeated
    /// calls with no intervening writes.
    pub async fn list_for_entity(
        pool: &PgPool,
        org_id: Uuid,
        entity_type: &str,
        entity_id: Uuid,
        page: &PageRequest,
    ) -> Result<Page<Comment>, sqlx::Error> {
        let limit = clamp_limit(page.limit);
        let (cursor_at, cursor_id) = split_token(&page.token);

        let query = format!(
            "SELECT {COLUMNS} FROM comments \
             WHERE org_id = $1 AND entity_type = $2 AND entity_id = $3 \
               AND is_active = TRUE \
               AND ($4::timestamptz IS NULL \
                    OR (created_at, id) < ($4::timestamptz, $5::uuid)) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $6"
        );
        let rows = sqlx::query_as::<_, Comment>(&query)
            .bind(org_id)
            .bind(entity_type)
            .bind(entity_id)
            .bind(cursor_at)
            .bind(cursor_id)
            .bind(limit + 1)
            .fetch_all(pool)
            .await?;

        Ok(into_page(rows, limit, |c| PageToken {
            created_at: c.created_at,
            id: c.id,
        }))
    }

    /// Soft-delete a comment. Idempotent: repeating the call leaves the
    /// same final state and reports success.
    ///
    /// Returns `false` only when the id does not exist in the caller's
    /// organization.
    pub async fn deactivate(
        pool: &PgPool,
        id: Uuid,
        org_id: Uuid,
        actor: Option<Uuid>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE comments \
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
