//! Repository for the `activities` table.
//!
//! The activity trail is append-only: this repository exposes insert and
//! read operations and nothing else. Querying supports the two indexed
//! access patterns (per-entity history, per-tenant history over time)
//! without a full scan.

use sqlx::PgPool;
use uuid::Uuid;

use keel_core::pagination::{clamp_limit, Page, PageRequest, PageToken};
use keel_core::types::Timestamp;

use crate::models::activity::{ActivityFilter, ActivityRecord, CreateActivity};

/// Column list for `activities` SELECT queries.
const COLUMNS: &str = "\
    id, org_id, user_id, action, entity_type, entity_id, \
    entity_name, description, created_by, updated_by, \
    is_active, created_at, updated_at";

// ---------------------------------------------------------------------------
// ActivityRepo
// ---------------------------------------------------------------------------

/// Append and query operations for the audit trail.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Append one activity record.
    ///
    /// Never validates the entity reference: the trail records history
    /// for unknown and deleted targets alike.
    pub async fn append(
        pool: &PgPool,
        input: &CreateActivity,
    ) -> Result<ActivityRecord, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Insert an activity row through any executor.
    ///
    /// Takes a generic executor so comment/attachment creation can run
    /// the append inside its own transaction.
    pub async fn insert<'e, E>(
        executor: E,
        input: &CreateActivity,
    ) -> Result<ActivityRecord, sqlx::Error>
    where
        E: sqlx::Executor<'e, Database = sqlx::Postgres>,
    {
        let query = format!(
            "INSERT INTO activities \
                (id, org_id, user_id, action, entity_type, entity_id, \
                 entity_name, description, created_by) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ActivityRecord>(&query)
            .bind(Uuid::now_v7())
            .bind(input.org_id)
            .bind(input.user_id)
            .bind(&input.action)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .bind(&input.entity_name)
            .bind(&input.description)
            .bind(input.user_id)
            .fetch_one(executor)
            .await
    }

    /// Query the trail for one organization, newest first.
    ///
    /// Ordering is `(created_at DESC, id DESC)`, a total order within
    /// the org; the page token resumes after the last row seen.
    pub async fn query(
        pool: &PgPool,
        org_id: Uuid,
        filter: &ActivityFilter,
        page: &PageRequest,
    ) -> Result<Page<ActivityRecord>, sqlx::Error> {
        let limit = clamp_limit(page.limit);
        let (cursor_at, cursor_id) = split_token(&page.token);

        let (where_clause, bind_values, bind_idx) = build_activity_filter(org_id, filter);

        let query = format!(
            "SELECT {COLUMNS} FROM activities {where_clause} \
               AND (${bind_idx}::timestamptz IS NULL \
                    OR (created_at, id) < (${bind_idx}::timestamptz, ${}::uuid)) \
             ORDER BY created_at DESC, id DESC \
             LIMIT ${}",
            bind_idx + 1,
            bind_idx + 2
        );

        let q = bind_filter_values(sqlx::query_as::<_, ActivityRecord>(&query), &bind_values);
        let rows = q
            .bind(cursor_at)
            .bind(cursor_id)
            .bind(limit + 1)
            .fetch_all(pool)
            .await?;

        Ok(into_page(rows, limit, |r| PageToken {
            created_at: r.created_at,
            id: r.id,
        }))
    }

    /// Count trail records matching the filter (pagination metadata).
    pub async fn count(
        pool: &PgPool,
        org_id: Uuid,
        filter: &ActivityFilter,
    ) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_activity_filter(org_id, filter);

        let query = format!("SELECT COUNT(*)::BIGINT FROM activities {where_clause}");

        let q = bind_filter_values_scalar(sqlx::query_scalar::<_, i64>(&query), &bind_values);
        q.fetch_one(pool).await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built activity queries.
enum BindValue {
    Id(Uuid),
    Text(String),
    Timestamp(Timestamp),
}

/// Build a WHERE clause and bind values from the mandatory org scope plus
/// optional `ActivityFilter` parameters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause
/// always begins with the org predicate, so callers may append `AND ...`.
fn build_activity_filter(org_id: Uuid, filter: &ActivityFilter) -> (String, Vec<BindValue>, u32) {
    let mut conditions = vec!["org_id = $1".to_string()];
    let mut bind_idx = 2u32;
    let mut bind_values = vec![BindValue::Id(org_id)];

    if let Some(ref entity_type) = filter.entity_type {
        conditions.push(format!("entity_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(entity_type.clone()));
    }

    if let Some(entity_id) = filter.entity_id {
        conditions.push(format!("entity_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Id(entity_id));
    }

    if let Some(ref action) = filter.action {
        conditions.push(format!("action = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(action.clone()));
    }

    if let Some(user_id) = filter.user_id {
        conditions.push(format!("user_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Id(user_id));
    }

    if let Some(from) = filter.from {
        conditions.push(format!("created_at >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(from));
    }

    if let Some(to) = filter.to {
        conditions.push(format!("created_at <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Timestamp(to));
    }

    let where_clause = format!("WHERE {}", conditions.join(" AND "));

    (where_clause, bind_values, bind_idx)
}

/// Bind a slice of `BindValue` to a sqlx `QueryAs`.
fn bind_filter_values<'q, O>(
    mut q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Id(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

/// Bind a slice of `BindValue` to a sqlx `QueryScalar`.
fn bind_filter_values_scalar<'q>(
    mut q: sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments>,
    bind_values: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, i64, sqlx::postgres::PgArguments> {
    for val in bind_values {
        match val {
            BindValue::Id(v) => q = q.bind(*v),
            BindValue::Text(v) => q = q.bind(v.as_str()),
            BindValue::Timestamp(v) => q = q.bind(*v),
        }
    }
    q
}

// ---------------------------------------------------------------------------
// Keyset paging helpers (shared with the comment/attachment repos)
// ---------------------------------------------------------------------------

/// Split an optional page token into bindable cursor parts.
pub(crate) fn split_token(token: &Option<PageToken>) -> (Option<Timestamp>, Option<Uuid>) {
    match token {
        Some(t) => (Some(t.created_at), Some(t.id)),
        None => (None, None),
    }
}

/// Turn `limit + 1` fetched rows into a page with an optional resume
/// token pointing at the last returned row.
pub(crate) fn into_page<T>(
    mut rows: Vec<T>,
    limit: i64,
    token_of: impl Fn(&T) -> PageToken,
) -> Page<T> {
    let next = if rows.len() as i64 > limit {
        rows.truncate(limit as usize);
        rows.last().map(&token_of)
    } else {
        None
    };
    Page { items: rows, next }
}
