//! Row structs and DTOs for the tenant-scoped record tables.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Query parameter structs where the table supports filtered reads
//!
//! All three tables share the same base columns: UUIDv7 `id`,
//! `org_id`, weak `created_by`/`updated_by` actor references, an
//! `is_active` soft-delete flag, and `created_at`/`updated_at`.

pub mod activity;
pub mod attachment;
pub mod comment;
