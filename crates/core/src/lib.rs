//! Keel domain core: the pieces of the records platform that do no I/O.
//!
//! This crate holds the entity type registry, the generic reference
//! resolver, the tenant scope guard, the activity action vocabulary, and
//! the shared pagination/validation rules. It has no database or network
//! dependencies so it can be used by the repository layer, the service
//! layer, and any future worker or CLI tooling.

pub mod activity;
pub mod content;
pub mod entity_type;
pub mod error;
pub mod pagination;
pub mod reference;
pub mod tenant;
pub mod types;
