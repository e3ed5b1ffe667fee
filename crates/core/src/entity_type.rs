//! Entity type registry.
//!
//! The set of entity kinds that comments and attachments may target is
//! closed: it is fixed at compile time, exposed through a process-wide
//! registry, and never mutated after startup. Resolving a name that is
//! not registered fails deterministically with
//! [`CoreError::UnknownEntityType`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// A registered business entity kind.
///
/// The token form (`as_str`) is the stable lowercase name stored in the
/// `entity_type` columns and accepted by [`EntityTypeRegistry::resolve`].
/// Tokens are never reused for a different kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityType {
    Account,
    Contact,
    Lead,
    Opportunity,
    Case,
    Task,
    Invoice,
    Event,
}

impl EntityType {
    /// The stable lowercase token for this kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            EntityType::Account => "account",
            EntityType::Contact => "contact",
            EntityType::Lead => "lead",
            EntityType::Opportunity => "opportunity",
            EntityType::Case => "case",
            EntityType::Task => "task",
            EntityType::Invoice => "invoice",
            EntityType::Event => "event",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// Every kind that may be the target of a generic reference.
///
/// Note: `team` is deliberately absent. Activity records may still carry
/// it (their `entity_type` field is free-form), but comments and
/// attachments cannot target it.
const REGISTERED_KINDS: &[EntityType] = &[
    EntityType::Account,
    EntityType::Contact,
    EntityType::Lead,
    EntityType::Opportunity,
    EntityType::Case,
    EntityType::Task,
    EntityType::Invoice,
    EntityType::Event,
];

/// Process-wide, read-only registry of attachable entity kinds.
///
/// Populated once from [`REGISTERED_KINDS`] and immutable thereafter, so
/// no locking is required for concurrent resolution.
#[derive(Debug)]
pub struct EntityTypeRegistry {
    kinds: &'static [EntityType],
}

static REGISTRY: EntityTypeRegistry = EntityTypeRegistry {
    kinds: REGISTERED_KINDS,
};

/// The process-wide registry instance.
pub fn registry() -> &'static EntityTypeRegistry {
    &REGISTRY
}

impl EntityTypeRegistry {
    /// Resolve a type name to its registered kind.
    ///
    /// Input is trimmed and matched case-insensitively. Fails with
    /// [`CoreError::UnknownEntityType`] when no registered kind carries
    /// the token.
    pub fn resolve(&self, name: &str) -> Result<EntityType, CoreError> {
        let token = name.trim().to_ascii_lowercase();
        self.kinds
            .iter()
            .copied()
            .find(|kind| kind.as_str() == token)
            .ok_or(CoreError::UnknownEntityType { token })
    }

    /// Whether a name resolves to a registered kind.
    pub fn is_registered(&self, name: &str) -> bool {
        self.resolve(name).is_ok()
    }

    /// All registered kinds, in registration order.
    pub fn kinds(&self) -> &'static [EntityType] {
        self.kinds
    }
}
