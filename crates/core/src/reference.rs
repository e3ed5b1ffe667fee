//! Generic polymorphic references.
//!
//! An [`EntityRef`] names "the record of kind X with id Y" without
//! embedding or caching anything about that record. Building one only
//! consults the type registry; it never confirms the target row exists.
//! A reference whose target has since been removed or deactivated is a
//! tolerated state, handled at read time by omitting denormalized detail.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity_type::{registry, EntityType};
use crate::error::CoreError;

/// A polymorphic `(entity_type, entity_id)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub entity_type: EntityType,
    pub entity_id: Uuid,
}

impl EntityRef {
    /// Build a reference from a raw type name and target id.
    ///
    /// Resolves the name through the process-wide registry; fails with
    /// [`CoreError::UnknownEntityType`] for unregistered names. Target
    /// existence is optimistic by design.
    pub fn build(type_name: &str, entity_id: Uuid) -> Result<Self, CoreError> {
        let entity_type = registry().resolve(type_name)?;
        Ok(EntityRef {
            entity_type,
            entity_id,
        })
    }
}
