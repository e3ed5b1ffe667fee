//! Activity action vocabulary.
//!
//! Audit trail actions form a closed set. The token form (`as_str`) is
//! what the `activities.action` column stores; `label` is the
//! human-readable form surfaced by the presentation layer.
//!
//! Unlike comment/attachment targets, an activity's `entity_type` field
//! is free-form text and is *not* resolved through the entity type
//! registry; activity rows may reference kinds outside it (e.g. `team`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityAction {
    Create,
    Update,
    Delete,
    View,
    Comment,
    Assign,
}

/// All recordable actions.
pub const ALL_ACTIONS: &[ActivityAction] = &[
    ActivityAction::Create,
    ActivityAction::Update,
    ActivityAction::Delete,
    ActivityAction::View,
    ActivityAction::Comment,
    ActivityAction::Assign,
];

impl ActivityAction {
    /// The stable lowercase token stored in the database.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ActivityAction::Create => "create",
            ActivityAction::Update => "update",
            ActivityAction::Delete => "delete",
            ActivityAction::View => "view",
            ActivityAction::Comment => "comment",
            ActivityAction::Assign => "assign",
        }
    }

    /// Human-readable display label.
    pub const fn label(&self) -> &'static str {
        match self {
            ActivityAction::Create => "Created",
            ActivityAction::Update => "Updated",
            ActivityAction::Delete => "Deleted",
            ActivityAction::View => "Viewed",
            ActivityAction::Comment => "Commented",
            ActivityAction::Assign => "Assigned",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActivityAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        ALL_ACTIONS
            .iter()
            .copied()
            .find(|action| action.as_str() == token)
            .ok_or_else(|| CoreError::Validation(format!("Unknown activity action: {s:?}")))
    }
}
