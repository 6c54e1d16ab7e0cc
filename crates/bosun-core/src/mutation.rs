use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::DbProof;

/// How a WRITE action is expected to change its target table. Keyed by the
/// action name through [`MutationMap`], which is the single source of truth
/// for the action -> table -> strategy mapping.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MutationKind {
    Insert,
    Update,
}

impl MutationKind {
    /// Evaluate the state proof for this strategy.
    ///
    /// Insert: the row count must have grown.
    /// Update: the row must still be present afterward. This is a weak
    /// proof (it does not compare any changed field) and is kept as-is.
    pub fn verified(&self, proof: &DbProof) -> bool {
        match self {
            MutationKind::Insert => proof.after_count > proof.before_count,
            MutationKind::Update => proof.after_count > 0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MutationTarget {
    pub table: String,
    pub kind: MutationKind,
}

/// Action name -> expected mutation. Actions without an entry have no
/// state-proof obligation (and negative controls against them cannot be
/// checked for an unchanged row count).
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct MutationMap {
    entries: HashMap<String, MutationTarget>,
}

impl MutationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, action: impl Into<String>, table: impl Into<String>, kind: MutationKind) -> Self {
        self.entries.insert(
            action.into(),
            MutationTarget { table: table.into(), kind },
        );
        self
    }

    pub fn target(&self, action: &str) -> Option<&MutationTarget> {
        self.entries.get(action)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Negative-control check: rejection must leave the table untouched.
pub fn counts_unchanged(proof: &DbProof) -> bool {
    proof.before_count == proof.after_count
}
