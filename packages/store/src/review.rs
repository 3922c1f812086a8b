//! # Applicant review ledger
//!
//! Records which opportunities an organization has already gone through the
//! applicants of. The applicants view shows the reduced "manage" layout until
//! the opportunity is marked as reviewed, then the full applicant cards.
//!
//! The ledger is persisted under the `"visited_applicants"` key as a JSON list
//! of opportunity ids. Older builds stored the literal string `"true"` there
//! for every opportunity at once; that value still reads as "all reviewed".

use std::collections::BTreeSet;

use tracing::warn;

use crate::kv::KeyValueStore;

pub const VISITED_APPLICANTS_KEY: &str = "visited_applicants";

const LEGACY_ALL_VISITED: &str = "true";

/// Per-opportunity review marks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReviewLedger {
    all: bool,
    visited: BTreeSet<i64>,
}

impl ReviewLedger {
    /// Parses the stored value. Unreadable values yield an empty ledger.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == LEGACY_ALL_VISITED {
            return Self {
                all: true,
                visited: BTreeSet::new(),
            };
        }
        match serde_json::from_str::<BTreeSet<i64>>(raw) {
            Ok(visited) => Self {
                all: false,
                visited,
            },
            Err(e) => {
                warn!("Ignoring unreadable {VISITED_APPLICANTS_KEY} entry: {e}");
                Self::default()
            }
        }
    }

    pub fn load(storage: &impl KeyValueStore) -> Self {
        storage
            .get(VISITED_APPLICANTS_KEY)
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    pub fn is_reviewed(&self, opportunity_id: i64) -> bool {
        self.all || self.visited.contains(&opportunity_id)
    }

    /// Marks one opportunity as reviewed. Returns `false` if it already was.
    pub fn mark_reviewed(&mut self, opportunity_id: i64) -> bool {
        !self.all && self.visited.insert(opportunity_id)
    }

    pub fn encode(&self) -> String {
        if self.all {
            return LEGACY_ALL_VISITED.to_string();
        }
        serde_json::to_string(&self.visited).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn save(&self, storage: &impl KeyValueStore) {
        storage.set(VISITED_APPLICANTS_KEY, &self.encode());
    }
}

/// Loads the ledger, marks `opportunity_id` and writes it back.
pub fn mark_reviewed(storage: &impl KeyValueStore, opportunity_id: i64) {
    let mut ledger = ReviewLedger::load(storage);
    if ledger.mark_reviewed(opportunity_id) {
        ledger.save(storage);
    }
}
