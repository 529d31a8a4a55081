use std::collections::HashSet;

use super::domain::{CandidateId, SortMode};

/// In-session set of candidates marked for deliberation. Membership only;
/// no ordering and no persistence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    chosen: HashSet<CandidateId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `id` if absent, remove it if present. Returns whether the id is
    /// selected afterwards.
    pub fn toggle(&mut self, id: CandidateId) -> bool {
        if self.chosen.remove(&id) {
            false
        } else {
            self.chosen.insert(id);
            true
        }
    }

    pub fn clear(&mut self) {
        self.chosen.clear();
    }

    pub fn contains(&self, id: &CandidateId) -> bool {
        self.chosen.contains(id)
    }

    pub fn len(&self) -> usize {
        self.chosen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chosen.is_empty()
    }

    /// The selected ids, sorted so submission order is deterministic.
    pub fn snapshot(&self) -> Vec<CandidateId> {
        let mut ids: Vec<_> = self.chosen.iter().cloned().collect();
        ids.sort();
        ids
    }
}

impl FromIterator<CandidateId> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = CandidateId>>(iter: T) -> Self {
        Self {
            chosen: iter.into_iter().collect(),
        }
    }
}

/// Mutable state scoped to one reviewer's session: the working selection,
/// the active sort mode, and the roster search query. Passed into
/// operations explicitly so the components stay independently testable.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    pub selection: SelectionSet,
    pub sort: SortMode,
    pub query: String,
}

impl ReviewSession {
    pub fn new() -> Self {
        Self::default()
    }
}
