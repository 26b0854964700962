//! Mastery tracker: the set of concepts a learner has marked
//! complete, persisted per course so progress survives sessions.
//!
//! Persistence is best-effort. A store failure is logged and
//! swallowed and the tracker keeps working session-only; losing
//! saved progress must never break the surrounding flow.

use std::collections::HashSet;

use tracing::warn;

use crate::store::KeyValueStore;
use crate::types::ConceptKey;

/// Storage scope for one course. Two courses sharing a title share
/// progress; see DESIGN.md for why title-keying is kept.
fn scope_key(course_title: &str) -> String {
    let title = if course_title.is_empty() {
        "course"
    } else {
        course_title
    };
    format!("progress:{title}")
}

pub struct MasteryTracker<S> {
    store: S,
    scope: String,
    completed: HashSet<ConceptKey>,
}

impl<S: KeyValueStore> MasteryTracker<S> {
    /// Load persisted completion state for a course. Any read or
    /// parse failure falls back to an empty set.
    pub fn load(store: S, course_title: &str) -> Self {
        let scope = scope_key(course_title);
        let completed = match store.get(&scope) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<ConceptKey>>(&raw) {
                Ok(keys) => keys.into_iter().collect(),
                Err(e) => {
                    warn!(scope = %scope, error = %e, "discarding corrupt progress payload");
                    HashSet::new()
                }
            },
            Ok(None) => HashSet::new(),
            Err(e) => {
                warn!(scope = %scope, error = %e, "progress unavailable, starting empty");
                HashSet::new()
            }
        };
        Self {
            store,
            scope,
            completed,
        }
    }

    pub fn is_complete(&self, key: ConceptKey) -> bool {
        self.completed.contains(&key)
    }

    pub fn completed(&self) -> &HashSet<ConceptKey> {
        &self.completed
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Mark a concept complete and persist the updated set.
    /// Idempotent: re-marking a complete concept changes nothing and
    /// writes nothing.
    pub fn mark_complete(&mut self, key: ConceptKey) {
        if !self.completed.insert(key) {
            return;
        }
        self.persist();
    }

    /// Clear all completion state for this course scope only.
    pub fn reset(&mut self) {
        self.completed.clear();
        if let Err(e) = self.store.remove(&self.scope) {
            warn!(scope = %self.scope, error = %e, "could not clear saved progress");
        }
    }

    fn persist(&self) {
        let mut keys: Vec<ConceptKey> = self.completed.iter().copied().collect();
        keys.sort();
        let raw = match serde_json::to_string(&keys) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(scope = %self.scope, error = %e, "could not encode progress");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.scope, &raw) {
            warn!(scope = %self.scope, error = %e, "could not save progress, continuing session-only");
        }
    }
}

/// Completed concepts as a percentage of the course total. Zero when
/// the course has no concepts.
pub fn progress(total_concepts: usize, completed: usize) -> f64 {
    if total_concepts == 0 {
        return 0.0;
    }
    completed as f64 / total_concepts as f64 * 100.0
}

/// Concepts due for review: every incomplete concept counts. A plain
/// complement, not a spaced-repetition schedule.
pub fn due_for_review(total_concepts: usize, completed: usize) -> usize {
    total_concepts.saturating_sub(completed)
}
