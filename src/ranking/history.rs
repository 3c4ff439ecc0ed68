//! Undo history
//!
//! A [`HistoryStep`] is a full value copy of the engine's working state taken
//! immediately before a choice is applied, together with the coordinates of
//! the comparison that was on screen. Replaying a step restores the state
//! exactly, including the question that was being asked.

use serde::{Deserialize, Serialize};

use super::job::JobSet;
use super::selector::Coordinates;

/// Snapshot of the engine taken before one choice
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: for<'a> Deserialize<'a>"
))]
pub struct HistoryStep<T> {
    /// Sorted sequence before the choice
    pub sorted: Vec<T>,
    /// Job set before the choice
    pub jobs: JobSet<T>,
    /// Comparison that was shown when the choice was made
    pub shown: Coordinates,
}

/// Bounded stack of history steps
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: for<'a> Deserialize<'a>"
))]
pub struct History<T> {
    steps: Vec<HistoryStep<T>>,
    limit: Option<usize>,
}

impl<T> Default for History<T> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            limit: None,
        }
    }
}

impl<T> History<T> {
    /// Create an unbounded history
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history that keeps at most `limit` steps
    pub fn with_limit(limit: Option<usize>) -> Self {
        Self {
            steps: Vec::new(),
            limit,
        }
    }

    /// Push a step, dropping the oldest one if the limit is exceeded
    pub fn push(&mut self, step: HistoryStep<T>) {
        self.steps.push(step);
        if let Some(limit) = self.limit {
            if self.steps.len() > limit {
                let excess = self.steps.len() - limit;
                self.steps.drain(..excess);
            }
        }
    }

    /// Pop the most recent step
    pub fn pop(&mut self) -> Option<HistoryStep<T>> {
        self.steps.pop()
    }

    /// Most recent step without removing it
    pub fn last(&self) -> Option<&HistoryStep<T>> {
        self.steps.last()
    }

    /// Drop every step
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// Number of stored steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Check if there is nothing to undo
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::job::InsertionJob;

    fn step(tag: &str) -> HistoryStep<String> {
        HistoryStep {
            sorted: vec![tag.to_string()],
            jobs: JobSet::from_jobs(vec![InsertionJob::new("x".to_string(), 0, 1)]),
            shown: Coordinates::new(0, 0),
        }
    }

    #[test]
    fn test_push_pop_is_lifo() {
        let mut history = History::new();
        history.push(step("a"));
        history.push(step("b"));
        assert_eq!(history.len(), 2);
        assert_eq!(history.pop().unwrap().sorted, vec!["b".to_string()]);
        assert_eq!(history.pop().unwrap().sorted, vec!["a".to_string()]);
        assert!(history.pop().is_none());
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(Some(2));
        for tag in ["a", "b", "c"] {
            history.push(step(tag));
        }
        assert_eq!(history.len(), 2);
        assert_eq!(history.last().map(|s| s.sorted[0].as_str()), Some("c"));
        history.pop();
        assert_eq!(history.last().map(|s| s.sorted[0].as_str()), Some("b"));
    }

    #[test]
    fn test_snapshot_is_independent_of_source() {
        let mut jobs = JobSet::from_jobs(vec![InsertionJob::new("x".to_string(), 0, 3)]);
        let mut history = History::new();
        history.push(HistoryStep {
            sorted: vec!["a".to_string()],
            jobs: jobs.clone(),
            shown: Coordinates::new(0, 1),
        });

        if let Some(job) = jobs.get_mut(0) {
            job.tried.insert(1);
            job.high = 1;
        }

        let stored = history.pop().unwrap();
        let job = stored.jobs.get(0).unwrap();
        assert!(job.tried.is_empty());
        assert_eq!(job.high, 3);
    }

    #[test]
    fn test_clear() {
        let mut history = History::new();
        history.push(step("a"));
        history.clear();
        assert!(history.is_empty());
    }
}
