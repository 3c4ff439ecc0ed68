//! Collaborator hooks
//!
//! The engine reports "comparison ready" and "ranking complete" events to an
//! observer, typically an analytics or navigation layer. Observers are called
//! synchronously from the engine's step and must return promptly; any real
//! I/O belongs on the observer's side.

use super::traits::Rankable;

/// Receives engine events
///
/// All methods default to no-ops so implementors override only what they
/// need.
pub trait RankingObserver<T: Rankable> {
    /// A comparison is ready to be shown
    fn on_comparison(&mut self, _comparison_id: usize, _candidate: &T, _pivot: &T) {}

    /// The previous choice was undone
    fn on_undo(&mut self) {}

    /// The final ranking is available, best first
    fn on_complete(&mut self, _ranking: &[T]) {}
}

/// Observer that ignores every event
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl<T: Rankable> RankingObserver<T> for NoopObserver {}

/// Event captured by [`RecordingObserver`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RankingEvent {
    /// Comparison shown, as item ids
    Comparison {
        comparison_id: usize,
        candidate: String,
        pivot: String,
    },
    /// Undo applied
    Undo,
    /// Ranking finished, as item ids in order
    Complete(Vec<String>),
}

/// Observer that records every event in order
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    /// Recorded events
    pub events: Vec<RankingEvent>,
}

impl RecordingObserver {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of comparisons observed
    pub fn comparison_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RankingEvent::Comparison { .. }))
            .count()
    }

    /// Rankings reported as complete
    pub fn completions(&self) -> Vec<&[String]> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RankingEvent::Complete(ids) => Some(ids.as_slice()),
                _ => None,
            })
            .collect()
    }
}

impl<T: Rankable> RankingObserver<T> for RecordingObserver {
    fn on_comparison(&mut self, comparison_id: usize, candidate: &T, pivot: &T) {
        self.events.push(RankingEvent::Comparison {
            comparison_id,
            candidate: candidate.id().to_string(),
            pivot: pivot.id().to_string(),
        });
    }

    fn on_undo(&mut self) {
        self.events.push(RankingEvent::Undo);
    }

    fn on_complete(&mut self, ranking: &[T]) {
        self.events.push(RankingEvent::Complete(
            ranking.iter().map(|i| i.id().to_string()).collect(),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_observer() {
        let mut observer = RecordingObserver::new();
        let a = "a".to_string();
        let b = "b".to_string();
        RankingObserver::<String>::on_comparison(&mut observer, 1, &a, &b);
        RankingObserver::<String>::on_undo(&mut observer);
        RankingObserver::<String>::on_complete(&mut observer, &[b.clone(), a.clone()]);

        assert_eq!(observer.comparison_count(), 1);
        assert_eq!(observer.events[1], RankingEvent::Undo);
        let expected = vec!["b".to_string(), "a".to_string()];
        assert_eq!(observer.completions(), vec![expected.as_slice()]);
    }
}
