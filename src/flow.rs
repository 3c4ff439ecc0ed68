//! Selection → ranking → results flow
//!
//! Ties a [`Selection`], a [`RankingEngine`] and an observer together the way
//! an application drives them: pick items, answer comparisons, read results,
//! go back or start over.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::FlowError;
use crate::ranking::config::RankingConfig;
use crate::ranking::engine::RankingEngine;
use crate::ranking::observer::{NoopObserver, RankingObserver};
use crate::ranking::resolver::{Choice, Resolution};
use crate::ranking::traits::Rankable;
use crate::selection::Selection;

/// Screen the application is on
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Choosing which items to rank
    #[default]
    Selection,
    /// Answering comparisons
    Ranking,
    /// Looking at the final ranking
    Results,
}

impl Step {
    /// Short name for logs and errors
    pub fn name(&self) -> &'static str {
        match self {
            Self::Selection => "selection",
            Self::Ranking => "ranking",
            Self::Results => "results",
        }
    }
}

/// Application-level driver for one user's ranking session
pub struct RankingFlow<T: Rankable, O = NoopObserver> {
    step: Step,
    selection: Selection<T>,
    engine: RankingEngine<T>,
    results: Option<Vec<T>>,
    observer: O,
}

impl<T: Rankable> RankingFlow<T, NoopObserver> {
    /// Create a flow without an observer
    pub fn new(config: RankingConfig) -> Result<Self, FlowError> {
        Self::with_observer(config, NoopObserver)
    }
}

impl<T: Rankable, O: RankingObserver<T>> RankingFlow<T, O> {
    /// Create a flow that reports engine events to `observer`
    pub fn with_observer(config: RankingConfig, observer: O) -> Result<Self, FlowError> {
        Ok(Self {
            step: Step::Selection,
            selection: Selection::new(),
            engine: RankingEngine::new(config)?,
            results: None,
            observer,
        })
    }

    /// Current step
    pub fn step(&self) -> Step {
        self.step
    }

    /// Current selection
    pub fn selection(&self) -> &Selection<T> {
        &self.selection
    }

    /// Underlying engine
    pub fn engine(&self) -> &RankingEngine<T> {
        &self.engine
    }

    /// Final ranking, once the Results step is reached
    pub fn results(&self) -> Option<&[T]> {
        self.results.as_deref()
    }

    /// The observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    fn require_step(&self, expected: Step, operation: &'static str) -> Result<(), FlowError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(FlowError::WrongStep {
                step: self.step.name(),
                operation,
            })
        }
    }

    /// Add an item to the selection
    pub fn select(&mut self, item: T) -> Result<(), FlowError> {
        self.require_step(Step::Selection, "select")?;
        self.selection.select(item)?;
        Ok(())
    }

    /// Remove an item from the selection
    pub fn deselect(&mut self, id: &str) -> Result<T, FlowError> {
        self.require_step(Step::Selection, "deselect")?;
        Ok(self.selection.deselect(id)?)
    }

    /// Toggle an item in the selection
    pub fn toggle(&mut self, item: T) -> Result<bool, FlowError> {
        self.require_step(Step::Selection, "toggle")?;
        Ok(self.selection.toggle(item))
    }

    /// Seed the engine from the selection and move to the Ranking step
    pub fn start_ranking<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), FlowError> {
        self.require_step(Step::Selection, "start_ranking")?;
        self.selection.ensure_rankable()?;

        self.engine.initialize(self.selection.items().to_vec(), rng)?;
        self.results = None;
        self.step = Step::Ranking;
        info!(items = self.selection.len(), "ranking started");
        self.publish();
        Ok(())
    }

    /// Answer the comparison on screen
    pub fn choose<C, R>(&mut self, choice: C, rng: &mut R) -> Result<Resolution, FlowError>
    where
        C: Into<Choice>,
        R: Rng + ?Sized,
    {
        self.require_step(Step::Ranking, "choose")?;
        let resolution = self.engine.apply_choice(choice, rng)?;
        self.publish();
        Ok(resolution)
    }

    /// Take back the last answer
    pub fn undo(&mut self) -> Result<bool, FlowError> {
        self.require_step(Step::Ranking, "undo")?;
        if !self.engine.undo() {
            return Ok(false);
        }
        self.observer.on_undo();
        self.publish();
        Ok(true)
    }

    /// Return to the Selection step, keeping the selection
    ///
    /// The ranking in progress is dropped together with its undo history, so
    /// the engine reports nothing until the next `start_ranking` re-seeds it.
    pub fn back_to_selection(&mut self) {
        self.engine.reset();
        self.step = Step::Selection;
        self.results = None;
    }

    /// Clear everything and return to the Selection step
    pub fn restart(&mut self) {
        self.selection.clear();
        self.back_to_selection();
        info!("flow restarted");
    }

    /// Report the engine's current state to the observer
    fn publish(&mut self) {
        if let Some(ranking) = self.engine.result() {
            self.observer.on_complete(&ranking);
            info!(items = ranking.len(), "moving to results");
            self.results = Some(ranking);
            self.step = Step::Results;
        } else if let Some(cmp) = self.engine.next_comparison() {
            self.observer
                .on_comparison(cmp.comparison_id, cmp.candidate, cmp.pivot);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::{RankingError, SelectionError};
    use crate::ranking::observer::{RankingEvent, RecordingObserver};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn flow_with(ids: &[&str]) -> RankingFlow<crate::catalog::Park, RecordingObserver> {
        let catalog = Catalog::national_parks();
        let config = RankingConfig::default();
        let observer = RecordingObserver::new();
        let mut flow = RankingFlow::with_observer(config, observer).unwrap();
        for id in ids {
            flow.select(catalog.require(id).unwrap().clone()).unwrap();
        }
        flow
    }

    #[test]
    fn test_starts_in_selection() {
        let flow: RankingFlow<String> = RankingFlow::new(RankingConfig::default()).unwrap();
        assert_eq!(flow.step(), Step::Selection);
        assert!(flow.results().is_none());
    }

    #[test]
    fn test_start_requires_two_items() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut flow = flow_with(&["yose"]);
        let err = flow.start_ranking(&mut rng).unwrap_err();
        assert!(matches!(
            err,
            FlowError::Selection(SelectionError::TooFew { actual: 1, .. })
        ));
        assert_eq!(flow.step(), Step::Selection);
    }

    #[test]
    fn test_full_flow_reaches_results() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut flow = flow_with(&["yose", "zion", "acad", "arch"]);
        flow.start_ranking(&mut rng).unwrap();
        assert_eq!(flow.step(), Step::Ranking);

        // Prefer older parks
        while flow.step() == Step::Ranking {
            let cmp = flow.engine().next_comparison().unwrap();
            let prefer = cmp.candidate.established < cmp.pivot.established;
            flow.choose(prefer, &mut rng).unwrap();
        }

        assert_eq!(flow.step(), Step::Results);
        let results = flow.results().unwrap();
        let ids: Vec<_> = results.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["yose", "acad", "zion", "arch"]);

        let observer = flow.observer();
        assert_eq!(observer.completions().len(), 1);
        assert!(observer.comparison_count() >= 3);
    }

    #[test]
    fn test_undo_notifies_and_reshows() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut flow = flow_with(&["yose", "zion", "acad"]);
        assert!(!flow.undo().is_ok_and(|u| u));

        flow.start_ranking(&mut rng).unwrap();
        assert_eq!(flow.undo().unwrap(), false);

        flow.choose(true, &mut rng).unwrap();
        assert!(flow.undo().unwrap());

        let events = &flow.observer().events;
        let n = events.len();
        assert_eq!(events[n - 2], RankingEvent::Undo);
        match (&events[0], &events[n - 1]) {
            (
                RankingEvent::Comparison {
                    candidate: a,
                    pivot: b,
                    ..
                },
                RankingEvent::Comparison {
                    candidate: c,
                    pivot: d,
                    ..
                },
            ) => assert_eq!((a, b), (c, d)),
            other => panic!("unexpected events {:?}", other),
        }
    }

    #[test]
    fn test_wrong_step_operations() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut flow = flow_with(&["yose", "zion"]);
        let err = flow.choose(true, &mut rng).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation not allowed in step selection: choose"
        );

        flow.start_ranking(&mut rng).unwrap();
        let park = Catalog::national_parks().require("glac").unwrap().clone();
        let err = flow.select(park).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation not allowed in step ranking: select"
        );
    }

    #[test]
    fn test_results_then_back_and_restart() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut flow = flow_with(&["yose", "zion"]);
        flow.start_ranking(&mut rng).unwrap();
        flow.choose(false, &mut rng).unwrap();
        assert_eq!(flow.step(), Step::Results);
        let err = flow.choose(true, &mut rng).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Operation not allowed in step results: choose"
        );

        flow.back_to_selection();
        assert_eq!(flow.step(), Step::Selection);
        assert_eq!(flow.selection().len(), 2);
        assert!(flow.results().is_none());

        // Re-ranking starts from scratch with no history to undo
        flow.start_ranking(&mut rng).unwrap();
        assert_eq!(flow.undo().unwrap(), false);
        assert!(!flow.engine().can_undo());

        flow.restart();
        assert!(flow.selection().is_empty());
        assert_eq!(flow.step(), Step::Selection);
    }

    #[test]
    fn test_engine_error_passes_through() {
        let err: FlowError = RankingError::NoPendingComparison.into();
        assert_eq!(err.to_string(), "Ranking error: No comparison is pending");
    }

    #[test]
    fn test_back_to_selection_drops_engine_state() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut flow = flow_with(&["yose", "zion", "acad"]);
        flow.start_ranking(&mut rng).unwrap();
        flow.choose(true, &mut rng).unwrap();
        assert!(flow.engine().can_undo());

        flow.back_to_selection();
        assert_eq!(flow.step(), Step::Selection);
        assert_eq!(flow.selection().len(), 3);
        assert!(flow.engine().next_comparison().is_none());
        assert!(!flow.engine().can_undo());
        assert!(flow.engine().sorted().is_empty());
        assert_eq!(flow.engine().stats().choices_applied, 0);
    }
}
