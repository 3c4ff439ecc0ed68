//! Ranking engine
//!
//! This module provides the `RankingEngine`, which builds a total order over a
//! set of items from pairwise choices. It uses the same step-based pattern as
//! other human-in-the-loop algorithms: the caller asks for the current step,
//! shows the comparison to a user, and feeds the answer back.
//!
//! # Algorithm
//!
//! 1. The selected items are shuffled; the first becomes the sorted sequence.
//! 2. Every other item gets an insertion job searching the whole sequence.
//! 3. Each comparison pits a job's item against a pivot inside the job's
//!    window. The answer halves the window to one side of the pivot.
//! 4. A collapsed window means the insertion point is known: the item is
//!    spliced in and the remaining jobs are re-indexed around it.
//! 5. When no jobs remain the sorted sequence is the final ranking.
//!
//! Before every choice a full copy of the working state is pushed onto the
//! undo history, so `undo()` restores the exact previous question.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

use super::config::{JobOrder, PivotPolicy, RankingConfig};
use super::history::{History, HistoryStep};
use super::job::JobSet;
use super::resolver::{check_coordinates, resolve, Choice, Resolution};
use super::selector::{ComparisonSelector, Coordinates, SelectOutcome};
use super::shuffle::shuffled;
use super::traits::Rankable;
use crate::error::{RankResult, RankingError};

/// Lifecycle of an engine instance
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    /// No items have been loaded yet
    Initializing,
    /// A comparison is on screen, waiting for a choice
    AwaitingComparison,
    /// The ranking is final
    Complete,
    /// Jobs remain but the selector could not produce a comparison
    Stuck {
        /// Draws spent before giving up
        attempts: usize,
    },
}

/// Borrowed view of the comparison currently on screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Comparison<'a, T> {
    /// Position of the comparison in the working set
    pub coordinates: Coordinates,
    /// Item being inserted
    pub candidate: &'a T,
    /// Already-placed item it is compared against
    pub pivot: &'a T,
    /// Monotonic id of the question, changes every time a question is shown
    pub comparison_id: usize,
}

/// Owned comparison handed out by [`RankingEngine::step`]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonRequest<T> {
    /// Monotonic id of the question
    pub comparison_id: usize,
    /// Item being inserted ("first" choice)
    pub candidate: T,
    /// Already-placed item ("second" choice)
    pub pivot: T,
    /// Position of the comparison in the working set
    pub coordinates: Coordinates,
}

/// Final output of a ranking run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingResult<T> {
    /// Items best first
    pub ranking: Vec<T>,
    /// Number of ranked items
    pub item_count: usize,
    /// Choices it took to build the ranking (undone choices excluded)
    pub comparisons: usize,
}

impl<T: Serialize> RankingResult<T> {
    /// Serialize the result to JSON for hand-off to collaborators
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of calling `step()` on the engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult<T> {
    /// Engine has not been initialized
    NotStarted,
    /// A choice is needed
    NeedsComparison(ComparisonRequest<T>),
    /// Ranking finished
    Complete(RankingResult<T>),
    /// Ranking cannot proceed
    Stuck {
        /// Draws spent before giving up
        attempts: usize,
        /// Jobs left pending
        pending: usize,
    },
}

/// Counters over the lifetime of one ranking run
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingStats {
    /// Freshly drawn comparisons shown
    pub comparisons_shown: usize,
    /// Choices applied, including ones later undone
    pub choices_applied: usize,
    /// Undo operations applied
    pub undos: usize,
    /// Fresh comparisons of a pair that had already been shown
    pub duplicate_comparisons: usize,
}

/// Incremental pairwise-insertion ranking engine
///
/// # Example
///
/// ```rust
/// use parkrank::ranking::prelude::*;
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let mut engine = RankingEngine::new(RankingConfig::default()).unwrap();
/// engine
///     .initialize(vec!["c".to_string(), "a".to_string(), "b".to_string()], &mut rng)
///     .unwrap();
///
/// // Answer with alphabetical preference
/// while let Some(cmp) = engine.next_comparison() {
///     let prefer_candidate = cmp.candidate < cmp.pivot;
///     engine.apply_choice(prefer_candidate, &mut rng).unwrap();
/// }
///
/// assert_eq!(engine.result().unwrap(), vec!["a", "b", "c"]);
/// ```
#[derive(Clone, Debug)]
pub struct RankingEngine<T: Rankable> {
    config: RankingConfig,
    selector: ComparisonSelector,
    state: EngineState,
    sorted: Vec<T>,
    jobs: JobSet<T>,
    history: History<T>,
    /// Comparison currently on screen
    shown: Option<Coordinates>,
    comparison_id: usize,
    stats: RankingStats,
    /// Unordered id pairs shown so far
    seen_pairs: HashSet<(String, String)>,
}

impl<T: Rankable> RankingEngine<T> {
    /// Create a new engine with a validated configuration
    pub fn new(config: RankingConfig) -> RankResult<Self> {
        config.validate()?;
        Ok(Self {
            selector: ComparisonSelector::from_config(&config),
            history: History::with_limit(config.history_limit),
            config,
            state: EngineState::Initializing,
            sorted: Vec::new(),
            jobs: JobSet::new(),
            shown: None,
            comparison_id: 0,
            stats: RankingStats::default(),
            seen_pairs: HashSet::new(),
        })
    }

    /// Start building an engine
    pub fn builder() -> RankingEngineBuilder<T> {
        RankingEngineBuilder::new()
    }

    /// Get the configuration
    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Get the lifecycle state
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Sorted sequence built so far, best first
    pub fn sorted(&self) -> &[T] {
        &self.sorted
    }

    /// Pending insertion jobs
    pub fn jobs(&self) -> &JobSet<T> {
        &self.jobs
    }

    /// Run counters
    pub fn stats(&self) -> &RankingStats {
        &self.stats
    }

    /// Number of undo steps available
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Reset the engine with a new selection
    ///
    /// The items are shuffled before seeding. Any previous ranking, including
    /// its undo history, is discarded.
    pub fn initialize<R: Rng + ?Sized>(&mut self, items: Vec<T>, rng: &mut R) -> RankResult<()> {
        let order = shuffled(&items, rng);
        self.initialize_in_order(order, rng)
    }

    /// Reset the engine with items already in processing order
    ///
    /// The first item seeds the sorted sequence; the rest become insertion
    /// jobs in the given order.
    pub fn initialize_in_order<R: Rng + ?Sized>(
        &mut self,
        items: Vec<T>,
        rng: &mut R,
    ) -> RankResult<()> {
        check_unique(&items)?;

        self.reset();
        let total = items.len();
        let mut rest = items.into_iter();
        self.sorted = rest.next().into_iter().collect();
        self.jobs = JobSet::seeded(rest, self.sorted.len());

        info!(items = total, jobs = self.jobs.len(), "seeded ranking");

        self.advance(rng);
        Ok(())
    }

    /// Drop any ranking in progress and go back to `Initializing`
    ///
    /// The undo history and run counters go with it.
    pub fn reset(&mut self) {
        self.state = EngineState::Initializing;
        self.sorted.clear();
        self.jobs = JobSet::new();
        self.history.clear();
        self.shown = None;
        self.comparison_id = 0;
        self.stats = RankingStats::default();
        self.seen_pairs.clear();
    }

    /// The comparison currently on screen, if any
    pub fn next_comparison(&self) -> Option<Comparison<'_, T>> {
        let coordinates = self.shown?;
        let job = self.jobs.get(coordinates.job_index)?;
        let pivot = self.sorted.get(coordinates.pivot_index)?;
        Some(Comparison {
            coordinates,
            candidate: &job.item,
            pivot,
            comparison_id: self.comparison_id,
        })
    }

    /// The comparison on screen, or the reason there is none
    pub fn require_comparison(&self) -> RankResult<Comparison<'_, T>> {
        match self.state {
            EngineState::Complete => Err(RankingError::AlreadyComplete),
            EngineState::Stuck { attempts } => Err(RankingError::Stuck {
                attempts,
                pending: self.jobs.len(),
            }),
            EngineState::Initializing | EngineState::AwaitingComparison => self
                .next_comparison()
                .ok_or(RankingError::NoPendingComparison),
        }
    }

    /// Report the current step
    pub fn step(&self) -> StepResult<T> {
        match self.state {
            EngineState::Initializing => StepResult::NotStarted,
            EngineState::Complete => StepResult::Complete(self.ranking_result()),
            EngineState::Stuck { attempts } => StepResult::Stuck {
                attempts,
                pending: self.jobs.len(),
            },
            EngineState::AwaitingComparison => match self.next_comparison() {
                Some(cmp) => StepResult::NeedsComparison(ComparisonRequest {
                    comparison_id: cmp.comparison_id,
                    candidate: cmp.candidate.clone(),
                    pivot: cmp.pivot.clone(),
                    coordinates: cmp.coordinates,
                }),
                None => StepResult::NotStarted,
            },
        }
    }

    /// Apply the user's answer to the comparison on screen
    ///
    /// `true` (or [`Choice::Candidate`]) means the item being inserted was
    /// preferred over the pivot. The shown coordinates are checked first; only
    /// then is the previous state pushed onto the undo history, so a rejected
    /// choice leaves the history untouched.
    pub fn apply_choice<C, R>(&mut self, choice: C, rng: &mut R) -> RankResult<Resolution>
    where
        C: Into<Choice>,
        R: Rng + ?Sized,
    {
        let choice = choice.into();
        let shown = self.require_comparison()?.coordinates;
        check_coordinates(&self.sorted, &self.jobs, shown)?;

        self.history.push(HistoryStep {
            sorted: self.sorted.clone(),
            jobs: self.jobs.clone(),
            shown,
        });

        let resolution = match resolve(&mut self.sorted, &mut self.jobs, shown, choice) {
            Ok(resolution) => resolution,
            Err(e) => {
                self.history.pop();
                return Err(e);
            }
        };

        debug!(
            job = shown.job_index,
            pivot = shown.pivot_index,
            ?choice,
            ?resolution,
            "applied choice"
        );
        self.stats.choices_applied += 1;
        self.advance(rng);
        Ok(resolution)
    }

    /// Restore the state from before the last choice
    ///
    /// Returns `false` if there is nothing to undo or the ranking is already
    /// complete. The restored comparison is exactly the one that was answered.
    pub fn undo(&mut self) -> bool {
        if self.state == EngineState::Complete {
            return false;
        }
        let Some(step) = self.history.pop() else {
            return false;
        };

        if let Some(pair) = self.shown_pair() {
            self.seen_pairs.remove(&pair);
        }

        self.sorted = step.sorted;
        self.jobs = step.jobs;
        self.shown = Some(step.shown);
        self.state = EngineState::AwaitingComparison;
        self.comparison_id += 1;
        self.stats.undos += 1;

        debug!(
            job = step.shown.job_index,
            pivot = step.shown.pivot_index,
            remaining = self.history.len(),
            "undid choice"
        );
        true
    }

    /// Check if an undo is possible
    pub fn can_undo(&self) -> bool {
        self.state != EngineState::Complete && !self.history.is_empty()
    }

    /// Check if the ranking is final
    pub fn is_complete(&self) -> bool {
        self.state == EngineState::Complete
    }

    /// Final ranking, available once complete
    pub fn result(&self) -> Option<Vec<T>> {
        self.is_complete().then(|| self.sorted.clone())
    }

    /// Final ranking with run metadata, available once complete
    pub fn outcome(&self) -> Option<RankingResult<T>> {
        self.is_complete().then(|| self.ranking_result())
    }

    /// Share of items already placed, in percent
    pub fn progress(&self) -> f64 {
        let total = self.sorted.len() + self.jobs.len();
        if total == 0 {
            return 0.0;
        }
        self.sorted.len() as f64 / total as f64 * 100.0
    }

    fn ranking_result(&self) -> RankingResult<T> {
        RankingResult {
            ranking: self.sorted.clone(),
            item_count: self.sorted.len(),
            comparisons: self.stats.choices_applied.saturating_sub(self.stats.undos),
        }
    }

    /// Draw the next comparison or finish
    fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.shown = None;

        if self.jobs.is_empty() {
            self.state = EngineState::Complete;
            info!(items = self.sorted.len(), "ranking complete");
            return;
        }

        match self.selector.select(&self.jobs, self.sorted.len(), rng) {
            SelectOutcome::Found(coordinates) => {
                self.shown = Some(coordinates);
                self.state = EngineState::AwaitingComparison;
                self.comparison_id += 1;
                self.stats.comparisons_shown += 1;
                self.track_pair();
            }
            SelectOutcome::NoOpenJobs => {
                warn!(pending = self.jobs.len(), "no open windows left");
                self.state = EngineState::Stuck { attempts: 0 };
            }
            SelectOutcome::Exhausted { attempts } => {
                warn!(
                    attempts,
                    pending = self.jobs.len(),
                    "no presentable comparison; ranking is stuck"
                );
                self.state = EngineState::Stuck { attempts };
            }
        }
    }

    fn shown_pair(&self) -> Option<(String, String)> {
        let cmp = self.next_comparison()?;
        Some(pair_key(cmp.candidate.id(), cmp.pivot.id()))
    }

    fn track_pair(&mut self) {
        let Some(pair) = self.shown_pair() else {
            return;
        };
        if !self.seen_pairs.insert(pair.clone()) {
            self.stats.duplicate_comparisons += 1;
            warn!(a = %pair.0, b = %pair.1, "duplicate comparison");
        }
    }
}

fn pair_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn check_unique<T: Rankable>(items: &[T]) -> RankResult<()> {
    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id()) {
            return Err(RankingError::DuplicateItem(item.id().to_string()));
        }
    }
    Ok(())
}

/// Builder for [`RankingEngine`]
#[derive(Clone, Debug)]
pub struct RankingEngineBuilder<T> {
    config: RankingConfig,
    _phantom: PhantomData<T>,
}

impl<T: Rankable> Default for RankingEngineBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Rankable> RankingEngineBuilder<T> {
    /// Create a builder with default configuration
    pub fn new() -> Self {
        Self {
            config: RankingConfig::default(),
            _phantom: PhantomData,
        }
    }

    /// Start from an existing configuration
    pub fn config(mut self, config: RankingConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the selector retry factor
    pub fn retry_factor(mut self, factor: usize) -> Self {
        self.config.retry_factor = factor;
        self
    }

    /// Set the job scheduling order
    pub fn job_order(mut self, order: JobOrder) -> Self {
        self.config.job_order = order;
        self
    }

    /// Set the pivot policy
    pub fn pivot_policy(mut self, policy: PivotPolicy) -> Self {
        self.config.pivot_policy = policy;
        self
    }

    /// Limit the number of undo steps kept
    pub fn history_limit(mut self, limit: usize) -> Self {
        self.config.history_limit = Some(limit);
        self
    }

    /// Build the engine
    pub fn build(self) -> RankResult<RankingEngine<T>> {
        RankingEngine::new(self.config)
    }
}
