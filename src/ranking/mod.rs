//! Pairwise-insertion ranking
//!
//! This module builds a total order over a set of items from nothing but
//! "which of these two do you prefer?" answers.
//!
//! # Overview
//!
//! Each unplaced item runs its own binary search over the sorted sequence.
//! The engine interleaves those searches, asks one question at a time, and
//! keeps a full snapshot before every answer so the last answer can always be
//! taken back.
//!
//! # Example
//!
//! ```rust,ignore
//! use parkrank::ranking::prelude::*;
//!
//! let mut engine = RankingEngine::builder()
//!     .pivot_policy(PivotPolicy::Random)
//!     .build()?;
//! engine.initialize(selected_parks, &mut rng)?;
//!
//! loop {
//!     match engine.step() {
//!         StepResult::NeedsComparison(request) => {
//!             let prefer_candidate = ask_user(&request.candidate, &request.pivot);
//!             engine.apply_choice(prefer_candidate, &mut rng)?;
//!         }
//!         StepResult::Complete(result) => break,
//!         StepResult::Stuck { .. } | StepResult::NotStarted => unreachable!(),
//!     }
//! }
//! ```

pub mod config;
pub mod engine;
pub mod history;
pub mod job;
pub mod observer;
pub mod resolver;
pub mod selector;
pub mod shuffle;
pub mod traits;

/// Prelude for convenient imports
pub mod prelude {
    pub use super::config::{JobOrder, PivotPolicy, RankingConfig};
    pub use super::engine::{
        Comparison, ComparisonRequest, EngineState, RankingEngine, RankingEngineBuilder,
        RankingResult, RankingStats, StepResult,
    };
    pub use super::history::{History, HistoryStep};
    pub use super::job::{InsertionJob, JobSet};
    pub use super::observer::{NoopObserver, RankingEvent, RankingObserver, RecordingObserver};
    pub use super::resolver::{Choice, Resolution};
    pub use super::selector::{ComparisonSelector, Coordinates, SelectOutcome};
    pub use super::traits::Rankable;
}
