//! # parkrank
//!
//! Rank a personal selection of items (national parks, by default) using
//! nothing but pairwise "which do you prefer?" choices.
//!
//! The crate is built around an incremental pairwise-insertion engine: every
//! unplaced item runs its own binary search over the ranking built so far,
//! the engine asks one question at a time, and every answer can be undone
//! exactly.
//!
//! ## Core Concepts
//!
//! - **Sorted sequence**: the total order established so far, always
//!   consistent with every answer given
//! - **Insertion jobs**: one pending binary search per unplaced item
//! - **Exact undo**: a full snapshot before each answer, including the
//!   question that was on screen
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use parkrank::prelude::*;
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let catalog = Catalog::national_parks();
//!
//! let mut flow = RankingFlow::new(RankingConfig::default())?;
//! for id in ["yose", "zion", "glac", "acad"] {
//!     flow.select(catalog.require(id)?.clone())?;
//! }
//! flow.start_ranking(&mut rng)?;
//!
//! while flow.step() == Step::Ranking {
//!     let prefer_first = ask_user(flow.engine().next_comparison().unwrap());
//!     flow.choose(prefer_first, &mut rng)?;
//! }
//! println!("{:?}", flow.results());
//! ```

pub mod catalog;
pub mod error;
pub mod flow;
pub mod ranking;
pub mod selection;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::catalog::{national_parks, Catalog, Park};
    pub use crate::error::*;
    pub use crate::flow::{RankingFlow, Step};
    pub use crate::ranking::prelude::*;
    pub use crate::selection::{Selection, MIN_RANKABLE};
}
