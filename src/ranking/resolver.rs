//! Choice resolution
//!
//! Folds one user choice into the job it was asked for: the job's window is
//! narrowed to one side of the pivot, and once it collapses the item is
//! spliced into the sorted sequence and the job disappears.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::job::JobSet;
use super::selector::Coordinates;
use super::traits::Rankable;
use crate::error::{RankResult, RankingError};

/// Which side of a comparison the user preferred
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Choice {
    /// The item being inserted ranks above the pivot
    Candidate,
    /// The pivot ranks above the item being inserted
    Pivot,
}

impl From<bool> for Choice {
    /// `true` means the candidate was preferred
    fn from(prefer_candidate: bool) -> Self {
        if prefer_candidate {
            Self::Candidate
        } else {
            Self::Pivot
        }
    }
}

/// What a resolved choice did to the working set
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The job's window shrank and the job stays pending
    Narrowed {
        /// Job that was narrowed
        job_index: usize,
        /// New inclusive lower bound
        low: usize,
        /// New exclusive upper bound
        high: usize,
    },
    /// The job collapsed; its item now sits at `index`
    Inserted {
        /// Index in the sorted sequence
        index: usize,
    },
}

/// Check that `shown` names a pending job and a pivot inside its window
pub fn check_coordinates<T: Rankable>(
    sorted: &[T],
    jobs: &JobSet<T>,
    shown: Coordinates,
) -> RankResult<()> {
    let job = jobs
        .get(shown.job_index)
        .ok_or(RankingError::NoPendingComparison)?;
    let pivot = shown.pivot_index;
    if pivot < job.low || pivot >= job.high || pivot >= sorted.len() {
        return Err(RankingError::NoPendingComparison);
    }
    Ok(())
}

/// Apply `choice` to the comparison at `shown`
///
/// On success the job has been narrowed or its item spliced in and every
/// other job re-indexed around the splice point. On error nothing is changed.
pub fn resolve<T: Rankable>(
    sorted: &mut Vec<T>,
    jobs: &mut JobSet<T>,
    shown: Coordinates,
    choice: Choice,
) -> RankResult<Resolution> {
    check_coordinates(sorted, jobs, shown)?;
    let Coordinates {
        job_index,
        pivot_index,
    } = shown;

    let job = jobs
        .get_mut(job_index)
        .ok_or(RankingError::NoPendingComparison)?;
    job.tried.insert(pivot_index);

    let (low, high) = match choice {
        Choice::Candidate => (job.low, pivot_index),
        Choice::Pivot => (pivot_index + 1, job.high),
    };

    if low < high {
        job.low = low;
        job.high = high;
        debug!(item = job.item.label(), low, high, "narrowed window");
        return Ok(Resolution::Narrowed {
            job_index,
            low,
            high,
        });
    }

    let Some(finished) = jobs.remove(job_index) else {
        return Err(RankingError::NoPendingComparison);
    };
    debug!(item = finished.item.label(), index = low, "inserted item");
    sorted.insert(low, finished.item);
    jobs.reindex_after_insert(low);
    Ok(Resolution::Inserted { index: low })
}
