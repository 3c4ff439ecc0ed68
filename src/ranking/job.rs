//! Insertion jobs
//!
//! Every item that is not yet part of the sorted sequence owns one
//! [`InsertionJob`]: a binary search in progress over the sorted sequence's
//! index space. The [`JobSet`] is the engine's whole working set.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::traits::Rankable;

/// A pending "insert this item into the sorted sequence" task
///
/// `[low, high)` is a half-open range of sorted-sequence indices that is known
/// to contain the item's final index. The job is complete exactly when the
/// range is empty (`low == high`).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertionJob<T> {
    /// The item being inserted
    pub item: T,
    /// Inclusive lower bound
    pub low: usize,
    /// Exclusive upper bound
    pub high: usize,
    /// Pivot indices already compared against for this job
    pub tried: BTreeSet<usize>,
}

impl<T> InsertionJob<T> {
    /// Create a new job with the given bounds and no tried pivots
    pub fn new(item: T, low: usize, high: usize) -> Self {
        debug_assert!(low <= high);
        Self {
            item,
            low,
            high,
            tried: BTreeSet::new(),
        }
    }

    /// Width of the remaining search window
    pub fn width(&self) -> usize {
        self.high - self.low
    }

    /// Check if the insertion point has been found
    pub fn is_resolved(&self) -> bool {
        self.low >= self.high
    }

    /// Pivot indices in the window that have not been compared yet
    pub fn untried_pivots(&self) -> Vec<usize> {
        (self.low..self.high)
            .filter(|i| !self.tried.contains(i))
            .collect()
    }

    /// Check whether `pivot` is a valid, untried pivot for this job
    pub fn can_pivot(&self, pivot: usize) -> bool {
        pivot >= self.low && pivot < self.high && !self.tried.contains(&pivot)
    }

    /// Adjust this job after an unrelated item was spliced in at `at`
    ///
    /// Indices at or after `at` moved one slot down. If the new item landed
    /// inside the window (edges included) its relation to this job's item is
    /// unknown, so the window widens to include it.
    pub fn reindex_after_insert(&mut self, at: usize) {
        if at < self.low {
            self.low += 1;
            self.high += 1;
        } else if at <= self.high {
            self.high += 1;
        }
        self.tried = self
            .tried
            .iter()
            .map(|&i| if i >= at { i + 1 } else { i })
            .collect();
    }
}

/// The collection of pending insertion jobs
///
/// Jobs keep their creation order; the index of a job in the set is the job
/// coordinate recorded in comparisons and history steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: for<'a> Deserialize<'a>"
))]
pub struct JobSet<T> {
    jobs: Vec<InsertionJob<T>>,
}

impl<T> Default for JobSet<T> {
    fn default() -> Self {
        Self { jobs: Vec::new() }
    }
}

impl<T: Rankable> JobSet<T> {
    /// Create an empty job set
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed one job per item, all searching the whole of a sequence of length `sorted_len`
    pub fn seeded(items: impl IntoIterator<Item = T>, sorted_len: usize) -> Self {
        Self {
            jobs: items
                .into_iter()
                .map(|item| InsertionJob::new(item, 0, sorted_len))
                .collect(),
        }
    }

    /// Build a job set from explicit jobs
    pub fn from_jobs(jobs: Vec<InsertionJob<T>>) -> Self {
        Self { jobs }
    }

    /// Number of pending jobs
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// Check if no jobs are pending
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Get a job by index
    pub fn get(&self, index: usize) -> Option<&InsertionJob<T>> {
        self.jobs.get(index)
    }

    /// Get a mutable job by index
    pub fn get_mut(&mut self, index: usize) -> Option<&mut InsertionJob<T>> {
        self.jobs.get_mut(index)
    }

    /// Iterate over pending jobs in creation order
    pub fn iter(&self) -> impl Iterator<Item = &InsertionJob<T>> {
        self.jobs.iter()
    }

    /// Indices of jobs whose window is still open
    pub fn live_indices(&self) -> Vec<usize> {
        self.jobs
            .iter()
            .enumerate()
            .filter(|(_, j)| !j.is_resolved())
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove a job, keeping the relative order of the others
    pub fn remove(&mut self, index: usize) -> Option<InsertionJob<T>> {
        if index < self.jobs.len() {
            Some(self.jobs.remove(index))
        } else {
            None
        }
    }

    /// Re-index every job after an item was spliced in at `at`
    pub fn reindex_after_insert(&mut self, at: usize) {
        for job in &mut self.jobs {
            job.reindex_after_insert(at);
        }
    }

    /// Check the bounds invariant against a sorted sequence of length `sorted_len`
    pub fn bounds_valid(&self, sorted_len: usize) -> bool {
        self.jobs
            .iter()
            .all(|j| j.low <= j.high && j.high <= sorted_len)
    }

    /// Check whether an item with `id` has a pending job
    pub fn contains_id(&self, id: &str) -> bool {
        self.jobs.iter().any(|j| j.item.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(low: usize, high: usize) -> InsertionJob<String> {
        InsertionJob::new("x".to_string(), low, high)
    }

    #[test]
    fn test_new_job_is_open() {
        let j = job(0, 1);
        assert_eq!(j.width(), 1);
        assert!(!j.is_resolved());
        assert_eq!(j.untried_pivots(), vec![0]);
    }

    #[test]
    fn test_untried_pivots_excludes_tried() {
        let mut j = job(2, 6);
        j.tried.insert(3);
        j.tried.insert(9); // outside the window, ignored
        assert_eq!(j.untried_pivots(), vec![2, 4, 5]);
        assert!(j.can_pivot(2));
        assert!(!j.can_pivot(3));
        assert!(!j.can_pivot(6));
    }

    #[test]
    fn test_reindex_insert_before_window_shifts_both_bounds() {
        let mut j = job(2, 4);
        j.tried.insert(1);
        j.tried.insert(3);
        j.reindex_after_insert(1);
        assert_eq!((j.low, j.high), (3, 5));
        assert_eq!(j.tried.iter().copied().collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_reindex_insert_inside_or_on_edge_widens() {
        for at in 2..=4 {
            let mut j = job(2, 4);
            j.reindex_after_insert(at);
            assert_eq!((j.low, j.high), (2, 5), "insert at {}", at);
        }
    }

    #[test]
    fn test_reindex_insert_after_window_is_noop() {
        let mut j = job(0, 2);
        j.tried.insert(1);
        j.reindex_after_insert(3);
        assert_eq!((j.low, j.high), (0, 2));
        assert!(j.tried.contains(&1));
    }

    #[test]
    fn test_job_set_seeded() {
        let set = JobSet::seeded(vec!["a".to_string(), "b".to_string()], 1);
        assert_eq!(set.len(), 2);
        assert!(set.iter().all(|j| j.low == 0 && j.high == 1));
        assert!(set.bounds_valid(1));
        assert!(!set.bounds_valid(0));
        assert!(set.contains_id("b"));
        assert!(!set.contains_id("c"));
    }

    #[test]
    fn test_job_set_live_indices_and_remove() {
        let mut set = JobSet::from_jobs(vec![job(0, 1), job(1, 1), job(0, 3)]);
        assert_eq!(set.live_indices(), vec![0, 2]);
        assert!(set.remove(1).is_some());
        assert!(set.remove(5).is_none());
        assert_eq!(set.live_indices(), vec![0, 1]);
    }

    #[test]
    fn test_job_set_clone_is_deep() {
        let original = JobSet::from_jobs(vec![job(0, 4)]);
        let mut copy = original.clone();
        if let Some(j) = copy.get_mut(0) {
            j.tried.insert(2);
        }
        assert!(original.get(0).map_or(false, |j| j.tried.is_empty()));
        assert_ne!(original, copy);
    }
}
