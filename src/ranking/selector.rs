//! Comparison selection
//!
//! Decides which pending job to advance and which already-placed item to use
//! as its pivot. Selection is rejection sampling with an explicit attempt
//! cap, so a job whose window has no untried pivot (which should never
//! happen) is skipped instead of looping forever.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::config::{JobOrder, PivotPolicy, RankingConfig};
use super::job::{InsertionJob, JobSet};
use super::traits::Rankable;

/// Position of a comparison: which job, against which sorted-sequence index
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinates {
    /// Index of the job in the job set
    pub job_index: usize,
    /// Index of the pivot in the sorted sequence
    pub pivot_index: usize,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(job_index: usize, pivot_index: usize) -> Self {
        Self {
            job_index,
            pivot_index,
        }
    }
}

/// Outcome of a selection attempt
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SelectOutcome {
    /// A presentable comparison was found
    Found(Coordinates),
    /// Every job's window is already collapsed (or there are no jobs)
    NoOpenJobs,
    /// Open jobs exist but none yielded a pivot within the attempt budget
    Exhausted { attempts: usize },
}

/// Picks the next comparison from the job set
#[derive(Clone, Copy, Debug)]
pub struct ComparisonSelector {
    job_order: JobOrder,
    pivot_policy: PivotPolicy,
    retry_factor: usize,
}

impl ComparisonSelector {
    /// Create a selector with explicit policies
    pub fn new(job_order: JobOrder, pivot_policy: PivotPolicy, retry_factor: usize) -> Self {
        Self {
            job_order,
            pivot_policy,
            retry_factor: retry_factor.max(1),
        }
    }

    /// Create a selector from an engine configuration
    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.job_order, config.pivot_policy, config.retry_factor)
    }

    /// Maximum number of draws for a job set of the given size
    pub fn attempt_budget(&self, job_count: usize) -> usize {
        self.retry_factor * job_count
    }

    /// Select the next comparison
    ///
    /// `sorted_len` is the current length of the sorted sequence; a job whose
    /// window reaches past it is treated as unpresentable.
    pub fn select<T, R>(&self, jobs: &JobSet<T>, sorted_len: usize, rng: &mut R) -> SelectOutcome
    where
        T: Rankable,
        R: Rng + ?Sized,
    {
        let live = jobs.live_indices();
        if live.is_empty() {
            return SelectOutcome::NoOpenJobs;
        }

        match self.job_order {
            JobOrder::Interleaved => {
                let budget = self.attempt_budget(jobs.len());
                for _ in 0..budget {
                    let Some(&job_index) = live.choose(rng) else {
                        break;
                    };
                    if let Some(pivot) = self.try_job(jobs, job_index, sorted_len, rng) {
                        return SelectOutcome::Found(Coordinates::new(job_index, pivot));
                    }
                }
                SelectOutcome::Exhausted { attempts: budget }
            }
            JobOrder::Sequential => {
                for (attempt, &job_index) in live.iter().enumerate() {
                    if attempt >= self.attempt_budget(jobs.len()) {
                        break;
                    }
                    if let Some(pivot) = self.try_job(jobs, job_index, sorted_len, rng) {
                        return SelectOutcome::Found(Coordinates::new(job_index, pivot));
                    }
                }
                SelectOutcome::Exhausted {
                    attempts: live.len().min(self.attempt_budget(jobs.len())),
                }
            }
        }
    }

    fn try_job<T, R>(
        &self,
        jobs: &JobSet<T>,
        job_index: usize,
        sorted_len: usize,
        rng: &mut R,
    ) -> Option<usize>
    where
        T: Rankable,
        R: Rng + ?Sized,
    {
        let job = jobs.get(job_index)?;
        if job.high > sorted_len {
            warn!(
                item = job.item.label(),
                low = job.low,
                high = job.high,
                sorted_len,
                "job window exceeds sorted sequence; skipping"
            );
            return None;
        }
        let pivot = self.pick_pivot(job, rng);
        if pivot.is_none() {
            warn!(
                item = job.item.label(),
                low = job.low,
                high = job.high,
                "open job has no untried pivot; skipping"
            );
        }
        pivot
    }

    /// Choose a pivot inside the job's window according to the pivot policy
    pub fn pick_pivot<T, R>(&self, job: &InsertionJob<T>, rng: &mut R) -> Option<usize>
    where
        R: Rng + ?Sized,
    {
        let untried = job.untried_pivots();
        match self.pivot_policy {
            PivotPolicy::Random => untried.choose(rng).copied(),
            PivotPolicy::Midpoint => {
                let mid = (job.low + job.high) / 2;
                untried.into_iter().min_by_key(|&i| (i.abs_diff(mid), i))
            }
        }
    }
}

impl Default for ComparisonSelector {
    fn default() -> Self {
        Self::from_config(&RankingConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn job(name: &str, low: usize, high: usize) -> InsertionJob<String> {
        InsertionJob::new(name.to_string(), low, high)
    }

    #[test]
    fn test_select_empty_job_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let jobs: JobSet<String> = JobSet::new();
        let outcome = ComparisonSelector::default().select(&jobs, 3, &mut rng);
        assert_eq!(outcome, SelectOutcome::NoOpenJobs);
    }

    #[test]
    fn test_select_all_collapsed() {
        let mut rng = StdRng::seed_from_u64(1);
        let jobs = JobSet::from_jobs(vec![job("a", 1, 1), job("b", 0, 0)]);
        let outcome = ComparisonSelector::default().select(&jobs, 2, &mut rng);
        assert_eq!(outcome, SelectOutcome::NoOpenJobs);
    }

    #[test]
    fn test_random_pivot_stays_in_window_and_untried() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut j = job("a", 2, 7);
        j.tried.insert(4);
        let jobs = JobSet::from_jobs(vec![j]);
        let selector = ComparisonSelector::default();
        for _ in 0..200 {
            match selector.select(&jobs, 10, &mut rng) {
                SelectOutcome::Found(c) => {
                    assert_eq!(c.job_index, 0);
                    assert!((2..7).contains(&c.pivot_index));
                    assert_ne!(c.pivot_index, 4);
                }
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }

    #[test]
    fn test_random_selection_reaches_every_open_job() {
        let mut rng = StdRng::seed_from_u64(5);
        let jobs = JobSet::from_jobs(vec![job("a", 0, 3), job("b", 2, 2), job("c", 0, 3)]);
        let selector = ComparisonSelector::default();
        let mut seen = [false; 3];
        for _ in 0..200 {
            if let SelectOutcome::Found(c) = selector.select(&jobs, 3, &mut rng) {
                seen[c.job_index] = true;
            }
        }
        assert!(seen[0] && seen[2]);
        assert!(!seen[1]);
    }

    #[test]
    fn test_midpoint_pivot() {
        let mut rng = StdRng::seed_from_u64(0);
        let selector = ComparisonSelector::new(JobOrder::Sequential, PivotPolicy::Midpoint, 2);
        assert_eq!(selector.pick_pivot(&job("a", 0, 5), &mut rng), Some(2));
        assert_eq!(selector.pick_pivot(&job("a", 3, 4), &mut rng), Some(3));

        let mut j = job("a", 0, 4);
        j.tried.insert(2);
        assert_eq!(selector.pick_pivot(&j, &mut rng), Some(1));
    }

    #[test]
    fn test_sequential_picks_oldest_open_job() {
        let mut rng = StdRng::seed_from_u64(9);
        let jobs = JobSet::from_jobs(vec![job("a", 1, 1), job("b", 0, 2), job("c", 0, 2)]);
        let selector = ComparisonSelector::new(JobOrder::Sequential, PivotPolicy::Random, 2);
        for _ in 0..50 {
            match selector.select(&jobs, 2, &mut rng) {
                SelectOutcome::Found(c) => assert_eq!(c.job_index, 1),
                other => panic!("unexpected outcome {:?}", other),
            }
        }
    }

    #[test]
    fn test_exhausted_when_every_pivot_tried() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut a = job("a", 0, 2);
        a.tried.extend([0, 1]);
        let mut b = job("b", 1, 2);
        b.tried.insert(1);
        let jobs = JobSet::from_jobs(vec![a, b]);

        let outcome = ComparisonSelector::default().select(&jobs, 2, &mut rng);
        assert_eq!(outcome, SelectOutcome::Exhausted { attempts: 4 });

        let sequential = ComparisonSelector::new(JobOrder::Sequential, PivotPolicy::Random, 2);
        assert_eq!(
            sequential.select(&jobs, 2, &mut rng),
            SelectOutcome::Exhausted { attempts: 2 }
        );
    }

    #[test]
    fn test_skips_broken_job_and_finds_healthy_one() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut broken = job("a", 0, 1);
        broken.tried.insert(0);
        let jobs = JobSet::from_jobs(vec![broken, job("b", 0, 1)]);
        let selector = ComparisonSelector::new(JobOrder::Interleaved, PivotPolicy::Random, 8);
        assert_eq!(
            selector.select(&jobs, 1, &mut rng),
            SelectOutcome::Found(Coordinates::new(1, 0))
        );
    }

    #[test]
    fn test_window_past_sorted_len_is_skipped() {
        let mut rng = StdRng::seed_from_u64(17);
        let jobs = JobSet::from_jobs(vec![job("a", 0, 5)]);
        let outcome = ComparisonSelector::default().select(&jobs, 3, &mut rng);
        assert!(matches!(outcome, SelectOutcome::Exhausted { .. }));
    }
}
