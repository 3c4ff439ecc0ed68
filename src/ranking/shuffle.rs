//! Randomized processing order
//!
//! Items are shuffled before seeding so the order in which the user picked
//! them never biases which comparisons end up being asked.

use rand::seq::SliceRandom;
use rand::Rng;

/// Return the items in a uniformly random order (Fisher-Yates)
pub fn shuffled<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut out = items.to_vec();
    out.shuffle(rng);
    out
}
