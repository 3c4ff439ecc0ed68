//! Park Ranking Example
//!
//! This example ranks a handful of national parks from pairwise choices.
//! A simulated user answers every question; in a real application the
//! comparison would be shown in a UI and the answer fed back the same way.
//!
//! Run with `RUST_LOG=parkrank=debug` to see every choice and insertion.

use parkrank::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

/// Simulates a user who likes older parks better
struct SimulatedUser;

impl SimulatedUser {
    fn prefers_candidate(&self, candidate: &Park, pivot: &Park) -> bool {
        candidate.established < pivot.established
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("parkrank=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("=== Park Ranking Demo ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let catalog = Catalog::national_parks();
    let user = SimulatedUser;

    let config = RankingConfig::default();
    println!("Pivot policy: {}", config.pivot_policy.description());

    let observer = RecordingObserver::new();
    let mut flow = RankingFlow::with_observer(config, observer)?;
    for id in ["yose", "zion", "glac", "acad", "arch", "olym", "dena", "ever"] {
        flow.select(catalog.require(id)?.clone())?;
    }
    println!("Selected {} parks\n", flow.selection().len());

    flow.start_ranking(&mut rng)?;
    let mut undone = false;

    while flow.step() == Step::Ranking {
        let Some(cmp) = flow.engine().next_comparison() else {
            break;
        };
        println!(
            "[{:>5.1}%] #{:<3} {} vs {}",
            flow.engine().progress(),
            cmp.comparison_id,
            cmp.candidate.name,
            cmp.pivot.name
        );
        let prefer = user.prefers_candidate(cmp.candidate, cmp.pivot);

        // Demonstrate undo once: answer wrongly, then take it back
        if !undone && flow.engine().sorted().len() >= 3 {
            flow.choose(!prefer, &mut rng)?;
            println!("        (oops, undoing)");
            flow.undo()?;
            undone = true;
            continue;
        }

        flow.choose(prefer, &mut rng)?;
    }

    println!("\n=== Ranking Complete ===");
    if let Some(ranking) = flow.results() {
        for (i, park) in ranking.iter().enumerate() {
            println!("  #{}: {} ({})", i + 1, park.name, park.established);
        }
    }

    let stats = flow.engine().stats();
    println!(
        "\nComparisons shown: {}, choices: {}, undos: {}",
        stats.comparisons_shown, stats.choices_applied, stats.undos
    );
    let observed = flow.observer().comparison_count();
    println!("Observer saw {} comparisons", observed);

    Ok(())
}
