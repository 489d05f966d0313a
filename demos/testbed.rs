//! Greedy, optimistic and Thompson bandits on small testbeds.
//!
//! Run with `RUST_LOG=banditry=debug cargo run --example testbed` to see the
//! simulation lifecycle events.

use banditry::{bernoulli_testbed, gaussian_testbed, BetaPrior, Simulation, SimulationConfig};
use tracing_subscriber::EnvFilter;

fn main() -> banditry::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let means = [3.0, 1.0, 5.0];
    let cfg = SimulationConfig {
        num_trials: 50,
        seed: 42,
    };

    for (label, initial) in [("greedy", None), ("optimistic", Some(10.0))] {
        let t = Simulation::run_seeded(gaussian_testbed(&means, initial)?, cfg)?;
        let last = t.beliefs_by_round.last().cloned().unwrap_or_default();
        println!(
            "{label:>10}: pulls={:?} final_estimates={:.3?} total_regret={:.2}",
            t.pull_counts,
            last,
            t.regret.iter().sum::<f64>()
        );
    }

    let probs = [0.2, 0.5, 0.75];
    let t = Simulation::run_seeded(
        bernoulli_testbed(&probs, BetaPrior::default())?,
        SimulationConfig {
            num_trials: 1_000,
            seed: 42,
        },
    )?;
    println!(
        "  thompson: pulls={:?} best_arm_share={:.3} total_regret={:.2}",
        t.pull_counts,
        t.pull_fraction(2),
        t.regret.iter().sum::<f64>()
    );

    Ok(())
}
