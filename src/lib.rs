//! `banditry`: seedable multi-armed bandit simulation.
//!
//! Built for small testbeds where you want to watch an estimator learn: a
//! handful of arms with hidden reward distributions, a belief per arm, and a
//! loop that repeatedly picks the arm whose belief looks best.
//!
//! **Pieces:**
//! - [`ArmModel`]: the hidden reward process. Rectified Gaussian
//!   (`max(0, mean + N(0, 1))`) or Bernoulli.
//! - [`Estimator`]: belief over one arm.
//!   - `SampleAverage`: streaming mean from `0`, greedy selection.
//!   - `Optimistic`: streaming mean from a high `Q0`, greedy selection.
//!   - `BayesianBeta`: Beta-Bernoulli posterior, Thompson-sampling selection.
//! - [`Bandit`]: an arm paired with its estimator.
//! - [`Simulation`]: select / draw / update rounds, recorded into a [`Trajectory`].
//! - (feature `contextual`) [`generate_linear`]: synthetic linear
//!   contextual-bandit data with oracle actions and rewards.
//!
//! **Goals:**
//! - **Deterministic given a seed**: every random operation takes an explicit
//!   `&mut impl Rng`; nothing reads a global RNG. Same seed → same trajectory.
//! - **Variant-agnostic loop**: the simulation only calls `sample`/`update`.
//!   Greedy and Thompson bandits can be mixed in one run.
//! - **Fail at the boundary**: constructors and configs validate and return
//!   [`Error::InvalidParameter`]; everything after construction is total.
//!
//! **Non-goals:**
//! - No persistence, no concurrency, no plotting. Trajectories and datasets are
//!   plain data for an external reporter or learner.
//!
//! # Example
//!
//! ```rust
//! use banditry::{gaussian_testbed, Simulation, SimulationConfig};
//!
//! // Three arms, optimistic start so every arm gets tried once.
//! let bandits = gaussian_testbed(&[3.0, 1.0, 5.0], Some(10.0)).unwrap();
//! let t = Simulation::run_seeded(bandits, SimulationConfig { num_trials: 50, seed: 7 }).unwrap();
//!
//! assert_eq!(t.beliefs_by_round.len(), 51);
//! assert_eq!(t.num_arms(), 3);
//! assert_eq!(&t.choices[..3], &[0, 1, 2]);
//! ```
//!
//! Thompson sampling over Bernoulli arms:
//!
//! ```rust
//! use banditry::{bernoulli_testbed, BetaPrior, Simulation, SimulationConfig};
//!
//! let bandits = bernoulli_testbed(&[0.2, 0.5, 0.75], BetaPrior::default()).unwrap();
//! let t = Simulation::run_seeded(bandits, SimulationConfig { num_trials: 200, seed: 1 }).unwrap();
//! assert_eq!(t.pull_counts.iter().sum::<u64>(), 200);
//! ```

#![forbid(unsafe_code)]

mod error;
pub use error::{Error, Result};

mod arm;
pub use arm::*;

mod estimator;
pub use estimator::*;

mod bandit;
pub use bandit::*;

mod simulation;
pub use simulation::*;

#[cfg(feature = "contextual")]
mod contextual;
#[cfg(feature = "contextual")]
pub use contextual::*;
