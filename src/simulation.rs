//! Repeated select / draw / update rounds over a fixed set of bandits.
//!
//! Lifecycle: `Initialized` (round-0 snapshot taken) → `Running` (at least one
//! round played) → `Completed` (frozen; `step` is a no-op).
//!
//! Each round:
//! 1. Ask every bandit for `sample()` and pick the maximum. Ties go to the
//!    lowest index.
//! 2. Pull that arm and update its estimator.
//! 3. Record a fresh `sample()` from every bandit as this round's belief row.
//!
//! The loop never inspects estimator variants: greedy and Thompson bandits
//! differ only in what `sample()` returns, and they can be mixed freely.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bandit::Bandit;
use crate::error::{Error, Result};

/// Run parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Number of rounds after the initial snapshot (`0` is allowed).
    pub num_trials: usize,
    /// Seed for the run's `StdRng`.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_trials: 1_000,
            seed: 0,
        }
    }
}

/// Where a [`Simulation`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SimulationState {
    Initialized,
    Running,
    Completed,
}

/// Everything recorded during a run.
///
/// `beliefs_by_round` has one row per round plus the round-0 snapshot and one
/// column per arm. The per-round vectors (`choices`, `rewards`, `regret`) have
/// one entry per played round.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    pub beliefs_by_round: Vec<Vec<f64>>,
    /// Index of the arm pulled in each round.
    pub choices: Vec<usize>,
    /// Observed reward in each round.
    pub rewards: Vec<f64>,
    /// Expected regret per round: best true mean minus the chosen arm's true mean.
    pub regret: Vec<f64>,
    /// Pulls per arm.
    pub pull_counts: Vec<u64>,
}

impl Trajectory {
    fn new(num_arms: usize) -> Self {
        Self {
            beliefs_by_round: Vec::new(),
            choices: Vec::new(),
            rewards: Vec::new(),
            regret: Vec::new(),
            pull_counts: vec![0; num_arms],
        }
    }

    /// Played rounds (excludes the round-0 snapshot).
    pub fn num_rounds(&self) -> usize {
        self.choices.len()
    }

    pub fn num_arms(&self) -> usize {
        self.pull_counts.len()
    }

    /// Running sum of per-round regret.
    pub fn cumulative_regret(&self) -> Vec<f64> {
        self.regret
            .iter()
            .scan(0.0, |acc, &r| {
                *acc += r;
                Some(*acc)
            })
            .collect()
    }

    pub fn total_reward(&self) -> f64 {
        self.rewards.iter().sum()
    }

    /// Share of played rounds that pulled `arm` (`0` when nothing was played).
    pub fn pull_fraction(&self, arm: usize) -> f64 {
        let n = self.num_rounds();
        if n == 0 {
            return 0.0;
        }
        self.pull_counts.get(arm).copied().unwrap_or(0) as f64 / n as f64
    }

    /// Belief values of one arm across all rows.
    pub fn belief_series(&self, arm: usize) -> Vec<f64> {
        self.beliefs_by_round
            .iter()
            .filter_map(|row| row.get(arm).copied())
            .collect()
    }
}

/// Sequential bandit simulation.
#[derive(Debug, Clone)]
pub struct Simulation {
    bandits: Vec<Bandit>,
    best_mean: f64,
    state: SimulationState,
    trajectory: Trajectory,
}

impl Simulation {
    /// Take the round-0 snapshot. Fails with [`Error::NoArms`] on an empty set.
    pub fn new<R: Rng + ?Sized>(bandits: Vec<Bandit>, rng: &mut R) -> Result<Self> {
        if bandits.is_empty() {
            return Err(Error::NoArms);
        }
        let best_mean = bandits
            .iter()
            .map(|b| b.arm.true_mean())
            .fold(f64::NEG_INFINITY, f64::max);
        let mut trajectory = Trajectory::new(bandits.len());
        trajectory
            .beliefs_by_round
            .push(bandits.iter().map(|b| b.sample(rng)).collect());

        tracing::debug!(arms = bandits.len(), best_mean, "simulation initialized");

        Ok(Self {
            bandits,
            best_mean,
            state: SimulationState::Initialized,
            trajectory,
        })
    }

    /// Build, run `cfg.num_trials` rounds with a fresh `StdRng`, and return the trajectory.
    pub fn run_seeded(bandits: Vec<Bandit>, cfg: SimulationConfig) -> Result<Trajectory> {
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let sim = Self::new(bandits, &mut rng)?;
        Ok(sim.run(cfg.num_trials, &mut rng))
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn bandits(&self) -> &[Bandit] {
        &self.bandits
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Play one round and return the pulled arm, or `None` once completed.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<usize> {
        if self.state == SimulationState::Completed {
            return None;
        }
        self.state = SimulationState::Running;

        let chosen = self.select(rng);
        let bandit = &mut self.bandits[chosen];
        let reward = bandit.pull(rng);
        let regret = self.best_mean - bandit.arm.true_mean();

        let t = &mut self.trajectory;
        t.choices.push(chosen);
        t.rewards.push(reward);
        t.regret.push(regret);
        t.pull_counts[chosen] += 1;
        t.beliefs_by_round
            .push(self.bandits.iter().map(|b| b.sample(rng)).collect());

        tracing::trace!(round = t.choices.len(), arm = chosen, reward, "round played");
        Some(chosen)
    }

    /// Freeze the run. Further `step` calls do nothing.
    pub fn complete(&mut self) {
        if self.state != SimulationState::Completed {
            self.state = SimulationState::Completed;
            tracing::debug!(
                rounds = self.trajectory.num_rounds(),
                total_reward = self.trajectory.total_reward(),
                total_regret = self.trajectory.regret.iter().sum::<f64>(),
                "simulation completed"
            );
        }
    }

    /// Play `num_trials` rounds, complete, and hand back the trajectory.
    pub fn run<R: Rng + ?Sized>(mut self, num_trials: usize, rng: &mut R) -> Trajectory {
        for _ in 0..num_trials {
            self.step(rng);
        }
        self.complete();
        self.trajectory
    }

    /// Give up the simulation and keep only its trajectory.
    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (i, b) in self.bandits.iter().enumerate() {
            let v = b.sample(rng);
            // Strict `>` keeps the lowest index on ties.
            if v > best_value {
                best_value = v;
                best = i;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bandit::{bernoulli_testbed, gaussian_testbed};
    use crate::estimator::BetaPrior;

    fn rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    #[test]
    fn empty_bandit_set_is_rejected() {
        assert_eq!(
            Simulation::new(Vec::new(), &mut rng(0)).unwrap_err(),
            Error::NoArms
        );
    }

    #[test]
    fn zero_trials_returns_only_initial_snapshot() {
        let bandits = gaussian_testbed(&[1.0, 2.0, 3.0], None).unwrap();
        let t = Simulation::run_seeded(
            bandits,
            SimulationConfig {
                num_trials: 0,
                seed: 1,
            },
        )
        .unwrap();
        assert_eq!(t.beliefs_by_round, vec![vec![0.0, 0.0, 0.0]]);
        assert_eq!(t.num_rounds(), 0);
        assert_eq!(t.pull_fraction(0), 0.0);
    }

    #[test]
    fn state_moves_through_lifecycle() {
        let mut r = rng(2);
        let mut sim = Simulation::new(gaussian_testbed(&[1.0], None).unwrap(), &mut r).unwrap();
        assert_eq!(sim.state(), SimulationState::Initialized);
        assert_eq!(sim.step(&mut r), Some(0));
        assert_eq!(sim.state(), SimulationState::Running);
        sim.complete();
        assert_eq!(sim.state(), SimulationState::Completed);
        assert_eq!(sim.step(&mut r), None);
        assert_eq!(sim.trajectory().num_rounds(), 1);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        // Equal optimistic values: first round must pull arm 0.
        let mut r = rng(3);
        let bandits = gaussian_testbed(&[1.0, 1.0, 1.0], Some(10.0)).unwrap();
        let mut sim = Simulation::new(bandits, &mut r).unwrap();
        assert_eq!(sim.step(&mut r), Some(0));
    }

    #[test]
    fn optimistic_start_tries_every_arm_once_in_order() {
        let mut r = rng(4);
        let bandits = gaussian_testbed(&[3.0, 1.0, 5.0], Some(20.0)).unwrap();
        let mut sim = Simulation::new(bandits, &mut r).unwrap();
        let first: Vec<usize> = (0..3).filter_map(|_| sim.step(&mut r)).collect();
        assert_eq!(first, vec![0, 1, 2]);
    }

    #[test]
    fn regret_is_zero_for_best_arm_and_positive_otherwise() {
        let mut r = rng(5);
        let bandits = gaussian_testbed(&[3.0, 1.0, 5.0], Some(20.0)).unwrap();
        let t = Simulation::new(bandits, &mut r).unwrap().run(3, &mut r);
        assert_eq!(t.choices, vec![0, 1, 2]);
        assert_eq!(t.regret, vec![2.0, 4.0, 0.0]);
        assert_eq!(t.cumulative_regret(), vec![2.0, 6.0, 6.0]);
        assert_eq!(t.pull_counts, vec![1, 1, 1]);
    }

    #[test]
    fn belief_rows_record_post_update_estimates_for_greedy_arms() {
        let mut r = rng(6);
        let bandits = gaussian_testbed(&[4.0, 0.5], Some(10.0)).unwrap();
        let t = Simulation::new(bandits, &mut r).unwrap().run(2, &mut r);
        assert_eq!(t.beliefs_by_round.len(), 3);
        // Row 1: arm 0 replaced by its first reward, arm 1 still optimistic.
        assert!((t.beliefs_by_round[1][0] - t.rewards[0]).abs() < 1e-12);
        assert_eq!(t.beliefs_by_round[1][1], 10.0);
        assert_eq!(t.belief_series(1)[0], 10.0);
    }

    #[test]
    fn thompson_run_has_expected_shape() {
        let bandits = bernoulli_testbed(&[0.2, 0.4, 0.6, 0.8], BetaPrior::default()).unwrap();
        let t = Simulation::run_seeded(
            bandits,
            SimulationConfig {
                num_trials: 25,
                seed: 9,
            },
        )
        .unwrap();
        assert_eq!(t.beliefs_by_round.len(), 26);
        assert!(t.beliefs_by_round.iter().all(|row| row.len() == 4));
        assert_eq!(t.pull_counts.iter().sum::<u64>(), 25);
        assert!(t.rewards.iter().all(|&r| r == 0.0 || r == 1.0));
    }
}
