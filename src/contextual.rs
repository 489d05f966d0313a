//! Synthetic datasets for the linear contextual-bandit setting.
//!
//! The expected reward of action `j` in context `x` is `x · w_j`, where the
//! latent weights `w_j` are hidden from the learner:
//!
//! 1. `W` (`d × k`) is drawn uniformly from `[-1, 1]`, then each column is
//!    scaled to unit norm so every action has a comparable reward scale.
//! 2. Contexts are i.i.d. `N(0, I_d)`.
//! 3. Rewards are `X W`, one row per context.
//! 4. The oracle action per context is the arg-max of the **noiseless** row.
//! 5. `N(0, noise_std²)` noise is added to every reward.
//! 6. The oracle reward is read from the **noisy** row at the oracle action.
//!
//! Steps 4 and 6 are deliberately ordered: the oracle is defined by expected
//! rewards, while regret is measured on realized ones.

use rand::Rng;
use rand_distr::{Distribution, Normal, StandardNormal};

use crate::error::{Error, Result};

/// Shape and noise of a linear dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinearDataConfig {
    /// Number of contexts (rows).
    pub num_contexts: usize,
    /// Context dimension `d`.
    pub context_dim: usize,
    /// Number of actions `k`.
    pub num_actions: usize,
    /// Standard deviation of the additive reward noise (`0` = exact rewards).
    pub noise_std: f64,
}

impl Default for LinearDataConfig {
    fn default() -> Self {
        Self {
            num_contexts: 2_000,
            context_dim: 10,
            num_actions: 8,
            noise_std: 0.0,
        }
    }
}

impl LinearDataConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_contexts == 0 {
            return Err(Error::invalid("num_contexts", "must be >= 1"));
        }
        if self.context_dim == 0 {
            return Err(Error::invalid("context_dim", "must be >= 1"));
        }
        if self.num_actions == 0 {
            return Err(Error::invalid("num_actions", "must be >= 1"));
        }
        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(Error::invalid(
                "noise_std",
                format!("must be finite and >= 0, got {}", self.noise_std),
            ));
        }
        Ok(())
    }
}

/// A generated dataset plus its ground truth.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextualDataset {
    /// `n` context vectors of length `d`.
    pub contexts: Vec<Vec<f64>>,
    /// `n` reward rows of length `k`, noise included.
    pub rewards: Vec<Vec<f64>>,
    /// Latent weights, `d × k` row-major (column `j` belongs to action `j`).
    pub latent_weights: Vec<f64>,
    /// Arg-max of the noiseless reward row, per context.
    pub optimal_actions: Vec<usize>,
    /// Noiseless reward of the optimal action, per context.
    pub expected_optimal_rewards: Vec<f64>,
    /// Realized (noisy) reward of the optimal action, per context.
    pub optimal_rewards: Vec<f64>,
    context_dim: usize,
    num_actions: usize,
}

impl ContextualDataset {
    pub fn num_contexts(&self) -> usize {
        self.contexts.len()
    }

    pub fn context_dim(&self) -> usize {
        self.context_dim
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Latent weight for context feature `feature` and action `action`.
    pub fn weight(&self, feature: usize, action: usize) -> f64 {
        self.latent_weights[feature * self.num_actions + action]
    }

    /// Latent weight vector of one action.
    pub fn weight_column(&self, action: usize) -> Vec<f64> {
        (0..self.context_dim)
            .map(|f| self.weight(f, action))
            .collect()
    }

    /// Noiseless reward `x_i · w_j`.
    pub fn expected_reward(&self, context: usize, action: usize) -> f64 {
        let x = &self.contexts[context];
        let mut s = 0.0;
        for (f, &xf) in x.iter().enumerate() {
            s += xf * self.weight(f, action);
        }
        s
    }

    /// Flat records `[context | rewards]`, each of width `d + k`.
    pub fn records(&self) -> Vec<Vec<f64>> {
        self.contexts
            .iter()
            .zip(&self.rewards)
            .map(|(x, r)| {
                let mut row = Vec::with_capacity(x.len() + r.len());
                row.extend_from_slice(x);
                row.extend_from_slice(r);
                row
            })
            .collect()
    }

    /// Per-context regret of `actions`: `optimal_rewards[i] - rewards[i][actions[i]]`.
    pub fn regret(&self, actions: &[usize]) -> Result<Vec<f64>> {
        if actions.len() != self.num_contexts() {
            return Err(Error::invalid(
                "actions",
                format!(
                    "expected {} actions, got {}",
                    self.num_contexts(),
                    actions.len()
                ),
            ));
        }
        actions
            .iter()
            .enumerate()
            .map(|(i, &a)| match self.rewards[i].get(a) {
                Some(&r) => Ok(self.optimal_rewards[i] - r),
                None => Err(Error::invalid(
                    "actions",
                    format!("action {a} out of range for {} actions", self.num_actions),
                )),
            })
            .collect()
    }

    /// Regret of the oracle itself (all zeros).
    pub fn oracle_regret(&self) -> Vec<f64> {
        self.optimal_actions
            .iter()
            .enumerate()
            .map(|(i, &a)| self.optimal_rewards[i] - self.rewards[i][a])
            .collect()
    }
}

/// Generate a linear contextual dataset.
pub fn generate_linear<R: Rng + ?Sized>(
    cfg: &LinearDataConfig,
    rng: &mut R,
) -> Result<ContextualDataset> {
    cfg.validate()?;
    let (n, d, k) = (cfg.num_contexts, cfg.context_dim, cfg.num_actions);

    let mut weights: Vec<f64> = (0..d * k).map(|_| rng.random_range(-1.0..=1.0)).collect();
    normalize_columns(&mut weights, d, k);

    let contexts: Vec<Vec<f64>> = (0..n)
        .map(|_| (0..d).map(|_| StandardNormal.sample(rng)).collect())
        .collect();

    let mut rewards: Vec<Vec<f64>> = contexts
        .iter()
        .map(|x| (0..k).map(|j| dot_column(x, &weights, k, j)).collect())
        .collect();

    let optimal_actions: Vec<usize> = rewards.iter().map(|row| argmax(row)).collect();
    let expected_optimal_rewards: Vec<f64> = rewards
        .iter()
        .zip(&optimal_actions)
        .map(|(row, &a)| row[a])
        .collect();

    if cfg.noise_std > 0.0 {
        let noise = Normal::new(0.0, cfg.noise_std)
            .map_err(|e| Error::invalid("noise_std", e.to_string()))?;
        for row in &mut rewards {
            for r in row.iter_mut() {
                *r += noise.sample(rng);
            }
        }
    }

    let optimal_rewards: Vec<f64> = rewards
        .iter()
        .zip(&optimal_actions)
        .map(|(row, &a)| row[a])
        .collect();

    tracing::debug!(
        num_contexts = n,
        context_dim = d,
        num_actions = k,
        noise_std = cfg.noise_std,
        "generated linear contextual dataset"
    );

    Ok(ContextualDataset {
        contexts,
        rewards,
        latent_weights: weights,
        optimal_actions,
        expected_optimal_rewards,
        optimal_rewards,
        context_dim: d,
        num_actions: k,
    })
}

/// Scale each column of a `d × k` row-major matrix to unit Euclidean norm.
///
/// An all-zero column is left untouched.
fn normalize_columns(m: &mut [f64], d: usize, k: usize) {
    for j in 0..k {
        let norm = (0..d).map(|i| m[i * k + j].powi(2)).sum::<f64>().sqrt();
        if norm > 0.0 {
            for i in 0..d {
                m[i * k + j] /= norm;
            }
        }
    }
}

fn dot_column(x: &[f64], m: &[f64], k: usize, j: usize) -> f64 {
    let mut s = 0.0;
    for (i, &xi) in x.iter().enumerate() {
        s += xi * m[i * k + j];
    }
    s
}

/// Index of the first maximum.
fn argmax(row: &[f64]) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (j, &v) in row.iter().enumerate() {
        if v > best_value {
            best_value = v;
            best = j;
        }
    }
    best
}
