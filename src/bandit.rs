//! An arm paired one-to-one with the estimator that learns it.

use rand::Rng;

use crate::arm::ArmModel;
use crate::error::Result;
use crate::estimator::{BetaPrior, BetaPosterior, Estimator};

/// One selectable arm and the belief held about it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bandit {
    pub arm: ArmModel,
    pub estimator: Estimator,
}

impl Bandit {
    pub fn new(arm: ArmModel, estimator: Estimator) -> Self {
        Self { arm, estimator }
    }

    /// Gaussian arm learned by a zero-initialized running mean.
    pub fn greedy(mean: f64) -> Result<Self> {
        Ok(Self::new(ArmModel::gaussian(mean)?, Estimator::sample_average()))
    }

    /// Gaussian arm learned by a running mean starting at `initial`.
    pub fn optimistic(mean: f64, initial: f64) -> Result<Self> {
        Ok(Self::new(
            ArmModel::gaussian(mean)?,
            Estimator::optimistic(initial)?,
        ))
    }

    /// Bernoulli arm learned by Thompson sampling under the uniform prior.
    pub fn thompson(p: f64) -> Result<Self> {
        Self::thompson_with_prior(p, BetaPrior::default())
    }

    pub fn thompson_with_prior(p: f64, prior: BetaPrior) -> Result<Self> {
        // Re-validate: the prior fields are public.
        let prior = BetaPrior::new(prior.alpha0, prior.beta0)?;
        Ok(Self::new(
            ArmModel::bernoulli(p)?,
            Estimator::BayesianBeta(BetaPosterior::new(prior)),
        ))
    }

    /// Selection value of the current belief.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.estimator.sample(rng)
    }

    /// Draw a reward from the arm and feed it to the estimator.
    pub fn pull<R: Rng + ?Sized>(&mut self, rng: &mut R) -> f64 {
        let reward = self.arm.draw(rng);
        self.estimator.update(reward);
        reward
    }
}

/// Gaussian arms with the given true means.
///
/// `initial = None` uses zero-initialized greedy estimators; `Some(q0)` uses
/// optimistic ones starting at `q0`.
pub fn gaussian_testbed(means: &[f64], initial: Option<f64>) -> Result<Vec<Bandit>> {
    means
        .iter()
        .map(|&m| match initial {
            Some(q0) => Bandit::optimistic(m, q0),
            None => Bandit::greedy(m),
        })
        .collect()
}

/// Bernoulli arms with Beta-posterior (Thompson) estimators sharing one prior.
pub fn bernoulli_testbed(probs: &[f64], prior: BetaPrior) -> Result<Vec<Bandit>> {
    probs
        .iter()
        .map(|&p| Bandit::thompson_with_prior(p, prior))
        .collect()
}
