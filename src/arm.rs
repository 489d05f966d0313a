//! Hidden reward-generating process behind one arm.
//!
//! Two reward shapes are supported:
//! - [`ArmModel::Gaussian`]: `max(0, mean + N(0, 1))`, a rectified Gaussian for
//!   non-negative reward magnitudes (click value, revenue).
//! - [`ArmModel::Bernoulli`]: `1` with probability `p`, else `0` (conversion).
//!
//! The model is stateless: pull counts live in the paired estimator.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::error::{ensure_finite, Error, Result};

/// True reward distribution of one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmModel {
    /// Rectified unit-variance Gaussian around `mean`.
    Gaussian { mean: f64 },
    /// Success with probability `p` in `[0, 1]`.
    Bernoulli { p: f64 },
}

impl ArmModel {
    /// Rectified Gaussian arm. `mean` must be finite.
    pub fn gaussian(mean: f64) -> Result<Self> {
        let mean = ensure_finite("mean", mean)?;
        Ok(Self::Gaussian { mean })
    }

    /// Bernoulli arm. `p` must lie in `[0, 1]`.
    pub fn bernoulli(p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(Error::invalid(
                "p",
                format!("success probability must be in [0, 1], got {p}"),
            ));
        }
        Ok(Self::Bernoulli { p })
    }

    /// The hidden parameter: Gaussian location or Bernoulli success probability.
    ///
    /// This is what regret is measured against.
    pub fn true_mean(&self) -> f64 {
        match *self {
            Self::Gaussian { mean } => mean,
            Self::Bernoulli { p } => p,
        }
    }

    /// Draw one reward.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            Self::Gaussian { mean } => {
                let z: f64 = StandardNormal.sample(rng);
                let value = mean + z;
                if value > 0.0 {
                    value
                } else {
                    0.0
                }
            }
            Self::Bernoulli { p } => {
                let u: f64 = rng.random();
                if u < p {
                    1.0
                } else {
                    0.0
                }
            }
        }
    }
}
