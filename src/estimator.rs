//! Belief-update strategies for one arm.
//!
//! [`Estimator`] is a closed set of variants sharing one operation set:
//! - `update(reward)`: fold an observed reward into the belief.
//! - `sample(rng)`: the value used for action selection.
//!
//! Variants:
//! - `SampleAverage`: running mean starting at `0`; `sample` returns the mean (greedy).
//! - `Optimistic`: running mean starting at a caller-chosen `Q0`; same update rule.
//! - `BayesianBeta`: Beta-Bernoulli posterior; `sample` is one posterior draw
//!   (Thompson sampling), never the posterior mean.
//!
//! The running-mean variants use the streaming recurrence
//! `n += 1; Q += (r - Q) / n`. Note that with `n` starting at zero the first
//! update overwrites the initial value entirely, so `Q0` only shapes selection
//! until an arm is pulled once.

use rand::Rng;
use rand_distr::{Beta, Distribution};

use crate::error::{ensure_finite, ensure_positive, Result};

/// First grid point of [`BetaPosterior::posterior`].
pub const POSTERIOR_GRID_START: f64 = -0.1;
/// Spacing of the posterior grid.
pub const POSTERIOR_GRID_STEP: f64 = 0.01;
/// Number of grid points (`-0.1, -0.09, ..., 1.09`).
pub const POSTERIOR_GRID_LEN: usize = 120;

/// Streaming sample mean with an explicit starting value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunningMean {
    initial: f64,
    q: f64,
    n: u64,
}

impl RunningMean {
    pub fn new(initial: f64) -> Self {
        Self {
            initial,
            q: initial,
            n: 0,
        }
    }

    pub fn update(&mut self, reward: f64) {
        self.n = self.n.saturating_add(1);
        self.q += (reward - self.q) / self.n as f64;
    }

    /// Current estimate `Q` (the initial value before any update).
    pub fn mean(&self) -> f64 {
        self.q
    }

    pub fn count(&self) -> u64 {
        self.n
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }
}

/// Beta prior pseudo-counts.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaPrior {
    /// Prior successes (must be > 0).
    pub alpha0: f64,
    /// Prior failures (must be > 0).
    pub beta0: f64,
}

impl BetaPrior {
    pub fn new(alpha0: f64, beta0: f64) -> Result<Self> {
        Ok(Self {
            alpha0: ensure_positive("alpha0", alpha0)?,
            beta0: ensure_positive("beta0", beta0)?,
        })
    }
}

impl Default for BetaPrior {
    /// The uniform prior `Beta(1, 1)`.
    fn default() -> Self {
        Self {
            alpha0: 1.0,
            beta0: 1.0,
        }
    }
}

/// Density of a Beta posterior sampled on a fixed grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PosteriorGrid {
    pub xs: Vec<f64>,
    pub densities: Vec<f64>,
}

/// Beta-Bernoulli posterior state for one arm.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BetaPosterior {
    prior: BetaPrior,
    successes: f64,
    trials: u64,
}

impl BetaPosterior {
    pub fn new(prior: BetaPrior) -> Self {
        Self {
            prior,
            successes: 0.0,
            trials: 0,
        }
    }

    pub fn prior(&self) -> BetaPrior {
        self.prior
    }

    pub fn successes(&self) -> f64 {
        self.successes
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    /// Record one trial.
    ///
    /// `reward` is read as a success indicator in `[0, 1]`: `0`/`1` for
    /// Bernoulli arms, fractional values count as partial successes.
    /// Non-finite rewards count as failures.
    pub fn update(&mut self, reward: f64) {
        let r = if reward.is_finite() {
            reward.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.trials = self.trials.saturating_add(1);
        self.successes += r;
    }

    /// Posterior `alpha = alpha0 + successes`.
    pub fn alpha(&self) -> f64 {
        self.prior.alpha0 + self.successes
    }

    /// Posterior `beta = beta0 + trials - successes`.
    pub fn beta(&self) -> f64 {
        self.prior.beta0 + self.trials as f64 - self.successes
    }

    /// Posterior mean `alpha / (alpha + beta)`.
    pub fn mean(&self) -> f64 {
        let a = self.alpha();
        a / (a + self.beta())
    }

    /// One independent draw from the posterior.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match Beta::new(self.alpha(), self.beta()) {
            Ok(dist) => dist.sample(rng),
            // Unreachable for positive priors; keep selection total anyway.
            Err(_) => self.mean(),
        }
    }

    /// Posterior density at `x`; `0` outside `[0, 1]`.
    pub fn density(&self, x: f64) -> f64 {
        beta_pdf(x, self.alpha(), self.beta())
    }

    /// Posterior density over `x_i = -0.1 + 0.01 i` for `i in 0..120`.
    ///
    /// For inspection only; selection never reads this.
    pub fn posterior(&self) -> PosteriorGrid {
        let xs: Vec<f64> = (0..POSTERIOR_GRID_LEN)
            .map(|i| POSTERIOR_GRID_START + i as f64 * POSTERIOR_GRID_STEP)
            .collect();
        let densities = xs.iter().map(|&x| self.density(x)).collect();
        PosteriorGrid { xs, densities }
    }
}

/// Which estimator variant a bandit uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EstimatorKind {
    SampleAverage,
    Optimistic,
    BayesianBeta,
}

impl EstimatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SampleAverage => "sample_average",
            Self::Optimistic => "optimistic",
            Self::BayesianBeta => "bayesian_beta",
        }
    }
}

/// Belief over one arm's value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Estimator {
    /// Running mean from `Q = 0`.
    SampleAverage(RunningMean),
    /// Running mean from a caller-chosen `Q0`.
    Optimistic(RunningMean),
    /// Beta-Bernoulli posterior with Thompson-sampling selection.
    BayesianBeta(BetaPosterior),
}

impl Estimator {
    /// Greedy running-mean estimator starting at `0`.
    pub fn sample_average() -> Self {
        Self::SampleAverage(RunningMean::new(0.0))
    }

    /// Greedy running-mean estimator starting at `initial`.
    ///
    /// Usage contract: pick `initial` above every arm's true mean in the
    /// testbed, so that each arm looks better than it is until pulled. This is
    /// not checked here; the estimator never sees the other arms.
    pub fn optimistic(initial: f64) -> Result<Self> {
        let initial = ensure_finite("initial", initial)?;
        Ok(Self::Optimistic(RunningMean::new(initial)))
    }

    /// Beta-Bernoulli estimator with the uniform prior.
    pub fn beta() -> Self {
        Self::BayesianBeta(BetaPosterior::new(BetaPrior::default()))
    }

    /// Beta-Bernoulli estimator with an explicit prior.
    pub fn beta_with_prior(alpha0: f64, beta0: f64) -> Result<Self> {
        let prior = BetaPrior::new(alpha0, beta0)?;
        Ok(Self::BayesianBeta(BetaPosterior::new(prior)))
    }

    pub fn kind(&self) -> EstimatorKind {
        match self {
            Self::SampleAverage(_) => EstimatorKind::SampleAverage,
            Self::Optimistic(_) => EstimatorKind::Optimistic,
            Self::BayesianBeta(_) => EstimatorKind::BayesianBeta,
        }
    }

    /// Fold one observed reward into the belief.
    pub fn update(&mut self, reward: f64) {
        match self {
            Self::SampleAverage(m) | Self::Optimistic(m) => m.update(reward),
            Self::BayesianBeta(p) => p.update(reward),
        }
    }

    /// Selection value: the point estimate for running means, one posterior
    /// draw for `BayesianBeta`.
    ///
    /// Running-mean variants never touch `rng`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::SampleAverage(m) | Self::Optimistic(m) => m.mean(),
            Self::BayesianBeta(p) => p.sample(rng),
        }
    }

    /// Deterministic summary of the belief: `Q`, or the posterior mean.
    pub fn point_estimate(&self) -> f64 {
        match self {
            Self::SampleAverage(m) | Self::Optimistic(m) => m.mean(),
            Self::BayesianBeta(p) => p.mean(),
        }
    }

    /// Number of `update` calls since construction.
    pub fn observations(&self) -> u64 {
        match self {
            Self::SampleAverage(m) | Self::Optimistic(m) => m.count(),
            Self::BayesianBeta(p) => p.trials(),
        }
    }

    /// Posterior density grid (`BayesianBeta` only).
    pub fn posterior(&self) -> Option<PosteriorGrid> {
        match self {
            Self::BayesianBeta(p) => Some(p.posterior()),
            _ => None,
        }
    }
}

fn beta_pdf(x: f64, a: f64, b: f64) -> f64 {
    if !(0.0..=1.0).contains(&x) {
        return 0.0;
    }
    let ln_norm = ln_beta(a, b);
    // Endpoints: the log form would evaluate 0 * ln(0).
    let edge = |shape: f64| -> f64 {
        if shape < 1.0 {
            f64::INFINITY
        } else if shape == 1.0 {
            (-ln_norm).exp()
        } else {
            0.0
        }
    };
    if x == 0.0 {
        return edge(a);
    }
    if x == 1.0 {
        return edge(b);
    }
    ((a - 1.0) * x.ln() + (b - 1.0) * (1.0 - x).ln() - ln_norm).exp()
}

fn ln_beta(a: f64, b: f64) -> f64 {
    ln_gamma(a) + ln_gamma(b) - ln_gamma(a + b)
}

/// Natural log of the gamma function (Lanczos, g = 7).
fn ln_gamma(x: f64) -> f64 {
    const COEFFS: [f64; 9] = [
        0.99999999999980993,
        676.5203681218851,
        -1259.1392167224028,
        771.32342877765313,
        -176.61502916214059,
        12.507343278686905,
        -0.13857109526572012,
        9.9843695780195716e-6,
        1.5056327351493116e-7,
    ];

    if x < 0.5 {
        let pi = std::f64::consts::PI;
        pi.ln() - (pi * x).sin().ln() - ln_gamma(1.0 - x)
    } else {
        let x = x - 1.0;
        let mut a = COEFFS[0];
        for (i, &c) in COEFFS.iter().enumerate().skip(1) {
            a += c / (x + i as f64);
        }
        let t = x + 7.5;
        let sqrt_2pi = (2.0 * std::f64::consts::PI).sqrt();
        (sqrt_2pi * a).ln() + (x + 0.5) * t.ln() - t
    }
}
