//! Error type for construction and configuration boundaries.
//!
//! Only constructors and config validation can fail. Once a model, estimator or
//! simulation exists, `draw`/`update`/`sample`/`step` are total.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A parameter is outside its documented contract.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    /// A simulation needs at least one bandit to select from.
    #[error("simulation requires at least one bandit")]
    NoArms,
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Reject non-finite values.
pub(crate) fn ensure_finite(name: &'static str, x: f64) -> Result<f64> {
    if x.is_finite() {
        Ok(x)
    } else {
        Err(Error::invalid(name, format!("must be finite, got {x}")))
    }
}

/// Reject values that are not finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, x: f64) -> Result<f64> {
    if x.is_finite() && x > 0.0 {
        Ok(x)
    } else {
        Err(Error::invalid(name, format!("must be finite and > 0, got {x}")))
    }
}
