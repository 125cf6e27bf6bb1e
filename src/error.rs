//! Failure and warning types surfaced by the estimator.

use std::fmt;

/// Hard failure raised when a required-positive ratio or divisor is unusable.
///
/// Arithmetic edge cases such as a sun below the horizon never produce this
/// error; they are absorbed by the model with explicit floors.
#[derive(Debug, Clone, PartialEq)]
pub enum SizingError {
    /// A ratio or divisor that must be strictly positive and finite was not.
    ///
    /// A zero `capacity_factor` lands here as the division-by-zero case.
    InvalidRatio {
        /// Name of the offending parameter (e.g. `"capacity_factor"`).
        name: &'static str,
        /// Value that was rejected.
        value: f64,
    },
}

impl SizingError {
    /// Returns `Ok(value)` when it is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidRatio`] naming `name` otherwise.
    pub fn require_positive(name: &'static str, value: f64) -> Result<f64, Self> {
        if value.is_finite() && value > 0.0 {
            Ok(value)
        } else {
            Err(Self::InvalidRatio { name, value })
        }
    }
}

impl fmt::Display for SizingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRatio { name, value } if *value == 0.0 => {
                write!(f, "invalid ratio: {name} is zero (division by zero)")
            }
            Self::InvalidRatio { name, value } => {
                write!(f, "invalid ratio: {name} must be > 0, got {value}")
            }
        }
    }
}

impl std::error::Error for SizingError {}

/// Soft warning for an input outside its documented plausible band.
///
/// Computation still proceeds; the caller decides how to display it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlausibilityWarning {
    /// Dotted field path (e.g. `"load.pue"`).
    pub field: &'static str,
    /// Value supplied by the caller.
    pub value: f64,
    /// Lower bound of the plausible band (inclusive).
    pub min: f64,
    /// Upper bound of the plausible band (inclusive).
    pub max: f64,
}

impl PlausibilityWarning {
    /// Checks `value` against `[min, max]`, returning a warning when outside.
    pub fn check(field: &'static str, value: f64, min: f64, max: f64) -> Option<Self> {
        if (min..=max).contains(&value) {
            None
        } else {
            Some(Self {
                field,
                value,
                min,
                max,
            })
        }
    }
}

impl fmt::Display for PlausibilityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "implausible input: {} = {} is outside [{}, {}]",
            self.field, self.value, self.min, self.max
        )
    }
}
