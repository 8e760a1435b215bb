//! Error taxonomy for the interpretation pipeline
//!
//! Every failure is detected at the point of violation and surfaced to the
//! caller unchanged. Nothing is clamped, defaulted, or retried.

use thiserror::Error;

/// Errors raised by segmentation, transforms, regression and estimators.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Mismatched, empty, unordered or non-finite input arrays.
    #[error("Input shape error: {0}")]
    InputShape(String),

    /// Regime boundary outside `[1, n-1]` or leaving a region with < 2 points.
    #[error("Invalid regime boundary {boundary} for series of length {len}: {reason}")]
    InvalidBoundary {
        boundary: usize,
        len: usize,
        reason: String,
    },

    /// Regression input with zero x-variance, unequal lengths or < 2 points.
    #[error("Degenerate regression input: {0}")]
    DegenerateInput(String),

    #[error("Rate schedule is empty")]
    EmptySchedule,

    /// Change times not strictly increasing, or a zero / non-finite rate.
    #[error("Malformed rate schedule at step {step}: {reason}")]
    MalformedSchedule { step: usize, reason: String },

    #[error("No active rate step for sample {index} at t={time} hr")]
    NoActiveStep { index: usize, time: f64 },

    /// Negative permeability, invalid log argument, or NaN result.
    #[error("Non-physical result: {0}")]
    NonPhysicalResult(String),

    /// A physical constant that is not finite or outside its admissible range.
    #[error("Invalid physical constant {name} = {value}: {reason}")]
    InvalidConstant {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Check that a physical constant is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(AnalysisError::InvalidConstant {
            name,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(AnalysisError::InvalidConstant {
            name,
            value,
            reason: "must be strictly positive",
        });
    }
    Ok(())
}

/// Check that a value is finite (sign unconstrained).
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(AnalysisError::InvalidConstant {
            name,
            value,
            reason: "must be finite",
        })
    }
}
