//! Regression and interpretation result records
//!
//! Each record carries the fitted coefficients and transformed coordinates
//! alongside the derived reservoir parameters, so a presentation layer can
//! redraw every plot without recomputation.

use serde::{Deserialize, Serialize};

/// Ordinary least-squares fit `y = slope * x + intercept`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Coefficient of determination of the fit (1.0 for an exact line)
    pub r_squared: f64,
    pub sample_count: usize,
}

impl LinearFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Inclusive sample index range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexRange {
    pub start: usize,
    pub end: usize,
}

impl IndexRange {
    pub fn len(&self) -> usize {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }

    /// Borrow the covered part of a slice. A reversed range borrows nothing.
    pub fn slice<'a, T>(&self, values: &'a [T]) -> &'a [T] {
        if self.is_empty() {
            return &[];
        }
        &values[self.start..=self.end]
    }
}

// ============================================================================
// Constant-Rate Drawdown
// ============================================================================

/// Semilog (middle-time) and Cartesian (late-time) interpretation of a
/// constant-rate drawdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantRateAnalysis {
    pub permeability_md: f64,
    pub skin: f64,
    pub reservoir_radius_ft: f64,
    /// Semilog slope in psi per log cycle (`early_fit.slope * ln 10`)
    pub m_cycle: f64,
    /// Middle-time region, regressed against ln(t)
    pub early_region: IndexRange,
    /// Late-time region, regressed against t
    pub late_region: IndexRange,
    pub early_fit: LinearFit,
    pub late_fit: LinearFit,
    /// Time at the regime boundary sample (end of the middle-time region)
    pub boundary_time: f64,
}

// ============================================================================
// Multi-Rate Drawdown
// ============================================================================

/// One sample mapped onto the superposition plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SuperpositionPoint {
    /// Index of the sample in the measurement series
    pub index: usize,
    pub time: f64,
    /// Rate of the step active at `time` (STB/D)
    pub rate: f64,
    /// Superposition time coordinate Fp
    pub fp: f64,
    /// `(p_i - p) / q` in psi-D/STB
    pub normalized_drop: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiRateAnalysis {
    pub permeability_md: f64,
    pub skin: f64,
    pub points: Vec<SuperpositionPoint>,
    pub fit: LinearFit,
}

// ============================================================================
// Constant-Pressure Test
// ============================================================================

/// Reciprocal-rate semilog interpretation of a constant-pressure test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantPressureAnalysis {
    pub permeability_md: f64,
    pub skin: f64,
    /// log10(t) per sample
    pub log_time: Vec<f64>,
    /// 1/q per sample (D/STB)
    pub reciprocal_rate: Vec<f64>,
    pub fit: LinearFit,
}
