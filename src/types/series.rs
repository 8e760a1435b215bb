//! Measurement series and rate schedule types

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

// ============================================================================
// Measurement Series
// ============================================================================

/// Ordered (time, value) samples from a well test.
///
/// `value` is bottom-hole flowing pressure (psia) for drawdown tests and
/// flow rate (STB/D) for constant-pressure tests. Time is in hours.
///
/// Invariants enforced at construction:
/// - `time.len() == value.len()`, non-empty
/// - every entry finite
/// - time non-negative and strictly increasing
///
/// Time zero is admitted because recorded tests usually start there;
/// log transforms reject non-positive times when they are applied.
/// Deserialization goes through [`MeasurementSeries::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSeries")]
pub struct MeasurementSeries {
    time: Vec<f64>,
    value: Vec<f64>,
}

/// Unchecked wire form of a [`MeasurementSeries`].
#[derive(Deserialize)]
struct RawSeries {
    time: Vec<f64>,
    value: Vec<f64>,
}

impl TryFrom<RawSeries> for MeasurementSeries {
    type Error = AnalysisError;

    fn try_from(raw: RawSeries) -> Result<Self> {
        Self::new(raw.time, raw.value)
    }
}

impl MeasurementSeries {
    pub fn new(time: Vec<f64>, value: Vec<f64>) -> Result<Self> {
        if time.len() != value.len() {
            return Err(AnalysisError::InputShape(format!(
                "time has {} samples but value has {}",
                time.len(),
                value.len()
            )));
        }
        if time.is_empty() {
            return Err(AnalysisError::InputShape(
                "measurement series is empty".to_string(),
            ));
        }

        for (i, (&t, &v)) in time.iter().zip(value.iter()).enumerate() {
            if !t.is_finite() || !v.is_finite() {
                return Err(AnalysisError::InputShape(format!(
                    "sample {i} is not finite (t={t}, value={v})"
                )));
            }
            if t < 0.0 {
                return Err(AnalysisError::InputShape(format!(
                    "sample {i} has negative time {t}"
                )));
            }
        }

        if let Some(i) = time.windows(2).position(|w| w[1] <= w[0]) {
            return Err(AnalysisError::InputShape(format!(
                "time must be strictly increasing (t[{}]={} >= t[{}]={})",
                i,
                time[i],
                i + 1,
                time[i + 1]
            )));
        }

        Ok(Self { time, value })
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Always false for a constructed series; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    pub fn last_time(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }
}

// ============================================================================
// Rate Schedule
// ============================================================================

/// One constant-rate period of a production history.
///
/// The step produces at `rate` (STB/D) until `time_change` (hours), at which
/// point the next step begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateStep {
    pub time_change: f64,
    pub rate: f64,
}

/// Piecewise-constant rate history starting from zero rate at t = 0.
///
/// Step `j` covers the half-open interval `(start_j, time_change_j]` with
/// `start_0 = 0` and `start_j = time_change_{j-1}`. The final step is open
/// ended: samples after its `time_change` still produce at its rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSchedule")]
pub struct RateSchedule {
    steps: Vec<RateStep>,
}

/// Unchecked wire form of a [`RateSchedule`].
#[derive(Deserialize)]
struct RawSchedule {
    steps: Vec<RateStep>,
}

impl TryFrom<RawSchedule> for RateSchedule {
    type Error = AnalysisError;

    fn try_from(raw: RawSchedule) -> Result<Self> {
        Self::new(raw.steps)
    }
}

impl RateSchedule {
    pub fn new(steps: Vec<RateStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(AnalysisError::EmptySchedule);
        }

        let mut prev_change = 0.0;
        for (step, s) in steps.iter().enumerate() {
            if !s.time_change.is_finite() {
                return Err(AnalysisError::MalformedSchedule {
                    step,
                    reason: format!("change time {} is not finite", s.time_change),
                });
            }
            if s.time_change <= prev_change {
                return Err(AnalysisError::MalformedSchedule {
                    step,
                    reason: format!(
                        "change time {} must be greater than {}",
                        s.time_change, prev_change
                    ),
                });
            }
            if !s.rate.is_finite() || s.rate == 0.0 {
                return Err(AnalysisError::MalformedSchedule {
                    step,
                    reason: format!("rate {} must be finite and non-zero", s.rate),
                });
            }
            prev_change = s.time_change;
        }

        Ok(Self { steps })
    }

    /// Build a schedule from parallel change-time and rate arrays.
    pub fn from_arrays(time_change: &[f64], rate: &[f64]) -> Result<Self> {
        if time_change.len() != rate.len() {
            return Err(AnalysisError::InputShape(format!(
                "schedule has {} change times but {} rates",
                time_change.len(),
                rate.len()
            )));
        }
        Self::new(
            time_change
                .iter()
                .zip(rate)
                .map(|(&time_change, &rate)| RateStep { time_change, rate })
                .collect(),
        )
    }

    pub fn steps(&self) -> &[RateStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Start time of step `j` (0 for the first step).
    pub fn step_start(&self, j: usize) -> f64 {
        if j == 0 {
            0.0
        } else {
            self.steps[j - 1].time_change
        }
    }

    /// Incremental rate changes: `Δq_0 = q_0`, `Δq_k = q_k - q_{k-1}`.
    pub fn rate_deltas(&self) -> Vec<f64> {
        let mut prev = 0.0;
        self.steps
            .iter()
            .map(|s| {
                let delta = s.rate - prev;
                prev = s.rate;
                delta
            })
            .collect()
    }

    /// Index of the step active at time `t`, or `None` when `t <= 0` or the
    /// schedule has no steps.
    ///
    /// A sample exactly on a change time belongs to the step that ends there.
    pub fn active_step(&self, t: f64) -> Option<usize> {
        if !(t > 0.0) {
            return None;
        }
        let last = self.steps.len().checked_sub(1)?;
        let j = self.steps.partition_point(|s| s.time_change < t);
        Some(j.min(last))
    }
}
