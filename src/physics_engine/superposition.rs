//! Superposition-time transform for variable-rate drawdowns
//!
//! For a sample at time t_i inside rate step j (0-indexed):
//!
//! Fp_i = Σ_{k=0..=j} log10(t_i - start_k) · Δq_k / q_j
//!
//! where start_k is the time step k began and Δq_k the rate increment it
//! introduced. The companion ordinate is (p_i - p) / q_j.
//!
//! Samples are independent, so the per-sample sums run on the rayon pool.
//! Each sum still accumulates in ascending k, so output is bit-identical to a
//! sequential pass.

use rayon::prelude::*;

use crate::error::{AnalysisError, Result};
use crate::types::{MeasurementSeries, RateSchedule, SuperpositionPoint};

/// Superposition coordinate for time `t` in active step `j`.
///
/// `deltas` must be `schedule.rate_deltas()`; it is passed in so callers
/// transforming many samples compute it once.
pub fn superposition_time(schedule: &RateSchedule, deltas: &[f64], t: f64, j: usize) -> f64 {
    let q_j = schedule.steps()[j].rate;
    let mut fp = 0.0;
    for (k, delta_q) in deltas.iter().enumerate().take(j + 1) {
        fp += (t - schedule.step_start(k)).log10() * (delta_q / q_j);
    }
    fp
}

/// Map every sample of a pressure series onto the superposition plot.
///
/// Fails with `EmptySchedule` for an empty schedule and `NoActiveStep` for the
/// first sample at or before t = 0 (no rate step covers it; the last step is
/// open ended so nothing is uncovered on the right).
pub fn superposition_transform(
    series: &MeasurementSeries,
    schedule: &RateSchedule,
    initial_pressure: f64,
) -> Result<Vec<SuperpositionPoint>> {
    if schedule.is_empty() {
        return Err(AnalysisError::EmptySchedule);
    }

    // Resolve active steps sequentially so the reported error is deterministic
    let active: Vec<usize> = series
        .time()
        .iter()
        .enumerate()
        .map(|(index, &time)| {
            schedule
                .active_step(time)
                .ok_or(AnalysisError::NoActiveStep { index, time })
        })
        .collect::<Result<_>>()?;

    let deltas = schedule.rate_deltas();
    let time = series.time();
    let pressure = series.value();

    let points = active
        .par_iter()
        .enumerate()
        .map(|(index, &j)| {
            let rate = schedule.steps()[j].rate;
            SuperpositionPoint {
                index,
                time: time[index],
                rate,
                fp: superposition_time(schedule, &deltas, time[index], j),
                normalized_drop: (initial_pressure - pressure[index]) / rate,
            }
        })
        .collect();

    Ok(points)
}
