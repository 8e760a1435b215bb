//! Ordinary least-squares line fitting
//!
//! Closed-form normal equations on mean-centred sums:
//!
//! slope = Σ(x - x̄)(y - ȳ) / Σ(x - x̄)²,  intercept = ȳ - slope·x̄

use crate::error::{AnalysisError, Result};
use crate::types::LinearFit;

/// Fit `y = slope * x + intercept` by least squares.
///
/// Fails with `DegenerateInput` when the slices differ in length, hold fewer
/// than two points, contain non-finite values, or when every x is identical.
pub fn fit_line(x: &[f64], y: &[f64]) -> Result<LinearFit> {
    if x.len() != y.len() {
        return Err(AnalysisError::DegenerateInput(format!(
            "x has {} values but y has {}",
            x.len(),
            y.len()
        )));
    }
    if x.len() < 2 {
        return Err(AnalysisError::DegenerateInput(format!(
            "need at least 2 points, got {}",
            x.len()
        )));
    }
    if let Some(i) = x
        .iter()
        .zip(y)
        .position(|(a, b)| !a.is_finite() || !b.is_finite())
    {
        return Err(AnalysisError::DegenerateInput(format!(
            "point {i} is not finite (x={}, y={})",
            x[i], y[i]
        )));
    }
    if x.iter().all(|&v| v == x[0]) {
        return Err(AnalysisError::DegenerateInput(format!(
            "x has zero variance (all values = {})",
            x[0]
        )));
    }

    let n = x.len() as f64;
    let x_mean = x.iter().sum::<f64>() / n;
    let y_mean = y.iter().sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut ss_tot = 0.0;
    for (&xi, &yi) in x.iter().zip(y) {
        let dx = xi - x_mean;
        let dy = yi - y_mean;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        ss_tot += dy * dy;
    }

    if !(sum_xx > 0.0) || !sum_xx.is_finite() {
        return Err(AnalysisError::DegenerateInput(format!(
            "x variance is not usable (Σ(x - x̄)² = {sum_xx})"
        )));
    }

    let slope = sum_xy / sum_xx;
    let intercept = y_mean - slope * x_mean;

    let ss_res: f64 = x
        .iter()
        .zip(y)
        .map(|(&xi, &yi)| {
            let r = yi - (slope * xi + intercept);
            r * r
        })
        .sum();

    // A flat y is fitted exactly by a horizontal line
    let r_squared = if ss_tot > 0.0 {
        (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
    } else {
        1.0
    };

    Ok(LinearFit {
        slope,
        intercept,
        r_squared,
        sample_count: x.len(),
    })
}
