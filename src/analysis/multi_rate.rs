//! Multi-rate drawdown interpretation
//!
//! Maps every pressure sample onto (Fp, (p_i - p) / q_n), fits one line
//! through all of them, and converts slope and intercept into k and s.

use tracing::debug;

use crate::error::Result;
use crate::physics_engine::{fit_line, intercept_skin, multi_rate_permeability, superposition_transform};
use crate::types::{MeasurementSeries, MultiRateAnalysis, RateSchedule, ReservoirProperties};

/// Inputs for a multi-rate drawdown analysis.
#[derive(Debug, Clone, Copy)]
pub struct MultiRateInput<'a> {
    /// Bottom-hole flowing pressure (psia) against time (hr)
    pub series: &'a MeasurementSeries,
    pub schedule: &'a RateSchedule,
    pub properties: &'a ReservoirProperties,
}

/// Run the superposition analysis.
pub fn analyze_multi_rate(input: &MultiRateInput<'_>) -> Result<MultiRateAnalysis> {
    input.properties.validate()?;

    let points = superposition_transform(
        input.series,
        input.schedule,
        input.properties.initial_pressure_psia,
    )?;
    debug!(
        points = points.len(),
        steps = input.schedule.len(),
        "Computed superposition coordinates"
    );

    let fp: Vec<f64> = points.iter().map(|p| p.fp).collect();
    let drop: Vec<f64> = points.iter().map(|p| p.normalized_drop).collect();
    let fit = fit_line(&fp, &drop)?;
    debug!(slope = fit.slope, intercept = fit.intercept, "Fitted superposition line");

    let permeability_md = multi_rate_permeability(input.properties, fit.slope)?;
    let skin = intercept_skin(input.properties, permeability_md, fit.intercept, fit.slope)?;

    Ok(MultiRateAnalysis {
        permeability_md,
        skin,
        points,
        fit,
    })
}
