//! Constant-pressure (rate decline) interpretation
//!
//! Fits 1/q against log10(t) over the whole record.

use tracing::debug;

use crate::error::{require_finite, AnalysisError, Result};
use crate::physics_engine::{constant_pressure_permeability, fit_line, intercept_skin};
use crate::types::{ConstantPressureAnalysis, MeasurementSeries, ReservoirProperties};

/// Inputs for a constant-pressure analysis.
#[derive(Debug, Clone, Copy)]
pub struct ConstantPressureInput<'a> {
    /// Flow rate (STB/D) against time (hr)
    pub series: &'a MeasurementSeries,
    /// Constant bottom-hole flowing pressure (psia)
    pub flowing_pressure: f64,
    pub properties: &'a ReservoirProperties,
}

/// Run the reciprocal-rate semilog analysis.
pub fn analyze_constant_pressure(
    input: &ConstantPressureInput<'_>,
) -> Result<ConstantPressureAnalysis> {
    input.properties.validate()?;
    require_finite("flowing_pressure", input.flowing_pressure)?;
    if input.flowing_pressure >= input.properties.initial_pressure_psia {
        return Err(AnalysisError::InvalidConstant {
            name: "flowing_pressure",
            value: input.flowing_pressure,
            reason: "must be below the initial pressure",
        });
    }

    let series = input.series;
    for (i, (&t, &q)) in series.time().iter().zip(series.value()).enumerate() {
        if t <= 0.0 {
            return Err(AnalysisError::InputShape(format!(
                "sample {i} has non-positive time {t}"
            )));
        }
        if q <= 0.0 {
            return Err(AnalysisError::InputShape(format!(
                "sample {i} has non-positive rate {q}"
            )));
        }
    }

    let log_time: Vec<f64> = series.time().iter().map(|t| t.log10()).collect();
    let reciprocal_rate: Vec<f64> = series.value().iter().map(|q| 1.0 / q).collect();
    let fit = fit_line(&log_time, &reciprocal_rate)?;
    debug!(slope = fit.slope, intercept = fit.intercept, "Fitted reciprocal-rate line");

    let permeability_md =
        constant_pressure_permeability(input.properties, fit.slope, input.flowing_pressure)?;
    let skin = intercept_skin(input.properties, permeability_md, fit.intercept, fit.slope)?;

    Ok(ConstantPressureAnalysis {
        permeability_md,
        skin,
        log_time,
        reciprocal_rate,
        fit,
    })
}
