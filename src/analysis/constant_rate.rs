//! Constant-rate drawdown interpretation
//!
//! 1. Segment at the caller's boundary index
//! 2. Middle-time region: p against ln(t) → semilog slope, p_1hr
//! 3. Late-time region: p against t → pseudo-steady-state slope
//! 4. k and s from the semilog line, re from the late slope

use tracing::debug;

use crate::analysis::segmenter::FlowRegimeSegmenter;
use crate::error::{require_positive, AnalysisError, Result};
use crate::physics_engine::{drawdown_permeability, drawdown_skin, fit_line, reservoir_radius};
use crate::types::{ConstantRateAnalysis, MeasurementSeries, ReservoirProperties};

/// Inputs for a constant-rate drawdown analysis.
#[derive(Debug, Clone, Copy)]
pub struct ConstantRateInput<'a> {
    /// Bottom-hole flowing pressure (psia) against time (hr)
    pub series: &'a MeasurementSeries,
    /// Constant production rate (STB/D)
    pub rate: f64,
    pub properties: &'a ReservoirProperties,
    /// Last index of the middle-time region; first index of the late region
    pub boundary_index: usize,
}

/// Run the semilog + Cartesian drawdown analysis.
pub fn analyze_constant_rate(input: &ConstantRateInput<'_>) -> Result<ConstantRateAnalysis> {
    require_positive("rate", input.rate)?;
    input.properties.validate()?;

    let series = input.series;
    let partition = FlowRegimeSegmenter::segment(series.len(), input.boundary_index)?;
    debug!(
        boundary = partition.boundary,
        early_points = partition.early.len(),
        late_points = partition.late.len(),
        "Segmented drawdown record"
    );

    // Middle-time semilog fit against natural-log time
    let early_t = partition.early.slice(series.time());
    if let Some(pos) = early_t.iter().position(|&t| t <= 0.0) {
        return Err(AnalysisError::InputShape(format!(
            "sample {} in the middle-time region has non-positive time {}",
            partition.early.start + pos,
            early_t[pos]
        )));
    }
    let ln_t: Vec<f64> = early_t.iter().map(|t| t.ln()).collect();
    let early_fit = fit_line(&ln_t, partition.early.slice(series.value()))?;

    // Late-time Cartesian fit
    let late_fit = fit_line(
        partition.late.slice(series.time()),
        partition.late.slice(series.value()),
    )?;

    let m_cycle = early_fit.slope * std::f64::consts::LN_10;
    debug!(
        m_cycle,
        p_1hr = early_fit.intercept,
        late_slope = late_fit.slope,
        "Fitted drawdown regions"
    );

    let permeability_md = drawdown_permeability(input.rate, input.properties, m_cycle)?;
    let skin = drawdown_skin(input.properties, permeability_md, early_fit.intercept, m_cycle)?;
    let reservoir_radius_ft = reservoir_radius(input.rate, input.properties, late_fit.slope)?;

    Ok(ConstantRateAnalysis {
        permeability_md,
        skin,
        reservoir_radius_ft,
        m_cycle,
        early_region: partition.early,
        late_region: partition.late,
        early_fit,
        late_fit,
        boundary_time: series.time()[partition.boundary],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics_engine::{PERMEABILITY_COEFFICIENT, PSS_RADIUS_COEFFICIENT, SKIN_COEFFICIENT, SKIN_OFFSET};

    const Q: f64 = 250.0;
    const BOUNDARY: usize = 20;

    fn props() -> ReservoirProperties {
        ReservoirProperties {
            formation_volume_factor: 1.2,
            viscosity_cp: 0.8,
            thickness_ft: 50.0,
            porosity: 0.2,
            total_compressibility: 1e-5,
            wellbore_radius_ft: 0.3,
            initial_pressure_psia: 5000.0,
        }
    }

    /// Semilog response up to the boundary, linear pseudo-steady decline after.
    fn synthetic(k: f64, s: f64, re: f64) -> MeasurementSeries {
        let p = props();
        let m = PERMEABILITY_COEFFICIENT * Q * p.formation_volume_factor * p.viscosity_cp
            / (k * p.thickness_ft);
        let log_group = p.diffusivity_group(k).log10();
        let semilog = |t: f64| {
            p.initial_pressure_psia
                - m * (t.log10() + log_group - SKIN_OFFSET + s / SKIN_COEFFICIENT)
        };
        let m_late = -(PSS_RADIUS_COEFFICIENT * Q * p.formation_volume_factor)
            / (p.porosity * p.thickness_ft * p.total_compressibility * re * re);

        let mut time = vec![0.0];
        time.extend((0..BOUNDARY).map(|i| 10f64.powf(-1.0 + 0.1 * (i as f64 + 1.0))));
        let t_b = time[BOUNDARY];
        time.extend((1..=20).map(|i| t_b + 5.0 * i as f64));

        let p_b = semilog(t_b);
        let pressure = time
            .iter()
            .enumerate()
            .map(|(i, &t)| match i {
                0 => p.initial_pressure_psia,
                i if i <= BOUNDARY => semilog(t),
                _ => p_b + m_late * (t - t_b),
            })
            .collect();
        MeasurementSeries::new(time, pressure).unwrap()
    }

    #[test]
    fn test_recovers_known_reservoir() {
        let series = synthetic(10.0, 2.0, 1000.0);
        let p = props();
        let result = analyze_constant_rate(&ConstantRateInput {
            series: &series,
            rate: Q,
            properties: &p,
            boundary_index: BOUNDARY,
        })
        .unwrap();

        assert!((result.permeability_md - 10.0).abs() / 10.0 < 1e-6, "k={}", result.permeability_md);
        assert!((result.skin - 2.0).abs() / 2.0 < 1e-3, "s={}", result.skin);
        assert!(
            (result.reservoir_radius_ft - 1000.0).abs() / 1000.0 < 1e-6,
            "re={}",
            result.reservoir_radius_ft
        );
        assert_eq!(result.early_region.len(), BOUNDARY);
        assert_eq!(result.boundary_time, series.time()[BOUNDARY]);
        assert!(result.m_cycle < 0.0);
    }

    #[test]
    fn test_invalid_boundary_propagates() {
        let series = synthetic(10.0, 2.0, 1000.0);
        let p = props();
        let err = analyze_constant_rate(&ConstantRateInput {
            series: &series,
            rate: Q,
            properties: &p,
            boundary_index: series.len(),
        })
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidBoundary { .. }));
    }

    #[test]
    fn test_zero_rate_rejected() {
        let series = synthetic(10.0, 2.0, 1000.0);
        let p = props();
        let err = analyze_constant_rate(&ConstantRateInput {
            series: &series,
            rate: 0.0,
            properties: &p,
            boundary_index: BOUNDARY,
        })
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConstant { name: "rate", .. }));
    }

    #[test]
    fn test_rising_late_pressure_is_non_physical() {
        let time: Vec<f64> = (1..=10).map(f64::from).collect();
        let mut pressure: Vec<f64> = time.iter().map(|t| 4800.0 - 30.0 * t.ln()).collect();
        for (i, p) in pressure.iter_mut().enumerate().skip(5) {
            *p += 10.0 * i as f64;
        }
        let series = MeasurementSeries::new(time, pressure).unwrap();
        let p = props();
        let err = analyze_constant_rate(&ConstantRateInput {
            series: &series,
            rate: Q,
            properties: &p,
            boundary_index: 5,
        })
        .unwrap_err();
        assert!(matches!(err, AnalysisError::NonPhysicalResult(_)));
    }
}
