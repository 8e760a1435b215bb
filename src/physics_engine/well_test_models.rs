//! Semilog, superposition and reciprocal-rate interpretation formulas
//!
//! Field units throughout: q in STB/D, Bo in rb/STB, mu in cp, h and rw in
//! ft, ct in 1/psi, pressure in psia, time in hours, k in md.
//!
//! The numeric constants are the standard field-unit conversion factors of
//! radial-flow well-test theory and are fixed literals.

use crate::error::{AnalysisError, Result};
use crate::types::ReservoirProperties;

// ============================================================================
// Field-Unit Constants
// ============================================================================

/// Semilog permeability coefficient (md·ft·psi / (STB/D · rb/STB · cp))
pub const PERMEABILITY_COEFFICIENT: f64 = 162.6;

/// Skin multiplier (ln 10 / 2)
pub const SKIN_COEFFICIENT: f64 = 1.1513;

/// Skin offset: log10 of the field-unit diffusivity conversion and Euler term
pub const SKIN_OFFSET: f64 = 3.2275;

/// Pseudo-steady-state slope coefficient for the drainage radius (0.23395 / π)
pub const PSS_RADIUS_COEFFICIENT: f64 = 0.07447;

// ============================================================================
// Guards
// ============================================================================

fn require_physical_permeability(k: f64) -> Result<f64> {
    if k.is_finite() && k > 0.0 {
        Ok(k)
    } else {
        Err(AnalysisError::NonPhysicalResult(format!(
            "permeability {k} md is not positive and finite (check slope sign)"
        )))
    }
}

/// log10 of the diffusivity group, rejecting non-positive arguments.
fn log_diffusivity(k: f64, props: &ReservoirProperties) -> Result<f64> {
    let group = props.diffusivity_group(k);
    if group.is_finite() && group > 0.0 {
        Ok(group.log10())
    } else {
        Err(AnalysisError::NonPhysicalResult(format!(
            "log argument k/(poro·mu·ct·rw²) = {group} is not positive"
        )))
    }
}

fn require_finite_result(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalysisError::NonPhysicalResult(format!("{name} evaluated to {value}")))
    }
}

// ============================================================================
// Constant-Rate Drawdown
// ============================================================================

/// Permeability from the semilog slope of a constant-rate drawdown.
///
/// Formula: k = -162.6 · q · Bo · mu / (m_cycle · h)
///
/// `m_cycle` is in psi/cycle and negative for a declining pressure.
pub fn drawdown_permeability(rate: f64, props: &ReservoirProperties, m_cycle: f64) -> Result<f64> {
    let k = (-PERMEABILITY_COEFFICIENT * rate * props.formation_volume_factor * props.viscosity_cp)
        / (m_cycle * props.thickness_ft);
    require_physical_permeability(k)
}

/// Skin factor from the semilog line of a constant-rate drawdown.
///
/// Formula: s = 1.1513 · ((p_i − p_1hr) / (−m_cycle) − log10(k / (poro·mu·ct·rw²)) + 3.2275)
///
/// `intercept` is the semilog line at t = 1 hr (p_1hr).
pub fn drawdown_skin(
    props: &ReservoirProperties,
    permeability: f64,
    intercept: f64,
    m_cycle: f64,
) -> Result<f64> {
    let log_group = log_diffusivity(permeability, props)?;
    let s = SKIN_COEFFICIENT
        * (((props.initial_pressure_psia - intercept) / -m_cycle) - log_group + SKIN_OFFSET);
    require_finite_result("skin", s)
}

/// Drainage radius from the late-time Cartesian slope (psi/hr).
///
/// Formula: re = sqrt(−(0.07447 · q · Bo) / (poro · h · ct · m_late))
pub fn reservoir_radius(rate: f64, props: &ReservoirProperties, late_slope: f64) -> Result<f64> {
    let arg = -(PSS_RADIUS_COEFFICIENT * rate * props.formation_volume_factor)
        / (props.porosity * props.thickness_ft * props.total_compressibility * late_slope);
    if arg.is_finite() && arg > 0.0 {
        Ok(arg.sqrt())
    } else {
        Err(AnalysisError::NonPhysicalResult(format!(
            "reservoir size argument {arg} is not positive (late slope {late_slope} psi/hr must be negative)"
        )))
    }
}

// ============================================================================
// Multi-Rate Drawdown
// ============================================================================

/// Permeability from the superposition-plot slope (psi-D/STB per Fp unit).
///
/// Formula: k = 162.6 · Bo · mu / (m · h)
pub fn multi_rate_permeability(props: &ReservoirProperties, slope: f64) -> Result<f64> {
    let k = (PERMEABILITY_COEFFICIENT * props.formation_volume_factor * props.viscosity_cp)
        / (slope * props.thickness_ft);
    require_physical_permeability(k)
}

/// Skin factor shared by the superposition and reciprocal-rate plots.
///
/// Formula: s = 1.1513 · (b / m − log10(k / (poro·mu·ct·rw²)) + 3.2275)
pub fn intercept_skin(
    props: &ReservoirProperties,
    permeability: f64,
    intercept: f64,
    slope: f64,
) -> Result<f64> {
    let log_group = log_diffusivity(permeability, props)?;
    let s = SKIN_COEFFICIENT * ((intercept / slope) - log_group + SKIN_OFFSET);
    require_finite_result("skin", s)
}

// ============================================================================
// Constant-Pressure Test
// ============================================================================

/// Permeability from the slope of 1/q against log10(t).
///
/// Formula: k = 162.6 · Bo · mu / (m · h · (p_i − p_wf))
pub fn constant_pressure_permeability(
    props: &ReservoirProperties,
    slope: f64,
    flowing_pressure: f64,
) -> Result<f64> {
    let drawdown = props.initial_pressure_psia - flowing_pressure;
    let k = (PERMEABILITY_COEFFICIENT * props.formation_volume_factor * props.viscosity_cp)
        / (slope * props.thickness_ft * drawdown);
    require_physical_permeability(k)
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_drawdown_permeability_exact() {
        // -162.6 * 100 * 1.2 * 0.8 / (-50 * 50) = 6.24384
        let k = drawdown_permeability(100.0, &props(), -50.0).unwrap();
        let expected = -162.6 * 100.0 * 1.2 * 0.8 / (-50.0 * 50.0);
        assert_eq!(k, expected);
        assert!((k - 6.24384).abs() < 1e-9, "got {k}");
    }

    #[test]
    fn test_drawdown_permeability_positive_slope_is_non_physical() {
        let err = drawdown_permeability(100.0, &props(), 50.0).unwrap_err();
        assert!(matches!(err, AnalysisError::NonPhysicalResult(_)));
    }

    #[test]
    fn test_drawdown_permeability_zero_slope_is_non_physical() {
        assert!(drawdown_permeability(100.0, &props(), 0.0).is_err());
    }

    #[test]
    fn test_drawdown_skin_round_trip() {
        // Build p_1hr from s = 2 and check the formula returns it
        let p = props();
        let k = 10.0;
        let m = 78.048; // psi/cycle magnitude
        let log_group = p.diffusivity_group(k).log10();
        let p1hr = p.initial_pressure_psia - m * (log_group - SKIN_OFFSET + 2.0 / SKIN_COEFFICIENT);
        let s = drawdown_skin(&p, k, p1hr, -m).unwrap();
        assert!((s - 2.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_skin_rejects_non_positive_log_argument() {
        assert!(matches!(
            drawdown_skin(&props(), -1.0, 4500.0, -50.0),
            Err(AnalysisError::NonPhysicalResult(_))
        ));
        assert!(intercept_skin(&props(), 0.0, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_reservoir_radius_from_pss_slope() {
        let p = props();
        let q = 250.0;
        let re = 1000.0;
        let m_late = -(PSS_RADIUS_COEFFICIENT * q * p.formation_volume_factor)
            / (p.porosity * p.thickness_ft * p.total_compressibility * re * re);
        let got = reservoir_radius(q, &p, m_late).unwrap();
        assert!((got - re).abs() < 1e-9, "got {got}");
    }

    #[test]
    fn test_reservoir_radius_rising_pressure_is_non_physical() {
        assert!(reservoir_radius(250.0, &props(), 0.1).is_err());
        assert!(reservoir_radius(250.0, &props(), 0.0).is_err());
    }

    #[test]
    fn test_multi_rate_permeability() {
        let k = multi_rate_permeability(&props(), 0.3122).unwrap();
        let expected = 162.6 * 1.2 * 0.8 / (0.3122 * 50.0);
        assert_eq!(k, expected);
        assert!(multi_rate_permeability(&props(), -0.3122).is_err());
    }

    #[test]
    fn test_constant_pressure_permeability() {
        let k = constant_pressure_permeability(&props(), 1e-4, 3000.0).unwrap();
        let expected = 162.6 * 1.2 * 0.8 / (1e-4 * 50.0 * 2000.0);
        assert_eq!(k, expected);
        // Flowing pressure above initial pressure flips the sign
        assert!(constant_pressure_permeability(&props(), 1e-4, 6000.0).is_err());
    }

    #[test]
    fn test_intercept_skin_formula() {
        let p = props();
        let k = 10.0;
        let s = intercept_skin(&p, k, 2.0, 0.5).unwrap();
        let expected = 1.1513 * (2.0 / 0.5 - p.diffusivity_group(k).log10() + 3.2275);
        assert_eq!(s, expected);
    }
}
