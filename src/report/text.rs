//! Plain-text rendering of analysis results

use std::fmt::Write;

use crate::types::{ConstantPressureAnalysis, ConstantRateAnalysis, LinearFit, MultiRateAnalysis};

pub fn permeability_label(k: f64, precision: usize) -> String {
    format!("Calc. Permeability = {k:.precision$} md")
}

pub fn skin_label(s: f64, precision: usize) -> String {
    format!("Calc. Skin Factor = {s:.precision$}")
}

pub fn reservoir_size_label(re: f64, precision: usize) -> String {
    format!("Calc. Reservoir Size = {re:.precision$} ft")
}

pub fn end_of_middle_time_label(t: f64, precision: usize) -> String {
    format!("End Time of ETR = {t:.precision$} hours")
}

fn fit_line(out: &mut String, name: &str, fit: &LinearFit, precision: usize) {
    // Writing to a String cannot fail
    let _ = writeln!(
        out,
        "  {name}: slope = {:.precision$}, intercept = {:.precision$}, r² = {:.4} ({} points)",
        fit.slope, fit.intercept, fit.r_squared, fit.sample_count
    );
}

pub fn constant_rate(analysis: &ConstantRateAnalysis, precision: usize) -> String {
    let mut out = String::from("Constant-rate drawdown analysis\n");
    for line in [
        permeability_label(analysis.permeability_md, precision),
        skin_label(analysis.skin, precision),
        reservoir_size_label(analysis.reservoir_radius_ft, precision),
        end_of_middle_time_label(analysis.boundary_time, precision),
    ] {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "  Semilog slope = {:.precision$} psi/cycle",
        analysis.m_cycle
    );
    fit_line(&mut out, "Middle-time fit (p vs ln t)", &analysis.early_fit, precision);
    fit_line(&mut out, "Late-time fit (p vs t)", &analysis.late_fit, precision);
    out
}

pub fn multi_rate(analysis: &MultiRateAnalysis, precision: usize) -> String {
    let mut out = String::from("Multi-rate drawdown analysis\n");
    for line in [
        permeability_label(analysis.permeability_md, precision),
        skin_label(analysis.skin, precision),
    ] {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    fit_line(&mut out, "Superposition fit", &analysis.fit, precision);
    out
}

pub fn constant_pressure(analysis: &ConstantPressureAnalysis, precision: usize) -> String {
    let mut out = String::from("Constant-pressure analysis\n");
    for line in [
        permeability_label(analysis.permeability_md, precision),
        skin_label(analysis.skin, precision),
    ] {
        out.push_str("  ");
        out.push_str(&line);
        out.push('\n');
    }
    fit_line(&mut out, "Reciprocal-rate fit (1/q vs log t)", &analysis.fit, precision);
    out
}
