//! Synthetic well-test records generated from known reservoir parameters.
#![allow(dead_code)]

use welltest_analyzer::physics_engine::{
    superposition_time, PERMEABILITY_COEFFICIENT, PSS_RADIUS_COEFFICIENT, SKIN_COEFFICIENT,
    SKIN_OFFSET,
};
use welltest_analyzer::{MeasurementSeries, RateSchedule, ReservoirProperties};

pub const DRAWDOWN_RATE: f64 = 250.0;
pub const DRAWDOWN_BOUNDARY: usize = 20;
pub const FLOWING_PRESSURE: f64 = 3000.0;

pub fn props() -> ReservoirProperties {
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

/// Intercept of the semilog line `y = m * log10(t) + b` for (k, s).
fn semilog_intercept(p: &ReservoirProperties, m: f64, k: f64, s: f64) -> f64 {
    m * (p.diffusivity_group(k).log10() - SKIN_OFFSET + s / SKIN_COEFFICIENT)
}

/// Constant-rate drawdown: t = 0 sample, 20 semilog samples, 20 pseudo-steady samples.
pub fn constant_rate_series(k: f64, s: f64, re: f64) -> MeasurementSeries {
    let p = props();
    let q = DRAWDOWN_RATE;
    let m = PERMEABILITY_COEFFICIENT * q * p.formation_volume_factor * p.viscosity_cp
        / (k * p.thickness_ft);
    let b = semilog_intercept(&p, m, k, s);
    let semilog = |t: f64| p.initial_pressure_psia - (m * t.log10() + b);
    let m_late = -(PSS_RADIUS_COEFFICIENT * q * p.formation_volume_factor)
        / (p.porosity * p.thickness_ft * p.total_compressibility * re * re);

    let mut time = vec![0.0];
    time.extend((0..DRAWDOWN_BOUNDARY).map(|i| 10f64.powf(-1.0 + 0.1 * (i as f64 + 1.0))));
    let t_b = time[DRAWDOWN_BOUNDARY];
    time.extend((1..=20).map(|i| t_b + 5.0 * f64::from(i)));

    let p_b = semilog(t_b);
    let pressure = time
        .iter()
        .enumerate()
        .map(|(i, &t)| match i {
            0 => p.initial_pressure_psia,
            i if i <= DRAWDOWN_BOUNDARY => semilog(t),
            _ => p_b + m_late * (t - t_b),
        })
        .collect();
    MeasurementSeries::new(time, pressure).unwrap()
}

pub fn schedule() -> RateSchedule {
    RateSchedule::from_arrays(&[4.0, 10.0, 24.0], &[300.0, 200.0, 150.0]).unwrap()
}

/// Multi-rate drawdown lying exactly on the superposition line for (k, s).
pub fn multi_rate_series(k: f64, s: f64) -> MeasurementSeries {
    let p = props();
    let sched = schedule();
    let deltas = sched.rate_deltas();
    let m = PERMEABILITY_COEFFICIENT * p.formation_volume_factor * p.viscosity_cp
        / (k * p.thickness_ft);
    let b = semilog_intercept(&p, m, k, s);

    let time: Vec<f64> = (1..=60).map(|i| f64::from(i) * 0.5).collect();
    let pressure = time
        .iter()
        .map(|&t| {
            let j = sched.active_step(t).unwrap();
            let q = sched.steps()[j].rate;
            p.initial_pressure_psia - q * (m * superposition_time(&sched, &deltas, t, j) + b)
        })
        .collect();
    MeasurementSeries::new(time, pressure).unwrap()
}

/// Constant-pressure rate decline with 1/q linear in log10(t).
pub fn constant_pressure_series(k: f64, s: f64) -> MeasurementSeries {
    let p = props();
    let m = PERMEABILITY_COEFFICIENT * p.formation_volume_factor * p.viscosity_cp
        / (k * p.thickness_ft * (p.initial_pressure_psia - FLOWING_PRESSURE));
    let b = semilog_intercept(&p, m, k, s);

    let time: Vec<f64> = (0..30).map(|i| 10f64.powf(0.1 * f64::from(i))).collect();
    let rate = time.iter().map(|t| 1.0 / (m * t.log10() + b)).collect();
    MeasurementSeries::new(time, rate).unwrap()
}

/// Render a series as a headed two-column CSV.
pub fn to_csv(header: &str, series: &MeasurementSeries) -> String {
    let mut out = format!("{header}\n");
    for (t, v) in series.time().iter().zip(series.value()) {
        out.push_str(&format!("{t},{v}\n"));
    }
    out
}
