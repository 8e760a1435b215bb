//! Pipeline Regression Tests
//!
//! Runs each orchestrator end to end on synthetic records generated from
//! known reservoir parameters and asserts that the parameters come back.
//! Also checks that repeated calls are bit-identical (no hidden state).

mod common;

use common::{
    constant_pressure_series, constant_rate_series, multi_rate_series, props, schedule,
    DRAWDOWN_BOUNDARY, DRAWDOWN_RATE, FLOWING_PRESSURE,
};
use welltest_analyzer::physics_engine::drawdown_permeability;
use welltest_analyzer::{
    analyze_constant_pressure, analyze_constant_rate, analyze_multi_rate, AnalysisError,
    AnalysisReport, ConstantPressureInput, ConstantRateInput, MeasurementSeries, MultiRateInput,
    RateSchedule,
};

fn relative_error(actual: f64, expected: f64) -> f64 {
    ((actual - expected) / expected).abs()
}

// ============================================================================
// Constant-Rate Drawdown
// ============================================================================

#[test]
fn constant_rate_recovers_k_s_re_within_one_percent() {
    let series = constant_rate_series(10.0, 2.0, 1000.0);
    let p = props();
    let result = analyze_constant_rate(&ConstantRateInput {
        series: &series,
        rate: DRAWDOWN_RATE,
        properties: &p,
        boundary_index: DRAWDOWN_BOUNDARY,
    })
    .expect("Analysis should succeed on clean synthetic data");

    assert!(
        relative_error(result.permeability_md, 10.0) < 0.01,
        "k should be ~10 md, got {}",
        result.permeability_md
    );
    assert!(
        relative_error(result.skin, 2.0) < 0.01,
        "s should be ~2, got {}",
        result.skin
    );
    assert!(
        relative_error(result.reservoir_radius_ft, 1000.0) < 0.01,
        "re should be ~1000 ft, got {}",
        result.reservoir_radius_ft
    );
    assert_eq!(result.early_region.start, 1, "Sample 0 is not part of the middle-time fit");
    assert_eq!(result.early_region.end, DRAWDOWN_BOUNDARY);
    assert_eq!(result.late_region.start, DRAWDOWN_BOUNDARY);
    assert_eq!(result.late_region.end, series.len() - 1);
}

#[test]
fn constant_rate_honors_caller_boundary() {
    let series = constant_rate_series(10.0, 2.0, 1000.0);
    let p = props();
    let analyze = |boundary_index| {
        analyze_constant_rate(&ConstantRateInput {
            series: &series,
            rate: DRAWDOWN_RATE,
            properties: &p,
            boundary_index,
        })
    };

    let at_20 = analyze(20).unwrap();
    let at_10 = analyze(10).unwrap();
    assert_eq!(at_10.early_region.end, 10);
    assert_eq!(at_10.late_region.start, 10);
    assert_ne!(
        at_10.late_fit, at_20.late_fit,
        "A different boundary must change the late-region fit"
    );
}

#[test]
fn permeability_reference_value() {
    let k = drawdown_permeability(100.0, &props(), -50.0).unwrap();
    // -162.6 * 100 * 1.2 * 0.8 / (-50 * 50)
    assert!((k - 6.243_84).abs() < 1e-9, "k = {k}");
}

// ============================================================================
// Multi-Rate Drawdown
// ============================================================================

#[test]
fn multi_rate_recovers_k_and_s() {
    let series = multi_rate_series(25.0, -1.5);
    let p = props();
    let sched = schedule();
    let result = analyze_multi_rate(&MultiRateInput {
        series: &series,
        schedule: &sched,
        properties: &p,
    })
    .expect("Analysis should succeed on clean synthetic data");

    assert!(relative_error(result.permeability_md, 25.0) < 1e-6, "k = {}", result.permeability_md);
    assert!((result.skin + 1.5).abs() < 1e-4, "s = {}", result.skin);
    assert_eq!(result.points.len(), series.len());
}

#[test]
fn single_step_schedule_matches_semilog_coordinate() {
    let time: Vec<f64> = (1..=20).map(f64::from).collect();
    let pressure = time.iter().map(|t| 4950.0 - 20.0 * t.log10()).collect();
    let series = MeasurementSeries::new(time, pressure).unwrap();
    let p = props();
    let sched = RateSchedule::from_arrays(&[100.0], &[250.0]).unwrap();
    let result = analyze_multi_rate(&MultiRateInput {
        series: &series,
        schedule: &sched,
        properties: &p,
    })
    .unwrap();

    for point in &result.points {
        assert_eq!(point.fp, point.time.log10(), "Fp at t={}", point.time);
        assert_eq!(point.rate, 250.0);
    }
}

#[test]
fn multi_rate_empty_schedule_rejected() {
    assert_eq!(
        RateSchedule::from_arrays(&[], &[]).unwrap_err(),
        AnalysisError::EmptySchedule
    );
}

#[test]
fn deserialized_inputs_are_validated() {
    let series = serde_json::from_str::<MeasurementSeries>(r#"{"time":[1,2,3,4],"value":[4900]}"#);
    assert!(series.is_err(), "Mismatched lengths must not deserialize");

    let sched = serde_json::from_str::<RateSchedule>(r#"{"steps":[]}"#);
    assert!(sched.is_err(), "An empty schedule must not deserialize");
}

// ============================================================================
// Constant-Pressure Test
// ============================================================================

#[test]
fn constant_pressure_recovers_k_and_s() {
    let series = constant_pressure_series(40.0, 3.0);
    let p = props();
    let result = analyze_constant_pressure(&ConstantPressureInput {
        series: &series,
        flowing_pressure: FLOWING_PRESSURE,
        properties: &p,
    })
    .expect("Analysis should succeed on clean synthetic data");

    assert!(relative_error(result.permeability_md, 40.0) < 1e-6, "k = {}", result.permeability_md);
    assert!((result.skin - 3.0).abs() < 1e-4, "s = {}", result.skin);
    assert_eq!(result.reciprocal_rate.len(), series.len());
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn repeated_calls_are_bit_identical() {
    let p = props();

    let cr_series = constant_rate_series(10.0, 2.0, 1000.0);
    let cr_input = ConstantRateInput {
        series: &cr_series,
        rate: DRAWDOWN_RATE,
        properties: &p,
        boundary_index: DRAWDOWN_BOUNDARY,
    };
    let first = analyze_constant_rate(&cr_input).unwrap();
    let second = analyze_constant_rate(&cr_input).unwrap();
    assert_eq!(first.permeability_md.to_bits(), second.permeability_md.to_bits());
    assert_eq!(first.skin.to_bits(), second.skin.to_bits());
    assert_eq!(first.reservoir_radius_ft.to_bits(), second.reservoir_radius_ft.to_bits());

    let mr_series = multi_rate_series(25.0, -1.5);
    let sched = schedule();
    let mr_input = MultiRateInput {
        series: &mr_series,
        schedule: &sched,
        properties: &p,
    };
    let first = analyze_multi_rate(&mr_input).unwrap();
    let second = analyze_multi_rate(&mr_input).unwrap();
    for (a, b) in first.points.iter().zip(&second.points) {
        assert_eq!(a.fp.to_bits(), b.fp.to_bits(), "Fp differs at sample {}", a.index);
    }
    assert_eq!(first.permeability_md.to_bits(), second.permeability_md.to_bits());
    assert_eq!(first.skin.to_bits(), second.skin.to_bits());

    let cp_series = constant_pressure_series(40.0, 3.0);
    let cp_input = ConstantPressureInput {
        series: &cp_series,
        flowing_pressure: FLOWING_PRESSURE,
        properties: &p,
    };
    let first = analyze_constant_pressure(&cp_input).unwrap();
    let second = analyze_constant_pressure(&cp_input).unwrap();
    assert_eq!(first.permeability_md.to_bits(), second.permeability_md.to_bits());
    assert_eq!(first.skin.to_bits(), second.skin.to_bits());
}

// ============================================================================
// Reporting
// ============================================================================

#[test]
fn drawdown_report_carries_legend_labels() {
    let series = constant_rate_series(10.0, 2.0, 1000.0);
    let p = props();
    let report = AnalysisReport::from(
        analyze_constant_rate(&ConstantRateInput {
            series: &series,
            rate: DRAWDOWN_RATE,
            properties: &p,
            boundary_index: DRAWDOWN_BOUNDARY,
        })
        .unwrap(),
    );

    let text = report.to_text(3);
    assert!(text.contains("Calc. Permeability = 10.000 md"), "{text}");
    assert!(text.contains("Calc. Reservoir Size = 1000.000 ft"), "{text}");
    assert!(text.contains("End Time of ETR = 10.000 hours"), "{text}");

    let plots = report.plots(&series, 3);
    assert_eq!(plots.len(), 2, "Normal and semilog plots");
    assert_eq!(plots[0].series[0].point_count(), series.len());
    assert_eq!(plots[1].series[0].point_count(), series.len() - 1, "t = 0 is off the log axis");
}
