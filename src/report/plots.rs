//! Plot data for the diagnostic charts
//!
//! Each builder returns the points, fit lines, shaded regions and legend
//! text of one chart. Nothing is rendered here; a front end draws the
//! [`PlotData`] however it likes.

use serde::{Deserialize, Serialize};

use super::text;
use crate::types::{
    ConstantPressureAnalysis, ConstantRateAnalysis, MeasurementSeries, MultiRateAnalysis,
};

// ============================================================================
// Plot Primitives
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log10,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesStyle {
    /// Measured samples
    Markers,
    /// Fitted straight line
    Line,
    /// Samples joined in time order
    MarkersAndLine,
}

/// One named x/y data series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub name: String,
    pub style: SeriesStyle,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl PlotSeries {
    pub fn new(name: impl Into<String>, style: SeriesStyle) -> Self {
        Self {
            name: name.into(),
            style,
            x: Vec::new(),
            y: Vec::new(),
        }
    }

    #[must_use]
    pub fn data(mut self, x: Vec<f64>, y: Vec<f64>) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn point_count(&self) -> usize {
        self.x.len().min(self.y.len())
    }
}

/// Shaded x-interval marking a flow regime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpan {
    pub label: String,
    pub start: f64,
    pub end: f64,
}

/// Everything needed to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_scale: AxisScale,
    pub series: Vec<PlotSeries>,
    pub spans: Vec<RegionSpan>,
    /// Legend lines showing the calculated parameters
    pub legend: Vec<String>,
}

impl PlotData {
    fn new(title: &str, x_label: &str, y_label: &str, x_scale: AxisScale) -> Self {
        Self {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            x_scale,
            series: Vec::new(),
            spans: Vec::new(),
            legend: Vec::new(),
        }
    }
}

fn regime_spans(boundary_time: f64, end_time: f64) -> Vec<RegionSpan> {
    vec![
        RegionSpan {
            label: "Middle-time region".to_string(),
            start: 0.0,
            end: boundary_time,
        },
        RegionSpan {
            label: "Late-time region".to_string(),
            start: boundary_time,
            end: end_time,
        },
    ]
}

// ============================================================================
// Constant-Rate Drawdown
// ============================================================================

/// Cartesian pressure against time with the late-time line.
pub fn normal_plot(
    series: &MeasurementSeries,
    analysis: &ConstantRateAnalysis,
    precision: usize,
) -> PlotData {
    let mut plot = PlotData::new(
        "Normal Plot of BHFP vs Time",
        "Time (hours)",
        "Pressure (psia)",
        AxisScale::Linear,
    );
    let t = series.time().to_vec();
    let fit_y = t.iter().map(|&x| analysis.late_fit.evaluate(x)).collect();

    plot.series.push(
        PlotSeries::new("BHFP", SeriesStyle::Markers).data(t.clone(), series.value().to_vec()),
    );
    plot.series.push(PlotSeries::new("Late-time fit", SeriesStyle::Line).data(t, fit_y));
    plot.spans = regime_spans(analysis.boundary_time, series.last_time());
    plot.legend
        .push(text::end_of_middle_time_label(analysis.boundary_time, precision));
    plot
}

/// Pressure against log time with the middle-time line.
///
/// Samples at t = 0 have no place on a log axis and are left out.
pub fn semilog_plot(
    series: &MeasurementSeries,
    analysis: &ConstantRateAnalysis,
    precision: usize,
) -> PlotData {
    let mut plot = PlotData::new(
        "Semilog Plot of BHFP vs Time",
        "Time (hours)",
        "Pressure (psia)",
        AxisScale::Log10,
    );
    let (t, p): (Vec<f64>, Vec<f64>) = series
        .time()
        .iter()
        .zip(series.value())
        .filter(|(t, _)| **t > 0.0)
        .map(|(&t, &p)| (t, p))
        .unzip();
    let fit_y = t.iter().map(|x| analysis.early_fit.evaluate(x.ln())).collect();

    plot.series.push(PlotSeries::new("BHFP", SeriesStyle::Markers).data(t.clone(), p));
    plot.series.push(PlotSeries::new("Middle-time fit", SeriesStyle::Line).data(t, fit_y));
    plot.spans = regime_spans(analysis.boundary_time, series.last_time());
    plot.legend = vec![
        text::permeability_label(analysis.permeability_md, precision),
        text::skin_label(analysis.skin, precision),
        text::reservoir_size_label(analysis.reservoir_radius_ft, precision),
    ];
    plot
}

// ============================================================================
// Multi-Rate Drawdown
// ============================================================================

/// Measured pressure history.
pub fn pressure_profile_plot(series: &MeasurementSeries) -> PlotData {
    let mut plot = PlotData::new(
        "Pressure Profile from Well-Test Result",
        "Time (hours)",
        "Pressure (psi)",
        AxisScale::Linear,
    );
    plot.series.push(
        PlotSeries::new("BHFP", SeriesStyle::MarkersAndLine)
            .data(series.time().to_vec(), series.value().to_vec()),
    );
    plot
}

/// Active rate at each sample.
pub fn rate_profile_plot(analysis: &MultiRateAnalysis) -> PlotData {
    let mut plot = PlotData::new(
        "Rate Step Profile",
        "Time (hours)",
        "Rate (STB/D)",
        AxisScale::Linear,
    );
    let (t, q): (Vec<f64>, Vec<f64>) = analysis.points.iter().map(|p| (p.time, p.rate)).unzip();
    plot.series.push(PlotSeries::new("Rate", SeriesStyle::MarkersAndLine).data(t, q));
    plot
}

/// Normalized pressure drop against superposition time.
pub fn superposition_plot(analysis: &MultiRateAnalysis, precision: usize) -> PlotData {
    let mut plot = PlotData::new(
        "Drawdown Plot for Multi-Rate Flow",
        "Fp",
        "(pi - pwf) / qn (psi-D/STB)",
        AxisScale::Linear,
    );
    let (fp, drop): (Vec<f64>, Vec<f64>) = analysis
        .points
        .iter()
        .map(|p| (p.fp, p.normalized_drop))
        .unzip();
    let fit_y = fp.iter().map(|&x| analysis.fit.evaluate(x)).collect();

    plot.series.push(PlotSeries::new("Samples", SeriesStyle::Markers).data(fp.clone(), drop));
    plot.series.push(PlotSeries::new("Superposition fit", SeriesStyle::Line).data(fp, fit_y));
    plot.legend = vec![
        text::permeability_label(analysis.permeability_md, precision),
        text::skin_label(analysis.skin, precision),
    ];
    plot
}

// ============================================================================
// Constant-Pressure Test
// ============================================================================

/// Reciprocal rate against log time.
pub fn reciprocal_rate_plot(
    series: &MeasurementSeries,
    analysis: &ConstantPressureAnalysis,
    precision: usize,
) -> PlotData {
    let mut plot = PlotData::new(
        "Semilog Plot of Reciprocal Rate vs Time",
        "Time (hour)",
        "1/q (D/STB)",
        AxisScale::Log10,
    );
    let t = series.time().to_vec();
    let fit_y = analysis
        .log_time
        .iter()
        .map(|&x| analysis.fit.evaluate(x))
        .collect();

    plot.series.push(
        PlotSeries::new("1/q", SeriesStyle::Markers).data(t.clone(), analysis.reciprocal_rate.clone()),
    );
    plot.series.push(PlotSeries::new("Reciprocal-rate fit", SeriesStyle::Line).data(t, fit_y));
    plot.legend = vec![
        text::permeability_label(analysis.permeability_md, precision),
        text::skin_label(analysis.skin, precision),
    ];
    plot
}
