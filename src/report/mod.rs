//! Presentation layer
//!
//! Turns result records into text, JSON and chart data. The analysis
//! modules never call into here.

pub mod plots;
pub mod text;

use serde::{Deserialize, Serialize};

use crate::types::{
    ConstantPressureAnalysis, ConstantRateAnalysis, MeasurementSeries, MultiRateAnalysis,
};

pub use plots::{AxisScale, PlotData, PlotSeries, RegionSpan, SeriesStyle};

/// Default number of decimals in legend and report values.
pub const DEFAULT_PRECISION: usize = 3;

/// Result of any of the three analyses, tagged with the test type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum AnalysisReport {
    ConstantRate(ConstantRateAnalysis),
    MultiRate(MultiRateAnalysis),
    ConstantPressure(ConstantPressureAnalysis),
}

impl AnalysisReport {
    pub fn permeability_md(&self) -> f64 {
        match self {
            Self::ConstantRate(a) => a.permeability_md,
            Self::MultiRate(a) => a.permeability_md,
            Self::ConstantPressure(a) => a.permeability_md,
        }
    }

    pub fn skin(&self) -> f64 {
        match self {
            Self::ConstantRate(a) => a.skin,
            Self::MultiRate(a) => a.skin,
            Self::ConstantPressure(a) => a.skin,
        }
    }

    /// Human-readable summary with values rounded to `precision` decimals.
    pub fn to_text(&self, precision: usize) -> String {
        match self {
            Self::ConstantRate(a) => text::constant_rate(a, precision),
            Self::MultiRate(a) => text::multi_rate(a, precision),
            Self::ConstantPressure(a) => text::constant_pressure(a, precision),
        }
    }

    /// Full-precision JSON of the result record.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Chart data for the analysed `series`.
    pub fn plots(&self, series: &MeasurementSeries, precision: usize) -> Vec<PlotData> {
        match self {
            Self::ConstantRate(a) => vec![
                plots::normal_plot(series, a, precision),
                plots::semilog_plot(series, a, precision),
            ],
            Self::MultiRate(a) => vec![
                plots::pressure_profile_plot(series),
                plots::rate_profile_plot(a),
                plots::superposition_plot(a, precision),
            ],
            Self::ConstantPressure(a) => vec![plots::reciprocal_rate_plot(series, a, precision)],
        }
    }
}

impl From<ConstantRateAnalysis> for AnalysisReport {
    fn from(a: ConstantRateAnalysis) -> Self {
        Self::ConstantRate(a)
    }
}

impl From<MultiRateAnalysis> for AnalysisReport {
    fn from(a: MultiRateAnalysis) -> Self {
        Self::MultiRate(a)
    }
}

impl From<ConstantPressureAnalysis> for AnalysisReport {
    fn from(a: ConstantPressureAnalysis) -> Self {
        Self::ConstantPressure(a)
    }
}
