//! Well-Test Analyzer: pressure transient interpretation
//!
//! Estimates permeability, skin factor and drainage radius from well-test
//! records.
//!
//! ## Architecture
//!
//! - **Physics Engine**: least-squares regression, superposition time,
//!   field-unit estimator formulas
//! - **Analysis**: one stateless orchestrator per test type
//!   (constant-rate drawdown, multi-rate drawdown, constant-pressure)
//! - **Report**: text, JSON and chart data built from result records
//! - **Config / Loader**: TOML reservoir constants and CSV data, used by the
//!   `welltest` binary; the analysis core never reads files

pub mod analysis;
pub mod config;
pub mod error;
pub mod loader;
pub mod physics_engine;
pub mod report;
pub mod types;

// Re-export configuration
pub use config::WellTestConfig;

// Re-export the error type
pub use error::{AnalysisError, Result};

// Re-export orchestrators
pub use analysis::{
    analyze_constant_pressure, analyze_constant_rate, analyze_multi_rate, ConstantPressureInput,
    ConstantRateInput, MultiRateInput,
};

// Re-export commonly used types
pub use types::{
    ConstantPressureAnalysis, ConstantRateAnalysis, IndexRange, LinearFit, MeasurementSeries,
    MultiRateAnalysis, RateSchedule, RateStep, ReservoirProperties, SuperpositionPoint,
};

pub use report::AnalysisReport;
