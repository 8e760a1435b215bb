//! Shared data structures for well-test interpretation
//!
//! - Inputs: MeasurementSeries, RateSchedule, ReservoirProperties
//! - Outputs: LinearFit, IndexRange and one analysis record per test type

mod reservoir;
mod results;
mod series;

pub use reservoir::*;
pub use results::*;
pub use series::*;
