//! Analysis Orchestrators
//!
//! One stateless pipeline per test type:
//! validate → segment / transform → regress → estimate → result record.
//!
//! ## Architecture
//! - `segmenter`: middle-time / late-time split at a caller-supplied index
//! - `constant_rate`: semilog + Cartesian drawdown analysis (k, s, re)
//! - `constant_pressure`: reciprocal-rate semilog analysis (k, s)
//! - `multi_rate`: superposition analysis of a rate history (k, s)
//!
//! Calls share no state: identical inputs give bit-identical outputs.

pub mod constant_pressure;
pub mod constant_rate;
pub mod multi_rate;
pub mod segmenter;

pub use constant_pressure::{analyze_constant_pressure, ConstantPressureInput};
pub use constant_rate::{analyze_constant_rate, ConstantRateInput};
pub use multi_rate::{analyze_multi_rate, MultiRateInput};
pub use segmenter::{FlowRegimeSegmenter, RegimePartition, MIN_REGION_POINTS};
