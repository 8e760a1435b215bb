//! Physics Engine Module
//!
//! Deterministic well-test calculations. Everything here is a pure function
//! of its arguments: no configuration lookups, no I/O, no hidden state.
//!
//! - `regression`: least-squares line fitting
//! - `superposition`: superposition-time transform for variable-rate histories
//! - `well_test_models`: permeability, skin and drainage-radius formulas

pub mod regression;
pub mod superposition;
pub mod well_test_models;

pub use regression::fit_line;
pub use superposition::{superposition_time, superposition_transform};
pub use well_test_models::{
    constant_pressure_permeability, drawdown_permeability, drawdown_skin, intercept_skin,
    multi_rate_permeability, reservoir_radius, PERMEABILITY_COEFFICIENT, PSS_RADIUS_COEFFICIENT,
    SKIN_COEFFICIENT, SKIN_OFFSET,
};
