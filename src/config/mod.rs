//! Well-Test Configuration Module
//!
//! Reservoir constants and run options loaded from TOML files.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `WELLTEST_CONFIG` environment variable (path to TOML file)
//! 3. `welltest.toml` in the current working directory
//!
//! ## Usage
//!
//! ```ignore
//! let config = WellTestConfig::load(args.config.as_deref())?;
//! let props = config.reservoir.to_properties();
//! ```
//!
//! There is no process-wide config: analyses take every constant as an
//! argument, so a resolved config is passed down explicitly.

mod test_config;
pub mod validation;

pub use test_config::*;
