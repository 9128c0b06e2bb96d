//! Regression comparison of propagated trajectories against legacy reference output.
//!
//! The numeric work lives in the workspace crates; this crate wires them into test-case
//! runs that load series, diff them, log a report, and write artifacts.

pub mod chart;
pub mod run;

pub use regress_compare as compare;
pub use regress_config as config;
pub use regress_eclipse as eclipse;
pub use regress_export as export;
pub use regress_orbits as orbits;
pub use regress_series as series;
