//! Photovoltaic plant sizing and monthly yield estimation for compute-facility loads.
//!
//! A plant is sized from a facility load by scaling a built reference
//! project, then a single-sample-per-month physical model estimates its
//! energy yield at a given site.

#[cfg(feature = "api")]
pub mod api;
pub mod config;
pub mod error;
pub mod io;
/// Solar geometry, thermal and efficiency models with monthly aggregation.
pub mod model;
/// Reference plant, site profile and capacity sizing.
pub mod plant;
pub mod runner;

pub use error::{PlausibilityWarning, SizingError};
pub use runner::{
    Estimate, compute_annual_summary, compute_monthly_series, compute_sizing, run_scenario,
};
