//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use pv_plant_sizer::model::MonthlyMetrics;
use pv_plant_sizer::plant::{PlantSizingResult, ReferenceProject, SiteProfile};
use pv_plant_sizer::{compute_monthly_series, compute_sizing};

/// Absolute tolerance for float comparisons.
pub const EPSILON: f64 = 1e-9;

/// Default reference plant (38.9 MWac).
pub fn default_reference() -> ReferenceProject {
    ReferenceProject::default()
}

/// Default Alberta site profile.
pub fn default_site() -> SiteProfile {
    SiteProfile::default()
}

/// Sizing for the 5 MW, PUE 1.2, 20% capacity factor scenario.
pub fn baseline_sizing() -> PlantSizingResult {
    compute_sizing(&default_reference(), 5.0, 1.2, 0.20)
        .unwrap_or_else(|e| panic!("baseline sizing failed: {e}"))
}

/// Monthly series for [`baseline_sizing`] at the default site.
pub fn baseline_series() -> Vec<MonthlyMetrics> {
    compute_monthly_series(&default_reference(), &default_site(), &baseline_sizing())
}

/// Asserts `a` and `b` agree within `tol`.
pub fn assert_close(a: f64, b: f64, tol: f64, what: &str) {
    assert!((a - b).abs() <= tol, "{what}: {a} != {b} (tol {tol})");
}
