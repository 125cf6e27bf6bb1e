//! Top-level entry points: size a plant, model its months, roll up the year.

use tracing::warn;

use crate::config::ScenarioConfig;
use crate::error::{PlausibilityWarning, SizingError};
use crate::model::{AnnualSummary, MonthlyAggregator, MonthlyMetrics};
use crate::plant::{PlantSizingResult, ReferenceProject, SiteProfile, SizingEngine};

/// Sizes a plant for `load_mw` against `reference`.
///
/// Target monthly production is shaped by the default site GHI; use
/// [`run_scenario`] to size against a configured site.
///
/// # Errors
///
/// Returns [`SizingError::InvalidRatio`] when `capacity_factor`, the resulting
/// AC capacity (zero or negative load), the reference AC capacity or the
/// reference DC/AC ratio is not positive.
pub fn compute_sizing(
    reference: &ReferenceProject,
    load_mw: f64,
    pue: f64,
    capacity_factor: f64,
) -> Result<PlantSizingResult, SizingError> {
    SizingEngine::new(reference)?.compute(load_mw, pue, capacity_factor)
}

/// Twelve monthly records for `plant`, January first.
pub fn compute_monthly_series(
    reference: &ReferenceProject,
    site: &SiteProfile,
    plant: &PlantSizingResult,
) -> Vec<MonthlyMetrics> {
    MonthlyAggregator::new(reference, site).series(plant)
}

/// Annual roll-up of a monthly series.
pub fn compute_annual_summary(series: &[MonthlyMetrics]) -> AnnualSummary {
    AnnualSummary::from_series(series)
}

/// Everything computed for one scenario.
#[derive(Debug, Clone)]
pub struct Estimate {
    pub sizing: PlantSizingResult,
    pub monthly: Vec<MonthlyMetrics>,
    pub summary: AnnualSummary,
    /// Load inputs outside their plausible band; computation still ran.
    pub warnings: Vec<PlausibilityWarning>,
}

/// Runs sizing, the monthly model and the annual summary for a scenario.
///
/// Plausibility warnings are logged and returned alongside the results.
///
/// # Errors
///
/// Returns [`SizingError`] when sizing hits a non-positive ratio.
pub fn run_scenario(config: &ScenarioConfig) -> Result<Estimate, SizingError> {
    let warnings = config.plausibility_warnings();
    for w in &warnings {
        warn!(field = w.field, value = w.value, "{w}");
    }

    let load = &config.load;
    let sizing = SizingEngine::new(&config.reference)?
        .with_site(&config.site)
        .compute(load.load_mw, load.pue, load.capacity_factor)?;
    let monthly = compute_monthly_series(&config.reference, &config.site, &sizing);
    let summary = compute_annual_summary(&monthly);

    Ok(Estimate {
        sizing,
        monthly,
        summary,
        warnings,
    })
}
