//! Annual roll-up of the monthly series.

use std::fmt;

use serde::Serialize;
use tracing::info;

use super::monthly::MonthlyMetrics;

/// Aggregate indicators over a complete monthly series.
///
/// Computed post-hoc from the series so the annual figures always agree with
/// the monthly records they summarise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnualSummary {
    /// Sum of monthly delivered energy (MWh).
    pub total_energy_mwh: f64,
    /// Unweighted mean of monthly capacity factors (%).
    pub avg_capacity_factor_pct: f64,
    /// Unweighted mean of monthly performance ratios (%).
    pub avg_performance_ratio_pct: f64,
    /// Plant availability (%), as reported for January.
    pub availability_pct: f64,
    /// Sum of monthly plane-of-array irradiance.
    pub total_poa_irradiance: f64,
    /// Sum of monthly specific yields (kWh/kWp).
    pub specific_yield_kwh_per_kwp: f64,
    /// 1-based month with the highest energy; `None` for an empty series.
    pub peak_month: Option<usize>,
}

impl AnnualSummary {
    /// Rolls a monthly series up into annual figures.
    ///
    /// Averages are simple arithmetic means, not weighted by days. An empty
    /// series yields an all-zero summary.
    pub fn from_series(series: &[MonthlyMetrics]) -> Self {
        if series.is_empty() {
            return Self {
                total_energy_mwh: 0.0,
                avg_capacity_factor_pct: 0.0,
                avg_performance_ratio_pct: 0.0,
                availability_pct: 0.0,
                total_poa_irradiance: 0.0,
                specific_yield_kwh_per_kwp: 0.0,
                peak_month: None,
            };
        }

        let n = series.len() as f64;
        let mut energy = 0.0;
        let mut cf_sum = 0.0;
        let mut pr_sum = 0.0;
        let mut poa = 0.0;
        let mut yield_sum = 0.0;
        let mut peak: Option<&MonthlyMetrics> = None;

        for m in series {
            energy += m.overall.total_energy_mwh;
            cf_sum += m.overall.capacity_factor_pct;
            pr_sum += m.overall.performance_ratio_pct;
            poa += m.solar_resource.poa_irradiance;
            yield_sum += m.overall.specific_yield_kwh_per_kwp;

            if peak.is_none_or(|p| m.overall.total_energy_mwh > p.overall.total_energy_mwh) {
                peak = Some(m);
            }
        }

        let summary = Self {
            total_energy_mwh: energy,
            avg_capacity_factor_pct: cf_sum / n,
            avg_performance_ratio_pct: pr_sum / n,
            availability_pct: series[0].overall.availability_pct,
            total_poa_irradiance: poa,
            specific_yield_kwh_per_kwp: yield_sum,
            peak_month: peak.map(|m| m.month_index + 1),
        };
        info!(
            total_energy_mwh = summary.total_energy_mwh,
            avg_capacity_factor_pct = summary.avg_capacity_factor_pct,
            "annual summary computed"
        );
        summary
    }
}

impl fmt::Display for AnnualSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Annual Summary ---")?;
        writeln!(f, "Annual energy:         {:.1} MWh", self.total_energy_mwh)?;
        writeln!(f, "Avg capacity factor:   {:.2}%", self.avg_capacity_factor_pct)?;
        writeln!(f, "Avg performance ratio: {:.2}%", self.avg_performance_ratio_pct)?;
        writeln!(f, "Specific yield:        {:.2} kWh/kWp", self.specific_yield_kwh_per_kwp)?;
        writeln!(f, "System availability:   {:.1}%", self.availability_pct)?;
        match self.peak_month {
            Some(m) => write!(f, "Peak month:            {m}"),
            None => write!(f, "Peak month:            -"),
        }
    }
}
