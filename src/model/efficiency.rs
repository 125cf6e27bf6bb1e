//! Loss and efficiency stages between module DC output and delivered energy.
//!
//! Percentages are 0-100 throughout, except [`inverter_efficiency`], which
//! returns a 0-1 fraction because it multiplies power directly.

use serde::Serialize;

/// String combiner efficiency (%).
pub const COMBINER_EFFICIENCY_PCT: f64 = 99.5;
/// Power transformer efficiency (%).
pub const TRANSFORMER_EFFICIENCY_PCT: f64 = 98.5;
/// Medium-voltage switchgear loss (%).
pub const SWITCHGEAR_LOSS_PCT: f64 = 0.5;
/// Station auxiliary consumption (%).
pub const AUXILIARY_CONSUMPTION_PCT: f64 = 1.0;
/// DC cabling loss (%).
pub const DC_CABLING_LOSS_PCT: f64 = 2.0;
/// AC cabling loss (%).
pub const AC_CABLING_LOSS_PCT: f64 = 1.0;
/// Grid connection efficiency (%).
pub const GRID_CONNECTION_EFFICIENCY_PCT: f64 = 99.0;
/// Lowest sun elevation used for row-to-row shading (degrees).
const MIN_SHADING_ELEVATION_DEG: f64 = 1.0;

/// Inverter efficiency bands as `(upper loading ratio inclusive, efficiency)`.
const INVERTER_CURVE: [(f64, f64); 5] = [
    (0.10, 0.85),
    (0.20, 0.92),
    (0.50, 0.96),
    (0.75, 0.98),
    (1.00, 0.989),
];
/// Efficiency once the inverter is loaded past its rating.
const INVERTER_OVERLOAD_EFFICIENCY: f64 = 0.985;

/// Row-to-row shading loss for a ground coverage ratio (%).
///
/// Total loss (100) with the sun at or below the horizon. Elevation is floored
/// at 1° before taking the tangent.
pub fn shading_losses(gcr_pct: f64, solar_elevation_deg: f64) -> f64 {
    if solar_elevation_deg <= 0.0 {
        return 100.0;
    }
    let elevation = solar_elevation_deg.max(MIN_SHADING_ELEVATION_DEG).to_radians();
    let shading_factor = (1.0 - (gcr_pct / 100.0) * (1.0 / elevation.tan())).max(0.0);
    (1.0 - shading_factor) * 100.0
}

/// Inverter loading ratio `dc_power / rated_power` (fraction).
///
/// A non-positive rating reads as an idle inverter (ratio 0) rather than an
/// infinite or NaN ratio.
pub fn loading_ratio(dc_power: f64, rated_power: f64) -> f64 {
    if rated_power > 0.0 {
        dc_power / rated_power
    } else {
        0.0
    }
}

/// Inverter efficiency (fraction) from its loading ratio.
///
/// A step curve; each band includes its upper boundary. Power and rating must
/// share units.
pub fn inverter_efficiency(dc_power: f64, rated_power: f64) -> f64 {
    let loading = loading_ratio(dc_power, rated_power);
    INVERTER_CURVE
        .iter()
        .find(|(upper, _)| loading <= *upper)
        .map_or(INVERTER_OVERLOAD_EFFICIENCY, |&(_, eff)| eff)
}

/// Capacity factor of `energy_mwh` over `hours` at `rated_mw` (%).
pub fn capacity_factor(energy_mwh: f64, rated_mw: f64, hours: f64) -> f64 {
    let denominator = rated_mw * hours;
    if denominator > 0.0 {
        energy_mwh / denominator * 100.0
    } else {
        0.0
    }
}

/// Actual over theoretical energy (%), 0 when nothing was theoretically available.
pub fn performance_ratio(actual_energy: f64, theoretical_energy: f64) -> f64 {
    if theoretical_energy > 0.0 {
        actual_energy / theoretical_energy * 100.0
    } else {
        0.0
    }
}

/// Energy per unit of installed DC capacity (kWh/kWp).
pub fn specific_yield(energy_kwh: f64, capacity_kwp: f64) -> f64 {
    if capacity_kwp > 0.0 {
        energy_kwh / capacity_kwp
    } else {
        0.0
    }
}

/// Fixed balance-of-system stages recorded alongside each month.
///
/// These are reported, not applied to the energy path: delivered energy is
/// DC power times inverter efficiency only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EfficiencyChain {
    /// String combiner efficiency (%).
    pub combiner_efficiency_pct: f64,
    /// Power transformer efficiency (%).
    pub transformer_efficiency_pct: f64,
    /// Switchgear loss (%).
    pub switchgear_loss_pct: f64,
    /// Auxiliary consumption (%).
    pub auxiliary_consumption_pct: f64,
    /// DC cabling loss (%).
    pub dc_cabling_loss_pct: f64,
    /// AC cabling loss (%).
    pub ac_cabling_loss_pct: f64,
    /// Grid connection efficiency (%).
    pub grid_connection_efficiency_pct: f64,
}

impl Default for EfficiencyChain {
    fn default() -> Self {
        Self {
            combiner_efficiency_pct: COMBINER_EFFICIENCY_PCT,
            transformer_efficiency_pct: TRANSFORMER_EFFICIENCY_PCT,
            switchgear_loss_pct: SWITCHGEAR_LOSS_PCT,
            auxiliary_consumption_pct: AUXILIARY_CONSUMPTION_PCT,
            dc_cabling_loss_pct: DC_CABLING_LOSS_PCT,
            ac_cabling_loss_pct: AC_CABLING_LOSS_PCT,
            grid_connection_efficiency_pct: GRID_CONNECTION_EFFICIENCY_PCT,
        }
    }
}

impl EfficiencyChain {
    /// Station efficiency: transformer less switchgear and auxiliary losses (%).
    pub fn station_efficiency_pct(&self) -> f64 {
        let station_losses = self.switchgear_loss_pct + self.auxiliary_consumption_pct;
        self.transformer_efficiency_pct - station_losses
    }

    /// Combined DC and AC cabling loss (%).
    pub fn electrical_losses_pct(&self) -> f64 {
        self.dc_cabling_loss_pct + self.ac_cabling_loss_pct
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shading_total_below_horizon() {
        assert_eq!(shading_losses(52.57, 0.0), 100.0);
        assert_eq!(shading_losses(52.57, -5.0), 100.0);
    }

    #[test]
    fn shading_floors_elevation_at_one_degree() {
        assert_eq!(shading_losses(52.57, 0.2), shading_losses(52.57, 1.0));
        assert_eq!(shading_losses(52.57, 0.2), 100.0);
    }

    #[test]
    fn shading_at_45_degrees_equals_gcr() {
        // tan(45°) = 1, so loss = gcr
        assert!((shading_losses(40.0, 45.0) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn shading_shrinks_with_higher_sun() {
        assert!(shading_losses(52.57, 60.0) < shading_losses(52.57, 30.0));
    }

    #[test]
    fn inverter_curve_boundaries() {
        assert_eq!(inverter_efficiency(0.10, 1.0), 0.85);
        assert_eq!(inverter_efficiency(0.10001, 1.0), 0.92);
        assert_eq!(inverter_efficiency(0.20, 1.0), 0.92);
        assert_eq!(inverter_efficiency(0.50, 1.0), 0.96);
        assert_eq!(inverter_efficiency(0.75, 1.0), 0.98);
        assert_eq!(inverter_efficiency(1.0, 1.0), 0.989);
        assert_eq!(inverter_efficiency(1.5, 1.0), 0.985);
    }

    #[test]
    fn inverter_idle_uses_lowest_band() {
        assert_eq!(inverter_efficiency(0.0, 3600.0), 0.85);
        assert_eq!(inverter_efficiency(-1.0, 3600.0), 0.85);
    }

    #[test]
    fn zero_rating_reads_as_idle() {
        assert_eq!(loading_ratio(250.0, 0.0), 0.0);
        assert_eq!(inverter_efficiency(250.0, 0.0), 0.85);
    }

    #[test]
    fn capacity_factor_full_output_is_100() {
        assert_eq!(capacity_factor(744.0, 1.0, 744.0), 100.0);
        assert_eq!(capacity_factor(10.0, 0.0, 744.0), 0.0);
    }

    #[test]
    fn performance_ratio_guards_zero_theoretical() {
        assert_eq!(performance_ratio(5.0, 0.0), 0.0);
        assert_eq!(performance_ratio(5.0, 10.0), 50.0);
    }

    #[test]
    fn specific_yield_is_energy_per_kwp() {
        assert_eq!(specific_yield(1500.0, 1000.0), 1.5);
    }

    #[test]
    fn chain_additive_aggregates() {
        let chain = EfficiencyChain::default();
        assert!((chain.station_efficiency_pct() - 97.0).abs() < 1e-9);
        assert!((chain.electrical_losses_pct() - 3.0).abs() < 1e-9);
    }
}
