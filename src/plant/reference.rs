//! Reference plant whose per-megawatt ratios drive every scaled quantity.

use serde::{Deserialize, Serialize};

/// A built, real-world PV plant used as the scaling template.
///
/// Every equipment ratio the estimator uses is this record divided by
/// [`ReferenceProject::ac_capacity_mw`], so a plant of any size is assumed to
/// share the reference design. The default is the 38.9 MWac CA_PV_ED project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceProject {
    /// Rated AC output (MWac).
    pub ac_capacity_mw: f64,
    /// Installed DC peak power (MWdc).
    pub dc_capacity_mw: f64,
    /// Number of PV modules installed.
    pub module_count: u64,
    /// Nameplate power of one module (W).
    pub module_power_w: f64,
    /// Module conversion efficiency (%).
    pub module_efficiency_pct: f64,
    /// Total plot area (ha).
    pub total_area_ha: f64,
    /// Area suitable for the array (ha).
    pub suitable_area_ha: f64,
    /// Number of central inverters.
    pub inverter_count: u32,
    /// Rated apparent power of one inverter (kVA).
    pub inverter_power_kva: f64,
    /// DC/AC ratio applied when deriving DC capacity.
    pub dc_ac_ratio: f64,
    /// Ground coverage ratio (%, 0-100).
    pub gcr_pct: f64,
    /// Fixed-structure tilt (degrees from horizontal).
    pub tilt_deg: f64,
    /// Array azimuth (degrees, 0 = equator-facing).
    pub azimuth_deg: f64,
}

impl Default for ReferenceProject {
    fn default() -> Self {
        Self {
            ac_capacity_mw: 38.9,
            dc_capacity_mw: 50.6,
            module_count: 80_912,
            module_power_w: 625.0,
            module_efficiency_pct: 23.14,
            total_area_ha: 130.04,
            suitable_area_ha: 71.2,
            inverter_count: 12,
            inverter_power_kva: 3600.0,
            dc_ac_ratio: 1.30,
            gcr_pct: 52.57,
            tilt_deg: 18.0,
            azimuth_deg: 0.0,
        }
    }
}

impl ReferenceProject {
    /// Modules installed per MWac.
    pub fn modules_per_mw(&self) -> f64 {
        self.module_count as f64 / self.ac_capacity_mw
    }

    /// Suitable (array) area per MWac (ha).
    pub fn suitable_area_per_mw(&self) -> f64 {
        self.suitable_area_ha / self.ac_capacity_mw
    }

    /// Total plot area per MWac (ha).
    pub fn total_area_per_mw(&self) -> f64 {
        self.total_area_ha / self.ac_capacity_mw
    }

    /// Inverters per MWac.
    pub fn inverters_per_mw(&self) -> f64 {
        f64::from(self.inverter_count) / self.ac_capacity_mw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_ca_pv_ed() {
        let r = ReferenceProject::default();
        assert_eq!(r.ac_capacity_mw, 38.9);
        assert_eq!(r.module_count, 80_912);
        assert_eq!(r.inverter_count, 12);
        assert_eq!(r.dc_ac_ratio, 1.30);
    }

    #[test]
    fn ratios_round_trip_at_reference_size() {
        let r = ReferenceProject::default();
        assert_eq!(r.ac_capacity_mw * r.modules_per_mw(), 80_912.0);
        assert!((r.ac_capacity_mw * r.suitable_area_per_mw() - 71.2).abs() < 1e-9);
        assert!((r.ac_capacity_mw * r.inverters_per_mw() - 12.0).abs() < 1e-9);
    }
}
