//! Month-by-month physical model of a sized plant.
//!
//! Each month is evaluated from one mid-month solar-noon sample: the noon
//! instantaneous output is held for 24 hours and multiplied by the days in the
//! month. Months share no state, so the twelve records can be produced in any
//! order.

use std::fmt;

use serde::Serialize;
use tracing::debug;

use super::efficiency::{
    EfficiencyChain, capacity_factor, inverter_efficiency, loading_ratio, performance_ratio,
    shading_losses, specific_yield,
};
use super::geometry::{poa_irradiance, solar_position};
use super::thermal::{ThermalPowerModel, temperature_losses_pct};
use crate::plant::site::{DAYS_IN_MONTH, MONTH_NAMES};
use crate::plant::{PlantSizingResult, ReferenceProject, SiteProfile};

/// Solar hour sampled for every month.
const SAMPLE_HOUR: f64 = 12.0;
/// Tilt considered optimal when scoring the slope impact (degrees).
const OPTIMAL_TILT_DEG: f64 = 30.0;
/// Sun elevation below which the horizon profile starts blocking (degrees).
const HORIZON_BLOCKING_ELEVATION_DEG: f64 = 10.0;
/// Horizon impact applied to low-sun months (%).
const HORIZON_BLOCKING_PENALTY_PCT: f64 = 20.0;
const TERRAIN_SUITABILITY_PCT: f64 = 85.0;
const DRAINAGE_ADEQUACY_PCT: f64 = 90.0;
const BIFACIAL_GAIN_PCT: f64 = 5.0;
const STRUCTURAL_EFFICIENCY_PCT: f64 = 95.0;
const MOUNTING_LOSSES_PCT: f64 = 2.0;
const ROAD_ACCESSIBILITY_PCT: f64 = 95.0;
const DRAINAGE_EFFECTIVENESS_PCT: f64 = 90.0;
const SECURITY_RATING_PCT: f64 = 85.0;
const MAINTENANCE_ACCESSIBILITY_PCT: f64 = 92.0;
/// Plant availability assumed for every month (%).
pub const AVAILABILITY_PCT: f64 = 98.0;

/// Approximate mid-month day of year for a 0-based month index.
pub fn mid_month_day(month_index: usize) -> u32 {
    15 + 30 * month_index as u32
}

/// Location and plot areas, repeated on every month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteMetrics {
    /// Latitude (degrees).
    pub latitude_deg: f64,
    /// Longitude (degrees).
    pub longitude_deg: f64,
    /// Altitude (m).
    pub altitude_m: f64,
    /// Total plot area scaled from the reference (ha).
    pub total_area_ha: f64,
    /// Area occupied by the array (ha).
    pub suitable_area_ha: f64,
    /// Suitable over total area (%).
    pub utilization_ratio_pct: f64,
}

/// Terrain scores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopographyMetrics {
    /// Tilt penalty relative to a 30° optimum (%).
    pub slope_impact_pct: f64,
    /// Fixed terrain suitability rating (%).
    pub terrain_suitability_pct: f64,
    /// Fixed drainage adequacy rating (%).
    pub drainage_adequacy_pct: f64,
}

/// Far-horizon blocking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorizonMetrics {
    /// 80 when the sampled sun is below 10°, 100 otherwise (%).
    pub impact_factor_pct: f64,
}

/// Irradiance, sun position and temperatures for the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SolarResourceMetrics {
    /// Monthly global horizontal irradiation (kWh/m²).
    pub ghi: f64,
    /// Mean daily global horizontal irradiation (kWh/m²/day).
    pub daily_ghi: f64,
    /// Noon plane-of-array sample multiplied by the days in the month.
    pub poa_irradiance: f64,
    /// Sun elevation at the sample (degrees).
    pub solar_elevation_deg: f64,
    /// Sun azimuth at the sample (degrees).
    pub solar_azimuth_deg: f64,
    /// Monthly mean ambient temperature (°C).
    pub ambient_temp_c: f64,
    /// Module temperature at the sample (°C).
    pub module_temp_c: f64,
    /// Plane-of-array sample over daily GHI (%).
    pub irradiance_ratio_pct: f64,
}

/// Module-level output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PvModuleMetrics {
    /// Nameplate module efficiency from the reference project (%).
    pub module_efficiency_pct: f64,
    /// Output of one module at the sample (W).
    pub power_output_w: f64,
    /// Output of the whole array (kW).
    pub total_dc_power_kw: f64,
    /// Thermal derate relative to 25 °C (%).
    pub temperature_losses_pct: f64,
    /// Nominal rear-side gain (%). Informational; not applied to energy.
    pub bifacial_gain_pct: f64,
}

/// Mounting structure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FixedStructureMetrics {
    /// Row-to-row shading loss (%). Informational; not applied to energy.
    pub shading_losses_pct: f64,
    /// Fixed structural efficiency rating (%).
    pub structural_efficiency_pct: f64,
    /// Fixed mounting loss (%). Informational; not applied to energy.
    pub mounting_losses_pct: f64,
}

/// DC string combiner boxes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StringCombinerMetrics {
    /// Combiner efficiency (%).
    pub efficiency_pct: f64,
}

/// Central inverter fleet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InverterMetrics {
    /// Conversion efficiency (%), read off the curve at the array DC power
    /// over the rating of a single inverter.
    pub efficiency_pct: f64,
    /// Array DC power over total fleet rating (%).
    pub loading_ratio_pct: f64,
    /// AC output of the fleet (kW).
    pub total_ac_power_kw: f64,
    /// `100 - efficiency_pct`.
    pub conversion_losses_pct: f64,
}

/// Step-up transformer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerTransformerMetrics {
    /// Transformer efficiency (%).
    pub efficiency_pct: f64,
}

/// Integrated power stations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerStationMetrics {
    /// Number of power stations in the plant.
    pub station_count: u32,
    /// Transformer efficiency (%).
    pub transformer_efficiency_pct: f64,
    /// Medium-voltage switchgear loss (%).
    pub switchgear_losses_pct: f64,
    /// Station auxiliary consumption (%).
    pub auxiliary_consumption_pct: f64,
    /// Transformer efficiency less switchgear and auxiliary losses (%).
    pub total_station_efficiency_pct: f64,
}

/// Cabling and interconnection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElectricalConfigMetrics {
    /// Open-circuit voltage of one string (V).
    pub string_voltage_v: f64,
    /// DC cabling loss (%).
    pub dc_losses_pct: f64,
    /// AC cabling loss (%).
    pub ac_losses_pct: f64,
    /// Sum of DC and AC cabling losses (%).
    pub total_electrical_losses_pct: f64,
    /// Grid connection efficiency (%).
    pub grid_connection_efficiency_pct: f64,
}

/// Fence, roads and site-service ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CivilWorksMetrics {
    /// Perimeter fence length (m).
    pub perimeter_fence_m: f64,
    /// Internal road length (m).
    pub road_length_m: f64,
    /// Fixed road accessibility rating (%).
    pub road_accessibility_pct: f64,
    /// Fixed drainage effectiveness rating (%).
    pub drainage_effectiveness_pct: f64,
    /// Fixed security rating (%).
    pub security_rating_pct: f64,
    /// Fixed maintenance accessibility rating (%).
    pub maintenance_accessibility_pct: f64,
}

/// Plant-level energy results for the month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallMetrics {
    /// Delivered AC energy (MWh).
    pub total_energy_mwh: f64,
    /// Energy over AC rating times hours in the month (%).
    pub capacity_factor_pct: f64,
    /// Energy per installed DC capacity (kWh/kWp).
    pub specific_yield_kwh_per_kwp: f64,
    /// Energy over GHI times DC capacity (%).
    pub performance_ratio_pct: f64,
    /// Assumed plant availability (%). Informational; not applied to energy.
    pub availability_pct: f64,
    /// Energy over irradiation falling on the total plot (%).
    pub overall_efficiency_pct: f64,
}

/// Complete record for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyMetrics {
    /// 0-based month index (0 = January).
    pub month_index: usize,
    /// Three-letter month label.
    pub month: &'static str,
    /// Days in the month on a non-leap calendar.
    pub days: u32,
    /// Location and plot areas.
    pub site: SiteMetrics,
    /// Terrain scores.
    pub topography: TopographyMetrics,
    /// Far-horizon blocking.
    pub horizon: HorizonMetrics,
    /// Irradiance, sun position and temperatures.
    pub solar_resource: SolarResourceMetrics,
    /// Module and array output.
    pub pv_modules: PvModuleMetrics,
    /// Mounting structure.
    pub fixed_structure: FixedStructureMetrics,
    /// String combiners.
    pub string_combiner: StringCombinerMetrics,
    /// Inverter fleet.
    pub inverter: InverterMetrics,
    /// Step-up transformer.
    pub power_transformer: PowerTransformerMetrics,
    /// Power stations.
    pub power_station: PowerStationMetrics,
    /// Cabling and interconnection.
    pub electrical_config: ElectricalConfigMetrics,
    /// Fence, roads and site services.
    pub civil_works: CivilWorksMetrics,
    /// Plant-level energy results.
    pub overall: OverallMetrics,
}

/// Runs the geometry, thermal and efficiency stages once per month.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyAggregator<'a> {
    reference: &'a ReferenceProject,
    site: &'a SiteProfile,
    thermal: ThermalPowerModel,
    chain: EfficiencyChain,
}

impl<'a> MonthlyAggregator<'a> {
    /// Creates an aggregator with the default thermal model and loss chain.
    pub fn new(reference: &'a ReferenceProject, site: &'a SiteProfile) -> Self {
        Self {
            reference,
            site,
            thermal: ThermalPowerModel::new(reference.module_power_w),
            chain: EfficiencyChain::default(),
        }
    }

    /// Replaces the thermal model.
    pub fn with_thermal_model(mut self, thermal: ThermalPowerModel) -> Self {
        self.thermal = thermal;
        self
    }

    /// Computes the twelve monthly records, January first.
    pub fn series(&self, plant: &PlantSizingResult) -> Vec<MonthlyMetrics> {
        (0..MONTH_NAMES.len())
            .filter_map(|m| self.month(plant, m))
            .collect()
    }

    /// Computes the record for one month, or `None` if `month_index >= 12`.
    pub fn month(&self, plant: &PlantSizingResult, month_index: usize) -> Option<MonthlyMetrics> {
        let reference = self.reference;
        let site = self.site;

        let month = *MONTH_NAMES.get(month_index)?;
        let days = *DAYS_IN_MONTH.get(month_index)?;
        let days_f = f64::from(days);
        let hours = 24.0 * days_f;
        let ghi = *site.monthly_ghi.get(month_index)?;
        let ambient = *site.monthly_ambient_temp_c.get(month_index)?;
        let daily_ghi = ghi / days_f;

        let sun = solar_position(mid_month_day(month_index), site.latitude_deg, SAMPLE_HOUR);
        let poa = poa_irradiance(
            daily_ghi,
            reference.tilt_deg,
            reference.azimuth_deg,
            sun.elevation_deg,
            sun.azimuth_deg,
        );
        let (module_temp, module_power) = self.thermal.evaluate(ambient, poa);
        let total_dc_kw = module_power * plant.module_count as f64 / 1000.0;

        let shading = shading_losses(reference.gcr_pct, sun.elevation_deg);
        // Efficiency is read against one unit's rating, loading against the fleet.
        let inverter_eff = inverter_efficiency(total_dc_kw, reference.inverter_power_kva);
        let fleet_rating_kw = f64::from(plant.inverter_count) * reference.inverter_power_kva;
        let total_ac_kw = total_dc_kw * inverter_eff;

        let energy_mwh = total_ac_kw * hours / 1000.0;
        let cf = capacity_factor(energy_mwh, plant.solar_ac_capacity_mw, hours);
        let sy = specific_yield(energy_mwh * 1000.0, plant.solar_dc_capacity_mw * 1000.0);
        let pr = performance_ratio(energy_mwh, ghi * plant.solar_dc_capacity_mw);

        let total_area_ha = plant.solar_ac_capacity_mw * reference.total_area_per_mw();
        let slope_impact = (100.0 - (reference.tilt_deg - OPTIMAL_TILT_DEG).abs()).max(0.0);
        let thermal_losses = temperature_losses_pct(module_temp, self.thermal.temp_coeff);
        let irradiated_mwh = ghi * total_area_ha * 10.0;

        debug!(
            month,
            elevation_deg = sun.elevation_deg,
            poa,
            total_dc_kw,
            energy_mwh,
            "month evaluated"
        );

        Some(MonthlyMetrics {
            month_index,
            month,
            days,
            site: SiteMetrics {
                latitude_deg: site.latitude_deg,
                longitude_deg: site.longitude_deg,
                altitude_m: site.altitude_m,
                total_area_ha,
                suitable_area_ha: plant.land_area_ha,
                utilization_ratio_pct: ratio_pct(plant.land_area_ha, total_area_ha),
            },
            topography: TopographyMetrics {
                slope_impact_pct: slope_impact,
                terrain_suitability_pct: TERRAIN_SUITABILITY_PCT,
                drainage_adequacy_pct: DRAINAGE_ADEQUACY_PCT,
            },
            horizon: HorizonMetrics {
                impact_factor_pct: if sun.elevation_deg < HORIZON_BLOCKING_ELEVATION_DEG {
                    100.0 - HORIZON_BLOCKING_PENALTY_PCT
                } else {
                    100.0
                },
            },
            solar_resource: SolarResourceMetrics {
                ghi,
                daily_ghi,
                poa_irradiance: poa * days_f,
                solar_elevation_deg: sun.elevation_deg,
                solar_azimuth_deg: sun.azimuth_deg,
                ambient_temp_c: ambient,
                module_temp_c: module_temp,
                irradiance_ratio_pct: ratio_pct(poa, daily_ghi),
            },
            pv_modules: PvModuleMetrics {
                module_efficiency_pct: reference.module_efficiency_pct,
                power_output_w: module_power,
                total_dc_power_kw: total_dc_kw,
                temperature_losses_pct: thermal_losses,
                bifacial_gain_pct: BIFACIAL_GAIN_PCT,
            },
            fixed_structure: FixedStructureMetrics {
                shading_losses_pct: shading,
                structural_efficiency_pct: STRUCTURAL_EFFICIENCY_PCT,
                mounting_losses_pct: MOUNTING_LOSSES_PCT,
            },
            string_combiner: StringCombinerMetrics {
                efficiency_pct: self.chain.combiner_efficiency_pct,
            },
            inverter: InverterMetrics {
                efficiency_pct: inverter_eff * 100.0,
                loading_ratio_pct: loading_ratio(total_dc_kw, fleet_rating_kw) * 100.0,
                total_ac_power_kw: total_ac_kw,
                conversion_losses_pct: (1.0 - inverter_eff) * 100.0,
            },
            power_transformer: PowerTransformerMetrics {
                efficiency_pct: self.chain.transformer_efficiency_pct,
            },
            power_station: PowerStationMetrics {
                station_count: plant.power_station_count,
                transformer_efficiency_pct: self.chain.transformer_efficiency_pct,
                switchgear_losses_pct: self.chain.switchgear_loss_pct,
                auxiliary_consumption_pct: self.chain.auxiliary_consumption_pct,
                total_station_efficiency_pct: self.chain.station_efficiency_pct(),
            },
            electrical_config: ElectricalConfigMetrics {
                string_voltage_v: plant.string_voltage_v,
                dc_losses_pct: self.chain.dc_cabling_loss_pct,
                ac_losses_pct: self.chain.ac_cabling_loss_pct,
                total_electrical_losses_pct: self.chain.electrical_losses_pct(),
                grid_connection_efficiency_pct: self.chain.grid_connection_efficiency_pct,
            },
            civil_works: CivilWorksMetrics {
                perimeter_fence_m: plant.perimeter_fence_m,
                road_length_m: plant.road_length_m,
                road_accessibility_pct: ROAD_ACCESSIBILITY_PCT,
                drainage_effectiveness_pct: DRAINAGE_EFFECTIVENESS_PCT,
                security_rating_pct: SECURITY_RATING_PCT,
                maintenance_accessibility_pct: MAINTENANCE_ACCESSIBILITY_PCT,
            },
            overall: OverallMetrics {
                total_energy_mwh: energy_mwh,
                capacity_factor_pct: cf,
                specific_yield_kwh_per_kwp: sy,
                performance_ratio_pct: pr,
                availability_pct: AVAILABILITY_PCT,
                overall_efficiency_pct: ratio_pct(energy_mwh, irradiated_mwh),
            },
        })
    }
}

/// `numerator / denominator * 100`, or 0 when the denominator is not positive.
fn ratio_pct(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator * 100.0
    } else {
        0.0
    }
}

impl fmt::Display for MonthlyMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({:>2}d) | GHI={:>6.1}  POA={:>7.2}  elev={:>5.1}° | Tmod={:>5.1}°C \
             DC={:>9.1} kW  inv={:>4.1}% | E={:>9.1} MWh  CF={:>6.2}%  PR={:>7.2}%",
            self.month,
            self.days,
            self.solar_resource.ghi,
            self.solar_resource.poa_irradiance,
            self.solar_resource.solar_elevation_deg,
            self.solar_resource.module_temp_c,
            self.pv_modules.total_dc_power_kw,
            self.inverter.efficiency_pct,
            self.overall.total_energy_mwh,
            self.overall.capacity_factor_pct,
            self.overall.performance_ratio_pct,
        )
    }
}
