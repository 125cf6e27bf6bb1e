//! Capacity sizing and equipment counts for a compute-facility load.
//!
//! Capacities flow `load → total power (PUE) → AC (capacity factor) → DC
//! (DC/AC ratio)`; every equipment count is then scaled off the AC capacity.
//! Counts of physical units round up so a plant is never under-provisioned,
//! except the module count, which truncates toward zero.

use std::fmt;

use serde::Serialize;
use tracing::info;

use super::reference::ReferenceProject;
use super::site::{DAYS_IN_MONTH, SiteProfile};
use crate::error::SizingError;
use crate::model::efficiency::{AC_CABLING_LOSS_PCT, DC_CABLING_LOSS_PCT};

/// Hectare to acre conversion factor.
pub const ACRES_PER_HECTARE: f64 = 2.47105;
/// Rating of one power transformer (MVA).
pub const TRANSFORMER_MVA: f64 = 7.2;
/// AC capacity served by one power station (MW).
pub const STATION_CAPACITY_MW: f64 = 6.485;
/// Modules wired in series per string.
pub const MODULES_PER_STRING: u32 = 26;
/// String inputs per combiner box.
pub const STRINGS_PER_COMBINER: u64 = 16;
/// Modules carried by one 3P fixed structure.
pub const MODULES_PER_STRUCTURE: u64 = 52;
/// Module maximum-power-point voltage (V).
pub const MODULE_VMPP_V: f64 = 41.1;
/// Medium-voltage collection network voltage (kV).
pub const MV_NETWORK_KV: f64 = 20.0;
/// Fenced share of the land area.
pub const FENCE_AREA_RATIO: f64 = 0.937;
/// Perimeter inflation for an irregular plot relative to a square.
pub const PERIMETER_IRREGULARITY: f64 = 1.2;
/// Access road length per hectare (m/ha).
pub const ROAD_DENSITY_M_PER_HA: f64 = 400.0;
/// Avoided emissions per MWh (t CO₂/MWh). Illustrative.
pub const CO2_T_PER_MWH: f64 = 0.4;
/// Hours in a non-leap year.
pub const HOURS_PER_YEAR: f64 = 8760.0;
/// Monthly GHI treated as a nominal month when shaping target production (kWh/m²).
pub const GHI_NORMALIZATION_KWH_M2: f64 = 150.0;

/// Facility power including cooling and overheads (MW).
///
/// `pue` is not range-checked here; implausible values are flagged by the
/// caller through [`crate::config::ScenarioConfig::plausibility_warnings`].
pub fn total_power(load_mw: f64, pue: f64) -> f64 {
    load_mw * pue
}

/// AC capacity needed so that `capacity_factor` of it covers `total_power_mw`.
///
/// # Errors
///
/// Returns [`SizingError::InvalidRatio`] when `capacity_factor` is zero,
/// negative or non-finite.
pub fn solar_ac_capacity(total_power_mw: f64, capacity_factor: f64) -> Result<f64, SizingError> {
    let cf = SizingError::require_positive("capacity_factor", capacity_factor)?;
    Ok(total_power_mw / cf)
}

/// DC capacity for an AC capacity at the given DC/AC ratio (MWdc).
///
/// # Errors
///
/// Returns [`SizingError::InvalidRatio`] when `dc_ac_ratio` is not positive.
pub fn solar_dc_capacity(ac_mw: f64, dc_ac_ratio: f64) -> Result<f64, SizingError> {
    let ratio = SizingError::require_positive("dc_ac_ratio", dc_ac_ratio)?;
    Ok(ac_mw * ratio)
}

/// Number of power transformers, rounded up.
pub fn transformer_count(ac_mw: f64) -> u32 {
    ceil_count(ac_mw / TRANSFORMER_MVA)
}

/// Number of integrated power stations, rounded up.
pub fn power_station_count(ac_mw: f64) -> u32 {
    ceil_count(ac_mw / STATION_CAPACITY_MW)
}

/// Splits `module_count` into strings of `modules_per_string`.
///
/// Returns `(total_strings, modules_per_string)`; a partial string counts as
/// a full one.
///
/// # Errors
///
/// Returns [`SizingError::InvalidRatio`] when `modules_per_string` is zero.
pub fn string_configuration(
    module_count: u64,
    modules_per_string: u32,
) -> Result<(u64, u32), SizingError> {
    if modules_per_string == 0 {
        return Err(SizingError::InvalidRatio {
            name: "modules_per_string",
            value: 0.0,
        });
    }
    Ok((
        module_count.div_ceil(u64::from(modules_per_string)),
        modules_per_string,
    ))
}

/// Perimeter fence and access road lengths for a plot (m).
///
/// The plot is treated as a square inflated by [`PERIMETER_IRREGULARITY`].
/// Returns `(perimeter_m, road_length_m)`.
pub fn civil_works(land_area_ha: f64) -> (f64, f64) {
    let perimeter = (land_area_ha * 10_000.0).max(0.0).sqrt() * 4.0 * PERIMETER_IRREGULARITY;
    let road = land_area_ha * ROAD_DENSITY_M_PER_HA;
    (perimeter, road)
}

/// Rounds a fractional unit count up; negative or NaN inputs yield zero.
fn ceil_count(units: f64) -> u32 {
    units.ceil().max(0.0) as u32
}

/// Target production per month: `ac × 24 × days × (ghi / 150) × capacity_factor` (MWh).
///
/// Shapes the sizing capacity factor over the year by each month's GHI. Unlike
/// the modelled monthly series this ignores geometry and temperature.
pub fn monthly_production(ac_mw: f64, capacity_factor: f64, monthly_ghi: &[f64; 12]) -> [f64; 12] {
    std::array::from_fn(|m| {
        ac_mw
            * 24.0
            * f64::from(DAYS_IN_MONTH[m])
            * (monthly_ghi[m] / GHI_NORMALIZATION_KWH_M2)
            * capacity_factor
    })
}

/// Complete sizing of a PV plant for one load request.
///
/// A value object: recompute it whenever load, PUE or capacity factor change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlantSizingResult {
    /// Compute (IT) load of the facility (MW).
    pub dc_center_load_mw: f64,
    /// Power usage effectiveness applied to the load.
    pub pue: f64,
    /// Solar capacity factor assumed for sizing (fraction, 0-1).
    pub capacity_factor: f64,
    /// Facility draw including PUE overhead (MW).
    pub total_power_mw: f64,
    /// Required solar AC capacity (MWac).
    pub solar_ac_capacity_mw: f64,
    /// Required solar DC capacity (MWdc).
    pub solar_dc_capacity_mw: f64,
    /// PV modules required (truncated).
    pub module_count: u64,
    /// Land area required (ha).
    pub land_area_ha: f64,
    /// Land area required (acres).
    pub land_area_acres: f64,
    /// Fenced area (ha).
    pub fence_area_ha: f64,
    /// Central inverters required.
    pub inverter_count: u32,
    /// Power transformers required.
    pub transformer_count: u32,
    /// Power stations required.
    pub power_station_count: u32,
    /// Strings required.
    pub total_strings: u64,
    /// Modules wired per string.
    pub modules_per_string: u32,
    /// String combiner boxes required.
    pub combiner_box_count: u64,
    /// Fixed mounting structures required.
    pub structure_count: u64,
    /// String voltage at the maximum power point (V).
    pub string_voltage_v: f64,
    /// Medium-voltage network voltage (kV).
    pub mv_voltage_kv: f64,
    /// DC cabling loss (%).
    pub dc_losses_pct: f64,
    /// AC cabling loss (%).
    pub ac_losses_pct: f64,
    /// Perimeter fence length (m).
    pub perimeter_fence_m: f64,
    /// Access road length (m).
    pub road_length_m: f64,
    /// Annual energy implied by the sizing capacity factor (MWh).
    pub target_annual_energy_mwh: f64,
    /// Target production per month shaped by the site GHI (MWh), January first.
    pub target_monthly_energy_mwh: [f64; 12],
    /// Illustrative avoided emissions for the target energy (t CO₂).
    pub annual_co2_savings_t: f64,
}

/// Derives plant capacity and equipment counts from a [`ReferenceProject`].
#[derive(Debug, Clone, Copy)]
pub struct SizingEngine<'a> {
    reference: &'a ReferenceProject,
    monthly_ghi: [f64; 12],
}

impl<'a> SizingEngine<'a> {
    /// Creates an engine over a reference plant.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidRatio`] when the reference AC capacity
    /// (the divisor of every scaling ratio) is not positive.
    pub fn new(reference: &'a ReferenceProject) -> Result<Self, SizingError> {
        SizingError::require_positive("reference.ac_capacity_mw", reference.ac_capacity_mw)?;
        Ok(Self {
            reference,
            monthly_ghi: SiteProfile::default().monthly_ghi,
        })
    }

    /// Shapes target monthly production by `site`'s GHI instead of the default profile.
    pub fn with_site(mut self, site: &SiteProfile) -> Self {
        self.monthly_ghi = site.monthly_ghi;
        self
    }

    /// The reference plant backing this engine.
    pub fn reference(&self) -> &'a ReferenceProject {
        self.reference
    }

    /// Modules for `ac_mw`, scaled from the reference and truncated toward zero.
    pub fn module_count(&self, ac_mw: f64) -> u64 {
        (ac_mw * self.reference.modules_per_mw()) as u64
    }

    /// Land area for `ac_mw` as `(hectares, acres)`.
    pub fn land_area(&self, ac_mw: f64) -> (f64, f64) {
        let ha = ac_mw * self.reference.suitable_area_per_mw();
        (ha, ha * ACRES_PER_HECTARE)
    }

    /// Central inverters for `ac_mw`, rounded up.
    pub fn inverter_count(&self, ac_mw: f64) -> u32 {
        ceil_count(ac_mw * self.reference.inverters_per_mw())
    }

    /// Runs the full sizing pass for one load request.
    ///
    /// # Errors
    ///
    /// Returns [`SizingError::InvalidRatio`] when `capacity_factor`, the
    /// resulting AC capacity or the reference DC/AC ratio is not positive. A
    /// zero or negative load therefore fails here instead of sizing an empty
    /// plant.
    pub fn compute(
        &self,
        load_mw: f64,
        pue: f64,
        capacity_factor: f64,
    ) -> Result<PlantSizingResult, SizingError> {
        let total_power_mw = total_power(load_mw, pue);
        let ac = solar_ac_capacity(total_power_mw, capacity_factor)?;
        let ac = SizingError::require_positive("solar_ac_capacity_mw", ac)?;
        let dc = solar_dc_capacity(ac, self.reference.dc_ac_ratio)?;

        let module_count = self.module_count(ac);
        let (land_area_ha, land_area_acres) = self.land_area(ac);
        let (total_strings, modules_per_string) =
            string_configuration(module_count, MODULES_PER_STRING)?;
        let (perimeter_fence_m, road_length_m) = civil_works(land_area_ha);
        let target_annual_energy_mwh = ac * HOURS_PER_YEAR * capacity_factor;

        let result = PlantSizingResult {
            dc_center_load_mw: load_mw,
            pue,
            capacity_factor,
            total_power_mw,
            solar_ac_capacity_mw: ac,
            solar_dc_capacity_mw: dc,
            module_count,
            land_area_ha,
            land_area_acres,
            fence_area_ha: land_area_ha * FENCE_AREA_RATIO,
            inverter_count: self.inverter_count(ac),
            transformer_count: transformer_count(ac),
            power_station_count: power_station_count(ac),
            total_strings,
            modules_per_string,
            combiner_box_count: total_strings.div_ceil(STRINGS_PER_COMBINER),
            structure_count: module_count.div_ceil(MODULES_PER_STRUCTURE),
            string_voltage_v: f64::from(modules_per_string) * MODULE_VMPP_V,
            mv_voltage_kv: MV_NETWORK_KV,
            dc_losses_pct: DC_CABLING_LOSS_PCT,
            ac_losses_pct: AC_CABLING_LOSS_PCT,
            perimeter_fence_m,
            road_length_m,
            target_annual_energy_mwh,
            target_monthly_energy_mwh: monthly_production(ac, capacity_factor, &self.monthly_ghi),
            annual_co2_savings_t: target_annual_energy_mwh * CO2_T_PER_MWH,
        };

        info!(
            load_mw,
            pue,
            capacity_factor,
            ac_mw = result.solar_ac_capacity_mw,
            dc_mw = result.solar_dc_capacity_mw,
            modules = result.module_count,
            "plant sized"
        );
        Ok(result)
    }
}

impl fmt::Display for PlantSizingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Plant Sizing ---")?;
        writeln!(f, "Data center load:      {:.2} MW", self.dc_center_load_mw)?;
        writeln!(f, "Total power (PUE {:.2}): {:.2} MW", self.pue, self.total_power_mw)?;
        writeln!(f, "Solar AC capacity:     {:.2} MWac", self.solar_ac_capacity_mw)?;
        writeln!(f, "Solar DC capacity:     {:.2} MWdc", self.solar_dc_capacity_mw)?;
        writeln!(f, "PV modules:            {}", self.module_count)?;
        writeln!(
            f,
            "Land area:             {:.2} ha ({:.2} acres)",
            self.land_area_ha, self.land_area_acres
        )?;
        writeln!(f, "Inverters:             {}", self.inverter_count)?;
        writeln!(f, "Transformers:          {}", self.transformer_count)?;
        writeln!(f, "Power stations:        {}", self.power_station_count)?;
        writeln!(
            f,
            "Strings:               {} x {} modules ({} combiner boxes)",
            self.total_strings, self.modules_per_string, self.combiner_box_count
        )?;
        writeln!(f, "Structures:            {}", self.structure_count)?;
        writeln!(
            f,
            "Civil works:           {:.2} km fence, {:.2} km roads",
            self.perimeter_fence_m / 1000.0,
            self.road_length_m / 1000.0
        )?;
        write!(
            f,
            "Target annual energy:  {:.0} MWh ({:.0} t CO2 avoided)",
            self.target_annual_energy_mwh, self.annual_co2_savings_t
        )
    }
}
