//! TOML-based scenario configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::PlausibilityWarning;
use crate::plant::{ReferenceProject, SiteProfile};

/// Plausible band for the facility load (MW).
pub const LOAD_MW_RANGE: (f64, f64) = (1.0, 10.0);
/// Plausible band for PUE.
pub const PUE_RANGE: (f64, f64) = (1.1, 1.5);
/// Plausible band for the sizing capacity factor (fraction).
pub const CAPACITY_FACTOR_RANGE: (f64, f64) = (0.15, 0.25);

/// Top-level scenario configuration parsed from TOML.
///
/// All tables are optional and default to the baseline scenario. Load from
/// TOML with [`ScenarioConfig::from_toml_file`] or use
/// [`ScenarioConfig::baseline`] for the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Facility load and sizing assumptions.
    #[serde(default)]
    pub load: LoadConfig,
    /// Reference plant whose ratios are scaled.
    #[serde(default)]
    pub reference: ReferenceProject,
    /// Site location and monthly climate.
    #[serde(default)]
    pub site: SiteProfile,
}

/// Facility load and sizing assumptions.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoadConfig {
    /// Compute (IT) load (MW).
    pub load_mw: f64,
    /// Power usage effectiveness.
    pub pue: f64,
    /// Solar capacity factor used for sizing (fraction, must be > 0).
    pub capacity_factor: f64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            load_mw: 5.0,
            pue: 1.2,
            capacity_factor: 0.20,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"load.capacity_factor"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "config error: {}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl ScenarioConfig {
    /// Returns the baseline scenario: 5 MW at PUE 1.2 and 20% capacity factor.
    pub fn baseline() -> Self {
        Self::default()
    }

    /// Returns the small-site preset: an efficient 1 MW edge facility.
    pub fn small_site() -> Self {
        Self {
            load: LoadConfig {
                load_mw: 1.0,
                pue: 1.1,
                capacity_factor: 0.25,
            },
            ..Self::default()
        }
    }

    /// Returns the hyperscale preset: 10 MW with heavy cooling overhead.
    pub fn hyperscale() -> Self {
        Self {
            load: LoadConfig {
                load_mw: 10.0,
                pue: 1.5,
                capacity_factor: 0.15,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "small_site", "hyperscale"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "small_site" => Ok(Self::small_site()),
            "hyperscale" => Ok(Self::hyperscale()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, contains unknown fields
    /// or a monthly array does not have exactly twelve entries.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates hard constraints and returns a list of errors.
    ///
    /// Only values that would make a computation singular are rejected;
    /// out-of-band but usable values are reported by
    /// [`ScenarioConfig::plausibility_warnings`] instead.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut require_positive = |field: &str, value: f64| {
            if !(value.is_finite() && value > 0.0) {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be > 0, got {value}"),
                });
            }
        };

        require_positive("load.load_mw", self.load.load_mw);
        require_positive("load.pue", self.load.pue);
        require_positive("load.capacity_factor", self.load.capacity_factor);
        let r = &self.reference;
        require_positive("reference.ac_capacity_mw", r.ac_capacity_mw);
        require_positive("reference.dc_ac_ratio", r.dc_ac_ratio);
        require_positive("reference.inverter_power_kva", r.inverter_power_kva);
        require_positive("reference.module_power_w", r.module_power_w);

        if r.module_count == 0 {
            errors.push(ConfigError {
                field: "reference.module_count".into(),
                message: "must be > 0".into(),
            });
        }
        if let Some(month) = self.site.first_negative_ghi() {
            errors.push(ConfigError {
                field: "site.monthly_ghi".into(),
                message: format!(
                    "must be non-negative, got {} at index {month}",
                    self.site.monthly_ghi[month]
                ),
            });
        }

        errors
    }

    /// Soft range checks on the load inputs.
    ///
    /// An empty vector means every input is inside its plausible band.
    pub fn plausibility_warnings(&self) -> Vec<PlausibilityWarning> {
        let l = &self.load;
        [
            ("load.load_mw", l.load_mw, LOAD_MW_RANGE),
            ("load.pue", l.pue, PUE_RANGE),
            ("load.capacity_factor", l.capacity_factor, CAPACITY_FACTOR_RANGE),
        ]
        .into_iter()
        .filter_map(|(field, value, (min, max))| {
            PlausibilityWarning::check(field, value, min, max)
        })
        .collect()
    }
}
