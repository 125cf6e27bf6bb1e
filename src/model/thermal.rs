//! Module temperature and temperature-corrected power output.

/// Default nominal operating cell temperature (°C).
pub const DEFAULT_NOCT_C: f64 = 45.0;
/// Default power temperature coefficient (per °C).
pub const DEFAULT_TEMP_COEFF: f64 = -0.0028;
/// Standard test condition cell temperature (°C).
pub const STC_TEMP_C: f64 = 25.0;
/// Standard test condition irradiance (W/m²).
pub const STC_IRRADIANCE: f64 = 1000.0;

/// Linear NOCT cell-temperature model.
///
/// `ambient_c + (noct - 20) * irradiance / 800`.
pub fn module_temperature(ambient_c: f64, irradiance: f64, noct_c: f64) -> f64 {
    ambient_c + (noct_c - 20.0) * irradiance / 800.0
}

/// Module output (W) at `irradiance` and `module_temp_c`.
///
/// Not floored: a tiny negative value near zero irradiance is a valid result.
pub fn power_output(
    irradiance: f64,
    module_temp_c: f64,
    rated_power_w: f64,
    temp_coeff: f64,
) -> f64 {
    let temp_factor = 1.0 + temp_coeff * (module_temp_c - STC_TEMP_C);
    rated_power_w * (irradiance / STC_IRRADIANCE) * temp_factor
}

/// Thermal derate relative to STC (%, positive means loss).
///
/// Uses the magnitude of `temp_coeff`, so the default coefficient gives
/// `0.28 %` per degree above 25 °C.
pub fn temperature_losses_pct(module_temp_c: f64, temp_coeff: f64) -> f64 {
    (module_temp_c - STC_TEMP_C) * temp_coeff.abs() * 100.0
}

/// Thermal parameters of the installed module.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalPowerModel {
    /// Nominal operating cell temperature (°C).
    pub noct_c: f64,
    /// Power temperature coefficient (per °C, usually negative).
    pub temp_coeff: f64,
    /// Nameplate module power (W).
    pub rated_power_w: f64,
}

impl ThermalPowerModel {
    /// Model with default NOCT and temperature coefficient.
    pub fn new(rated_power_w: f64) -> Self {
        Self {
            noct_c: DEFAULT_NOCT_C,
            temp_coeff: DEFAULT_TEMP_COEFF,
            rated_power_w,
        }
    }

    /// Returns `(module_temp_c, power_w)` for one operating point.
    pub fn evaluate(&self, ambient_c: f64, irradiance: f64) -> (f64, f64) {
        let temp = module_temperature(ambient_c, irradiance, self.noct_c);
        let power = power_output(irradiance, temp, self.rated_power_w, self.temp_coeff);
        (temp, power)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noct_conditions_reach_noct() {
        // 800 W/m² at 20 °C ambient is the NOCT definition
        assert_eq!(module_temperature(20.0, 800.0, 45.0), 45.0);
    }

    #[test]
    fn no_irradiance_keeps_ambient() {
        assert_eq!(module_temperature(-12.95, 0.0, 45.0), -12.95);
    }

    #[test]
    fn stc_output_is_rated() {
        assert_eq!(power_output(1000.0, 25.0, 625.0, DEFAULT_TEMP_COEFF), 625.0);
    }

    #[test]
    fn hot_module_loses_power() {
        let p = power_output(1000.0, 35.0, 625.0, DEFAULT_TEMP_COEFF);
        assert!((p - 625.0 * (1.0 - 0.028)).abs() < 1e-9);
    }

    #[test]
    fn cold_module_gains_power() {
        assert!(power_output(1000.0, -10.0, 625.0, DEFAULT_TEMP_COEFF) > 625.0);
    }

    #[test]
    fn negative_output_is_not_floored() {
        // Extreme temperature drives the factor negative; the sign carries through
        let p = power_output(1.0, 500.0, 625.0, DEFAULT_TEMP_COEFF);
        assert!(p < 0.0);
    }

    #[test]
    fn temperature_losses_per_degree() {
        assert!((temperature_losses_pct(35.0, DEFAULT_TEMP_COEFF) - 2.8).abs() < 1e-9);
        assert!(temperature_losses_pct(15.0, DEFAULT_TEMP_COEFF) < 0.0);
    }

    #[test]
    fn evaluate_chains_temperature_into_power() {
        let model = ThermalPowerModel::new(625.0);
        let (temp, power) = model.evaluate(20.0, 800.0);
        assert_eq!(temp, 45.0);
        assert!((power - 625.0 * 0.8 * (1.0 - 0.0028 * 20.0)).abs() < 1e-9);
    }
}
