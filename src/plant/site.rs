//! Location and monthly climate series for the plant site.

use serde::{Deserialize, Serialize};

/// Days per calendar month on a fixed non-leap calendar, January first.
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Three-letter month labels, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Static site description with a twelve-month irradiance and temperature profile.
///
/// Both series are fixed-size arrays indexed by month (0 = January), so a
/// profile with the wrong number of months cannot be constructed. The default
/// is Highvale, Alberta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteProfile {
    /// Latitude (degrees, north positive).
    pub latitude_deg: f64,
    /// Longitude (degrees, east positive).
    pub longitude_deg: f64,
    /// Altitude above sea level (m).
    pub altitude_m: f64,
    /// Monthly global horizontal irradiation (kWh/m²).
    pub monthly_ghi: [f64; 12],
    /// Monthly mean ambient temperature (°C).
    pub monthly_ambient_temp_c: [f64; 12],
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            latitude_deg: 53.49,
            longitude_deg: -114.49,
            altitude_m: 742.26,
            monthly_ghi: [
                28.1, 51.8, 100.0, 136.1, 172.1, 176.2, 179.7, 151.8, 102.0, 59.7, 30.7, 21.0,
            ],
            monthly_ambient_temp_c: [
                -8.47, -2.16, -5.69, 2.17, 11.25, 14.75, 18.2, 15.98, 10.3, 3.13, -7.41, -12.95,
            ],
        }
    }
}

impl SiteProfile {
    /// Annual global horizontal irradiation (kWh/m²).
    pub fn annual_ghi(&self) -> f64 {
        self.monthly_ghi.iter().sum()
    }

    /// Index of the first month with a negative GHI entry, if any.
    pub fn first_negative_ghi(&self) -> Option<usize> {
        self.monthly_ghi.iter().position(|&g| g < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calendar_is_non_leap() {
        assert_eq!(DAYS_IN_MONTH.iter().sum::<u32>(), 365);
        assert_eq!(DAYS_IN_MONTH[1], 28);
    }

    #[test]
    fn default_site_has_non_negative_ghi() {
        let site = SiteProfile::default();
        assert!(site.first_negative_ghi().is_none());
        assert!((site.annual_ghi() - 1209.2).abs() < 1e-9);
    }

    #[test]
    fn negative_ghi_is_located() {
        let mut site = SiteProfile::default();
        site.monthly_ghi[4] = -1.0;
        assert_eq!(site.first_negative_ghi(), Some(4));
    }
}
