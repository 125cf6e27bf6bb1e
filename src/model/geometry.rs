//! Sun position and plane-of-array irradiance.
//!
//! Angles enter and leave in degrees; conversion to radians happens locally.
//! Azimuths are measured from the equator-facing direction (0° at solar
//! noon), positive toward the afternoon sun.

use serde::Serialize;

/// Amplitude of the single-harmonic declination approximation (degrees).
const DECLINATION_AMPLITUDE_DEG: f64 = 23.45;
/// Hour-angle rate (degrees per hour).
const DEG_PER_HOUR: f64 = 15.0;
/// Floor on `sin(elevation)` when deriving beam irradiance.
const MIN_SIN_ELEVATION: f64 = 0.1;
/// Share of GHI treated as isotropic diffuse on the tilted plane.
const DIFFUSE_FRACTION: f64 = 0.1;

/// Sun position relative to the site horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SolarPosition {
    /// Elevation above the horizon (degrees, negative below it).
    pub elevation_deg: f64,
    /// Azimuth from the equator-facing direction (degrees).
    pub azimuth_deg: f64,
}

impl SolarPosition {
    /// Whether the sun is strictly above the horizon.
    pub fn is_above_horizon(&self) -> bool {
        self.elevation_deg > 0.0
    }
}

/// Solar declination for a day of year (degrees).
pub fn declination_deg(day_of_year: u32) -> f64 {
    let angle = 360.0 * (284.0 + f64::from(day_of_year)) / 365.0;
    DECLINATION_AMPLITUDE_DEG * angle.to_radians().sin()
}

/// Sun elevation and azimuth at `hour` (solar time) on `day_of_year`.
pub fn solar_position(day_of_year: u32, latitude_deg: f64, hour: f64) -> SolarPosition {
    let decl = declination_deg(day_of_year).to_radians();
    let lat = latitude_deg.to_radians();
    let hour_angle = (DEG_PER_HOUR * (hour - 12.0)).to_radians();

    let sin_elevation = decl.sin() * lat.sin() + decl.cos() * lat.cos() * hour_angle.cos();
    let elevation = sin_elevation.clamp(-1.0, 1.0).asin();

    let azimuth = hour_angle
        .sin()
        .atan2(hour_angle.cos() * lat.sin() - decl.tan() * lat.cos());

    SolarPosition {
        elevation_deg: elevation.to_degrees(),
        azimuth_deg: azimuth.to_degrees(),
    }
}

/// Cosine of the angle between the tilted-surface normal and the sun vector.
pub fn incidence_cosine(
    tilt_deg: f64,
    surface_azimuth_deg: f64,
    solar_elevation_deg: f64,
    solar_azimuth_deg: f64,
) -> f64 {
    let elev = solar_elevation_deg.to_radians();
    let tilt = tilt_deg.to_radians();
    let rel_azimuth = (solar_azimuth_deg - surface_azimuth_deg).to_radians();
    elev.sin() * tilt.cos() + elev.cos() * tilt.sin() * rel_azimuth.cos()
}

/// Irradiance on the tilted array plane, in the units of `ghi`.
///
/// Returns exactly `0.0` when the sun is at or below the horizon. Otherwise a
/// beam component is recovered from GHI through `max(0.1, sin(elevation))`
/// and projected on the plane, and a simplified isotropic diffuse term
/// `ghi * 0.1 * (1 + cos(tilt)) / 2` is added. The result is never negative.
pub fn poa_irradiance(
    ghi: f64,
    tilt_deg: f64,
    surface_azimuth_deg: f64,
    solar_elevation_deg: f64,
    solar_azimuth_deg: f64,
) -> f64 {
    if solar_elevation_deg <= 0.0 {
        return 0.0;
    }

    let cos_incidence = incidence_cosine(
        tilt_deg,
        surface_azimuth_deg,
        solar_elevation_deg,
        solar_azimuth_deg,
    );
    let sin_elevation = solar_elevation_deg.to_radians().sin();
    let beam_normal = ghi * cos_incidence.max(0.0) / sin_elevation.max(MIN_SIN_ELEVATION);
    let diffuse = ghi * DIFFUSE_FRACTION * (1.0 + tilt_deg.to_radians().cos()) / 2.0;

    (beam_normal * cos_incidence + diffuse).max(0.0)
}
