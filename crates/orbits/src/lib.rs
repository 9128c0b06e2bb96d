//! Orbital element helpers: angle normalisation and the derived quantities the
//! regression charts track (element sums, perigee/apogee altitudes).
use regress_core::constants::EGM96_EARTH_EQUATORIAL_RADIUS_KM;
use std::f64::consts::{PI, TAU};

/// Normalise an angle (radians) into `[center - π, center + π)`.
///
/// `center = π` yields `[0, 2π)`, `center = 0` yields `[-π, π)`.
pub fn normalize_angle(angle: f64, center: f64) -> f64 {
    angle - TAU * ((angle + PI - center) / TAU).floor()
}

/// Normalise an angle given in degrees into `[0, 360)`.
pub fn normalize_degrees(angle_deg: f64) -> f64 {
    angle_deg - 360.0 * (angle_deg / 360.0).floor()
}

/// Keplerian plus equinoctial element set as tabulated by the legacy reference files.
///
/// Angles are in degrees, the semi-major axis in kilometres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalElements {
    pub semi_major_axis_km: f64,
    pub eccentricity: f64,
    pub inclination_deg: f64,
    pub raan_deg: f64,
    pub perigee_argument_deg: f64,
    pub mean_anomaly_deg: f64,
    /// Ey component of the eccentricity vector.
    pub h: f64,
    /// Ex component of the eccentricity vector.
    pub k: f64,
    /// Hy component of the inclination vector.
    pub p: f64,
    /// Hx component of the inclination vector.
    pub q: f64,
    pub mean_longitude_deg: f64,
}

impl OrbitalElements {
    /// Argument of perigee plus mean anomaly, in `[0, 360)`.
    pub fn pa_plus_ma_deg(&self) -> f64 {
        normalize_degrees(self.perigee_argument_deg + self.mean_anomaly_deg)
    }

    /// Right ascension of the ascending node plus argument of perigee, in `[0, 360)`.
    pub fn raan_plus_pa_deg(&self) -> f64 {
        normalize_degrees(self.raan_deg + self.perigee_argument_deg)
    }

    /// RAAN plus argument of perigee plus mean anomaly, in `[0, 360)`.
    pub fn raan_plus_pa_plus_ma_deg(&self) -> f64 {
        normalize_degrees(self.raan_deg + self.perigee_argument_deg + self.mean_anomaly_deg)
    }

    /// Perigee altitude above the EGM96 equatorial radius (km).
    pub fn perigee_altitude_km(&self) -> f64 {
        perigee_altitude_km(self.semi_major_axis_km, self.eccentricity)
    }

    /// Apogee altitude above the EGM96 equatorial radius (km).
    pub fn apogee_altitude_km(&self) -> f64 {
        apogee_altitude_km(self.semi_major_axis_km, self.eccentricity)
    }
}

/// Perigee altitude (km) from semi-major axis (km) and eccentricity.
pub fn perigee_altitude_km(semi_major_axis_km: f64, eccentricity: f64) -> f64 {
    semi_major_axis_km * (1.0 - eccentricity) - EGM96_EARTH_EQUATORIAL_RADIUS_KM
}

/// Apogee altitude (km) from semi-major axis (km) and eccentricity.
pub fn apogee_altitude_km(semi_major_axis_km: f64, eccentricity: f64) -> f64 {
    semi_major_axis_km * (1.0 + eccentricity) - EGM96_EARTH_EQUATORIAL_RADIUS_KM
}
