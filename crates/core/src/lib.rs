//! Core units, constants, and shared primitives for the trajectory regression workspace.

/// Physical constants expressed in SI units (unless stated otherwise).
pub mod constants {
    /// Seconds per day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    /// Earth equatorial radius from the EGM96 model (m).
    pub const EGM96_EARTH_EQUATORIAL_RADIUS_M: f64 = 6_378_136.3;
    /// Earth equatorial radius from the EGM96 model (km).
    pub const EGM96_EARTH_EQUATORIAL_RADIUS_KM: f64 = EGM96_EARTH_EQUATORIAL_RADIUS_M / 1_000.0;
    /// Mean lunar radius (m).
    pub const MOON_RADIUS_M: f64 = 1_737_400.0;
    /// Nominal solar radius (m).
    pub const SUN_RADIUS_M: f64 = 6.957e8;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert kilometres to metres.
    #[inline]
    pub fn km_to_m(v: f64) -> f64 {
        v * 1_000.0
    }

    /// Convert metres to kilometres.
    #[inline]
    pub fn m_to_km(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert metres per second to kilometres per second.
    #[inline]
    pub fn ms_to_kms(v: f64) -> f64 {
        v / 1_000.0
    }

    /// Convert kilometres per second to metres per second.
    #[inline]
    pub fn kms_to_ms(v: f64) -> f64 {
        v * 1_000.0
    }
}

/// Lightweight time utilities shared across crates.
pub mod time {
    use super::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR};

    /// Unit used for the time axis of exported series and charts.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum TimeAxis {
        #[default]
        Seconds,
        Hours,
        Days,
    }

    impl TimeAxis {
        /// Express elapsed seconds in this axis unit.
        pub fn convert(self, seconds: f64) -> f64 {
            match self {
                TimeAxis::Seconds => seconds,
                TimeAxis::Hours => seconds_to_hours(seconds),
                TimeAxis::Days => seconds_to_days(seconds),
            }
        }

        /// Short unit label for axis descriptions.
        pub fn unit_label(self) -> &'static str {
            match self {
                TimeAxis::Seconds => "s",
                TimeAxis::Hours => "h",
                TimeAxis::Days => "days",
            }
        }
    }

    /// Convert seconds to days.
    #[inline]
    pub fn seconds_to_days(seconds: f64) -> f64 {
        seconds / SECONDS_PER_DAY
    }

    /// Convert seconds to hours.
    #[inline]
    pub fn seconds_to_hours(seconds: f64) -> f64 {
        seconds / SECONDS_PER_HOUR
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector in metres or m/s depending on context.
    pub type Vector3 = [f64; 3];

    /// The zero vector.
    pub const ZERO: Vector3 = [0.0; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }

    /// Cross product of two vectors.
    #[inline]
    pub fn cross(a: &Vector3, b: &Vector3) -> Vector3 {
        [
            a[1] * b[2] - a[2] * b[1],
            a[2] * b[0] - a[0] * b[2],
            a[0] * b[1] - a[1] * b[0],
        ]
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub(a: &Vector3, b: &Vector3) -> Vector3 {
        [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
    }

    /// Negate a vector.
    #[inline]
    pub fn neg(v: &Vector3) -> Vector3 {
        [-v[0], -v[1], -v[2]]
    }

    /// Angle between two vectors in radians, in `[0, π]`.
    ///
    /// Near-parallel and near-antiparallel vectors go through the cross product, where
    /// `acos` loses precision. Returns 0 when either vector is zero.
    pub fn angle(a: &Vector3, b: &Vector3) -> f64 {
        let norm_product = norm(a) * norm(b);
        if norm_product == 0.0 {
            return 0.0;
        }
        let cos = dot(a, b) / norm_product;
        const THRESHOLD: f64 = 0.9999;
        if cos.abs() > THRESHOLD {
            let sin = (norm(&cross(a, b)) / norm_product).min(1.0);
            if cos >= 0.0 {
                sin.asin()
            } else {
                std::f64::consts::PI - sin.asin()
            }
        } else {
            cos.acos()
        }
    }
}
