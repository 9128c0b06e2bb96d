//! Scalar channels extracted from state samples for element-wise comparison.
//!
//! Each channel is one chart of the regression report. Degree channels carry a
//! 360° wrap boundary so that 359.9° vs 0.1° compares as a small difference.

use regress_core::units::{m_to_km, ms_to_kms};
use regress_core::vector;
use regress_orbits::normalize_degrees;

use crate::attitude::{Attitude, EulerAngles};
use crate::state::StateSample;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    SemiMajorAxis,
    Eccentricity,
    Inclination,
    Raan,
    PerigeeArgument,
    MeanAnomaly,
    PerigeeArgumentPlusMeanAnomaly,
    RaanPlusPerigeeArgument,
    RaanPlusPerigeeArgumentPlusMeanAnomaly,
    H,
    K,
    P,
    Q,
    MeanLongitude,
    Position,
    PositionX,
    PositionY,
    PositionZ,
    Velocity,
    VelocityX,
    VelocityY,
    VelocityZ,
    Q0,
    Q1,
    Q2,
    Q3,
    RotationAngle,
    Roll,
    Pitch,
    Yaw,
    RotationRateX,
    RotationRateY,
    RotationRateZ,
    RotationAccelerationX,
    RotationAccelerationY,
    RotationAccelerationZ,
    PerigeeAltitude,
    ApogeeAltitude,
}

impl Channel {
    pub const ALL: [Channel; 38] = [
        Channel::SemiMajorAxis,
        Channel::Eccentricity,
        Channel::Inclination,
        Channel::Raan,
        Channel::PerigeeArgument,
        Channel::MeanAnomaly,
        Channel::PerigeeArgumentPlusMeanAnomaly,
        Channel::RaanPlusPerigeeArgument,
        Channel::RaanPlusPerigeeArgumentPlusMeanAnomaly,
        Channel::H,
        Channel::K,
        Channel::P,
        Channel::Q,
        Channel::MeanLongitude,
        Channel::Position,
        Channel::PositionX,
        Channel::PositionY,
        Channel::PositionZ,
        Channel::Velocity,
        Channel::VelocityX,
        Channel::VelocityY,
        Channel::VelocityZ,
        Channel::Q0,
        Channel::Q1,
        Channel::Q2,
        Channel::Q3,
        Channel::RotationAngle,
        Channel::Roll,
        Channel::Pitch,
        Channel::Yaw,
        Channel::RotationRateX,
        Channel::RotationRateY,
        Channel::RotationRateZ,
        Channel::RotationAccelerationX,
        Channel::RotationAccelerationY,
        Channel::RotationAccelerationZ,
        Channel::PerigeeAltitude,
        Channel::ApogeeAltitude,
    ];

    /// Short identifier, used in exported file names.
    pub fn key(self) -> &'static str {
        match self {
            Channel::SemiMajorAxis => "A",
            Channel::Eccentricity => "E",
            Channel::Inclination => "I",
            Channel::Raan => "RAAN",
            Channel::PerigeeArgument => "PA",
            Channel::MeanAnomaly => "MA",
            Channel::PerigeeArgumentPlusMeanAnomaly => "PA_MA",
            Channel::RaanPlusPerigeeArgument => "RAAN_PA",
            Channel::RaanPlusPerigeeArgumentPlusMeanAnomaly => "RAAN_PA_MA",
            Channel::H => "H",
            Channel::K => "K",
            Channel::P => "P",
            Channel::Q => "Q",
            Channel::MeanLongitude => "LM",
            Channel::Position => "POSITION",
            Channel::PositionX => "POSITION_X",
            Channel::PositionY => "POSITION_Y",
            Channel::PositionZ => "POSITION_Z",
            Channel::Velocity => "VELOCITY",
            Channel::VelocityX => "VELOCITY_X",
            Channel::VelocityY => "VELOCITY_Y",
            Channel::VelocityZ => "VELOCITY_Z",
            Channel::Q0 => "Q0",
            Channel::Q1 => "Q1",
            Channel::Q2 => "Q2",
            Channel::Q3 => "Q3",
            Channel::RotationAngle => "ROTATION_ANGLE",
            Channel::Roll => "ROLL",
            Channel::Pitch => "PITCH",
            Channel::Yaw => "YAW",
            Channel::RotationRateX => "ROTATION_RATE_X",
            Channel::RotationRateY => "ROTATION_RATE_Y",
            Channel::RotationRateZ => "ROTATION_RATE_Z",
            Channel::RotationAccelerationX => "ROTATION_ACCELERATION_X",
            Channel::RotationAccelerationY => "ROTATION_ACCELERATION_Y",
            Channel::RotationAccelerationZ => "ROTATION_ACCELERATION_Z",
            Channel::PerigeeAltitude => "PALT",
            Channel::ApogeeAltitude => "AALT",
        }
    }

    /// Human-readable title used in logs and chart captions.
    pub fn title(self) -> &'static str {
        match self {
            Channel::SemiMajorAxis => "Semi-major axis",
            Channel::Eccentricity => "Eccentricity",
            Channel::Inclination => "Inclination",
            Channel::Raan => "Right ascension of ascending node",
            Channel::PerigeeArgument => "Perigee argument",
            Channel::MeanAnomaly => "Mean anomaly",
            Channel::PerigeeArgumentPlusMeanAnomaly => "Perigee argument plus mean anomaly",
            Channel::RaanPlusPerigeeArgument => "RAAN plus perigee argument",
            Channel::RaanPlusPerigeeArgumentPlusMeanAnomaly => {
                "RAAN plus perigee argument plus mean anomaly"
            }
            Channel::H => "Ey/h component of eccentricity vector",
            Channel::K => "Ex/k component of eccentricity vector",
            Channel::P => "Hy/p component of inclination vector",
            Channel::Q => "Hx/q component of inclination vector",
            Channel::MeanLongitude => "Mean longitude argument",
            Channel::Position => "Position vector size",
            Channel::PositionX => "Position vector x",
            Channel::PositionY => "Position vector y",
            Channel::PositionZ => "Position vector z",
            Channel::Velocity => "Velocity vector size",
            Channel::VelocityX => "Velocity vector x",
            Channel::VelocityY => "Velocity vector y",
            Channel::VelocityZ => "Velocity vector z",
            Channel::Q0 => "Scalar coordinate of the quaternion",
            Channel::Q1 => "First coordinate of the vectorial part of the quaternion",
            Channel::Q2 => "Second coordinate of the vectorial part of the quaternion",
            Channel::Q3 => "Third coordinate of the vectorial part of the quaternion",
            Channel::RotationAngle => "Rotation angle",
            Channel::Roll => "Roll angle",
            Channel::Pitch => "Pitch angle",
            Channel::Yaw => "Yaw angle",
            Channel::RotationRateX => "Rotation rate x",
            Channel::RotationRateY => "Rotation rate y",
            Channel::RotationRateZ => "Rotation rate z",
            Channel::RotationAccelerationX => "Rotation acceleration x",
            Channel::RotationAccelerationY => "Rotation acceleration y",
            Channel::RotationAccelerationZ => "Rotation acceleration z",
            Channel::PerigeeAltitude => "Perigee altitude",
            Channel::ApogeeAltitude => "Apogee altitude",
        }
    }

    /// Unit suffix for reported values.
    pub fn unit(self) -> &'static str {
        match self {
            Channel::SemiMajorAxis
            | Channel::Position
            | Channel::PositionX
            | Channel::PositionY
            | Channel::PositionZ
            | Channel::PerigeeAltitude
            | Channel::ApogeeAltitude => "km",
            Channel::Velocity | Channel::VelocityX | Channel::VelocityY | Channel::VelocityZ => {
                "km/s"
            }
            Channel::RotationRateX | Channel::RotationRateY | Channel::RotationRateZ => "rad/s",
            Channel::RotationAccelerationX
            | Channel::RotationAccelerationY
            | Channel::RotationAccelerationZ => "rad/s^2",
            c if c.is_degree() => "°",
            _ => "",
        }
    }

    /// Values in degrees that wrap around at 360.
    pub fn is_degree(self) -> bool {
        matches!(
            self,
            Channel::Inclination
                | Channel::Raan
                | Channel::PerigeeArgument
                | Channel::MeanAnomaly
                | Channel::PerigeeArgumentPlusMeanAnomaly
                | Channel::RaanPlusPerigeeArgument
                | Channel::RaanPlusPerigeeArgumentPlusMeanAnomaly
                | Channel::MeanLongitude
                | Channel::RotationAngle
                | Channel::Roll
                | Channel::Pitch
                | Channel::Yaw
        )
    }

    /// Wrap boundary for boundary-corrected differences, 0 when the channel does not wrap.
    pub fn boundary(self) -> f64 {
        if self.is_degree() { 360.0 } else { 0.0 }
    }

    /// Extract the channel value, or `None` when the sample lacks the required data.
    pub fn value(self, state: &StateSample) -> Option<f64> {
        let p = &state.position;
        let v = &state.velocity;
        let value = match self {
            Channel::SemiMajorAxis => state.elements?.semi_major_axis_km,
            Channel::Eccentricity => state.elements?.eccentricity,
            Channel::Inclination => state.elements?.inclination_deg,
            Channel::Raan => state.elements?.raan_deg,
            Channel::PerigeeArgument => state.elements?.perigee_argument_deg,
            Channel::MeanAnomaly => state.elements?.mean_anomaly_deg,
            Channel::PerigeeArgumentPlusMeanAnomaly => state.elements?.pa_plus_ma_deg(),
            Channel::RaanPlusPerigeeArgument => state.elements?.raan_plus_pa_deg(),
            Channel::RaanPlusPerigeeArgumentPlusMeanAnomaly => {
                state.elements?.raan_plus_pa_plus_ma_deg()
            }
            Channel::H => state.elements?.h,
            Channel::K => state.elements?.k,
            Channel::P => state.elements?.p,
            Channel::Q => state.elements?.q,
            Channel::MeanLongitude => state.elements?.mean_longitude_deg,
            Channel::Position => m_to_km(vector::norm(p)),
            Channel::PositionX => m_to_km(p[0]),
            Channel::PositionY => m_to_km(p[1]),
            Channel::PositionZ => m_to_km(p[2]),
            Channel::Velocity => ms_to_kms(vector::norm(v)),
            Channel::VelocityX => ms_to_kms(v[0]),
            Channel::VelocityY => ms_to_kms(v[1]),
            Channel::VelocityZ => ms_to_kms(v[2]),
            Channel::Q0 => state.attitude?.components()[0],
            Channel::Q1 => state.attitude?.components()[1],
            Channel::Q2 => state.attitude?.components()[2],
            Channel::Q3 => state.attitude?.components()[3],
            Channel::RotationAngle => state.attitude?.angle().to_degrees(),
            Channel::Roll => normalize_degrees(euler_angles(&state.attitude?).roll.to_degrees()),
            Channel::Pitch => normalize_degrees(euler_angles(&state.attitude?).pitch.to_degrees()),
            Channel::Yaw => normalize_degrees(euler_angles(&state.attitude?).yaw.to_degrees()),
            Channel::RotationRateX => state.rates?.rate[0],
            Channel::RotationRateY => state.rates?.rate[1],
            Channel::RotationRateZ => state.rates?.rate[2],
            Channel::RotationAccelerationX => state.rates?.acceleration[0],
            Channel::RotationAccelerationY => state.rates?.acceleration[1],
            Channel::RotationAccelerationZ => state.rates?.acceleration[2],
            Channel::PerigeeAltitude => state.elements?.perigee_altitude_km(),
            Channel::ApogeeAltitude => state.elements?.apogee_altitude_km(),
        };
        Some(value)
    }
}

/// Euler angles of an attitude, with zero angles substituted at gimbal lock.
fn euler_angles(attitude: &Attitude) -> EulerAngles {
    attitude.euler_angles().unwrap_or_else(|err| {
        log::debug!("{err}; substituting zero angles");
        EulerAngles::ZERO
    })
}
