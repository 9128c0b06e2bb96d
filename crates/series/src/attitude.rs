//! Spacecraft orientation stored as a unit quaternion.
//!
//! Components follow the legacy file ordering `(q0, q1, q2, q3)` with `q0` the scalar part.
//! The rotation is interpreted as a frame transform: [`Attitude::apply_to`] expresses a
//! reference-frame vector in the body frame.

use nalgebra::{Quaternion, Unit, UnitQuaternion, Vector3};
use thiserror::Error;

/// Threshold on `|sin(pitch)|` above which yaw and roll are no longer separable.
const SINGULARITY_THRESHOLD: f64 = 0.999_999_999_9;

#[derive(Debug, Error, PartialEq)]
#[error("quaternion ({q0}, {q1}, {q2}, {q3}) has zero norm")]
pub struct InvalidQuaternion {
    pub q0: f64,
    pub q1: f64,
    pub q2: f64,
    pub q3: f64,
}

/// Cardan angle extraction hit gimbal lock (pitch at ±90°).
#[derive(Debug, Error, Clone, Copy, PartialEq)]
#[error("Cardan angles singularity: |sin(pitch)| = {sin_pitch}")]
pub struct SingularityDetected {
    pub sin_pitch: f64,
}

/// Yaw/pitch/roll in radians for a ZYX rotation sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EulerAngles {
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl EulerAngles {
    /// Value substituted by callers when extraction reports a singularity.
    pub const ZERO: EulerAngles = EulerAngles {
        yaw: 0.0,
        pitch: 0.0,
        roll: 0.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Attitude(UnitQuaternion<f64>);

impl Attitude {
    pub fn identity() -> Self {
        Self(UnitQuaternion::identity())
    }

    /// Build an attitude from raw components, normalising them.
    pub fn from_components(q0: f64, q1: f64, q2: f64, q3: f64) -> Result<Self, InvalidQuaternion> {
        Unit::try_new(Quaternion::new(q0, q1, q2, q3), f64::EPSILON)
            .map(Self)
            .ok_or(InvalidQuaternion { q0, q1, q2, q3 })
    }

    /// Frame-transform rotation of `angle` radians about `axis`.
    pub fn from_axis_angle(axis: [f64; 3], angle: f64) -> Self {
        let axis = Unit::new_normalize(Vector3::new(axis[0], axis[1], axis[2]));
        Self(UnitQuaternion::from_axis_angle(&axis, angle))
    }

    /// Components `[q0, q1, q2, q3]`.
    pub fn components(&self) -> [f64; 4] {
        let q = self.0.quaternion();
        [q.w, q.i, q.j, q.k]
    }

    /// Rotation angle in radians, in `[0, π]`.
    pub fn angle(&self) -> f64 {
        self.0.angle()
    }

    /// Geodesic angle (radians) between two orientations.
    pub fn distance(&self, other: &Attitude) -> f64 {
        self.0.angle_to(&other.0)
    }

    /// Express a reference-frame vector in the rotated frame.
    pub fn apply_to(&self, v: [f64; 3]) -> [f64; 3] {
        let r = self.0.inverse_transform_vector(&Vector3::new(v[0], v[1], v[2]));
        [r.x, r.y, r.z]
    }

    /// Express a rotated-frame vector back in the reference frame.
    pub fn apply_inverse_to(&self, v: [f64; 3]) -> [f64; 3] {
        let r = self.0.transform_vector(&Vector3::new(v[0], v[1], v[2]));
        [r.x, r.y, r.z]
    }

    /// Yaw, pitch, roll for the ZYX sequence.
    ///
    /// Pitch is kept in `[-π/2, π/2]`; near ±π/2 yaw and roll are coupled and the
    /// extraction reports [`SingularityDetected`] instead of returning arbitrary values.
    pub fn euler_angles(&self) -> Result<EulerAngles, SingularityDetected> {
        let v1 = self.apply_to([1.0, 0.0, 0.0]);
        let v2 = self.apply_inverse_to([0.0, 0.0, 1.0]);
        if v2[0].abs() > SINGULARITY_THRESHOLD {
            return Err(SingularityDetected { sin_pitch: v2[0] });
        }
        Ok(EulerAngles {
            yaw: (-v1[1]).atan2(v1[0]),
            pitch: v2[0].asin(),
            roll: (-v2[1]).atan2(v2[2]),
        })
    }
}
