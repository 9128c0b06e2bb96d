//! Spacecraft state carried by every sample of a compared series.

use regress_core::vector::Vector3;
use regress_orbits::OrbitalElements;

use crate::attitude::Attitude;

/// Angular rate and angular acceleration of the spacecraft body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularRates {
    /// Rotation rate (rad/s).
    pub rate: Vector3,
    /// Rotation acceleration (rad/s²).
    pub acceleration: Vector3,
}

/// Position/velocity record with optional attitude, rates, and orbital elements.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSample {
    /// Position (m).
    pub position: Vector3,
    /// Velocity (m/s).
    pub velocity: Vector3,
    pub attitude: Option<Attitude>,
    pub rates: Option<AngularRates>,
    pub elements: Option<OrbitalElements>,
}

impl StateSample {
    /// State carrying only position and velocity.
    pub fn pv(position: Vector3, velocity: Vector3) -> Self {
        Self {
            position,
            velocity,
            attitude: None,
            rates: None,
            elements: None,
        }
    }

    pub fn with_attitude(mut self, attitude: Attitude) -> Self {
        self.attitude = Some(attitude);
        self
    }

    pub fn with_rates(mut self, rates: AngularRates) -> Self {
        self.rates = Some(rates);
        self
    }

    pub fn with_elements(mut self, elements: OrbitalElements) -> Self {
        self.elements = Some(elements);
        self
    }
}
