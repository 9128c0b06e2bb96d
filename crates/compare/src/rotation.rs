use regress_series::Attitude;

use crate::tracker::{DiffResult, MaxTracker};

/// Geodesic angle between two attitudes, in degrees.
///
/// The relative difference is taken against the rotation angle of the reference attitude
/// and skipped when that attitude is the identity.
#[derive(Debug, Clone, Default)]
pub struct RotationDiff {
    tracker: MaxTracker,
}

impl RotationDiff {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, reference: &Attitude, other: &Attitude) -> f64 {
        let distance_deg = reference.distance(other).to_degrees();
        self.tracker.update_absolute(distance_deg);
        let angle_deg = reference.angle().to_degrees();
        if angle_deg != 0.0 {
            self.tracker.update_relative(distance_deg / angle_deg);
        }
        distance_deg
    }

    pub fn result(&self) -> DiffResult {
        self.tracker.result()
    }
}
