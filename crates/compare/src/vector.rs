use regress_core::vector::{self, Vector3};

use crate::tracker::{DiffResult, MaxTracker};

/// Norm of the difference between two vectors, tracked against the reference magnitude.
#[derive(Debug, Clone, Default)]
pub struct VectorDiff {
    tracker: MaxTracker,
}

impl VectorDiff {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare `reference` against `other` and return `|reference - other|`.
    pub fn apply(&mut self, reference: &Vector3, other: &Vector3) -> f64 {
        let difference = vector::norm(&vector::sub(reference, other));
        self.tracker.update_absolute(difference);
        let magnitude = vector::norm(reference);
        if magnitude != 0.0 {
            self.tracker.update_relative(difference / magnitude);
        }
        difference
    }

    pub fn result(&self) -> DiffResult {
        self.tracker.result()
    }
}
