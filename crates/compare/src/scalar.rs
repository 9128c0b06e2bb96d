use crate::tracker::{DiffResult, MaxTracker};

/// Difference `main - secondary`, shifted by one period when that brings it closer to zero.
///
/// A `boundary` of zero disables the correction. With a 360° boundary, 359.9 against 0.1
/// yields about -0.2 instead of 359.8.
pub fn boundary_corrected(main: f64, secondary: f64, boundary: f64) -> f64 {
    let raw = main - secondary;
    if boundary == 0.0 {
        return raw;
    }
    let shifted = if raw >= 0.0 {
        raw - boundary
    } else {
        raw + boundary
    };
    if shifted.abs() < raw.abs() {
        shifted
    } else {
        raw
    }
}

/// Scalar difference with wrap-around correction for periodic quantities.
#[derive(Debug, Clone)]
pub struct BoundaryCorrectedScalarDiff {
    boundary: f64,
    tracker: MaxTracker,
}

impl BoundaryCorrectedScalarDiff {
    pub fn new(boundary: f64) -> Self {
        Self {
            boundary,
            tracker: MaxTracker::new(),
        }
    }

    pub fn boundary(&self) -> f64 {
        self.boundary
    }

    /// Compare `main` against `secondary` and return the corrected signed difference.
    pub fn apply(&mut self, main: f64, secondary: f64) -> f64 {
        let difference = boundary_corrected(main, secondary, self.boundary);
        self.tracker.update_absolute(difference);
        if main != 0.0 {
            self.tracker.update_relative(difference / main);
        }
        difference
    }

    pub fn result(&self) -> DiffResult {
        self.tracker.result()
    }
}
