/// Largest absolute and relative differences seen so far.
///
/// `max_relative` stays `None` until a sample produces a usable ratio, so it remains
/// unset when every reference magnitude was zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DiffResult {
    pub max_absolute: f64,
    pub max_relative: Option<f64>,
}

/// Running maxima of a difference metric.
#[derive(Debug, Clone, Default)]
pub struct MaxTracker {
    max_absolute: f64,
    max_relative: Option<f64>,
}

impl MaxTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the magnitude of an absolute difference.
    pub fn update_absolute(&mut self, difference: f64) {
        let magnitude = difference.abs();
        if magnitude > self.max_absolute {
            self.max_absolute = magnitude;
        }
    }

    /// Record a relative difference. Non-finite ratios are ignored.
    pub fn update_relative(&mut self, ratio: f64) {
        let ratio = ratio.abs();
        if !ratio.is_finite() {
            return;
        }
        self.max_relative = Some(match self.max_relative {
            Some(current) => current.max(ratio),
            None => ratio,
        });
    }

    pub fn result(&self) -> DiffResult {
        DiffResult {
            max_absolute: self.max_absolute,
            max_relative: self.max_relative,
        }
    }
}
