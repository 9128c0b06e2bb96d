//! Generic time-stamped samples and ordered series.

use thiserror::Error;

/// Immutable pair of a timestamp (seconds since test start) and a value.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSample<T> {
    time_s: f64,
    value: T,
}

impl<T> TimeSample<T> {
    pub fn new(time_s: f64, value: T) -> Self {
        Self { time_s, value }
    }

    /// Seconds elapsed since the start of the test.
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn into_value(self) -> T {
        self.value
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SeriesError {
    #[error("sample at {time_s} s precedes the previous sample at {previous_s} s")]
    OutOfOrder { time_s: f64, previous_s: f64 },
}

/// Chronologically ordered sequence of samples.
///
/// Timestamps are non-decreasing; equal timestamps are allowed so that event series can
/// carry simultaneous occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSeries<T> {
    samples: Vec<TimeSample<T>>,
}

impl<T> Default for SampledSeries<T> {
    fn default() -> Self {
        Self {
            samples: Vec::new(),
        }
    }
}

impl<T> SampledSeries<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a series from samples that must already be in chronological order.
    pub fn from_samples(samples: Vec<TimeSample<T>>) -> Result<Self, SeriesError> {
        let mut series = Self {
            samples: Vec::with_capacity(samples.len()),
        };
        for sample in samples {
            series.push(sample)?;
        }
        Ok(series)
    }

    /// Append a sample, rejecting timestamps earlier than the last one.
    pub fn push(&mut self, sample: TimeSample<T>) -> Result<(), SeriesError> {
        if let Some(last) = self.samples.last() {
            if sample.time_s < last.time_s {
                return Err(SeriesError::OutOfOrder {
                    time_s: sample.time_s,
                    previous_s: last.time_s,
                });
            }
        }
        self.samples.push(sample);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TimeSample<T>> {
        self.samples.get(index)
    }

    pub fn first(&self) -> Option<&TimeSample<T>> {
        self.samples.first()
    }

    pub fn last(&self) -> Option<&TimeSample<T>> {
        self.samples.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeSample<T>> {
        self.samples.iter()
    }

    pub fn as_slice(&self) -> &[TimeSample<T>] {
        &self.samples
    }

    /// Project every sample through `f`, keeping the timestamps.
    pub fn map<U, F>(&self, mut f: F) -> SampledSeries<U>
    where
        F: FnMut(&T) -> U,
    {
        SampledSeries {
            samples: self
                .samples
                .iter()
                .map(|s| TimeSample::new(s.time_s, f(&s.value)))
                .collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a SampledSeries<T> {
    type Item = &'a TimeSample<T>;
    type IntoIter = std::slice::Iter<'a, TimeSample<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
