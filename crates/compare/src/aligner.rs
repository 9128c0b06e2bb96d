//! Index-wise pairing of a reference series with a computed series.
//!
//! Samples are paired by position, not by timestamp; the per-pair time offset is tracked
//! so that a drift between the two time grids shows up in the report.

use regress_series::{Channel, SampledSeries, StateSample, TimeSample};
use thiserror::Error;

use crate::rotation::RotationDiff;
use crate::scalar::BoundaryCorrectedScalarDiff;
use crate::tracker::{DiffResult, MaxTracker};
use crate::vector::VectorDiff;

/// What to do when the two series have different lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlignmentPolicy {
    /// Compare the common prefix and drop the trailing samples of the longer series.
    #[default]
    Truncate,
    /// Refuse to compare series of different lengths.
    Strict,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("series lengths differ: reference has {reference} samples, other has {other}")]
    LengthMismatch { reference: usize, other: usize },
}

/// Differences computed for one aligned pair of samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PairDiff {
    pub index: usize,
    /// Reference sample time (s).
    pub time_s: f64,
    /// Reference time minus other time (s).
    pub time_offset_s: f64,
    pub position_m: f64,
    pub velocity_m_s: f64,
    /// Rotation distance (deg), when both samples carry an attitude.
    pub attitude_deg: Option<f64>,
}

/// Outcome of aligning and diffing two series.
#[derive(Debug, Clone, PartialEq)]
pub struct Alignment {
    /// Number of pairs compared.
    pub compared: usize,
    /// Trailing reference samples without a counterpart.
    pub dropped_reference: usize,
    /// Trailing samples of the other series without a counterpart.
    pub dropped_other: usize,
    pub position: DiffResult,
    pub velocity: DiffResult,
    /// Time offset between paired samples; only the absolute maximum is meaningful.
    pub occurrence: DiffResult,
    /// `None` when no pair had an attitude on both sides.
    pub attitude: Option<DiffResult>,
    pub samples: Vec<PairDiff>,
}

impl Alignment {
    pub fn is_truncated(&self) -> bool {
        self.dropped_reference > 0 || self.dropped_other > 0
    }
}

/// One channel difference at a reference time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSample {
    pub time_s: f64,
    pub difference: f64,
}

/// Boundary-corrected scalar comparison of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelComparison {
    pub channel: Channel,
    pub result: DiffResult,
    pub samples: Vec<ChannelSample>,
}

impl ChannelComparison {
    /// Whether any pair carried the channel on both sides.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeriesAligner {
    policy: AlignmentPolicy,
}

impl SeriesAligner {
    pub fn new(policy: AlignmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AlignmentPolicy {
        self.policy
    }

    /// Pair `reference` with `other` by index and diff position, velocity, time and attitude.
    pub fn compare(
        &self,
        reference: &SampledSeries<StateSample>,
        other: &SampledSeries<StateSample>,
    ) -> Result<Alignment, CompareError> {
        self.check_lengths(reference, other)?;
        let alignment = diff_pairs(reference, other);
        if alignment.is_truncated() {
            log::debug!(
                "compared {} pairs; dropped {} reference and {} other samples",
                alignment.compared,
                alignment.dropped_reference,
                alignment.dropped_other
            );
        }
        Ok(alignment)
    }

    /// Boundary-corrected scalar differences for each requested channel.
    ///
    /// Pairs where either sample lacks the channel are skipped.
    pub fn compare_channels(
        &self,
        reference: &SampledSeries<StateSample>,
        other: &SampledSeries<StateSample>,
        channels: &[Channel],
    ) -> Result<Vec<ChannelComparison>, CompareError> {
        self.check_lengths(reference, other)?;
        let comparisons = channels
            .iter()
            .map(|&channel| {
                let mut diff = BoundaryCorrectedScalarDiff::new(channel.boundary());
                let samples = paired(reference, other)
                    .filter_map(|(a, b)| {
                        let main = channel.value(a.value())?;
                        let secondary = channel.value(b.value())?;
                        Some(ChannelSample {
                            time_s: a.time_s(),
                            difference: diff.apply(main, secondary),
                        })
                    })
                    .collect();
                ChannelComparison {
                    channel,
                    result: diff.result(),
                    samples,
                }
            })
            .collect();
        Ok(comparisons)
    }

    fn check_lengths<T>(
        &self,
        reference: &SampledSeries<T>,
        other: &SampledSeries<T>,
    ) -> Result<(), CompareError> {
        if self.policy == AlignmentPolicy::Strict && reference.len() != other.len() {
            return Err(CompareError::LengthMismatch {
                reference: reference.len(),
                other: other.len(),
            });
        }
        Ok(())
    }
}

fn paired<'a, T>(
    reference: &'a SampledSeries<T>,
    other: &'a SampledSeries<T>,
) -> impl Iterator<Item = (&'a TimeSample<T>, &'a TimeSample<T>)> {
    reference.iter().zip(other.iter())
}

/// Align with the default truncating policy.
pub fn compare(
    reference: &SampledSeries<StateSample>,
    other: &SampledSeries<StateSample>,
) -> Alignment {
    diff_pairs(reference, other)
}

fn diff_pairs(
    reference: &SampledSeries<StateSample>,
    other: &SampledSeries<StateSample>,
) -> Alignment {
    let pairs = reference.len().min(other.len());
    let mut position = VectorDiff::new();
    let mut velocity = VectorDiff::new();
    let mut occurrence = MaxTracker::new();
    let mut attitude = RotationDiff::new();
    let mut any_attitude = false;
    let mut samples = Vec::with_capacity(pairs);

    for (index, (a, b)) in paired(reference, other).enumerate() {
        let (sa, sb) = (a.value(), b.value());
        let time_offset_s = a.time_s() - b.time_s();
        occurrence.update_absolute(time_offset_s);

        let attitude_deg = match (&sa.attitude, &sb.attitude) {
            (Some(ra), Some(rb)) => {
                any_attitude = true;
                Some(attitude.apply(ra, rb))
            }
            _ => None,
        };

        samples.push(PairDiff {
            index,
            time_s: a.time_s(),
            time_offset_s,
            position_m: position.apply(&sa.position, &sb.position),
            velocity_m_s: velocity.apply(&sa.velocity, &sb.velocity),
            attitude_deg,
        });
    }

    Alignment {
        compared: pairs,
        dropped_reference: reference.len() - pairs,
        dropped_other: other.len() - pairs,
        position: position.result(),
        velocity: velocity.result(),
        occurrence: occurrence.result(),
        attitude: any_attitude.then(|| attitude.result()),
        samples,
    }
}
