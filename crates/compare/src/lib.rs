//! Numeric comparison of two trajectory series.
//!
//! Every metric feeds a [`MaxTracker`]; the immutable [`DiffResult`] snapshots are what
//! the [`Report`] formats and what the exporters persist.

pub mod aligner;
pub mod report;
pub mod rotation;
pub mod scalar;
pub mod tracker;
pub mod vector;

pub use aligner::{
    Alignment, AlignmentPolicy, ChannelComparison, ChannelSample, CompareError, PairDiff,
    SeriesAligner, compare,
};
pub use report::{Report, ReportEntry, format_magnitude};
pub use rotation::RotationDiff;
pub use scalar::{BoundaryCorrectedScalarDiff, boundary_corrected};
pub use tracker::{DiffResult, MaxTracker};
pub use vector::VectorDiff;
