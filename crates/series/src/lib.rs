//! Time-sampled spacecraft state series and the readers that produce them.
//!
//! Series come either from the propagation engine or from legacy reference files; both
//! land in a [`SampledSeries<StateSample>`] that the comparison crate consumes.

pub mod attitude;
pub mod channel;
pub mod reference;
pub mod sample;
pub mod state;

pub use attitude::{Attitude, EulerAngles, InvalidQuaternion, SingularityDetected};
pub use channel::Channel;
pub use reference::{
    ReferenceData, ReferenceError, ReferenceLayout, parse_reference, read_reference_file,
};
pub use sample::{SampledSeries, SeriesError, TimeSample};
pub use state::{AngularRates, StateSample};
