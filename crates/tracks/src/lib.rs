//! Deterministic experiment bucketing: named tracks, hash-based assignment,
//! and weighted composition of track sets.

mod multi;
mod param;
mod set;
mod simple;
mod track;

pub use multi::{MultiEntry, MultiTrackSet};
pub use param::ParamTrackSet;
pub use set::TrackSet;
pub use simple::SimpleTrackSet;
pub use track::{Track, CONTROL_TRACK};

pub use tracks_core::{bucket_index, masked_name, BucketKey, ErrorInfo, TracksError};
