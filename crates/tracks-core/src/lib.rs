#![deny(missing_docs)]
#![doc = "Primitives for deterministic experiment bucketing: structured errors, canonical keys, digest-based index selection, and fresh run identifiers."]

pub mod errors;
pub mod hash;
pub mod key;
pub mod rng;

pub use errors::{ErrorInfo, TracksError};
pub use hash::{bucket_index, masked_name};
pub use key::BucketKey;
pub use rng::fresh_run_id;
