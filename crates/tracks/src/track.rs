use std::fmt;
use std::sync::Arc;

use tracks_core::masked_name;

/// Name of the auto-injected no-op control track.
pub const CONTROL_TRACK: &str = "control";

type TrackFn<P> = Arc<dyn Fn(&mut P) + Send + Sync>;

/// A named treatment variant wrapping the transformation it applies.
///
/// Tracks are immutable once constructed and cheap to clone; the callable is
/// shared. Invoking a track has no effect beyond whatever the callable does
/// to the payload.
pub struct Track<P: 'static> {
    name: String,
    callable: TrackFn<P>,
}

impl<P> Track<P> {
    /// Creates a track wrapping the provided transformation.
    pub fn new(
        name: impl Into<String>,
        callable: impl Fn(&mut P) + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            callable: Arc::new(callable),
        }
    }

    /// Creates the control track: fixed name, no-op transformation.
    pub fn control() -> Self {
        Self::new(CONTROL_TRACK, |_payload| {})
    }

    /// Returns the track name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a short deterministic obfuscation of the track name.
    pub fn masked_name(&self) -> String {
        masked_name(&self.name)
    }

    /// Applies the track's transformation to the payload.
    pub fn call(&self, payload: &mut P) {
        (self.callable)(payload);
    }
}

impl<P> Clone for Track<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            callable: Arc::clone(&self.callable),
        }
    }
}

impl<P> PartialEq for Track<P> {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && Arc::ptr_eq(&self.callable, &other.callable)
    }
}

impl<P> fmt::Debug for Track<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Track")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
