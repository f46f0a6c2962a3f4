use tracks_core::{BucketKey, TracksError};

use crate::set::TrackSet;
use crate::track::Track;

/// A track set whose variants are declared as named transformation callables.
///
/// Implementors enumerate their treatment variants through
/// [`variant_tracks`](SimpleTrackSet::variant_tracks); [`build`] orders them
/// lexically by name so the track list (and therefore bucketing) is stable
/// regardless of declaration order, prepends the control track when enabled,
/// and selects deterministically from the result.
///
/// [`build`]: SimpleTrackSet::build
pub trait SimpleTrackSet {
    /// Payload the tracks transform.
    type Payload: 'static;
    /// Caller-supplied data consulted only by eligibility checks.
    type Context;

    /// The set's identity. Construction fails when left unset; the empty
    /// string is a legal (if unhelpful) name.
    fn name(&self) -> Option<&str> {
        None
    }

    /// Relative selection weight inside a [`MultiTrackSet`](crate::MultiTrackSet).
    fn weight(&self) -> u32 {
        100
    }

    /// Whether the no-op control track is injected ahead of the variants.
    fn add_control_track(&self) -> bool {
        true
    }

    /// Eligibility predicate over the caller context. Ineligible sets select
    /// nothing and apply nothing.
    fn is_eligible(&self, _context: Option<&Self::Context>) -> bool {
        true
    }

    /// The named treatment variants, in any order.
    fn variant_tracks(&self) -> Vec<Track<Self::Payload>>;

    /// Gathers tracks and constructs the deterministic assignment for `key`.
    ///
    /// Omitting the key substitutes fresh random key material, making the
    /// assignment intentionally non-reproducible.
    fn build(
        &self,
        context: Option<&Self::Context>,
        key: Option<BucketKey>,
    ) -> Result<TrackSet<Self::Payload>, TracksError> {
        let mut variants = self.variant_tracks();
        variants.sort_by(|a, b| a.name().cmp(b.name()));

        let mut tracks = Vec::with_capacity(variants.len() + 1);
        if self.add_control_track() {
            tracks.push(Track::control());
        }
        tracks.append(&mut variants);

        TrackSet::assemble(
            self.name(),
            self.weight(),
            tracks,
            self.is_eligible(context),
            key,
        )
    }
}
