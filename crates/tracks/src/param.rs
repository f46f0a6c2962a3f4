use tracks_core::{BucketKey, TracksError};

use crate::set::TrackSet;
use crate::track::Track;

/// A track set that derives one track per parameter set from a single
/// template transformation.
///
/// Implementors declare the parameter sets, a naming function, and the
/// template ([`apply_params`](ParamTrackSet::apply_params)); [`build`]
/// generates one track per parameter set in declared order, each binding its
/// parameters to the template. Unlike the simple strategy the declared order
/// is kept, so reordering the parameter list reshuffles assignments.
///
/// [`build`]: ParamTrackSet::build
pub trait ParamTrackSet {
    /// Payload the tracks transform.
    type Payload: 'static;
    /// Caller-supplied data consulted only by eligibility checks.
    type Context;
    /// Parameters bound into each generated track.
    type Params: Send + Sync + 'static;

    /// The set's identity. Construction fails when left unset.
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

    /// Eligibility predicate over the caller context.
    fn is_eligible(&self, _context: Option<&Self::Context>) -> bool {
        true
    }

    /// The parameter sets, one generated track each, order preserved.
    fn params(&self) -> Vec<Self::Params>;

    /// Maps a parameter set to its track name.
    fn track_name(&self, params: &Self::Params) -> String;

    /// The template transformation, applied with the track's bound parameters.
    fn apply_params(payload: &mut Self::Payload, params: &Self::Params);

    /// Gathers tracks and constructs the deterministic assignment for `key`.
    fn build(
        &self,
        context: Option<&Self::Context>,
        key: Option<BucketKey>,
    ) -> Result<TrackSet<Self::Payload>, TracksError> {
        let mut tracks = Vec::new();
        if self.add_control_track() {
            tracks.push(Track::control());
        }

        let apply: fn(&mut Self::Payload, &Self::Params) = Self::apply_params;
        for params in self.params() {
            let track_name = self.track_name(&params);
            tracks.push(Track::new(track_name, move |payload| apply(payload, &params)));
        }

        TrackSet::assemble(
            self.name(),
            self.weight(),
            tracks,
            self.is_eligible(context),
            key,
        )
    }
}
