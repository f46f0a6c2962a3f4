use std::collections::BTreeSet;
use std::fmt;

use tracks_core::{bucket_index, fresh_run_id, masked_name, BucketKey, ErrorInfo, TracksError};

use crate::track::Track;

/// A constructed assignment: the gathered tracks of one set plus the track
/// deterministically selected for the key.
///
/// Selection is a pure function of `(name, key, ordered track list)`; adding,
/// removing, or reordering tracks reshuffles future assignments. An
/// ineligible set carries no selected track and no run id, and applying it
/// leaves the payload untouched.
pub struct TrackSet<P: 'static> {
    name: String,
    weight: u32,
    key: BucketKey,
    tracks: Vec<Track<P>>,
    selected: Option<usize>,
    run_id: Option<String>,
}

impl<P> TrackSet<P> {
    pub(crate) fn assemble(
        name: Option<&str>,
        weight: u32,
        tracks: Vec<Track<P>>,
        eligible: bool,
        key: Option<BucketKey>,
    ) -> Result<Self, TracksError> {
        let name = name.ok_or_else(|| {
            TracksError::Config(
                ErrorInfo::new("set-name-missing", "track set declares no name")
                    .with_hint("override name() to return the set's identity"),
            )
        })?;

        let mut seen = BTreeSet::new();
        for track in &tracks {
            if !seen.insert(track.name()) {
                return Err(TracksError::Config(
                    ErrorInfo::new(
                        "track-name-duplicate",
                        "track names must be unique within their set",
                    )
                    .with_context("set_name", name)
                    .with_context("track_name", track.name()),
                ));
            }
        }

        let key = key.unwrap_or_else(BucketKey::random);
        let (selected, run_id) = if eligible {
            if tracks.is_empty() {
                return Err(TracksError::Config(
                    ErrorInfo::new("set-empty", "track set gathered no tracks")
                        .with_context("set_name", name)
                        .with_hint("enable the control track or declare at least one variant"),
                ));
            }
            let index = bucket_index(name, key.as_str(), tracks.len())?;
            (Some(index), Some(fresh_run_id()))
        } else {
            (None, None)
        };

        Ok(Self {
            name: name.to_string(),
            weight,
            key,
            tracks,
            selected,
            run_id,
        })
    }

    /// Returns the set name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a short deterministic obfuscation of the set name.
    pub fn masked_name(&self) -> String {
        masked_name(&self.name)
    }

    /// Returns the selection weight used during multi-set composition.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Returns the canonical key the assignment was derived from.
    pub fn key(&self) -> &BucketKey {
        &self.key
    }

    /// Returns the gathered tracks in selection order.
    pub fn tracks(&self) -> &[Track<P>] {
        &self.tracks
    }

    /// Returns the selected track, or `None` when ineligible.
    pub fn track(&self) -> Option<&Track<P>> {
        self.selected.map(|index| &self.tracks[index])
    }

    /// Returns the selected track index, or `None` when ineligible.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the fresh run identifier, or `None` when ineligible.
    pub fn run_id(&self) -> Option<&str> {
        self.run_id.as_deref()
    }

    /// Reports whether the assignment is eligible.
    pub fn is_eligible(&self) -> bool {
        self.selected.is_some()
    }

    /// Applies the selected track's transformation to the payload.
    ///
    /// A no-op when ineligible.
    pub fn apply(&self, payload: &mut P) {
        if let Some(track) = self.track() {
            track.call(payload);
        }
    }
}

impl<P> fmt::Debug for TrackSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackSet")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .field("key", &self.key)
            .field("selected", &self.selected)
            .field("run_id", &self.run_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_name_fails_fast() {
        let err = TrackSet::<i64>::assemble(None, 100, vec![Track::control()], true, None)
            .unwrap_err();
        assert_eq!(err.info().code, "set-name-missing");
    }

    #[test]
    fn duplicate_track_names_fail_fast() {
        let tracks = vec![Track::control(), Track::control()];
        let err = TrackSet::<i64>::assemble(Some("dupes"), 100, tracks, true, None).unwrap_err();
        assert_eq!(err.info().code, "track-name-duplicate");
    }

    #[test]
    fn eligible_empty_set_fails_fast() {
        let err = TrackSet::<i64>::assemble(Some("empty"), 100, Vec::new(), true, None)
            .unwrap_err();
        assert_eq!(err.info().code, "set-empty");
    }

    #[test]
    fn ineligible_empty_set_is_tolerated() {
        let set = TrackSet::<i64>::assemble(Some("empty"), 100, Vec::new(), false, None).unwrap();
        assert!(!set.is_eligible());
        assert!(set.track().is_none());
        assert!(set.run_id().is_none());
    }
}
