use std::fmt;

use tracks_core::{bucket_index, masked_name, BucketKey, ErrorInfo, TracksError};

use crate::param::ParamTrackSet;
use crate::set::TrackSet;
use crate::simple::SimpleTrackSet;
use crate::track::Track;

type BuildFn<P, C> = Box<dyn Fn(Option<&C>, BucketKey) -> Result<TrackSet<P>, TracksError>>;

/// A type-erased constituent of a [`MultiTrackSet`].
///
/// Wraps one concrete set spec so heterogeneous specs sharing a payload and
/// context type can be composed into a single list.
pub struct MultiEntry<P: 'static, C: 'static> {
    name: Option<String>,
    weight: u32,
    build: BuildFn<P, C>,
}

impl<P, C> MultiEntry<P, C> {
    /// Wraps a [`SimpleTrackSet`] spec.
    pub fn simple<S>(spec: S) -> Self
    where
        S: SimpleTrackSet<Payload = P, Context = C> + 'static,
    {
        let name = spec.name().map(str::to_string);
        let weight = spec.weight();
        Self {
            name,
            weight,
            build: Box::new(move |context, key| spec.build(context, Some(key))),
        }
    }

    /// Wraps a [`ParamTrackSet`] spec.
    pub fn params<S>(spec: S) -> Self
    where
        S: ParamTrackSet<Payload = P, Context = C> + 'static,
    {
        let name = spec.name().map(str::to_string);
        let weight = spec.weight();
        Self {
            name,
            weight,
            build: Box::new(move |context, key| spec.build(context, Some(key))),
        }
    }

    /// Returns the constituent's declared name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the constituent's selection weight.
    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// Weighted deterministic composition of several track sets.
///
/// First picks one constituent set (each eligible constituent replicated
/// `weight` times into a flat candidate list, index drawn from the joined
/// name and the shared key), then delegates assignment and application to
/// it. With no eligible constituent the composition itself is ineligible and
/// applying it is a no-op.
pub struct MultiTrackSet<P: 'static> {
    name: String,
    key: BucketKey,
    trackset: Option<TrackSet<P>>,
}

impl<P> MultiTrackSet<P> {
    /// Builds every constituent with the shared context and key, then
    /// deterministically selects among the eligible ones.
    ///
    /// The name is the `/`-join of all constituent names, eligible or not;
    /// a constituent without a name is a configuration error. An omitted key
    /// is replaced by fresh random key material resolved once and shared by
    /// every constituent and the composition draw.
    pub fn new<C>(
        entries: Vec<MultiEntry<P, C>>,
        context: Option<&C>,
        key: Option<BucketKey>,
    ) -> Result<Self, TracksError> {
        let mut names = Vec::with_capacity(entries.len());
        for entry in &entries {
            let name = entry.name().ok_or_else(|| {
                TracksError::Config(
                    ErrorInfo::new("set-name-missing", "multi track set constituent declares no name")
                        .with_context("position", names.len().to_string()),
                )
            })?;
            names.push(name.to_string());
        }
        let name = names.join("/");
        let key = key.unwrap_or_else(BucketKey::random);

        let mut eligible = Vec::new();
        for entry in &entries {
            let set = (entry.build)(context, key.clone())?;
            if set.is_eligible() {
                eligible.push(set);
            }
        }

        // Weight acts as multiplicity for a uniform draw, not a normalized
        // probability.
        let mut candidates = Vec::new();
        for (index, set) in eligible.iter().enumerate() {
            candidates.extend(std::iter::repeat(index).take(set.weight() as usize));
        }

        let trackset = if candidates.is_empty() {
            None
        } else {
            let slot = bucket_index(&name, key.as_str(), candidates.len())?;
            Some(eligible.swap_remove(candidates[slot]))
        };

        Ok(Self {
            name,
            key,
            trackset,
        })
    }

    /// Returns the joined constituent names.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns a short deterministic obfuscation of the joined name.
    pub fn masked_name(&self) -> String {
        masked_name(&self.name)
    }

    /// Returns the canonical key shared by all constituents.
    pub fn key(&self) -> &BucketKey {
        &self.key
    }

    /// Returns the selected constituent, or `None` when ineligible.
    pub fn trackset(&self) -> Option<&TrackSet<P>> {
        self.trackset.as_ref()
    }

    /// Returns the selected constituent's selected track.
    pub fn track(&self) -> Option<&Track<P>> {
        self.trackset().and_then(TrackSet::track)
    }

    /// Returns the selected constituent's run identifier.
    pub fn run_id(&self) -> Option<&str> {
        self.trackset().and_then(TrackSet::run_id)
    }

    /// Reports whether any constituent was eligible.
    pub fn is_eligible(&self) -> bool {
        self.trackset.is_some()
    }

    /// Delegates application to the selected constituent.
    ///
    /// A no-op when ineligible.
    pub fn apply(&self, payload: &mut P) {
        if let Some(trackset) = self.trackset() {
            trackset.apply(payload);
        }
    }
}

impl<P> fmt::Debug for MultiTrackSet<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultiTrackSet")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("trackset", &self.trackset)
            .finish()
    }
}
