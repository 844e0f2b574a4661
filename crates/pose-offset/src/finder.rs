use std::collections::BTreeMap;

use crate::matcher::orientation_blocks_match;
use crate::offset::{Offset, OffsetKey};
use crate::params::{OffsetFinderError, OffsetFinderParams};
use crate::pose::{Pose, PoseSet};

/// The deduplicated offsets attested by a single model pose.
pub type CandidateSet = BTreeMap<OffsetKey, Offset>;

/// An offset together with the number of model poses that attested it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    /// Smallest raw offset, by `f64::total_cmp`, attested for the key by any model pose.
    pub offset: Offset,
    /// Number of model poses whose candidate set contains the key.
    pub support: usize,
}

/// Offsets consistent with every model pose examined so far.
///
/// Iteration is ordered by [`OffsetKey`], which keeps results deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateMap {
    entries: BTreeMap<OffsetKey, Candidate>,
}

impl CandidateMap {
    /// Seed a map from the candidate set of the first model pose.
    pub fn from_candidates(candidates: CandidateSet) -> Self {
        let entries = candidates
            .into_iter()
            .map(|(key, offset)| (key, Candidate { offset, support: 1 }))
            .collect();
        Self { entries }
    }

    /// Get the number of surviving offsets.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no offset survived.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check whether a key survived.
    pub fn contains_key(&self, key: &OffsetKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterate over the surviving keys and candidates in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&OffsetKey, &Candidate)> {
        self.entries.iter()
    }

    /// Get the surviving offsets in key order.
    pub fn offsets(&self) -> Vec<Offset> {
        self.entries.values().map(|c| c.offset).collect()
    }
}

/// Result of the consistent offset search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OffsetSearchResult {
    /// Offsets present in the candidate set of every processed model pose.
    pub candidates: CandidateMap,
    /// The number of model poses whose candidate set was computed.
    pub num_poses_processed: usize,
    /// Whether the search stopped before the last model pose.
    pub terminated_early: bool,
}

impl OffsetSearchResult {
    /// Get the consistent offsets, deduplicated and in a deterministic order.
    pub fn offsets(&self) -> Vec<Offset> {
        self.candidates.offsets()
    }

    /// Check if no consistent offset exists.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Compute the candidate offsets of one model pose against the whole space set.
///
/// # Arguments
///
/// * `model_pose` - The model pose.
/// * `space` - The space poses.
/// * `params` - The search parameters.
///
/// # Returns
///
/// The offsets `space.translation - model.translation` of every space pose whose
/// orientation/scale block matches the model pose, keyed by [`OffsetKey`]. When
/// several raw offsets share a key the smallest one is kept, so the result does not
/// depend on the order of `space`.
pub fn candidate_offsets(
    model_pose: &Pose,
    space: &PoseSet,
    params: &OffsetFinderParams,
) -> CandidateSet {
    let mut candidates = CandidateSet::new();
    for space_pose in space
        .iter()
        .filter(|p| orientation_blocks_match(model_pose, p, params.epsilon))
    {
        let offset = Offset::between(model_pose, space_pose);
        candidates
            .entry(OffsetKey::new(&offset, params.quantization))
            .and_modify(|kept| *kept = kept.min_total(offset))
            .or_insert(offset);
    }
    candidates
}

/// Intersect the running candidates with the candidate set of the next model pose.
///
/// Keys missing from `next` are dropped, the support of every survivor grows by one
/// and its offset becomes the smaller of the two attested values.
pub fn reduce_candidates(running: CandidateMap, next: &CandidateSet) -> CandidateMap {
    let entries = running
        .entries
        .into_iter()
        .filter_map(|(key, c)| {
            next.get(&key).map(|offset| {
                (
                    key,
                    Candidate {
                        offset: c.offset.min_total(*offset),
                        support: c.support + 1,
                    },
                )
            })
        })
        .collect();
    CandidateMap { entries }
}

/// Find the translation offsets that align every model pose onto the space set.
///
/// The candidate set of the first model pose seeds the search and is intersected
/// with the candidate set of each following pose in sequence order. The search
/// stops as soon as no candidate survives.
///
/// # Arguments
///
/// * `model` - The model poses.
/// * `space` - The space poses.
/// * `params` - The search parameters.
///
/// # Returns
///
/// The surviving offsets. Empty inputs and inconsistent sets give an empty result,
/// the only error is an invalid set of parameters.
///
/// Example:
///
/// ```
/// use pose_offset::{find_consistent_offsets, Offset, OffsetFinderParams, Pose, PoseSet};
///
/// let model = PoseSet::new(vec![Pose::identity()]);
/// let space = PoseSet::new(vec![Pose::from_translation(&[1.0, 2.0, 3.0])]);
/// let result = find_consistent_offsets(&model, &space, &OffsetFinderParams::default()).unwrap();
/// assert_eq!(result.offsets(), vec![Offset::new(1.0, 2.0, 3.0)]);
/// ```
pub fn find_consistent_offsets(
    model: &PoseSet,
    space: &PoseSet,
    params: &OffsetFinderParams,
) -> Result<OffsetSearchResult, OffsetFinderError> {
    params.validate()?;

    if model.is_empty() || space.is_empty() {
        log::debug!(
            "Empty input: {} model poses, {} space poses",
            model.len(),
            space.len()
        );
        return Ok(OffsetSearchResult::default());
    }

    let mut poses = model.iter();
    let mut result = OffsetSearchResult::default();

    if let Some(first) = poses.next() {
        result.candidates = CandidateMap::from_candidates(candidate_offsets(first, space, params));
        result.num_poses_processed = 1;
    }

    for model_pose in poses {
        if result.candidates.is_empty() {
            log::debug!(
                "No candidates left after {} of {} model poses",
                result.num_poses_processed,
                model.len()
            );
            result.terminated_early = true;
            return Ok(result);
        }

        let next = candidate_offsets(model_pose, space, params);
        result.candidates = reduce_candidates(result.candidates, &next);
        result.num_poses_processed += 1;

        log::debug!(
            "Model pose {}: {} candidates, {} surviving",
            result.num_poses_processed,
            next.len(),
            result.candidates.len()
        );
    }

    Ok(result)
}
