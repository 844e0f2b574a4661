#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// Parallel search over independent pose set pairs.
pub mod batch;

/// Candidate generation and cross-model reduction.
pub mod finder;

/// Orientation/scale block comparison.
pub mod matcher;

/// Offsets and their set keys.
pub mod offset;

/// Search parameters and errors.
pub mod params;

/// Poses and pose sets.
pub mod pose;

pub use batch::find_consistent_offsets_batch;
pub use finder::{
    candidate_offsets, find_consistent_offsets, reduce_candidates, Candidate, CandidateMap,
    CandidateSet, OffsetSearchResult,
};
pub use offset::{Offset, OffsetKey, OffsetQuantization};
pub use params::{OffsetFinderError, OffsetFinderParams};
pub use pose::{Pose, PoseSet};
