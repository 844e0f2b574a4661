use rayon::prelude::*;

use crate::finder::{find_consistent_offsets, OffsetSearchResult};
use crate::params::{OffsetFinderError, OffsetFinderParams};
use crate::pose::PoseSet;

/// Run the consistent offset search on independent (model, space) pairs in parallel.
///
/// Each pair is searched sequentially, pairs are distributed over the rayon thread pool.
///
/// # Returns
///
/// One result per pair, in the order of `pairs`.
pub fn find_consistent_offsets_batch(
    pairs: &[(PoseSet, PoseSet)],
    params: &OffsetFinderParams,
) -> Result<Vec<OffsetSearchResult>, OffsetFinderError> {
    params.validate()?;

    let results = pairs
        .par_iter()
        .map(|(model, space)| find_consistent_offsets(model, space, params))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!("Searched {} pose set pairs", results.len());

    Ok(results)
}
