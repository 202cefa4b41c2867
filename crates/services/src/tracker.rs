//! Review-set policy over the repository's mistake counters.

use rand::Rng;

use pairs_core::repository::PairRepository;

/// Mistake count at or above which a classification review uses mistakes only.
pub const REVIEW_FLOOR: usize = 5;
/// Size a padded review subset is topped up to.
pub const REVIEW_TARGET: usize = 10;

/// Indices for a review round.
///
/// All mistaken records, truncated to `target` when at least `floor` exist;
/// otherwise padded with a random non-mistaken sample up to `target`. Never
/// contains duplicates.
#[must_use]
pub fn review_set(
    repo: &PairRepository,
    rng: &mut impl Rng,
    floor: usize,
    target: usize,
) -> Vec<usize> {
    let mut set = repo.mistaken_indices();
    if set.len() >= floor {
        set.truncate(target);
        return set;
    }
    let pad = repo.random_sample(rng, target.saturating_sub(set.len()), &set);
    set.extend(pad);
    set
}
