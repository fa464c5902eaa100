//! C8: heavy-hitter extraction. Filters a candidate set of canonical
//! k-mers by a sketch-estimated frequency threshold and ranks the survivors.

use rayon::prelude::*;

use crate::kmer::Kmer;

/// One ranked heavy-hitter entry: a canonical k-mer and its estimated
/// frequency. `rank` is assigned by the caller after sorting (1-based).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeavyHitter {
    pub kmer: Kmer,
    pub estimate: i64,
}

/// The threshold `T = ceil(phi * n)` a k-mer's estimate must meet to count
/// as a heavy hitter.
pub fn threshold(phi: f64, n: u64) -> u64 {
    (phi * n as f64).ceil() as u64
}

/// Filters `candidates` by `estimate_fn(kmer) >= threshold`, then sorts the
/// survivors by estimate descending, ties broken by lexicographic k-mer
/// order. Candidate estimation runs in parallel since it only reads the
/// (already frozen) sketch.
pub fn extract<F>(candidates: &[Kmer], estimate_fn: F, threshold: u64) -> Vec<HeavyHitter>
where
    F: Fn(&Kmer) -> i64 + Sync,
{
    let mut hits: Vec<HeavyHitter> = candidates
        .par_iter()
        .filter_map(|kmer| {
            let estimate = estimate_fn(kmer);
            // phi=0 => threshold=0, but the heavy-hitter set is still only
            // k-mers with a strictly positive estimate (spec invariant 11),
            // not every non-negative one.
            (estimate > 0 && estimate as u64 >= threshold).then(|| HeavyHitter {
                kmer: kmer.clone(),
                estimate,
            })
        })
        .collect();

    hits.sort_by(|a, b| b.estimate.cmp(&a.estimate).then_with(|| a.kmer.cmp(&b.kmer)));
    hits
}
