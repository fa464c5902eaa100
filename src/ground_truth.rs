//! C7: the exact ground-truth counter, a canonical k-mer -> count map used
//! only by the evaluator. Memory grows with the number of distinct
//! canonical k-mers, so this is only invoked on bounded inputs.

use std::collections::HashMap;

use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

use crate::kmer::Kmer;

type FxMap<K, V> = HashMap<K, V, BuildHasherDefault<FxHasher>>;

/// An exact frequency table over canonical k-mers.
#[derive(Debug, Clone, Default)]
pub struct GroundTruth {
    counts: FxMap<Kmer, u64>,
    total: u64,
}

impl GroundTruth {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation of `kmer`, canonicalizing internally.
    pub fn insert(&mut self, kmer: &Kmer) {
        let canon = kmer.canonical();
        *self.counts.entry(canon).or_insert(0) += 1;
        self.total += 1;
    }

    /// The exact count for `kmer`'s canonical form, 0 if never observed.
    pub fn count(&self, kmer: &Kmer) -> u64 {
        self.counts.get(&kmer.canonical()).copied().unwrap_or(0)
    }

    /// Total number of valid k-mer windows recorded; equals the sum of
    /// all per-key counts.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// The number of distinct canonical k-mers observed.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Kmer, &u64)> {
        self.counts.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Kmer> {
        self.counts.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_ground_truth_has_zero_total() {
        let gt = GroundTruth::new();
        assert_eq!(gt.total(), 0);
        assert_eq!(gt.distinct(), 0);
    }

    #[test]
    fn insert_counts_canonical_form() {
        let mut gt = GroundTruth::new();
        let k: Kmer = "ACGT".parse().unwrap();
        let rc = k.reverse_complement();
        gt.insert(&k);
        gt.insert(&rc);
        assert_eq!(gt.count(&k), 2);
        assert_eq!(gt.total(), 2);
        assert_eq!(gt.distinct(), 1);
    }

    #[test]
    fn repeated_build_is_deterministic() {
        let kmers: Vec<Kmer> = vec![
            "ACGT".parse().unwrap(),
            "CGTA".parse().unwrap(),
            "GTAC".parse().unwrap(),
            "TACG".parse().unwrap(),
            "ACGT".parse().unwrap(),
        ];

        let build = || {
            let mut gt = GroundTruth::new();
            for k in &kmers {
                gt.insert(k);
            }
            gt
        };

        let first = build();
        let second = build();
        assert_eq!(first.total(), second.total());
        assert_eq!(first.distinct(), second.distinct());
        for k in &kmers {
            assert_eq!(first.count(k), second.count(k));
        }
    }

    #[test]
    fn ground_truth_reconstructs_expected_window_counts() {
        // ">h\nACGTACGT\n", k=4 -> windows ACGT,CGTA,GTAC,TACG,ACGT
        let windows = ["ACGT", "CGTA", "GTAC", "TACG", "ACGT"];
        let mut gt = GroundTruth::new();
        for w in windows {
            let k: Kmer = w.parse().unwrap();
            gt.insert(&k);
        }
        assert_eq!(gt.total(), 5);
        let acgt: Kmer = "ACGT".parse().unwrap();
        let cgta: Kmer = "CGTA".parse().unwrap();
        let gtac: Kmer = "GTAC".parse().unwrap();
        assert_eq!(gt.count(&acgt), 2);
        assert_eq!(gt.count(&cgta), 2);
        assert_eq!(gt.count(&gtac), 1);
    }
}
