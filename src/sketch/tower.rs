//! C6: Tower Sketch, three CMCU tiers at widths 8/16/32 bits, owned by
//! value (no virtual dispatch — the width is a compile-time constant per
//! tier). Exploits the skew of real k-mer frequency distributions: most
//! k-mers fit comfortably in an 8-bit counter, a minority need 16 bits, a
//! handful need the full 32.

use super::cmcu::Cmcu;
use super::FrequencySketch;
use crate::kmer::Kmer;

/// Three independently-sized CMCU tables at counter widths 8, 16 and 32.
#[derive(Debug, Clone)]
pub struct TowerSketch {
    tier8: Cmcu<u8>,
    tier16: Cmcu<u16>,
    tier32: Cmcu<u32>,
}

impl TowerSketch {
    /// Builds a tower with independent `(d, w)` per tier.
    pub fn new((d8, w8): (usize, usize), (d16, w16): (usize, usize), (d32, w32): (usize, usize)) -> Self {
        TowerSketch {
            tier8: Cmcu::new(d8, w8),
            tier16: Cmcu::new(d16, w16),
            tier32: Cmcu::new(d32, w32),
        }
    }

    /// Cascades low to high: inserts into the narrowest tier that has
    /// headroom (estimate below that tier's saturation point), stopping at
    /// the first tier that accepts the insert.
    pub fn insert(&mut self, kmer: &Kmer) {
        let e8 = self.tier8.estimate(kmer);
        if e8 < u8::MAX {
            self.tier8.insert(kmer);
            return;
        }
        let e16 = self.tier16.estimate(kmer);
        if e16 < u16::MAX {
            self.tier16.insert(kmer);
            return;
        }
        self.tier32.insert(kmer);
    }

    /// Cascades high to low, returning the first non-zero tier estimate
    /// encountered: the widest non-zero tier is treated as authoritative,
    /// even when a narrower tier also holds contributions from before this
    /// k-mer was promoted. This is the intended, observable cascade
    /// behavior, not an approximation to be corrected.
    pub fn estimate(&self, kmer: &Kmer) -> u64 {
        let e32 = self.tier32.estimate(kmer);
        if e32 > 0 {
            return u64::from(e32);
        }
        let e16 = self.tier16.estimate(kmer);
        if e16 > 0 {
            return u64::from(e16);
        }
        u64::from(self.tier8.estimate(kmer))
    }
}

impl FrequencySketch for TowerSketch {
    fn insert(&mut self, kmer: &Kmer) {
        TowerSketch::insert(self, kmer);
    }

    fn estimate(&self, kmer: &Kmer) -> i64 {
        TowerSketch::estimate(self, kmer) as i64
    }
}
