//! C5: Count-Min sketch with conservative update (CMCU), generic over the
//! counter's bit width. A compile-time generic (matching the reference
//! implementation's C++ template) rather than trait-object dispatch, since
//! the width is fixed per tier — see Tower Sketch.

use crate::hash;
use crate::kmer::Kmer;

/// A counter type usable as a CMCU cell: unsigned, saturating, convertible
/// to/from `u64` for comparison and threshold arithmetic.
pub trait Counter: Copy + Ord + Default {
    const MAX: Self;
    fn increment(self) -> Self;
    fn as_u64(self) -> u64;
}

macro_rules! impl_counter {
    ($t:ty) => {
        impl Counter for $t {
            const MAX: Self = <$t>::MAX;
            fn increment(self) -> Self {
                self.saturating_add(1)
            }
            fn as_u64(self) -> u64 {
                u64::from(self)
            }
        }
    };
}

impl_counter!(u8);
impl_counter!(u16);
impl_counter!(u32);

/// A `d` x `w` table of `T`-width unsigned counters, one hash per row.
#[derive(Debug, Clone)]
pub struct Cmcu<T: Counter> {
    d: usize,
    w: usize,
    table: Vec<Vec<T>>,
}

impl<T: Counter> Cmcu<T> {
    pub fn new(d: usize, w: usize) -> Self {
        assert!(d > 0 && w > 0, "CMCU requires d > 0 and w > 0");
        Cmcu {
            d,
            w,
            table: vec![vec![T::default(); w]; d],
        }
    }

    pub fn d(&self) -> usize {
        self.d
    }

    pub fn w(&self) -> usize {
        self.w
    }

    fn bucket(&self, bytes: &[u8], row: usize) -> usize {
        hash::bucket(bytes, row as u32, self.w)
    }

    /// Minimum counter across rows, saturated at `T::MAX`.
    pub fn estimate(&self, kmer: &Kmer) -> T {
        let canon = kmer.canonical();
        let bytes = canon.as_bytes();
        (0..self.d)
            .map(|row| {
                let c = self.bucket(bytes, row);
                self.table[row][c]
            })
            .min()
            .unwrap_or(T::default())
    }

    /// Conservative update: computes the current estimate once, then
    /// raises only the rows whose counter equals that estimate (and is not
    /// already saturated). Rows already above the estimate are left
    /// untouched, which is what distinguishes this from plain Count-Min.
    ///
    /// Returns `true` if the insert was applied, `false` if the k-mer's
    /// estimate was already saturated at `T::MAX` (the caller routes
    /// saturated inserts to a wider tier; see Tower Sketch).
    pub fn insert(&mut self, kmer: &Kmer) -> bool {
        let canon = kmer.canonical();
        let bytes = canon.as_bytes();
        let current = self.estimate(&canon);
        if current == T::MAX {
            return false;
        }
        for row in 0..self.d {
            let c = self.bucket(bytes, row);
            if self.table[row][c] == current {
                self.table[row][c] = self.table[row][c].increment();
            }
        }
        true
    }
}
