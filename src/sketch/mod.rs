//! Frequency sketches: C4 (Count Sketch), C5 (CMCU), C6 (Tower Sketch).

pub mod cmcu;
pub mod count_sketch;
pub mod tower;

pub use cmcu::Cmcu;
pub use count_sketch::CountSketch;
pub use tower::TowerSketch;

/// Common interface for a frequency-estimating sketch keyed on canonical
/// k-mers. Insertion and estimation always canonicalize internally.
pub trait FrequencySketch {
    fn insert(&mut self, kmer: &crate::kmer::Kmer);
    fn estimate(&self, kmer: &crate::kmer::Kmer) -> i64;
}
