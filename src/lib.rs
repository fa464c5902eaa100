//! Identifies frequent fixed-length DNA substrings ("k-mers") across a
//! collection of genomic sequence files using probabilistic sketches that
//! bound memory independently of the number of distinct k-mers observed.
//!
//! The pipeline: [`producer`] walks a directory of FASTA-like files and
//! emits canonical k-mer windows; [`sketch`] provides the Count Sketch and
//! Tower Sketch frequency estimators those k-mers are inserted into;
//! [`heavy_hitters`] filters and ranks candidates by a threshold derived
//! from a user-chosen ratio φ; [`evaluator`] compares the result against an
//! exact [`ground_truth`] counter. [`driver`] wires these together; [`cli`]
//! and [`format`] are the binary's argument-parsing and report-rendering
//! surface.

pub mod cli;
pub mod config;
pub mod dna;
pub mod driver;
pub mod error;
pub mod evaluator;
pub mod format;
pub mod ground_truth;
pub mod hash;
pub mod heavy_hitters;
pub mod kmer;
pub mod producer;
pub mod sketch;

pub use error::{Result, SketchError};
