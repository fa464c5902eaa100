//! C13: command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Identify frequent k-mers in a directory of FASTA-like files using
/// probabilistic sketches, optionally evaluated against an exact counter.
///
/// # Examples
///
/// ```bash
/// # Tower Sketch run over a directory of .fa files, k=21, phi=0.01
/// sketchmer --input-dir genomes --k 21 --phi 0.01 --sketch tower
///
/// # Count Sketch run with ground-truth evaluation, JSON output
/// sketchmer --input-dir genomes --k 21 --phi 0.01 --sketch count-sketch \
///     --evaluate --format json
/// ```
#[derive(Parser, Debug)]
#[command(name = "sketchmer")]
#[command(version, author, about, long_about = None)]
pub struct Args {
    /// Directory to scan (non-recursively) for .fa/.fna/.fasta files.
    #[arg(long = "input-dir")]
    pub input_dir: PathBuf,

    /// K-mer length (must be > 0).
    #[arg(long, value_parser = parse_k)]
    pub k: usize,

    /// Heavy-hitter ratio phi, in (0, 1).
    #[arg(long, value_parser = parse_phi)]
    pub phi: f64,

    /// Which sketch to run.
    #[arg(long, value_enum, default_value = "tower")]
    pub sketch: SketchChoice,

    /// Row count for the Count Sketch, or shared across Tower tiers if
    /// per-tier rows are not given individually.
    #[arg(long, default_value = "5")]
    pub d: usize,

    /// Column count (width) for the Count Sketch or a uniform Tower tier
    /// width when per-tier widths are not given individually.
    #[arg(long, default_value = "10000")]
    pub w: usize,

    /// Tier-8 width override for Tower Sketch runs.
    #[arg(long = "w8")]
    pub w8: Option<usize>,

    /// Tier-16 width override for Tower Sketch runs.
    #[arg(long = "w16")]
    pub w16: Option<usize>,

    /// Tier-32 width override for Tower Sketch runs.
    #[arg(long = "w32")]
    pub w32: Option<usize>,

    /// Also build the exact ground-truth counter and report
    /// precision/recall/F1/MAE/MRE/MSE/RMSE/correlation against it.
    #[arg(long)]
    pub evaluate: bool,

    /// Per-key comparison scope for the evaluation's error metrics: the
    /// union of the estimated and real heavy-hitter sets, or just their
    /// intersection. Only meaningful with `--evaluate`.
    #[arg(long, value_enum, default_value = "union")]
    pub comparison_scope: ComparisonScopeArg,

    /// Output format for the heavy-hitter report.
    #[arg(long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Output destination; stdout if omitted.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

/// Which sketch the driver should build and query.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum SketchChoice {
    /// Signed-counter median estimator.
    #[value(name = "count-sketch")]
    CountSketch,
    /// Three-tier Count-Min-with-conservative-update estimator.
    Tower,
}

/// Output format for the heavy-hitter report.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
}

/// CLI-facing mirror of [`crate::evaluator::ComparisonScope`]; kept separate
/// so the evaluator core doesn't depend on `clap`.
#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum ComparisonScopeArg {
    #[default]
    Union,
    Intersection,
}

impl From<ComparisonScopeArg> for crate::evaluator::ComparisonScope {
    fn from(arg: ComparisonScopeArg) -> Self {
        match arg {
            ComparisonScopeArg::Union => crate::evaluator::ComparisonScope::Union,
            ComparisonScopeArg::Intersection => crate::evaluator::ComparisonScope::Intersection,
        }
    }
}

fn parse_k(s: &str) -> Result<usize, String> {
    let k: usize = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if k == 0 {
        return Err("k-mer length must be at least 1".to_string());
    }
    Ok(k)
}

fn parse_phi(s: &str) -> Result<f64, String> {
    let phi: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if !(phi > 0.0 && phi < 1.0) {
        return Err("phi must be strictly between 0 and 1".to_string());
    }
    Ok(phi)
}
