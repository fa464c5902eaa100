//! C14: output formatting for the heavy-hitter report. CSV schema is
//! preserved exactly as specified:
//! `rank,kmer,estimated_frequency,threshold_used,total_kmers,phi_value,kmer_length`.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SketchError};
use crate::evaluator::{ErrorMetrics, SetMetrics};
use crate::heavy_hitters::HeavyHitter;

/// One serializable row of the heavy-hitter report, matching the CSV
/// schema field-for-field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportRow {
    pub rank: usize,
    pub kmer: String,
    pub estimated_frequency: i64,
    pub threshold_used: u64,
    pub total_kmers: u64,
    pub phi_value: f64,
    pub kmer_length: usize,
}

/// Builds the ranked report rows from a sorted heavy-hitter list (rank is
/// 1-based in descending-estimate order, assigned here).
pub fn build_rows(
    hits: &[HeavyHitter],
    threshold: u64,
    total_kmers: u64,
    phi: f64,
    k: usize,
) -> Vec<ReportRow> {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| ReportRow {
            rank: i + 1,
            kmer: hit.kmer.to_string(),
            estimated_frequency: hit.estimate,
            threshold_used: threshold,
            total_kmers,
            phi_value: phi,
            kmer_length: k,
        })
        .collect()
}

/// Writes `rows` as CSV with the header
/// `rank,kmer,estimated_frequency,threshold_used,total_kmers,phi_value,kmer_length`.
pub fn write_csv<W: Write>(mut out: W, rows: &[ReportRow]) -> Result<()> {
    writeln!(
        out,
        "rank,kmer,estimated_frequency,threshold_used,total_kmers,phi_value,kmer_length"
    )
    .map_err(|source| SketchError::WriteError { source })?;

    for row in rows {
        writeln!(
            out,
            "{},{},{},{},{},{},{}",
            row.rank,
            row.kmer,
            row.estimated_frequency,
            row.threshold_used,
            row.total_kmers,
            row.phi_value,
            row.kmer_length
        )
        .map_err(|source| SketchError::WriteError { source })?;
    }
    Ok(())
}

/// The evaluation half of a JSON report: set-level and per-key error
/// metrics, omitted entirely when ground-truth comparison wasn't requested.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct EvaluationSummary {
    pub set_metrics: SetMetrics,
    pub error_metrics: ErrorMetrics,
}

#[derive(Debug, Clone, Serialize)]
struct JsonReport<'a> {
    rows: &'a [ReportRow],
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<EvaluationSummary>,
}

/// Writes `rows` as a JSON object: `{"rows": [...]}`, with a sibling
/// `"evaluation"` object present whenever `evaluation` is `Some` (i.e. a
/// ground-truth comparison was requested).
pub fn write_json<W: Write>(
    out: W,
    rows: &[ReportRow],
    evaluation: Option<EvaluationSummary>,
) -> Result<()> {
    let report = JsonReport { rows, evaluation };
    serde_json::to_writer_pretty(out, &report)?;
    Ok(())
}
