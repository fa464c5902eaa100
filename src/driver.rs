//! C10: driver glue. Wires the producer into the selected sketch (and,
//! optionally, the exact ground-truth counter), then runs heavy-hitter
//! extraction and, if requested, evaluation against ground truth.

#[cfg(feature = "tracing")]
use tracing::{info, info_span};

use std::collections::HashSet;

use crate::config::{Config, SketchKind};
use crate::error::Result;
use crate::evaluator::{self, ComparisonRow, ComparisonScope, ErrorMetrics, SetMetrics};
use crate::ground_truth::GroundTruth;
use crate::heavy_hitters::{self, HeavyHitter};
use crate::kmer::Kmer;
use crate::producer::KmerProducer;
use crate::sketch::{CountSketch, TowerSketch};

/// Either sketch kind the driver can run ingestion/estimation against.
pub enum Sketch {
    CountSketch(CountSketch),
    Tower(TowerSketch),
}

impl Sketch {
    fn insert(&mut self, kmer: &Kmer) {
        match self {
            Sketch::CountSketch(s) => s.insert(kmer),
            Sketch::Tower(s) => s.insert(kmer),
        }
    }

    fn estimate(&self, kmer: &Kmer) -> i64 {
        match self {
            Sketch::CountSketch(s) => s.estimate(kmer),
            Sketch::Tower(s) => s.estimate(kmer) as i64,
        }
    }
}

fn build_sketch(config: &Config) -> Sketch {
    match config.sketch_kind {
        SketchKind::CountSketch => {
            let dims = config
                .count_sketch_dims
                .expect("count sketch config always carries count_sketch_dims");
            Sketch::CountSketch(CountSketch::new(dims.d, dims.w))
        }
        SketchKind::Tower => {
            let dims = config
                .tower_dims
                .expect("tower config always carries tower_dims");
            Sketch::Tower(TowerSketch::new(
                (dims.tier8.d, dims.tier8.w),
                (dims.tier16.d, dims.tier16.w),
                (dims.tier32.d, dims.tier32.w),
            ))
        }
    }
}

/// Everything produced by a run: the sketch, the candidate set observed,
/// the total valid k-mer count N, and (if requested) the exact counter.
pub struct IngestResult {
    pub sketch: Sketch,
    pub candidates: Vec<Kmer>,
    pub total_kmers: u64,
    pub ground_truth: Option<GroundTruth>,
}

/// Pulls k-mers from the producer, inserting each (after the validity
/// filter — windows with any non-ACGT character are discarded and do not
/// count toward N) into the sketch and, if requested, the exact counter.
/// Single-threaded and blocking, per the concurrency model: no operation
/// suspends except the producer's file reads.
pub fn ingest(config: &Config) -> Result<IngestResult> {
    #[cfg(feature = "tracing")]
    let _span = info_span!("ingest", input_dir = ?config.input_dir, k = config.k).entered();

    let mut producer = KmerProducer::new(&config.input_dir)?;
    let mut sketch = build_sketch(config);
    let mut candidates: HashSet<Kmer> = HashSet::new();
    let mut ground_truth = config.build_ground_truth.then(GroundTruth::new);
    let mut total_kmers: u64 = 0;

    while let Some(bytes) = producer.next_kmer(config.k)? {
        let Ok(kmer) = Kmer::from_bytes(bytes) else {
            // invalid-base windows are recovered locally: skip, don't
            // count toward N.
            continue;
        };
        let canon = kmer.canonical();

        sketch.insert(&canon);
        if let Some(gt) = ground_truth.as_mut() {
            gt.insert(&canon);
        }
        candidates.insert(canon);
        total_kmers += 1;
    }

    #[cfg(feature = "tracing")]
    info!(
        total_kmers,
        distinct_candidates = candidates.len(),
        "ingestion complete"
    );

    Ok(IngestResult {
        sketch,
        candidates: candidates.into_iter().collect(),
        total_kmers,
        ground_truth,
    })
}

/// Runs heavy-hitter extraction over the ingested candidates at ratio
/// `phi`.
pub fn extract_heavy_hitters(result: &IngestResult, phi: f64) -> (Vec<HeavyHitter>, u64) {
    #[cfg(feature = "tracing")]
    let _span = info_span!("extract_heavy_hitters", phi).entered();

    let threshold = heavy_hitters::threshold(phi, result.total_kmers);
    let hits = heavy_hitters::extract(
        &result.candidates,
        |kmer| result.sketch.estimate(kmer),
        threshold,
    );

    #[cfg(feature = "tracing")]
    info!(threshold, heavy_hitters = hits.len(), "extraction complete");

    (hits, threshold)
}

/// A full evaluation report against the exact counter: set-level metrics
/// between the estimated and real heavy-hitter sets, plus per-key error
/// statistics over the comparison scope.
pub struct EvaluationReport {
    pub set_metrics: SetMetrics,
    pub error_metrics: ErrorMetrics,
    pub comparison_rows: Vec<ComparisonRow>,
}

/// Evaluates an estimated heavy-hitter list against ground truth. Requires
/// `result.ground_truth` to be present (the caller must have requested it
/// via `Config::build_ground_truth`). `scope` selects whether the per-key
/// error metrics are computed over E ∪ R or E ∩ R.
pub fn evaluate(
    result: &IngestResult,
    estimated_hits: &[HeavyHitter],
    threshold: u64,
    scope: ComparisonScope,
) -> Option<EvaluationReport> {
    #[cfg(feature = "tracing")]
    let _span = info_span!("evaluate").entered();

    let ground_truth = result.ground_truth.as_ref()?;

    let estimated_set: HashSet<Kmer> = estimated_hits.iter().map(|h| h.kmer.clone()).collect();
    let real_set: HashSet<Kmer> = ground_truth
        .iter()
        .filter(|(_, &count)| count >= threshold)
        .map(|(k, _)| k.clone())
        .collect();

    let set_metrics = evaluator::set_metrics(&estimated_set, &real_set);

    let comparison_keys = evaluator::comparison_keys(scope, &estimated_set, &real_set);
    let (comparison_rows, error_metrics) = evaluator::error_metrics(
        &comparison_keys,
        |k| result.sketch.estimate(k) as f64,
        |k| ground_truth.count(k) as f64,
    );

    #[cfg(feature = "tracing")]
    info!(f1 = set_metrics.f1, mae = error_metrics.mae, "evaluation complete");

    Some(EvaluationReport {
        set_metrics,
        error_metrics,
        comparison_rows,
    })
}
