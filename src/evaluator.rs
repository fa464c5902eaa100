//! C9: the evaluator. Computes set-level precision/recall/F1 between an
//! estimated and a real heavy-hitter set, and per-key error statistics
//! (MAE/MRE/MSE/RMSE/Pearson correlation) between estimated and real
//! frequency maps.

use std::collections::HashSet;

use rayon::prelude::*;
use serde::Serialize;

use crate::kmer::Kmer;

/// Set-level precision/recall/F1 over estimated set E and real set R.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SetMetrics {
    pub true_positives: usize,
    pub false_positives: usize,
    pub false_negatives: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

/// Per-key error statistics over a comparison set C.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorMetrics {
    pub compared: usize,
    pub mae: f64,
    pub mre_percent: f64,
    pub mse: f64,
    pub rmse: f64,
    pub correlation: f64,
}

/// One row of per-k-mer comparison data, the library-level counterpart of
/// the reference evaluator's console-only per-k-mer inspection output.
#[derive(Debug, Clone)]
pub struct ComparisonRow {
    pub kmer: Kmer,
    pub estimate: f64,
    pub real: f64,
    pub absolute_error: f64,
    pub relative_error: Option<f64>,
}

/// Whether the per-key comparison set is the union (E ∪ R) or restricted
/// to keys present in both frequency maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonScope {
    /// C = E ∪ R, matching `only_heavy_hitters` in the original evaluator.
    Union,
    /// C = keys present in both the estimated and real frequency maps.
    Intersection,
}

/// Builds the comparison set C from `scope`: `Union` is E ∪ R, `Intersection`
/// is E ∩ R.
pub fn comparison_keys(
    scope: ComparisonScope,
    estimated: &HashSet<Kmer>,
    real: &HashSet<Kmer>,
) -> Vec<Kmer> {
    match scope {
        ComparisonScope::Union => estimated.union(real).cloned().collect(),
        ComparisonScope::Intersection => estimated.intersection(real).cloned().collect(),
    }
}

/// Computes TP/FP/FN and derived precision/recall/F1 between heavy-hitter
/// sets `estimated` and `real`.
pub fn set_metrics(estimated: &HashSet<Kmer>, real: &HashSet<Kmer>) -> SetMetrics {
    let true_positives = estimated.intersection(real).count();
    let false_positives = estimated.difference(real).count();
    let false_negatives = real.difference(estimated).count();

    let precision = if estimated.is_empty() {
        0.0
    } else {
        true_positives as f64 / estimated.len() as f64
    };
    let recall = if real.is_empty() {
        0.0
    } else {
        true_positives as f64 / real.len() as f64
    };
    let f1 = if precision + recall == 0.0 {
        0.0
    } else {
        2.0 * precision * recall / (precision + recall)
    };

    SetMetrics {
        true_positives,
        false_positives,
        false_negatives,
        precision,
        recall,
        f1,
    }
}

/// Builds the per-key comparison rows for the given keys and lookup
/// closures, then derives MAE/MRE/MSE/RMSE/correlation from them. Row
/// construction runs in parallel since it only reads the (frozen) sketch
/// and ground truth.
pub fn error_metrics<EstFn, RealFn>(
    keys: &[Kmer],
    estimate_fn: EstFn,
    real_fn: RealFn,
) -> (Vec<ComparisonRow>, ErrorMetrics)
where
    EstFn: Fn(&Kmer) -> f64 + Sync,
    RealFn: Fn(&Kmer) -> f64 + Sync,
{
    let rows: Vec<ComparisonRow> = keys
        .par_iter()
        .map(|kmer| {
            let estimate = estimate_fn(kmer);
            let real = real_fn(kmer);
            let absolute_error = (estimate - real).abs();
            let relative_error = if real == 0.0 {
                None
            } else {
                Some(absolute_error / real)
            };
            ComparisonRow {
                kmer: kmer.clone(),
                estimate,
                real,
                absolute_error,
                relative_error,
            }
        })
        .collect();

    let metrics = summarize(&rows);
    (rows, metrics)
}

fn summarize(rows: &[ComparisonRow]) -> ErrorMetrics {
    let compared = rows.len();
    if compared == 0 {
        return ErrorMetrics {
            compared: 0,
            mae: 0.0,
            mre_percent: 0.0,
            mse: 0.0,
            rmse: 0.0,
            correlation: 0.0,
        };
    }

    let mae = rows.iter().map(|r| r.absolute_error).sum::<f64>() / compared as f64;
    let mse = rows.iter().map(|r| r.absolute_error.powi(2)).sum::<f64>() / compared as f64;
    let rmse = mse.sqrt();

    let relative: Vec<f64> = rows.iter().filter_map(|r| r.relative_error).collect();
    let mre_percent = if relative.is_empty() {
        0.0
    } else {
        100.0 * relative.iter().sum::<f64>() / relative.len() as f64
    };

    let correlation = pearson(rows);

    ErrorMetrics {
        compared,
        mae,
        mre_percent,
        mse,
        rmse,
        correlation,
    }
}

fn pearson(rows: &[ComparisonRow]) -> f64 {
    let n = rows.len();
    if n < 2 {
        return 0.0;
    }

    let mean_est = rows.iter().map(|r| r.estimate).sum::<f64>() / n as f64;
    let mean_real = rows.iter().map(|r| r.real).sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_est = 0.0;
    let mut var_real = 0.0;
    for r in rows {
        let de = r.estimate - mean_est;
        let dr = r.real - mean_real;
        cov += de * dr;
        var_est += de * de;
        var_real += dr * dr;
    }

    if var_est == 0.0 || var_real == 0.0 {
        return 0.0;
    }

    cov / (var_est.sqrt() * var_real.sqrt())
}

/// One row of the threshold-sweep table: the metrics for one `(t_est,
/// t_real)` pair.
#[derive(Debug, Clone, Copy)]
pub struct SweepRow {
    pub t_est: u64,
    pub t_real: u64,
    pub metrics: SetMetrics,
}

/// Evaluates every `(t_est, t_real)` pair from the supplied vectors and
/// returns the full table plus the pair that maximizes F1.
pub fn threshold_sweep<F>(
    t_est_values: &[u64],
    t_real_values: &[u64],
    sets_for_thresholds: F,
) -> (Vec<SweepRow>, Option<SweepRow>)
where
    F: Fn(u64, u64) -> (HashSet<Kmer>, HashSet<Kmer>),
{
    let mut rows = Vec::with_capacity(t_est_values.len() * t_real_values.len());
    for &t_est in t_est_values {
        for &t_real in t_real_values {
            let (estimated, real) = sets_for_thresholds(t_est, t_real);
            let metrics = set_metrics(&estimated, &real);
            rows.push(SweepRow {
                t_est,
                t_real,
                metrics,
            });
        }
    }

    let best = rows
        .iter()
        .copied()
        .max_by(|a, b| a.metrics.f1.partial_cmp(&b.metrics.f1).unwrap());

    (rows, best)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_metrics_on_partially_overlapping_sets() {
        let estimated: HashSet<Kmer> =
            ["AAA", "CCC"].iter().map(|s| s.parse().unwrap()).collect();
        let real: HashSet<Kmer> = ["AAA", "GGG"].iter().map(|s| s.parse().unwrap()).collect();

        let m = set_metrics(&estimated, &real);
        assert_eq!(m.true_positives, 1);
        assert_eq!(m.false_positives, 1);
        assert_eq!(m.false_negatives, 1);
        assert!((m.precision - 0.5).abs() < 1e-9);
        assert!((m.recall - 0.5).abs() < 1e-9);
        assert!((m.f1 - 0.5).abs() < 1e-9);
    }

    #[test]
    fn empty_estimated_set_has_zero_precision() {
        let estimated: HashSet<Kmer> = HashSet::new();
        let real: HashSet<Kmer> = ["AAA".parse().unwrap()].into_iter().collect();
        let m = set_metrics(&estimated, &real);
        assert_eq!(m.precision, 0.0);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn empty_real_set_has_zero_recall() {
        let estimated: HashSet<Kmer> = ["AAA".parse().unwrap()].into_iter().collect();
        let real: HashSet<Kmer> = HashSet::new();
        let m = set_metrics(&estimated, &real);
        assert_eq!(m.recall, 0.0);
        assert_eq!(m.f1, 0.0);
    }

    #[test]
    fn mre_skips_zero_real_keys() {
        let kmers: Vec<Kmer> = vec!["AAA".parse().unwrap(), "CCC".parse().unwrap()];
        let estimate = |k: &Kmer| if k.to_string() == "AAA" { 10.0 } else { 4.0 };
        let real = |k: &Kmer| if k.to_string() == "AAA" { 0.0 } else { 2.0 };
        let (rows, metrics) = error_metrics(&kmers, estimate, real);
        assert_eq!(rows.len(), 2);
        // AAA has real=0 so its relative error is skipped; only CCC
        // contributes to MRE: |4-2|/2 * 100 = 100%.
        assert!((metrics.mre_percent - 100.0).abs() < 1e-9);
    }

    #[test]
    fn mae_mse_rmse_known_values() {
        let kmers: Vec<Kmer> = vec!["AAA".parse().unwrap(), "CCC".parse().unwrap()];
        let estimate = |k: &Kmer| if k.to_string() == "AAA" { 3.0 } else { 7.0 };
        let real = |_: &Kmer| 5.0;
        let (_, metrics) = error_metrics(&kmers, estimate, real);
        // absolute errors: |3-5|=2, |7-5|=2 -> MAE=2, MSE=4, RMSE=2
        assert!((metrics.mae - 2.0).abs() < 1e-9);
        assert!((metrics.mse - 4.0).abs() < 1e-9);
        assert!((metrics.rmse - 2.0).abs() < 1e-9);
    }

    #[test]
    fn correlation_undefined_below_two_points() {
        let kmers: Vec<Kmer> = vec!["AAA".parse().unwrap()];
        let (_, metrics) = error_metrics(&kmers, |_| 1.0, |_| 1.0);
        assert_eq!(metrics.correlation, 0.0);
    }

    #[test]
    fn correlation_zero_variance_is_zero() {
        let kmers: Vec<Kmer> = vec!["AAA".parse().unwrap(), "CCC".parse().unwrap()];
        let (_, metrics) = error_metrics(&kmers, |_| 5.0, |_| 3.0);
        assert_eq!(metrics.correlation, 0.0);
    }

    #[test]
    fn correlation_perfect_positive() {
        let kmers: Vec<Kmer> = vec![
            "AAA".parse().unwrap(),
            "CCC".parse().unwrap(),
            "GGG".parse().unwrap(),
        ];
        let estimate = |k: &Kmer| match k.to_string().as_str() {
            "AAA" => 1.0,
            "CCC" => 2.0,
            _ => 3.0,
        };
        let real = estimate;
        let (_, metrics) = error_metrics(&kmers, estimate, real);
        assert!((metrics.correlation - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_comparison_set_yields_zeroed_metrics() {
        let kmers: Vec<Kmer> = vec![];
        let (rows, metrics) = error_metrics(&kmers, |_| 0.0, |_| 0.0);
        assert!(rows.is_empty());
        assert_eq!(metrics.compared, 0);
        assert_eq!(metrics.mae, 0.0);
    }

    #[test]
    fn comparison_keys_union_includes_every_key_once() {
        let estimated: HashSet<Kmer> =
            ["AAA", "CCC"].iter().map(|s| s.parse().unwrap()).collect();
        let real: HashSet<Kmer> = ["AAA", "GGG"].iter().map(|s| s.parse().unwrap()).collect();
        let keys = comparison_keys(ComparisonScope::Union, &estimated, &real);
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn comparison_keys_intersection_includes_only_shared_keys() {
        let estimated: HashSet<Kmer> =
            ["AAA", "CCC"].iter().map(|s| s.parse().unwrap()).collect();
        let real: HashSet<Kmer> = ["AAA", "GGG"].iter().map(|s| s.parse().unwrap()).collect();
        let keys = comparison_keys(ComparisonScope::Intersection, &estimated, &real);
        assert_eq!(keys, vec!["AAA".parse::<Kmer>().unwrap()]);
    }

    #[test]
    fn threshold_sweep_picks_best_f1() {
        let t_est = [1u64, 2];
        let t_real = [1u64, 2];
        let sets = |t_est: u64, t_real: u64| {
            let estimated: HashSet<Kmer> = if t_est == 1 {
                ["AAA", "CCC"].iter().map(|s| s.parse().unwrap()).collect()
            } else {
                ["AAA"].iter().map(|s| s.parse().unwrap()).collect()
            };
            let real: HashSet<Kmer> = if t_real == 1 {
                ["AAA", "CCC"].iter().map(|s| s.parse().unwrap()).collect()
            } else {
                ["AAA"].iter().map(|s| s.parse().unwrap()).collect()
            };
            (estimated, real)
        };
        let (rows, best) = threshold_sweep(&t_est, &t_real, sets);
        assert_eq!(rows.len(), 4);
        let best = best.unwrap();
        assert!((best.metrics.f1 - 1.0).abs() < 1e-9);
    }
}
