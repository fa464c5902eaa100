use std::fs::File;
use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;

use sketchmer::cli::{Args, OutputFormat, SketchChoice};
use sketchmer::config::Config;
use sketchmer::driver;
use sketchmer::format::{self, EvaluationSummary};

fn main() -> ExitCode {
    #[cfg(feature = "tracing")]
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> sketchmer::Result<()> {
    let config = build_config(args)?;

    let ingested = driver::ingest(&config)?;
    let (hits, threshold) = driver::extract_heavy_hitters(&ingested, args.phi);
    let rows = format::build_rows(&hits, threshold, ingested.total_kmers, args.phi, args.k);

    let evaluation = if args.evaluate {
        driver::evaluate(&ingested, &hits, threshold, args.comparison_scope.into()).map(
            |report| {
                eprintln!(
                    "precision={:.4} recall={:.4} f1={:.4} mae={:.4} mre%={:.4} rmse={:.4} correlation={:.4}",
                    report.set_metrics.precision,
                    report.set_metrics.recall,
                    report.set_metrics.f1,
                    report.error_metrics.mae,
                    report.error_metrics.mre_percent,
                    report.error_metrics.rmse,
                    report.error_metrics.correlation,
                );
                EvaluationSummary {
                    set_metrics: report.set_metrics,
                    error_metrics: report.error_metrics,
                }
            },
        )
    } else {
        None
    };

    write_report(args, &rows, evaluation)
}

fn build_config(args: &Args) -> sketchmer::Result<Config> {
    match args.sketch {
        SketchChoice::CountSketch => Config::new_count_sketch(
            args.k,
            args.phi,
            &args.input_dir,
            args.d,
            args.w,
            args.evaluate,
        ),
        SketchChoice::Tower => {
            let w8 = args.w8.unwrap_or(args.w);
            let w16 = args.w16.unwrap_or(args.w);
            let w32 = args.w32.unwrap_or(args.w);
            Config::new_tower(
                args.k,
                args.phi,
                &args.input_dir,
                (args.d, w8),
                (args.d, w16),
                (args.d, w32),
                args.evaluate,
            )
        }
    }
}

fn write_report(
    args: &Args,
    rows: &[format::ReportRow],
    evaluation: Option<EvaluationSummary>,
) -> sketchmer::Result<()> {
    match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|source| sketchmer::SketchError::IoFailure {
                path: path.clone(),
                source,
            })?;
            write_rows(args.format, file, rows, evaluation)
        }
        None => write_rows(args.format, io::stdout().lock(), rows, evaluation),
    }
}

fn write_rows<W: Write>(
    format: OutputFormat,
    out: W,
    rows: &[format::ReportRow],
    evaluation: Option<EvaluationSummary>,
) -> sketchmer::Result<()> {
    match format {
        // CSV schema is fixed (§6); the evaluation report has no CSV column
        // and is only emitted as a sibling object in the JSON report.
        OutputFormat::Csv => format::write_csv(out, rows),
        OutputFormat::Json => format::write_json(out, rows, evaluation),
    }
}
