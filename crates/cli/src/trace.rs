//! Search traces as polars frames: one row per trace point of every run.

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

use packing::packed::SearchReport;

/// One finished search run.
pub struct RunRecord {
    pub run: u32,
    pub seed: u64,
    pub report: SearchReport,
}

pub fn trace_frame(runs: &[RunRecord]) -> PolarsResult<DataFrame> {
    let points = runs.iter().map(|r| r.report.trace.len()).sum();
    let mut run = Vec::with_capacity(points);
    let mut seed = Vec::with_capacity(points);
    let mut step = Vec::with_capacity(points);
    let mut fraction = Vec::with_capacity(points);
    let mut best = Vec::with_capacity(points);
    let mut accepted = Vec::with_capacity(points);
    for record in runs {
        for point in &record.report.trace {
            run.push(record.run);
            seed.push(record.seed);
            step.push(point.step as u64);
            fraction.push(point.fraction);
            best.push(point.best_fraction);
            accepted.push(point.accepted as u64);
        }
    }
    df!(
        "run" => run,
        "seed" => seed,
        "step" => step,
        "fraction" => fraction,
        "best_fraction" => best,
        "accepted" => accepted
    )
}

enum Format {
    Csv,
    Parquet,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => Ok(Format::Csv),
        Some("parquet") => Ok(Format::Parquet),
        other => bail!("unsupported trace format {other:?}; use .csv or .parquet"),
    }
}

/// Write `df` as CSV or Parquet, chosen by the file extension.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    let format = format_of(path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    match format {
        Format::Csv => CsvWriter::new(file).include_header(true).finish(df)?,
        Format::Parquet => {
            ParquetWriter::new(file).finish(df)?;
        }
    }
    Ok(())
}

/// Best fraction and step count per run of a written trace.
pub fn summarize(path: &Path) -> Result<DataFrame> {
    let lf = match format_of(path)? {
        Format::Csv => LazyCsvReader::new(path)
            .with_infer_schema_length(Some(100))
            .finish()?,
        Format::Parquet => LazyFrame::scan_parquet(path, ScanArgsParquet::default())?,
    };
    let df = lf
        .group_by([col("run")])
        .agg([
            col("seed").first(),
            col("best_fraction").max(),
            col("step").max().alias("steps"),
        ])
        .sort(["run"], SortMultipleOptions::default())
        .collect()?;
    Ok(df)
}
