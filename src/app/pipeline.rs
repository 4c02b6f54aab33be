//! The export pipeline behind the binary entry point.
//!
//! RCDB fetch -> per-run rate calculation -> CSV rows
//!
//! Runs are processed strictly in run-number order, one blocking rate
//! request per run, the row written as soon as its rate is known.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::data::{RateToolClient, RcdbProvider};
use crate::domain::{ExportConfig, RunRate};
use crate::error::AppError;
use crate::io::export::{RateCsvWriter, output_file_name};

/// Outcome of a completed export.
#[derive(Debug)]
pub struct ExportOutput {
    pub runs_written: usize,
    pub csv_path: PathBuf,
}

/// Execute the full export pipeline.
pub fn run_export(config: &ExportConfig) -> Result<ExportOutput, AppError> {
    let db = RcdbProvider::open(&config.rcdb_path)?;
    let runs = db.fetch_run_conditions(config.min_run, config.max_run)?;
    info!(
        "{} production run(s) in [{}, {}]",
        runs.len(),
        config.min_run,
        config.max_run
    );

    let client = RateToolClient::from_env()?;
    let csv_path = output_file_name(config.min_run, config.max_run);
    let mut writer = RateCsvWriter::create(&csv_path)?;

    let mut runs_written = 0;
    for conditions in runs {
        let bg_rate = client.fetch_rate(&conditions, &config.beam)?;
        debug!(run = conditions.run_number, bg_rate, "rate received");
        writer.write_row(&RunRate { conditions, bg_rate })?;
        runs_written += 1;
    }
    writer.finish()?;

    Ok(ExportOutput {
        runs_written,
        csv_path,
    })
}
