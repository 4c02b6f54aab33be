//! Per-run CSV export.
//!
//! One header line, then one line per run. Rows are written as each rate
//! comes back, so an aborted session keeps the rows it already paid for.
//! Values are written verbatim (no quoting); a label containing a comma
//! would corrupt the file, which matches the historical exporter.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::RunRate;
use crate::error::AppError;
use crate::units::fmt_g;

pub const CSV_HEADER: &str = "run_number,event_count,beam_on_current,beam_energy,coherent_peak,collimator_diameter,radiator_type,BGRate";

/// Derive the destination file name from the requested run range.
pub fn output_file_name(min_run: u32, max_run: u32) -> PathBuf {
    PathBuf::from(format!("BGRateRCDBValue_{min_run}-{max_run}.csv"))
}

/// Incremental CSV writer for run rates.
///
/// Creating the writer truncates any previous export of the same range, so
/// re-runs overwrite rather than accumulate.
pub struct RateCsvWriter {
    file: File,
}

impl RateCsvWriter {
    /// Create (truncating) the destination file and write the header.
    pub fn create(path: &Path) -> Result<Self, AppError> {
        let mut file = File::create(path).map_err(|e| {
            AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display()))
        })?;
        writeln!(file, "{CSV_HEADER}")
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV header: {e}")))?;
        Ok(Self { file })
    }

    pub fn write_row(&mut self, rate: &RunRate) -> Result<(), AppError> {
        writeln!(self.file, "{}", format_row(rate))
            .map_err(|e| AppError::new(2, format!("Failed to write export CSV row: {e}")))
    }

    /// Flush buffered bytes; call once after the last row.
    pub fn finish(mut self) -> Result<(), AppError> {
        self.file
            .flush()
            .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))
    }
}

/// Render one data line: run number, the six conditions in RCDB order, then
/// the rate in `%g` form. Exactly 8 comma-separated fields.
pub fn format_row(rate: &RunRate) -> String {
    let c = &rate.conditions;
    format!(
        "{},{},{},{},{},{},{},{}",
        c.run_number,
        c.event_count,
        c.beam_on_current,
        c.beam_energy,
        c.coherent_peak,
        c.collimator_diameter,
        c.radiator_type,
        fmt_g(rate.bg_rate),
    )
}
