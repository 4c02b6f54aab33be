//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - wires up logging
//! - runs the RCDB -> rate calculator -> CSV pipeline
//! - prints the completion summary

use clap::Parser;

use crate::cli::Cli;
use crate::domain::{BeamParams, ExportConfig};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `bgrate` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    crate::logging::init();

    let config = export_config_from_args(&cli);
    let output = pipeline::run_export(&config)?;

    println!(
        "Wrote {} run(s) to {}",
        output.runs_written,
        output.csv_path.display()
    );
    Ok(())
}

/// Turn parsed flags into the explicit config record handed through the
/// pipeline; nothing downstream reads CLI state directly.
pub fn export_config_from_args(cli: &Cli) -> ExportConfig {
    ExportConfig {
        rcdb_path: cli.rcdb_path.clone(),
        min_run: cli.min_run,
        max_run: cli.max_run,
        beam: BeamParams {
            beam_emittance: cli.beam_emittance,
            photon_nbins: cli.photon_nbins,
            photon_emax: cli.photon_emax,
            photon_emin: cli.photon_emin,
            collim_distance: cli.collim_distance,
            peak_elow: cli.peak_elow,
            peak_ehigh: cli.peak_ehigh,
            back_elow: cli.back_elow,
            back_ehigh: cli.back_ehigh,
            endp_elow: cli.endp_elow,
            endp_ehigh: cli.endp_ehigh,
        },
    }
}
