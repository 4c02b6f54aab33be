//! Command-line parsing for the BGRate CSV exporter.
//!
//! Argument parsing stays separate from the fetch/format code; `app` turns
//! the parsed flags into an explicit [`ExportConfig`](crate::domain::ExportConfig)
//! that is passed through every function boundary.
//!
//! Long-flag spellings (`--minRun`, `--beamEmittance`, ...) are kept exactly
//! as the historical tool defined them so existing batch scripts keep working.

use std::path::PathBuf;

use clap::Parser;

/// Obtain BGRate values using RCDB inputs to build run-specific MC.
#[derive(Debug, Parser)]
#[command(
    name = "bgrate",
    version,
    about = "Obtain BGRate values using RCDB inputs to build run-specific MC"
)]
pub struct Cli {
    /// Path to rcdb.sqlite.
    #[arg(short = 'p', value_name = "PATH")]
    pub rcdb_path: PathBuf,

    /// Min run number (inclusive).
    #[arg(long = "minRun", value_name = "RUN")]
    pub min_run: u32,

    /// Max run number (inclusive).
    #[arg(long = "maxRun", value_name = "RUN")]
    pub max_run: u32,

    /// Electron beam emittance (m rad).
    #[arg(long = "beamEmittance", default_value_t = 10e-9)]
    pub beam_emittance: f64,

    /// Number of bins in the photon spectrum.
    #[arg(long = "photonNbins", default_value_t = 2000)]
    pub photon_nbins: u32,

    /// Photon spectrum energy maximum (GeV).
    #[arg(long = "photonEmax", default_value_t = 12.0)]
    pub photon_emax: f64,

    /// Photon spectrum energy minimum (GeV).
    #[arg(long = "photonEmin", default_value_t = 3.0)]
    pub photon_emin: f64,

    /// Radiator-collimator distance (m).
    #[arg(long = "collimDistance", default_value_t = 76.0)]
    pub collim_distance: f64,

    /// Low edge of the primary window (GeV).
    #[arg(long = "peakElow", default_value_t = 8.4)]
    pub peak_elow: f64,

    /// High edge of the primary window (GeV).
    #[arg(long = "peakEhigh", default_value_t = 9.0)]
    pub peak_ehigh: f64,

    /// Low edge of the background window (GeV).
    #[arg(long = "backElow", default_value_t = 0.1)]
    pub back_elow: f64,

    /// High edge of the background window (GeV).
    #[arg(long = "backEhigh", default_value_t = 3.0)]
    pub back_ehigh: f64,

    /// Low edge of the endpoint tagging window (GeV).
    #[arg(long = "endpElow", default_value_t = 10.0)]
    pub endp_elow: f64,

    /// High edge of the endpoint tagging window (GeV).
    #[arg(long = "endpEhigh", default_value_t = 11.7)]
    pub endp_ehigh: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_historical_flag_spellings() {
        let cli = Cli::try_parse_from([
            "bgrate", "-p", "rcdb.sqlite", "--minRun", "30274", "--maxRun", "31000",
        ])
        .unwrap();
        assert_eq!(cli.rcdb_path, PathBuf::from("rcdb.sqlite"));
        assert_eq!(cli.min_run, 30274);
        assert_eq!(cli.max_run, 31000);
    }

    #[test]
    fn physics_defaults_match_the_calculator_form() {
        let cli = Cli::try_parse_from([
            "bgrate", "-p", "rcdb.sqlite", "--minRun", "1", "--maxRun", "2",
        ])
        .unwrap();
        assert_eq!(cli.beam_emittance, 10e-9);
        assert_eq!(cli.photon_nbins, 2000);
        assert_eq!(cli.photon_emax, 12.0);
        assert_eq!(cli.photon_emin, 3.0);
        assert_eq!(cli.collim_distance, 76.0);
        assert_eq!(cli.peak_elow, 8.4);
        assert_eq!(cli.peak_ehigh, 9.0);
        assert_eq!(cli.back_elow, 0.1);
        assert_eq!(cli.back_ehigh, 3.0);
        assert_eq!(cli.endp_elow, 10.0);
        assert_eq!(cli.endp_ehigh, 11.7);
    }

    #[test]
    fn run_bounds_are_required() {
        assert!(Cli::try_parse_from(["bgrate", "-p", "rcdb.sqlite"]).is_err());
    }
}
