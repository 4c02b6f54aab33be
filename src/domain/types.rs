//! Shared domain types.
//!
//! These are built once (from the CLI and the RCDB) and flow strictly forward
//! through the pipeline without mutation: fetch -> rate calculation -> export.

use std::path::PathBuf;

/// User-controlled beam/collimator parameters forwarded to the rate
/// calculator with every request.
///
/// Field meanings and defaults mirror the calculator's own input form;
/// energies are in GeV, distances in m.
#[derive(Debug, Clone)]
pub struct BeamParams {
    pub beam_emittance: f64,
    pub photon_nbins: u32,
    pub photon_emax: f64,
    pub photon_emin: f64,
    pub collim_distance: f64,
    pub peak_elow: f64,
    pub peak_ehigh: f64,
    pub back_elow: f64,
    pub back_ehigh: f64,
    pub endp_elow: f64,
    pub endp_ehigh: f64,
}

impl Default for BeamParams {
    fn default() -> Self {
        Self {
            beam_emittance: 10e-9,
            photon_nbins: 2000,
            photon_emax: 12.0,
            photon_emin: 3.0,
            collim_distance: 76.0,
            peak_elow: 8.4,
            peak_ehigh: 9.0,
            back_elow: 0.1,
            back_ehigh: 3.0,
            endp_elow: 10.0,
            endp_ehigh: 11.7,
        }
    }
}

/// Resolved configuration for one export invocation.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub rcdb_path: PathBuf,
    pub min_run: u32,
    pub max_run: u32,
    pub beam: BeamParams,
}

/// The six RCDB conditions recorded for one production run.
///
/// Numeric conditions keep their RCDB units (MeV for energies); unit
/// conversion happens in one place when the calculator query is built.
#[derive(Debug, Clone)]
pub struct RunConditions {
    pub run_number: u32,
    pub event_count: i64,
    /// Beam current averaged over beam-on periods.
    pub beam_on_current: f64,
    /// Electron beam energy (MeV).
    pub beam_energy: f64,
    /// Coherent peak position (MeV).
    pub coherent_peak: f64,
    /// Free-text aperture label, e.g. `"3.4mm hole"`.
    pub collimator_diameter: String,
    /// Free-text radiator label carrying the thickness in um, e.g. `"Be 750"`.
    pub radiator_type: String,
}

/// One output row: the fetched conditions plus the computed BGRate.
#[derive(Debug, Clone)]
pub struct RunRate {
    pub conditions: RunConditions,
    /// Endpoint tagged flux sum, scaled to GHz.
    pub bg_rate: f64,
}
