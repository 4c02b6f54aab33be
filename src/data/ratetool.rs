//! Client for the Hall D Coherent Bremsstrahlung rate calculator.
//!
//! The calculator is a CGI endpoint taking ~17 numeric query parameters and
//! replying with an HTML page; the quantity of interest is the
//! "Endpoint tagged flux sum" embedded in one of its table rows.

use regex::Regex;
use reqwest::blocking::Client;
use tracing::debug;

use crate::domain::{BeamParams, RunConditions};
use crate::error::AppError;
use crate::units::{self, MILLI, NANO, fmt_g};

const DEFAULT_BASE_URL: &str = "http://zeus.phys.uconn.edu/halld/cobrems/ratetool.cgi";

/// Trailing directive telling the CGI which of its actions to run.
const RUN_DIRECTIVE: &str = "run=plot+collimated+beam+rate+spectrum";

/// Blocking HTTP client for the rate calculator.
pub struct RateToolClient {
    client: Client,
    base_url: String,
}

impl RateToolClient {
    /// Build a client, honoring a `BGRATE_RATETOOL_URL` override from the
    /// environment (`.env` supported) for stub servers and alternate hosts.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let base_url = std::env::var("BGRATE_RATETOOL_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Fetch the BGRate for one run: build the query, GET it, and pull the
    /// flux sum out of the HTML reply.
    pub fn fetch_rate(&self, run: &RunConditions, beam: &BeamParams) -> Result<f64, AppError> {
        let url = format!("{}?{}", self.base_url, build_query(run, beam)?);
        debug!(run = run.run_number, url = %url, "rate calculator request");

        let resp = self.client.get(&url).send().map_err(|e| {
            AppError::new(
                4,
                format!("Rate calculator request failed for run {}: {e}", run.run_number),
            )
        })?;
        if !resp.status().is_success() {
            return Err(AppError::new(
                4,
                format!(
                    "Rate calculator returned status {} for run {}.",
                    resp.status(),
                    run.run_number
                ),
            ));
        }
        let body = resp.text().map_err(|e| {
            AppError::new(
                4,
                format!("Failed to read rate calculator reply for run {}: {e}", run.run_number),
            )
        })?;

        parse_flux_sum(&body)
            .map_err(|e| AppError::new(4, format!("Run {}: {e}", run.run_number)))
    }
}

/// Build the calculator query string for one run.
///
/// Parameter order and `%g` rendering match what the CGI's own form submits.
/// Energies arrive from RCDB in MeV and leave in GeV; the collimator and
/// radiator labels are parsed into meters.
pub fn build_query(run: &RunConditions, beam: &BeamParams) -> Result<String, AppError> {
    let with_run = |e: AppError| AppError::new(4, format!("Run {}: {e}", run.run_number));
    let collim_diam = units::parse_collimator_diameter(&run.collimator_diameter).map_err(with_run)?;
    let rad_thickness = units::parse_radiator_thickness(&run.radiator_type).map_err(with_run)?;

    let params = [
        format!("beamEnergy={}", fmt_g(MILLI * run.beam_energy)),
        format!("beamCurrent={}", fmt_g(MILLI * run.beam_on_current)),
        format!("beamEmittance={}", fmt_g(beam.beam_emittance)),
        format!("radThickness={}", fmt_g(rad_thickness)),
        format!("photonEpeak={}", fmt_g(MILLI * run.coherent_peak)),
        format!("photonNbins={}", beam.photon_nbins),
        format!("photonEmax={}", fmt_g(beam.photon_emax)),
        format!("photonEmin={}", fmt_g(beam.photon_emin)),
        format!("collimDistance={}", fmt_g(beam.collim_distance)),
        format!("collimDiam={}", fmt_g(collim_diam)),
        format!("peakElow={}", fmt_g(beam.peak_elow)),
        format!("peakEhigh={}", fmt_g(beam.peak_ehigh)),
        format!("backElow={}", fmt_g(beam.back_elow)),
        format!("backEhigh={}", fmt_g(beam.back_ehigh)),
        format!("endpElow={}", fmt_g(beam.endp_elow)),
        format!("endpEhigh={}", fmt_g(beam.endp_ehigh)),
        RUN_DIRECTIVE.to_string(),
    ];
    Ok(params.join("&"))
}

/// Extract the endpoint tagged flux sum from the calculator's HTML reply and
/// scale it to the GHz value carried in the CSV.
pub fn parse_flux_sum(body: &str) -> Result<f64, AppError> {
    let re = Regex::new(r"Endpoint tagged flux sum is\s*([0-9.E+-]+)")
        .map_err(|e| AppError::new(4, format!("Flux sum pattern failed to compile: {e}")))?;
    let caps = re.captures(body).ok_or_else(|| {
        AppError::new(4, "Rate calculator reply has no 'Endpoint tagged flux sum'.")
    })?;
    let flux: f64 = caps[1].parse().map_err(|e| {
        AppError::new(4, format!("Invalid flux sum '{}': {e}", &caps[1]))
    })?;
    Ok(NANO * flux)
}
