//! Unit parsing and numeric formatting helpers.
//!
//! RCDB stores several beam-line settings as free-text labels (collimator
//! aperture, radiator id + thickness). The calculator wants plain SI values,
//! so the labels are parsed here, in one place, with explicit failures
//! instead of inline pattern matching scattered through the pipeline.

use regex::Regex;

use crate::error::AppError;

/// 10^-3: MeV -> GeV, mm -> m.
pub const MILLI: f64 = 1e-3;
/// 10^-6: um -> m.
pub const MICRO: f64 = 1e-6;
/// 10^-9: Hz -> GHz.
pub const NANO: f64 = 1e-9;

/// Parse a collimator aperture label like `"3.4mm hole"` or `"5 mm hole"`
/// into a diameter in meters.
///
/// Labels that are not a hole aperture (e.g. `"Blocking"`) fail.
pub fn parse_collimator_diameter(label: &str) -> Result<f64, AppError> {
    let re = Regex::new(r"^\s*([0-9]+(?:\.[0-9]+)?)\s*mm hole\s*$")
        .map_err(|e| AppError::new(4, format!("Collimator pattern failed to compile: {e}")))?;
    let caps = re.captures(label).ok_or_else(|| {
        AppError::new(
            4,
            format!("Unrecognized collimator diameter '{label}' (expected '<n>mm hole')."),
        )
    })?;
    let mm: f64 = caps[1]
        .parse()
        .map_err(|e| AppError::new(4, format!("Invalid collimator diameter '{label}': {e}")))?;
    Ok(MILLI * mm)
}

/// Parse a radiator label like `"Be 750"` or `"Al-2 300"` into a thickness
/// in meters; the first embedded integer is the thickness in micrometers.
pub fn parse_radiator_thickness(label: &str) -> Result<f64, AppError> {
    let re = Regex::new(r"[A-Za-z0-9-]+ ([0-9]+)")
        .map_err(|e| AppError::new(4, format!("Radiator pattern failed to compile: {e}")))?;
    let caps = re.captures(label).ok_or_else(|| {
        AppError::new(
            4,
            format!("Unrecognized radiator type '{label}' (expected '<id> <thickness um>')."),
        )
    })?;
    let um: f64 = caps[1]
        .parse()
        .map_err(|e| AppError::new(4, format!("Invalid radiator thickness '{label}': {e}")))?;
    Ok(MICRO * um)
}

/// Render a float the way C's `%g` does with the default precision:
/// 6 significant digits, trailing zeros stripped, exponential notation with
/// a signed two-digit exponent once the value leaves `[1e-4, 1e6)`.
///
/// The calculator's CGI was only ever driven by `%g`-formatted query strings,
/// so the exporter reproduces that rendering exactly.
pub fn fmt_g(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Round to 6 significant digits first so the fixed/exponential cutoff
    // sees the rounded exponent, as printf does.
    let sci = format!("{value:.5e}");
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let Ok(exp) = exp.parse::<i32>() else {
        return sci;
    };

    if exp < -4 || exp >= 6 {
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{mantissa}e{sign}{:02}", exp.abs())
    } else {
        let decimals = (5 - exp) as usize;
        let fixed = format!("{value:.decimals$}");
        if fixed.contains('.') {
            fixed.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            fixed
        }
    }
}
