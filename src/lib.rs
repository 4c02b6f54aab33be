//! `bgrate` library crate.
//!
//! The binary (`bgrate`) is a thin wrapper around this library so that:
//!
//! - the RCDB fetch, rate calculation, and CSV export are testable without
//!   spawning processes
//! - the label parsers and numeric formatting stay isolated and reusable

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod units;
