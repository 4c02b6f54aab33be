//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the beam/collimator parameters forwarded to the calculator (`BeamParams`)
//! - the resolved per-invocation configuration (`ExportConfig`)
//! - per-run condition rows and computed rates (`RunConditions`, `RunRate`)

pub mod types;

pub use types::*;
