//! Output writers.
//!
//! - per-run CSV export (`export`)

pub mod export;

pub use export::*;
