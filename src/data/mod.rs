//! External data sources.
//!
//! - RCDB SQLite access (`rcdb`)
//! - Coherent Bremsstrahlung rate calculator client (`ratetool`)

pub mod ratetool;
pub mod rcdb;

pub use ratetool::*;
pub use rcdb::*;
