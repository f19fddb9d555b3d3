//! mapsweep — search Google Maps places and export the results to CSV.
//!
//! The search itself is performed by the Places web service; this crate owns
//! the argument-to-call-to-CSV pipeline: parameter handling, the call
//! boundary, and the export file.

pub mod config;
pub mod export;
pub mod places;
