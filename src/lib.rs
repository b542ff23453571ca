//! `water-outlook` library crate.
//!
//! The binary (`wo`) is a thin wrapper around this library so that:
//!
//! - the synthesis and analysis engine is testable without spawning processes
//! - the pipeline is reusable by other front-ends (dashboards, services)
//! - code stays easy to navigate as the project grows

pub mod analysis;
pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod plot;
pub mod report;
