//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the series element (`ConsumptionPoint`)
//! - simulation constants (`SimulationParams`, `NoiseBand`)
//! - derived outputs (`ShortageResult`, `OutlookSummary`)
//! - run configuration (`OutlookConfig`, `ReservoirSpec`)

pub mod types;

pub use types::*;
