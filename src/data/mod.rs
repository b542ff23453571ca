//! Synthetic consumption series.
//!
//! - shared demand components (`components`)
//! - past consumption (`historical`)
//! - short-horizon projection (`forecast`)
//!
//! Every generator takes an explicit random source so runs are reproducible
//! when a seeded RNG is supplied.

pub mod components;
pub mod forecast;
pub mod historical;

pub use forecast::{forecast_baseline, generate_forecast};
pub use historical::generate_historical;
