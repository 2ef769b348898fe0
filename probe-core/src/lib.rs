//! Core library for the `weather-probe` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Abstraction over historical weather providers
//! - The feasibility probe and its summary statistics
//! - Project skeleton creation and verification
//!
//! It is used by `weather-probe`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod probe;
pub mod provider;
pub mod scaffold;
pub mod stats;

pub use config::{Config, ProviderConfig};
pub use error::ProbeError;
pub use model::{
    DateRange, FeasibilityResult, Location, Observation, ObservationSet, ProbeTarget, RunReport,
};
pub use probe::FeasibilityProbe;
pub use provider::{HistoricalWeatherProvider, ProviderId};
pub use scaffold::{ScaffoldReport, Skeleton, StructureReport};
pub use stats::SummaryStats;
