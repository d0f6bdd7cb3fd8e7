pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::cli::{CliConfig, Command, LocalStorage};

pub use crate::config::GeocodeSettings;
pub use crate::core::{
    batch::BatchDriver, client::GeocodeClient, etl::EtlEngine, lookup::lookup,
    pipeline::GeocodePipeline,
};
pub use crate::utils::error::{EtlError, Result};
