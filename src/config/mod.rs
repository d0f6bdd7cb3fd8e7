#[cfg(feature = "cli")]
pub mod cli;
pub mod settings;
pub mod toml_config;

pub use settings::GeocodeSettings;
pub use toml_config::TomlConfig;
