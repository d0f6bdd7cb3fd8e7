use crate::config::settings::{override_with, GeocodeSettings};
use crate::config::toml_config::TomlConfig;
use crate::core::Storage;
use crate::domain::model::Endpoint;
use crate::utils::error::Result;
use clap::{Args, Parser, Subcommand};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Parser)]
#[command(name = "batch-geocode")]
#[command(about = "Geocode addresses through a remote address search API")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// API key sent in the x-api-key header
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Base URL of the geocoding API
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Value of the countryCode query parameter
    #[arg(long, global = true)]
    pub country_code: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Geocode every row of an address table and write a result table
    Batch(BatchArgs),
    /// Full-text search for one address and print the candidates
    Search { text: String },
    /// Partial-match lookup for one address and print the candidates
    Autocomplete { text: String },
}

#[derive(Debug, Clone, Default, Args)]
pub struct BatchArgs {
    /// Input table with Address, City, State and Zip Code columns
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output table
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(long)]
    pub batch_size: Option<usize>,

    #[arg(long, value_enum)]
    pub endpoint: Option<Endpoint>,

    /// Field delimiter for both input and output tables
    #[arg(long)]
    pub delimiter: Option<char>,
}

impl CliConfig {
    /// Defaults, then `--config`, then flags.
    pub fn resolve_settings(&self) -> Result<GeocodeSettings> {
        let mut settings = GeocodeSettings::default();

        if let Some(path) = &self.config {
            tracing::debug!("Loading configuration from: {}", path);
            settings.apply_file(&TomlConfig::from_file(path)?);
        }

        override_with(&mut settings.api_key, &self.api_key);
        override_with(&mut settings.base_url, &self.base_url);
        if self.country_code.is_some() {
            settings.country_code = self.country_code.clone();
        }

        match &self.command {
            Command::Batch(args) => {
                override_with(&mut settings.input_path, &args.input);
                override_with(&mut settings.output_path, &args.output);
                override_with(&mut settings.batch_size, &args.batch_size);
                override_with(&mut settings.endpoint, &args.endpoint);
                override_with(&mut settings.delimiter, &args.delimiter);
            }
            Command::Search { .. } => settings.endpoint = Endpoint::Search,
            Command::Autocomplete { .. } => settings.endpoint = Endpoint::Autocomplete,
        }

        Ok(settings)
    }
}

/// Filesystem storage rooted at `base_path`; absolute paths bypass the root.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = fs::read(full_path)?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
