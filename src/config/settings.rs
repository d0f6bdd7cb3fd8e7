use crate::config::toml_config::TomlConfig;
use crate::core::batch::DEFAULT_BATCH_SIZE;
use crate::core::ConfigProvider;
use crate::domain::model::Endpoint;
use crate::utils::error::Result;
use crate::utils::validation::{
    parse_delimiter, validate_non_empty_string, validate_path, validate_positive_number,
    validate_url, Validate,
};

pub const DEFAULT_INPUT_PATH: &str = "addresses.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "geocoded_addresses.csv";

/// Fully resolved settings: defaults, then the TOML file, then command line
/// overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeocodeSettings {
    pub api_key: String,
    pub base_url: String,
    pub endpoint: Endpoint,
    pub country_code: Option<String>,
    pub batch_size: usize,
    pub input_path: String,
    pub output_path: String,
    pub delimiter: char,
}

impl Default for GeocodeSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: String::new(),
            endpoint: Endpoint::default(),
            country_code: None,
            batch_size: DEFAULT_BATCH_SIZE,
            input_path: DEFAULT_INPUT_PATH.to_string(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            delimiter: ',',
        }
    }
}

impl GeocodeSettings {
    pub fn apply_file(&mut self, file: &TomlConfig) {
        if let Some(api) = &file.api {
            override_with(&mut self.api_key, &api.api_key);
            override_with(&mut self.base_url, &api.base_url);
            override_with(&mut self.endpoint, &api.endpoint);
            if api.country_code.is_some() {
                self.country_code = api.country_code.clone();
            }
        }
        if let Some(batch) = &file.batch {
            override_with(&mut self.batch_size, &batch.batch_size);
        }
        if let Some(io) = &file.io {
            override_with(&mut self.input_path, &io.input);
            override_with(&mut self.output_path, &io.output);
            override_with(&mut self.delimiter, &io.delimiter);
        }
    }
}

pub(crate) fn override_with<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

impl Validate for GeocodeSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("api.api_key", &self.api_key)?;
        validate_url("api.base_url", &self.base_url)?;
        if let Some(country_code) = &self.country_code {
            validate_non_empty_string("api.country_code", country_code)?;
        }
        validate_positive_number("batch.batch_size", self.batch_size, 1)?;
        validate_path("io.input", &self.input_path)?;
        validate_path("io.output", &self.output_path)?;
        parse_delimiter("io.delimiter", self.delimiter)?;
        Ok(())
    }
}

impl ConfigProvider for GeocodeSettings {
    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn delimiter(&self) -> u8 {
        parse_delimiter("io.delimiter", self.delimiter).unwrap_or_else(|e| {
            tracing::warn!("{}; using ',' instead", e);
            b','
        })
    }
}
