use serde::Deserialize;
use std::fmt;

pub const NO_MATCH: &str = "No match";
pub const FAILED: &str = "Failed";

/// One row of the input table. Values are kept exactly as read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressRecord {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

/// Single-line address sent as the `text` query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedAddress(String);

impl FormattedAddress {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FormattedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Endpoint {
    /// Full-text match.
    #[default]
    Search,
    /// Partial match.
    Autocomplete,
}

impl Endpoint {
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Search => "/addresses/search",
            Endpoint::Autocomplete => "/addresses/_autocomplete",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Search => f.write_str("search"),
            Endpoint::Autocomplete => f.write_str("autocomplete"),
        }
    }
}

/// Status code and body of one API call, uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeocodeResult {
    Matched {
        latitude: serde_json::Number,
        longitude: serde_json::Number,
        confidence_score: serde_json::Number,
        precision_code: String,
    },
    NoMatch,
    Failed {
        status_code: u16,
    },
}

/// Text rendering of one geocoded address, in output column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub address: String,
    pub latitude: String,
    pub longitude: String,
    pub confidence_score: String,
    pub precision_code: String,
}

impl ResultRow {
    pub const HEADERS: [&'static str; 5] = [
        "address",
        "latitude",
        "longitude",
        "confidence_score",
        "precision_code",
    ];

    pub fn new(address: &FormattedAddress, result: &GeocodeResult) -> Self {
        let (latitude, longitude, confidence_score, precision_code) = match result {
            GeocodeResult::Matched {
                latitude,
                longitude,
                confidence_score,
                precision_code,
            } => (
                latitude.to_string(),
                longitude.to_string(),
                confidence_score.to_string(),
                precision_code.clone(),
            ),
            GeocodeResult::NoMatch => (
                NO_MATCH.to_string(),
                NO_MATCH.to_string(),
                NO_MATCH.to_string(),
                NO_MATCH.to_string(),
            ),
            GeocodeResult::Failed { status_code } => (
                FAILED.to_string(),
                FAILED.to_string(),
                format!("Status Code: {}", status_code),
                FAILED.to_string(),
            ),
        };

        Self {
            address: address.to_string(),
            latitude,
            longitude,
            confidence_score,
            precision_code,
        }
    }

    pub fn fields(&self) -> [&str; 5] {
        [
            self.address.as_str(),
            self.latitude.as_str(),
            self.longitude.as_str(),
            self.confidence_score.as_str(),
            self.precision_code.as_str(),
        ]
    }
}

/// A per-address request that came back with a non-200 status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedLookup {
    pub address: String,
    pub status: u16,
}

impl fmt::Display for FailedLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error for address '{}': Status Code {}",
            self.address, self.status
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub matched: usize,
    pub no_match: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn record(&mut self, result: &GeocodeResult) {
        match result {
            GeocodeResult::Matched { .. } => self.matched += 1,
            GeocodeResult::NoMatch => self.no_match += 1,
            GeocodeResult::Failed { .. } => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.matched + self.no_match + self.failed
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub rows: Vec<ResultRow>,
    pub failures: Vec<FailedLookup>,
    pub summary: BatchSummary,
}
