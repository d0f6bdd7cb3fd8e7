//! Wire schema of the addresses API.

use crate::domain::model::GeocodeResult;
use serde::Deserialize;

/// Body of a 200 response from `/addresses/search` or `/addresses/_autocomplete`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddressesResponse {
    pub addresses: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub label: Option<String>,
    pub location: Location,
    #[serde(rename = "$metadata")]
    pub metadata: CandidateMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(rename = "representativePoint")]
    pub representative_point: Point,
}

/// Coordinates are kept as received so they render in their original form.
#[derive(Debug, Clone, Deserialize)]
pub struct Point {
    pub latitude: serde_json::Number,
    pub longitude: serde_json::Number,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateMetadata {
    pub geocode: GeocodeMetadata,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeMetadata {
    pub confidence: Confidence,
    #[serde(rename = "precisionCode")]
    pub precision_code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Confidence {
    pub score: serde_json::Number,
}

/// Body of a non-200 response.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub code: serde_json::Value,
    #[serde(default)]
    pub message: String,
}

impl AddressesResponse {
    pub fn from_body(body: &str) -> serde_json::Result<Self> {
        serde_json::from_str(body)
    }

    /// Only the first candidate counts; the rest are dropped.
    pub fn into_result(self) -> GeocodeResult {
        match self.addresses.into_iter().next() {
            Some(candidate) => candidate.into_result(),
            None => GeocodeResult::NoMatch,
        }
    }
}

impl Candidate {
    pub fn into_result(self) -> GeocodeResult {
        let point = self.location.representative_point;
        GeocodeResult::Matched {
            latitude: point.latitude,
            longitude: point.longitude,
            confidence_score: self.metadata.geocode.confidence.score,
            precision_code: self.metadata.geocode.precision_code,
        }
    }

    pub fn summary(&self) -> String {
        let point = &self.location.representative_point;
        format!(
            "{} | lat {}, lon {} | confidence {} | precision {}",
            self.label.as_deref().unwrap_or("<no label>"),
            point.latitude,
            point.longitude,
            self.metadata.geocode.confidence.score,
            self.metadata.geocode.precision_code
        )
    }
}

impl ErrorResponse {
    /// Lenient: returns `None` when the body is not the documented error shape.
    pub fn from_body(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }

    pub fn code(&self) -> String {
        match &self.error.code {
            serde_json::Value::String(code) => code.clone(),
            serde_json::Value::Null => String::new(),
            other => other.to_string(),
        }
    }
}
