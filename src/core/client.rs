use crate::core::{ConfigProvider, GeocodeApi};
use crate::domain::model::{Endpoint, RawResponse};
use crate::utils::error::Result;
use reqwest::Client;

pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for one endpoint of the addresses API.
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
    endpoint: Endpoint,
    country_code: Option<String>,
}

impl GeocodeClient {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
            endpoint,
            country_code: None,
        }
    }

    pub fn with_country_code(mut self, country_code: Option<String>) -> Self {
        self.country_code = country_code;
        self
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.base_url(), config.api_key(), config.endpoint())
            .with_country_code(config.country_code().map(str::to_string))
    }

    pub fn endpoint(&self) -> Endpoint {
        self.endpoint
    }

    pub fn url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.endpoint.path()
        )
    }
}

#[async_trait::async_trait]
impl GeocodeApi for GeocodeClient {
    async fn geocode(&self, address: &str) -> Result<RawResponse> {
        let mut query = vec![("text", address)];
        if let Some(country_code) = &self.country_code {
            query.push(("countryCode", country_code.as_str()));
        }

        tracing::debug!("GET {} text={:?}", self.url(), address);
        let response = self
            .client
            .get(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .query(&query)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("API response status: {}", status);

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::EtlError;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_search_sends_key_and_text() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/addresses/search")
                    .header("x-api-key", "test-key")
                    .query_param("text", "5201 C ST, PHILADELPHIA PA 19120-3608");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .body(r#"{"addresses": []}"#);
            })
            .await;

        let client = GeocodeClient::new(server.base_url(), "test-key", Endpoint::Search);
        let response = client
            .geocode("5201 C ST, PHILADELPHIA PA 19120-3608")
            .await
            .unwrap();

        api_mock.assert_async().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"addresses": []}"#);
    }

    #[tokio::test]
    async fn test_autocomplete_sends_country_code() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/addresses/_autocomplete")
                    .query_param("text", "5201 C")
                    .query_param("countryCode", "US");
                then.status(200).body(r#"{"addresses": []}"#);
            })
            .await;

        let client = GeocodeClient::new(
            format!("{}/", server.base_url()),
            "test-key",
            Endpoint::Autocomplete,
        )
        .with_country_code(Some("US".to_string()));
        let response = client.geocode("5201 C").await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_error_status_is_not_an_error() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/addresses/search");
                then.status(404)
                    .body(r#"{"error": {"code": "NOT_FOUND", "message": "missing"}}"#);
            })
            .await;

        let client = GeocodeClient::new(server.base_url(), "test-key", Endpoint::Search);
        let response = client.geocode("nowhere").await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(response.status, 404);
        assert!(response.body.contains("NOT_FOUND"));
    }

    #[tokio::test]
    async fn test_connection_failure_propagates() {
        let client = GeocodeClient::new("http://127.0.0.1:1", "test-key", Endpoint::Search);

        let err = client.geocode("anywhere").await.unwrap_err();

        assert!(matches!(err, EtlError::ApiError(_)));
    }
}
