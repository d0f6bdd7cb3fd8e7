use crate::core::batch::BatchDriver;
use crate::core::formatter::{format_addresses, read_address_records};
use crate::core::sink::write_results;
use crate::core::{AddressRecord, BatchOutcome, ConfigProvider, GeocodeApi, Pipeline, Storage};
use crate::utils::error::Result;

/// Reads the address table, geocodes every row and writes the result table.
pub struct GeocodePipeline<S: Storage, C: ConfigProvider, A: GeocodeApi> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) driver: BatchDriver<A>,
}

impl<S: Storage, C: ConfigProvider, A: GeocodeApi> GeocodePipeline<S, C, A> {
    pub fn new(storage: S, config: C, api: A) -> Self {
        let driver = BatchDriver::new(api, config.batch_size());
        Self {
            storage,
            config,
            driver,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, A: GeocodeApi> Pipeline for GeocodePipeline<S, C, A> {
    async fn extract(&self) -> Result<Vec<AddressRecord>> {
        tracing::debug!("Reading addresses from: {}", self.config.input_path());
        let data = self.storage.read_file(self.config.input_path()).await?;
        read_address_records(&data, self.config.delimiter())
    }

    async fn transform(&self, records: Vec<AddressRecord>) -> Result<BatchOutcome> {
        let addresses = format_addresses(&records);
        tracing::info!(
            "📡 Geocoding {} addresses in batches of {}",
            addresses.len(),
            self.driver.batch_size()
        );
        self.driver.run(&addresses).await
    }

    async fn load(&self, outcome: BatchOutcome) -> Result<String> {
        let data = write_results(&outcome.rows, self.config.delimiter())?;

        tracing::debug!(
            "Writing {} rows ({} bytes) to storage",
            outcome.rows.len(),
            data.len()
        );
        self.storage
            .write_file(self.config.output_path(), &data)
            .await?;

        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeocodeSettings;
    use crate::core::client::GeocodeClient;
    use crate::utils::error::EtlError;
    use httpmock::prelude::*;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), data.as_bytes().to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                EtlError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    const INPUT: &str = "Address,City,State,Zip Code\n\
                         5201 C ST,PHILADELPHIA,PA,19120-3608\n\
                         1 NOWHERE RD,NOWHERE,ZZ,00000\n\
                         404 LOST AVE,MISSING,PA,19000\n";

    fn settings(base_url: &str) -> GeocodeSettings {
        GeocodeSettings {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
            input_path: "addresses.csv".to_string(),
            output_path: "geocoded.csv".to_string(),
            ..GeocodeSettings::default()
        }
    }

    fn pipeline(
        storage: MockStorage,
        base_url: &str,
    ) -> GeocodePipeline<MockStorage, GeocodeSettings, GeocodeClient> {
        let config = settings(base_url);
        let client = GeocodeClient::from_config(&config);
        GeocodePipeline::new(storage, config, client)
    }

    #[tokio::test]
    async fn test_extract_reads_records_in_order() {
        let storage = MockStorage::with_file("addresses.csv", INPUT);
        let pipeline = pipeline(storage, "http://localhost");

        let records = pipeline.extract().await.unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].street, "5201 C ST");
        assert_eq!(records[2].city, "MISSING");
    }

    #[tokio::test]
    async fn test_extract_missing_input_file() {
        let storage = MockStorage::with_file("other.csv", INPUT);
        let pipeline = pipeline(storage, "http://localhost");

        let err = pipeline.extract().await.unwrap_err();

        assert!(matches!(err, EtlError::IoError(_)));
    }

    #[tokio::test]
    async fn test_extract_transform_load() {
        let server = MockServer::start_async().await;
        let matched_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/addresses/search")
                    .header("x-api-key", "test-key")
                    .query_param("text", "5201 C ST, PHILADELPHIA PA 19120-3608");
                then.status(200).json_body(json!({
                    "addresses": [{
                        "label": "5201 C ST, PHILADELPHIA PA 19120-3608",
                        "location": {"representativePoint": {"latitude": 40.03105, "longitude": -75.11754}},
                        "$metadata": {"geocode": {"confidence": {"score": 98}, "precisionCode": "S8HPNTSCZA"}}
                    }]
                }));
            })
            .await;
        let empty_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/addresses/search")
                    .query_param("text", "1 NOWHERE RD, NOWHERE ZZ 00000");
                then.status(200).json_body(json!({"addresses": []}));
            })
            .await;
        let missing_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/addresses/search")
                    .query_param("text", "404 LOST AVE, MISSING PA 19000");
                then.status(404)
                    .json_body(json!({"error": {"code": "NOT_FOUND", "message": "Not found"}}));
            })
            .await;

        let storage = MockStorage::with_file("addresses.csv", INPUT);
        let pipeline = pipeline(storage.clone(), &server.base_url());

        let records = pipeline.extract().await.unwrap();
        let outcome = pipeline.transform(records).await.unwrap();
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].status, 404);

        let output_path = pipeline.load(outcome).await.unwrap();

        matched_mock.assert_async().await;
        empty_mock.assert_async().await;
        missing_mock.assert_async().await;
        assert_eq!(output_path, "geocoded.csv");

        let written = storage.get_file("geocoded.csv").await.unwrap();
        let text = String::from_utf8(written).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "address,latitude,longitude,confidence_score,precision_code",
                "\"5201 C ST, PHILADELPHIA PA 19120-3608\",40.03105,-75.11754,98,S8HPNTSCZA",
                "\"1 NOWHERE RD, NOWHERE ZZ 00000\",No match,No match,No match,No match",
                "\"404 LOST AVE, MISSING PA 19000\",Failed,Failed,Status Code: 404,Failed",
            ]
        );
    }
}
