use crate::domain::model::{AddressRecord, BatchOutcome, Endpoint, RawResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key(&self) -> &str;
    fn base_url(&self) -> &str;
    fn endpoint(&self) -> Endpoint;
    fn country_code(&self) -> Option<&str>;
    fn batch_size(&self) -> usize;
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn delimiter(&self) -> u8;
}

/// One call against the remote geocoder. Transport failures are errors;
/// every HTTP status, including non-2xx, is a successful `RawResponse`.
#[async_trait]
pub trait GeocodeApi: Send + Sync {
    async fn geocode(&self, address: &str) -> Result<RawResponse>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<AddressRecord>>;
    async fn transform(&self, records: Vec<AddressRecord>) -> Result<BatchOutcome>;
    async fn load(&self, outcome: BatchOutcome) -> Result<String>;
}
