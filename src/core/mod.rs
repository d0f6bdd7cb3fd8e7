pub mod batch;
pub mod client;
pub mod etl;
pub mod formatter;
pub mod lookup;
pub mod pipeline;
pub mod sink;

pub use crate::domain::model::{AddressRecord, BatchOutcome, FormattedAddress, GeocodeResult};
pub use crate::domain::ports::{ConfigProvider, GeocodeApi, Pipeline, Storage};
pub use crate::utils::error::Result;
