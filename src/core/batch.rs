use crate::core::GeocodeApi;
use crate::domain::model::{
    BatchOutcome, FailedLookup, FormattedAddress, GeocodeResult, RawResponse, ResultRow,
};
use crate::domain::response::{AddressesResponse, ErrorResponse};
use crate::utils::error::{EtlError, Result};

pub const DEFAULT_BATCH_SIZE: usize = 200;

/// Geocodes addresses one at a time, in input order.
///
/// Addresses are grouped into chunks of `batch_size` for progress reporting
/// only; every request is awaited before the next one is sent.
pub struct BatchDriver<A: GeocodeApi> {
    api: A,
    batch_size: usize,
}

impl<A: GeocodeApi> BatchDriver<A> {
    pub fn new(api: A, batch_size: usize) -> Self {
        Self {
            api,
            batch_size: batch_size.max(1),
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub async fn run(&self, addresses: &[FormattedAddress]) -> Result<BatchOutcome> {
        let mut outcome = BatchOutcome {
            rows: Vec::with_capacity(addresses.len()),
            ..BatchOutcome::default()
        };
        let batch_count = addresses.len().div_ceil(self.batch_size);

        for (index, batch) in addresses.chunks(self.batch_size).enumerate() {
            tracing::info!(
                "Geocoding batch {}/{} ({} addresses)",
                index + 1,
                batch_count,
                batch.len()
            );

            for address in batch {
                let response = self.api.geocode(address.as_str()).await?;
                let result = interpret(address, &response)?;

                if let GeocodeResult::Failed { status_code } = result {
                    let failure = FailedLookup {
                        address: address.to_string(),
                        status: status_code,
                    };
                    tracing::warn!("{}", failure);
                    outcome.failures.push(failure);
                }

                outcome.summary.record(&result);
                outcome.rows.push(ResultRow::new(address, &result));
            }
        }

        Ok(outcome)
    }
}

/// Maps one raw response onto its terminal state. Only status 200 is a
/// success; a 200 body outside the response schema is an error.
pub fn interpret(address: &FormattedAddress, response: &RawResponse) -> Result<GeocodeResult> {
    if response.status != 200 {
        if let Some(error) = ErrorResponse::from_body(&response.body) {
            tracing::debug!(
                "API error for '{}': {} {}",
                address,
                error.code(),
                error.error.message
            );
        }
        return Ok(GeocodeResult::Failed {
            status_code: response.status,
        });
    }

    let parsed = AddressesResponse::from_body(&response.body).map_err(|source| {
        EtlError::ResponseParseError {
            address: address.to_string(),
            source,
        }
    })?;

    Ok(parsed.into_result())
}
