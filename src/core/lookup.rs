use crate::core::GeocodeApi;
use crate::domain::response::{AddressesResponse, Candidate, ErrorResponse};
use crate::utils::error::{EtlError, Result};

/// Single interactive query. Unlike the batch path, a non-200 status is an
/// error here.
pub async fn lookup<A: GeocodeApi + ?Sized>(api: &A, text: &str) -> Result<Vec<Candidate>> {
    let response = api.geocode(text).await?;

    if response.status != 200 {
        let (code, message) = match ErrorResponse::from_body(&response.body) {
            Some(error) => (error.code(), error.error.message),
            None => (String::new(), response.body),
        };
        return Err(EtlError::ApiStatusError {
            status: response.status,
            code,
            message,
        });
    }

    let parsed = AddressesResponse::from_body(&response.body).map_err(|source| {
        EtlError::ResponseParseError {
            address: text.to_string(),
            source,
        }
    })?;

    tracing::debug!("{} candidates for '{}'", parsed.addresses.len(), text);
    Ok(parsed.addresses)
}
