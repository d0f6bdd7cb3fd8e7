use crate::domain::model::{AddressRecord, FormattedAddress};
use crate::utils::error::{EtlError, Result};

pub const STREET_COLUMN: &str = "Address";
pub const CITY_COLUMN: &str = "City";
pub const STATE_COLUMN: &str = "State";
pub const ZIP_CODE_COLUMN: &str = "Zip Code";

/// Reads the input table. Header names must match exactly and cell values
/// are kept as-is. Cells missing from a short row read as empty.
pub fn read_address_records(data: &[u8], delimiter: u8) -> Result<Vec<AddressRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    let column = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| EtlError::MissingColumnError {
                column: name.to_string(),
            })
    };

    let street = column(STREET_COLUMN)?;
    let city = column(CITY_COLUMN)?;
    let state = column(STATE_COLUMN)?;
    let zip_code = column(ZIP_CODE_COLUMN)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let cell = |index: usize| row.get(index).unwrap_or_default().to_string();
        records.push(AddressRecord {
            street: cell(street),
            city: cell(city),
            state: cell(state),
            zip_code: cell(zip_code),
        });
    }

    tracing::debug!("Parsed {} address records", records.len());
    Ok(records)
}

pub fn format_address(record: &AddressRecord) -> FormattedAddress {
    FormattedAddress::new(format!(
        "{}, {} {} {}",
        record.street, record.city, record.state, record.zip_code
    ))
}

pub fn format_addresses(records: &[AddressRecord]) -> Vec<FormattedAddress> {
    records.iter().map(format_address).collect()
}
