use crate::domain::model::ResultRow;
use crate::utils::error::{EtlError, Result};

/// Renders the header plus one line per row. The header is written even when
/// there are no rows.
pub fn write_results(rows: &[ResultRow], delimiter: u8) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    writer.write_record(ResultRow::HEADERS)?;
    for row in rows {
        writer.write_record(row.fields())?;
    }

    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}
