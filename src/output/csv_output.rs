//! Semicolon-delimited CSV rendering of product records

use crate::catalog::{ProductRecord, CSV_HEADER};
use crate::output::traits::OutputResult;
use std::io::Write;

/// Field separator of every category CSV
pub const CSV_DELIMITER: u8 = b';';

/// Writes the header row and one row per record to `writer`
///
/// Fields containing the delimiter, quotes or line breaks are quoted.
pub fn write_records<W: Write>(writer: W, records: &[ProductRecord]) -> OutputResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(CSV_DELIMITER)
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADER)?;
    for record in records {
        csv_writer.write_record(record.csv_row())?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;

    Ok(())
}

/// Renders the records into an in-memory CSV document
pub fn render_records(records: &[ProductRecord]) -> OutputResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_records(&mut buffer, records)?;
    Ok(buffer)
}
