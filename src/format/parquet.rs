//! Parquet decoder, via the row-group iterator rather than the `arrow`
//! integration (not needed here; this adapter only ever renders cells to
//! strings).

use anyhow::{Context, Result};
use parquet::file::reader::{FileReader, SerializedFileReader};

use crate::executor::TableData;

pub fn decode_parquet(bytes: &[u8]) -> Result<TableData> {
    let reader =
        SerializedFileReader::new(bytes::Bytes::from(bytes.to_vec())).context("opening parquet file")?;

    let schema = reader.metadata().file_metadata().schema_descr();
    let headers: Vec<String> = (0..schema.num_columns())
        .map(|i| schema.column(i).name().to_string())
        .collect();

    let mut rows = Vec::new();
    for row in reader.get_row_iter(None).context("iterating parquet rows")? {
        let row = row.context("reading parquet row")?;
        let cells = row
            .get_column_iter()
            .map(|(_, field)| field.to_string())
            .collect();
        rows.push(cells);
    }

    Ok(TableData { headers, rows })
}
