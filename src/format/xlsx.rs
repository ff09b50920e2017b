//! XLSX decoder.
//!
//! Only the first sheet is consumed per §4.5 and the §8 boundary
//! behavior ("XLSX with multiple sheets -> only first is consumed").

use std::io::Cursor;

use anyhow::{Context, Result, anyhow};
use calamine::{Data, Reader, Xlsx, open_workbook_from_rs};

use crate::executor::TableData;

pub fn decode_xlsx(bytes: &[u8]) -> Result<TableData> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook: Xlsx<_> =
        open_workbook_from_rs(cursor).context("opening XLSX workbook from byte source")?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("XLSX workbook has no sheets"))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("reading worksheet '{sheet_name}'"))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => Vec::new(),
    };

    let data_rows = rows
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(TableData {
        headers,
        rows: data_rows,
    })
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}
