//! Output Serializer: re-encodes post-preprocessing rows into the
//! canonical byte stream for the input family.

use std::io::Write;

use crate::error::ProcessError;
use crate::executor::TableData;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Tsv,
    Ltsv,
    Jsonl,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Ltsv => "ltsv",
            OutputFormat::Jsonl => "jsonl",
        }
    }
}

pub fn serialize(
    table: &TableData,
    validity: &[bool],
    format: OutputFormat,
    valid_rows_only: bool,
) -> Result<Vec<u8>, ProcessError> {
    match format {
        OutputFormat::Csv => write_delimited(table, validity, valid_rows_only, b','),
        OutputFormat::Tsv => write_delimited(table, validity, valid_rows_only, b'\t'),
        OutputFormat::Ltsv => Ok(write_ltsv(table, validity, valid_rows_only)),
        OutputFormat::Jsonl => write_jsonl(table, validity, valid_rows_only),
    }
}

fn write_delimited(
    table: &TableData,
    validity: &[bool],
    valid_rows_only: bool,
    delimiter: u8,
) -> Result<Vec<u8>, ProcessError> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(&table.headers)?;
    for (row, valid) in table.rows.iter().zip(validity) {
        if valid_rows_only && !valid {
            continue;
        }
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| ProcessError::Io(std::io::Error::other(e.to_string())))
}

fn write_ltsv(table: &TableData, validity: &[bool], valid_rows_only: bool) -> Vec<u8> {
    let mut out = Vec::new();
    for (row, valid) in table.rows.iter().zip(validity) {
        if valid_rows_only && !valid {
            continue;
        }
        let line = table
            .headers
            .iter()
            .zip(row)
            .map(|(header, value)| format!("{header}:{value}"))
            .collect::<Vec<_>>()
            .join("\t");
        out.extend_from_slice(line.as_bytes());
        out.push(b'\n');
    }
    out
}

fn write_jsonl(
    table: &TableData,
    validity: &[bool],
    valid_rows_only: bool,
) -> Result<Vec<u8>, ProcessError> {
    let mut out = Vec::new();
    for (row, valid) in table.rows.iter().zip(validity) {
        if valid_rows_only && !valid {
            continue;
        }
        let Some(raw) = row.first() else { continue };
        if raw.is_empty() {
            continue;
        }
        let value: serde_json::Value =
            serde_json::from_str(raw).map_err(|source| ProcessError::InvalidJsonAfterPrep { line: 0, source })?;
        serde_json::to_writer(&mut out, &value).map_err(anyhow::Error::from)?;
        out.push(b'\n');
    }
    if out.is_empty() {
        return Err(ProcessError::EmptyJsonOutput);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_table() -> TableData {
        TableData {
            headers: vec!["name".into(), "email".into(), "age".into()],
            rows: vec![
                vec!["John Doe".into(), "john@example.com".into(), "30".into()],
                vec!["Jane Smith".into(), "jane@example.com".into(), "25".into()],
            ],
        }
    }

    #[test]
    fn csv_round_trip_matches_basic_scenario() {
        let table = sample_table();
        let bytes = serialize(&table, &[true, true], OutputFormat::Csv, false).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "name,email,age\nJohn Doe,john@example.com,30\nJane Smith,jane@example.com,25\n"
        );
    }

    #[test]
    fn valid_rows_only_drops_invalid_rows() {
        let table = sample_table();
        let bytes = serialize(&table, &[true, false], OutputFormat::Csv, true).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "name,email,age\nJohn Doe,john@example.com,30\n");
    }

    #[test]
    fn ltsv_has_no_header_row() {
        let table = sample_table();
        let bytes = write_ltsv(&table, &[true, true], false);
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "name:John Doe\temail:john@example.com\tage:30\nname:Jane Smith\temail:jane@example.com\tage:25\n"
        );
    }

    #[test]
    fn jsonl_skips_empty_rows_and_compacts() {
        let table = TableData {
            headers: vec!["data".into()],
            rows: vec![
                vec!["{\"a\": 1}".into()],
                vec!["".into()],
                vec!["{\"b\":   2}".into()],
            ],
        };
        let bytes = write_jsonl(&table, &[true, true, true], false).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn jsonl_all_rows_emptied_is_fatal() {
        let table = TableData {
            headers: vec!["data".into()],
            rows: vec![vec!["".into()]],
        };
        let err = write_jsonl(&table, &[false], false).unwrap_err();
        assert!(matches!(err, ProcessError::EmptyJsonOutput));
    }
}
