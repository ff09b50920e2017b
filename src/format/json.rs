//! JSON and JSONL decoders.
//!
//! Both synthesize a single logical column named `data` whose cells are
//! the raw JSON text of each element, per §2 component 1.

use anyhow::{Context, Result};

use crate::executor::TableData;

const COLUMN: &str = "data";

/// A JSON document containing a single top-level array; each element
/// becomes one row.
pub fn decode_json(bytes: &[u8]) -> Result<TableData> {
    let text = std::str::from_utf8(bytes).context("decoding JSON input as UTF-8")?;
    let value: serde_json::Value = serde_json::from_str(text).context("parsing JSON document")?;
    let elements = value
        .as_array()
        .context("top-level JSON value must be an array of row objects")?;

    let rows = elements
        .iter()
        .map(|el| vec![serde_json::to_string(el).unwrap_or_default()])
        .collect();

    Ok(TableData {
        headers: vec![COLUMN.to_string()],
        rows,
    })
}

/// Newline-delimited JSON: one value per line.
pub fn decode_jsonl(bytes: &[u8]) -> Result<TableData> {
    let text = std::str::from_utf8(bytes).context("decoding JSONL input as UTF-8")?;
    let rows = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| vec![line.to_string()])
        .collect();

    Ok(TableData {
        headers: vec![COLUMN.to_string()],
        rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_array_of_objects() {
        let input = br#"[{"a":1},{"a":2}]"#;
        let table = decode_json(input).unwrap();
        assert_eq!(table.headers, vec!["data"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][0], "{\"a\":1}");
    }

    #[test]
    fn decodes_jsonl_preserving_order() {
        let input = b"{\"a\": 1}\n{\"b\": 2}\n";
        let table = decode_jsonl(input).unwrap();
        assert_eq!(table.rows, vec![vec!["{\"a\": 1}"], vec!["{\"b\": 2}"]]);
    }

    #[test]
    fn jsonl_skips_blank_lines() {
        let input = b"{\"a\": 1}\n\n{\"b\": 2}\n";
        let table = decode_jsonl(input).unwrap();
        assert_eq!(table.rows.len(), 2);
    }
}
