//! CSV, TSV, and LTSV decoders.

use anyhow::{Context, Result};

use crate::executor::TableData;

pub fn decode_delimited(bytes: &[u8], delimiter: u8) -> Result<TableData> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .context("reading header row")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.context("reading data row")?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(TableData { headers, rows })
}

/// LTSV: each line is `label:value` pairs joined by tabs. The header list
/// is taken from the first line's labels, in order; later lines are read
/// positionally against that header order.
pub fn decode_ltsv(bytes: &[u8]) -> Result<TableData> {
    let text = std::str::from_utf8(bytes).context("decoding LTSV input as UTF-8")?;
    let mut lines = text.lines().filter(|l| !l.is_empty());

    let Some(first) = lines.next() else {
        return Ok(TableData::default());
    };

    let first_pairs = split_ltsv_line(first);
    let headers: Vec<String> = first_pairs.iter().map(|(label, _)| label.clone()).collect();
    let mut rows = vec![first_pairs.into_iter().map(|(_, value)| value).collect()];

    for line in lines {
        let pairs = split_ltsv_line(line);
        rows.push(pairs.into_iter().map(|(_, value)| value).collect());
    }

    Ok(TableData { headers, rows })
}

fn split_ltsv_line(line: &str) -> Vec<(String, String)> {
    line.split('\t')
        .map(|field| match field.split_once(':') {
            Some((label, value)) => (label.to_string(), value.to_string()),
            None => (field.to_string(), String::new()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_simple_csv() {
        let table = decode_delimited(b"a,b\n1,2\n3,4\n", b',').unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn decodes_tsv_with_tab_delimiter() {
        let table = decode_delimited(b"a\tb\n1\t2\n", b'\t').unwrap();
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.rows, vec![vec!["1", "2"]]);
    }

    #[test]
    fn decodes_ltsv() {
        let input = b"name:John\tage:30\nname:Jane\tage:25\n";
        let table = decode_ltsv(input).unwrap();
        assert_eq!(table.headers, vec!["name", "age"]);
        assert_eq!(table.rows, vec![vec!["John", "30"], vec!["Jane", "25"]]);
    }
}
