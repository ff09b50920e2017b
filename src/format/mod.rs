//! Format Adapter: normalizes a raw byte stream plus a declared file-type
//! tag into a [`TableData`], transparently decompressing first.

pub mod codec;
pub mod csv_tsv;
pub mod json;
pub mod parquet;
pub mod xlsx;

use crate::error::ProcessError;
use crate::executor::TableData;
use crate::serialize::OutputFormat;
use codec::Codec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Csv,
    Tsv,
    Ltsv,
    Json,
    Jsonl,
    Xlsx,
    Parquet,
}

impl FileType {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(FileType::Csv),
            "tsv" => Some(FileType::Tsv),
            "ltsv" => Some(FileType::Ltsv),
            "json" => Some(FileType::Json),
            "jsonl" | "ndjson" => Some(FileType::Jsonl),
            "xlsx" => Some(FileType::Xlsx),
            "parquet" => Some(FileType::Parquet),
            _ => None,
        }
    }

    pub fn is_json_family(self) -> bool {
        matches!(self, FileType::Json | FileType::Jsonl)
    }

    /// Per §4.4: CSV/XLSX/Parquet -> CSV, TSV -> TSV, LTSV -> LTSV,
    /// JSON/JSONL -> JSONL.
    pub fn output_format(self) -> OutputFormat {
        match self {
            FileType::Csv | FileType::Xlsx | FileType::Parquet => OutputFormat::Csv,
            FileType::Tsv => OutputFormat::Tsv,
            FileType::Ltsv => OutputFormat::Ltsv,
            FileType::Json | FileType::Jsonl => OutputFormat::Jsonl,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileType::Csv => "csv",
            FileType::Tsv => "tsv",
            FileType::Ltsv => "ltsv",
            FileType::Json => "json",
            FileType::Jsonl => "jsonl",
            FileType::Xlsx => "xlsx",
            FileType::Parquet => "parquet",
        }
    }
}

/// A file-type tag plus its transparent compression codec: the full tag
/// space a `Processor` is constructed with is the cross product of
/// `FileType` and `Codec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputTag {
    pub file_type: FileType,
    pub codec: Codec,
}

impl InputTag {
    pub fn new(file_type: FileType, codec: Codec) -> Self {
        Self { file_type, codec }
    }

    pub fn uncompressed(file_type: FileType) -> Self {
        Self::new(file_type, Codec::None)
    }

    /// Parses a dotted extension chain (e.g. `data.csv.gz`), inferable
    /// externally from a path, case-insensitively.
    pub fn from_path(path: &str) -> Option<Self> {
        let mut parts: Vec<&str> = path.split('.').collect();
        if parts.len() < 2 {
            return None;
        }

        let last = parts.pop().unwrap();
        if let Some(codec) = Codec::from_extension(last) {
            let file_ext = parts.pop()?;
            FileType::from_extension(file_ext).map(|ft| Self::new(ft, codec))
        } else {
            FileType::from_extension(last).map(Self::uncompressed)
        }
    }
}

/// Decompresses `bytes` with `codec`, then decodes according to
/// `file_type`. Rejects an empty source (post-decompression) with
/// `EmptyFile`.
pub fn decode(file_type: FileType, codec: Codec, bytes: &[u8]) -> Result<TableData, ProcessError> {
    let decompressed = codec.decompress(bytes).map_err(ProcessError::Decode)?;
    if decompressed.is_empty() {
        return Err(ProcessError::EmptyFile);
    }

    let table = match file_type {
        FileType::Csv => csv_tsv::decode_delimited(&decompressed, b',').map_err(ProcessError::Decode)?,
        FileType::Tsv => csv_tsv::decode_delimited(&decompressed, b'\t').map_err(ProcessError::Decode)?,
        FileType::Ltsv => csv_tsv::decode_ltsv(&decompressed).map_err(ProcessError::Decode)?,
        FileType::Json => json::decode_json(&decompressed).map_err(ProcessError::Decode)?,
        FileType::Jsonl => json::decode_jsonl(&decompressed).map_err(ProcessError::Decode)?,
        FileType::Xlsx => xlsx::decode_xlsx(&decompressed).map_err(ProcessError::Decode)?,
        FileType::Parquet => parquet::decode_parquet(&decompressed).map_err(ProcessError::Decode)?,
    };

    log::debug!(
        "decoded {} row(s) with {} header(s) from a {} source",
        table.rows.len(),
        table.headers.len(),
        file_type.as_str()
    );
    Ok(table)
}
