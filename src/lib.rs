//! Schema-driven cleaning, validation, and format bridging for tabular
//! datasets.
//!
//! A [`RecordSchema`] declares fields with two attribute chains (`prep`,
//! `validate`); a [`Processor`] compiles the schema once and then binds,
//! cleans, and validates every row of a CSV/TSV/LTSV/XLSX/Parquet/JSON/
//! JSONL byte stream (optionally compressed), emitting a typed record
//! collection and a canonical output byte stream.

pub mod binder;
pub mod error;
pub mod executor;
pub mod format;
pub mod naming;
pub mod schema;
pub mod serialize;
pub mod value;

use std::io::Cursor;

pub use error::{CellError, ProcessError, ProcessResult};
pub use format::codec::Codec;
pub use format::{FileType, InputTag};
pub use schema::{CompileMode, FieldSpec, RecordSchema};
pub use serialize::OutputFormat;
pub use value::{FieldKind, Record, TypedValue};

use schema::Plan;

/// A seekable byte stream tagged with the output format it contains.
#[derive(Debug)]
pub struct OutputStream {
    cursor: Cursor<Vec<u8>>,
    format: OutputFormat,
}

impl OutputStream {
    fn new(bytes: Vec<u8>, format: OutputFormat) -> Self {
        Self {
            cursor: Cursor::new(bytes),
            format,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn into_inner(self) -> Cursor<Vec<u8>> {
        self.cursor
    }

    pub fn get_ref(&self) -> &[u8] {
        self.cursor.get_ref()
    }
}

impl std::io::Read for OutputStream {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        std::io::Read::read(&mut self.cursor, buf)
    }
}

impl std::io::Seek for OutputStream {
    fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
        std::io::Seek::seek(&mut self.cursor, pos)
    }
}

/// Compiles a [`RecordSchema`] once and runs it over any number of
/// inputs of the declared [`FileType`].
pub struct Processor {
    input_tag: InputTag,
    schema: RecordSchema,
    mode: CompileMode,
    valid_rows_only: bool,
    plan: std::sync::OnceLock<Plan>,
}

impl Processor {
    pub fn new(file_type: FileType, schema: RecordSchema) -> Self {
        Self::with_tag(InputTag::uncompressed(file_type), schema)
    }

    pub fn with_tag(input_tag: InputTag, schema: RecordSchema) -> Self {
        Self {
            input_tag,
            schema,
            mode: CompileMode::Lenient,
            valid_rows_only: false,
            plan: std::sync::OnceLock::new(),
        }
    }

    pub fn with_strict_tag_parsing(mut self) -> Self {
        self.mode = CompileMode::Strict;
        self
    }

    pub fn with_valid_rows_only(mut self) -> Self {
        self.valid_rows_only = true;
        self
    }

    fn plan(&self) -> Result<&Plan, ProcessError> {
        if let Some(plan) = self.plan.get() {
            return Ok(plan);
        }
        let compiled = schema::compile(&self.schema, self.mode)?;
        Ok(self.plan.get_or_init(|| compiled))
    }

    /// Runs the full pipeline: decode -> bind -> execute -> serialize.
    /// The plan is compiled lazily on first call and reused thereafter.
    pub fn process(
        &self,
        input: &[u8],
        records: &mut Vec<Record>,
    ) -> Result<(OutputStream, ProcessResult), ProcessError> {
        let plan = self.plan()?;

        let mut table = format::decode(self.input_tag.file_type, self.input_tag.codec, input)?;
        let binding = binder::bind(plan, &table.headers);

        let mut result = ProcessResult::new(table.headers.clone(), self.input_tag.file_type.as_str());
        let validity = executor::execute(
            plan,
            &binding,
            &mut table,
            self.input_tag.file_type.is_json_family(),
            records,
            &mut result,
        )?;

        let output_format = self.input_tag.file_type.output_format();
        let bytes = serialize::serialize(&table, &validity, output_format, self.valid_rows_only)?;

        log::info!(
            "processed {} row(s), {} valid, {} error(s)",
            result.row_count,
            result.valid_row_count,
            result.errors().len()
        );

        Ok((OutputStream::new(bytes, output_format), result))
    }
}
