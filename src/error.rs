//! Fatal and per-cell error types, plus the `ProcessResult` aggregator.

use thiserror::Error;

/// Errors returned directly to the caller. A fatal error means no
/// `ProcessResult` is produced for the call.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("field '{field}' declares unknown tag '{tag}'")]
    InvalidTagFormat { field: String, tag: String },

    #[error("duplicate field name '{0}' in record schema")]
    DuplicateFieldName(String),

    #[error("input source is empty")]
    EmptyFile,

    #[error("JSON value on line {line} is not valid JSON after preprocessing: {source}")]
    InvalidJsonAfterPrep {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("output would contain zero JSONL rows")]
    EmptyJsonOutput,

    #[error("failed to decode input: {0}")]
    Decode(#[from] anyhow::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single per-cell error record. `row` is 1-based and excludes the
/// header. `column` is the bound column name, not the field name.
#[derive(Debug, Clone, PartialEq)]
pub enum CellError {
    Validation {
        row: usize,
        column: String,
        field: String,
        value: String,
        tag: String,
        message: String,
    },
    Prep {
        row: usize,
        column: String,
        field: String,
        tag: String,
        message: String,
    },
}

impl CellError {
    pub fn row(&self) -> usize {
        match self {
            CellError::Validation { row, .. } | CellError::Prep { row, .. } => *row,
        }
    }

    pub fn column(&self) -> &str {
        match self {
            CellError::Validation { column, .. } | CellError::Prep { column, .. } => column,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, CellError::Validation { .. })
    }

    pub fn is_prep(&self) -> bool {
        matches!(self, CellError::Prep { .. })
    }
}

/// Totals, columns, and the append-only error list produced by one
/// `Processor::process` call.
#[derive(Debug, Clone)]
pub struct ProcessResult {
    pub row_count: usize,
    pub valid_row_count: usize,
    pub columns: Vec<String>,
    pub format: String,
    errors: Vec<CellError>,
}

impl ProcessResult {
    pub fn new(columns: Vec<String>, format: impl Into<String>) -> Self {
        Self {
            row_count: 0,
            valid_row_count: 0,
            columns,
            format: format.into(),
            errors: Vec::new(),
        }
    }

    pub fn push_error(&mut self, error: CellError) {
        self.errors.push(error);
    }

    pub fn invalid_row_count(&self) -> usize {
        self.row_count - self.valid_row_count
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[CellError] {
        &self.errors
    }

    pub fn validation_errors(&self) -> impl Iterator<Item = &CellError> {
        self.errors.iter().filter(|e| e.is_validation())
    }

    pub fn prep_errors(&self) -> impl Iterator<Item = &CellError> {
        self.errors.iter().filter(|e| e.is_prep())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_row_count_is_derived() {
        let mut result = ProcessResult::new(vec!["a".into()], "csv");
        result.row_count = 5;
        result.valid_row_count = 3;
        assert_eq!(result.invalid_row_count(), 2);
    }

    #[test]
    fn filtered_views_split_by_variant() {
        let mut result = ProcessResult::new(vec!["a".into()], "csv");
        result.push_error(CellError::Validation {
            row: 1,
            column: "a".into(),
            field: "A".into(),
            value: "x".into(),
            tag: "required".into(),
            message: "value is required".into(),
        });
        result.push_error(CellError::Prep {
            row: 2,
            column: "a".into(),
            field: "A".into(),
            tag: "type_conversion".into(),
            message: "could not convert".into(),
        });
        assert_eq!(result.validation_errors().count(), 1);
        assert_eq!(result.prep_errors().count(), 1);
        assert!(result.has_errors());
    }
}
