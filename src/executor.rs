//! Row Executor: drives the compiled [`Plan`] over every row of a
//! [`TableData`], in two passes, accumulating errors and typed records.

use crate::binder::{Binding, ColumnIndex};
use crate::error::{CellError, ProcessError, ProcessResult};
use crate::schema::Plan;
use crate::value::Record;

/// Headers and rows normalized by the Format Adapter. Rows shorter than
/// the header count are padded in place before execution; rows longer
/// than the header count keep their extra cells, which binding ignores.
#[derive(Debug, Clone, Default)]
pub struct TableData {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableData {
    fn pad_rows(&mut self) {
        let width = self.headers.len();
        for row in &mut self.rows {
            if row.len() < width {
                row.resize(width, String::new());
            }
        }
    }
}

const SYNTHETIC_JSON_COLUMN: &str = "data";

/// Runs the plan over every row of `table`, mutating it in place with
/// preprocessed values and appending records/errors to the caller-owned
/// outputs. Returns a per-row validity flag vector, aligned with
/// `table.rows`.
pub fn execute(
    plan: &Plan,
    binding: &Binding,
    table: &mut TableData,
    is_json_family: bool,
    records: &mut Vec<Record>,
    result: &mut ProcessResult,
) -> Result<Vec<bool>, ProcessError> {
    table.pad_rows();
    let mut validity = Vec::with_capacity(table.rows.len());

    for (row_idx, row) in table.rows.iter_mut().enumerate() {
        let row_number = row_idx + 1;
        let mut row_valid = true;
        let mut values = Vec::with_capacity(plan.fields.len());

        for (field_idx, field) in plan.fields.iter().enumerate() {
            let column_index = binding.get(field_idx);
            let original = match column_index.index() {
                Some(i) => row[i].clone(),
                None => String::new(),
            };

            let was_non_empty = !original.is_empty();
            let mut current = original;
            for prep in &field.preprocessors {
                current = prep.apply(&current).into_owned();
            }

            if let ColumnIndex::Bound(i) = column_index {
                row[i] = current.clone();
            }

            if is_json_family && field.column_name == SYNTHETIC_JSON_COLUMN {
                if !current.is_empty() {
                    if let Err(source) = serde_json::from_str::<serde_json::Value>(&current) {
                        return Err(ProcessError::InvalidJsonAfterPrep {
                            line: row_number,
                            source,
                        });
                    }
                }
                if current.is_empty() && was_non_empty {
                    result.push_error(CellError::Prep {
                        row: row_number,
                        column: field.column_name.clone(),
                        field: field.name.clone(),
                        tag: "empty_json_data".to_string(),
                        message: "preprocessing emptied a non-empty JSON value".to_string(),
                    });
                    row_valid = false;
                }
            }

            for validator in &field.validators {
                if let Some((tag, message)) = validator.check(&current) {
                    result.push_error(CellError::Validation {
                        row: row_number,
                        column: field.column_name.clone(),
                        field: field.name.clone(),
                        value: current.clone(),
                        tag: tag.to_string(),
                        message,
                    });
                    row_valid = false;
                }
            }

            match field.kind.parse(&current) {
                Some(typed) => values.push(typed),
                None => {
                    result.push_error(CellError::Prep {
                        row: row_number,
                        column: field.column_name.clone(),
                        field: field.name.clone(),
                        tag: "type_conversion".to_string(),
                        message: format!("could not convert '{current}' to the declared type"),
                    });
                    row_valid = false;
                    values.push(crate::value::TypedValue::Empty);
                }
            }
        }

        for (field_idx, field) in plan.fields.iter().enumerate() {
            if field.cross_field.is_empty() {
                continue;
            }
            let own_value = match binding.get(field_idx).index() {
                Some(i) => row[i].as_str(),
                None => "",
            };
            for rule in &field.cross_field {
                let target_index = plan.field_index(&rule.target_field);
                let target_value = target_index
                    .and_then(|ti| binding.get(ti).index())
                    .and_then(|ci| row.get(ci));

                match target_value {
                    None => {
                        result.push_error(CellError::Validation {
                            row: row_number,
                            column: field.column_name.clone(),
                            field: field.name.clone(),
                            value: own_value.to_string(),
                            tag: rule.tag().to_string(),
                            message: format!(
                                "target field '{}' could not be resolved",
                                rule.target_field
                            ),
                        });
                        row_valid = false;
                    }
                    Some(target) => {
                        if let Some(message) = rule.check(own_value, target) {
                            result.push_error(CellError::Validation {
                                row: row_number,
                                column: field.column_name.clone(),
                                field: field.name.clone(),
                                value: own_value.to_string(),
                                tag: rule.tag().to_string(),
                                message,
                            });
                            row_valid = false;
                        }
                    }
                }
            }
        }

        records.push(Record::new(values));
        validity.push(row_valid);
    }

    result.row_count = table.rows.len();
    result.valid_row_count = validity.iter().filter(|v| **v).count();
    Ok(validity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binder::bind;
    use crate::schema::{CompileMode, FieldSpec, RecordSchema, compile};
    use crate::value::FieldKind;

    fn build_plan() -> Plan {
        let schema = RecordSchema::new()
            .field(FieldSpec::new("Name", FieldKind::String).prep("trim").validate("required"))
            .field(
                FieldSpec::new("Email", FieldKind::String)
                    .prep("trim,lowercase")
                    .validate("required"),
            )
            .field(FieldSpec::new("Age", FieldKind::Int { signed: true, bits: 32 }));
        compile(&schema, CompileMode::Lenient).unwrap()
    }

    #[test]
    fn basic_prep_and_validate_scenario() {
        let plan = build_plan();
        let mut table = TableData {
            headers: vec!["name".into(), "email".into(), "age".into()],
            rows: vec![
                vec!["  John Doe  ".into(), "JOHN@EXAMPLE.COM".into(), "30".into()],
                vec!["Jane Smith".into(), "jane@example.com".into(), "25".into()],
            ],
        };
        let binding = bind(&plan, &table.headers);
        let mut records = Vec::new();
        let mut result = ProcessResult::new(table.headers.clone(), "csv");
        let validity = execute(&plan, &binding, &mut table, false, &mut records, &mut result).unwrap();

        assert_eq!(validity, vec![true, true]);
        assert_eq!(table.rows[0][0], "John Doe");
        assert_eq!(table.rows[0][1], "john@example.com");
        assert_eq!(result.row_count, 2);
        assert_eq!(result.valid_row_count, 2);
        assert!(!result.has_errors());
    }

    #[test]
    fn required_on_empty_records_one_error() {
        let plan = build_plan();
        let mut table = TableData {
            headers: vec!["name".into(), "email".into(), "age".into()],
            rows: vec![
                vec!["".into(), "john@example.com".into(), "30".into()],
                vec!["Jane".into(), "jane@example.com".into(), "25".into()],
            ],
        };
        let binding = bind(&plan, &table.headers);
        let mut records = Vec::new();
        let mut result = ProcessResult::new(table.headers.clone(), "csv");
        let validity = execute(&plan, &binding, &mut table, false, &mut records, &mut result).unwrap();

        assert_eq!(validity, vec![false, true]);
        assert_eq!(result.valid_row_count, 1);
        assert_eq!(result.errors().len(), 1);
        match &result.errors()[0] {
            CellError::Validation { row, column, message, .. } => {
                assert_eq!(*row, 1);
                assert_eq!(column, "name");
                assert_eq!(message, "value is required");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn cross_field_equality_scenario() {
        let schema = RecordSchema::new()
            .field(FieldSpec::new("Username", FieldKind::String).prep("trim,lowercase"))
            .field(FieldSpec::new("Password", FieldKind::String))
            .field(FieldSpec::new("ConfirmPassword", FieldKind::String).validate("eqfield=Password"));
        let plan = compile(&schema, CompileMode::Lenient).unwrap();
        let mut table = TableData {
            headers: vec!["username".into(), "password".into(), "confirm_password".into()],
            rows: vec![
                vec!["  Alice  ".into(), "secret123".into(), "secret123".into()],
                vec!["Bob".into(), "password1".into(), "wrongpass".into()],
            ],
        };
        let binding = bind(&plan, &table.headers);
        let mut records = Vec::new();
        let mut result = ProcessResult::new(table.headers.clone(), "csv");
        let validity = execute(&plan, &binding, &mut table, false, &mut records, &mut result).unwrap();

        assert_eq!(validity, vec![true, false]);
        assert_eq!(result.errors().len(), 1);
        match &result.errors()[0] {
            CellError::Validation { row, field, message, .. } => {
                assert_eq!(*row, 2);
                assert_eq!(field, "ConfirmPassword");
                assert_eq!(message, "value must equal field Password");
            }
            other => panic!("unexpected error variant: {other:?}"),
        }
    }

    #[test]
    fn pad_and_coerce_scenario() {
        let schema = RecordSchema::new()
            .field(
                FieldSpec::new("Id", FieldKind::String)
                    .prep("trim,pad_left=6:0")
                    .validate("required,numeric,len=6"),
            )
            .field(FieldSpec::new("Name", FieldKind::String));
        let plan = compile(&schema, CompileMode::Lenient).unwrap();
        let mut table = TableData {
            headers: vec!["id".into(), "name".into()],
            rows: vec![vec!["42".into(), "X".into()], vec!["7".into(), "Y".into()]],
        };
        let binding = bind(&plan, &table.headers);
        let mut records = Vec::new();
        let mut result = ProcessResult::new(table.headers.clone(), "csv");
        let validity = execute(&plan, &binding, &mut table, false, &mut records, &mut result).unwrap();

        assert_eq!(validity, vec![true, true]);
        assert_eq!(table.rows[0][0], "000042");
        assert_eq!(table.rows[1][0], "000007");
    }

    #[test]
    fn short_rows_are_padded_and_required_fires() {
        let plan = build_plan();
        let mut table = TableData {
            headers: vec!["name".into(), "email".into(), "age".into()],
            rows: vec![vec!["Jane".into()]],
        };
        let binding = bind(&plan, &table.headers);
        let mut records = Vec::new();
        let mut result = ProcessResult::new(table.headers.clone(), "csv");
        let validity = execute(&plan, &binding, &mut table, false, &mut records, &mut result).unwrap();
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(validity, vec![false]);
    }
}
