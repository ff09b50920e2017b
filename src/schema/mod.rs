//! Schema Compiler: turns declarative attribute strings into an executable
//! [`Plan`].
//!
//! A [`RecordSchema`] is assembled via the [`FieldSpec`] builder (this
//! implementation has no compile-time derive facility, per the builder
//! fallback named in the design notes) and compiled once, at
//! [`crate::Processor`] construction, into an immutable `Plan` reused across
//! every row of every subsequent `process` call.

pub mod crossfield;
pub mod preprocess;
pub mod validate;

use crate::error::ProcessError;
use crate::naming;
use crate::value::FieldKind;

use crossfield::CrossFieldRule;
use preprocess::Preprocessor;
use validate::Validator;

/// Declares one field of a record type.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub(crate) name: String,
    pub(crate) column: Option<String>,
    pub(crate) kind: FieldKind,
    pub(crate) prep: String,
    pub(crate) validate: String,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            column: None,
            kind,
            prep: String::new(),
            validate: String::new(),
        }
    }

    /// Overrides the default snake_case column name.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.column = Some(name.into());
        self
    }

    pub fn prep(mut self, chain: impl Into<String>) -> Self {
        self.prep = chain.into();
        self
    }

    pub fn validate(mut self, chain: impl Into<String>) -> Self {
        self.validate = chain.into();
        self
    }

    fn resolved_column(&self) -> String {
        self.column
            .clone()
            .unwrap_or_else(|| naming::snake_case(&self.name))
    }
}

/// A record type descriptor: an ordered list of field declarations.
#[derive(Debug, Clone, Default)]
pub struct RecordSchema {
    fields: Vec<FieldSpec>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.fields.push(spec);
        self
    }

    /// A schema with a single synthetic `data` string column, for
    /// JSON/JSONL input per §2 component 1.
    pub fn json_data_column(prep: impl Into<String>, validate: impl Into<String>) -> Self {
        Self::new().field(
            FieldSpec::new("Data", FieldKind::String)
                .column("data")
                .prep(prep)
                .validate(validate),
        )
    }
}

/// Whether malformed attribute arguments are silently elided or rejected
/// at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompileMode {
    #[default]
    Lenient,
    Strict,
}

/// One compiled field: everything the Row Executor needs, in declaration
/// order, with chains already resolved from their attribute strings.
#[derive(Debug, Clone)]
pub struct FieldPlan {
    pub name: String,
    pub column_name: String,
    pub kind: FieldKind,
    pub preprocessors: Vec<Preprocessor>,
    pub validators: Vec<Validator>,
    pub cross_field: Vec<CrossFieldRule>,
}

/// The immutable, compiled representation of a `RecordSchema`. Shared
/// read-only across every row of a `process` call, and safe to share
/// across threads for distinct calls.
#[derive(Debug, Clone)]
pub struct Plan {
    pub fields: Vec<FieldPlan>,
}

impl Plan {
    pub fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

/// Splits a comma-separated attribute chain into trimmed, non-empty
/// tokens, preserving declaration order.
fn split_chain(chain: &str) -> Vec<&str> {
    chain
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect()
}

/// Splits a single token into its tag name and optional argument,
/// separating on the first `=`.
fn split_token(token: &str) -> (&str, Option<&str>) {
    match token.split_once('=') {
        Some((name, arg)) => (name, Some(arg)),
        None => (token, None),
    }
}

/// Compiles a [`RecordSchema`] into a [`Plan`].
pub fn compile(schema: &RecordSchema, mode: CompileMode) -> Result<Plan, ProcessError> {
    let mut seen = std::collections::HashSet::new();
    let mut fields = Vec::with_capacity(schema.fields.len());

    for spec in &schema.fields {
        if !seen.insert(spec.name.clone()) {
            return Err(ProcessError::DuplicateFieldName(spec.name.clone()));
        }

        let preprocessors = compile_prep_chain(&spec.name, &spec.prep, mode)?;
        let (validators, cross_field) = compile_validate_chain(&spec.name, &spec.validate, mode)?;

        fields.push(FieldPlan {
            name: spec.name.clone(),
            column_name: spec.resolved_column(),
            kind: spec.kind,
            preprocessors,
            validators,
            cross_field,
        });
    }

    log::debug!("compiled plan with {} field(s)", fields.len());
    Ok(Plan { fields })
}

fn compile_prep_chain(
    field: &str,
    chain: &str,
    mode: CompileMode,
) -> Result<Vec<Preprocessor>, ProcessError> {
    let mut out = Vec::new();
    for token in split_chain(chain) {
        let (name, arg) = split_token(token);
        match preprocess::build(name, arg) {
            None => {
                return Err(ProcessError::InvalidTagFormat {
                    field: field.to_string(),
                    tag: name.to_string(),
                });
            }
            Some(None) => {
                if mode == CompileMode::Strict {
                    return Err(ProcessError::InvalidTagFormat {
                        field: field.to_string(),
                        tag: token.to_string(),
                    });
                }
                log::warn!("eliding malformed prep token '{token}' on field '{field}'");
            }
            Some(Some(p)) => out.push(p),
        }
    }
    Ok(out)
}

fn compile_validate_chain(
    field: &str,
    chain: &str,
    mode: CompileMode,
) -> Result<(Vec<Validator>, Vec<CrossFieldRule>), ProcessError> {
    let mut validators = Vec::new();
    let mut cross_field = Vec::new();

    for token in split_chain(chain) {
        let (name, arg) = split_token(token);

        if let Some(outcome) = crossfield::build(name, arg) {
            match outcome {
                None => {
                    if mode == CompileMode::Strict {
                        return Err(ProcessError::InvalidTagFormat {
                            field: field.to_string(),
                            tag: token.to_string(),
                        });
                    }
                    log::warn!("eliding malformed cross-field token '{token}' on field '{field}'");
                }
                Some(rule) => cross_field.push(rule),
            }
            continue;
        }

        match validate::build(name, arg) {
            None => {
                return Err(ProcessError::InvalidTagFormat {
                    field: field.to_string(),
                    tag: name.to_string(),
                });
            }
            Some(None) => {
                if mode == CompileMode::Strict {
                    return Err(ProcessError::InvalidTagFormat {
                        field: field.to_string(),
                        tag: token.to_string(),
                    });
                }
                log::warn!("eliding malformed validator token '{token}' on field '{field}'");
            }
            Some(Some(v)) => validators.push(v),
        }
    }

    Ok((validators, cross_field))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_field() -> FieldSpec {
        FieldSpec::new("Name", FieldKind::String)
            .prep("trim")
            .validate("required")
    }

    #[test]
    fn compiles_a_simple_schema() {
        let schema = RecordSchema::new().field(name_field());
        let plan = compile(&schema, CompileMode::Lenient).unwrap();
        assert_eq!(plan.fields.len(), 1);
        assert_eq!(plan.fields[0].column_name, "name");
        assert_eq!(plan.fields[0].preprocessors.len(), 1);
        assert_eq!(plan.fields[0].validators.len(), 1);
    }

    #[test]
    fn unknown_tag_is_always_fatal() {
        let schema = RecordSchema::new().field(FieldSpec::new("X", FieldKind::String).prep("bogus"));
        let err = compile(&schema, CompileMode::Lenient).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidTagFormat { .. }));
    }

    #[test]
    fn lenient_mode_elides_malformed_token_preserving_others() {
        let schema = RecordSchema::new()
            .field(FieldSpec::new("X", FieldKind::String).prep("trim,truncate=0,lowercase"));
        let plan = compile(&schema, CompileMode::Lenient).unwrap();
        assert_eq!(plan.fields[0].preprocessors.len(), 2);
    }

    #[test]
    fn strict_mode_rejects_malformed_token() {
        let schema =
            RecordSchema::new().field(FieldSpec::new("X", FieldKind::String).prep("truncate=0"));
        let err = compile(&schema, CompileMode::Strict).unwrap_err();
        assert!(matches!(err, ProcessError::InvalidTagFormat { .. }));
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let schema = RecordSchema::new().field(name_field()).field(name_field());
        let err = compile(&schema, CompileMode::Lenient).unwrap_err();
        assert!(matches!(err, ProcessError::DuplicateFieldName(_)));
    }

    #[test]
    fn cross_field_tags_route_away_from_validator_chain() {
        let schema = RecordSchema::new().field(
            FieldSpec::new("ConfirmPassword", FieldKind::String).validate("required,eqfield=Password"),
        );
        let plan = compile(&schema, CompileMode::Lenient).unwrap();
        assert_eq!(plan.fields[0].validators.len(), 1);
        assert_eq!(plan.fields[0].cross_field.len(), 1);
    }

    #[test]
    fn chain_order_is_preserved_regardless_of_token_order() {
        let schema =
            RecordSchema::new().field(FieldSpec::new("X", FieldKind::String).prep("lowercase,trim"));
        let plan = compile(&schema, CompileMode::Lenient).unwrap();
        assert!(matches!(plan.fields[0].preprocessors[0], Preprocessor::Lowercase));
        assert!(matches!(plan.fields[0].preprocessors[1], Preprocessor::Trim));
    }
}
