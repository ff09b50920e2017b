//! Column Binder: resolves a compiled [`crate::schema::Plan`]'s fields
//! against a concrete header list.
//!
//! Binding is recomputed per `process` call (headers vary per input) and
//! never mutates the Plan, which stays immutable and shareable across
//! threads per the concurrency model.

use crate::schema::Plan;

/// A field's resolved position in the current row, or the sentinel for a
/// declared column name with no matching header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnIndex {
    Bound(usize),
    Absent,
}

impl ColumnIndex {
    pub fn index(self) -> Option<usize> {
        match self {
            ColumnIndex::Bound(i) => Some(i),
            ColumnIndex::Absent => None,
        }
    }
}

/// The field-order-aligned binding produced for one set of headers.
#[derive(Debug, Clone)]
pub struct Binding {
    indices: Vec<ColumnIndex>,
}

impl Binding {
    pub fn get(&self, field_index: usize) -> ColumnIndex {
        self.indices[field_index]
    }
}

/// Matching is exact and case-sensitive; for duplicate headers the first
/// occurrence wins.
pub fn bind(plan: &Plan, headers: &[String]) -> Binding {
    let indices = plan
        .fields
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| h == &field.column_name)
                .map(ColumnIndex::Bound)
                .unwrap_or(ColumnIndex::Absent)
        })
        .collect();
    Binding { indices }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{CompileMode, FieldSpec, RecordSchema, compile};
    use crate::value::FieldKind;

    fn plan() -> Plan {
        let schema = RecordSchema::new()
            .field(FieldSpec::new("Name", FieldKind::String))
            .field(FieldSpec::new("Email", FieldKind::String));
        compile(&schema, CompileMode::Lenient).unwrap()
    }

    #[test]
    fn binds_exact_case_sensitive_matches() {
        let headers = vec!["name".to_string(), "email".to_string()];
        let binding = bind(&plan(), &headers);
        assert_eq!(binding.get(0), ColumnIndex::Bound(0));
        assert_eq!(binding.get(1), ColumnIndex::Bound(1));
    }

    #[test]
    fn unmatched_field_is_absent() {
        let headers = vec!["Name".to_string()];
        let binding = bind(&plan(), &headers);
        assert_eq!(binding.get(0), ColumnIndex::Absent);
    }

    #[test]
    fn duplicate_headers_first_occurrence_wins() {
        let headers = vec!["name".to_string(), "email".to_string(), "name".to_string()];
        let binding = bind(&plan(), &headers);
        assert_eq!(binding.get(0), ColumnIndex::Bound(0));
    }

    #[test]
    fn binding_is_independent_of_field_declaration_order() {
        let schema_a = RecordSchema::new()
            .field(FieldSpec::new("Name", FieldKind::String))
            .field(FieldSpec::new("Email", FieldKind::String));
        let schema_b = RecordSchema::new()
            .field(FieldSpec::new("Email", FieldKind::String))
            .field(FieldSpec::new("Name", FieldKind::String));
        let headers = vec!["name".to_string(), "email".to_string()];
        let plan_a = compile(&schema_a, CompileMode::Lenient).unwrap();
        let plan_b = compile(&schema_b, CompileMode::Lenient).unwrap();
        let binding_a = bind(&plan_a, &headers);
        let binding_b = bind(&plan_b, &headers);
        assert_eq!(binding_a.get(0), ColumnIndex::Bound(0));
        assert_eq!(binding_b.get(1), ColumnIndex::Bound(0));
    }
}
