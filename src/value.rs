//! Typed record values and the field kinds that parse them.
//!
//! Field kinds are widened to a handful of storage shapes (`I64`, `U64`,
//! `F64`) with the declared bit width enforced as a checked range test at
//! parse time, rather than a distinct enum variant per integer width.

use std::fmt;

/// The declared shape of a field, used to parse the post-preprocessing
/// cell string into a `TypedValue` at the end of pass 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Int { signed: bool, bits: u8 },
    Float { bits: u8 },
    Bool,
}

impl FieldKind {
    /// Parses a cell's post-preprocessing string into a `TypedValue`.
    ///
    /// Empty input yields the kind's zero value per §4.3 step 2e
    /// (`empty -> zero/false/""`). A non-empty value that fails to parse
    /// returns `None`; the caller records a `type_conversion` `Prep` error
    /// and the typed value falls back to the zero value as well, so the
    /// record collection always has a well-formed shape.
    pub fn parse(self, raw: &str) -> Option<TypedValue> {
        if raw.is_empty() {
            return Some(self.zero());
        }
        match self {
            FieldKind::String => Some(TypedValue::Str(raw.to_string())),
            FieldKind::Bool => raw.parse::<bool>().ok().map(TypedValue::Bool),
            FieldKind::Int { signed: true, bits } => {
                let parsed: i64 = raw.parse().ok()?;
                in_signed_range(parsed, bits).then_some(TypedValue::I64(parsed))
            }
            FieldKind::Int {
                signed: false,
                bits,
            } => {
                let parsed: u64 = raw.parse().ok()?;
                in_unsigned_range(parsed, bits).then_some(TypedValue::U64(parsed))
            }
            FieldKind::Float { .. } => raw.parse::<f64>().ok().map(TypedValue::F64),
        }
    }

    fn zero(self) -> TypedValue {
        match self {
            FieldKind::String => TypedValue::Str(String::new()),
            FieldKind::Bool => TypedValue::Bool(false),
            FieldKind::Int { signed: true, .. } => TypedValue::I64(0),
            FieldKind::Int { signed: false, .. } => TypedValue::U64(0),
            FieldKind::Float { .. } => TypedValue::F64(0.0),
        }
    }
}

fn in_signed_range(value: i64, bits: u8) -> bool {
    match bits {
        8 => i8::try_from(value).is_ok(),
        16 => i16::try_from(value).is_ok(),
        32 => i32::try_from(value).is_ok(),
        _ => true,
    }
}

fn in_unsigned_range(value: u64, bits: u8) -> bool {
    match bits {
        8 => u8::try_from(value).is_ok(),
        16 => u16::try_from(value).is_ok(),
        32 => u32::try_from(value).is_ok(),
        _ => true,
    }
}

/// A single record field's converted value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypedValue {
    Str(String),
    I64(i64),
    U64(u64),
    F64(f64),
    Bool(bool),
    Empty,
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedValue::Str(s) => write!(f, "{s}"),
            TypedValue::I64(v) => write!(f, "{v}"),
            TypedValue::U64(v) => write!(f, "{v}"),
            TypedValue::F64(v) => write!(f, "{v}"),
            TypedValue::Bool(v) => write!(f, "{v}"),
            TypedValue::Empty => Ok(()),
        }
    }
}

/// An ordered collection of typed field values, index-aligned with the
/// compiled `Plan`'s field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Vec<TypedValue>,
}

impl Record {
    pub fn new(values: Vec<TypedValue>) -> Self {
        Self { values }
    }

    pub fn get(&self, index: usize) -> Option<&TypedValue> {
        self.values.get(index)
    }

    pub fn values(&self) -> &[TypedValue] {
        &self.values
    }
}
