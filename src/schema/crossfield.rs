//! The cross-field rule registry: validators whose decision depends on a
//! second field in the same row.
//!
//! Rules store only the target field's **name**, never an index or
//! descriptor pointer, and are resolved against the bound column map at
//! execution time — see the design notes on avoiding cyclic references.

#[derive(Debug, Clone, PartialEq)]
pub enum CrossFieldKind {
    EqField,
    NeField,
    GtField,
    GteField,
    LtField,
    LteField,
    FieldContains,
    FieldExcludes,
    RequiredIf(String),
    RequiredUnless(String),
    RequiredWith,
    RequiredWithout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CrossFieldRule {
    pub kind: CrossFieldKind,
    pub target_field: String,
}

impl CrossFieldRule {
    pub fn tag(&self) -> &'static str {
        match self.kind {
            CrossFieldKind::EqField => "eqfield",
            CrossFieldKind::NeField => "nefield",
            CrossFieldKind::GtField => "gtfield",
            CrossFieldKind::GteField => "gtefield",
            CrossFieldKind::LtField => "ltfield",
            CrossFieldKind::LteField => "ltefield",
            CrossFieldKind::FieldContains => "fieldcontains",
            CrossFieldKind::FieldExcludes => "fieldexcludes",
            CrossFieldKind::RequiredIf(_) => "required_if",
            CrossFieldKind::RequiredUnless(_) => "required_unless",
            CrossFieldKind::RequiredWith => "required_with",
            CrossFieldKind::RequiredWithout => "required_without",
        }
    }

    /// Evaluates the rule given this row's own value and the target
    /// field's value, returning a failure message on violation.
    pub fn check(&self, own_value: &str, target_value: &str) -> Option<String> {
        match &self.kind {
            CrossFieldKind::EqField => (own_value != target_value)
                .then(|| format!("value must equal field {}", self.target_field)),
            CrossFieldKind::NeField => (own_value == target_value)
                .then(|| format!("value must not equal field {}", self.target_field)),
            CrossFieldKind::GtField => (!numeric_compare(own_value, target_value, |a, b| a > b))
                .then(|| format!("value must be greater than field {}", self.target_field)),
            CrossFieldKind::GteField => (!numeric_compare(own_value, target_value, |a, b| a >= b))
                .then(|| format!("value must be greater than or equal to field {}", self.target_field)),
            CrossFieldKind::LtField => (!numeric_compare(own_value, target_value, |a, b| a < b))
                .then(|| format!("value must be less than field {}", self.target_field)),
            CrossFieldKind::LteField => (!numeric_compare(own_value, target_value, |a, b| a <= b))
                .then(|| format!("value must be less than or equal to field {}", self.target_field)),
            CrossFieldKind::FieldContains => (!own_value.contains(target_value))
                .then(|| format!("value must contain field {}", self.target_field)),
            CrossFieldKind::FieldExcludes => own_value
                .contains(target_value)
                .then(|| format!("value must not contain field {}", self.target_field)),
            CrossFieldKind::RequiredIf(expected) => (target_value == expected && own_value.is_empty())
                .then(|| format!("value is required when {} is {}", self.target_field, expected)),
            CrossFieldKind::RequiredUnless(expected) => {
                (target_value != expected && own_value.is_empty()).then(|| {
                    format!("value is required unless {} is {}", self.target_field, expected)
                })
            }
            CrossFieldKind::RequiredWith => (!target_value.is_empty() && own_value.is_empty())
                .then(|| format!("value is required when {} is present", self.target_field)),
            CrossFieldKind::RequiredWithout => (target_value.is_empty() && own_value.is_empty())
                .then(|| format!("value is required when {} is absent", self.target_field)),
        }
    }
}

/// Parses both operands as floating point; falls back to lexicographic
/// comparison if either parse fails, per §4.1's cross-field ordering rule.
fn numeric_compare(a: &str, b: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (a.parse::<f64>(), b.parse::<f64>()) {
        (Ok(x), Ok(y)) => cmp(x, y),
        _ => match a.cmp(b) {
            std::cmp::Ordering::Less => cmp(0.0, 1.0),
            std::cmp::Ordering::Greater => cmp(1.0, 0.0),
            std::cmp::Ordering::Equal => cmp(0.0, 0.0),
        },
    }
}

/// Resolves one `(tag, arg)` token into a `CrossFieldRule`, or `None` if
/// the tag name doesn't belong to the cross-field registry at all (the
/// caller then tries the single-field validator registry instead).
///
/// Returns `Some(None)` for a recognized tag with a malformed argument
/// (mode-dependent elision, matching the single-field registries), and
/// `Some(Some(rule))` on success.
pub fn build(name: &str, arg: Option<&str>) -> Option<Option<CrossFieldRule>> {
    let simple_kind = match name {
        "eqfield" => Some(CrossFieldKind::EqField),
        "nefield" => Some(CrossFieldKind::NeField),
        "gtfield" => Some(CrossFieldKind::GtField),
        "gtefield" => Some(CrossFieldKind::GteField),
        "ltfield" => Some(CrossFieldKind::LtField),
        "ltefield" => Some(CrossFieldKind::LteField),
        "fieldcontains" => Some(CrossFieldKind::FieldContains),
        "fieldexcludes" => Some(CrossFieldKind::FieldExcludes),
        "required_with" => Some(CrossFieldKind::RequiredWith),
        "required_without" => Some(CrossFieldKind::RequiredWithout),
        _ => None,
    };

    if let Some(kind) = simple_kind {
        return Some(arg.filter(|a| !a.is_empty()).map(|field| CrossFieldRule {
            kind,
            target_field: field.to_string(),
        }));
    }

    match name {
        "required_if" | "required_unless" => {
            let built = arg.and_then(|a| {
                let (field, value) = a.split_once(' ')?;
                if field.is_empty() || value.is_empty() {
                    return None;
                }
                let kind = if name == "required_if" {
                    CrossFieldKind::RequiredIf(value.to_string())
                } else {
                    CrossFieldKind::RequiredUnless(value.to_string())
                };
                Some(CrossFieldRule {
                    kind,
                    target_field: field.to_string(),
                })
            });
            Some(built)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eqfield_reports_contract_message() {
        let rule = CrossFieldRule {
            kind: CrossFieldKind::EqField,
            target_field: "Password".to_string(),
        };
        assert_eq!(
            rule.check("wrongpass", "password1"),
            Some("value must equal field Password".to_string())
        );
        assert_eq!(rule.check("secret123", "secret123"), None);
    }

    #[test]
    fn required_if_parses_field_and_literal() {
        let rule = build("required_if", Some("Country US")).unwrap().unwrap();
        assert_eq!(rule.check("", "US"), Some("value is required when Country is US".to_string()));
        assert_eq!(rule.check("", "CA"), None);
    }

    #[test]
    fn unknown_tag_is_not_recognized_as_cross_field() {
        assert_eq!(build("required", None), None);
    }

    #[test]
    fn falls_back_to_lexicographic_when_non_numeric() {
        let rule = CrossFieldRule {
            kind: CrossFieldKind::GtField,
            target_field: "Other".to_string(),
        };
        assert_eq!(rule.check("banana", "apple"), None);
        assert!(rule.check("apple", "banana").is_some());
    }
}
