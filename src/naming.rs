//! Default field-name-to-column-name derivation.
//!
//! Converts a record field's identifier into its default column name by
//! inserting `_` at case boundaries and lowercasing the result. Explicit
//! column name overrides on a `FieldSpec` bypass this entirely.

/// Converts an identifier to `snake_case`.
///
/// Boundary rule: insert `_` before `chars[i]` when `chars[i]` is uppercase
/// and either the previous character is lowercase-or-digit, or the previous
/// character is uppercase and a following character exists and is
/// lowercase (splits a trailing word off a run of acronym letters, e.g.
/// `HTTPServer` -> `http_server`).
pub fn snake_case(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (idx, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() && idx > 0 {
            let prev = chars[idx - 1];
            let prev_is_lower_or_digit = prev.is_lowercase() || prev.is_ascii_digit();
            let prev_is_upper_then_lower_follows = prev.is_uppercase()
                && chars
                    .get(idx + 1)
                    .is_some_and(|next| next.is_lowercase());
            if prev_is_lower_or_digit || prev_is_upper_then_lower_follows {
                out.push('_');
            }
        }
        out.push(ch);
    }

    out.to_lowercase()
}
