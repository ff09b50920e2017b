//! The preprocessor registry: pure, deterministic `String -> String`
//! transforms referenced by a field's `prep` attribute chain.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoerceKind {
    Int,
    Float,
    Bool,
}

// PartialEq is implemented manually below because `Regex` (used by
// `RegexReplace`) does not implement it.
#[derive(Debug, Clone)]
pub enum Preprocessor {
    Trim,
    LTrim,
    RTrim,
    Lowercase,
    Uppercase,
    Default(String),
    Replace { old: String, new: String },
    Prefix(String),
    Suffix(String),
    Truncate(usize),
    StripHtml,
    StripNewline,
    CollapseSpace,
    RemoveDigits,
    RemoveAlpha,
    KeepDigits,
    KeepAlpha,
    TrimSet(String),
    PadLeft { width: usize, ch: char },
    PadRight { width: usize, ch: char },
    NormalizeUnicode,
    Nullify(String),
    Coerce(CoerceKind),
    FixScheme(String),
    RegexReplace { pattern: Regex, replacement: String },
}

impl PartialEq for Preprocessor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Preprocessor::Trim, Preprocessor::Trim) => true,
            (Preprocessor::LTrim, Preprocessor::LTrim) => true,
            (Preprocessor::RTrim, Preprocessor::RTrim) => true,
            (Preprocessor::Lowercase, Preprocessor::Lowercase) => true,
            (Preprocessor::Uppercase, Preprocessor::Uppercase) => true,
            (Preprocessor::Default(a), Preprocessor::Default(b)) => a == b,
            (
                Preprocessor::Replace { old: ao, new: an },
                Preprocessor::Replace { old: bo, new: bn },
            ) => ao == bo && an == bn,
            (Preprocessor::Prefix(a), Preprocessor::Prefix(b)) => a == b,
            (Preprocessor::Suffix(a), Preprocessor::Suffix(b)) => a == b,
            (Preprocessor::Truncate(a), Preprocessor::Truncate(b)) => a == b,
            (Preprocessor::StripHtml, Preprocessor::StripHtml) => true,
            (Preprocessor::StripNewline, Preprocessor::StripNewline) => true,
            (Preprocessor::CollapseSpace, Preprocessor::CollapseSpace) => true,
            (Preprocessor::RemoveDigits, Preprocessor::RemoveDigits) => true,
            (Preprocessor::RemoveAlpha, Preprocessor::RemoveAlpha) => true,
            (Preprocessor::KeepDigits, Preprocessor::KeepDigits) => true,
            (Preprocessor::KeepAlpha, Preprocessor::KeepAlpha) => true,
            (Preprocessor::TrimSet(a), Preprocessor::TrimSet(b)) => a == b,
            (
                Preprocessor::PadLeft { width: aw, ch: ac },
                Preprocessor::PadLeft { width: bw, ch: bc },
            ) => aw == bw && ac == bc,
            (
                Preprocessor::PadRight { width: aw, ch: ac },
                Preprocessor::PadRight { width: bw, ch: bc },
            ) => aw == bw && ac == bc,
            (Preprocessor::NormalizeUnicode, Preprocessor::NormalizeUnicode) => true,
            (Preprocessor::Nullify(a), Preprocessor::Nullify(b)) => a == b,
            (Preprocessor::Coerce(a), Preprocessor::Coerce(b)) => a == b,
            (Preprocessor::FixScheme(a), Preprocessor::FixScheme(b)) => a == b,
            (
                Preprocessor::RegexReplace {
                    pattern: ap,
                    replacement: ar,
                },
                Preprocessor::RegexReplace {
                    pattern: bp,
                    replacement: br,
                },
            ) => ap.as_str() == bp.as_str() && ar == br,
            _ => false,
        }
    }
}

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

impl Preprocessor {
    pub fn apply<'a>(&self, input: &'a str) -> Cow<'a, str> {
        match self {
            Preprocessor::Trim => cow_if_changed(input, input.trim()),
            Preprocessor::LTrim => cow_if_changed(input, input.trim_start()),
            Preprocessor::RTrim => cow_if_changed(input, input.trim_end()),
            Preprocessor::Lowercase => {
                if input.chars().all(|c| !c.is_uppercase()) {
                    Cow::Borrowed(input)
                } else {
                    Cow::Owned(input.to_lowercase())
                }
            }
            Preprocessor::Uppercase => {
                if input.chars().all(|c| !c.is_lowercase()) {
                    Cow::Borrowed(input)
                } else {
                    Cow::Owned(input.to_uppercase())
                }
            }
            Preprocessor::Default(value) => {
                if input.trim().is_empty() {
                    Cow::Owned(value.clone())
                } else {
                    Cow::Borrowed(input)
                }
            }
            Preprocessor::Replace { old, new } => {
                if old.is_empty() {
                    Cow::Owned(interleave(input, new))
                } else if input.contains(old.as_str()) {
                    Cow::Owned(input.replace(old.as_str(), new))
                } else {
                    Cow::Borrowed(input)
                }
            }
            Preprocessor::Prefix(value) => Cow::Owned(format!("{value}{input}")),
            Preprocessor::Suffix(value) => Cow::Owned(format!("{input}{value}")),
            Preprocessor::Truncate(n) => {
                let count = input.chars().count();
                if count <= *n {
                    Cow::Borrowed(input)
                } else {
                    Cow::Owned(input.chars().take(*n).collect())
                }
            }
            Preprocessor::StripHtml => {
                if HTML_TAG.is_match(input) {
                    Cow::Owned(HTML_TAG.replace_all(input, "").into_owned())
                } else {
                    Cow::Borrowed(input)
                }
            }
            Preprocessor::StripNewline => {
                if input.contains(['\n', '\r']) {
                    Cow::Owned(input.replace("\r\n", "").replace(['\n', '\r'], ""))
                } else {
                    Cow::Borrowed(input)
                }
            }
            Preprocessor::CollapseSpace => {
                if WHITESPACE_RUN.is_match(input) {
                    Cow::Owned(WHITESPACE_RUN.replace_all(input, " ").into_owned())
                } else {
                    Cow::Borrowed(input)
                }
            }
            Preprocessor::RemoveDigits => filter_chars(input, |c| !c.is_ascii_digit()),
            Preprocessor::RemoveAlpha => filter_chars(input, |c| !c.is_alphabetic()),
            Preprocessor::KeepDigits => filter_chars(input, |c| c.is_ascii_digit()),
            Preprocessor::KeepAlpha => filter_chars(input, |c| c.is_alphabetic()),
            Preprocessor::TrimSet(set) => {
                let trimmed = input.trim_matches(|c| set.contains(c));
                cow_if_changed(input, trimmed)
            }
            Preprocessor::PadLeft { width, ch } => pad(input, *width, *ch, true),
            Preprocessor::PadRight { width, ch } => pad(input, *width, *ch, false),
            Preprocessor::NormalizeUnicode => {
                let normalized: String = input.nfc().collect();
                if normalized == input {
                    Cow::Borrowed(input)
                } else {
                    Cow::Owned(normalized)
                }
            }
            Preprocessor::Nullify(value) => {
                if input == value {
                    Cow::Borrowed("")
                } else {
                    Cow::Borrowed(input)
                }
            }
            Preprocessor::Coerce(kind) => coerce(input, *kind),
            Preprocessor::FixScheme(scheme) => fix_scheme(input, scheme),
            Preprocessor::RegexReplace { pattern, replacement } => {
                if pattern.is_match(input) {
                    Cow::Owned(pattern.replace_all(input, replacement.as_str()).into_owned())
                } else {
                    Cow::Borrowed(input)
                }
            }
        }
    }
}

fn cow_if_changed<'a>(original: &'a str, candidate: &'a str) -> Cow<'a, str> {
    if candidate.len() == original.len() {
        Cow::Borrowed(original)
    } else {
        Cow::Borrowed(candidate)
    }
}

fn filter_chars<'a>(input: &'a str, keep: impl Fn(char) -> bool) -> Cow<'a, str> {
    if input.chars().all(&keep) {
        Cow::Borrowed(input)
    } else {
        Cow::Owned(input.chars().filter(|c| keep(*c)).collect())
    }
}

fn interleave(input: &str, insert: &str) -> String {
    let mut out = String::with_capacity(input.len() + insert.len() * (input.chars().count() + 1));
    out.push_str(insert);
    for ch in input.chars() {
        out.push(ch);
        out.push_str(insert);
    }
    out
}

fn pad(input: &str, width: usize, ch: char, left: bool) -> Cow<'_, str> {
    let count = input.chars().count();
    if count >= width {
        return Cow::Borrowed(input);
    }
    let fill: String = std::iter::repeat_n(ch, width - count).collect();
    if left {
        Cow::Owned(format!("{fill}{input}"))
    } else {
        Cow::Owned(format!("{input}{fill}"))
    }
}

fn coerce(input: &str, kind: CoerceKind) -> Cow<'_, str> {
    match kind {
        CoerceKind::Int => match input.parse::<f64>() {
            Ok(value) => Cow::Owned((value.trunc() as i64).to_string()),
            Err(_) => Cow::Borrowed(input),
        },
        CoerceKind::Float => match input.parse::<f64>() {
            Ok(value) => Cow::Owned(value.to_string()),
            Err(_) => Cow::Borrowed(input),
        },
        CoerceKind::Bool => {
            let lower = input.to_ascii_lowercase();
            match lower.as_str() {
                "true" | "1" | "yes" | "on" => Cow::Borrowed("true"),
                "false" | "0" | "no" | "off" => Cow::Borrowed("false"),
                _ => Cow::Borrowed(input),
            }
        }
    }
}

fn fix_scheme<'a>(input: &'a str, scheme: &str) -> Cow<'a, str> {
    match input.find("://") {
        None => Cow::Owned(format!("{scheme}://{input}")),
        Some(idx) => {
            if &input[..idx] == scheme {
                Cow::Borrowed(input)
            } else {
                Cow::Owned(format!("{scheme}{}", &input[idx..]))
            }
        }
    }
}

/// Resolves one `(tag, arg)` token into a `Preprocessor`.
///
/// Returns `None` if the tag name itself is unrecognized (always fatal at
/// compile time). Returns `Some(None)` if the tag is known but the
/// argument is malformed or semantically empty (mode-dependent: elided in
/// lenient mode, fatal in strict mode). Returns `Some(Some(p))` on success.
pub fn build(name: &str, arg: Option<&str>) -> Option<Option<Preprocessor>> {
    let built = match name {
        "trim" => Some(Preprocessor::Trim),
        "ltrim" => Some(Preprocessor::LTrim),
        "rtrim" => Some(Preprocessor::RTrim),
        "lowercase" => Some(Preprocessor::Lowercase),
        "uppercase" => Some(Preprocessor::Uppercase),
        "strip_html" => Some(Preprocessor::StripHtml),
        "strip_newline" => Some(Preprocessor::StripNewline),
        "collapse_space" => Some(Preprocessor::CollapseSpace),
        "remove_digits" => Some(Preprocessor::RemoveDigits),
        "remove_alpha" => Some(Preprocessor::RemoveAlpha),
        "keep_digits" => Some(Preprocessor::KeepDigits),
        "keep_alpha" => Some(Preprocessor::KeepAlpha),
        "normalize_unicode" => Some(Preprocessor::NormalizeUnicode),

        "default" => non_empty(arg).map(|v| Preprocessor::Default(v.to_string())),
        "prefix" => non_empty(arg).map(|v| Preprocessor::Prefix(v.to_string())),
        "suffix" => non_empty(arg).map(|v| Preprocessor::Suffix(v.to_string())),
        "nullify" => non_empty(arg).map(|v| Preprocessor::Nullify(v.to_string())),
        "trim_set" => non_empty(arg).map(|v| Preprocessor::TrimSet(v.to_string())),
        "fix_scheme" => non_empty(arg).map(|v| Preprocessor::FixScheme(v.to_string())),

        "truncate" => arg
            .and_then(|a| a.parse::<usize>().ok())
            .filter(|n| *n > 0)
            .map(Preprocessor::Truncate),

        "replace" => arg.and_then(|a| {
            let (old, new) = a.split_once(':')?;
            Some(Preprocessor::Replace {
                old: old.to_string(),
                new: new.to_string(),
            })
        }),

        "pad_left" => arg.and_then(parse_pad).map(|(width, ch)| Preprocessor::PadLeft { width, ch }),
        "pad_right" => arg
            .and_then(parse_pad)
            .map(|(width, ch)| Preprocessor::PadRight { width, ch }),

        "coerce" => arg.and_then(|a| match a {
            "int" => Some(Preprocessor::Coerce(CoerceKind::Int)),
            "float" => Some(Preprocessor::Coerce(CoerceKind::Float)),
            "bool" => Some(Preprocessor::Coerce(CoerceKind::Bool)),
            _ => None,
        }),

        "regex_replace" => arg.and_then(|a| {
            let (pattern, replacement) = a.split_once(':')?;
            let compiled = Regex::new(pattern).ok()?;
            Some(Preprocessor::RegexReplace {
                pattern: compiled,
                replacement: replacement.to_string(),
            })
        }),

        _ => return None,
    };
    Some(built)
}

fn non_empty(arg: Option<&str>) -> Option<&str> {
    arg.filter(|v| !v.is_empty())
}

fn parse_pad(arg: &str) -> Option<(usize, char)> {
    match arg.split_once(':') {
        Some((n, c)) => {
            let width: usize = n.parse().ok()?;
            let ch = c.chars().next().unwrap_or(' ');
            Some((width, ch))
        }
        None => {
            let width: usize = arg.parse().ok()?;
            Some((width, ' '))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn trim_is_idempotent() {
        let p = Preprocessor::Trim;
        let once = p.apply("  hi  ");
        let twice = p.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "hi");
    }

    #[test]
    fn collapse_space_is_idempotent() {
        let p = Preprocessor::CollapseSpace;
        let once = p.apply("a   b\t\tc");
        let twice = p.apply(&once);
        assert_eq!(once, twice);
        assert_eq!(once, "a b c");
    }

    #[test]
    fn lowercase_is_idempotent() {
        let p = Preprocessor::Lowercase;
        assert_eq!(p.apply("ABC"), "abc");
        assert_eq!(p.apply(&p.apply("ABC")), "abc");
    }

    #[test]
    fn pad_left_identity_when_long_enough() {
        let p = Preprocessor::PadLeft { width: 3, ch: '0' };
        assert_eq!(p.apply("42"), "042");
        assert_eq!(p.apply("12345"), "12345");
    }

    #[test]
    fn pad_left_default_arg_grammar() {
        assert!(matches!(
            build("pad_left", Some("6:0")),
            Some(Some(Preprocessor::PadLeft { width: 6, ch: '0' }))
        ));
        assert!(matches!(
            build("pad_left", Some("6")),
            Some(Some(Preprocessor::PadLeft { width: 6, ch: ' ' }))
        ));
    }

    #[test]
    fn replace_without_colon_is_malformed() {
        assert_eq!(build("replace", Some("X")), Some(None));
    }

    #[test]
    fn replace_with_empty_old_interleaves() {
        if let Some(Some(Preprocessor::Replace { old, new })) = build("replace", Some(":-")) {
            assert_eq!(old, "");
            assert_eq!(new, "-");
        } else {
            panic!("expected a Replace preprocessor");
        }
    }

    #[test]
    fn truncate_zero_is_malformed() {
        assert_eq!(build("truncate", Some("0")), Some(None));
    }

    #[test]
    fn unknown_tag_returns_none() {
        assert_eq!(build("not_a_real_tag", None), None);
    }

    #[test]
    fn empty_value_tokens_elide() {
        assert_eq!(build("prefix", Some("")), Some(None));
        assert_eq!(build("nullify", Some("")), Some(None));
    }

    #[test]
    fn fix_scheme_identity_when_scheme_matches() {
        let p = Preprocessor::FixScheme("https".to_string());
        assert_eq!(p.apply("https://example.com"), "https://example.com");
        assert_eq!(p.apply("example.com"), "https://example.com");
        assert_eq!(p.apply("http://example.com"), "https://example.com");
    }

    #[test]
    fn coerce_bool_recognizes_both_spellings() {
        assert_eq!(coerce("Yes", CoerceKind::Bool), "true");
        assert_eq!(coerce("OFF", CoerceKind::Bool), "false");
        assert_eq!(coerce("sideways", CoerceKind::Bool), "sideways");
    }

    proptest! {
        #[test]
        fn trim_is_idempotent_prop(input in ".{0,32}") {
            let p = Preprocessor::Trim;
            let once = p.apply(&input).into_owned();
            let twice = p.apply(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn collapse_space_is_idempotent_prop(input in "[ \\t]{0,3}[a-z]{0,4}[ \\t]{0,3}[a-z]{0,4}[ \\t]{0,3}") {
            let p = Preprocessor::CollapseSpace;
            let once = p.apply(&input).into_owned();
            let twice = p.apply(&once).into_owned();
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn lowercase_is_idempotent_prop(input in "[A-Za-z]{0,16}") {
            let p = Preprocessor::Lowercase;
            let once = p.apply(&input).into_owned();
            let twice = p.apply(&once).into_owned();
            prop_assert_eq!(once, twice);
        }
    }
}
