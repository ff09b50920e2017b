//! The single-field validator registry: pure predicates-with-message
//! referenced by a field's `validate` attribute chain.
//!
//! Cross-field tags are recognized and routed away by
//! [`crate::schema::crossfield`] before a token ever reaches [`build`].

use std::net::IpAddr;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

macro_rules! regexes {
    ($($name:ident => $pattern:literal),+ $(,)?) => {
        $(static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($pattern).unwrap());)+
    };
}

regexes! {
    EMAIL_RE => r"^[^\s@]+@[^\s@]+\.[^\s@]+$",
    URI_RE => r"^[a-zA-Z][a-zA-Z0-9+.\-]*:[^\s]+$",
    URL_RE => r"^[a-zA-Z][a-zA-Z0-9+.\-]*://[^\s]+$",
    HTTP_URL_RE => r"^http://[^\s]+$",
    HTTPS_URL_RE => r"^https://[^\s]+$",
    URL_ENCODED_RE => r"^(?:[^%\s]|%[0-9A-Fa-f]{2})*$",
    DATA_URI_RE => r"^data:[a-zA-Z0-9!#$&.+\-^_]+/[a-zA-Z0-9!#$&.+\-^_]+;base64,[A-Za-z0-9+/]+=*$",
    E164_RE => r"^\+[1-9]\d{1,14}$",
    HEXADECIMAL_RE => r"^[0-9a-fA-F]+$",
    HEXCOLOR_RE => r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$",
    RGB_RE => r"^rgb\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*\)$",
    RGBA_RE => r"^rgba\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*[\d.]+\s*\)$",
    HSL_RE => r"^hsl\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*\)$",
    HSLA_RE => r"^hsla\(\s*\d{1,3}\s*,\s*\d{1,3}%\s*,\s*\d{1,3}%\s*,\s*[\d.]+\s*\)$",
    MAC_RE => r"^([0-9a-fA-F]{2}:){5}[0-9a-fA-F]{2}$",
    FQDN_RE => r"^(?:[a-zA-Z0-9](?:[a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?\.)+[a-zA-Z]{2,}$",
    // RFC 952: each label must start with a letter, digits disallowed as the first character.
    HOSTNAME_RFC952_RE => r"^[a-zA-Z]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*$",
    // RFC 1123: relaxes RFC 952 to permit a leading digit in each label.
    HOSTNAME_RFC1123_RE => r"^[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?(\.[a-zA-Z0-9]([a-zA-Z0-9\-]{0,61}[a-zA-Z0-9])?)*$",
    HOSTNAME_PORT_RE => r"^[^\s:]+:\d{1,5}$",
    NUMERIC_RE => r"^-?\d+$",
    NUMBER_RE => r"^-?\d+(\.\d+)?$",
}

#[derive(Debug, Clone)]
pub enum Validator {
    Required,
    Boolean,
    Alpha,
    AlphaUnicode,
    AlphaSpace,
    Alphanumeric,
    AlphanumUnicode,
    Numeric,
    Number,
    Ascii,
    PrintAscii,
    Multibyte,
    Eq(f64),
    Ne(f64),
    Gt(f64),
    Gte(f64),
    Lt(f64),
    Lte(f64),
    Min(f64),
    Max(f64),
    Len(usize),
    OneOf(Vec<String>),
    LowercaseShape,
    UppercaseShape,
    EqIgnoreCase(String),
    NeIgnoreCase(String),
    StartsWith(String),
    StartsNotWith(String),
    EndsWith(String),
    EndsNotWith(String),
    Contains(String),
    ContainsAny(String),
    ContainsRune(char),
    Excludes(String),
    ExcludesAll(String),
    ExcludesRune(char),
    Email,
    Uri,
    Url,
    HttpUrl,
    HttpsUrl,
    UrlEncoded,
    DataUri,
    DateTime(String),
    Uuid,
    Uuid3,
    Uuid4,
    Uuid5,
    Ulid,
    E164,
    Latitude,
    Longitude,
    Hexadecimal,
    HexColor,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    IpAddr,
    Ip4Addr,
    Ip6Addr,
    Cidr,
    CidrV4,
    CidrV6,
    Mac,
    Fqdn,
    Hostname,
    HostnameRfc1123,
    HostnamePort,
}

/// Error message bundled with the validator's stable tag name.
type Failure = (&'static str, String);

impl Validator {
    pub fn check(&self, input: &str) -> Option<Failure> {
        if self.passes_on_empty() && input.is_empty() {
            return None;
        }
        match self {
            Validator::Required => fail_if(input.is_empty(), "required", "value is required".into()),
            Validator::Boolean => fail_if(
                !matches!(input.to_ascii_lowercase().as_str(), "true" | "false" | "1" | "0"),
                "boolean",
                "value must be boolean".into(),
            ),
            Validator::Alpha => fail_if(
                !input.chars().all(|c| c.is_ascii_alphabetic()),
                "alpha",
                "value must contain only alphabetic characters".into(),
            ),
            Validator::AlphaUnicode => fail_if(
                !input.chars().all(char::is_alphabetic),
                "alphaunicode",
                "value must contain only alphabetic characters".into(),
            ),
            Validator::AlphaSpace => fail_if(
                !input.chars().all(|c| c.is_ascii_alphabetic() || c == ' '),
                "alphaspace",
                "value must contain only letters and spaces".into(),
            ),
            Validator::Alphanumeric => fail_if(
                !input.chars().all(|c| c.is_ascii_alphanumeric()),
                "alphanumeric",
                "value must contain only alphanumeric characters".into(),
            ),
            Validator::AlphanumUnicode => fail_if(
                !input.chars().all(char::is_alphanumeric),
                "alphanumunicode",
                "value must contain only alphanumeric characters".into(),
            ),
            Validator::Numeric => fail_if(
                !NUMERIC_RE.is_match(input),
                "numeric",
                "value must be numeric".into(),
            ),
            Validator::Number => fail_if(
                !NUMBER_RE.is_match(input),
                "number",
                "value must be a valid number".into(),
            ),
            Validator::Ascii => fail_if(
                !input.is_ascii(),
                "ascii",
                "value must be ASCII".into(),
            ),
            Validator::PrintAscii => fail_if(
                !input.chars().all(|c| c.is_ascii_graphic() || c == ' '),
                "printascii",
                "value must be printable ASCII".into(),
            ),
            Validator::Multibyte => fail_if(
                input.chars().all(|c| c.is_ascii()),
                "multibyte",
                "value must contain a multibyte character".into(),
            ),
            Validator::Eq(n) => fail_if(
                numeric_or_len(input) != *n,
                "eq",
                format!("value must equal {n}"),
            ),
            Validator::Ne(n) => fail_if(
                numeric_or_len(input) == *n,
                "ne",
                format!("value must not equal {n}"),
            ),
            Validator::Gt(n) => fail_if(
                !(numeric_or_len(input) > *n),
                "gt",
                format!("value must be greater than {n}"),
            ),
            Validator::Gte(n) => fail_if(
                !(numeric_or_len(input) >= *n),
                "gte",
                format!("value must be greater than or equal to {n}"),
            ),
            Validator::Lt(n) => fail_if(
                !(numeric_or_len(input) < *n),
                "lt",
                format!("value must be less than {n}"),
            ),
            Validator::Lte(n) => fail_if(
                !(numeric_or_len(input) <= *n),
                "lte",
                format!("value must be less than or equal to {n}"),
            ),
            Validator::Min(n) => fail_if(
                !(numeric_or_len(input) >= *n),
                "min",
                format!("value must be at least {n}"),
            ),
            Validator::Max(n) => fail_if(
                !(numeric_or_len(input) <= *n),
                "max",
                format!("value must be at most {n}"),
            ),
            Validator::Len(n) => fail_if(
                input.chars().count() != *n,
                "len",
                format!("value must have exactly {n} characters"),
            ),
            Validator::OneOf(options) => fail_if(
                !options.iter().any(|o| o == input),
                "oneof",
                format!("value must be one of {}", options.join(", ")),
            ),
            Validator::LowercaseShape => fail_if(
                input.chars().any(char::is_uppercase),
                "lowercase",
                "value must be lowercase".into(),
            ),
            Validator::UppercaseShape => fail_if(
                input.chars().any(char::is_lowercase),
                "uppercase",
                "value must be uppercase".into(),
            ),
            Validator::EqIgnoreCase(value) => fail_if(
                !input.eq_ignore_ascii_case(value),
                "eq_ignore_case",
                format!("value must equal '{value}' (case-insensitive)"),
            ),
            Validator::NeIgnoreCase(value) => fail_if(
                input.eq_ignore_ascii_case(value),
                "ne_ignore_case",
                format!("value must not equal '{value}' (case-insensitive)"),
            ),
            Validator::StartsWith(value) => fail_if(
                !input.starts_with(value.as_str()),
                "startswith",
                format!("value must start with '{value}'"),
            ),
            Validator::StartsNotWith(value) => fail_if(
                input.starts_with(value.as_str()),
                "startsnotwith",
                format!("value must not start with '{value}'"),
            ),
            Validator::EndsWith(value) => fail_if(
                !input.ends_with(value.as_str()),
                "endswith",
                format!("value must end with '{value}'"),
            ),
            Validator::EndsNotWith(value) => fail_if(
                input.ends_with(value.as_str()),
                "endsnotwith",
                format!("value must not end with '{value}'"),
            ),
            Validator::Contains(value) => fail_if(
                !input.contains(value.as_str()),
                "contains",
                format!("value must contain '{value}'"),
            ),
            Validator::ContainsAny(value) => fail_if(
                !input.chars().any(|c| value.contains(c)),
                "containsany",
                format!("value must contain any of '{value}'"),
            ),
            Validator::ContainsRune(ch) => fail_if(
                !input.contains(*ch),
                "containsrune",
                format!("value must contain the character '{ch}'"),
            ),
            Validator::Excludes(value) => fail_if(
                input.contains(value.as_str()),
                "excludes",
                format!("value must not contain '{value}'"),
            ),
            Validator::ExcludesAll(value) => fail_if(
                input.chars().any(|c| value.contains(c)),
                "excludesall",
                format!("value must not contain any of '{value}'"),
            ),
            Validator::ExcludesRune(ch) => fail_if(
                input.contains(*ch),
                "excludesrune",
                format!("value must not contain the character '{ch}'"),
            ),
            Validator::Email => fail_if(
                !EMAIL_RE.is_match(input),
                "email",
                "value must be a valid email address".into(),
            ),
            Validator::Uri => fail_if(!URI_RE.is_match(input), "uri", "value must be a valid URI".into()),
            Validator::Url => fail_if(!URL_RE.is_match(input), "url", "value must be a valid URL".into()),
            Validator::HttpUrl => fail_if(
                !HTTP_URL_RE.is_match(input),
                "http_url",
                "value must be a valid HTTP URL".into(),
            ),
            Validator::HttpsUrl => fail_if(
                !HTTPS_URL_RE.is_match(input),
                "https_url",
                "value must be a valid HTTPS URL".into(),
            ),
            Validator::UrlEncoded => fail_if(
                !URL_ENCODED_RE.is_match(input),
                "url_encoded",
                "value must be URL-encoded".into(),
            ),
            Validator::DataUri => fail_if(
                !DATA_URI_RE.is_match(input),
                "datauri",
                "value must be a valid data URI".into(),
            ),
            Validator::DateTime(layout) => fail_if(
                chrono::NaiveDateTime::parse_from_str(input, layout).is_err()
                    && chrono::NaiveDate::parse_from_str(input, layout).is_err(),
                "datetime",
                format!("value must match layout {layout}"),
            ),
            Validator::Uuid => fail_if(
                uuid::Uuid::parse_str(input).is_err(),
                "uuid",
                "value must be a valid UUID".into(),
            ),
            Validator::Uuid3 => fail_if(
                !has_uuid_version(input, uuid::Version::Md5),
                "uuid3",
                "value must be a valid UUID version 3".into(),
            ),
            Validator::Uuid4 => fail_if(
                !has_uuid_version(input, uuid::Version::Random),
                "uuid4",
                "value must be a valid UUID version 4".into(),
            ),
            Validator::Uuid5 => fail_if(
                !has_uuid_version(input, uuid::Version::Sha1),
                "uuid5",
                "value must be a valid UUID version 5".into(),
            ),
            Validator::Ulid => fail_if(
                ulid::Ulid::from_string(input).is_err(),
                "ulid",
                "value must be a valid ULID".into(),
            ),
            Validator::E164 => fail_if(
                !E164_RE.is_match(input),
                "e164",
                "value must be a valid E.164 phone number".into(),
            ),
            Validator::Latitude => fail_if(
                input.parse::<f64>().is_err_and_or_out_of_range(-90.0, 90.0),
                "latitude",
                "value must be a valid latitude".into(),
            ),
            Validator::Longitude => fail_if(
                input.parse::<f64>().is_err_and_or_out_of_range(-180.0, 180.0),
                "longitude",
                "value must be a valid longitude".into(),
            ),
            Validator::Hexadecimal => fail_if(
                !HEXADECIMAL_RE.is_match(input),
                "hexadecimal",
                "value must be hexadecimal".into(),
            ),
            Validator::HexColor => fail_if(
                !HEXCOLOR_RE.is_match(input),
                "hexcolor",
                "value must be a valid hex color".into(),
            ),
            Validator::Rgb => fail_if(!RGB_RE.is_match(input), "rgb", "value must be a valid rgb color".into()),
            Validator::Rgba => fail_if(
                !RGBA_RE.is_match(input),
                "rgba",
                "value must be a valid rgba color".into(),
            ),
            Validator::Hsl => fail_if(!HSL_RE.is_match(input), "hsl", "value must be a valid hsl color".into()),
            Validator::Hsla => fail_if(
                !HSLA_RE.is_match(input),
                "hsla",
                "value must be a valid hsla color".into(),
            ),
            Validator::IpAddr => fail_if(
                IpAddr::from_str(input).is_err(),
                "ip_addr",
                "value must be a valid IP address".into(),
            ),
            Validator::Ip4Addr => fail_if(
                !matches!(IpAddr::from_str(input), Ok(IpAddr::V4(_))),
                "ip4_addr",
                "value must be a valid IPv4 address".into(),
            ),
            Validator::Ip6Addr => fail_if(
                !matches!(IpAddr::from_str(input), Ok(IpAddr::V6(_))),
                "ip6_addr",
                "value must be a valid IPv6 address".into(),
            ),
            Validator::Cidr => fail_if(
                ipnet::IpNet::from_str(input).is_err(),
                "cidr",
                "value must be a valid CIDR".into(),
            ),
            Validator::CidrV4 => fail_if(
                ipnet::Ipv4Net::from_str(input).is_err(),
                "cidrv4",
                "value must be a valid IPv4 CIDR".into(),
            ),
            Validator::CidrV6 => fail_if(
                ipnet::Ipv6Net::from_str(input).is_err(),
                "cidrv6",
                "value must be a valid IPv6 CIDR".into(),
            ),
            Validator::Mac => fail_if(!MAC_RE.is_match(input), "mac", "value must be a valid MAC address".into()),
            Validator::Fqdn => fail_if(!FQDN_RE.is_match(input), "fqdn", "value must be a valid FQDN".into()),
            Validator::Hostname => fail_if(
                !HOSTNAME_RFC952_RE.is_match(input),
                "hostname",
                "value must be a valid hostname".into(),
            ),
            Validator::HostnameRfc1123 => fail_if(
                !HOSTNAME_RFC1123_RE.is_match(input),
                "hostname_rfc1123",
                "value must be a valid RFC 1123 hostname".into(),
            ),
            Validator::HostnamePort => fail_if(
                !HOSTNAME_PORT_RE.is_match(input),
                "hostname_port",
                "value must be a valid host:port".into(),
            ),
        }
    }

    /// Form/shape validators pass on empty input per the §4.1 emptiness
    /// policy, enabling optional fields.
    fn passes_on_empty(&self) -> bool {
        !matches!(
            self,
            Validator::Required
                | Validator::Eq(_)
                | Validator::Ne(_)
                | Validator::Gt(_)
                | Validator::Gte(_)
                | Validator::Lt(_)
                | Validator::Lte(_)
                | Validator::Min(_)
                | Validator::Max(_)
                | Validator::Len(_)
                | Validator::OneOf(_)
                | Validator::EqIgnoreCase(_)
                | Validator::NeIgnoreCase(_)
                | Validator::StartsWith(_)
                | Validator::StartsNotWith(_)
                | Validator::EndsWith(_)
                | Validator::EndsNotWith(_)
                | Validator::Contains(_)
                | Validator::ContainsAny(_)
                | Validator::ContainsRune(_)
                | Validator::Excludes(_)
                | Validator::ExcludesAll(_)
                | Validator::ExcludesRune(_)
        )
    }
}

trait RangeCheck {
    fn is_err_and_or_out_of_range(self, low: f64, high: f64) -> bool;
}

impl RangeCheck for Result<f64, std::num::ParseFloatError> {
    fn is_err_and_or_out_of_range(self, low: f64, high: f64) -> bool {
        match self {
            Ok(v) => !(low..=high).contains(&v),
            Err(_) => true,
        }
    }
}

fn fail_if(condition: bool, tag: &'static str, message: String) -> Option<Failure> {
    condition.then_some((tag, message))
}

/// Parses via the `uuid` crate and checks the embedded version nibble,
/// the same delegation pattern `Validator::Ulid`/`Validator::Cidr*` use.
fn has_uuid_version(input: &str, version: uuid::Version) -> bool {
    uuid::Uuid::parse_str(input).is_ok_and(|u| u.get_version() == Some(version))
}

/// Range/length comparisons parse the cell as a float; non-numeric input
/// falls back to character count, matching the go-playground/validator
/// convention of comparing string length when the field isn't numeric.
fn numeric_or_len(input: &str) -> f64 {
    input
        .parse::<f64>()
        .unwrap_or(input.chars().count() as f64)
}

/// Resolves one `(tag, arg)` token into a `Validator`. See
/// [`crate::schema::preprocess::build`] for the three-state contract.
pub fn build(name: &str, arg: Option<&str>) -> Option<Option<Validator>> {
    let built = match name {
        "required" => Some(Validator::Required),
        "boolean" => Some(Validator::Boolean),
        "alpha" => Some(Validator::Alpha),
        "alphaunicode" => Some(Validator::AlphaUnicode),
        "alphaspace" => Some(Validator::AlphaSpace),
        "alphanumeric" => Some(Validator::Alphanumeric),
        "alphanumunicode" => Some(Validator::AlphanumUnicode),
        "numeric" => Some(Validator::Numeric),
        "number" => Some(Validator::Number),
        "ascii" => Some(Validator::Ascii),
        "printascii" => Some(Validator::PrintAscii),
        "multibyte" => Some(Validator::Multibyte),
        "lowercase" => Some(Validator::LowercaseShape),
        "uppercase" => Some(Validator::UppercaseShape),
        "email" => Some(Validator::Email),
        "uri" => Some(Validator::Uri),
        "url" => Some(Validator::Url),
        "http_url" => Some(Validator::HttpUrl),
        "https_url" => Some(Validator::HttpsUrl),
        "url_encoded" => Some(Validator::UrlEncoded),
        "datauri" => Some(Validator::DataUri),
        "uuid" => Some(Validator::Uuid),
        "uuid3" => Some(Validator::Uuid3),
        "uuid4" => Some(Validator::Uuid4),
        "uuid5" => Some(Validator::Uuid5),
        "ulid" => Some(Validator::Ulid),
        "e164" => Some(Validator::E164),
        "latitude" => Some(Validator::Latitude),
        "longitude" => Some(Validator::Longitude),
        "hexadecimal" => Some(Validator::Hexadecimal),
        "hexcolor" => Some(Validator::HexColor),
        "rgb" => Some(Validator::Rgb),
        "rgba" => Some(Validator::Rgba),
        "hsl" => Some(Validator::Hsl),
        "hsla" => Some(Validator::Hsla),
        "ip_addr" => Some(Validator::IpAddr),
        "ip4_addr" => Some(Validator::Ip4Addr),
        "ip6_addr" => Some(Validator::Ip6Addr),
        "cidr" => Some(Validator::Cidr),
        "cidrv4" => Some(Validator::CidrV4),
        "cidrv6" => Some(Validator::CidrV6),
        "mac" => Some(Validator::Mac),
        "fqdn" => Some(Validator::Fqdn),
        "hostname" => Some(Validator::Hostname),
        "hostname_rfc1123" => Some(Validator::HostnameRfc1123),
        "hostname_port" => Some(Validator::HostnamePort),

        "eq" => arg.and_then(|a| a.parse().ok()).map(Validator::Eq),
        "ne" => arg.and_then(|a| a.parse().ok()).map(Validator::Ne),
        "gt" => arg.and_then(|a| a.parse().ok()).map(Validator::Gt),
        "gte" => arg.and_then(|a| a.parse().ok()).map(Validator::Gte),
        "lt" => arg.and_then(|a| a.parse().ok()).map(Validator::Lt),
        "lte" => arg.and_then(|a| a.parse().ok()).map(Validator::Lte),
        "min" => arg.and_then(|a| a.parse().ok()).map(Validator::Min),
        "max" => arg.and_then(|a| a.parse().ok()).map(Validator::Max),
        "len" => arg.and_then(|a| a.parse().ok()).map(Validator::Len),

        "datetime" => arg.filter(|a| !a.is_empty()).map(|a| Validator::DateTime(a.to_string())),
        "eq_ignore_case" => non_empty(arg).map(|v| Validator::EqIgnoreCase(v.to_string())),
        "ne_ignore_case" => non_empty(arg).map(|v| Validator::NeIgnoreCase(v.to_string())),
        "startswith" => non_empty(arg).map(|v| Validator::StartsWith(v.to_string())),
        "startsnotwith" => non_empty(arg).map(|v| Validator::StartsNotWith(v.to_string())),
        "endswith" => non_empty(arg).map(|v| Validator::EndsWith(v.to_string())),
        "endsnotwith" => non_empty(arg).map(|v| Validator::EndsNotWith(v.to_string())),
        "contains" => non_empty(arg).map(|v| Validator::Contains(v.to_string())),
        "containsany" => non_empty(arg).map(|v| Validator::ContainsAny(v.to_string())),
        "containsrune" => arg.and_then(|a| a.chars().next()).map(Validator::ContainsRune),
        "excludes" => non_empty(arg).map(|v| Validator::Excludes(v.to_string())),
        "excludesall" => non_empty(arg).map(|v| Validator::ExcludesAll(v.to_string())),
        "excludesrune" => arg.and_then(|a| a.chars().next()).map(Validator::ExcludesRune),

        "oneof" => non_empty(arg).map(|v| {
            Validator::OneOf(v.split(' ').filter(|s| !s.is_empty()).map(str::to_string).collect())
        }),

        _ => return None,
    };
    Some(built)
}

fn non_empty(arg: Option<&str>) -> Option<&str> {
    arg.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fails_on_empty() {
        assert_eq!(
            Validator::Required.check(""),
            Some(("required", "value is required".to_string()))
        );
        assert_eq!(Validator::Required.check("x"), None);
    }

    #[test]
    fn shape_validators_pass_on_empty() {
        assert_eq!(Validator::Numeric.check(""), None);
        assert_eq!(Validator::Email.check(""), None);
        assert_eq!(Validator::Uuid4.check(""), None);
    }

    #[test]
    fn number_rejects_scientific_notation() {
        assert!(Validator::Number.check("1e10").is_some());
        assert_eq!(Validator::Number.check("12.5"), None);
        assert_eq!(Validator::Number.check("-3"), None);
    }

    #[test]
    fn len_fails_on_empty_when_nonzero() {
        assert!(Validator::Len(6).check("").is_some());
        assert_eq!(Validator::Len(0).check(""), None);
    }

    #[test]
    fn email_accepts_simple_address_rejects_missing_at() {
        assert_eq!(Validator::Email.check("john@example.com"), None);
        assert!(Validator::Email.check("not-an-email").is_some());
    }

    #[test]
    fn uuid4_message_matches_external_contract() {
        let err = Validator::Uuid4.check("invalid-uuid").unwrap();
        assert_eq!(err.1, "value must be a valid UUID version 4");
    }

    #[test]
    fn ip_addr_message_matches_external_contract() {
        let err = Validator::IpAddr.check("999.999.999.999").unwrap();
        assert_eq!(err.1, "value must be a valid IP address");
        assert_eq!(Validator::IpAddr.check("127.0.0.1"), None);
    }

    #[test]
    fn oneof_splits_on_space() {
        let v = build("oneof", Some("US CA MX")).unwrap().unwrap();
        assert!(v.check("US").is_none());
        assert!(v.check("DE").is_some());
    }
}
