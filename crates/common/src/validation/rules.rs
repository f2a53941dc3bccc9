// Validation Rules - per-field constraint sets usable in static tables
use std::collections::HashMap;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use regex::Regex;

use super::{RuleKind, ValidationError, ValidationResult};

/// Compiled patterns keyed by their source; schemas are static so this stays small.
static PATTERN_CACHE: Lazy<Mutex<HashMap<&'static str, Regex>>> =
    Lazy::new(|| Mutex::new(HashMap::new()));

/// Allowed character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Charset {
    /// ASCII digits only
    Digits,
    /// Letters and spaces
    Alpha,
    /// Letters, digits and spaces
    Alphanumeric,
}

impl Charset {
    fn accepts(self, value: &str) -> bool {
        match self {
            Self::Digits => value.chars().all(|c| c.is_ascii_digit()),
            Self::Alpha => value.chars().all(|c| c.is_alphabetic() || c == ' '),
            Self::Alphanumeric => value.chars().all(|c| c.is_alphanumeric() || c == ' '),
        }
    }

    const fn description(self) -> &'static str {
        match self {
            Self::Digits => "only digits",
            Self::Alpha => "only letters",
            Self::Alphanumeric => "only letters and digits",
        }
    }
}

/// Constraint set for one field.
///
/// All builders are `const` so operation schemas can live in `static` tables:
///
/// ```
/// use finswitch_common::validation::FieldRules;
///
/// const RRN: FieldRules = FieldRules::required().exact_length(&[14, 16]);
/// assert!(RRN.check("rrn", "Rrn", Some("20230112332423")).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub required: bool,
    /// Accepted lengths; empty means "any length"
    pub exact_lengths: &'static [usize],
    pub max_length: Option<usize>,
    pub charset: Option<Charset>,
    /// Enumerated values; empty means "any value"
    pub allowed: &'static [&'static str],
    pub pattern: Option<&'static str>,
}

impl FieldRules {
    pub const fn required() -> Self {
        Self {
            required: true,
            exact_lengths: &[],
            max_length: None,
            charset: None,
            allowed: &[],
            pattern: None,
        }
    }

    pub const fn optional() -> Self {
        Self {
            required: false,
            exact_lengths: &[],
            max_length: None,
            charset: None,
            allowed: &[],
            pattern: None,
        }
    }

    /// Value length must be one of `lengths`
    pub const fn exact_length(mut self, lengths: &'static [usize]) -> Self {
        self.exact_lengths = lengths;
        self
    }

    pub const fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub const fn digits(mut self) -> Self {
        self.charset = Some(Charset::Digits);
        self
    }

    pub const fn alpha(mut self) -> Self {
        self.charset = Some(Charset::Alpha);
        self
    }

    pub const fn alphanumeric(mut self) -> Self {
        self.charset = Some(Charset::Alphanumeric);
        self
    }

    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.allowed = values;
        self
    }

    pub const fn pattern(mut self, pattern: &'static str) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Check one value. `None` (or blank) means the field was not supplied.
    ///
    /// Order: required, exact length, max length, charset, allowed, pattern.
    pub fn check(&self, field: &str, label: &str, value: Option<&str>) -> ValidationResult<()> {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            if self.required {
                return Err(ValidationError::new(
                    field,
                    RuleKind::Required,
                    format!("{label} is required"),
                ));
            }
            return Ok(());
        };

        let length = value.chars().count();

        if !self.exact_lengths.is_empty() && !self.exact_lengths.contains(&length) {
            return Err(ValidationError::new(
                field,
                RuleKind::ExactLength,
                format!("{label} must be {} characters", describe_lengths(self.exact_lengths)),
            ));
        }

        if let Some(max) = self.max_length {
            if length > max {
                return Err(ValidationError::new(
                    field,
                    RuleKind::MaxLength,
                    format!("{label} must not exceed {max} characters"),
                ));
            }
        }

        if let Some(charset) = self.charset {
            if !charset.accepts(value) {
                return Err(ValidationError::new(
                    field,
                    RuleKind::Charset,
                    format!("{label} must contain {}", charset.description()),
                ));
            }
        }

        if !self.allowed.is_empty() && !self.allowed.contains(&value) {
            return Err(ValidationError::new(
                field,
                RuleKind::Allowed,
                format!("{label} must be one of: {}", self.allowed.join(", ")),
            ));
        }

        if let Some(pattern) = self.pattern {
            if !pattern_matches(pattern, value) {
                return Err(ValidationError::new(
                    field,
                    RuleKind::Pattern,
                    format!("{label} has an invalid format"),
                ));
            }
        }

        Ok(())
    }
}

/// "13", "14 or 16", "8, 10 or 12"
fn describe_lengths(lengths: &[usize]) -> String {
    match lengths {
        [] => String::new(),
        [only] => only.to_string(),
        [init @ .., last] => {
            let head = init.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
            format!("{head} or {last}")
        }
    }
}

/// An uncompilable pattern never matches.
fn pattern_matches(pattern: &'static str, value: &str) -> bool {
    let mut cache = PATTERN_CACHE.lock();
    if let Some(regex) = cache.get(pattern) {
        return regex.is_match(value);
    }
    match Regex::new(pattern) {
        Ok(regex) => {
            let matched = regex.is_match(value);
            cache.insert(pattern, regex);
            matched
        }
        Err(_) => false,
    }
}

/// Returns whether `pattern` compiles; used by schema self-checks.
pub fn pattern_compiles(pattern: &str) -> bool {
    Regex::new(pattern).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_field_missing() {
        let err = FieldRules::required().check("cnic", "Cnic", None).unwrap_err();
        assert_eq!(err.rule, RuleKind::Required);
        assert_eq!(err.message, "Cnic is required");
    }

    #[test]
    fn blank_value_counts_as_missing() {
        let err = FieldRules::required().check("cnic", "Cnic", Some("   ")).unwrap_err();
        assert_eq!(err.rule, RuleKind::Required);
        assert!(FieldRules::optional().check("otp", "Otp", Some("")).is_ok());
    }

    #[test]
    fn exact_length_with_alternatives() {
        let rules = FieldRules::required().exact_length(&[14, 16]);
        assert!(rules.check("rrn", "Rrn", Some("20230112332423")).is_ok());
        assert!(rules.check("rrn", "Rrn", Some("2023011233242312")).is_ok());

        let err = rules.check("rrn", "Rrn", Some("2023011233242")).unwrap_err();
        assert_eq!(err.rule, RuleKind::ExactLength);
        assert_eq!(err.message, "Rrn must be 14 or 16 characters");
    }

    #[test]
    fn single_exact_length_message() {
        let err = FieldRules::required()
            .exact_length(&[13])
            .check("cnic", "Cnic", Some("123"))
            .unwrap_err();
        assert_eq!(err.message, "Cnic must be 13 characters");
    }

    #[test]
    fn length_checked_before_charset() {
        let rules = FieldRules::required().exact_length(&[11]).digits();
        let err = rules.check("mobile", "Mobile", Some("0316abc")).unwrap_err();
        assert_eq!(err.rule, RuleKind::ExactLength);

        let err = rules.check("mobile", "Mobile", Some("0316539218x")).unwrap_err();
        assert_eq!(err.rule, RuleKind::Charset);
        assert_eq!(err.message, "Mobile must contain only digits");
    }

    #[test]
    fn max_length_violation() {
        let err = FieldRules::required()
            .max_length(5)
            .check("name", "Name", Some("abcdef"))
            .unwrap_err();
        assert_eq!(err.rule, RuleKind::MaxLength);
        assert_eq!(err.message, "Name must not exceed 5 characters");
    }

    #[test]
    fn enumerated_values() {
        let rules = FieldRules::required().one_of(&["M", "F", "T"]);
        assert!(rules.check("gender", "Gender", Some("F")).is_ok());
        let err = rules.check("gender", "Gender", Some("X")).unwrap_err();
        assert_eq!(err.rule, RuleKind::Allowed);
        assert_eq!(err.message, "Gender must be one of: M, F, T");
    }

    #[test]
    fn pattern_rule() {
        let rules = FieldRules::optional().pattern(r"^[^@\s]+@[^@\s]+\.[a-z]{2,}$");
        assert!(rules.check("email", "Email", Some("a@b.com")).is_ok());
        let err = rules.check("email", "Email", Some("not-an-email")).unwrap_err();
        assert_eq!(err.rule, RuleKind::Pattern);
        assert_eq!(err.message, "Email has an invalid format");
    }

    #[test]
    fn alpha_allows_spaces() {
        let rules = FieldRules::required().alpha();
        assert!(rules.check("name", "Name", Some("Ali Khan")).is_ok());
        assert!(rules.check("name", "Name", Some("Ali2")).is_err());
    }

    #[test]
    fn describes_length_lists() {
        assert_eq!(describe_lengths(&[13]), "13");
        assert_eq!(describe_lengths(&[14, 16]), "14 or 16");
        assert_eq!(describe_lengths(&[8, 10, 12]), "8, 10 or 12");
    }
}
