// Schema validation - ordered field tables
use std::collections::BTreeMap;

use super::rules::FieldRules;
use super::{RuleKind, ValidationError, ValidationResult};

/// Anything that names a field and carries its rules.
pub trait FieldDescriptor {
    /// Wire key, exactly as the upstream expects it
    fn key(&self) -> &str;

    /// Human label used in messages ("Rrn", "Cnic")
    fn label(&self) -> &str;

    fn rules(&self) -> &FieldRules;
}

/// Plain field declaration for static schemas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSchema {
    pub key: &'static str,
    pub label: &'static str,
    pub rules: FieldRules,
}

impl FieldSchema {
    pub const fn new(key: &'static str, label: &'static str, rules: FieldRules) -> Self {
        Self { key, label, rules }
    }
}

impl FieldDescriptor for FieldSchema {
    fn key(&self) -> &str {
        self.key
    }

    fn label(&self) -> &str {
        self.label
    }

    fn rules(&self) -> &FieldRules {
        &self.rules
    }
}

/// Validate `fields` against `schema`, returning the first violation.
///
/// Declared fields are checked in schema order. Keys that no descriptor
/// declares are rejected only once every declared field has passed.
pub fn validate_fields<D: FieldDescriptor>(
    schema: &[D],
    fields: &BTreeMap<String, String>,
) -> ValidationResult<()> {
    for descriptor in schema {
        descriptor.rules().check(
            descriptor.key(),
            descriptor.label(),
            fields.get(descriptor.key()).map(String::as_str),
        )?;
    }

    if let Some(unknown) =
        fields.keys().find(|key| !schema.iter().any(|descriptor| descriptor.key() == key.as_str()))
    {
        return Err(ValidationError::new(
            unknown.clone(),
            RuleKind::Unknown,
            format!("Unknown field: {unknown}"),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCHEMA: &[FieldSchema] = &[
        FieldSchema::new("mobile", "Mobile", FieldRules::required().exact_length(&[11]).digits()),
        FieldSchema::new("dateTime", "DateTime", FieldRules::required().exact_length(&[14]).digits()),
        FieldSchema::new("rrn", "Rrn", FieldRules::required().exact_length(&[14, 16])),
        FieldSchema::new("otp", "Otp", FieldRules::optional().max_length(6).digits()),
    ];

    fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn accepts_valid_fields() {
        let input = fields(&[
            ("mobile", "03165392185"),
            ("dateTime", "20241297129031"),
            ("rrn", "20230112332423"),
        ]);
        assert!(validate_fields(SCHEMA, &input).is_ok());
    }

    #[test]
    fn reports_first_violation_in_declaration_order() {
        let input = fields(&[("mobile", "123"), ("dateTime", "x"), ("rrn", "1")]);
        let err = validate_fields(SCHEMA, &input).unwrap_err();
        assert_eq!(err.field, "mobile");
        assert_eq!(err.rule, RuleKind::ExactLength);
    }

    #[test]
    fn malformed_rrn_message() {
        let input = fields(&[
            ("mobile", "03165392185"),
            ("dateTime", "20241297129031"),
            ("rrn", "2023011233242"),
        ]);
        let err = validate_fields(SCHEMA, &input).unwrap_err();
        assert_eq!(err.field, "rrn");
        assert_eq!(err.to_string(), "Rrn must be 14 or 16 characters");
    }

    #[test]
    fn unknown_field_rejected_after_declared_fields() {
        let input = fields(&[
            ("mobile", "03165392185"),
            ("dateTime", "20241297129031"),
            ("rrn", "20230112332423"),
            ("extra", "1"),
        ]);
        let err = validate_fields(SCHEMA, &input).unwrap_err();
        assert_eq!(err.rule, RuleKind::Unknown);
        assert_eq!(err.message, "Unknown field: extra");

        let input = fields(&[("mobile", "1"), ("extra", "1")]);
        assert_eq!(validate_fields(SCHEMA, &input).unwrap_err().field, "mobile");
    }
}
