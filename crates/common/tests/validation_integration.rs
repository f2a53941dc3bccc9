//! Integration tests for validation module
//!
//! Exercises realistic banking field tables through the public API.

use std::collections::BTreeMap;

use finswitch_common::validation::{
    pattern_compiles, validate_fields, FieldRules, FieldSchema, RuleKind,
};

const ACCOUNT_OPENING: &[FieldSchema] = &[
    FieldSchema::new("cnic", "Cnic", FieldRules::required().exact_length(&[13]).digits()),
    FieldSchema::new("fullName", "Full name", FieldRules::required().max_length(50).alpha()),
    FieldSchema::new("gender", "Gender", FieldRules::required().one_of(&["M", "F", "T"])),
    FieldSchema::new(
        "email",
        "Email",
        FieldRules::optional().max_length(100).pattern(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$"),
    ),
    FieldSchema::new("otp", "Otp", FieldRules::optional().exact_length(&[4, 6]).digits()),
];

fn input(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect()
}

#[test]
fn test_complete_valid_record() {
    let fields = input(&[
        ("cnic", "4210112345671"),
        ("fullName", "Ayesha Khan"),
        ("gender", "F"),
        ("email", "ayesha@example.pk"),
        ("otp", "123456"),
    ]);

    assert!(validate_fields(ACCOUNT_OPENING, &fields).is_ok());
}

#[test]
fn test_optional_fields_may_be_absent() {
    let fields = input(&[("cnic", "4210112345671"), ("fullName", "Ayesha Khan"), ("gender", "F")]);

    assert!(validate_fields(ACCOUNT_OPENING, &fields).is_ok());
}

#[test]
fn test_each_single_violation_names_its_field() {
    let valid = input(&[
        ("cnic", "4210112345671"),
        ("fullName", "Ayesha Khan"),
        ("gender", "F"),
        ("email", "ayesha@example.pk"),
        ("otp", "1234"),
    ]);

    let cases = [
        ("cnic", "421011234567", RuleKind::ExactLength),
        ("cnic", "42101123456x1", RuleKind::Charset),
        ("fullName", "Ayesha 2", RuleKind::Charset),
        ("gender", "X", RuleKind::Allowed),
        ("email", "ayesha.example.pk", RuleKind::Pattern),
        ("otp", "12345", RuleKind::ExactLength),
    ];

    for (field, bad, rule) in cases {
        let mut fields = valid.clone();
        fields.insert(field.to_string(), bad.to_string());

        let err = validate_fields(ACCOUNT_OPENING, &fields).unwrap_err();
        assert_eq!(err.field, field, "wrong field for {field}={bad}");
        assert_eq!(err.rule, rule, "wrong rule for {field}={bad}");
    }
}

#[test]
fn test_missing_required_field() {
    let fields = input(&[("cnic", "4210112345671"), ("gender", "F")]);

    let err = validate_fields(ACCOUNT_OPENING, &fields).unwrap_err();
    assert_eq!(err.field, "fullName");
    assert_eq!(err.message, "Full name is required");
}

#[test]
fn test_schema_patterns_compile() {
    for field in ACCOUNT_OPENING {
        if let Some(pattern) = field.rules.pattern {
            assert!(pattern_compiles(pattern), "{} pattern does not compile", field.key);
        }
    }
}
