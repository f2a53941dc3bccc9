//! Validated, immutable request values

use std::collections::BTreeMap;

use finswitch_common::time::{format_local, Clock, SystemClock};
use finswitch_common::validation::{validate_fields, ValidationResult};
use rand::Rng;

use crate::operations::{FieldDefault, OperationKind, OperationSpec};

/// Request fields for one operation that have passed validation.
///
/// The only constructors run defaults and validation, so an invalid record
/// cannot exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    kind: OperationKind,
    fields: BTreeMap<String, String>,
}

impl RequestRecord {
    pub fn new<I, K, V>(kind: OperationKind, fields: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::with_clock(kind, fields, &SystemClock)
    }

    /// Same as [`RequestRecord::new`] with timestamp defaults taken from `clock`.
    pub fn with_clock<I, K, V>(kind: OperationKind, fields: I, clock: &dyn Clock) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let spec = kind.spec();
        let mut fields: BTreeMap<String, String> = fields
            .into_iter()
            .map(|(k, v)| (k.into(), v.into().trim().to_string()))
            .filter(|(_, v)| !v.is_empty())
            .collect();

        apply_defaults(spec, &mut fields, clock);
        validate_fields(spec.fields, &fields)?;

        Ok(Self { kind, fields })
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn spec(&self) -> &'static OperationSpec {
        self.kind.spec()
    }

    /// Present, non-empty fields keyed by wire name
    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    pub fn trace_no(&self) -> Option<&str> {
        self.find(&["traceno"])
    }

    pub fn rrn(&self) -> Option<&str> {
        self.find(&["rrn"])
    }

    pub fn cnic(&self) -> Option<&str> {
        self.find(&["cnic", "guardiancnic"])
    }

    pub fn mobile(&self) -> Option<&str> {
        self.find(&["mobile", "mobilenumber", "newmobilenumber"])
    }

    /// First field whose lowercased key is one of `names`, in `names` order.
    fn find(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| {
            self.fields
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.as_str())
        })
    }
}

fn apply_defaults(spec: &OperationSpec, fields: &mut BTreeMap<String, String>, clock: &dyn Clock) {
    for field in spec.fields {
        if fields.contains_key(field.key) {
            continue;
        }
        let value = match field.default {
            FieldDefault::None => continue,
            FieldDefault::TraceNumber => generate_trace_number(),
            FieldDefault::Timestamp(format) => format_local(clock.system_time(), format),
            FieldDefault::Literal(value) => value.to_string(),
        };
        fields.insert(field.key.to_string(), value);
    }
}

/// Six zero-padded random digits
pub fn generate_trace_number() -> String {
    format!("{:06}", rand::thread_rng().gen_range(0..1_000_000))
}
