//! Key-based redaction of JSON values and header maps.
//!
//! Keys are compared after normalization: ASCII lowercase with `_`, `-` and
//! spaces removed, so `card_number`, `Card-Number` and `cardNumber` all match.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value};

/// Replacement written in place of sensitive values
pub const REDACTED: &str = "[REDACTED]";

/// Redacts values whose key is in the configured sensitive set.
#[derive(Debug, Clone, Default)]
pub struct Redactor {
    keys: HashSet<String>,
}

impl Redactor {
    pub fn new<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { keys: keys.into_iter().map(|k| normalize(k.as_ref())).collect() }
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        self.keys.contains(&normalize(key))
    }

    /// Deep copy of `value` with every sensitive key masked, at any depth.
    pub fn redact_value(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.redact_map(map)),
            Value::Array(items) => Value::Array(items.iter().map(|v| self.redact_value(v)).collect()),
            other => other.clone(),
        }
    }

    pub fn redact_map(&self, map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .map(|(key, value)| {
                let value = if self.is_sensitive(key) {
                    Value::String(REDACTED.to_string())
                } else {
                    self.redact_value(value)
                };
                (key.clone(), value)
            })
            .collect()
    }

    pub fn redact_headers(&self, headers: &BTreeMap<String, String>) -> BTreeMap<String, String> {
        headers
            .iter()
            .map(|(name, value)| {
                let value = if self.is_sensitive(name) { REDACTED.to_string() } else { value.clone() };
                (name.clone(), value)
            })
            .collect()
    }
}

fn normalize(key: &str) -> String {
    key.chars()
        .filter(|c| !matches!(c, '_' | '-' | ' '))
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn redactor() -> Redactor {
        Redactor::new(["cnic", "mobile", "clientSecret", "cardNumber"])
    }

    #[test]
    fn matches_keys_ignoring_case_and_separators() {
        let r = redactor();
        assert!(r.is_sensitive("CNIC"));
        assert!(r.is_sensitive("card_number"));
        assert!(r.is_sensitive("Client-Secret"));
        assert!(!r.is_sensitive("rrn"));
    }

    #[test]
    fn redacts_nested_objects_and_arrays() {
        let body = json!({
            "accountInfoReq": {
                "mobile": "03165392185",
                "rrn": "20230112332423",
                "holders": [{ "cnic": "4210112345671", "name": "Ali" }]
            }
        });

        let redacted = redactor().redact_value(&body);
        assert_eq!(redacted["accountInfoReq"]["mobile"], REDACTED);
        assert_eq!(redacted["accountInfoReq"]["rrn"], "20230112332423");
        assert_eq!(redacted["accountInfoReq"]["holders"][0]["cnic"], REDACTED);
        assert_eq!(redacted["accountInfoReq"]["holders"][0]["name"], "Ali");
    }

    #[test]
    fn whole_subtree_masked_when_key_is_sensitive() {
        let body = json!({ "cardNumber": { "pan": "4111" } });
        assert_eq!(redactor().redact_value(&body)["cardNumber"], REDACTED);
    }

    #[test]
    fn redacts_headers() {
        let headers = BTreeMap::from([
            ("clientId".to_string(), "abc".to_string()),
            ("clientSecret".to_string(), "token-value".to_string()),
        ]);
        let redacted = redactor().redact_headers(&headers);
        assert_eq!(redacted["clientId"], "abc");
        assert_eq!(redacted["clientSecret"], REDACTED);
    }

    #[test]
    fn empty_redactor_passes_everything_through() {
        let body = json!({ "cnic": "4210112345671" });
        assert_eq!(Redactor::default().redact_value(&body), body);
    }
}
