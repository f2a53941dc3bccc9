//! Operation catalog
//!
//! Every banking action the switch offers is one `OperationKind` with a static
//! `OperationSpec`: endpoint, envelope keys, response shape and field rules.
//! Key casing differs between operations and is kept exactly as the upstream
//! API spells it.

mod catalog;

use std::fmt;
use std::str::FromStr;

use finswitch_common::validation::{FieldDescriptor, FieldRules};
use thiserror::Error;

/// chrono format for 14-digit `YYYYMMDDHHmmss` timestamps
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
/// chrono format for 8-digit `YYYYMMDD` dates
pub const DATE_FORMAT: &str = "%Y%m%d";

/// The banking operations exposed by the switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OperationKind {
    AccountInfo,
    VerifyAccount,
    LinkAccount,
    UnlinkAccount,
    GenerateOtp,
    AccountOpening,
    AccountOpeningStatus,
    AccountStatement,
    MiniStatement,
    BalanceInquiry,
    TitleFetch,
    CustomerProfile,
    MinorAccountVerification,
    MinorAccountOpening,
    MinorAccountConversion,
    KycUpdate,
    CnicExpiryUpdate,
    MobileNumberUpdate,
    AccountClosure,
    ChequeBookRequest,
}

impl OperationKind {
    pub const ALL: [Self; 20] = [
        Self::AccountInfo,
        Self::VerifyAccount,
        Self::LinkAccount,
        Self::UnlinkAccount,
        Self::GenerateOtp,
        Self::AccountOpening,
        Self::AccountOpeningStatus,
        Self::AccountStatement,
        Self::MiniStatement,
        Self::BalanceInquiry,
        Self::TitleFetch,
        Self::CustomerProfile,
        Self::MinorAccountVerification,
        Self::MinorAccountOpening,
        Self::MinorAccountConversion,
        Self::KycUpdate,
        Self::CnicExpiryUpdate,
        Self::MobileNumberUpdate,
        Self::AccountClosure,
        Self::ChequeBookRequest,
    ];

    pub fn spec(self) -> &'static OperationSpec {
        catalog::spec_for(self)
    }

    /// Config and audit name (`accountInfo`, `linkAccount`, ...)
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown operation: {0}")]
pub struct UnknownOperation(pub String);

impl FromStr for OperationKind {
    type Err = UnknownOperation;

    /// Accepts `linkAccount`, `link_account`, `link-account` or `LinkAccount`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = fold(s);
        Self::ALL
            .into_iter()
            .find(|kind| fold(kind.name()) == wanted)
            .ok_or_else(|| UnknownOperation(s.to_string()))
    }
}

fn fold(name: &str) -> String {
    name.chars().filter(|c| !matches!(c, '_' | '-')).map(|c| c.to_ascii_lowercase()).collect()
}

/// Value generated for a field the caller left empty
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    None,
    /// Six random zero-padded digits
    TraceNumber,
    /// Current local time in the given chrono format
    Timestamp(&'static str),
    Literal(&'static str),
}

/// One request field: wire key, label, rules and default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub rules: FieldRules,
    pub default: FieldDefault,
    /// Personal identifier (national id, B-form, phone number); always redacted
    pub sensitive: bool,
}

impl FieldSpec {
    pub const fn new(key: &'static str, label: &'static str, rules: FieldRules) -> Self {
        Self { key, label, rules, default: FieldDefault::None, sensitive: false }
    }

    pub const fn with_default(mut self, default: FieldDefault) -> Self {
        self.default = default;
        self
    }

    pub const fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }
}

/// Keys of every catalog field marked sensitive, across all operations
pub fn sensitive_field_keys() -> impl Iterator<Item = &'static str> {
    OperationKind::ALL
        .into_iter()
        .flat_map(|kind| kind.spec().fields.iter())
        .filter(|field| field.sensitive)
        .map(|field| field.key)
}

impl FieldDescriptor for FieldSpec {
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

/// Where the result lives in a 2xx reply and how to read it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseShape {
    /// Top-level key wrapping the operation's reply (`LinkAccountResponse`)
    pub key: &'static str,
    /// `ResponseCode` or `responseCode`
    pub code_field: &'static str,
    /// `ResponseDetails` or `responseDetails`
    pub details_field: &'static str,
    /// Overrides the configured success code for this operation
    pub success_code: Option<&'static str>,
    pub success_message: &'static str,
    pub failure_message: &'static str,
}

/// Static description of one operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperationSpec {
    pub kind: OperationKind,
    pub name: &'static str,
    /// Used in failure messages: "{display_name} failed: ..."
    pub display_name: &'static str,
    /// Used in transport failures: "Failed to {action}: ..."
    pub action: &'static str,
    pub endpoint: &'static str,
    /// Falls back to the configured default timeout when `None`
    pub timeout_secs: Option<u64>,
    pub request_key: &'static str,
    pub response: ResponseShape,
    pub fields: &'static [FieldSpec],
}

impl OperationSpec {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.key == key)
    }

    /// Sentinel marking business success for this operation
    pub fn success_code<'a>(&self, configured: &'a str) -> &'a str {
        self.response.success_code.unwrap_or(configured)
    }
}
