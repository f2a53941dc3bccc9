use finswitch_common::validation::FieldRules;

use super::{
    FieldDefault, FieldSpec, OperationKind, OperationSpec, ResponseShape, DATE_FORMAT,
    TIMESTAMP_FORMAT,
};

// Shared rule sets
const RRN: FieldRules = FieldRules::required().exact_length(&[14, 16]);
const TRACE_NO: FieldRules = FieldRules::required().exact_length(&[6]).digits();
const DATE_TIME: FieldRules = FieldRules::required().exact_length(&[14]).digits();
const DATE: FieldRules = FieldRules::required().exact_length(&[8]).digits();
const OPTIONAL_DATE: FieldRules = FieldRules::optional().exact_length(&[8]).digits();
const CNIC: FieldRules = FieldRules::required().exact_length(&[13]).digits();
const OPTIONAL_CNIC: FieldRules = FieldRules::optional().exact_length(&[13]).digits();
const MOBILE: FieldRules = FieldRules::required().exact_length(&[11]).digits();
const OPTIONAL_MOBILE: FieldRules = FieldRules::optional().exact_length(&[11]).digits();
const ACCOUNT_NUMBER: FieldRules = FieldRules::required().max_length(24).alphanumeric();
const OTP: FieldRules = FieldRules::required().exact_length(&[4, 6]).digits();
const OPTIONAL_OTP: FieldRules = FieldRules::optional().exact_length(&[4, 6]).digits();
const NAME: FieldRules = FieldRules::required().max_length(50).alpha();
const OPTIONAL_NAME: FieldRules = FieldRules::optional().max_length(50).alpha();
const REASON: FieldRules = FieldRules::required().max_length(100);
const OPTIONAL_REASON: FieldRules = FieldRules::optional().max_length(100);
const EMAIL: FieldRules =
    FieldRules::optional().max_length(100).pattern(r"^[^@\s]+@[^@\s]+\.[A-Za-z]{2,}$");

const fn personal(key: &'static str, label: &'static str, rules: FieldRules) -> FieldSpec {
    FieldSpec::new(key, label, rules).sensitive()
}

const fn rrn(key: &'static str) -> FieldSpec {
    FieldSpec::new(key, "Rrn", RRN)
}

const fn trace(key: &'static str) -> FieldSpec {
    FieldSpec::new(key, "Trace number", TRACE_NO).with_default(FieldDefault::TraceNumber)
}

const fn stamp(key: &'static str) -> FieldSpec {
    FieldSpec::new(key, "Date time", DATE_TIME)
        .with_default(FieldDefault::Timestamp(TIMESTAMP_FORMAT))
}

/// `ResponseCode` / `ResponseDetails`
const fn pascal(
    key: &'static str,
    success_message: &'static str,
    failure_message: &'static str,
) -> ResponseShape {
    ResponseShape {
        key,
        code_field: "ResponseCode",
        details_field: "ResponseDetails",
        success_code: None,
        success_message,
        failure_message,
    }
}

/// `responseCode` / `responseDetails`
const fn camel(
    key: &'static str,
    success_message: &'static str,
    failure_message: &'static str,
) -> ResponseShape {
    ResponseShape {
        key,
        code_field: "responseCode",
        details_field: "responseDetails",
        success_code: None,
        success_message,
        failure_message,
    }
}

static ACCOUNT_INFO: OperationSpec = OperationSpec {
    kind: OperationKind::AccountInfo,
    name: "accountInfo",
    display_name: "Account info",
    action: "fetch account info",
    endpoint: "/api/v1/account-info",
    timeout_secs: None,
    request_key: "accountInfoReq",
    response: pascal(
        "accountInfoRes",
        "Account info fetched successfully",
        "Account info request failed",
    ),
    fields: &[
        personal("mobile", "Mobile", MOBILE),
        stamp("dateTime"),
        rrn("rrn"),
    ],
};

static VERIFY_ACCOUNT: OperationSpec = OperationSpec {
    kind: OperationKind::VerifyAccount,
    name: "verifyAccount",
    display_name: "Account verification",
    action: "verify account",
    endpoint: "/api/v1/verify-account",
    timeout_secs: None,
    request_key: "VerifyAccountRequest",
    response: pascal(
        "VerifyAccountResponse",
        "Account verified successfully",
        "Account verification failed",
    ),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        personal("MobileNumber", "Mobile number", MOBILE),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static LINK_ACCOUNT: OperationSpec = OperationSpec {
    kind: OperationKind::LinkAccount,
    name: "linkAccount",
    display_name: "Account linking",
    action: "link account",
    endpoint: "/api/v1/link-account",
    timeout_secs: Some(60),
    request_key: "LinkAccountRequest",
    response: pascal("LinkAccountResponse", "Account linked successfully", "Account linking failed"),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        personal("MobileNumber", "Mobile number", MOBILE),
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("Otp", "Otp", OPTIONAL_OTP),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static UNLINK_ACCOUNT: OperationSpec = OperationSpec {
    kind: OperationKind::UnlinkAccount,
    name: "unlinkAccount",
    display_name: "Account unlinking",
    action: "unlink account",
    endpoint: "/api/v1/unlink-account",
    timeout_secs: None,
    request_key: "UnlinkAccountRequest",
    response: pascal(
        "UnlinkAccountResponse",
        "Account unlinked successfully",
        "Account unlinking failed",
    ),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("Reason", "Reason", OPTIONAL_REASON),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static GENERATE_OTP: OperationSpec = OperationSpec {
    kind: OperationKind::GenerateOtp,
    name: "generateOtp",
    display_name: "OTP generation",
    action: "generate OTP",
    endpoint: "/api/v1/generate-otp",
    timeout_secs: None,
    request_key: "generateOtpReq",
    response: camel("generateOtpRes", "OTP sent successfully", "OTP generation failed"),
    fields: &[
        personal("cnic", "Cnic", CNIC),
        personal("mobile", "Mobile", MOBILE),
        FieldSpec::new(
            "purpose",
            "Purpose",
            FieldRules::required().one_of(&["LINK", "OPEN", "UPDATE", "CLOSE"]),
        ),
        trace("traceNo"),
        stamp("dateTime"),
        rrn("rrn"),
    ],
};

static ACCOUNT_OPENING: OperationSpec = OperationSpec {
    kind: OperationKind::AccountOpening,
    name: "accountOpening",
    display_name: "Account opening",
    action: "open account",
    endpoint: "/api/v1/account-opening",
    timeout_secs: Some(60),
    request_key: "AccountOpeningRequest",
    response: pascal(
        "AccountOpeningResponse",
        "Account opening request submitted successfully",
        "Account opening failed",
    ),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        FieldSpec::new("FullName", "Full name", NAME),
        FieldSpec::new("FatherName", "Father name", OPTIONAL_NAME),
        FieldSpec::new("DateOfBirth", "Date of birth", DATE),
        FieldSpec::new("Gender", "Gender", FieldRules::required().one_of(&["M", "F", "T"])),
        personal("MobileNumber", "Mobile number", MOBILE),
        FieldSpec::new("Email", "Email", EMAIL),
        FieldSpec::new(
            "AccountType",
            "Account type",
            FieldRules::required().one_of(&["CURRENT", "SAVINGS", "ASAAN"]),
        ),
        FieldSpec::new("Otp", "Otp", OPTIONAL_OTP),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static ACCOUNT_OPENING_STATUS: OperationSpec = OperationSpec {
    kind: OperationKind::AccountOpeningStatus,
    name: "accountOpeningStatus",
    display_name: "Account opening status",
    action: "fetch account opening status",
    endpoint: "/api/v1/account-opening-status",
    timeout_secs: None,
    request_key: "accountOpeningStatusReq",
    response: pascal(
        "accountOpeningStatusRes",
        "Account opening status fetched successfully",
        "Account opening status request failed",
    ),
    fields: &[
        personal("cnic", "Cnic", CNIC),
        FieldSpec::new(
            "trackingId",
            "Tracking id",
            FieldRules::required().max_length(20).alphanumeric(),
        ),
        trace("traceNo"),
        stamp("dateTime"),
        rrn("rrn"),
    ],
};

static ACCOUNT_STATEMENT: OperationSpec = OperationSpec {
    kind: OperationKind::AccountStatement,
    name: "accountStatement",
    display_name: "Account statement",
    action: "fetch account statement",
    endpoint: "/api/v1/account-statement",
    timeout_secs: Some(60),
    request_key: "AccountStatementRequest",
    response: pascal(
        "AccountStatementResponse",
        "Account statement fetched successfully",
        "Account statement request failed",
    ),
    fields: &[
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("FromDate", "From date", DATE),
        FieldSpec::new("ToDate", "To date", DATE),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static MINI_STATEMENT: OperationSpec = OperationSpec {
    kind: OperationKind::MiniStatement,
    name: "miniStatement",
    display_name: "Mini statement",
    action: "fetch mini statement",
    endpoint: "/api/v1/mini-statement",
    timeout_secs: None,
    request_key: "miniStatementReq",
    response: ResponseShape {
        success_code: Some("000"),
        ..camel(
            "miniStatementRes",
            "Mini statement fetched successfully",
            "Mini statement request failed",
        )
    },
    fields: &[
        FieldSpec::new("accountNumber", "Account number", ACCOUNT_NUMBER),
        trace("traceNo"),
        stamp("dateTime"),
        rrn("rrn"),
    ],
};

static BALANCE_INQUIRY: OperationSpec = OperationSpec {
    kind: OperationKind::BalanceInquiry,
    name: "balanceInquiry",
    display_name: "Balance inquiry",
    action: "fetch balance",
    endpoint: "/api/v1/balance-inquiry",
    timeout_secs: None,
    request_key: "BalanceInquiryRequest",
    response: pascal(
        "BalanceInquiryResponse",
        "Balance fetched successfully",
        "Balance inquiry failed",
    ),
    fields: &[
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        personal("Cnic", "Cnic", OPTIONAL_CNIC),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static TITLE_FETCH: OperationSpec = OperationSpec {
    kind: OperationKind::TitleFetch,
    name: "titleFetch",
    display_name: "Title fetch",
    action: "fetch account title",
    endpoint: "/api/v1/title-fetch",
    timeout_secs: None,
    request_key: "TitleFetchRequest",
    response: pascal("TitleFetchResponse", "Account title fetched successfully", "Title fetch failed"),
    fields: &[
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("BankImd", "Bank IMD", FieldRules::optional().exact_length(&[6]).digits()),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static CUSTOMER_PROFILE: OperationSpec = OperationSpec {
    kind: OperationKind::CustomerProfile,
    name: "customerProfile",
    display_name: "Customer profile",
    action: "fetch customer profile",
    endpoint: "/api/v1/customer-profile",
    timeout_secs: None,
    request_key: "customerProfileReq",
    response: camel(
        "customerProfileRes",
        "Customer profile fetched successfully",
        "Customer profile request failed",
    ),
    fields: &[
        personal("cnic", "Cnic", CNIC),
        personal("mobile", "Mobile", OPTIONAL_MOBILE),
        trace("traceNo"),
        stamp("dateTime"),
        rrn("rrn"),
    ],
};

static MINOR_ACCOUNT_VERIFICATION: OperationSpec = OperationSpec {
    kind: OperationKind::MinorAccountVerification,
    name: "minorAccountVerification",
    display_name: "Minor account verification",
    action: "verify minor account",
    endpoint: "/api/v1/minor-account-verification",
    timeout_secs: None,
    request_key: "MinorAccountVerificationRequest",
    response: pascal(
        "MinorAccountVerificationResponse",
        "Minor account verified successfully",
        "Minor account verification failed",
    ),
    fields: &[
        personal("GuardianCnic", "Guardian cnic", CNIC),
        personal("MinorBForm", "Minor B-Form", CNIC),
        personal("MobileNumber", "Mobile number", MOBILE),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static MINOR_ACCOUNT_OPENING: OperationSpec = OperationSpec {
    kind: OperationKind::MinorAccountOpening,
    name: "minorAccountOpening",
    display_name: "Minor account opening",
    action: "open minor account",
    endpoint: "/api/v1/minor-account-opening",
    timeout_secs: Some(60),
    request_key: "MinorAccountOpeningRequest",
    response: pascal(
        "MinorAccountOpeningResponse",
        "Minor account opening request submitted successfully",
        "Minor account opening failed",
    ),
    fields: &[
        personal("GuardianCnic", "Guardian cnic", CNIC),
        personal("MinorBForm", "Minor B-Form", CNIC),
        FieldSpec::new("MinorName", "Minor name", NAME),
        FieldSpec::new("MinorDateOfBirth", "Minor date of birth", DATE),
        FieldSpec::new(
            "Relationship",
            "Relationship",
            FieldRules::required().one_of(&["FATHER", "MOTHER", "GUARDIAN"]),
        ),
        personal("MobileNumber", "Mobile number", MOBILE),
        FieldSpec::new("Otp", "Otp", OPTIONAL_OTP),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static MINOR_ACCOUNT_CONVERSION: OperationSpec = OperationSpec {
    kind: OperationKind::MinorAccountConversion,
    name: "minorAccountConversion",
    display_name: "Minor account conversion",
    action: "convert minor account",
    endpoint: "/api/v1/minor-account-conversion",
    timeout_secs: Some(60),
    request_key: "MinorAccountConversionRequest",
    response: pascal(
        "MinorAccountConversionResponse",
        "Minor account converted successfully",
        "Minor account conversion failed",
    ),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        personal("MobileNumber", "Mobile number", MOBILE),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static KYC_UPDATE: OperationSpec = OperationSpec {
    kind: OperationKind::KycUpdate,
    name: "kycUpdate",
    display_name: "KYC update",
    action: "update KYC",
    endpoint: "/api/v1/kyc-update",
    timeout_secs: None,
    request_key: "KycUpdateRequest",
    response: pascal("KycUpdateResponse", "KYC updated successfully", "KYC update failed"),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("Occupation", "Occupation", FieldRules::optional().max_length(50)),
        FieldSpec::new("SourceOfIncome", "Source of income", FieldRules::optional().max_length(50)),
        FieldSpec::new("Address", "Address", FieldRules::optional().max_length(150)),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static CNIC_EXPIRY_UPDATE: OperationSpec = OperationSpec {
    kind: OperationKind::CnicExpiryUpdate,
    name: "cnicExpiryUpdate",
    display_name: "CNIC expiry update",
    action: "update CNIC expiry",
    endpoint: "/api/v1/cnic-expiry-update",
    timeout_secs: None,
    request_key: "cnicExpiryUpdateReq",
    response: camel(
        "cnicExpiryUpdateRes",
        "CNIC expiry updated successfully",
        "CNIC expiry update failed",
    ),
    fields: &[
        personal("cnic", "Cnic", CNIC),
        FieldSpec::new("accountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("expiryDate", "Expiry date", DATE),
        FieldSpec::new("issueDate", "Issue date", OPTIONAL_DATE),
        trace("traceNo"),
        stamp("dateTime"),
        rrn("rrn"),
    ],
};

static MOBILE_NUMBER_UPDATE: OperationSpec = OperationSpec {
    kind: OperationKind::MobileNumberUpdate,
    name: "mobileNumberUpdate",
    display_name: "Mobile number update",
    action: "update mobile number",
    endpoint: "/api/v1/mobile-number-update",
    timeout_secs: None,
    request_key: "MobileNumberUpdateRequest",
    response: pascal(
        "MobileNumberUpdateResponse",
        "Mobile number updated successfully",
        "Mobile number update failed",
    ),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        personal("OldMobileNumber", "Old mobile number", MOBILE),
        personal("NewMobileNumber", "New mobile number", MOBILE),
        FieldSpec::new("Otp", "Otp", OTP),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static ACCOUNT_CLOSURE: OperationSpec = OperationSpec {
    kind: OperationKind::AccountClosure,
    name: "accountClosure",
    display_name: "Account closure",
    action: "close account",
    endpoint: "/api/v1/account-closure",
    timeout_secs: Some(60),
    request_key: "AccountClosureRequest",
    response: pascal(
        "AccountClosureResponse",
        "Account closure request submitted successfully",
        "Account closure failed",
    ),
    fields: &[
        personal("Cnic", "Cnic", CNIC),
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("Reason", "Reason", REASON),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

static CHEQUE_BOOK_REQUEST: OperationSpec = OperationSpec {
    kind: OperationKind::ChequeBookRequest,
    name: "chequeBookRequest",
    display_name: "Cheque book request",
    action: "request cheque book",
    endpoint: "/api/v1/cheque-book-request",
    timeout_secs: None,
    request_key: "ChequeBookRequest",
    response: pascal(
        "ChequeBookResponse",
        "Cheque book request submitted successfully",
        "Cheque book request failed",
    ),
    fields: &[
        FieldSpec::new("AccountNumber", "Account number", ACCOUNT_NUMBER),
        FieldSpec::new("Leaves", "Leaves", FieldRules::required().one_of(&["10", "25", "50"])),
        FieldSpec::new(
            "DeliveryMode",
            "Delivery mode",
            FieldRules::required().one_of(&["BRANCH", "COURIER"]),
        )
        .with_default(FieldDefault::Literal("BRANCH")),
        FieldSpec::new("RequestDate", "Request date", OPTIONAL_DATE)
            .with_default(FieldDefault::Timestamp(DATE_FORMAT)),
        trace("TraceNo"),
        stamp("DateTime"),
        rrn("Rrn"),
    ],
};

pub(super) fn spec_for(kind: OperationKind) -> &'static OperationSpec {
    match kind {
        OperationKind::AccountInfo => &ACCOUNT_INFO,
        OperationKind::VerifyAccount => &VERIFY_ACCOUNT,
        OperationKind::LinkAccount => &LINK_ACCOUNT,
        OperationKind::UnlinkAccount => &UNLINK_ACCOUNT,
        OperationKind::GenerateOtp => &GENERATE_OTP,
        OperationKind::AccountOpening => &ACCOUNT_OPENING,
        OperationKind::AccountOpeningStatus => &ACCOUNT_OPENING_STATUS,
        OperationKind::AccountStatement => &ACCOUNT_STATEMENT,
        OperationKind::MiniStatement => &MINI_STATEMENT,
        OperationKind::BalanceInquiry => &BALANCE_INQUIRY,
        OperationKind::TitleFetch => &TITLE_FETCH,
        OperationKind::CustomerProfile => &CUSTOMER_PROFILE,
        OperationKind::MinorAccountVerification => &MINOR_ACCOUNT_VERIFICATION,
        OperationKind::MinorAccountOpening => &MINOR_ACCOUNT_OPENING,
        OperationKind::MinorAccountConversion => &MINOR_ACCOUNT_CONVERSION,
        OperationKind::KycUpdate => &KYC_UPDATE,
        OperationKind::CnicExpiryUpdate => &CNIC_EXPIRY_UPDATE,
        OperationKind::MobileNumberUpdate => &MOBILE_NUMBER_UPDATE,
        OperationKind::AccountClosure => &ACCOUNT_CLOSURE,
        OperationKind::ChequeBookRequest => &CHEQUE_BOOK_REQUEST,
    }
}
