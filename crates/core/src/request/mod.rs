//! Request construction: validated records and the outbound envelope

pub mod builder;
pub mod record;

pub use builder::{
    build_request, envelope, resolve_route, OutboundRequest, Route, HEADER_ACCEPT,
    HEADER_CLIENT_ID, HEADER_CLIENT_SECRET, HEADER_CONTENT_TYPE, HEADER_ORGANIZATION_ID,
};
pub use record::{generate_trace_number, RequestRecord};
