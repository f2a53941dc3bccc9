//! Reply interpretation and failure normalization

pub mod mapper;
pub mod normalizer;

pub use mapper::{map_response, parse_error_envelope, ErrorEnvelope, Mapped};
pub use normalizer::normalize;
