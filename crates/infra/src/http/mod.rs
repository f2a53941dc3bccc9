//! HTTP adapters: retrying client, switch transport and token fetch

pub mod auth;
pub mod client;
pub mod transport;

pub use auth::HttpAuthenticator;
pub use client::{HttpClient, HttpClientBuilder};
pub use transport::ReqwestTransport;
