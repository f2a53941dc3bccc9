//! Bearer credential handling

pub mod token_cache;

pub use token_cache::TokenCache;
