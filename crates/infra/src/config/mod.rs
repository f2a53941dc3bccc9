//! Configuration loading
//!
//! Loads `AdapterConfig` from environment variables and files.

pub mod loader;

pub use loader::{find_config_file, load, load_from_env, load_from_file, validate};
