//! # FinSwitch App
//!
//! Application layer - wiring and the `finswitch` command line.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - The clap CLI that runs one operation and prints its result
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the gateway's ports to their infrastructure adapters

pub mod cli;
pub mod context;

pub use cli::{run, Cli, Command};
pub use context::{AppContext, Storage};
