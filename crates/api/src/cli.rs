//! `finswitch` command line

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use finswitch_core::OperationKind;
use finswitch_domain::AdapterConfig;
use finswitch_infra::{config, LogFormat};
use tracing::{info, warn};

use crate::context::{AppContext, Storage};

/// Falls back to this when `--database` is not given
pub const DB_PATH_ENV: &str = "FINSWITCH_DB_PATH";

/// Financial switch client
#[derive(Debug, Parser)]
#[command(name = "finswitch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log output format (`pretty` or `json`)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    /// SQLite file for transactions and audit entries; in-memory when absent
    #[arg(long, global = true)]
    pub database: Option<PathBuf>,

    /// Config file (TOML or JSON); environment and default file locations otherwise
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the supported operations with their endpoints and fields
    Operations,

    /// Execute one operation and print its result as JSON
    Run {
        /// Operation name, e.g. `accountInfo` or `link-account`
        operation: OperationKind,

        /// Request field as `key=value`; repeatable
        #[arg(short, long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// Check that configuration loads and the database answers
    Health,
}

/// Split `key=value` at the first `=`; the value may be empty or contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw.split_once('=').ok_or_else(|| format!("expected key=value, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("field name missing in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Run the parsed command, writing its output to `out`.
///
/// Returns whether the command succeeded. A business or transport failure
/// still prints the record and returns `false`; `Err` is kept for
/// configuration, storage and I/O problems.
pub async fn run(cli: Cli, out: &mut dyn Write) -> anyhow::Result<bool> {
    match cli.command {
        Command::Operations => {
            write_operations(out)?;
            Ok(true)
        }
        Command::Run { operation, fields } => {
            let context = build_context(cli.config, cli.database)?;
            let record = context.execute(operation, fields).await;
            if !record.success {
                warn!(
                    operation = %operation,
                    error_code = record.error_code.as_deref().unwrap_or_default(),
                    "operation did not succeed"
                );
            }

            serde_json::to_writer_pretty(&mut *out, &record)?;
            writeln!(out)?;
            Ok(record.success)
        }
        Command::Health => {
            let context = build_context(cli.config, cli.database)?;
            context.health_check().await.context("database health check failed")?;
            writeln!(out, "ok")?;
            Ok(true)
        }
    }
}

fn write_operations(out: &mut dyn Write) -> std::io::Result<()> {
    for kind in OperationKind::ALL {
        let spec = kind.spec();
        let fields: Vec<&str> = spec.fields.iter().map(|field| field.key).collect();
        writeln!(out, "{:<26} {:<40} {}", spec.name, spec.endpoint, fields.join(","))?;
    }
    Ok(())
}

fn build_context(config_path: Option<PathBuf>, database: Option<PathBuf>) -> anyhow::Result<AppContext> {
    let config = load_config(config_path)?;
    let storage = match database.or_else(|| std::env::var_os(DB_PATH_ENV).map(PathBuf::from)) {
        Some(path) => {
            info!(path = %path.display(), "using file-backed storage");
            Storage::file(path)
        }
        None => Storage::Memory,
    };
    AppContext::new(config, storage).context("failed to initialise application context")
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<AdapterConfig> {
    match path {
        Some(path) => {
            let loaded = config::load_from_file(Some(path)).context("failed to read config file")?;
            config::validate(&loaded).context("invalid configuration")?;
            Ok(loaded)
        }
        None => config::load().context("failed to load configuration"),
    }
}
