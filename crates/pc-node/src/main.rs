//! # Provenance Node
//!
//! Runs one `invoke` or `query` call against a file-backed ledger.
//!
//! ## Usage
//!
//! ```bash
//! pc-node invoke init
//! pc-node invoke createItem I1 MANUFACTURER 8801 2016-05-01 Shenzhen
//! pc-node invoke transferOwnership I1 MANUFACTURER 2016-05-03 "Port Klang" R1
//! pc-node query getItemDetailsWithID I1 --pretty
//! ```
//!
//! ## Environment Variables
//!
//! - `PC_DATA_DIR`: ledger directory (default `./data`)
//! - `PC_STORE_FILE`: ledger file name (default `provenance.ledger`)
//! - `PC_LOG`: log filter (default `info`); `RUST_LOG` takes precedence
//!   unless `--log-level` is given
//!
//! Query payloads go to stdout. Logs and errors go to stderr; a rejected
//! call prints its `{kind, message}` error as JSON and exits with status 1.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use pc_node::{execute, load_config, LedgerCall, NodeConfig, RunError};

/// Provenance Node: chain-of-custody ledger for physical goods
#[derive(Parser, Debug)]
#[command(name = "pc-node")]
#[command(about = "Run invoke and query calls against an item provenance ledger")]
struct Args {
    /// Ledger directory (overrides PC_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Ledger file name inside the data directory (overrides PC_STORE_FILE)
    #[arg(long, global = true)]
    store_file: Option<String>,

    /// Log filter, e.g. `debug` or `pc_01_item_provenance=trace` (overrides PC_LOG)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Pretty-print JSON query output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a mutating function (init, createItem, transferOwnership, ...)
    Invoke {
        function: String,
        /// Positional arguments, in order
        args: Vec<String>,
    },
    /// Run a read-only function (getItemDetailsWithID, getCurrentOwnerItems, ...)
    Query {
        function: String,
        /// Positional arguments, in order
        args: Vec<String>,
    },
}

impl Args {
    fn apply_to(&self, mut config: NodeConfig) -> NodeConfig {
        if let Some(dir) = &self.data_dir {
            config.data_dir = dir.clone();
        }
        if let Some(file) = &self.store_file {
            config.store_file = file.clone();
        }
        if let Some(level) = &self.log_level {
            config.log_filter = level.clone();
        }
        config
    }

    fn into_call(self) -> LedgerCall {
        match self.command {
            Command::Invoke { function, args } => LedgerCall::Invoke { function, args },
            Command::Query { function, args } => LedgerCall::Query { function, args },
        }
    }
}

fn init_logging(config: &NodeConfig, explicit: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) if !explicit => filter,
        _ => EnvFilter::try_new(&config.log_filter)
            .with_context(|| format!("invalid log filter {:?}", config.log_filter))?,
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;
    Ok(())
}

fn render(payload: &[u8], pretty: bool) -> Result<String> {
    if !pretty {
        return Ok(String::from_utf8_lossy(payload).into_owned());
    }
    let value: serde_json::Value =
        serde_json::from_slice(payload).context("query returned invalid JSON")?;
    Ok(serde_json::to_string_pretty(&value)?)
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    // Load configuration: defaults, then environment, then flags
    let config = args.apply_to(load_config());
    init_logging(&config, args.log_level.is_some())?;
    config.validate().context("invalid node configuration")?;

    let pretty = args.pretty;
    let call = args.into_call();

    match execute(&config, &call) {
        Ok(payload) => {
            if !payload.is_empty() {
                println!("{}", render(&payload, pretty)?);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(RunError::Dispatch(err)) => {
            tracing::error!("{} rejected: {}", call.function(), err);
            eprintln!(
                "{}",
                serde_json::to_string(&err).context("failed to encode error")?
            );
            Ok(ExitCode::FAILURE)
        }
        Err(err @ RunError::Store(_)) => Err(err)
            .with_context(|| format!("cannot open {}", config.store_path().display())),
    }
}
