//! # CLI Argument Definitions

use clap::Parser;
use serde_json::Value;
use std::path::PathBuf;

/// Runs one task of the demo worker and prints its JSON output.
#[derive(Debug, Parser)]
#[command(name = "appwire-worker")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(arg_required_else_help = true)]
#[command(about = "Run a task of the appwire demo worker")]
pub struct Cli {
    /// Name of the task to run
    pub task: String,

    /// JSON payload handed to the task
    #[arg(long, value_parser = parse_json, default_value = "null")]
    pub payload: Value,

    /// Optional TOML or JSON file layered under `WORKER_*` variables
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_json(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}
