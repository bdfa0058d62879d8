#![allow(clippy::print_stdout)]

use anyhow::Context;
use appwire::injector::Injector;
use appwire::kernel::factory::AppFactory;
use appwire::logger::{LogSettings, Logger};
use appwire_worker::WorkerFactory;
use appwire_worker::cli::Cli;
use clap::Parser;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = LogSettings::from_env().context("Critical: Logging configuration is malformed")?;
    let _log = Logger::from_settings(env!("CARGO_PKG_NAME"), &settings)?;

    let injector = Injector::new();
    let app = WorkerFactory::new(cli.config)
        .create(env!("CARGO_PKG_NAME"), None, Some(&injector))
        .context("Critical: Application bootstrap failed")?;

    info!(task = %cli.task, "Running task");
    let output = app.run(&injector, &cli.task, cli.payload)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
