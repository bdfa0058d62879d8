use anyhow::Context;
use appwire::logger::{LogSettings, Logger};
use appwire_server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = LogSettings::from_env().context("Critical: Logging configuration is malformed")?;
    let _log = Logger::from_settings(env!("CARGO_PKG_NAME"), &settings)?;

    Server::builder().build().context("Critical: Application bootstrap failed")?.run().await
}
