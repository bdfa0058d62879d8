use std::net::IpAddr;

/// Settings of the demo server, read from plain environment variables.
#[derive(Debug, Clone, PartialEq, Eq, appwire::Settings)]
#[setting(crate = "appwire::kernel")]
pub struct ServerConfig {
    #[setting(rename = "ADDRESS", default = "127.0.0.1")]
    pub address: IpAddr,

    #[setting(rename = "PORT", default = "4583")]
    pub port: u16,

    #[setting(rename = "GREETING", default = "Hello")]
    pub greeting: String,

    /// Shown masked by `/config`.
    #[setting(rename = "ADMIN_TOKEN", secret)]
    pub admin_token: Option<String>,
}
