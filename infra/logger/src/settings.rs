use crate::builder::{LogFormat, Logger};
use crate::error::LoggerError;
use appwire_kernel::Settings;
use appwire_kernel::config::{ConfigSchema, Source, load_from_env, load_from_source};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Logging settings read from `LOG_*` variables.
#[derive(Debug, Clone, PartialEq, Eq, Settings)]
pub struct LogSettings {
    /// Default level: `trace`, `debug`, `info`, `warn`, `error` or `off`.
    #[setting(rename = "LOG_LEVEL", default = "info")]
    pub level: String,

    #[setting(rename = "LOG_JSON", default = "false")]
    pub json: bool,

    /// Directory for rolling log files; console only when unset.
    #[setting(rename = "LOG_DIR")]
    pub dir: Option<PathBuf>,

    /// Module directives, e.g. `appwire=debug,tower_http=info`.
    #[setting(rename = "LOG_FILTER")]
    pub filter: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self { level: "info".into(), json: false, dir: None, filter: None }
    }
}

impl LogSettings {
    /// Reads the settings from the process environment.
    ///
    /// # Errors
    /// [`LoggerError::Settings`] when a variable does not parse.
    pub fn from_env() -> Result<Self, LoggerError> {
        Ok(load_from_env()?)
    }

    /// # Errors
    /// [`LoggerError::Settings`] when a value does not parse.
    pub fn from_source(source: &dyn Source) -> Result<Self, LoggerError> {
        Ok(load_from_source(source)?)
    }

    /// The parsed default level.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an unknown level name.
    pub fn level_filter(&self) -> Result<LevelFilter, LoggerError> {
        self.level.parse::<LevelFilter>().map_err(|err| LoggerError::InvalidConfiguration {
            message: format!("Unknown log level '{}': {err}", self.level).into(),
            context: Some(<Self as ConfigSchema>::fields()[0].name.into()),
        })
    }

    #[must_use]
    pub const fn format(&self) -> LogFormat {
        if self.json { LogFormat::Json } else { LogFormat::Compact }
    }
}

impl Logger {
    /// Installs the global subscriber as described by `settings`.
    ///
    /// # Errors
    /// See [`LogSettings::level_filter`] and [`LoggerBuilder::init`](crate::LoggerBuilder::init).
    pub fn from_settings(name: &str, settings: &LogSettings) -> Result<Self, LoggerError> {
        let mut builder =
            Self::builder().name(name).level(settings.level_filter()?).format(settings.format());
        if let Some(filter) = &settings.filter {
            builder = builder.env_filter(filter.as_str());
        }

        match &settings.dir {
            Some(dir) => builder.path(dir).init(),
            None => builder.init(),
        }
    }
}
