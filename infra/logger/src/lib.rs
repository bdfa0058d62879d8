//! # Logger
//!
//! Console and rolling-file logging on top of `tracing-subscriber`, configured either
//! through [`Logger::builder`] or from `LOG_*` environment settings.
//!
//! * `LOG_LEVEL` - default level (`info`).
//! * `LOG_JSON` - JSON output for every layer (`false`).
//! * `LOG_DIR` - directory for daily rolling files; console only when unset.
//! * `LOG_FILTER` - module directives; `RUST_LOG` applies when unset.
//!
//! ## Example
//!
//! ```rust
//! use appwire_logger::{LogSettings, Logger};
//!
//! let settings = LogSettings::default();
//! let _logger = Logger::from_settings("my-app", &settings).unwrap();
//! ```

mod builder;
mod error;
mod settings;

pub use crate::builder::{LogFormat, Logger, LoggerBuilder, NoFile, NoName, WithFile, WithName};
pub use crate::error::{LoggerError, LoggerErrorExt};
pub use crate::settings::LogSettings;
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;
