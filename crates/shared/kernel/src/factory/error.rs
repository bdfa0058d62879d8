use crate::config::ConfigError;
use appwire_injector::{BoxError, InjectError};
use std::borrow::Cow;

/// Errors raised while building an application.
#[appwire_derive::wire_error]
pub enum FactoryError {
    #[error("Configuration failed{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Shell configuration failed{}: {source}", format_context(.context))]
    Configure { source: BoxError, context: Option<Cow<'static, str>> },

    /// A loader failed; its error is kept untouched as the source.
    #[error("Loader `{loader}` failed{}: {source}", format_context(.context))]
    Loader { loader: &'static str, source: BoxError, context: Option<Cow<'static, str>> },

    #[error("Dependency registration failed{}: {source}", format_context(.context))]
    Inject { source: InjectError, context: Option<Cow<'static, str>> },
}
