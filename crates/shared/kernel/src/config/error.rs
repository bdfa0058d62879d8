use std::borrow::Cow;

/// Errors raised while materializing or describing a configuration.
#[appwire_derive::wire_error]
pub enum ConfigError {
    /// Required fields without a value and without a default, in declared order.
    #[error("Missing configuration{}: {}", format_context(.context), join_keys(.keys))]
    MissingConfiguration { keys: Vec<&'static str>, context: Option<Cow<'static, str>> },

    /// A value (or default) could not be parsed into the field type.
    #[error("Invalid value for `{key}`{}: {message}", format_context(.context))]
    InvalidValue {
        key: &'static str,
        message: Cow<'static, str>,
        context: Option<Cow<'static, str>>,
    },

    #[error("Config source error{}: {source}", format_context(.context))]
    Source { source: config::ConfigError, context: Option<Cow<'static, str>> },

    #[error("Config serialization failed{}: {source}", format_context(.context))]
    Serialize { source: serde_json::Error, context: Option<Cow<'static, str>> },
}

fn join_keys(keys: &[&'static str]) -> String {
    keys.join(", ")
}
