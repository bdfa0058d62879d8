//! Typed configuration schemas.
//!
//! A schema is a plain struct deriving [`Settings`](crate::Settings). Each field is one key,
//! looked up verbatim in a [`Source`] and parsed with the field type's `FromStr`:
//!
//! 1. the source value, if present;
//! 2. else the declared default, parsed the same way;
//! 3. else `None` for `Option<T>` fields;
//! 4. else the field is missing.
//!
//! Loading is all-or-nothing. Every field is checked, in declared order, before anything
//! is parsed, and a single [`ConfigError::MissingConfiguration`] lists all missing keys.

mod error;
mod field;
mod source;

pub use error::{ConfigError, ConfigErrorExt};
pub use field::{read, read_optional, to_value};
pub use source::{EnvSource, LayeredSource, LayeredSourceBuilder, Source};

use appwire_domain::settings::{FieldSpec, REDACTED};
use serde_json::Value;
use std::any::type_name;
use tracing::{debug, warn};

/// Serialized form of a configuration, keyed by lookup key.
pub type ConfigMap = serde_json::Map<String, Value>;

/// A configuration record that can be materialized from a [`Source`].
///
/// Implemented by `#[derive(Settings)]`; writing it by hand is possible but rarely useful.
pub trait ConfigSchema: Sized + Send + Sync + 'static {
    /// Declared fields, in declaration order.
    fn fields() -> &'static [FieldSpec];

    /// Builds the record, reading each field from `source`.
    ///
    /// # Errors
    /// Fails on the first missing or unparsable field. Use [`load_from_source`] for an
    /// aggregated report.
    fn from_source(source: &dyn Source) -> Result<Self, ConfigError>;

    /// The record as a JSON object keyed by lookup key.
    ///
    /// # Errors
    /// [`ConfigError::Serialize`] when a field value is not representable.
    fn to_map(&self) -> Result<ConfigMap, ConfigError>;

    /// Like [`ConfigSchema::to_map`], with secret fields masked.
    ///
    /// # Errors
    /// See [`ConfigSchema::to_map`].
    fn redacted(&self) -> Result<ConfigMap, ConfigError> {
        let mut map = self.to_map()?;
        for field in Self::fields().iter().filter(|f| f.is_secret()) {
            if let Some(value) = map.get_mut(field.name).filter(|v| !v.is_null()) {
                *value = Value::String(REDACTED.to_owned());
            }
        }
        Ok(map)
    }
}

/// Loads `C` from the process environment.
///
/// # Errors
/// See [`load_from_source`].
///
/// # Example
/// ```rust
/// use appwire_kernel::Settings;
/// use appwire_kernel::config::{ConfigError, load_from_env};
///
/// #[derive(Debug, Settings)]
/// struct Probe {
///     #[setting(default = "127.0.0.1")]
///     probe_host: String,
/// }
///
/// let probe: Result<Probe, ConfigError> = load_from_env();
/// assert!(probe.is_ok());
/// ```
pub fn load_from_env<C: ConfigSchema>() -> Result<C, ConfigError> {
    load_from_source(&EnvSource)
}

/// Loads `C` from `source`.
///
/// # Errors
/// [`ConfigError::MissingConfiguration`] listing every required key without a value, or
/// [`ConfigError::InvalidValue`] for the first value that does not parse.
pub fn load_from_source<C: ConfigSchema>(source: &dyn Source) -> Result<C, ConfigError> {
    let missing = missing_fields(C::fields(), source);
    if !missing.is_empty() {
        warn!(schema = type_name::<C>(), missing = ?missing, "Required configuration is missing");
        return Err(ConfigError::MissingConfiguration { keys: missing, context: None });
    }

    let config = C::from_source(source)?;
    debug!(schema = type_name::<C>(), fields = C::fields().len(), "Configuration loaded");
    Ok(config)
}

/// Keys of required fields that `source` cannot answer, in declared order.
///
/// A value that exists but is not valid UTF-8 is not missing; reading it fails instead.
#[must_use]
pub fn missing_fields(fields: &[FieldSpec], source: &dyn Source) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|field| field.is_required() && field.default.is_none())
        .filter(|field| matches!(source.get_os(field.name), Ok(None)))
        .map(|field| field.name)
        .collect()
}

/// The redacted form of `config`, for logs.
///
/// # Errors
/// See [`ConfigSchema::to_map`].
pub fn describe<C: ConfigSchema>(config: &C) -> Result<ConfigMap, ConfigError> {
    config.redacted()
}
