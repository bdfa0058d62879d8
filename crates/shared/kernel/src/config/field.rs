use crate::config::{ConfigError, Source};
use appwire_domain::settings::FieldSpec;
use serde::Serialize;
use serde_json::Value;
use std::any::type_name;
use std::fmt::Display;
use std::str::FromStr;

/// Reads a non-optional field: the source value, else the default.
///
/// # Errors
/// [`ConfigError::MissingConfiguration`] when neither exists,
/// [`ConfigError::InvalidValue`] when parsing fails.
pub fn read<T>(source: &dyn Source, field: &FieldSpec) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    read_optional(source, field)?
        .ok_or(ConfigError::MissingConfiguration { keys: vec![field.name], context: None })
}

/// Reads an optional field: `None` when neither a source value nor a default exists.
///
/// # Errors
/// [`ConfigError::InvalidValue`] when the value is not valid UTF-8 or parsing fails.
pub fn read_optional<T>(source: &dyn Source, field: &FieldSpec) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = source.get_os(field.name).map_err(|raw| {
        let lossy = raw.to_string_lossy();
        ConfigError::InvalidValue {
            key: field.name,
            message: format!("{:?} is not valid unicode", field.display_value(&lossy)).into(),
            context: None,
        }
    })?;

    match value {
        Some(raw) => parse(field, &raw).map(Some),
        None => field.default.map(|raw| parse(field, raw)).transpose(),
    }
}

fn parse<T>(field: &FieldSpec, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse::<T>().map_err(|err| ConfigError::InvalidValue {
        key: field.name,
        message: format!(
            "cannot parse {:?} as {}: {err}",
            field.display_value(raw),
            type_name::<T>()
        )
        .into(),
        context: None,
    })
}

/// Serializes one field value for [`ConfigMap`](crate::config::ConfigMap).
///
/// # Errors
/// [`ConfigError::Serialize`] when the value cannot be represented as JSON.
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value, ConfigError> {
    Ok(serde_json::to_value(value)?)
}
