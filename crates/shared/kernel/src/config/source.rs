use crate::config::ConfigError;
use crate::config::error::ConfigErrorExt;
use config::{Config, Environment, File};
use fxhash::FxHashMap;
use std::collections::{BTreeMap, HashMap};
use std::env;
use std::ffi::OsString;
use std::hash::BuildHasher;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// A flat, string-valued key lookup that configuration is read from.
pub trait Source: Send + Sync {
    /// Returns the raw value stored under `key`, verbatim.
    fn get(&self, key: &str) -> Option<String>;

    /// Like [`Source::get`], but a value that exists without being valid UTF-8 comes
    /// back as the error.
    ///
    /// # Errors
    /// The raw value when it is not valid UTF-8.
    fn get_os(&self, key: &str) -> Result<Option<String>, OsString> {
        Ok(self.get(key))
    }
}

/// The process environment. Keys are variable names, read as-is.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl Source for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        self.get_os(key).ok().flatten()
    }

    fn get_os(&self, key: &str) -> Result<Option<String>, OsString> {
        env::var_os(key).map(OsString::into_string).transpose()
    }
}

impl<S: BuildHasher + Send + Sync> Source for HashMap<String, String, S> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

impl Source for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }
}

impl<T: Source + ?Sized> Source for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn get_os(&self, key: &str) -> Result<Option<String>, OsString> {
        (**self).get_os(key)
    }
}

/// A configuration file overlaid by prefixed environment variables.
///
/// Keys are matched case-insensitively: `APP_DATABASE_URL` and `database_url = ".."`
/// in the file both answer the `database_url` field. Only scalar values are kept.
#[derive(Debug, Clone, Default)]
pub struct LayeredSource {
    values: FxHashMap<String, String>,
}

impl LayeredSource {
    #[must_use]
    pub fn builder() -> LayeredSourceBuilder {
        LayeredSourceBuilder::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Source for LayeredSource {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(&key.to_lowercase()).cloned()
    }
}

/// Builder for [`LayeredSource`]. Later layers win: file, then environment, then overrides.
#[derive(Debug, Default)]
#[must_use]
pub struct LayeredSourceBuilder {
    file: Option<(PathBuf, bool)>,
    env_prefix: Option<String>,
    env_vars: Option<HashMap<String, String>>,
    overrides: Vec<(String, String)>,
}

impl LayeredSourceBuilder {
    /// A file that must exist. The format follows the extension (`.toml`, `.json`).
    pub fn file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some((path.as_ref().to_path_buf(), true));
        self
    }

    /// A file that is skipped when absent.
    pub fn optional_file(mut self, path: impl AsRef<Path>) -> Self {
        self.file = Some((path.as_ref().to_path_buf(), false));
        self
    }

    /// Overlays environment variables named `{prefix}_{KEY}`.
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Reads the prefixed variables from `vars` instead of the process environment.
    pub fn env_vars(mut self, vars: HashMap<String, String>) -> Self {
        self.env_vars = Some(vars);
        self
    }

    /// Sets a value on top of every other layer.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.push((key.into(), value.into()));
        self
    }

    /// Reads every layer and flattens the result.
    ///
    /// # Errors
    /// Returns [`ConfigError::Source`] when a required file is missing or a layer cannot
    /// be parsed.
    pub fn build(self) -> Result<LayeredSource, ConfigError> {
        let mut builder = Config::builder();

        if let Some((path, required)) = &self.file {
            info!(path = %path.display(), required, "Loading config file");
            builder = builder.add_source(File::from(path.as_path()).required(*required));
        }

        if let Some(prefix) = &self.env_prefix {
            builder = builder.add_source(
                Environment::with_prefix(prefix).prefix_separator("_").source(self.env_vars.clone()),
            );
        }

        for (key, value) in self.overrides {
            builder = builder
                .set_override(key.to_lowercase(), value)
                .context("Failed to apply config override")?;
        }

        let table = builder
            .build()
            .context("Failed to build config")?
            .try_deserialize::<HashMap<String, config::Value>>()
            .context("Failed to read config table")?;

        let values: FxHashMap<_, _> = table
            .into_iter()
            .filter_map(|(key, value)| value.into_string().ok().map(|v| (key.to_lowercase(), v)))
            .collect();

        debug!(keys = values.len(), "Layered config source ready");
        Ok(LayeredSource { values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_sources_return_values_verbatim() {
        let map = HashMap::from([("port".to_owned(), " 8080 ".to_owned())]);
        assert_eq!(Source::get(&map, "port").as_deref(), Some(" 8080 "));
        assert_eq!(Source::get(&map, "PORT"), None);

        let tree = BTreeMap::from([("name".to_owned(), "demo".to_owned())]);
        assert_eq!(Source::get(&tree, "name").as_deref(), Some("demo"));
    }

    #[test]
    fn test_overrides_are_case_insensitive() {
        let source = LayeredSource::builder().set("API_TOKEN", "t0ken").build().unwrap();
        assert_eq!(source.get("api_token").as_deref(), Some("t0ken"));
        assert_eq!(source.get("API_TOKEN").as_deref(), Some("t0ken"));
    }
}
