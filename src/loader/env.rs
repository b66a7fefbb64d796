use toml::{Table, Value};

use super::source::SettingsSource;
use super::LoadError;

/// Prefix of environment variables read by [`EnvSource::default`].
pub const ENV_PREFIX: &str = "LAYERSET_";

/// Settings taken from environment variables starting with a prefix.
///
/// The prefix is stripped once and the remainder is used verbatim as the key.
/// Values stay strings. Written at priority `env`.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    /// Reads the process environment when loaded.
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        assert!(!prefix.is_empty(), "prefix must not be empty");
        Self { prefix, vars: None }
    }

    /// Reads from `vars` instead of the process environment.
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: Some(
                vars.into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            ),
            ..Self::new(prefix)
        }
    }

    fn table_from(&self, vars: impl Iterator<Item = (String, String)>) -> Table {
        vars.filter_map(|(key, value)| {
            key.strip_prefix(&self.prefix)
                .filter(|name| !name.is_empty())
                .map(|name| (name.to_string(), Value::String(value)))
        })
        .collect()
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new(ENV_PREFIX)
    }
}

impl SettingsSource for EnvSource {
    fn priority(&self) -> &str {
        "env"
    }

    fn load(&self) -> Result<Option<Value>, LoadError> {
        let table = match &self.vars {
            Some(vars) => self.table_from(vars.iter().cloned()),
            None => self.table_from(std::env::vars()),
        };
        Ok(Some(Value::Table(table)))
    }
}
