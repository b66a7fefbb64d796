use toml::{Table, Value};

use super::source::SettingsSource;
use super::LoadError;

/// Settings passed as `key=value` command-line arguments, written at
/// priority `cmd`.
///
/// Arguments are split on the first `=`; values stay strings. When a key is
/// given more than once the last occurrence is kept.
#[derive(Debug, Clone, Default)]
pub struct ArgsSource {
    args: Vec<String>,
}

impl ArgsSource {
    pub fn new<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl SettingsSource for ArgsSource {
    fn priority(&self) -> &str {
        "cmd"
    }

    fn load(&self) -> Result<Option<Value>, LoadError> {
        if self.args.is_empty() {
            return Ok(None);
        }
        let mut table = Table::new();
        for arg in &self.args {
            let (key, value) = parse_setting(arg)?;
            table.insert(key.to_string(), Value::String(value.to_string()));
        }
        Ok(Some(Value::Table(table)))
    }
}

/// Splits a `key=value` argument.
pub fn parse_setting(arg: &str) -> Result<(&str, &str), LoadError> {
    match arg.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key, value)),
        _ => Err(LoadError::MalformedArgument(arg.to_string())),
    }
}
