use std::borrow::Cow;

use toml::{Table, Value};

use super::source::SettingsSource;
use super::LoadError;

const BUILTIN_DEFAULTS: &str = include_str!("../defaults.toml");

/// Built-in defaults, written at priority `default`.
///
/// The defaults are a TOML document; only its upper-case keys (constant
/// names such as `LOG_LEVEL`) are taken, everything else is ignored.
#[derive(Debug, Clone)]
pub struct DefaultsSource {
    document: Cow<'static, str>,
}

impl DefaultsSource {
    /// The defaults shipped with the crate.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_DEFAULTS)
    }

    pub fn new(document: impl Into<Cow<'static, str>>) -> Self {
        Self {
            document: document.into(),
        }
    }
}

impl Default for DefaultsSource {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SettingsSource for DefaultsSource {
    fn priority(&self) -> &str {
        "default"
    }

    fn load(&self) -> Result<Option<Value>, LoadError> {
        let table: Table = toml::from_str(&self.document).map_err(LoadError::DefaultsError)?;
        let constants: Table = table
            .into_iter()
            .filter(|(key, _)| is_constant_name(key))
            .collect();
        Ok(Some(Value::Table(constants)))
    }
}

/// True if `name` has at least one cased character and no lower-case ones.
fn is_constant_name(name: &str) -> bool {
    name.chars().any(char::is_uppercase) && !name.chars().any(char::is_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_constant_name() {
        assert!(is_constant_name("LOG_LEVEL"));
        assert!(is_constant_name("V2"));
        assert!(!is_constant_name("log_level"));
        assert!(!is_constant_name("Log_Level"));
        assert!(!is_constant_name("_42"));
    }

    #[test]
    fn test_only_constants_loaded() {
        let source = DefaultsSource::new("NAME = \"app\"\nhelper = 1\nTIMEOUT = 30\n");
        let value = source.load().unwrap().unwrap();
        let table = value.as_table().unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table["NAME"].as_str(), Some("app"));
        assert_eq!(table["TIMEOUT"].as_integer(), Some(30));
        assert!(!table.contains_key("helper"));
    }

    #[test]
    fn test_builtin_defaults() {
        let source = DefaultsSource::builtin();
        let value = source.load().unwrap().unwrap();

        assert_eq!(source.priority(), "default");
        assert_eq!(value["LOG_LEVEL"].as_str(), Some("info"));
    }

    #[test]
    fn test_invalid_defaults() {
        let source = DefaultsSource::new("NAME = ");
        assert!(matches!(source.load(), Err(LoadError::DefaultsError(_))));
    }
}
