//! File-based settings source.

use std::path::{Path, PathBuf};

use toml::Value;
use tracing::{debug, info, warn};

use super::source::SettingsSource;
use super::LoadError;

/// File name of the per-user settings file, relative to the home directory.
pub const USER_SETTINGS_FILE: &str = ".layerset.yaml";

/// A settings source that loads from a YAML or TOML file.
///
/// Files ending in `.yaml` or `.yml` are parsed as YAML, anything else as
/// TOML. Files can be marked as required or optional. Required files that
/// don't exist cause an error; optional files that don't exist are skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
    priority: String,
}

impl FileSource {
    /// Creates a new file source whose settings are written at `priority`.
    pub fn new(path: impl AsRef<Path>, required: bool, priority: impl Into<String>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
            priority: priority.into(),
        }
    }

    /// The optional per-user file `~/.layerset.yaml`, at priority `user`.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn user() -> Option<Self> {
        dirs::home_dir().map(|home| Self::new(home.join(USER_SETTINGS_FILE), false, "user"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsSource for FileSource {
    fn priority(&self) -> &str {
        &self.priority
    }

    fn load(&self) -> Result<Option<Value>, LoadError> {
        load_settings_file(&self.path, self.required)
    }
}

/// Loads and parses a settings file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false, or if
/// the file is empty.
fn load_settings_file(path: &Path, required: bool) -> Result<Option<Value>, LoadError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            if required {
                return Err(LoadError::FileNotFound(path.to_path_buf()));
            }
            info!(path = %path.display(), "settings file does not exist");
            return Ok(None);
        }
        Err(e) => {
            return Err(LoadError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    if contents.trim().is_empty() {
        debug!(path = %path.display(), "settings file is empty");
        return Ok(None);
    }

    if is_yaml(path) {
        let yaml: serde_yaml::Value =
            serde_yaml::from_str(&contents).map_err(|e| LoadError::YamlError {
                path: path.to_path_buf(),
                source: e,
            })?;
        return Ok(from_yaml(yaml));
    }

    let table = toml::from_str(&contents).map_err(|e| LoadError::TomlError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(Some(Value::Table(table)))
}

/// Converts a YAML value into the TOML value model.
///
/// Nulls have no TOML counterpart and are dropped, both as values and as
/// sequence items. Scalar mapping keys are turned into strings; entries with
/// null or composite keys are skipped.
fn from_yaml(yaml: serde_yaml::Value) -> Option<Value> {
    use serde_yaml::Value as Yaml;

    match yaml {
        Yaml::Null => None,
        Yaml::Bool(b) => Some(Value::Boolean(b)),
        Yaml::Number(n) => match n.as_i64() {
            Some(i) => Some(Value::Integer(i)),
            None => n.as_f64().map(Value::Float),
        },
        Yaml::String(s) => Some(Value::String(s)),
        Yaml::Sequence(items) => Some(Value::Array(
            items.into_iter().filter_map(from_yaml).collect(),
        )),
        Yaml::Mapping(mapping) => {
            let mut table = toml::Table::new();
            for (key, value) in mapping {
                let Some(key) = yaml_key(&key) else {
                    warn!(?key, "skipping settings entry with unsupported key");
                    continue;
                };
                if let Some(value) = from_yaml(value) {
                    table.insert(key, value);
                }
            }
            Some(Value::Table(table))
        }
        Yaml::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn yaml_key(key: &serde_yaml::Value) -> Option<String> {
    use serde_yaml::Value as Yaml;

    match key {
        Yaml::String(s) => Some(s.clone()),
        Yaml::Bool(b) => Some(b.to_string()),
        Yaml::Number(n) => Some(n.to_string()),
        Yaml::Tagged(tagged) => yaml_key(&tagged.value),
        Yaml::Null | Yaml::Sequence(_) | Yaml::Mapping(_) => None,
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}
