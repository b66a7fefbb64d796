use std::path::PathBuf;
use thiserror::Error;

use crate::settings::SettingsError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("required settings file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    TomlError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to parse settings file '{path}': {source}")]
    YamlError {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("invalid built-in defaults: {0}")]
    DefaultsError(#[source] toml::de::Error),

    #[error("malformed setting argument '{0}' (expected key=value)")]
    MalformedArgument(String),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
