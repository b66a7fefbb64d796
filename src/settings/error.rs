use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("unknown setting priority: {0}")]
    UnknownPriorityKind(String),

    #[error("settings are frozen and cannot be modified")]
    Frozen,

    #[error("setting not found: {0}")]
    KeyNotFound(String),

    #[error("unsupported settings source: expected a table or key/value pairs, found {0}")]
    UnsupportedSourceType(&'static str),
}
