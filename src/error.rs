use crate::loader::LoadError;
use crate::settings::SettingsError;
use thiserror::Error;

/// Top-level error type for the layerset library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("settings error: {0}")]
    Settings(#[from] SettingsError),

    #[error("failed to load settings: {0}")]
    Load(#[from] LoadError),

    #[error("application context requires settings")]
    MissingSettings,

    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("failed to render settings: {0}")]
    Render(String),
}
