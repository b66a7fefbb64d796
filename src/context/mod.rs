//! Application context for sharing resolved settings.

use toml::Value;

use crate::settings::{Settings, SettingsError};
use crate::Error;

/// Central application context holding the resolved settings.
///
/// The context owns its [`Settings`] and only hands out shared references, so
/// once a store is placed here it can no longer be unfrozen or modified.
///
/// ## Example
///
/// ```no_run
/// use layerset::{AppContext, SettingsLoader};
///
/// let ctx = AppContext::builder()
///     .with_settings(
///         SettingsLoader::builder()
///             .with_defaults()
///             .with_user_file()
///             .with_env("LAYERSET_")
///             .build()?,
///     )
///     .build()?;
///
/// let level = ctx.get("LOG_LEVEL")?;
/// # Ok::<(), layerset::Error>(())
/// ```
#[derive(Debug)]
pub struct AppContext<V = Value> {
    settings: Settings<V>,
}

impl<V> AppContext<V> {
    /// Returns the settings.
    pub fn settings(&self) -> &Settings<V> {
        &self.settings
    }

    /// Shorthand for `settings().get(key)`.
    pub fn get(&self, key: &str) -> Result<&V, SettingsError> {
        self.settings.get(key)
    }
}

impl AppContext {
    /// Creates a new builder for constructing an `AppContext`.
    pub fn builder() -> AppContextBuilder<()> {
        AppContextBuilder { settings: None }
    }
}

/// Builder for constructing an [`AppContext`].
///
/// The builder starts without settings (`AppContextBuilder<()>`) and
/// transitions to `AppContextBuilder<Settings<V>>` when
/// [`with_settings`](Self::with_settings) is called.
#[derive(Debug)]
#[must_use = "builders do nothing until .build() is called"]
pub struct AppContextBuilder<S> {
    settings: Option<S>,
}

impl AppContextBuilder<()> {
    /// Attaches the settings to the application context.
    pub fn with_settings<V>(self, settings: Settings<V>) -> AppContextBuilder<Settings<V>> {
        AppContextBuilder {
            settings: Some(settings),
        }
    }
}

impl<V> AppContextBuilder<Settings<V>> {
    /// Builds the `AppContext`.
    ///
    /// Returns an error if no settings were provided.
    pub fn build(self) -> Result<AppContext<V>, Error> {
        Ok(AppContext {
            settings: self.settings.ok_or(Error::MissingSettings)?,
        })
    }
}
