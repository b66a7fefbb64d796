use std::path::Path;

use tracing::{debug, warn};

use super::args::ArgsSource;
use super::defaults::DefaultsSource;
use super::env::EnvSource;
use super::file::FileSource;
use super::source::SettingsSource;
use super::LoadError;
use crate::settings::{Priorities, Rank, Settings};

/// Builder for assembling [`Settings`] from several sources.
///
/// Each source is written at its own priority, so registration order does not
/// decide which value wins; the priority rank does. Sources are still loaded
/// in registration order, lowest priority first by convention.
///
/// The store is unfrozen once while the sources are loaded and is frozen
/// again when [`build`](Self::build) returns.
///
/// ## Example
///
/// ```no_run
/// use layerset::SettingsLoader;
///
/// let settings = SettingsLoader::builder()
///     .with_defaults()
///     .with_user_file()
///     .with_file("layerset.toml", false, "project")
///     .with_env("LAYERSET_")
///     .with_args(["LOG_LEVEL=debug"])
///     .build()?;
///
/// assert!(settings.is_frozen());
/// assert_eq!(settings.get_priority("LOG_LEVEL")?, "cmd");
/// # Ok::<(), layerset::Error>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SettingsLoader {
    priorities: Priorities,
    sources: Vec<Box<dyn SettingsSource>>,
}

impl SettingsLoader {
    /// Creates a new loader with the built-in priorities and no sources.
    pub fn builder() -> Self {
        Self::default()
    }

    /// Registers an extra priority on the store being built.
    pub fn register_priority(mut self, name: impl Into<String>, rank: Rank) -> Self {
        self.priorities.register(name, rank);
        self
    }

    /// Adds the built-in defaults.
    pub fn with_defaults(self) -> Self {
        self.with_source(DefaultsSource::builtin())
    }

    /// Adds the optional per-user file `~/.layerset.yaml`.
    ///
    /// Skipped if the home directory cannot be determined.
    pub fn with_user_file(self) -> Self {
        match FileSource::user() {
            Some(source) => self.with_source(source),
            None => {
                warn!("home directory not found, skipping user settings");
                self
            }
        }
    }

    /// Adds a settings file to be written at `priority`.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool, priority: &str) -> Self {
        self.with_source(FileSource::new(path, required, priority))
    }

    /// Adds environment variables starting with `prefix`.
    pub fn with_env(self, prefix: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix))
    }

    /// Adds `key=value` command-line settings.
    pub fn with_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_source(ArgsSource::new(args))
    }

    /// Adds any other source.
    pub fn with_source(mut self, source: impl SettingsSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads every source into a new store and returns it frozen.
    pub fn build(self) -> Result<Settings, LoadError> {
        let mut settings = Settings::with_priorities(self.priorities);

        {
            let mut settings = settings.unfreeze();
            for source in &self.sources {
                let Some(value) = source.load()? else {
                    debug!(?source, "source has no settings");
                    continue;
                };
                settings
                    .update_from_value(value, source.priority())
                    .inspect_err(|e| warn!(?source, error = %e, "rejected settings source"))?;
                debug!(?source, priority = source.priority(), "loaded settings source");
            }
        }

        Ok(settings)
    }
}
