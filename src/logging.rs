//! Logging setup driven by resolved settings.

use toml::Value;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;
use crate::Error;

/// Setting holding the tracing filter directive, e.g. `info` or `layerset=debug`.
pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";

const FALLBACK_DIRECTIVE: &str = "info";

const BOOTSTRAP_DIRECTIVE: &str = "warn";

/// Builds the log filter for `settings`.
///
/// Uses the `LOG_LEVEL` setting when it holds a string, otherwise `RUST_LOG`,
/// otherwise `info`.
pub fn env_filter(settings: &Settings) -> Result<EnvFilter, Error> {
    match settings.get(LOG_LEVEL_KEY) {
        Ok(Value::String(directive)) => {
            EnvFilter::try_new(directive).map_err(|e| Error::Logging(e.to_string()))
        }
        _ => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(FALLBACK_DIRECTIVE))),
    }
}

/// Installs a stderr tracing subscriber filtered according to `settings`.
pub fn init(settings: &Settings) -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(settings)?)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Installs a stderr subscriber for the current thread until the returned
/// guard is dropped.
///
/// Used while settings are still being loaded, before [`init`] can read
/// `LOG_LEVEL`. Filters with `RUST_LOG`, otherwise `warn`.
pub fn bootstrap() -> DefaultGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_DIRECTIVE));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_with_level(level: Value) -> Settings {
        Settings::from_source([(LOG_LEVEL_KEY, level)], "cmd").unwrap()
    }

    #[test]
    fn test_filter_from_setting() {
        assert!(env_filter(&settings_with_level(Value::from("debug"))).is_ok());
        assert!(env_filter(&settings_with_level(Value::from("layerset=trace"))).is_ok());
    }

    #[test]
    fn test_filter_without_setting() {
        let settings: Settings = Settings::new();
        assert!(env_filter(&settings).is_ok());
    }

    #[test]
    fn test_bootstrap_enables_errors() {
        let _guard = bootstrap();
        assert!(tracing::enabled!(tracing::Level::ERROR));
    }

    #[test]
    fn test_non_string_level_falls_back() {
        assert!(env_filter(&settings_with_level(Value::from(3_i64))).is_ok());
    }
}
