use toml::Value;

use super::LoadError;

/// Something that produces settings to be written at one priority.
///
/// [`load`](Self::load) returns `Ok(None)` when the source has nothing to
/// contribute, e.g. an optional file that does not exist. Otherwise the value
/// must be a table or a list of `[key, value]` pairs.
pub trait SettingsSource: std::fmt::Debug {
    /// Name of the priority the loaded settings are written at.
    fn priority(&self) -> &str;

    fn load(&self) -> Result<Option<Value>, LoadError>;
}
