//! Assembling settings from defaults, files, environment and command line.

mod args;
mod builder;
mod defaults;
mod env;
mod error;
mod file;
mod source;

pub use args::{parse_setting, ArgsSource};
pub use builder::SettingsLoader;
pub use defaults::DefaultsSource;
pub use env::{EnvSource, ENV_PREFIX};
pub use error::LoadError;
pub use file::{FileSource, USER_SETTINGS_FILE};
pub use source::SettingsSource;
