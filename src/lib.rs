pub mod context;
mod error;
pub mod loader;
pub mod logging;
pub mod settings;

pub use context::AppContext;
pub use error::Error;
pub use loader::{LoadError, SettingsLoader, SettingsSource};
pub use settings::{Priorities, Settings, SettingsError, Unfrozen};
