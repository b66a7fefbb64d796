//! Priority-ranked settings storage.

mod attributes;
mod error;
mod priority;
mod store;

pub use attributes::{Record, SettingAttributes};
pub use error::SettingsError;
pub use priority::{Priorities, Rank, BUILTIN_PRIORITIES};
pub use store::{Settings, Unfrozen};
