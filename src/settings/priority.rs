//! Priority names and their ranks.

use std::collections::HashMap;

use super::SettingsError;

/// Numeric precedence of a priority. Larger ranks win.
pub type Rank = i64;

/// The built-in priority levels, lowest first.
pub const BUILTIN_PRIORITIES: [(&str, Rank); 5] = [
    ("default", 0),
    ("user", 10),
    ("project", 20),
    ("env", 30),
    ("cmd", 40),
];

/// Maps priority names to ranks.
///
/// Each [`Settings`](super::Settings) owns its own table, so registering a
/// priority on one store never affects another.
///
/// Records capture the rank that was registered at the time of the write.
/// Re-registering a name with a different rank only affects later writes;
/// records already stored keep their original ordering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Priorities {
    ranks: HashMap<String, Rank>,
}

impl Priorities {
    /// Creates a table holding only the built-in levels.
    pub fn new() -> Self {
        Self {
            ranks: BUILTIN_PRIORITIES
                .iter()
                .map(|(name, rank)| (name.to_string(), *rank))
                .collect(),
        }
    }

    /// Returns the rank registered for `name`.
    pub fn rank_of(&self, name: &str) -> Result<Rank, SettingsError> {
        self.ranks
            .get(name)
            .copied()
            .ok_or_else(|| SettingsError::UnknownPriorityKind(name.to_string()))
    }

    /// Adds `name`, or overwrites its rank if it is already registered.
    ///
    /// Ranks don't have to be unique or contiguous.
    pub fn register(&mut self, name: impl Into<String>, rank: Rank) {
        self.ranks.insert(name.into(), rank);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ranks.contains_key(name)
    }

    /// Iterates over all registered priorities, lowest rank first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Rank)> {
        let mut entries: Vec<_> = self
            .ranks
            .iter()
            .map(|(name, rank)| (name.as_str(), *rank))
            .collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
        entries.into_iter()
    }
}

impl Default for Priorities {
    fn default() -> Self {
        Self::new()
    }
}
