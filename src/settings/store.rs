use std::collections::BTreeMap;
use std::ops::{Deref, DerefMut};

use toml::Value;

use super::attributes::SettingAttributes;
use super::priority::{Priorities, Rank};
use super::SettingsError;

/// A collection of settings, each resolved from its full write history.
///
/// A store starts out frozen: reads are always allowed, but [`set`](Self::set),
/// [`delete`](Self::delete) and [`update`](Self::update) fail with
/// [`SettingsError::Frozen`] unless they run inside an [`unfreeze`](Self::unfreeze)
/// scope.
///
/// ## Example
///
/// ```
/// use layerset::Settings;
///
/// let mut settings: Settings<i64> = Settings::new();
/// {
///     let mut settings = settings.unfreeze();
///     settings.set("A", 1, "default")?;
///     settings.set("A", 2, "user")?;
/// }
///
/// assert!(settings.is_frozen());
/// assert_eq!(settings.get("A")?, &2);
/// assert_eq!(settings.get_priority("A")?, "user");
/// # Ok::<(), layerset::SettingsError>(())
/// ```
#[derive(Debug)]
pub struct Settings<V = Value> {
    data: BTreeMap<String, SettingAttributes<V>>,
    priorities: Priorities,
    frozen: bool,
}

impl<V> Settings<V> {
    /// Creates an empty, frozen store using the built-in priorities.
    pub fn new() -> Self {
        Self::with_priorities(Priorities::new())
    }

    /// Creates an empty, frozen store resolving priorities through `priorities`.
    pub fn with_priorities(priorities: Priorities) -> Self {
        Self {
            data: BTreeMap::new(),
            priorities,
            frozen: true,
        }
    }

    /// Creates a frozen store populated from `source` at `priority`.
    pub fn from_source<I, K>(source: I, priority: &str) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        let mut settings = Self::new();
        settings.unfreeze().update(source, priority)?;
        Ok(settings)
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Lifts the freeze until the returned guard is dropped.
    ///
    /// The guard restores whatever frozen state was in effect when it was
    /// created, so nested scopes only refreeze at the outermost exit.
    pub fn unfreeze(&mut self) -> Unfrozen<'_, V> {
        let previous = self.frozen;
        self.frozen = false;
        Unfrozen {
            settings: self,
            previous,
        }
    }

    /// Returns the effective value of `key`.
    pub fn get(&self, key: &str) -> Result<&V, SettingsError> {
        self.get_or(key, None)
    }

    /// Returns the effective value of `key`, or `default` if the key is absent.
    pub fn get_or<'a>(
        &'a self,
        key: &str,
        default: Option<&'a V>,
    ) -> Result<&'a V, SettingsError> {
        self.data
            .get(key)
            .and_then(SettingAttributes::effective_value)
            .or(default)
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))
    }

    /// Returns the name of the priority `key` is currently resolved from.
    pub fn get_priority(&self, key: &str) -> Result<&str, SettingsError> {
        self.data
            .get(key)
            .and_then(SettingAttributes::effective_priority)
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))
    }

    /// Returns the full write history of `key`.
    pub fn history(&self, key: &str) -> Option<&SettingAttributes<V>> {
        self.data.get(key)
    }

    /// Records `value` for `key` at `priority`.
    ///
    /// An empty priority records nothing, as with [`SettingAttributes::record`].
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: V,
        priority: &str,
    ) -> Result<(), SettingsError> {
        self.ensure_unfrozen()?;
        if priority.is_empty() {
            return Ok(());
        }
        let rank = self.priorities.rank_of(priority)?;
        self.push(key.into(), rank, priority, value);
        Ok(())
    }

    /// Removes `key` together with its whole history.
    pub fn delete(&mut self, key: &str) -> Result<SettingAttributes<V>, SettingsError> {
        self.ensure_unfrozen()?;
        self.data
            .remove(key)
            .ok_or_else(|| SettingsError::KeyNotFound(key.to_string()))
    }

    /// Records every key/value pair of `source` at `priority`.
    ///
    /// Accepts anything that iterates over pairs: maps, vectors, arrays.
    /// The priority is resolved before the first write, so an unknown priority
    /// leaves the store untouched. An empty priority writes nothing.
    pub fn update<I, K>(&mut self, source: I, priority: &str) -> Result<(), SettingsError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
    {
        self.ensure_unfrozen()?;
        if priority.is_empty() {
            return Ok(());
        }
        let rank = self.priorities.rank_of(priority)?;
        for (key, value) in source {
            self.push(key.into(), rank, priority, value);
        }
        Ok(())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Iterates over all keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    /// Iterates over keys and their effective values in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.data.iter().filter_map(|(key, attributes)| {
            attributes
                .effective_value()
                .map(|value| (key.as_str(), value))
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn priorities(&self) -> &Priorities {
        &self.priorities
    }

    /// Registers a priority on this store's table.
    ///
    /// Stored records keep the rank they were written with.
    pub fn register_priority(&mut self, name: impl Into<String>, rank: Rank) {
        self.priorities.register(name, rank);
    }

    fn ensure_unfrozen(&self) -> Result<(), SettingsError> {
        if self.frozen {
            return Err(SettingsError::Frozen);
        }
        Ok(())
    }

    fn push(&mut self, key: String, rank: Rank, priority: &str, value: V) {
        self.data.entry(key).or_default().push(rank, priority, value);
    }
}

impl Settings<Value> {
    /// Records the entries of a dynamic value at `priority`.
    ///
    /// A table is treated as a mapping, an array as a list of `[key, value]`
    /// pairs. Any other value, or a malformed pair, is rejected before
    /// anything is written.
    pub fn update_from_value(
        &mut self,
        source: Value,
        priority: &str,
    ) -> Result<(), SettingsError> {
        self.ensure_unfrozen()?;
        let pairs: Vec<(String, Value)> = match source {
            Value::Table(table) => table.into_iter().collect(),
            Value::Array(items) => items
                .into_iter()
                .map(pair_from_value)
                .collect::<Result<_, _>>()?,
            other => return Err(SettingsError::UnsupportedSourceType(other.type_str())),
        };
        self.update(pairs, priority)
    }
}

fn pair_from_value(item: Value) -> Result<(String, Value), SettingsError> {
    let Value::Array(pair) = item else {
        return Err(SettingsError::UnsupportedSourceType(item.type_str()));
    };
    match <[Value; 2]>::try_from(pair) {
        Ok([Value::String(key), value]) => Ok((key, value)),
        Ok([key, _]) => Err(SettingsError::UnsupportedSourceType(key.type_str())),
        Err(_) => Err(SettingsError::UnsupportedSourceType("array")),
    }
}

/// Clones are always frozen, even when taken inside an unfreeze scope.
impl<V: Clone> Clone for Settings<V> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            priorities: self.priorities.clone(),
            frozen: true,
        }
    }
}

impl<V> Default for Settings<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Write access to a [`Settings`] store, obtained from [`Settings::unfreeze`].
///
/// Dropping the guard restores the frozen state captured when it was created,
/// including when a `?` returns early out of the scope.
#[derive(Debug)]
#[must_use = "the store is refrozen as soon as the guard is dropped"]
pub struct Unfrozen<'a, V> {
    settings: &'a mut Settings<V>,
    previous: bool,
}

impl<V> Deref for Unfrozen<'_, V> {
    type Target = Settings<V>;

    fn deref(&self) -> &Self::Target {
        &*self.settings
    }
}

impl<V> DerefMut for Unfrozen<'_, V> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.settings
    }
}

impl<V> Drop for Unfrozen<'_, V> {
    fn drop(&mut self) {
        self.settings.frozen = self.previous;
    }
}
