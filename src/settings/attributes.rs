//! Per-key write history.

use super::priority::{Priorities, Rank};
use super::SettingsError;

/// A single write to a setting.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<V> {
    /// Rank of `priority` at the time of the write.
    pub rank: Rank,
    pub priority: String,
    pub value: V,
    sequence: u64,
}

/// Every value ever written to one setting, with the priority it was written at.
///
/// Records are only ever appended. The effective value is the record with the
/// greatest rank; among records of equal rank the most recent write wins.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingAttributes<V> {
    records: Vec<Record<V>>,
    next_sequence: u64,
}

impl<V> SettingAttributes<V> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_sequence: 0,
        }
    }

    /// Records `value` at `priority`.
    ///
    /// A missing or empty priority records nothing.
    pub fn record(
        &mut self,
        priorities: &Priorities,
        value: V,
        priority: Option<&str>,
    ) -> Result<(), SettingsError> {
        let Some(priority) = priority.filter(|p| !p.is_empty()) else {
            return Ok(());
        };
        let rank = priorities.rank_of(priority)?;
        self.push(rank, priority, value);
        Ok(())
    }

    /// Appends a record whose rank has already been resolved.
    pub(crate) fn push(&mut self, rank: Rank, priority: &str, value: V) {
        self.records.push(Record {
            rank,
            priority: priority.to_string(),
            value,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
    }

    /// Returns the winning value, or `None` if nothing has been recorded.
    pub fn effective_value(&self) -> Option<&V> {
        self.winner().map(|record| &record.value)
    }

    /// Returns the priority name of the winning record.
    pub fn effective_priority(&self) -> Option<&str> {
        self.winner().map(|record| record.priority.as_str())
    }

    /// All records in write order.
    pub fn records(&self) -> &[Record<V>] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn winner(&self) -> Option<&Record<V>> {
        self.records
            .iter()
            .max_by_key(|record| (record.rank, record.sequence))
    }
}

impl<V> Default for SettingAttributes<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priorities() -> Priorities {
        let mut priorities = Priorities::new();
        priorities.register("customize", 25);
        priorities
    }

    #[test]
    fn test_empty_history() {
        let attributes: SettingAttributes<&str> = SettingAttributes::new();
        assert!(attributes.effective_value().is_none());
        assert!(attributes.effective_priority().is_none());
    }

    #[test]
    fn test_higher_rank_wins() {
        let priorities = priorities();
        let mut attributes = SettingAttributes::new();

        attributes
            .record(&priorities, "test_default", Some("default"))
            .unwrap();
        assert_eq!(attributes.effective_value(), Some(&"test_default"));
        assert_eq!(attributes.effective_priority(), Some("default"));

        attributes
            .record(&priorities, "test_project", Some("project"))
            .unwrap();
        assert_eq!(attributes.effective_value(), Some(&"test_project"));
        assert_eq!(attributes.effective_priority(), Some("project"));

        // A later, lower-ranked write does not take over.
        attributes
            .record(&priorities, "test_user", Some("user"))
            .unwrap();
        assert_eq!(attributes.effective_value(), Some(&"test_project"));
        assert_eq!(attributes.effective_priority(), Some("project"));

        attributes
            .record(&priorities, "test_customize", Some("customize"))
            .unwrap();
        assert_eq!(attributes.effective_value(), Some(&"test_customize"));
        assert_eq!(attributes.effective_priority(), Some("customize"));
        assert_eq!(attributes.len(), 4);
    }

    #[test]
    fn test_equal_rank_last_write_wins() {
        let priorities = priorities();
        let mut attributes = SettingAttributes::new();

        attributes.record(&priorities, "b", Some("user")).unwrap();
        attributes.record(&priorities, "a", Some("user")).unwrap();
        assert_eq!(attributes.effective_value(), Some(&"a"));

        attributes.record(&priorities, "c", Some("user")).unwrap();
        assert_eq!(attributes.effective_value(), Some(&"c"));
    }

    #[test]
    fn test_unordered_values_can_tie() {
        // Values need no ordering to break a tie.
        let priorities = priorities();
        let mut attributes = SettingAttributes::new();

        attributes
            .record(&priorities, vec![Some(1.0_f64)], Some("env"))
            .unwrap();
        attributes
            .record(&priorities, vec![None, Some(f64::NAN)], Some("env"))
            .unwrap();
        assert_eq!(attributes.effective_priority(), Some("env"));
        assert_eq!(attributes.effective_value().map(Vec::len), Some(2));
    }

    #[test]
    fn test_missing_priority_is_noop() {
        let priorities = priorities();
        let mut attributes = SettingAttributes::new();

        attributes.record(&priorities, "ignored", None).unwrap();
        attributes.record(&priorities, "ignored", Some("")).unwrap();
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_unknown_priority_rejected() {
        let priorities = priorities();
        let mut attributes = SettingAttributes::new();

        let result = attributes.record(&priorities, "value", Some("gamma"));
        assert_eq!(
            result,
            Err(SettingsError::UnknownPriorityKind("gamma".into()))
        );
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_rank_captured_at_write_time() {
        let mut priorities = priorities();
        let mut attributes = SettingAttributes::new();

        attributes
            .record(&priorities, "from_user", Some("user"))
            .unwrap();
        attributes
            .record(&priorities, "from_project", Some("project"))
            .unwrap();

        // Promoting "user" afterwards doesn't reorder stored records.
        priorities.register("user", 100);
        assert_eq!(attributes.effective_value(), Some(&"from_project"));

        attributes
            .record(&priorities, "from_user_again", Some("user"))
            .unwrap();
        assert_eq!(attributes.effective_value(), Some(&"from_user_again"));
        assert_eq!(attributes.records()[0].rank, 10);
        assert_eq!(attributes.records()[2].rank, 100);
    }
}
