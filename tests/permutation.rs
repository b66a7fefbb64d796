//! Property-based tests for priority resolution.

use layerset::settings::BUILTIN_PRIORITIES;
use layerset::{Settings, SettingsError};
use proptest::prelude::*;

/// Writes to one key, one per distinct priority.
fn writes_strategy() -> impl Strategy<Value = Vec<(&'static str, i64)>> {
    let names: Vec<&'static str> = BUILTIN_PRIORITIES.iter().map(|(name, _)| *name).collect();
    proptest::sample::subsequence(names, 1..=BUILTIN_PRIORITIES.len())
        .prop_flat_map(|names| {
            let len = names.len();
            (Just(names), proptest::collection::vec(any::<i64>(), len))
        })
        .prop_map(|(names, values)| names.into_iter().zip(values).collect())
}

fn apply(writes: &[(&'static str, i64)]) -> Settings<i64> {
    let mut settings = Settings::new();
    {
        let mut settings = settings.unfreeze();
        for (priority, value) in writes {
            settings.set("key", *value, priority).unwrap();
        }
    }
    settings
}

fn expected(writes: &[(&'static str, i64)]) -> (&'static str, i64) {
    let rank = |name: &str| {
        BUILTIN_PRIORITIES
            .iter()
            .find(|(builtin, _)| *builtin == name)
            .map(|(_, rank)| *rank)
            .unwrap()
    };
    *writes
        .iter()
        .max_by_key(|(priority, _)| rank(priority))
        .unwrap()
}

proptest! {
    #[test]
    fn highest_rank_wins_regardless_of_order(
        (writes, shuffled) in writes_strategy()
            .prop_flat_map(|writes| (Just(writes.clone()), Just(writes).prop_shuffle()))
    ) {
        let (priority, value) = expected(&writes);

        let in_order = apply(&writes);
        let permuted = apply(&shuffled);

        prop_assert_eq!(in_order.get("key").unwrap(), &value);
        prop_assert_eq!(in_order.get_priority("key").unwrap(), priority);
        prop_assert_eq!(permuted.get("key").unwrap(), &value);
        prop_assert_eq!(permuted.get_priority("key").unwrap(), priority);
    }

    #[test]
    fn equal_rank_last_write_wins(values in proptest::collection::vec(any::<i64>(), 1..16)) {
        let writes: Vec<_> = values.iter().map(|value| ("project", *value)).collect();
        let settings = apply(&writes);

        prop_assert_eq!(settings.get("key").unwrap(), values.last().unwrap());
        prop_assert_eq!(settings.history("key").unwrap().len(), values.len());
    }

    #[test]
    fn frozen_store_rejects_every_write(writes in writes_strategy()) {
        let mut settings = apply(&writes);
        let before = settings.history("key").unwrap().clone();

        for (priority, value) in &writes {
            prop_assert_eq!(settings.set("key", *value, priority), Err(SettingsError::Frozen));
            prop_assert_eq!(
                settings.update([("other", *value)], priority),
                Err(SettingsError::Frozen)
            );
        }
        prop_assert_eq!(settings.delete("key").map(|_| ()), Err(SettingsError::Frozen));

        prop_assert_eq!(settings.history("key").unwrap(), &before);
        prop_assert!(!settings.contains("other"));
        prop_assert_eq!(settings.len(), 1);
    }
}
