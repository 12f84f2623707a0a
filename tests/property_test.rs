use std::collections::BTreeMap;

use chrono::{TimeZone, Utc};
use mirrordiff::{
    compare_entries, DiffError, Difference, EntryKind, Session, SourceQuery, TargetEntry,
};
use proptest::prelude::*;

type Listing = BTreeMap<String, (bool, u64, i64)>;

fn listing() -> impl Strategy<Value = Listing> {
    prop::collection::btree_map("[a-d]{1,3}", (any::<bool>(), 0u64..3, 0i64..3), 0..24)
}

fn target_entry(key: &str, (regular, size, secs): (bool, u64, i64)) -> TargetEntry {
    TargetEntry {
        key: format!("root/{key}"),
        kind: if regular { EntryKind::File } else { EntryKind::Dir },
        size,
        mod_time: Utc.timestamp_opt(secs, 0).unwrap(),
    }
}

fn query(key: &str, (regular, size, secs): (bool, u64, i64)) -> SourceQuery {
    SourceQuery {
        root: "root".into(),
        suffix: key.into(),
        kind: if regular { EntryKind::File } else { EntryKind::Dir },
        size,
        mod_time: Utc.timestamp_opt(secs, 0).unwrap(),
    }
}

proptest! {
    /// The single forward pass gives the same answer as a random-access
    /// lookup of each source key in the target listing.
    #[test]
    fn merge_join_agrees_with_lookup(target in listing(), source in listing()) {
        let items: Vec<Result<TargetEntry, DiffError>> = target
            .iter()
            .map(|(k, v)| Ok(target_entry(k, *v)))
            .collect();
        let mut session = Session::new(Box::new(items.into_iter()));

        for (key, attrs) in &source {
            let q = query(key, *attrs);
            let expected = match target.get(key) {
                Some(t) => compare_entries(&q, &target_entry(key, *t)),
                None => Difference::SourceOnly,
            };
            prop_assert_eq!(session.classify(&q).unwrap(), expected);
        }

        let stats = session.stats();
        prop_assert_eq!(stats.queries, source.len());
        prop_assert!(stats.fetched <= target.len());
    }

    #[test]
    fn regular_match_depends_only_on_size_then_time(
        size in 0u64..4, tsize in 0u64..4, secs in 0i64..4, tsecs in 0i64..4,
    ) {
        let q = query("k", (true, size, secs));
        let t = target_entry("k", (true, tsize, tsecs));
        let expected = if size != tsize {
            Difference::SizeMismatch
        } else if secs > tsecs {
            Difference::NewerOnSource
        } else if secs < tsecs {
            Difference::OlderOnSource
        } else {
            Difference::None
        };
        prop_assert_eq!(compare_entries(&q, &t), expected);
    }
}
