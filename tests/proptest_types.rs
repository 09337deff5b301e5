//! Property-based tests for model and query types.
//!
//! Ensures core types handle arbitrary input without panicking,
//! and that key invariants hold across random inputs.

use proptest::prelude::*;
use vaultview::{
    SearchQuery, Snapshot,
    model::{MAX_STANDING, Paragon, Renown, ReputationProgress, Standing},
};

fn standing() -> impl Strategy<Value = Option<Standing>> {
    prop::option::of((0u8..=10, 0u64..50_000, 0u64..50_000).prop_map(|(standing, current, max)| {
        Standing {
            standing,
            current,
            max,
        }
    }))
}

fn renown() -> impl Strategy<Value = Option<Renown>> {
    prop::option::of((0u32..40, 0u32..40, 0u64..5_000, 0u64..5_000).prop_map(
        |(level, max_level, current, max)| Renown {
            level,
            max_level,
            current,
            max,
        },
    ))
}

fn paragon() -> impl Strategy<Value = Option<Paragon>> {
    prop::option::of((0u64..100_000, 0u64..20_000, any::<bool>()).prop_map(
        |(value, threshold, reward_pending)| Paragon {
            value,
            threshold,
            reward_pending,
        },
    ))
}

proptest! {
    // Checks are cheap, so run more cases than the engine properties.
    #![proptest_config(ProptestConfig::with_cases(1000))]

    #[test]
    fn progress_fraction_in_unit_range(standing in standing(), renown in renown(), paragon in paragon()) {
        let progress = ReputationProgress { standing, renown, paragon };
        let fraction = progress.progress_fraction();
        prop_assert!((0.0..=1.0).contains(&fraction), "fraction {} for {:?}", fraction, progress);
        prop_assert!(!progress.progress_label().is_empty());
    }

    #[test]
    fn base_maxed_follows_the_reporting_system(standing in standing(), renown in renown(), paragon in paragon()) {
        let progress = ReputationProgress { standing, renown, paragon };
        let expected = match (paragon, renown, standing) {
            (Some(_), _, _) => true,
            (None, Some(r), _) => r.level >= r.max_level,
            (None, None, Some(s)) => s.standing >= MAX_STANDING,
            (None, None, None) => false,
        };
        prop_assert_eq!(progress.is_base_maxed(), expected);
    }

    #[test]
    fn query_normalization_is_stable(raw in "[ \\tA-Za-z0-9]{0,40}") {
        let query = SearchQuery::new(raw.clone());
        let again = SearchQuery::new(query.needle().to_string());
        prop_assert_eq!(query.needle(), again.needle());
        prop_assert_eq!(query.is_empty(), raw.trim().is_empty());
    }

    #[test]
    fn snapshot_parsing_doesnt_panic(s in "\\PC{0,200}") {
        let _ = Snapshot::from_json(&s);
    }
}
