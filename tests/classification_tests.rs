//! Integration tests for the three-state glob classification
//!
//! These tests verify:
//! - The neutral -> included -> excluded -> neutral cycle of a group
//! - Reset behavior
//! - Cross-group effects when groups share a literal pattern
//! - Set disjointness over arbitrary toggle sequences (property-based)

use globscope::{
    ClassificationState, GlobGroupId, GlobPattern, GlobRegistry, GroupStatus, MenuSession,
    SearchMode, StateChange, classify, reset,
};
use proptest::prelude::*;
use std::sync::Arc;

fn patterns(raw: &[&str]) -> Vec<GlobPattern> {
    raw.iter().map(|p| GlobPattern::from(*p)).collect()
}

fn set(state: &ClassificationState) -> (Vec<&str>, Vec<&str>) {
    (
        state.included().map(GlobPattern::as_str).collect(),
        state.excluded().map(GlobPattern::as_str).collect(),
    )
}

#[test]
fn test_cpp_group_cycles_through_three_states() {
    let mut registry = GlobRegistry::new();
    let cpp = GlobGroupId::new("_c_pp").unwrap();
    registry.register(cpp.clone(), ["*.h", "*.c", "*.cc"]);
    let group = registry.patterns(&cpp);

    let state = classify(group, &reset());
    assert_eq!(set(&state), (vec!["*.c", "*.cc", "*.h"], vec![]));

    let state = classify(group, &state);
    assert_eq!(set(&state), (vec![], vec!["*.c", "*.cc", "*.h"]));

    let state = classify(group, &state);
    assert!(state.is_empty());
}

#[test]
fn test_reset_is_idempotent() {
    assert_eq!(reset(), reset());
    assert!(reset().is_empty());

    let mut registry = GlobRegistry::new();
    let rust = GlobGroupId::new("_r_ust").unwrap();
    registry.register(rust.clone(), ["*.rs"]);
    let mut session = MenuSession::new(Arc::new(registry), SearchMode::Literal);

    session.toggle(&rust);
    session.reset();
    let once = session.classification().clone();
    session.reset();
    assert_eq!(session.classification(), &once);
    assert!(once.is_empty());
}

#[test]
fn test_shared_pattern_between_groups() {
    let mut registry = GlobRegistry::new();
    let cpp = GlobGroupId::new("_c_pp").unwrap();
    let gen_code = GlobGroupId::new("_g_enerated").unwrap();
    registry.register(cpp.clone(), ["*.h", "*.cc"]);
    registry.register(gen_code.clone(), ["*.cc"]);
    let registry = Arc::new(registry);
    let mut session = MenuSession::new(Arc::clone(&registry), SearchMode::Literal);

    let changes = session.toggle(&cpp);

    // The second group never got toggled, yet its all-included check already passes
    assert_eq!(session.group_status(&gen_code), GroupStatus::Included);
    assert!(changes.contains(&StateChange::GroupStatusChanged {
        group: gen_code.clone(),
        from: GroupStatus::Neutral,
        to: GroupStatus::Included,
    }));

    // So its first toggle moves straight to excluded, dragging the shared pattern along
    session.toggle(&gen_code);
    assert_eq!(session.group_status(&gen_code), GroupStatus::Excluded);
    assert_eq!(session.group_status(&cpp), GroupStatus::Mixed);
    assert_eq!(
        set(session.classification()),
        (vec!["*.h"], vec!["*.cc"])
    );
}

#[test]
fn test_including_does_not_clear_foreign_exclusion() {
    let state = ClassificationState::from_sets(Vec::<&str>::new(), vec!["*.cc"]);
    let next = classify(&patterns(&["*.cc", "*.cpp"]), &state);

    assert_eq!(set(&next), (vec!["*.cpp"], vec!["*.cc"]));
}

#[test]
fn test_overlapping_group_cycles_after_partial_exclusion() {
    let mut registry = GlobRegistry::new();
    let headers = GlobGroupId::new("_h_eaders").unwrap();
    let sources = GlobGroupId::new("_s_ources").unwrap();
    let native = GlobGroupId::new("_n_ative").unwrap();
    registry.register(headers.clone(), ["*.h"]);
    registry.register(sources.clone(), ["*.c"]);
    registry.register(native.clone(), ["*.h", "*.c"]);
    let mut session = MenuSession::new(Arc::new(registry), SearchMode::Literal);

    session.toggle(&headers);
    session.toggle(&sources);
    session.toggle(&sources);
    assert_eq!(set(session.classification()), (vec!["*.h"], vec!["*.c"]));

    let mut seen = vec![session.classification().clone()];
    for _ in 0..3 {
        session.toggle(&native);
        seen.push(session.classification().clone());
    }

    assert_eq!(set(&seen[1]), (vec![], vec!["*.c", "*.h"]));
    assert!(seen[2].is_empty());
    assert_eq!(set(&seen[3]), (vec!["*.c", "*.h"], vec![]));
    assert!(seen.windows(2).all(|pair| pair[0] != pair[1]));
}

#[test]
fn test_empty_group_never_changes_state() {
    let states = [
        reset(),
        ClassificationState::from_sets(["*.rs"], []),
        ClassificationState::from_sets(["*.rs"], ["*.md"]),
    ];

    for state in states {
        assert_eq!(classify(&[], &state), state);
    }
}

const POOL: [&str; 6] = ["*.h", "*.c", "*.cc", "*.rs", "*.md", "Makefile"];

fn group_strategy() -> impl Strategy<Value = Vec<GlobPattern>> {
    prop::sample::subsequence(POOL.to_vec(), 0..=POOL.len())
        .prop_map(|raw| raw.into_iter().map(GlobPattern::from).collect())
}

proptest! {
    #[test]
    fn include_and_exclude_stay_disjoint(
        groups in prop::collection::vec(group_strategy(), 1..5),
        steps in prop::collection::vec(0usize..5, 0..40),
    ) {
        let mut state = reset();
        for step in steps {
            state = classify(&groups[step % groups.len()], &state);
            for pattern in state.included() {
                prop_assert!(!state.is_excluded(pattern));
            }
        }
    }

    #[test]
    fn toggling_a_group_always_advances(
        groups in prop::collection::vec(group_strategy(), 1..5),
        steps in prop::collection::vec(0usize..5, 1..40),
    ) {
        let mut state = reset();
        for step in steps {
            let group = &groups[step % groups.len()];
            let next = classify(group, &state);
            if !group.is_empty() {
                prop_assert_ne!(&next, &state);
            }
            state = next;
        }
    }

    #[test]
    fn three_toggles_return_to_empty(group in group_strategy()) {
        let mut state = reset();
        for _ in 0..3 {
            state = classify(&group, &state);
        }
        prop_assert!(state.is_empty());
    }

    #[test]
    fn three_toggles_restore_unrelated_state(
        group in group_strategy(),
        other in prop::collection::vec("[a-z]{1,6}\\.txt", 0..4),
    ) {
        // Patterns outside the group are untouched by its cycle
        let start = ClassificationState::from_sets(other.clone(), Vec::<String>::new());
        let mut state = start.clone();
        for _ in 0..3 {
            state = classify(&group, &state);
        }
        prop_assert_eq!(state, start);
    }
}
