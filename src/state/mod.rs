// State management module
//
// `classify` and `reset` are the pure three-state toggle engine. `MenuSession`
// owns the ClassificationState of one menu session, threads it through those
// functions and reports what changed so the menu can re-render.

use crate::models::{
    ClassificationState, GlobGroupId, GlobPattern, GlobRegistry, GroupStatus, SearchMode,
};
use crate::query::{DefaultIgnores, build_arguments};
use std::sync::Arc;

/// Advance one group by a single step of the neutral -> included -> excluded cycle.
///
/// The decision looks at every individual pattern of the group:
/// - all excluded: the patterns leave the exclude set
/// - every pattern not already excluded is included: the patterns move to the
///   exclude set
/// - otherwise: the patterns are added to the include set
///
/// In the last case a pattern already held by the exclude set (shared with another,
/// excluded group) keeps its exclusion and is not added to the include set, so the
/// two sets stay disjoint. Such an exclusion never blocks the group from moving on
/// to excluded, so every call on a non-empty group changes the state. An empty
/// pattern list returns the state unchanged.
pub fn classify(group_patterns: &[GlobPattern], state: &ClassificationState) -> ClassificationState {
    let mut next = state.clone();
    if group_patterns.is_empty() {
        return next;
    }

    let mut unexcluded = group_patterns
        .iter()
        .filter(|p| !state.exclude.contains(*p))
        .peekable();
    let all_excluded = unexcluded.peek().is_none();
    let all_included = !all_excluded && unexcluded.all(|p| state.include.contains(p));

    match (all_included, all_excluded) {
        (false, true) => {
            for pattern in group_patterns {
                next.exclude.remove(pattern);
            }
        }
        (true, _) => {
            for pattern in group_patterns {
                next.include.remove(pattern);
                next.exclude.insert(pattern.clone());
            }
        }
        (false, false) => {
            for pattern in group_patterns {
                if !next.exclude.contains(pattern) {
                    next.include.insert(pattern.clone());
                }
            }
        }
    }

    next
}

/// The empty classification, used at session start and on explicit reset
pub fn reset() -> ClassificationState {
    ClassificationState::new()
}

/// Change events produced by session operations
///
/// The menu uses these to decide what to re-render; they are also logged.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// The derived status of a group changed. Toggling one group can change the
    /// status of another group that shares patterns with it.
    GroupStatusChanged {
        group: GlobGroupId,
        from: GroupStatus,
        to: GroupStatus,
    },

    /// The query interpretation changed
    ModeChanged { mode: SearchMode },

    /// Classification has been cleared
    StateReset,
}

/// Owner of the classification state for a single menu session.
///
/// Each session holds its own state; sessions never share one. Dropping the
/// session without searching discards the state with no side effects.
#[derive(Debug, Clone)]
pub struct MenuSession {
    registry: Arc<GlobRegistry>,
    state: ClassificationState,
    mode: SearchMode,
}

impl MenuSession {
    /// Start a session with an empty classification
    pub fn new(registry: Arc<GlobRegistry>, mode: SearchMode) -> Self {
        Self {
            registry,
            state: reset(),
            mode,
        }
    }

    pub fn registry(&self) -> &GlobRegistry {
        &self.registry
    }

    pub fn classification(&self) -> &ClassificationState {
        &self.state
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Display status of a registered group
    pub fn group_status(&self, group: &GlobGroupId) -> GroupStatus {
        self.state.group_status(self.registry.patterns(group))
    }

    /// Apply one classification step to `group`.
    ///
    /// Unregistered groups resolve to no patterns and produce no change.
    pub fn toggle(&mut self, group: &GlobGroupId) -> Vec<StateChange> {
        let next = classify(self.registry.patterns(group), &self.state);
        let changes = self.replace_state(next);

        tracing::debug!(
            "Toggled {} -> {} (include={}, exclude={})",
            group,
            self.group_status(group),
            self.state.include.len(),
            self.state.exclude.len()
        );

        changes
    }

    /// Clear every classification
    pub fn reset(&mut self) -> Vec<StateChange> {
        let mut changes = self.replace_state(reset());
        changes.push(StateChange::StateReset);
        tracing::debug!("Classification reset");
        changes
    }

    pub fn set_mode(&mut self, mode: SearchMode) -> Vec<StateChange> {
        if self.mode == mode {
            return Vec::new();
        }
        self.mode = mode;
        tracing::debug!("Search mode set to {}", mode);
        vec![StateChange::ModeChanged { mode }]
    }

    pub fn toggle_mode(&mut self) -> Vec<StateChange> {
        self.set_mode(self.mode.toggled())
    }

    /// Compile the search tool arguments for the current classification
    pub fn compile_arguments(&self, ignores: &DefaultIgnores) -> Vec<String> {
        build_arguments(&self.state, &ignores.to_globs(), self.mode)
    }

    fn replace_state(&mut self, next: ClassificationState) -> Vec<StateChange> {
        let old = std::mem::replace(&mut self.state, next);
        self.detect_changes(&old)
    }

    /// Compare every group's derived status between `old` and the current state
    fn detect_changes(&self, old: &ClassificationState) -> Vec<StateChange> {
        self.registry
            .iter()
            .filter_map(|(group, patterns)| {
                let from = old.group_status(patterns);
                let to = self.state.group_status(patterns);
                (from != to).then(|| StateChange::GroupStatusChanged {
                    group: group.clone(),
                    from,
                    to,
                })
            })
            .collect()
    }
}
