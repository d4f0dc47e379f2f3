//! Student selections and the payload handed to the grading side.
//!
//! [`SelectionState`] is a value: [`toggle_selection`] returns a new state and
//! leaves the previous one untouched for anyone still holding it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::grouping::{group_of, GroupingMode};

/// Question key -> selected answer index.
///
/// In multi-select mode the keys are synthetic slots that only need to be
/// unique.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    picks: BTreeMap<usize, usize>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.picks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.picks.is_empty()
    }

    /// Answer chosen for `question`, if any.
    pub fn answer_for(&self, question: usize) -> Option<usize> {
        self.picks.get(&question).copied()
    }

    pub fn is_selected(&self, answer_index: usize) -> bool {
        self.picks.values().any(|&a| a == answer_index)
    }

    /// Selected answer indices in ascending order.
    pub fn selected_answers(&self) -> BTreeSet<usize> {
        self.picks.values().copied().collect()
    }

    /// Build the outbound payload for `mode`.
    pub fn payload(&self, mode: GroupingMode) -> SelectionPayload {
        match mode {
            GroupingMode::FixedGroupSize(_) => SelectionPayload::Grouped {
                answers: self.picks.clone(),
            },
            GroupingMode::MultiSelect => SelectionPayload::MultiSelect {
                answers: self.selected_answers(),
            },
        }
    }

    fn next_free_slot(&self) -> usize {
        let mut slot = self.picks.len();
        while self.picks.contains_key(&slot) {
            slot += 1;
        }
        slot
    }
}

/// Apply one click on `answer_index`.
///
/// Fixed groups keep at most one answer per group: a new pick replaces the
/// old one and re-clicking the current pick clears it. In multi-select mode
/// each answer toggles on its own.
pub fn toggle_selection(
    state: &SelectionState,
    answer_index: usize,
    mode: GroupingMode,
) -> SelectionState {
    let mut picks = state.picks.clone();
    match mode {
        GroupingMode::FixedGroupSize(_) => {
            let group = group_of(answer_index, mode);
            if picks.get(&group) == Some(&answer_index) {
                picks.remove(&group);
            } else {
                picks.insert(group, answer_index);
            }
        }
        GroupingMode::MultiSelect => {
            let existing = picks
                .iter()
                .find(|(_, a)| **a == answer_index)
                .map(|(k, _)| *k);
            match existing {
                Some(key) => {
                    picks.remove(&key);
                }
                None => {
                    picks.insert(state.next_free_slot(), answer_index);
                }
            }
        }
    }
    SelectionState { picks }
}

/// What the grading collaborator receives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SelectionPayload {
    Grouped { answers: BTreeMap<usize, usize> },
    MultiSelect { answers: BTreeSet<usize> },
}

impl SelectionPayload {
    pub fn answered_count(&self) -> usize {
        match self {
            SelectionPayload::Grouped { answers } => answers.len(),
            SelectionPayload::MultiSelect { answers } => answers.len(),
        }
    }
}
