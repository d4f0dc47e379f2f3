//! Mapping answer regions onto the questions a student answers.

use std::num::NonZeroUsize;

use serde::Serialize;

use crate::error::AnswerKeyError;

/// Group size used when an answer key carries the legacy `circleCount == 0`.
pub const DEFAULT_GROUP_SIZE: NonZeroUsize = match NonZeroUsize::new(2) {
    Some(n) => n,
    None => unreachable!(),
};

/// Legacy `circleCount` value meaning "one multi-select group".
pub const MULTI_SELECT_SENTINEL: i32 = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GroupingMode {
    /// Every `n` consecutive answers form one single-choice question.
    FixedGroupSize(NonZeroUsize),
    /// All answers toggle independently.
    MultiSelect,
}

impl GroupingMode {
    pub fn fixed(n: usize) -> Option<Self> {
        NonZeroUsize::new(n).map(GroupingMode::FixedGroupSize)
    }

    /// Translate a legacy `circleCount` at the loading boundary.
    ///
    /// `0` maps to `default_size`, `-1` to [`GroupingMode::MultiSelect`].
    pub fn from_circle_count(
        circle_count: i32,
        default_size: NonZeroUsize,
    ) -> Result<Self, AnswerKeyError> {
        match circle_count {
            MULTI_SELECT_SENTINEL => Ok(GroupingMode::MultiSelect),
            0 => Ok(GroupingMode::FixedGroupSize(default_size)),
            n if n > 0 => Ok(GroupingMode::FixedGroupSize(
                NonZeroUsize::new(n as usize).ok_or(AnswerKeyError::InvalidCircleCount(n))?,
            )),
            n => Err(AnswerKeyError::InvalidCircleCount(n)),
        }
    }

    pub fn is_multi_select(&self) -> bool {
        matches!(self, GroupingMode::MultiSelect)
    }
}

/// Question group an answer belongs to. Always `0` in multi-select mode.
pub fn group_of(answer_index: usize, mode: GroupingMode) -> usize {
    match mode {
        GroupingMode::FixedGroupSize(n) => answer_index / n.get(),
        GroupingMode::MultiSelect => 0,
    }
}

/// Number of questions `region_count` answers form.
pub fn question_count(region_count: usize, mode: GroupingMode) -> usize {
    match mode {
        GroupingMode::FixedGroupSize(n) => region_count.div_ceil(n.get()),
        GroupingMode::MultiSelect => 1,
    }
}
