//! Answer-key loading.
//!
//! The on-disk format still carries the legacy `circleCount` numbers; they are
//! turned into a [`GroupingMode`] here and never travel further.

use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::AnswerKeyError;
use crate::geometry::{AnswerRegion, RegionCoords};
use crate::grouping::{question_count, GroupingMode, DEFAULT_GROUP_SIZE};

/// Kind of image activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityKind {
    Circle,
    MarkWithX,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Ellipse,
    Cross,
}

/// How a selected hot zone is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerStyle {
    pub shape: MarkerShape,
    pub label: &'static str,
    /// Whether the outline of an unselected zone is drawn.
    pub outline_idle: bool,
}

impl ActivityKind {
    pub fn parse(raw: &str) -> Result<Self, AnswerKeyError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "circle" => Ok(ActivityKind::Circle),
            "markwithx" => Ok(ActivityKind::MarkWithX),
            other => Err(AnswerKeyError::UnknownKind(other.to_string())),
        }
    }

    pub fn marker(self) -> MarkerStyle {
        match self {
            ActivityKind::Circle => MarkerStyle {
                shape: MarkerShape::Ellipse,
                label: "Circle the answer",
                outline_idle: false,
            },
            ActivityKind::MarkWithX => MarkerStyle {
                shape: MarkerShape::Cross,
                label: "Mark with an X",
                outline_idle: true,
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActivityKind::Circle => "circle",
            ActivityKind::MarkWithX => "markwithx",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct RawAnswer {
    #[serde(default)]
    index: Option<usize>,
    coords: RegionCoords,
}

/// Answer key as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct AnswerKey {
    #[serde(rename = "type")]
    kind: String,
    #[serde(rename = "circleCount", default)]
    circle_count: i32,
    answer: Vec<RawAnswer>,
    #[serde(default)]
    section_path: String,
}

impl AnswerKey {
    pub fn from_json(text: &str) -> Result<Self, AnswerKeyError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self, AnswerKeyError> {
        let text = std::fs::read_to_string(path).map_err(|source| AnswerKeyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Validate and convert into the typed definition the player runs on.
    pub fn into_definition(
        self,
        default_group_size: NonZeroUsize,
    ) -> Result<ActivityDefinition, AnswerKeyError> {
        let kind = ActivityKind::parse(&self.kind)?;
        let grouping = GroupingMode::from_circle_count(self.circle_count, default_group_size)?;

        let mut seen = HashSet::with_capacity(self.answer.len());
        let mut regions = Vec::with_capacity(self.answer.len());
        for (position, raw) in self.answer.into_iter().enumerate() {
            let index = raw.index.unwrap_or(position);
            if !raw.coords.is_valid() {
                return Err(AnswerKeyError::InvalidRegion(index));
            }
            if !seen.insert(index) {
                return Err(AnswerKeyError::DuplicateIndex(index));
            }
            regions.push(AnswerRegion {
                index,
                coords: raw.coords,
            });
        }
        regions.sort_by_key(|r| r.index);

        Ok(ActivityDefinition {
            kind,
            grouping,
            regions,
            section_path: self.section_path,
        })
    }
}

/// A validated activity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityDefinition {
    pub kind: ActivityKind,
    pub grouping: GroupingMode,
    pub regions: Vec<AnswerRegion>,
    pub section_path: String,
}

impl Default for ActivityDefinition {
    /// An activity with no hot zones, shown while nothing is loaded.
    fn default() -> Self {
        Self {
            kind: ActivityKind::Circle,
            grouping: GroupingMode::FixedGroupSize(DEFAULT_GROUP_SIZE),
            regions: Vec::new(),
            section_path: String::new(),
        }
    }
}

impl ActivityDefinition {
    pub fn question_count(&self) -> usize {
        question_count(self.regions.len(), self.grouping)
    }

    /// One past the highest region index.
    pub fn index_bound(&self) -> usize {
        self.regions.last().map(|r| r.index + 1).unwrap_or(0)
    }
}
