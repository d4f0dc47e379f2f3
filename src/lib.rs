//! Coordinate scaling and answer grouping for image-based selection
//! activities ("circle the answer", "mark with an X").
//!
//! - `geometry` - contain-fit layout and region projection
//! - `layout_lock` - freezes a layout against sub-pixel resize jitter
//! - `cache` - per-layout table of projected hot zones
//! - `grouping` / `selection` - question groups and student picks
//! - `answer_key` / `manifest` - on-disk formats
//! - `load` - generation counter for image loads
//! - `player` - one activity view tying the above together

pub mod answer_key;
pub mod cache;
pub mod cart;
pub mod config;
pub mod error;
pub mod geometry;
pub mod grouping;
pub mod layout_lock;
pub mod load;
pub mod manifest;
pub mod player;
pub mod selection;

pub use answer_key::{ActivityDefinition, ActivityKind, AnswerKey, MarkerShape, MarkerStyle};
pub use cache::{Projection, RegionCache};
pub use cart::{CartItem, QuizCart};
pub use error::{AnswerKeyError, ManifestError, PlayerError};
pub use geometry::{
    compute_layout, project_region, AnswerRegion, ContainerGeometry, ImageGeometry, Layout,
    RegionCoords, ScaledRegion,
};
pub use grouping::{group_of, question_count, GroupingMode};
pub use layout_lock::LayoutLock;
pub use load::{LoadGeneration, LoadTicket};
pub use manifest::{ActivityManifest, ManifestEntry};
pub use player::{ActivityPhase, ActivityPlayer, LoadOutcome};
pub use selection::{toggle_selection, SelectionPayload, SelectionState};
