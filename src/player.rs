//! One activity view: image load lifecycle, layout, hot zones and selections.

use serde::Serialize;

use crate::answer_key::ActivityDefinition;
use crate::cache::{Projection, RegionCache};
use crate::error::PlayerError;
use crate::geometry::{ContainerGeometry, ImageGeometry};
use crate::layout_lock::LayoutLock;
use crate::load::{LoadGeneration, LoadTicket};
use crate::selection::{toggle_selection, SelectionPayload, SelectionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityPhase {
    Unloaded,
    Loading,
    Ready,
    Error,
    Submitted,
}

/// Result of delivering a finished image load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    /// The ticket was superseded or the player torn down; nothing changed.
    Stale,
}

pub type SelectionListener = Box<dyn FnMut(&SelectionPayload)>;

pub struct ActivityPlayer {
    definition: ActivityDefinition,
    phase: ActivityPhase,
    generation: LoadGeneration,
    image: Option<ImageGeometry>,
    container: Option<ContainerGeometry>,
    lock: LayoutLock,
    cache: RegionCache,
    selection: SelectionState,
    load_error: Option<String>,
    listener: Option<SelectionListener>,
}

impl std::fmt::Debug for ActivityPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActivityPlayer")
            .field("section_path", &self.definition.section_path)
            .field("phase", &self.phase)
            .field("image", &self.image)
            .field("container", &self.container)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl ActivityPlayer {
    pub fn new(definition: ActivityDefinition, jitter_tolerance: f64) -> Self {
        Self {
            definition,
            phase: ActivityPhase::Unloaded,
            generation: LoadGeneration::new(),
            image: None,
            container: None,
            lock: LayoutLock::new(jitter_tolerance),
            cache: RegionCache::new(),
            selection: SelectionState::new(),
            load_error: None,
            listener: None,
        }
    }

    /// Register the receiver of selection payloads. Replaces any previous one.
    pub fn on_selection_changed(&mut self, listener: impl FnMut(&SelectionPayload) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Switch to another activity. Outstanding loads become stale, the layout
    /// lock and hot-zone cache are dropped and the selection starts empty.
    pub fn load_activity(&mut self, definition: ActivityDefinition) {
        self.generation.cancel();
        self.definition = definition;
        self.phase = ActivityPhase::Unloaded;
        self.image = None;
        self.lock.reset();
        self.cache.invalidate();
        self.selection = SelectionState::new();
        self.load_error = None;
        log::info!("activity {} unloaded", self.definition.section_path);
    }

    /// Start loading the image. Valid from `Unloaded`, `Loading` (restart) and
    /// `Error` (retry).
    pub fn begin_load(&mut self) -> Result<LoadTicket, PlayerError> {
        match self.phase {
            ActivityPhase::Unloaded | ActivityPhase::Loading | ActivityPhase::Error => {}
            from => {
                return Err(PlayerError::InvalidTransition {
                    from,
                    action: "load an image",
                })
            }
        }
        let ticket = self.generation.begin();
        self.phase = ActivityPhase::Loading;
        self.image = None;
        self.lock.reset();
        self.cache.invalidate();
        self.load_error = None;
        log::info!(
            "loading {} image for {} (ticket {})",
            self.definition.kind.as_str(),
            self.definition.section_path,
            ticket.id()
        );
        Ok(ticket)
    }

    /// Deliver a finished load. Stale tickets are ignored.
    pub fn finish_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<ImageGeometry, PlayerError>,
    ) -> LoadOutcome {
        if !self.generation.is_current(ticket) || self.phase != ActivityPhase::Loading {
            log::warn!("dropping stale image load (ticket {})", ticket.id());
            return LoadOutcome::Stale;
        }
        match result {
            Ok(image) => {
                self.image = Some(image);
                self.phase = ActivityPhase::Ready;
                self.relayout();
                log::info!(
                    "image ready: {}x{}",
                    image.natural_width(),
                    image.natural_height()
                );
                LoadOutcome::Applied
            }
            Err(err) => {
                log::warn!("image load failed: {err}");
                self.phase = ActivityPhase::Error;
                self.load_error = Some(err.to_string());
                LoadOutcome::Failed
            }
        }
    }

    /// Report the viewport size. `None` while the container is not mounted.
    ///
    /// Returns `true` when the projected hot zones changed.
    pub fn set_container(&mut self, container: Option<ContainerGeometry>) -> bool {
        self.container = container;
        if container.is_none() {
            // Zones must not outlive the geometry they were projected from.
            let had_zones = self.cache.is_ready();
            self.cache.invalidate();
            return had_zones;
        }
        self.relayout()
    }

    fn relayout(&mut self) -> bool {
        let (Some(image), Some(container)) = (self.image, self.container) else {
            return false;
        };
        let (layout, _) = self.lock.resolve(image, container);
        self.cache.rebuild(layout, &self.definition.regions)
    }

    /// Hot zones to draw. `None` until both geometries are known, and while
    /// the image is not ready.
    pub fn projection(&self) -> Option<&Projection> {
        match self.phase {
            ActivityPhase::Ready | ActivityPhase::Submitted => self.cache.projection(),
            _ => None,
        }
    }

    /// Toggle one answer. Only allowed while `Ready`.
    pub fn toggle(&mut self, answer_index: usize) -> Result<&SelectionState, PlayerError> {
        if self.phase != ActivityPhase::Ready {
            return Err(PlayerError::InvalidTransition {
                from: self.phase,
                action: "select an answer",
            });
        }
        debug_assert!(
            self.definition.regions.iter().any(|r| r.index == answer_index),
            "answer index {answer_index} is not a region of this activity"
        );

        self.selection = toggle_selection(&self.selection, answer_index, self.definition.grouping);
        let payload = self.selection.payload(self.definition.grouping);
        log::debug!("selection changed: {payload:?}");
        if let Some(listener) = self.listener.as_mut() {
            listener(&payload);
        }
        Ok(&self.selection)
    }

    /// Toggle whichever hot zone lies under a screen point.
    pub fn click_at(&mut self, x: f64, y: f64) -> Result<Option<usize>, PlayerError> {
        let Some(hit) = self.projection().and_then(|p| p.hit_test(x, y)) else {
            return Ok(None);
        };
        self.toggle(hit)?;
        Ok(Some(hit))
    }

    /// Freeze the selection and hand it out.
    pub fn submit(&mut self) -> Result<SelectionPayload, PlayerError> {
        if self.phase != ActivityPhase::Ready {
            return Err(PlayerError::InvalidTransition {
                from: self.phase,
                action: "submit",
            });
        }
        self.phase = ActivityPhase::Submitted;
        let payload = self.selection.payload(self.definition.grouping);
        log::info!(
            "submitted {}: {} of {} answered",
            self.definition.section_path,
            payload.answered_count(),
            self.definition.question_count()
        );
        Ok(payload)
    }

    /// The view is going away: late loads are dropped and no more payloads
    /// are emitted.
    pub fn teardown(&mut self) {
        self.generation.retire();
        self.listener = None;
    }

    pub fn phase(&self) -> ActivityPhase {
        self.phase
    }

    pub fn definition(&self) -> &ActivityDefinition {
        &self.definition
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    pub fn image(&self) -> Option<ImageGeometry> {
        self.image
    }

    /// Questions with an answer recorded.
    pub fn answered_count(&self) -> usize {
        self.selection.payload(self.definition.grouping).answered_count()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::answer_key::ActivityKind;
    use crate::geometry::{AnswerRegion, RegionCoords};
    use crate::grouping::GroupingMode;

    fn definition(grouping: GroupingMode) -> ActivityDefinition {
        ActivityDefinition {
            kind: ActivityKind::Circle,
            grouping,
            regions: (0..4)
                .map(|i| AnswerRegion {
                    index: i,
                    coords: RegionCoords {
                        x: i as f64 * 100.0,
                        y: 0.0,
                        w: 100.0,
                        h: 100.0,
                    },
                })
                .collect(),
            section_path: "unit-1/page-3".to_string(),
        }
    }

    fn ready_player() -> ActivityPlayer {
        let mut player = ActivityPlayer::new(definition(GroupingMode::fixed(2).unwrap()), 1.0);
        let ticket = player.begin_load().unwrap();
        player.finish_load(ticket, Ok(ImageGeometry::new(400.0, 100.0).unwrap()));
        player.set_container(ContainerGeometry::new(400.0, 400.0));
        player
    }

    #[test]
    fn no_hot_zones_until_geometry_known() {
        let mut player = ActivityPlayer::new(definition(GroupingMode::MultiSelect), 1.0);
        assert!(!player.set_container(ContainerGeometry::new(400.0, 400.0)));
        assert!(player.projection().is_none());

        let ticket = player.begin_load().unwrap();
        assert!(player.projection().is_none());
        assert_eq!(
            player.finish_load(ticket, Ok(ImageGeometry::new(400.0, 100.0).unwrap())),
            LoadOutcome::Applied
        );
        let projection = player.projection().unwrap();
        assert_eq!(projection.len(), 4);
        assert_eq!(projection.get(0).unwrap().top, 150.0);
    }

    #[test]
    fn stale_load_is_ignored() {
        let mut player = ActivityPlayer::new(definition(GroupingMode::MultiSelect), 1.0);
        let old = player.begin_load().unwrap();
        let new = player.begin_load().unwrap();
        assert_eq!(
            player.finish_load(old, Ok(ImageGeometry::new(10.0, 10.0).unwrap())),
            LoadOutcome::Stale
        );
        assert_eq!(player.phase(), ActivityPhase::Loading);
        assert_eq!(
            player.finish_load(new, Ok(ImageGeometry::new(20.0, 10.0).unwrap())),
            LoadOutcome::Applied
        );
        assert_eq!(player.image().unwrap().natural_width(), 20.0);
    }

    #[test]
    fn switching_activity_drops_pending_load() {
        let mut player = ActivityPlayer::new(definition(GroupingMode::MultiSelect), 1.0);
        let ticket = player.begin_load().unwrap();
        player.load_activity(definition(GroupingMode::fixed(2).unwrap()));
        assert_eq!(player.phase(), ActivityPhase::Unloaded);
        assert_eq!(
            player.finish_load(ticket, Ok(ImageGeometry::new(10.0, 10.0).unwrap())),
            LoadOutcome::Stale
        );
        assert!(player.image().is_none());
    }

    #[test]
    fn switching_activity_clears_hot_zones() {
        let mut player = ready_player();
        assert!(player.projection().is_some());
        player.load_activity(definition(GroupingMode::MultiSelect));
        assert!(player.projection().is_none());
        assert!(player.selection().is_empty());
        assert_eq!(player.click_at(50.0, 200.0).unwrap(), None);
    }

    #[test]
    fn teardown_blocks_late_completion() {
        let mut player = ActivityPlayer::new(definition(GroupingMode::MultiSelect), 1.0);
        let ticket = player.begin_load().unwrap();
        player.teardown();
        assert_eq!(
            player.finish_load(ticket, Ok(ImageGeometry::new(10.0, 10.0).unwrap())),
            LoadOutcome::Stale
        );
    }

    #[test]
    fn teardown_silences_listener() {
        let mut player = ready_player();
        let seen = Rc::new(RefCell::new(0));
        let sink = seen.clone();
        player.on_selection_changed(move |_| *sink.borrow_mut() += 1);

        player.toggle(0).unwrap();
        player.teardown();
        player.toggle(1).unwrap();
        assert_eq!(*seen.borrow(), 1);
    }

    #[test]
    fn unknown_container_drops_hot_zones() {
        let mut player = ready_player();
        assert!(player.projection().is_some());

        assert!(player.set_container(ContainerGeometry::new(0.0, 0.0)));
        assert!(player.projection().is_none());
        assert_eq!(player.click_at(50.0, 200.0).unwrap(), None);
        assert!(player.selection().is_empty());
        assert!(!player.set_container(None));

        assert!(player.set_container(ContainerGeometry::new(400.0, 400.0)));
        assert_eq!(player.projection().unwrap().get(0).unwrap().top, 150.0);
    }

    #[test]
    fn failure_then_retry() {
        let mut player = ActivityPlayer::new(definition(GroupingMode::MultiSelect), 1.0);
        let ticket = player.begin_load().unwrap();
        let outcome = player.finish_load(ticket, Err(PlayerError::ImageLoad("404".into())));
        assert_eq!(outcome, LoadOutcome::Failed);
        assert_eq!(player.phase(), ActivityPhase::Error);
        assert_eq!(player.load_error(), Some("failed to load image: 404"));
        assert!(player.projection().is_none());
        assert!(player.toggle(0).is_err());

        let retry = player.begin_load().unwrap();
        assert!(player.load_error().is_none());
        player.finish_load(retry, Ok(ImageGeometry::new(10.0, 10.0).unwrap()));
        assert_eq!(player.phase(), ActivityPhase::Ready);
    }

    #[test]
    fn selection_notifies_listener() {
        let mut player = ready_player();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        player.on_selection_changed(move |payload| sink.borrow_mut().push(payload.clone()));

        player.toggle(1).unwrap();
        player.toggle(0).unwrap();
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(player.selection().answer_for(0), Some(0));
        assert_eq!(player.answered_count(), 1);
    }

    #[test]
    fn click_uses_projected_regions() {
        let mut player = ready_player();
        assert_eq!(player.click_at(250.0, 200.0).unwrap(), Some(2));
        assert_eq!(player.click_at(250.0, 10.0).unwrap(), None);
        assert_eq!(player.selection().answer_for(1), Some(2));
    }

    #[test]
    fn submit_is_terminal() {
        let mut player = ready_player();
        player.toggle(3).unwrap();
        let payload = player.submit().unwrap();
        assert_eq!(payload.answered_count(), 1);
        assert_eq!(player.phase(), ActivityPhase::Submitted);
        assert!(player.toggle(2).is_err());
        assert!(player.submit().is_err());
        assert!(player.begin_load().is_err());
        assert!(player.projection().is_some());
    }

    #[test]
    fn resize_reprojects_atomically() {
        let mut player = ready_player();
        let before = player.projection().unwrap().clone();
        assert!(!player.set_container(ContainerGeometry::new(400.3, 400.2)));
        assert_eq!(player.projection().unwrap(), &before);

        assert!(player.set_container(ContainerGeometry::new(200.0, 400.0)));
        let after = player.projection().unwrap();
        assert_eq!(after.layout().x_scale, 0.5);
        assert_eq!(after.get(1).unwrap().left, 50.0);
    }
}
