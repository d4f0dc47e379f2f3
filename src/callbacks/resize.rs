//! Viewport resize tracking.
//!
//! The canvas size is polled on a timer; the player's layout lock absorbs
//! sub-pixel jitter, so only real size changes re-project the hot zones.

use crate::state::Session;
use crate::view::refresh_view;
use crate::AppWindow;
use circle_player::ContainerGeometry;
use slint::ComponentHandle;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Starts the resize poller. The returned timer must be kept alive for as
/// long as the window runs.
pub fn setup_resize_tracking(ui: &AppWindow, session: Rc<RefCell<Session>>) -> slint::Timer {
    let interval = Duration::from_millis(session.borrow().config.layout.resize_poll_ms.max(16));
    let ui_weak = ui.as_weak();
    let timer = slint::Timer::default();
    timer.start(slint::TimerMode::Repeated, interval, move || {
        let (Ok(mut s), Some(ui)) = (session.try_borrow_mut(), ui_weak.upgrade()) else {
            return;
        };
        let container = ContainerGeometry::new(
            ui.get_viewport_width() as f64,
            ui.get_viewport_height() as f64,
        );
        if s.player.set_container(container) {
            log::debug!(
                "viewport {:.2}x{:.2}, hot zones re-projected",
                ui.get_viewport_width(),
                ui.get_viewport_height()
            );
            refresh_view(&ui, &s);
        }
    });
    timer
}
