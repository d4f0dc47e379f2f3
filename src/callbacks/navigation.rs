//! Navigation callbacks for moving through the activity manifest.
//!
//! Handles: next, prev

use super::loading::ActivityLoader;
use crate::state::Session;
use crate::AppWindow;
use std::cell::RefCell;
use std::rc::Rc;

/// Sets up all navigation-related callbacks on the UI.
pub fn setup_navigation_callbacks(
    ui: &AppWindow,
    loader: ActivityLoader,
    session: Rc<RefCell<Session>>,
) {
    setup_next_activity(ui, loader.clone(), session.clone());
    setup_prev_activity(ui, loader, session);
}

fn setup_next_activity(ui: &AppWindow, loader: ActivityLoader, session: Rc<RefCell<Session>>) {
    ui.on_next_activity(move || {
        // Drop the borrow before calling the loader (which mutably borrows)
        let next_idx = {
            let s = session.borrow();
            let next = s.manifest.current_index + 1;
            if next >= s.manifest.len() {
                return;
            }
            next
        };

        loader(next_idx);
    });
}

fn setup_prev_activity(ui: &AppWindow, loader: ActivityLoader, session: Rc<RefCell<Session>>) {
    ui.on_prev_activity(move || {
        let prev_idx = {
            let s = session.borrow();
            if s.manifest.current_index == 0 {
                return;
            }
            s.manifest.current_index - 1
        };

        loader(prev_idx);
    });
}
