//! Selection callbacks for answer hot zones.
//!
//! Handles: toggle_answer, submit

use crate::state::Session;
use crate::view::refresh_view;
use crate::AppWindow;
use circle_player::{CartItem, SelectionPayload};
use slint::ComponentHandle;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

/// Sets up all selection-related callbacks on the UI.
pub fn setup_selection_callbacks(ui: &AppWindow, session: Rc<RefCell<Session>>) {
    session
        .borrow_mut()
        .player
        .on_selection_changed(|payload| match serde_json::to_string(payload) {
            Ok(json) => log::info!("selection changed: {json}"),
            Err(e) => log::warn!("could not serialize selection: {e}"),
        });

    setup_toggle_answer(ui, session.clone());
    setup_submit(ui, session);
}

fn setup_toggle_answer(ui: &AppWindow, session: Rc<RefCell<Session>>) {
    let ui_weak = ui.as_weak();
    ui.on_toggle_answer(move |index| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let Ok(answer) = usize::try_from(index) else { return };
        let mut s = session.borrow_mut();
        if let Err(e) = s.player.toggle(answer) {
            ui.set_status_text(format!("{e}").into());
            return;
        }
        refresh_view(&ui, &s);
    });
}

fn write_payload(path: &Path, payload: &SelectionPayload) -> Result<(), String> {
    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| format!("Serialize selection: {e}"))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| format!("Selection dir create: {e}"))?;
    }
    std::fs::write(path, json).map_err(|e| format!("Write selection {}: {e}", path.display()))
}

fn setup_submit(ui: &AppWindow, session: Rc<RefCell<Session>>) {
    let ui_weak = ui.as_weak();
    ui.on_submit(move || {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut guard = session.borrow_mut();
        let s = &mut *guard;

        let payload = match s.player.submit() {
            Ok(payload) => payload,
            Err(e) => {
                ui.set_status_text(format!("{e}").into());
                return;
            }
        };

        let entry = s.manifest.current().clone();
        let results_dir = s.config.activity.results_dir();
        let out_path = entry.selection_path(results_dir.as_deref());
        if let Err(e) = write_payload(&out_path, &payload) {
            log::error!("{e}");
        } else {
            log::info!("selection written to {}", out_path.display());
        }

        let section_path = s.player.definition().section_path.clone();
        let id = if section_path.is_empty() {
            entry.answer_key_path.display().to_string()
        } else {
            section_path.clone()
        };
        let title = entry
            .image_path
            .file_stem()
            .and_then(|f| f.to_str())
            .unwrap_or("?")
            .to_string();
        s.cart.add(CartItem {
            id,
            section_path,
            title,
        });

        refresh_view(&ui, s);
    });
}
