//! Activity loading: answer key on the UI thread, image decode on a worker.
//!
//! Handles: image_decoded, image_failed, retry

use crate::state::Session;
use crate::view::refresh_view;
use crate::AppWindow;
use circle_player::{AnswerKey, ImageGeometry, LoadOutcome, LoadTicket, PlayerError};
use slint::{ComponentHandle, Rgba8Pixel, SharedPixelBuffer};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Loads the activity at a manifest index.
pub type ActivityLoader = Rc<dyn Fn(usize)>;

/// Build the shared loader used by startup, navigation and retry.
pub fn make_loader(ui: &AppWindow, session: Rc<RefCell<Session>>) -> ActivityLoader {
    let ui_weak = ui.as_weak();
    Rc::new(move |index: usize| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut guard = session.borrow_mut();
        let s = &mut *guard;
        if index >= s.manifest.len() {
            return;
        }
        s.manifest.current_index = index;
        let entry = s.manifest.current().clone();

        let definition = AnswerKey::load(&entry.answer_key_path)
            .and_then(|key| key.into_definition(s.config.activity.group_size()));

        s.player.load_activity(definition.as_ref().cloned().unwrap_or_default());
        let ticket = match s.player.begin_load() {
            Ok(ticket) => ticket,
            Err(e) => {
                ui.set_status_text(format!("{e}").into());
                return;
            }
        };

        match definition {
            Ok(_) => spawn_image_decode(&ui, entry.image_path.clone(), ticket),
            Err(e) => {
                log::error!("answer key {}: {e}", entry.answer_key_path.display());
                s.player.finish_load(ticket, Err(PlayerError::AnswerKey(e)));
            }
        }
        refresh_view(&ui, s);
    })
}

/// Sets up all loading-related callbacks on the UI.
pub fn setup_loading_callbacks(
    ui: &AppWindow,
    loader: ActivityLoader,
    session: Rc<RefCell<Session>>,
) {
    setup_image_decoded(ui, session.clone());
    setup_image_failed(ui, session.clone());
    setup_retry(ui, loader, session);
}

fn decode_rgba(path: &Path) -> Result<SharedPixelBuffer<Rgba8Pixel>, String> {
    let img = image::open(path)
        .map_err(|e| format!("{}: {e}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(SharedPixelBuffer::clone_from_slice(img.as_raw(), width, height))
}

/// Decode off the UI thread and post the result back with its ticket id.
fn spawn_image_decode(ui: &AppWindow, path: PathBuf, ticket: LoadTicket) {
    let ui_weak = ui.as_weak();
    std::thread::spawn(move || {
        let decoded = decode_rgba(&path);
        let id = ticket.id() as i32;
        let posted = ui_weak.upgrade_in_event_loop(move |ui| match decoded {
            Ok(buffer) => ui.invoke_image_decoded(slint::Image::from_rgba8(buffer), id),
            Err(msg) => ui.invoke_image_failed(id, msg.into()),
        });
        if let Err(e) = posted {
            log::warn!("event loop closed before {} finished decoding: {e}", path.display());
        }
    });
}

fn setup_image_decoded(ui: &AppWindow, session: Rc<RefCell<Session>>) {
    let ui_weak = ui.as_weak();
    ui.on_image_decoded(move |image, id| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut s = session.borrow_mut();
        let size = image.size();
        let geometry = ImageGeometry::new(size.width as f64, size.height as f64)
            .ok_or_else(|| PlayerError::ImageLoad("image has no pixels".into()));

        match s.player.finish_load(LoadTicket::from_id(id as u32), geometry) {
            LoadOutcome::Stale => return,
            LoadOutcome::Applied => ui.set_image_source(image),
            LoadOutcome::Failed => {}
        }
        refresh_view(&ui, &s);
    });
}

fn setup_image_failed(ui: &AppWindow, session: Rc<RefCell<Session>>) {
    let ui_weak = ui.as_weak();
    ui.on_image_failed(move |id, message| {
        let Some(ui) = ui_weak.upgrade() else { return };
        let mut s = session.borrow_mut();
        let outcome = s.player.finish_load(
            LoadTicket::from_id(id as u32),
            Err(PlayerError::ImageLoad(message.to_string())),
        );
        if outcome != LoadOutcome::Stale {
            refresh_view(&ui, &s);
        }
    });
}

fn setup_retry(ui: &AppWindow, loader: ActivityLoader, session: Rc<RefCell<Session>>) {
    ui.on_retry(move || {
        // Release the borrow before the loader takes it mutably
        let index = session.borrow().manifest.current_index;
        loader(index);
    });
}
