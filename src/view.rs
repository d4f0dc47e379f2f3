//! Pushes player state into the window properties.

use circle_player::{ActivityPhase, MarkerShape};
use slint::{ModelRc, VecModel};

use crate::state::Session;
use crate::utils::parse_color;
use crate::{AppWindow, HotZone};

/// Sync every player-derived property. Hot zones are only published while a
/// projection exists, so the window never draws zones for unknown geometry.
pub fn refresh_view(ui: &AppWindow, session: &Session) {
    let player = &session.player;
    let definition = player.definition();
    let marker = definition.kind.marker();
    let phase = player.phase();

    let zones: Vec<HotZone> = player
        .projection()
        .map(|projection| {
            projection
                .iter()
                .map(|(index, region)| HotZone {
                    index: index as i32,
                    left: region.left as f32,
                    top: region.top as f32,
                    width: region.width as f32,
                    height: region.height as f32,
                    selected: player.selection().is_selected(index),
                })
                .collect()
        })
        .unwrap_or_default();
    ui.set_zones(ModelRc::new(VecModel::from(zones)));

    ui.set_loading(matches!(phase, ActivityPhase::Unloaded | ActivityPhase::Loading));
    ui.set_load_failed(phase == ActivityPhase::Error);
    ui.set_submitted(phase == ActivityPhase::Submitted);
    ui.set_error_text(
        player
            .load_error()
            .map(|e| format!("Failed to load activity\n{e}"))
            .unwrap_or_default()
            .into(),
    );

    ui.set_cross_marker(marker.shape == MarkerShape::Cross);
    ui.set_outline_idle(marker.outline_idle && session.config.appearance.show_zone_outlines);
    ui.set_prompt(marker.label.into());
    ui.set_position_text(session.manifest.position_label().into());

    let appearance = &session.config.appearance;
    ui.set_light_theme(appearance.is_light());
    if let Some(color) = parse_color(&appearance.selected_color) {
        ui.set_selected_color(color);
    }
    if let Some(color) = parse_color(&appearance.zone_color) {
        ui.set_zone_color(color);
    }

    let status = match phase {
        ActivityPhase::Unloaded | ActivityPhase::Loading => "Loading activity...".to_string(),
        ActivityPhase::Error => "Activity unavailable".to_string(),
        ActivityPhase::Ready if definition.grouping.is_multi_select() => {
            format!("{} selected", player.answered_count())
        }
        ActivityPhase::Ready => format!(
            "{} of {} answered",
            player.answered_count(),
            definition.question_count()
        ),
        ActivityPhase::Submitted => format!(
            "Submitted ({} in quiz cart)",
            session.cart.len()
        ),
    };
    ui.set_status_text(status.into());
}
