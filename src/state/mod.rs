//! State owned by the running player window.

use circle_player::config::PlayerConfig;
use circle_player::{ActivityDefinition, ActivityManifest, ActivityPlayer, QuizCart};

/// Everything the UI callbacks share, behind one `Rc<RefCell<_>>`.
pub struct Session {
    pub manifest: ActivityManifest,
    pub player: ActivityPlayer,
    pub cart: QuizCart,
    pub config: PlayerConfig,
}

impl Session {
    pub fn new(manifest: ActivityManifest, config: PlayerConfig) -> Self {
        let player = ActivityPlayer::new(
            ActivityDefinition::default(),
            config.layout.jitter_tolerance_px,
        );
        Self {
            manifest,
            player,
            cart: QuizCart::new(),
            config,
        }
    }
}
