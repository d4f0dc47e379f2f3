use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use crate::grouping::DEFAULT_GROUP_SIZE;
use crate::layout_lock::DEFAULT_JITTER_TOLERANCE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub appearance: AppearanceConfig,
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub activity: ActivityConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppearanceConfig {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_selected_color")]
    pub selected_color: String,
    #[serde(default = "default_zone_color")]
    pub zone_color: String,
    #[serde(default = "default_true")]
    pub show_zone_outlines: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_jitter_tolerance")]
    pub jitter_tolerance_px: f64,
    #[serde(default = "default_resize_poll_ms")]
    pub resize_poll_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityConfig {
    #[serde(default = "default_group_size")]
    pub default_group_size: usize,
    #[serde(default)]
    pub results_dir: Option<String>,
    #[serde(default)]
    pub recent_manifests: Vec<String>,
}

fn default_theme() -> String {
    "dark".to_string()
}

fn default_selected_color() -> String {
    "#e53935".to_string()
}

fn default_zone_color() -> String {
    "#ffffff40".to_string()
}

fn default_true() -> bool {
    true
}

fn default_jitter_tolerance() -> f64 {
    DEFAULT_JITTER_TOLERANCE
}

fn default_resize_poll_ms() -> u64 {
    100
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE.get()
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            selected_color: default_selected_color(),
            zone_color: default_zone_color(),
            show_zone_outlines: true,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            jitter_tolerance_px: DEFAULT_JITTER_TOLERANCE,
            resize_poll_ms: default_resize_poll_ms(),
        }
    }
}

impl Default for ActivityConfig {
    fn default() -> Self {
        Self {
            default_group_size: default_group_size(),
            results_dir: None,
            recent_manifests: Vec::new(),
        }
    }
}

impl AppearanceConfig {
    /// `"light"` selects the light palette; anything else keeps the dark one.
    pub fn is_light(&self) -> bool {
        self.theme.trim().eq_ignore_ascii_case("light")
    }
}

impl ActivityConfig {
    /// Group size for legacy `circleCount == 0`; a configured zero falls back
    /// to the built-in default.
    pub fn group_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.default_group_size).unwrap_or(DEFAULT_GROUP_SIZE)
    }

    pub fn results_dir(&self) -> Option<PathBuf> {
        self.results_dir
            .as_deref()
            .map(|dir| PathBuf::from(shellexpand::tilde(dir).as_ref()))
    }
}

/// Path of the config file in the platform config directory.
pub fn config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "circle-player")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Parse TOML config text.
pub fn parse_config(content: &str) -> Result<PlayerConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load configuration from `path`, or return defaults if it is missing or
/// unreadable.
pub fn load_config(path: &Path) -> PlayerConfig {
    if !path.exists() {
        return PlayerConfig::default();
    }
    match std::fs::read_to_string(path) {
        Ok(content) => match parse_config(&content) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to parse config file {}: {}. Using defaults.", path.display(), e);
                PlayerConfig::default()
            }
        },
        Err(e) => {
            log::warn!("Failed to read config file {}: {}. Using defaults.", path.display(), e);
            PlayerConfig::default()
        }
    }
}

/// Save configuration to `path`
pub fn save_config(config: &PlayerConfig, path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }

    let toml = toml::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(path, toml).map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Add a manifest path to the front of the recent list
pub fn add_recent_manifest(config: &mut PlayerConfig, path: String) {
    let recent = &mut config.activity.recent_manifests;
    recent.retain(|p| p != &path);
    recent.insert(0, path);
    // Keep only last 10
    recent.truncate(10);
}
