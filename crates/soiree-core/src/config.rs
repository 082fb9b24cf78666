use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub marquee: MarqueeConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Catalog JSON file; the built-in sample catalog is used when unset
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog_path: None,
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Hero slideshow auto-advance interval in milliseconds (0 = disabled)
    #[serde(default = "default_hero_interval")]
    pub hero_interval_ms: u64,
    /// Testimonial carousel auto-advance interval in milliseconds (0 = disabled)
    #[serde(default = "default_testimonial_interval")]
    pub testimonial_interval_ms: u64,
    /// Start auto-advancing as soon as the showcase opens
    #[serde(default = "default_true")]
    pub autoplay: bool,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            hero_interval_ms: default_hero_interval(),
            testimonial_interval_ms: default_testimonial_interval(),
            autoplay: default_true(),
        }
    }
}

impl CarouselConfig {
    /// Hero interval, `None` when auto-advance is disabled
    pub fn hero_interval(&self) -> Option<Duration> {
        non_zero_millis(self.hero_interval_ms)
    }

    /// Testimonial interval, `None` when auto-advance is disabled
    pub fn testimonial_interval(&self) -> Option<Duration> {
        non_zero_millis(self.testimonial_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarqueeConfig {
    /// Scroll speed in columns per frame
    #[serde(default = "default_marquee_speed")]
    pub speed: f64,
    /// Width of one testimonial card in columns
    #[serde(default = "default_card_width")]
    pub card_width: u16,
    /// Gap between cards in columns
    #[serde(default = "default_card_gap")]
    pub card_gap: u16,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            speed: default_marquee_speed(),
            card_width: default_card_width(),
            card_gap: default_card_gap(),
        }
    }
}

impl MarqueeConfig {
    /// Horizontal space one card occupies, gap included
    pub fn item_extent(&self) -> f64 {
        f64::from(self.card_width) + f64::from(self.card_gap)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Initial clip fraction (0-100)
    #[serde(default = "default_initial_fraction")]
    pub initial_fraction: f64,
    /// Fraction change per keyboard nudge
    #[serde(default = "default_keyboard_step")]
    pub keyboard_step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            initial_fraction: default_initial_fraction(),
            keyboard_step: default_keyboard_step(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate while a frame loop (marquee) is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
    /// Render gallery media as half-block previews
    #[serde(default = "default_true")]
    pub image_preview: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
            image_preview: default_true(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<S-Tab>" (Shift+Tab), "<CR>" (Enter), "<Esc>", "<Space>"
///
/// The modal viewer's own keys (arrows, Esc, i) are fixed and not configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the showcase
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Focus next section
    #[serde(default = "default_key_focus_next")]
    pub focus_next: String,
    /// Focus previous section
    #[serde(default = "default_key_focus_prev")]
    pub focus_prev: String,
    /// Next item in the focused section
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Previous item in the focused section
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Play/pause auto-advance (or the marquee)
    #[serde(default = "default_key_toggle_play")]
    pub toggle_play: String,
    /// Open the modal viewer on the gallery image or featured event
    #[serde(default = "default_key_open_viewer")]
    pub open_viewer: String,
    /// Cycle the category filter of the gallery or featured events
    #[serde(default = "default_key_cycle_category")]
    pub cycle_category: String,
    /// Start typing a gallery search
    #[serde(default = "default_key_search")]
    pub search: String,
    /// Move the comparison slider left
    #[serde(default = "default_key_slider_left")]
    pub slider_left: String,
    /// Move the comparison slider right
    #[serde(default = "default_key_slider_right")]
    pub slider_right: String,
    /// Open the current media in an external viewer
    #[serde(default = "default_key_open_external")]
    pub open_external: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            focus_next: default_key_focus_next(),
            focus_prev: default_key_focus_prev(),
            next: default_key_next(),
            prev: default_key_prev(),
            toggle_play: default_key_toggle_play(),
            open_viewer: default_key_open_viewer(),
            cycle_category: default_key_cycle_category(),
            search: default_key_search(),
            slider_left: default_key_slider_left(),
            slider_right: default_key_slider_right(),
            open_external: default_key_open_external(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_focus_next() -> String { "<Tab>".to_string() }
fn default_key_focus_prev() -> String { "<S-Tab>".to_string() }
fn default_key_next() -> String { "l".to_string() }
fn default_key_prev() -> String { "h".to_string() }
fn default_key_toggle_play() -> String { "<Space>".to_string() }
fn default_key_open_viewer() -> String { "<CR>".to_string() }
fn default_key_cycle_category() -> String { "c".to_string() }
fn default_key_search() -> String { "/".to_string() }
fn default_key_slider_left() -> String { "[".to_string() }
fn default_key_slider_right() -> String { "]".to_string() }
fn default_key_open_external() -> String { "o".to_string() }

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("soiree")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_hero_interval() -> u64 {
    5000
}

fn default_testimonial_interval() -> u64 {
    6000
}

fn default_marquee_speed() -> f64 {
    0.5
}

fn default_card_width() -> u16 {
    34
}

fn default_card_gap() -> u16 {
    2
}

fn default_initial_fraction() -> f64 {
    50.0
}

fn default_keyboard_step() -> f64 {
    5.0
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    30
}

fn non_zero_millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when missing
    pub fn load_from(config_path: &std::path::Path) -> crate::Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/soiree/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("soiree")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the log file path used while the terminal UI owns stdout
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("soiree.log")
    }

    /// Catalog path with tilde expansion, if one is configured
    pub fn catalog_path(&self) -> Option<PathBuf> {
        self.general.catalog_path.as_deref().map(expand_tilde)
    }
}
