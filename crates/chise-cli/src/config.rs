//! Configuration loading and management.

use std::path::{Path, PathBuf};

use chise_core::contrast::DEFAULT_PROBE_MARGIN;
use chise_core::media::DEFAULT_PREVIEW_ORIGIN;
use chise_core::scroll::{DEFAULT_SCROLL_DURATION, DEFAULT_TOP_OFFSET};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Origin embedded in preview URIs.
    pub preview_origin: String,

    /// Inset of the contrast probe from the control cluster's corner.
    pub probe_margin_px: f64,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub scroll: ScrollConfig,
}

/// Partner grid defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub cols: usize,
    pub rows: usize,
    pub gap_px: u32,
    pub use_screenshot: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cols: 3,
            rows: 4,
            gap_px: 16,
            use_screenshot: false,
        }
    }
}

/// Scroll-to-section animation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    pub duration_ms: u64,
    pub top_offset_px: f64,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            duration_ms: u64::try_from(DEFAULT_SCROLL_DURATION.as_millis()).unwrap_or(900),
            top_offset_px: DEFAULT_TOP_OFFSET,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            preview_origin: DEFAULT_PREVIEW_ORIGIN.to_string(),
            probe_margin_px: DEFAULT_PROBE_MARGIN,
            grid: GridConfig::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally merging a
    /// specific file on top.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (CHISE_*, nested keys split on __)
        figment = figment.merge(Env::prefixed("CHISE_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for chise.
///
/// On Linux: `~/.config/chise`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("chise"))
}
