use color_sampler::magnifier::{DEFAULT_OFFSET, DEFAULT_RECT_NUM, DEFAULT_RECT_SIZE};
use color_sampler::MagnifierConfig;
use serde::Deserialize;
use std::path::Path;

use crate::error::PickError;
use crate::models::PaletteOptions;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Default palette extraction options
    #[serde(default)]
    pub palette: PaletteOptions,

    /// Magnifier geometry
    #[serde(default)]
    pub magnifier: MagnifierSettings,

    /// Image fetching
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Magnifier geometry as configured
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct MagnifierSettings {
    /// Cells per side (odd)
    #[serde(default = "default_rect_num")]
    pub rect_num: u32,

    /// Cell size in surface pixels
    #[serde(default = "default_rect_size")]
    pub rect_size: u32,

    /// Distance between cursor and overlay
    #[serde(default = "default_offset")]
    pub offset: f64,
}

fn default_rect_num() -> u32 {
    DEFAULT_RECT_NUM
}

fn default_rect_size() -> u32 {
    DEFAULT_RECT_SIZE
}

fn default_offset() -> f64 {
    DEFAULT_OFFSET
}

impl Default for MagnifierSettings {
    fn default() -> Self {
        Self {
            rect_num: DEFAULT_RECT_NUM,
            rect_size: DEFAULT_RECT_SIZE,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl MagnifierSettings {
    pub fn to_config(self) -> Result<MagnifierConfig, PickError> {
        Ok(MagnifierConfig::new(self.rect_num, self.rect_size)?.with_offset(self.offset))
    }
}

/// Settings for the HTTP client used by the rasterizer
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FetchConfig {
    /// Request timeout in seconds; no timeout when unset
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Reject responses larger than this many bytes
    #[serde(default)]
    pub max_bytes: Option<usize>,

    /// User-Agent header sent with image requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("img-color-pick/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            max_bytes: None,
            user_agent: default_user_agent(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults.
    ///
    /// A missing path, unreadable file or parse error logs a warning and
    /// yields the default configuration.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        length = config.palette.length,
                        rect_num = config.magnifier.rect_num,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(
                        %e,
                        path = %path.display(),
                        "Failed to parse config, using defaults"
                    );
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}
