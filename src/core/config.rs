//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.swipedeck/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::catalog::providers::cataas::DEFAULT_BASE_URL;
use crate::core::deck::{DEFAULT_PRELOAD_END, DEFAULT_PRELOAD_START, DeckSettings};
use crate::core::gesture::SWIPE_THRESHOLD;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SwipedeckConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub deck: DeckConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CatalogConfig {
    pub base_url: Option<String>,
    pub tag: Option<String>,
    pub batch_size: Option<usize>,
    pub max_offset: Option<usize>,
    pub image_width: Option<u32>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DeckConfig {
    pub swipe_threshold: Option<f32>,
    pub animation_ms: Option<u64>,
    pub preload_start: Option<usize>,
    pub preload_end: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InputConfig {
    pub pixels_per_column: Option<f32>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_TAG: &str = "cute";
pub const DEFAULT_BATCH_SIZE: usize = 10;
pub const MAX_BATCH_SIZE: usize = 1000;
pub const DEFAULT_MAX_OFFSET: usize = 500;
pub const DEFAULT_IMAGE_WIDTH: u32 = 500;
pub const DEFAULT_ANIMATION_MS: u64 = 300;
pub const DEFAULT_PIXELS_PER_COLUMN: f32 = 8.0;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub base_url: String,
    pub tag: String,
    pub batch_size: usize,
    pub max_offset: usize,
    pub image_width: u32,
    pub swipe_threshold: f32,
    pub animation_ms: u64,
    pub preload_start: usize,
    pub preload_end: usize,
    pub pixels_per_column: f32,
}

impl ResolvedConfig {
    pub fn deck_settings(&self) -> DeckSettings {
        DeckSettings {
            threshold: self.swipe_threshold,
            animation: Duration::from_millis(self.animation_ms),
            preload_start: self.preload_start,
            preload_end: self.preload_end,
        }
    }
}

/// Values given on the command line. `None` = not specified.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub tag: Option<String>,
    pub batch_size: Option<usize>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.swipedeck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".swipedeck").join("config.toml"))
}

/// Load config from `~/.swipedeck/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `SwipedeckConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<SwipedeckConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(SwipedeckConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(SwipedeckConfig::default());
    }

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<SwipedeckConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: SwipedeckConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Swipedeck Configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [catalog]
# base_url = "https://cataas.com"    # Or set SWIPEDECK_BASE_URL
# tag = "cute"                       # Or set SWIPEDECK_TAG
# batch_size = 10
# max_offset = 500                   # Random skip is drawn from [0, max_offset)
# image_width = 500

# [deck]
# swipe_threshold = 100.0            # Pixels a drag must exceed to count
# animation_ms = 300                 # Delay before the next card comes up
# preload_start = 2                  # Warm items [index + start, index + end)
# preload_end = 5

# [input]
# pixels_per_column = 8.0            # One terminal column counts as this many px
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &SwipedeckConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &SwipedeckConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("SWIPEDECK_BASE_URL"))
        .or_else(|| config.catalog.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Tag: CLI → env → config → default
    let tag = cli
        .tag
        .clone()
        .or_else(|| env("SWIPEDECK_TAG"))
        .or_else(|| config.catalog.tag.clone())
        .unwrap_or_else(|| DEFAULT_TAG.to_string());

    let mut batch_size = cli
        .batch_size
        .or(config.catalog.batch_size)
        .unwrap_or(DEFAULT_BATCH_SIZE);
    if batch_size > MAX_BATCH_SIZE {
        warn!("batch_size {} capped at {}", batch_size, MAX_BATCH_SIZE);
        batch_size = MAX_BATCH_SIZE;
    }

    let preload_start = config.deck.preload_start.unwrap_or(DEFAULT_PRELOAD_START);
    let mut preload_end = config.deck.preload_end.unwrap_or(DEFAULT_PRELOAD_END);
    if preload_end < preload_start {
        warn!(
            "preload_end ({}) < preload_start ({}), preloading disabled",
            preload_end, preload_start
        );
        preload_end = preload_start;
    }

    let swipe_threshold = match config.deck.swipe_threshold {
        Some(t) if t > 0.0 => t,
        Some(t) => {
            warn!("Ignoring non-positive swipe_threshold {}", t);
            SWIPE_THRESHOLD
        }
        None => SWIPE_THRESHOLD,
    };

    let pixels_per_column = match config.input.pixels_per_column {
        Some(p) if p > 0.0 => p,
        Some(p) => {
            warn!("Ignoring non-positive pixels_per_column {}", p);
            DEFAULT_PIXELS_PER_COLUMN
        }
        None => DEFAULT_PIXELS_PER_COLUMN,
    };

    ResolvedConfig {
        base_url,
        tag,
        batch_size,
        max_offset: config.catalog.max_offset.unwrap_or(DEFAULT_MAX_OFFSET),
        image_width: config.catalog.image_width.unwrap_or(DEFAULT_IMAGE_WIDTH),
        swipe_threshold,
        animation_ms: config.deck.animation_ms.unwrap_or(DEFAULT_ANIMATION_MS),
        preload_start,
        preload_end,
        pixels_per_column,
    }
}
