//! Configuration file handling and settings resolution.
//!
//! Loads configuration from `<config_dir>/termcam/config.toml` or a custom
//! path, then merges it with command-line flags. Flags win over the file,
//! and the file wins over built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ascii::{
    CharSet, ColorOverride, GlyphTable, ParseColorError, RenderError, RenderMode, Zoom,
};
use crate::camera::{CameraSettings, Resolution};
use crate::cli::Args;
use crate::greenscreen::{
    FixedIndex, LatestIndex, SampleSelection, SampleStore, DEFAULT_SAMPLE_INDEX,
    DEFAULT_THRESHOLD,
};
use crate::pipeline::{PipelineOptions, RunMode, DEFAULT_RETRY_DELAY};
use crate::terminal::ColorProfile;

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub greenscreen: GreenscreenConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CameraConfig {
    #[serde(default)]
    pub device: u32,
    #[serde(default = "default_cam_width")]
    pub width: u32,
    #[serde(default = "default_cam_height")]
    pub height: u32,
    #[serde(default)]
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            device: 0,
            width: default_cam_width(),
            height: default_cam_height(),
            mirror: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Output columns; follows the terminal when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u16>,
    /// Output rows; follows the terminal when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u16>,
    #[serde(default = "default_zoom")]
    pub zoom: u32,
    #[serde(default)]
    pub ansi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default = "default_charset")]
    pub charset: String,
    /// Custom glyph ramp; overrides `charset`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub glyphs: Option<String>,
    /// `auto`, `truecolor`, `ansi256`, `ansi` or `ascii`
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default)]
    pub fps: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            zoom: default_zoom(),
            ansi: false,
            color: None,
            charset: default_charset(),
            glyphs: None,
            profile: default_profile(),
            fps: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GreenscreenConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default = "default_sample_dir")]
    pub sample_dir: PathBuf,
    #[serde(default = "default_sample_index")]
    pub sample_index: u32,
    /// `fixed` (use `sample_index`) or `latest`
    #[serde(default = "default_selection")]
    pub selection: String,
}

impl Default for GreenscreenConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            threshold: default_threshold(),
            sample_dir: default_sample_dir(),
            sample_index: default_sample_index(),
            selection: default_selection(),
        }
    }
}

fn default_cam_width() -> u32 {
    Resolution::FULL_HD.width
}

fn default_cam_height() -> u32 {
    Resolution::FULL_HD.height
}

fn default_zoom() -> u32 {
    Zoom::MAX as u32
}

fn default_charset() -> String {
    CharSet::Classic.name().to_string()
}

fn default_profile() -> String {
    "auto".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_sample_dir() -> PathBuf {
    PathBuf::from("bgsample")
}

fn default_sample_index() -> u32 {
    DEFAULT_SAMPLE_INDEX
}

fn default_selection() -> String {
    "fixed".to_string()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write the default configuration to `path`, creating parent
    /// directories. Refuses to overwrite an existing file.
    pub fn write_default(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let content = format!(
            "# termcam configuration\n# Command-line flags override these values.\n\n{}",
            Config::default().to_toml()?
        );
        std::fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Errors from loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),
    #[error(transparent)]
    InvalidColor(#[from] ParseColorError),
    #[error("invalid glyphs: {0}")]
    InvalidGlyphs(#[from] RenderError),
    #[error("greenscreen threshold must be a finite number >= 0, got {0}")]
    InvalidThreshold(f64),
    #[error("unknown charset '{0}': expected classic, standard, blocks or minimal")]
    UnknownCharset(String),
    #[error("unknown color profile '{0}': expected auto, truecolor, ansi256, ansi or ascii")]
    UnknownProfile(String),
    #[error("unknown sample selection '{0}': expected fixed or latest")]
    UnknownSelection(String),
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("termcam").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/termcam/config.toml")
        })
}

/// How the background sample is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleChoice {
    Fixed(u32),
    Latest,
}

impl SampleChoice {
    pub fn policy(&self) -> Box<dyn SampleSelection> {
        match *self {
            SampleChoice::Fixed(index) => Box::new(FixedIndex(index)),
            SampleChoice::Latest => Box::new(LatestIndex),
        }
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub camera: CameraSettings,
    pub mode: RenderMode,
    pub zoom: Zoom,
    pub width: Option<u16>,
    pub height: Option<u16>,
    pub color_override: ColorOverride,
    pub glyphs: GlyphTable,
    /// Forced color profile; detected from the environment when `None`
    pub profile: Option<ColorProfile>,
    pub show_fps: bool,
    pub greenscreen: bool,
    pub threshold: f64,
    pub sample_dir: PathBuf,
    pub sample_choice: SampleChoice,
    /// Capture background samples instead of rendering
    pub generate: bool,
}

impl Settings {
    /// Merge command-line flags over the config file and validate.
    pub fn resolve(args: &Args, config: &Config) -> Result<Self, ConfigError> {
        let display = &config.display;
        let screen = &config.greenscreen;

        let camera = CameraSettings {
            device_index: args.device.unwrap_or(config.camera.device),
            resolution: Resolution::new(
                args.cam_width.unwrap_or(config.camera.width),
                args.cam_height.unwrap_or(config.camera.height),
            ),
            mirror: args.mirror || config.camera.mirror,
            ..CameraSettings::default()
        };

        let mode = if args.ansi || display.ansi {
            RenderMode::Ansi
        } else {
            RenderMode::Ascii
        };

        let color_override = match args.color {
            Some(color) => color,
            None => match display.color.as_deref() {
                Some(text) if !text.trim().is_empty() => text.parse()?,
                _ => ColorOverride::UNSET,
            },
        };

        // A charset flag beats custom glyphs from the file.
        let glyphs = match (args.charset, display.glyphs.as_deref()) {
            (Some(set), _) => GlyphTable::from(CharSet::from(set)),
            (None, Some(custom)) => GlyphTable::parse(custom)?,
            (None, None) => CharSet::from_name(&display.charset)
                .map(GlyphTable::from)
                .ok_or_else(|| ConfigError::UnknownCharset(display.charset.clone()))?,
        };

        let profile = match args.profile {
            Some(choice) => choice.profile(),
            None => parse_profile(&display.profile)?,
        };

        let threshold = args.threshold.unwrap_or(screen.threshold);
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }

        let sample_choice = if args.latest_sample {
            SampleChoice::Latest
        } else if let Some(index) = args.sample_index {
            SampleChoice::Fixed(index)
        } else {
            match screen.selection.to_ascii_lowercase().as_str() {
                "fixed" => SampleChoice::Fixed(screen.sample_index),
                "latest" => SampleChoice::Latest,
                other => return Err(ConfigError::UnknownSelection(other.to_string())),
            }
        };

        Ok(Self {
            camera,
            mode,
            zoom: Zoom::new(args.zoom.unwrap_or(display.zoom)),
            // 0 means "follow the terminal"
            width: args.width.or(display.width).filter(|&w| w > 0),
            height: args.height.or(display.height).filter(|&h| h > 0),
            color_override,
            glyphs,
            profile,
            show_fps: args.fps || display.fps,
            greenscreen: args.greenscreen || screen.enabled,
            threshold,
            sample_dir: args
                .sample_dir
                .clone()
                .unwrap_or_else(|| screen.sample_dir.clone()),
            sample_choice,
            generate: args.gen,
        })
    }

    pub fn sample_store(&self) -> SampleStore {
        SampleStore::new(&self.sample_dir)
    }

    /// Whether a background has to be loaded before the run.
    ///
    /// Sample generation takes precedence over greenscreen.
    pub fn needs_background(&self) -> bool {
        self.greenscreen && !self.generate
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            mode: self.mode,
            glyphs: self.glyphs.clone(),
            color_override: self.color_override,
            zoom: self.zoom,
            width: self.width,
            height: self.height,
            show_fps: self.show_fps,
            threshold: self.threshold,
            run_mode: if self.generate {
                RunMode::generate(self.sample_store())
            } else {
                RunMode::Render
            },
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

fn parse_profile(name: &str) -> Result<Option<ColorProfile>, ConfigError> {
    if name.eq_ignore_ascii_case("auto") {
        return Ok(None);
    }
    ColorProfile::from_name(name)
        .map(Some)
        .ok_or_else(|| ConfigError::UnknownProfile(name.to_string()))
}
