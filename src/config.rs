use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "SKETCHPAD_CONFIG";

/// Errors that can occur while loading the widget configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Static settings for one sketchpad instance.
///
/// Colors are stored as plain `[r, g, b]` triples so the file format stays
/// independent of the UI toolkit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys fall back to the defaults below
pub struct SketchConfig {
    /// Width and height of the square surface, in pixels
    pub surface_size: u32,
    pub background: [u8; 3],
    pub initial_color: [u8; 3],
    pub initial_stroke_width: u32,
    /// Radius of a single eraser dab, in pixels
    pub eraser_radius: f32,
    /// Maximum number of undo snapshots kept; the oldest is evicted first
    pub history_capacity: usize,
    pub palette: Vec<[u8; 3]>,
    /// Directory that receives `<name>.png` on save
    pub save_dir: PathBuf,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            surface_size: 700,
            background: [255, 255, 255],
            initial_color: [0, 0, 0],
            initial_stroke_width: 5,
            eraser_radius: 18.0,
            history_capacity: 64,
            palette: vec![
                [0x2c, 0x2c, 0x2c],
                [0xff, 0xff, 0xff],
                [0xff, 0x3b, 0x30],
                [0xff, 0x95, 0x00],
                [0xff, 0xcc, 0x00],
                [0x4c, 0xd9, 0x63],
                [0x5a, 0xc8, 0xfa],
                [0x05, 0x79, 0xff],
                [0x58, 0x56, 0xd6],
            ],
            save_dir: PathBuf::from("."),
        }
    }
}

impl SketchConfig {
    /// Load and validate a config from a JSON file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let data = fs::read_to_string(path)?;
        let config = Self::from_json(&data)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_json(data: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(data)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file named by `SKETCHPAD_CONFIG`, or the defaults when it is unset
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.surface_size == 0 {
            return Err(ConfigError::Invalid("surface_size must be positive".into()));
        }
        if self.initial_stroke_width == 0 {
            return Err(ConfigError::Invalid(
                "initial_stroke_width must be positive".into(),
            ));
        }
        if self.eraser_radius.is_nan() || self.eraser_radius <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "eraser_radius must be positive, got {}",
                self.eraser_radius
            )));
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::Invalid("history_capacity must be positive".into()));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("palette must not be empty".into()));
        }
        Ok(())
    }

    pub fn background_color(&self) -> Color32 {
        to_color32(self.background)
    }

    pub fn initial_color(&self) -> Color32 {
        to_color32(self.initial_color)
    }

    pub fn palette_colors(&self) -> impl Iterator<Item = Color32> + '_ {
        self.palette.iter().copied().map(to_color32)
    }
}

fn to_color32([r, g, b]: [u8; 3]) -> Color32 {
    Color32::from_rgb(r, g, b)
}
