use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::api::EngineError;

pub const DEFAULT_SEED: u64 = 0x5EED;
pub const DEFAULT_OCTAVES: u32 = 4;
pub const DEFAULT_PERSISTENCE: f64 = 0.5;
pub const DEFAULT_LACUNARITY: f64 = 2.0;
pub const DEFAULT_SCALE: f64 = 1.0 / 32.0;

/// How the scalar field is levelled before color mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Levels {
    /// Fractal values are mapped as they are.
    #[default]
    Fixed,
    /// The field is rescaled so its own minimum and maximum span `[-1, 1]`.
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    /// Position in `[0, 1]`, where 0 is intensity 0 and 1 is intensity 255.
    pub position: f64,
    pub color: [u8; 4],
}

impl ColorStop {
    pub const fn new(position: f64, color: [u8; 4]) -> Self {
        Self { position, color }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum ColorMap {
    #[default]
    Grayscale,
    /// Stops interpolated into a 256-entry lookup keyed by intensity.
    Palette(Vec<ColorStop>),
}

impl ColorMap {
    /// Water, shore, grass, rock and snow bands.
    pub fn terrain() -> Self {
        ColorMap::Palette(vec![
            ColorStop::new(0.0, [12, 36, 94, 255]),
            ColorStop::new(0.42, [40, 96, 170, 255]),
            ColorStop::new(0.48, [214, 196, 140, 255]),
            ColorStop::new(0.55, [72, 140, 60, 255]),
            ColorStop::new(0.72, [110, 96, 82, 255]),
            ColorStop::new(0.86, [240, 240, 244, 255]),
            ColorStop::new(1.0, [255, 255, 255, 255]),
        ])
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        match self {
            ColorMap::Grayscale => Ok(()),
            ColorMap::Palette(stops) if stops.is_empty() => {
                Err(EngineError::InvalidConfig("palette needs at least one stop".into()))
            }
            ColorMap::Palette(stops) => {
                match stops.iter().find(|s| !(0.0..=1.0).contains(&s.position)) {
                    Some(stop) => Err(EngineError::InvalidConfig(format!(
                        "palette stop position {} outside [0, 1]",
                        stop.position
                    ))),
                    None => Ok(()),
                }
            }
        }
    }
}

/// Parameters of one draw. Every field falls back to its default when absent
/// from a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub seed: u64,
    pub octaves: u32,
    pub persistence: f64,
    pub lacunarity: f64,
    pub scale: f64,
    /// Lattice cells across the longer canvas side. When set, it replaces
    /// `scale` with `cells / max(width, height)` for each draw.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cells: Option<f64>,
    pub levels: Levels,
    pub color_map: ColorMap,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            octaves: DEFAULT_OCTAVES,
            persistence: DEFAULT_PERSISTENCE,
            lacunarity: DEFAULT_LACUNARITY,
            scale: DEFAULT_SCALE,
            cells: None,
            levels: Levels::Fixed,
            color_map: ColorMap::Grayscale,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.octaves < 1 {
            return Err(EngineError::InvalidConfig(format!(
                "octaves must be at least 1, got {}",
                self.octaves
            )));
        }
        // Written as negated ranges so NaN is rejected too.
        if !(self.persistence > 0.0 && self.persistence < 1.0) {
            return Err(EngineError::InvalidConfig(format!(
                "persistence must be in (0, 1), got {}",
                self.persistence
            )));
        }
        if !(self.lacunarity > 1.0 && self.lacunarity.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "lacunarity must be a finite value above 1, got {}",
                self.lacunarity
            )));
        }
        if !(self.scale > 0.0 && self.scale.is_finite()) {
            return Err(EngineError::InvalidConfig(format!(
                "scale must be a finite value above 0, got {}",
                self.scale
            )));
        }
        if let Some(cells) = self.cells {
            if !(cells > 0.0 && cells.is_finite()) {
                return Err(EngineError::InvalidConfig(format!(
                    "cells must be a finite value above 0, got {cells}"
                )));
            }
        }
        self.color_map.validate()
    }

    /// The config to sample a `width x height` canvas with: `scale` is derived
    /// from `cells` when that is set, otherwise the config is used as is.
    pub fn fit_to(&self, width: u32, height: u32) -> Cow<'_, EngineConfig> {
        match self.cells {
            Some(cells) => {
                let longest = width.max(height).max(1);
                Cow::Owned(Self { scale: cells / f64::from(longest), ..self.clone() })
            }
            None => Cow::Borrowed(self),
        }
    }

    pub fn from_ron_str(text: &str) -> Result<Self, EngineError> {
        ron::from_str(text).map_err(|e| EngineError::ConfigParse(e.to_string()))
    }

    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        serde_json::from_str(text).map_err(|e| EngineError::ConfigParse(e.to_string()))
    }

    pub fn to_ron_string(&self) -> Result<String, EngineError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| EngineError::ConfigParse(e.to_string()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_octaves(mut self, octaves: u32) -> Self {
        self.octaves = octaves;
        self
    }

    pub fn with_persistence(mut self, persistence: f64) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn with_lacunarity(mut self, lacunarity: f64) -> Self {
        self.lacunarity = lacunarity;
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_cells(mut self, cells: f64) -> Self {
        self.cells = Some(cells);
        self
    }

    pub fn with_levels(mut self, levels: Levels) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_color_map(mut self, color_map: ColorMap) -> Self {
        self.color_map = color_map;
        self
    }
}
