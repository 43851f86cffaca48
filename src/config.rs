// config.rs - Engine configuration
//
// Every section defaults to the values the interactive basin ships with,
// so `{}` is a complete config and partial JSON overrides only what it names.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;
use crate::sim::{CombTuning, TineTuning};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;
pub const DEFAULT_VERTEX_COUNT: usize = 300;
pub const MAX_VERTEX_COUNT: usize = 10_000;
/// Widest rake accepted: 2 * 64 + 1 tines.
pub const MAX_COMB_HALF_SPAN: u32 = 64;

/// Swatches offered to the user.
pub const BRUSH_PALETTE: [Color; 5] = [
    Color::rgb(0x1D, 0x35, 0x57),
    Color::rgb(0x40, 0xE0, 0xD0),
    Color::rgb(0xFF, 0xB7, 0x03),
    Color::rgb(0xE6, 0x39, 0x46),
    Color::rgb(0xF1, 0xFA, 0xEE),
];

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub canvas: CanvasConfig,
    pub physics: PhysicsConfig,
    pub render: RenderConfig,
    pub brush: BrushConfig,
    pub input: InputConfig,
    pub narration: NarrationConfig,
    /// Seed for demo geometry. None lets the host pick one per session.
    pub seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: DEFAULT_WIDTH, height: DEFAULT_HEIGHT }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Boundary points per drop. Smoothness vs. cost, not correctness.
    pub vertex_count: usize,
    pub tine: TineTuning,
    pub comb: CombTuning,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            vertex_count: DEFAULT_VERTEX_COUNT,
            tine: TineTuning::default(),
            comb: CombTuning::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub background: Color,
    /// Outline stroke; alpha keeps it close to invisible.
    pub outline: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::rgb(0xFD, 0xFB, 0xF7),
            outline: Color::rgba(0, 0, 0, 8),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrushConfig {
    pub min_radius: f32,
    pub max_radius: f32,
    pub radius: f32,
    pub color: Color,
    pub palette: Vec<Color>,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            min_radius: 10.0,
            max_radius: 250.0,
            radius: 40.0,
            color: BRUSH_PALETTE[1],
            palette: BRUSH_PALETTE.to_vec(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Minimum gap between processed pointer moves (~60 Hz).
    pub throttle_ms: f64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self { throttle_ms: 16.0 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrationConfig {
    /// Exact voice name to prefer.
    pub voice: String,
    /// Fallback: any voice whose name contains this.
    pub voice_hint: String,
    /// Fallback after that: any voice with this locale.
    pub locale: String,
    pub rate: f32,
}

impl Default for NarrationConfig {
    fn default() -> Self {
        Self {
            voice: "Google US English".to_string(),
            voice_hint: "US English".to_string(),
            locale: "en-US".to_string(),
            rate: 0.95,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        // Plain data with string-keyed maps only; serialization cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let CanvasConfig { width, height } = self.canvas;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyCanvas { width, height });
        }
        if self.physics.vertex_count < 3 {
            return Err(ConfigError::TooFewVertices(self.physics.vertex_count));
        }
        if self.physics.vertex_count > MAX_VERTEX_COUNT {
            return Err(ConfigError::TooManyVertices {
                got: self.physics.vertex_count,
                max: MAX_VERTEX_COUNT,
            });
        }
        if self.physics.comb.half_span > MAX_COMB_HALF_SPAN {
            return Err(ConfigError::CombTooWide {
                got: self.physics.comb.half_span,
                max: MAX_COMB_HALF_SPAN,
            });
        }

        let tine = &self.physics.tine;
        let comb = &self.physics.comb;
        positive("physics.tine.influence", tine.influence)?;
        positive("physics.comb.influence", comb.influence)?;
        positive("physics.comb.spacing", comb.spacing)?;
        positive("narration.rate", self.narration.rate)?;

        let b = &self.brush;
        if b.palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if !(b.min_radius.is_finite() && b.max_radius.is_finite())
            || b.min_radius <= 0.0
            || b.min_radius > b.max_radius
        {
            return Err(ConfigError::BrushRange { min: b.min_radius, max: b.max_radius });
        }
        Ok(())
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}
