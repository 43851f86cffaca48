// input.rs - Pointer events to basin operators
//
// Pointer positions arrive in client (display) coordinates and are mapped to
// canvas coordinates through the viewport. A press with the drop tool lays
// ink; drags with the stylus or comb become strokes between the last
// processed position and the current one. Excess moves are dropped, never
// queued, so a slow frame only loses intermediate positions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::config::EngineConfig;
use crate::error::ToolError;
use crate::geom::Point;
use crate::sim::Operator;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    #[default]
    Drop,
    Stylus,
    Comb,
}

impl Tool {
    pub fn name(self) -> &'static str {
        match self {
            Tool::Drop => "drop",
            Tool::Stylus => "stylus",
            Tool::Comb => "comb",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tool {
    type Err = ToolError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "drop" => Ok(Tool::Drop),
            "stylus" | "tine" => Ok(Tool::Stylus),
            "comb" => Ok(Tool::Comb),
            other => Err(ToolError::Unknown(other.to_string())),
        }
    }
}

/// Where the canvas is displayed, in client coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Canvas shown 1:1 at the origin.
    pub fn unscaled(width: u32, height: u32) -> Self {
        Self { left: 0.0, top: 0.0, width: width as f32, height: height as f32 }
    }

    /// Client position to canvas position; X and Y scale independently.
    /// None if the viewport has no usable size.
    pub fn to_surface(&self, client: Point, surface_w: u32, surface_h: u32) -> Option<Point> {
        let scale = Point::new(surface_w as f32 / self.width, surface_h as f32 / self.height);
        if !scale.is_finite() || scale.x <= 0.0 || scale.y <= 0.0 {
            return None;
        }
        let p = (client - Point::new(self.left, self.top)) * scale;
        p.is_finite().then_some(p)
    }
}

/// Current paint: color and drop radius.
#[derive(Clone, Debug, PartialEq)]
pub struct Brush {
    color: Color,
    radius: f32,
    min_radius: f32,
    max_radius: f32,
    palette: Vec<Color>,
}

impl Brush {
    pub fn color(&self) -> Color { self.color }
    pub fn radius(&self) -> f32 { self.radius }
    pub fn palette(&self) -> &[Color] { &self.palette }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Pick a palette swatch. Out-of-range indices are ignored.
    pub fn select_swatch(&mut self, index: usize) -> bool {
        match self.palette.get(index) {
            Some(&c) => {
                self.color = c;
                true
            }
            None => false,
        }
    }

    /// Clamped to the configured range; NaN leaves the radius alone.
    /// An inverted range resolves to its upper bound.
    pub fn set_radius(&mut self, radius: f32) {
        if radius.is_nan() { return; }
        self.radius = radius.max(self.min_radius).min(self.max_radius);
    }
}

pub struct InputRouter {
    tool: Tool,
    brush: Brush,

    // Surface and its on-screen placement
    surface_w: u32,
    surface_h: u32,
    viewport: Viewport,

    // Stroke parameters
    tine_force: f32,
    comb_spacing: f32,
    comb_force: f32,
    throttle_ms: f64,

    // Stroke state
    drawing: bool,
    last_pos: Point,
    last_move_ms: Option<f64>,
}

impl InputRouter {
    pub fn new(config: &EngineConfig) -> Self {
        let b = &config.brush;
        let mut brush = Brush {
            color: b.color,
            radius: b.radius,
            min_radius: b.min_radius,
            max_radius: b.max_radius,
            palette: b.palette.clone(),
        };
        brush.set_radius(b.radius);

        let (w, h) = (config.canvas.width, config.canvas.height);
        Self {
            tool: Tool::default(),
            brush,
            surface_w: w,
            surface_h: h,
            viewport: Viewport::unscaled(w, h),
            tine_force: config.physics.tine.force,
            comb_spacing: config.physics.comb.spacing,
            comb_force: config.physics.comb.force,
            throttle_ms: config.input.throttle_ms,
            drawing: false,
            last_pos: Point::ZERO,
            last_move_ms: None,
        }
    }

    pub fn tool(&self) -> Tool { self.tool }
    pub fn set_tool(&mut self, tool: Tool) { self.tool = tool; }
    pub fn brush(&self) -> &Brush { &self.brush }
    pub fn brush_mut(&mut self) -> &mut Brush { &mut self.brush }
    pub fn viewport(&self) -> Viewport { self.viewport }
    pub fn set_viewport(&mut self, viewport: Viewport) { self.viewport = viewport; }
    pub fn is_drawing(&self) -> bool { self.drawing }

    /// Press. Records the stroke start; with the drop tool also lays ink.
    pub fn pointer_down(&mut self, client: Point, _now_ms: f64) -> Option<Operator> {
        let pos = self.to_surface(client)?;
        self.last_pos = pos;
        self.drawing = true;

        match self.tool {
            Tool::Drop => Some(Operator::Drop {
                center: pos,
                radius: self.brush.radius,
                color: self.brush.color,
            }),
            Tool::Stylus | Tool::Comb => None,
        }
    }

    /// Drag. At most one stroke per throttle window.
    pub fn pointer_move(&mut self, client: Point, pressed: bool, now_ms: f64) -> Option<Operator> {
        if !pressed || !self.drawing || self.tool == Tool::Drop {
            return None;
        }
        if let Some(last) = self.last_move_ms {
            if now_ms - last < self.throttle_ms {
                return None;
            }
        }
        self.last_move_ms = Some(now_ms);

        let pos = self.to_surface(client)?;
        let from = std::mem::replace(&mut self.last_pos, pos);

        match self.tool {
            Tool::Stylus => Some(Operator::Tine { from, to: pos, force: self.tine_force }),
            Tool::Comb => Some(Operator::Comb {
                from,
                to: pos,
                spacing: self.comb_spacing,
                force: self.comb_force,
            }),
            Tool::Drop => None,
        }
    }

    /// Release. Ends the stroke without touching the basin.
    pub fn pointer_up(&mut self) {
        self.drawing = false;
    }

    /// Abandon any stroke in progress.
    pub fn reset(&mut self) {
        self.drawing = false;
        self.last_move_ms = None;
    }

    fn to_surface(&self, client: Point) -> Option<Point> {
        let pos = self.viewport.to_surface(client, self.surface_w, self.surface_h);
        if pos.is_none() {
            log::debug!("input: unusable viewport {:?}", self.viewport);
        }
        pos
    }
}
