use wasm_bindgen::prelude::*;

pub mod choreo;
pub mod color;
pub mod config;
pub mod error;
pub mod geom;
pub mod input;
pub mod narration;
pub mod render;
pub mod session;
pub mod sim;

use crate::color::Color;
use crate::config::EngineConfig;
use crate::geom::Point;
use crate::input::{Tool, Viewport};
use crate::narration::{Announcer, JsSpeech};
use crate::session::Session;

// ============================================================================
// EBRU WORLD - Paper marbling basin for the browser
// ============================================================================
//
// The host owns the clock and the canvas element. Each animation frame it
// calls `tick(now)` and blits `output_ptr()/output_len()` (RGBA, row-major)
// into an ImageData. Pointer events are forwarded in client coordinates
// together with the canvas bounding rect via `set_viewport`.

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
}

#[wasm_bindgen]
pub struct EbruWorld {
    session: Session,
}

#[wasm_bindgen]
impl EbruWorld {
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32, seed: u32) -> Result<EbruWorld, JsError> {
        let mut config = EngineConfig::default();
        config.canvas.width = w.max(1);
        config.canvas.height = h.max(1);
        Ok(Self { session: Session::new(config, seed as u64)? })
    }

    /// Build from a JSON config; missing fields take their defaults.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str, seed: u32) -> Result<EbruWorld, JsError> {
        let config = EngineConfig::from_json(json)?;
        Ok(Self { session: Session::new(config, seed as u64)? })
    }

    /// Advance the demo to `now` (ms) and redraw.
    pub fn tick(&mut self, now: f64) {
        self.session.frame(now);
    }

    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f32, y: f32, now: f64) {
        self.session.pointer_down(Point::new(x, y), now);
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f32, y: f32, pressed: bool, now: f64) {
        self.session.pointer_move(Point::new(x, y), pressed, now);
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self) {
        self.session.pointer_up();
    }

    /// Canvas bounding rect in client coordinates.
    #[wasm_bindgen(js_name = setViewport)]
    pub fn set_viewport(&mut self, left: f32, top: f32, width: f32, height: f32) {
        self.session.set_viewport(Viewport { left, top, width, height });
    }

    #[wasm_bindgen(js_name = setTool)]
    pub fn set_tool(&mut self, tool: &str) -> Result<(), JsError> {
        let tool: Tool = tool.parse()?;
        self.session.set_tool(tool);
        Ok(())
    }

    pub fn tool(&self) -> String {
        self.session.tool().to_string()
    }

    #[wasm_bindgen(js_name = setColor)]
    pub fn set_color(&mut self, hex: &str) -> Result<(), JsError> {
        let color: Color = hex.parse()?;
        self.session.brush_mut().set_color(color);
        Ok(())
    }

    pub fn color(&self) -> String {
        self.session.brush().color().to_string()
    }

    #[wasm_bindgen(js_name = selectSwatch)]
    pub fn select_swatch(&mut self, index: usize) -> bool {
        self.session.brush_mut().select_swatch(index)
    }

    #[wasm_bindgen(js_name = setBrushRadius)]
    pub fn set_brush_radius(&mut self, radius: f32) {
        self.session.brush_mut().set_radius(radius);
    }

    #[wasm_bindgen(js_name = brushRadius)]
    pub fn brush_radius(&self) -> f32 {
        self.session.brush().radius()
    }

    /// Swatches as hex strings.
    pub fn palette(&self) -> Vec<String> {
        self.session.brush().palette().iter().map(Color::to_string).collect()
    }

    #[wasm_bindgen(js_name = startDemo)]
    pub fn start_demo(&mut self, now: f64) -> bool {
        self.session.start_demo(now)
    }

    #[wasm_bindgen(js_name = isDemoRunning)]
    pub fn is_demo_running(&self) -> bool {
        self.session.is_demo_running()
    }

    pub fn clear(&mut self) {
        self.session.clear();
    }

    /// Hook up the host's speech synthesis.
    /// `speak(text, voiceName | null, lang, rate)`; `cancel()` and
    /// `voices() -> [{ name, lang }]` may be omitted.
    #[wasm_bindgen(js_name = setSpeech)]
    pub fn set_speech(
        &mut self,
        speak: js_sys::Function,
        cancel: Option<js_sys::Function>,
        voices: Option<js_sys::Function>,
    ) {
        let prefs = self.session.config().narration.clone();
        let backend = JsSpeech::new(speak, cancel, voices);
        self.session.set_narrator(Box::new(Announcer::new(backend, prefs)));
    }

    pub fn announce(&mut self, text: &str) {
        self.session.announce(text);
    }

    pub fn teardown(&mut self) {
        self.session.teardown();
    }

    #[wasm_bindgen(js_name = isDisposed)]
    pub fn is_disposed(&self) -> bool {
        self.session.is_disposed()
    }

    #[wasm_bindgen(js_name = dropCount)]
    pub fn drop_count(&self) -> usize {
        self.session.basin().len()
    }

    /// Current config as JSON.
    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> String {
        self.session.config().to_json()
    }

    pub fn output_ptr(&self) -> *const u8 { self.session.canvas().ptr() }
    pub fn output_len(&self) -> usize { self.session.canvas().len() }
    pub fn width(&self) -> u32 { self.session.canvas().width() }
    pub fn height(&self) -> u32 { self.session.canvas().height() }
}
