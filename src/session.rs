// session.rs - One interactive basin
//
// Owns everything a mounted canvas needs: the basin, its raster, the input
// router, the demo player and the narrator. Gestures are refused while the
// demo plays so scripted and manual ink never interleave. After teardown
// every entry point is a no-op.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::choreo::{ChoreoState, Choreographer, demo_timeline};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::geom::Point;
use crate::input::{Brush, InputRouter, Tool, Viewport};
use crate::narration::{Narrator, SilentNarrator};
use crate::render::{Canvas, Renderer};
use crate::sim::{Basin, Operator};

pub struct Session {
    config: EngineConfig,
    basin: Basin,
    canvas: Canvas,
    renderer: Renderer,
    router: InputRouter,
    choreo: Choreographer,
    narrator: Box<dyn Narrator>,
    rng: SmallRng,
    disposed: bool,
}

impl Session {
    /// `host_seed` is used when the config does not pin one. The config is
    /// validated here as well, since callers may build it by hand.
    pub fn new(config: EngineConfig, host_seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or(host_seed);
        let (w, h) = (config.canvas.width, config.canvas.height);
        log::info!("session: {w}x{h} basin, {} points per drop, seed {seed}", config.physics.vertex_count);

        Ok(Self {
            basin: Basin::new(config.physics),
            canvas: Canvas::new(w, h),
            renderer: Renderer::new(&config.render),
            router: InputRouter::new(&config),
            choreo: Choreographer::new(),
            narrator: Box::new(SilentNarrator),
            rng: SmallRng::seed_from_u64(seed),
            disposed: false,
            config,
        })
    }

    pub fn config(&self) -> &EngineConfig { &self.config }
    pub fn basin(&self) -> &Basin { &self.basin }
    pub fn canvas(&self) -> &Canvas { &self.canvas }
    pub fn tool(&self) -> Tool { self.router.tool() }
    pub fn brush(&self) -> &Brush { self.router.brush() }
    pub fn demo_state(&self) -> ChoreoState { self.choreo.state() }
    pub fn is_demo_running(&self) -> bool { self.choreo.is_running() }
    pub fn is_disposed(&self) -> bool { self.disposed }

    pub fn set_narrator(&mut self, narrator: Box<dyn Narrator>) {
        self.narrator = narrator;
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.router.set_tool(tool);
    }

    pub fn brush_mut(&mut self) -> &mut Brush {
        self.router.brush_mut()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.router.set_viewport(viewport);
    }

    fn accepts_input(&self) -> bool {
        !self.disposed && !self.choreo.is_running()
    }

    pub fn pointer_down(&mut self, client: Point, now_ms: f64) {
        if !self.accepts_input() { return; }
        if let Some(op) = self.router.pointer_down(client, now_ms) {
            self.basin.apply(&op);
        }
    }

    pub fn pointer_move(&mut self, client: Point, pressed: bool, now_ms: f64) {
        if !self.accepts_input() { return; }
        if let Some(op) = self.router.pointer_move(client, pressed, now_ms) {
            self.basin.apply(&op);
        }
    }

    pub fn pointer_up(&mut self) {
        self.router.pointer_up();
    }

    /// Apply an operator directly, as a host-side script would.
    pub fn apply(&mut self, op: &Operator) {
        if !self.accepts_input() { return; }
        self.basin.apply(op);
    }

    /// Start the demonstration. False if one is already playing.
    pub fn start_demo(&mut self, now_ms: f64) -> bool {
        if self.disposed { return false; }
        let (w, h) = (self.canvas.width() as f32, self.canvas.height() as f32);
        let rng = &mut self.rng;
        let started = self.choreo.start(now_ms, &mut self.basin, || demo_timeline(rng, w, h));
        if started {
            self.router.reset();
        }
        started
    }

    /// Wipe the basin. A running demo is cancelled first so nothing it had
    /// scheduled lands on the fresh water.
    pub fn clear(&mut self) {
        if self.disposed { return; }
        self.choreo.cancel();
        self.router.reset();
        self.basin.clear();
    }

    /// Fire due demo steps and redraw.
    pub fn frame(&mut self, now_ms: f64) -> &Canvas {
        if !self.disposed {
            self.choreo.advance(now_ms, &mut self.basin, self.narrator.as_mut());
            self.renderer.draw(&self.basin, &mut self.canvas);
        }
        &self.canvas
    }

    pub fn announce(&mut self, text: &str) {
        if self.disposed { return; }
        self.narrator.announce(text);
    }

    /// Stop everything and release the basin. Idempotent.
    pub fn teardown(&mut self) {
        if self.disposed { return; }
        let dropped = self.choreo.cancel();
        self.router.reset();
        self.basin.clear();
        self.narrator = Box::new(SilentNarrator);
        self.disposed = true;
        log::info!("session: torn down ({dropped} demo steps dropped)");
    }
}
