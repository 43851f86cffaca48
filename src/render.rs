// render.rs - Rasterize the basin into an RGBA frame
//
// Output layout (for canvas rendering):
//   width * height * 4 bytes, row-major, RGBA, opaque
// The JS host copies it into an ImageData each animation frame.
//
// Drops are painted back-to-front in basin order: solid fill (non-zero
// winding, sampled at pixel centres) then a near-invisible outline.

use crate::color::Color;
use crate::config::RenderConfig;
#[cfg(not(target_arch = "wasm32"))]
use crate::error::ExportError;
use crate::geom::Point;
use crate::sim::Basin;

pub struct Canvas {
    w: u32,
    h: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            pixels: vec![0; (w as usize) * (h as usize) * 4],
        }
    }

    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }
    pub fn pixels(&self) -> &[u8] { &self.pixels }
    pub fn ptr(&self) -> *const u8 { self.pixels.as_ptr() }
    pub fn len(&self) -> usize { self.pixels.len() }
    pub fn is_empty(&self) -> bool { self.pixels.is_empty() }

    pub fn fill(&mut self, color: Color) {
        let px = Color { a: 255, ..color }.to_bytes();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// RGBA at (x, y), None outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.w || y >= self.h { return None; }
        let i = ((y * self.w + x) * 4) as usize;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[i..i + 4]);
        Some(out)
    }

    #[inline]
    fn blend(&mut self, x: i32, y: i32, color: Color) {
        if (x as u32) >= self.w || (y as u32) >= self.h { return; }
        let i = ((y as u32 * self.w + x as u32) * 4) as usize;
        blend_into(&mut self.pixels[i..i + 4], color);
    }

    /// Paint pixels of `row` whose centres lie in [x0, x1).
    fn fill_span(&mut self, row: i32, x0: f32, x1: f32, color: Color) {
        if row < 0 || row as u32 >= self.h { return; }
        let start = ((x0 - 0.5).ceil().max(0.0) as u32).min(self.w);
        let end = ((x1 - 0.5).ceil().max(0.0) as u32).min(self.w);
        if start >= end { return; }

        let base = (row as u32 * self.w) as usize * 4;
        let span = &mut self.pixels[base + start as usize * 4..base + end as usize * 4];
        if color.a == 255 {
            let px = color.to_bytes();
            for chunk in span.chunks_exact_mut(4) {
                chunk.copy_from_slice(&px);
            }
        } else {
            for chunk in span.chunks_exact_mut(4) {
                blend_into(chunk, color);
            }
        }
    }

    /// Serialize the current frame for export.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn encode_png(&self) -> Result<Vec<u8>, ExportError> {
        let img = image::RgbaImage::from_raw(self.w, self.h, self.pixels.clone())
            .ok_or(ExportError::BufferSize { width: self.w, height: self.h })?;
        let mut out = std::io::Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png)?;
        Ok(out.into_inner())
    }
}

#[inline(always)]
fn blend_into(dst: &mut [u8], src: Color) {
    let a = src.a as u32;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
    dst[0] = mix(src.r, dst[0]);
    dst[1] = mix(src.g, dst[1]);
    dst[2] = mix(src.b, dst[2]);
    dst[3] = 255;
}

// Polygon edge, stored top to bottom
#[derive(Clone, Copy)]
struct Edge {
    y_top: f32,
    y_bottom: f32,
    x_top: f32,
    dx_dy: f32,
    winding: i32,
}

pub struct Renderer {
    background: Color,
    outline: Color,

    // Scratch buffers reused across frames
    edges: Vec<Edge>,
    active: Vec<usize>,
    crossings: Vec<(f32, i32)>,
}

impl Renderer {
    pub fn new(config: &RenderConfig) -> Self {
        Self {
            background: config.background,
            outline: config.outline,
            edges: Vec::new(),
            active: Vec::new(),
            crossings: Vec::new(),
        }
    }

    /// Full redraw: background, then every drop in paint order.
    pub fn draw(&mut self, basin: &Basin, canvas: &mut Canvas) {
        canvas.fill(self.background);

        for drop in basin.drops() {
            let points = drop.boundary();
            if points.is_empty() { continue; }
            self.fill_polygon(points, drop.color(), canvas);
            stroke_polygon(points, self.outline, canvas);
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color, canvas: &mut Canvas) {
        let Self { edges, active, crossings, .. } = self;
        build_edges(points, edges);
        if edges.is_empty() { return; }

        let y_min = edges[0].y_top;
        let y_max = edges.iter().map(|e| e.y_bottom).fold(f32::MIN, f32::max);
        let first_row = ((y_min - 0.5).ceil() as i32).max(0);
        let end_row = ((y_max - 0.5).ceil() as i32).min(canvas.h as i32);

        active.clear();
        let mut next = 0;

        for row in first_row..end_row {
            let y = row as f32 + 0.5;

            while next < edges.len() && edges[next].y_top <= y {
                active.push(next);
                next += 1;
            }
            active.retain(|&i| edges[i].y_bottom > y);

            crossings.clear();
            crossings.extend(active.iter().map(|&i| {
                let e = edges[i];
                (e.x_top + (y - e.y_top) * e.dx_dy, e.winding)
            }));
            crossings.sort_unstable_by(|a, b| a.0.total_cmp(&b.0));

            let mut winding = 0;
            let mut span_start = 0.0;
            for &(x, w) in crossings.iter() {
                let was_inside = winding != 0;
                winding += w;
                match (was_inside, winding != 0) {
                    (false, true) => span_start = x,
                    (true, false) => canvas.fill_span(row, span_start, x, color),
                    _ => {}
                }
            }
        }
    }
}

fn build_edges(points: &[Point], edges: &mut Vec<Edge>) {
    edges.clear();
    let n = points.len();

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if !(a.is_finite() && b.is_finite()) || a.y == b.y { continue; }

        let (top, bottom, winding) = if a.y < b.y { (a, b, 1) } else { (b, a, -1) };
        edges.push(Edge {
            y_top: top.y,
            y_bottom: bottom.y,
            x_top: top.x,
            dx_dy: (bottom.x - top.x) / (bottom.y - top.y),
            winding,
        });
    }

    edges.sort_unstable_by(|a, b| a.y_top.total_cmp(&b.y_top));
}

/// Hairline outline around the closed polygon.
fn stroke_polygon(points: &[Point], color: Color, canvas: &mut Canvas) {
    if color.a == 0 { return; }
    let n = points.len();
    let (w, h) = (canvas.w as f32, canvas.h as f32);

    for i in 0..n {
        let a = points[i];
        let b = points[(i + 1) % n];
        if !(a.is_finite() && b.is_finite()) { continue; }

        // Segment entirely on one side of the frame
        if (a.x < 0.0 && b.x < 0.0) || (a.y < 0.0 && b.y < 0.0)
            || (a.x >= w && b.x >= w) || (a.y >= h && b.y >= h)
        {
            continue;
        }

        let d = b - a;
        let steps = d.x.abs().max(d.y.abs()).ceil().max(1.0) as i32;
        let step = d / steps as f32;
        // End point is the next segment's start
        for k in 0..steps {
            let p = a + step * k as f32;
            canvas.blend(p.x.floor() as i32, p.y.floor() as i32, color);
        }
    }
}
