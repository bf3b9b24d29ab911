//! Marker label text, drawn on a 2D canvas stacked over the WebGPU canvas.
//!
//! Each label is rasterised at a fixed pixel size and mapped onto its world
//! quad with an affine transform built from three projected points, so the
//! text keeps the quad's fixed orientation instead of facing the camera.

use crate::constants::{LABEL_CANVAS_ID, LABEL_FONT_FAMILY, LABEL_RASTER_PX};
use head_core::{Marker, ViewerState, LABEL_FONT_SIZE};
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct LabelLayer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    font: String,
}

impl LabelLayer {
    pub fn new(document: &web::Document) -> Option<Self> {
        let canvas = document
            .get_element_by_id(LABEL_CANVAS_ID)?
            .dyn_into::<web::HtmlCanvasElement>()
            .ok()?;
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .ok()?;
        Some(Self {
            canvas,
            ctx,
            font: format!("{}px {}", LABEL_RASTER_PX, LABEL_FONT_FAMILY),
        })
    }

    /// Drawn width of `text` in world units, for sizing the label's hit
    /// rectangle. Labels are `LABEL_FONT_SIZE` tall and rasterised
    /// `LABEL_RASTER_PX` tall, so widths scale by the same ratio.
    pub fn measure_width(&self, text: &str) -> Option<f32> {
        self.ctx.set_font(&self.font);
        let px = self.ctx.measure_text(text).ok()?.width();
        Some((px / LABEL_RASTER_PX) as f32 * LABEL_FONT_SIZE)
    }

    /// Redraw every label for the current camera. `width`/`height` are the
    /// WebGPU canvas backing size so both layers share pixel space.
    pub fn draw(&self, state: &ViewerState, width: u32, height: u32) {
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
        }
        let ctx = &self.ctx;
        _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        ctx.clear_rect(0.0, 0.0, width as f64, height as f64);
        ctx.set_font(&self.font);
        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        for marker in state.markers.markers() {
            self.draw_label(state, marker);
        }
        _ = ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0);
    }

    fn draw_label(&self, state: &ViewerState, marker: &Marker) {
        let quad = &marker.geometry.label;
        let viewport = state.viewport();
        let project = |p| state.camera.world_to_pointer(p, viewport);
        let (Some(o), Some(r), Some(u)) = (
            project(quad.origin),
            project(quad.origin + quad.right * quad.height),
            project(quad.origin + quad.up * quad.height),
        ) else {
            return;
        };
        // One raster pixel maps to height / LABEL_RASTER_PX world units.
        let s = 1.0 / LABEL_RASTER_PX;
        let ax = (r - o).as_dvec2() * s;
        let ay = (u - o).as_dvec2() * -s;
        if ctx_transform(&self.ctx, ax.x, ax.y, ay.x, ay.y, o.x as f64, o.y as f64).is_err() {
            return;
        }
        self.ctx.set_fill_style_str(&css_rgb(marker.label_color()));
        _ = self.ctx.fill_text(&marker.record.label, 0.0, 0.0);
    }
}

#[inline]
fn ctx_transform(
    ctx: &web::CanvasRenderingContext2d,
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
) -> Result<(), wasm_bindgen::JsValue> {
    if !(a.is_finite() && b.is_finite() && c.is_finite() && d.is_finite()) {
        return Err(wasm_bindgen::JsValue::NULL);
    }
    ctx.set_transform(a, b, c, d, e, f)
}

#[inline]
fn css_rgb(c: [f32; 3]) -> String {
    let to8 = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("rgb({}, {}, {})", to8(c[0]), to8(c[1]), to8(c[2]))
}
