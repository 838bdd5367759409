//! Canvas 2D surface for the browser build

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::Surface;

const FONT: &str = "16px Arial";

/// [`Surface`] over a `<canvas>` 2D context
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context; `None` when the browser refuses one
    pub fn acquire(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()?
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    type Image = HtmlImageElement;

    fn clear(&mut self, size: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(0.0, 0.0, size.x as f64, size.y as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        self.ctx.close_path();
    }

    fn draw_image(&mut self, image: &HtmlImageElement, center: Vec2, radius: f32, rotation: f32) {
        let r = radius as f64;
        self.ctx.save();
        let _ = self.ctx.translate(center.x as f64, center.y as f64);
        if rotation != 0.0 {
            let _ = self.ctx.rotate(rotation as f64);
        }
        let _ = self
            .ctx
            .draw_image_with_html_image_element_and_dw_and_dh(image, -r, -r, r * 2.0, r * 2.0);
        self.ctx.restore();
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(FONT);
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
