//! Canvas2D renderer
//!
//! The scene is drawn to an offscreen buffer, then composited onto the
//! visible canvas with the shake offset, speed blur and flash overlay.

use std::f64::consts::TAU;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::view::{Frame, Rect};

const BACKGROUND: &str = "#0f1724";
const PADDLE_FILL: &str = "rgba(220,230,255,0.95)";
const PADDLE_CORNER: f64 = 5.0;

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    buffer: HtmlCanvasElement,
    bctx: CanvasRenderingContext2d,
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()??
        .dyn_into::<CanvasRenderingContext2d>()
        .ok()
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = context_2d(canvas)?;
        let document = web_sys::window()?.document()?;
        let buffer: HtmlCanvasElement = document.create_element("canvas").ok()?.dyn_into().ok()?;
        buffer.set_width(canvas.width());
        buffer.set_height(canvas.height());
        let bctx = context_2d(&buffer)?;

        ctx.set_fill_style_str(BACKGROUND);
        ctx.fill_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);

        Some(Self { ctx, buffer, bctx })
    }

    pub fn render(&self, frame: &Frame) {
        self.draw_scene(frame);
        self.composite(frame);
        if frame.paused {
            self.draw_pause_hud(frame);
        }
    }

    fn draw_scene(&self, frame: &Frame) {
        let ctx = &self.bctx;
        let (w, h) = (frame.width as f64, frame.height as f64);
        ctx.clear_rect(0.0, 0.0, w, h);

        let bg = ctx.create_linear_gradient(0.0, 0.0, 0.0, h);
        let _ = bg.add_color_stop(0.0, "rgba(255,255,255,0.02)");
        let _ = bg.add_color_stop(1.0, "rgba(0,0,0,0.03)");
        ctx.set_fill_style_canvas_gradient(&bg);
        ctx.fill_rect(0.0, 0.0, w, h);

        self.draw_net(frame);

        ctx.save();
        let _ = ctx.set_global_composite_operation("lighter");
        for dot in &frame.trail {
            ctx.set_fill_style_str(&format!("rgba(230,240,255,{:.3})", dot.alpha));
            ctx.begin_path();
            let _ = ctx.arc(dot.pos.x as f64, dot.pos.y as f64, dot.radius.max(0.0) as f64, 0.0, TAU);
            ctx.fill();
        }
        ctx.restore();

        ctx.set_fill_style_str(PADDLE_FILL);
        for paddle in &frame.paddles {
            round_rect(ctx, paddle, PADDLE_CORNER);
            ctx.fill();
        }

        self.draw_ball(frame);

        ctx.save();
        let _ = ctx.set_global_composite_operation("lighter");
        for spark in &frame.sparks {
            ctx.set_global_alpha(spark.alpha as f64);
            ctx.set_fill_style_str(&spark.color.css_rgba(1.0));
            ctx.begin_path();
            let _ = ctx.arc(spark.pos.x as f64, spark.pos.y as f64, spark.radius as f64, 0.0, TAU);
            ctx.fill();
        }
        ctx.restore();
    }

    fn draw_net(&self, frame: &Frame) {
        let ctx = &self.bctx;
        let x = frame.width as f64 / 2.0;
        ctx.save();
        ctx.set_stroke_style_str("rgba(255,255,255,0.06)");
        ctx.set_line_width(2.0);
        let dash = js_sys::Array::of2(&JsValue::from(12.0), &JsValue::from(10.0));
        let _ = ctx.set_line_dash(&dash);
        ctx.begin_path();
        ctx.move_to(x, 10.0);
        ctx.line_to(x, frame.height as f64 - 10.0);
        ctx.stroke();
        ctx.restore();
    }

    fn draw_ball(&self, frame: &Frame) {
        let ctx = &self.bctx;
        let (x, y, r) = (frame.ball.x as f64, frame.ball.y as f64, frame.ball_radius as f64);

        if let Ok(glow) = ctx.create_radial_gradient(x, y, 1.0, x, y, r * 3.0) {
            let _ = glow.add_color_stop(0.0, "rgba(230,240,255,0.95)");
            let _ = glow.add_color_stop(0.6, "rgba(230,240,255,0.3)");
            let _ = glow.add_color_stop(1.0, "rgba(230,240,255,0)");
            ctx.set_fill_style_canvas_gradient(&glow);
            ctx.begin_path();
            let _ = ctx.arc(x, y, r * 2.8, 0.0, TAU);
            ctx.fill();
        }

        ctx.set_fill_style_str("#e6f0ff");
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, TAU);
        ctx.fill();
    }

    fn composite(&self, frame: &Frame) {
        let ctx = &self.ctx;
        let (w, h) = (frame.width as f64, frame.height as f64);
        let (sx, sy) = (frame.offset.x as f64, frame.offset.y as f64);

        ctx.clear_rect(0.0, 0.0, w, h);
        ctx.save();
        let _ = ctx.translate(sx, sy);

        if frame.blur_px > 0.0 {
            ctx.set_filter(&format!("blur({:.2}px)", frame.blur_px));
        }
        let _ = ctx.draw_image_with_html_canvas_element(&self.buffer, 0.0, 0.0);
        ctx.set_filter("none");
        let _ = ctx.set_global_composite_operation("source-over");

        if frame.flash_alpha > 0.0 {
            ctx.set_fill_style_str(&format!("rgba(255,255,255,{:.3})", frame.flash_alpha));
            ctx.fill_rect(-sx, -sy, w, h);
        }
        ctx.restore();
    }

    /// Drawn on the visible canvas so it stays sharp and still
    fn draw_pause_hud(&self, frame: &Frame) {
        let ctx = &self.ctx;
        let (cx, cy) = (frame.width as f64 / 2.0, frame.height as f64 / 2.0);
        ctx.save();
        ctx.set_fill_style_str("rgba(0,0,0,0.45)");
        ctx.fill_rect(cx - 120.0, cy - 30.0, 240.0, 60.0);
        ctx.set_fill_style_str("#fff");
        ctx.set_font("20px sans-serif");
        ctx.set_text_align("center");
        let _ = ctx.fill_text("Paused", cx, cy + 8.0);
        ctx.restore();
    }
}

fn round_rect(ctx: &CanvasRenderingContext2d, rect: &Rect, radius: f64) {
    let (x, y, w, h) = (rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    let r = radius.min(w.min(h) / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + h, r);
    let _ = ctx.arc_to(x + w, y + h, x, y + h, r);
    let _ = ctx.arc_to(x, y + h, x, y, r);
    let _ = ctx.arc_to(x, y, x + w, y, r);
    ctx.close_path();
}
