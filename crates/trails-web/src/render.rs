use glam::{Vec2, Vec3};
use trails_core::{
    arrow_head, direction, vector_length, ArrowDraw, Camera, LabelDraw, SceneRenderer,
    AXES_HELPER_SIZE, AXIS_Z_COLOR, ORIGIN_MARKER_RADIUS,
};
use web_sys as web;

const AXIS_X_COLOR: [f32; 3] = [1.0, 0.2, 0.2];
const AXIS_Y_COLOR: [f32; 3] = [0.2, 0.8, 0.2];
const ORIGIN_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
const BACKGROUND: &str = "#000000";
const SHAFT_WIDTH_PX: f64 = 2.0;
const MIN_TEXT_PX: f32 = 1.0; // smaller labels are not worth a fill_text call

#[inline]
pub fn css_rgba(color: [f32; 3], alpha: f32) -> String {
    let c = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!(
        "rgba({},{},{},{:.3})",
        c(color[0]),
        c(color[1]),
        c(color[2]),
        alpha.clamp(0.0, 1.0)
    )
}

/// Draws a scene plan onto a 2D canvas through the orbit camera.
pub struct CanvasRenderer<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
    camera: &'a Camera,
    viewport: Vec2,
    text_offset_y: f32,
}

impl<'a> CanvasRenderer<'a> {
    pub fn new(
        ctx: &'a web::CanvasRenderingContext2d,
        camera: &'a Camera,
        viewport: Vec2,
        text_offset_y: f32,
    ) -> Self {
        Self {
            ctx,
            camera,
            viewport,
            text_offset_y,
        }
    }

    pub fn clear(&self) {
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(BACKGROUND);
        self.ctx
            .fill_rect(0.0, 0.0, self.viewport.x as f64, self.viewport.y as f64);
    }

    /// Axes helper and a marker at the origin.
    pub fn draw_backdrop(&self) {
        for (axis, color) in [
            (Vec3::X, AXIS_X_COLOR),
            (Vec3::Y, AXIS_Y_COLOR),
            (Vec3::Z, AXIS_Z_COLOR),
        ] {
            self.stroke_segment(Vec3::ZERO, axis * AXES_HELPER_SIZE, color, 1.0);
        }
        let Some(center) = self.camera.project(Vec3::ZERO, self.viewport) else {
            return;
        };
        let radius = ORIGIN_MARKER_RADIUS * self.camera.pixels_per_unit(Vec3::ZERO, self.viewport.y);
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&css_rgba(ORIGIN_COLOR, 1.0));
        self.ctx.begin_path();
        let _ = self.ctx.arc(
            center.x as f64,
            center.y as f64,
            radius.max(1.0) as f64,
            0.0,
            std::f64::consts::TAU,
        );
        self.ctx.fill();
    }

    fn stroke_segment(&self, a: Vec3, b: Vec3, color: [f32; 3], width: f64) {
        let (Some(pa), Some(pb)) = (
            self.camera.project(a, self.viewport),
            self.camera.project(b, self.viewport),
        ) else {
            return;
        };
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_stroke_style_str(&css_rgba(color, 1.0));
        self.ctx.set_line_width(width);
        self.ctx.begin_path();
        self.ctx.move_to(pa.x as f64, pa.y as f64);
        self.ctx.line_to(pb.x as f64, pb.y as f64);
        self.ctx.stroke();
    }
}

impl SceneRenderer for CanvasRenderer<'_> {
    fn draw_arrow(&mut self, arrow: &ArrowDraw) {
        let tip = arrow.tip();
        let Some(dir) = direction(arrow.start, tip) else {
            return;
        };
        let (head_len, head_width) = arrow_head(vector_length(arrow.start, tip));
        let base = tip - dir * head_len;
        self.stroke_segment(arrow.start, base, arrow.color, SHAFT_WIDTH_PX);

        let (Some(p_tip), Some(p_base)) = (
            self.camera.project(tip, self.viewport),
            self.camera.project(base, self.viewport),
        ) else {
            return;
        };
        // head is a flat triangle facing the screen
        let along = (p_tip - p_base).normalize_or_zero();
        let half = 0.5 * head_width * self.camera.pixels_per_unit(base, self.viewport.y);
        let side = along.perp() * half;
        let (l, r) = (p_base + side, p_base - side);
        self.ctx.set_global_alpha(1.0);
        self.ctx.set_fill_style_str(&css_rgba(arrow.color, 1.0));
        self.ctx.begin_path();
        self.ctx.move_to(p_tip.x as f64, p_tip.y as f64);
        self.ctx.line_to(l.x as f64, l.y as f64);
        self.ctx.line_to(r.x as f64, r.y as f64);
        self.ctx.close_path();
        self.ctx.fill();
    }

    fn draw_label(&mut self, label: &LabelDraw) {
        if label.opacity <= 0.0 || label.scale <= 0.0 {
            return;
        }
        let anchor = label.position + Vec3::Y * self.text_offset_y;
        let Some(p) = self.camera.project(anchor, self.viewport) else {
            return;
        };
        let px = label.font_size * label.scale * self.camera.pixels_per_unit(anchor, self.viewport.y);
        if px < MIN_TEXT_PX {
            return;
        }
        self.ctx.set_global_alpha(label.opacity as f64);
        self.ctx.set_fill_style_str(&css_rgba(label.color, 1.0));
        self.ctx.set_font(&format!("{px:.1}px sans-serif"));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        let _ = self.ctx.fill_text(&label.text, p.x as f64, p.y as f64);
        self.ctx.set_global_alpha(1.0);
    }
}
