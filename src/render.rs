//! Canvas 2D renderer for the stage's scene graph.
//!
//! Projects every drawable through the stage camera and paints far to near.
//! Text keeps its opacity and scale from the reel; spheres are drawn as
//! translucent glass discs.

use crate::constants::{REEL_TEXT_COLOR, SCENE_BACKGROUND};
use crate::core::{CameraConfig, NodeKind, TechStackStage};
use glam::{Mat4, Vec3};
use std::f64::consts::TAU;
use web_sys as web;

pub struct SceneRenderer {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

struct Projected {
    x: f64,
    y: f64,
    /// Pixels per world unit at this depth.
    px_per_unit: f64,
    depth: f32,
}

fn project(camera: &CameraConfig, view_proj: &Mat4, w: f64, h: f64, p: Vec3) -> Option<Projected> {
    let depth = camera.eye_z - p.z;
    if depth <= camera.znear {
        return None;
    }
    let clip = *view_proj * p.extend(1.0);
    if clip.w.abs() < f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    let focal = (h * 0.5) / (camera.fov_y_radians() as f64 * 0.5).tan();
    Some(Projected {
        x: (ndc.x as f64 + 1.0) * 0.5 * w,
        y: (1.0 - ndc.y as f64) * 0.5 * h,
        px_per_unit: focal / depth as f64,
        depth,
    })
}

impl SceneRenderer {
    pub fn new(canvas: web::HtmlCanvasElement) -> anyhow::Result<Self> {
        let ctx = crate::dom::context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }

    pub fn draw(&self, stage: &TechStackStage) {
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let ctx = &self.ctx;
        ctx.set_global_alpha(1.0);
        ctx.set_fill_style_str(SCENE_BACKGROUND);
        ctx.fill_rect(0.0, 0.0, w, h);
        if !stage.is_mounted() || w <= 0.0 || h <= 0.0 {
            return;
        }

        let camera = stage.camera();
        let view_proj = camera.projection_matrix((w / h) as f32) * camera.view_matrix();
        let mut items: Vec<_> = stage
            .scene()
            .drawables()
            .into_iter()
            .filter_map(|d| {
                let p = project(camera, &view_proj, w, h, d.world_position())?;
                Some((p, d))
            })
            .collect();
        items.sort_by(|a, b| b.0.depth.total_cmp(&a.0.depth));

        for (p, d) in items {
            let scale = d.world_scale();
            ctx.set_global_alpha(d.opacity.clamp(0.0, 1.0) as f64);
            match d.kind {
                NodeKind::Text { content, font_size } => {
                    let px = (*font_size * scale.y) as f64 * p.px_per_unit;
                    ctx.set_font(&format!("900 {:.1}px sans-serif", px));
                    ctx.set_text_align("center");
                    ctx.set_text_baseline("middle");
                    ctx.set_fill_style_str(REEL_TEXT_COLOR);
                    _ = ctx.fill_text(content, p.x, p.y);
                }
                NodeKind::Sphere { radius } => {
                    let rx = (*radius * scale.x) as f64 * p.px_per_unit;
                    let ry = (*radius * scale.y) as f64 * p.px_per_unit;
                    self.draw_glass(p.x, p.y, rx, ry);
                }
                NodeKind::Group => {}
            }
        }
        ctx.set_global_alpha(1.0);
    }

    fn draw_glass(&self, x: f64, y: f64, rx: f64, ry: f64) {
        let ctx = &self.ctx;
        let r = rx.max(ry);
        if r <= 0.0 {
            return;
        }
        ctx.begin_path();
        if ctx.ellipse(x, y, rx, ry, 0.0, 0.0, TAU).is_err() {
            return;
        }
        match ctx.create_radial_gradient(x - r * 0.3, y - r * 0.3, r * 0.05, x, y, r) {
            Ok(g) => {
                _ = g.add_color_stop(0.0, "rgba(255, 255, 255, 0.55)");
                _ = g.add_color_stop(0.7, "rgba(255, 255, 255, 0.12)");
                _ = g.add_color_stop(1.0, "rgba(255, 255, 255, 0.35)");
                ctx.set_fill_style_canvas_gradient(&g);
            }
            Err(_) => ctx.set_fill_style_str("rgba(255, 255, 255, 0.5)"),
        }
        ctx.fill();
    }
}
