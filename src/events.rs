use crate::core::TechStackStage;
use crate::dom::Listener;
use crate::input;
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn pointer_canvas_px(ev: &web::PointerEvent, canvas: &web::HtmlCanvasElement) -> Vec2 {
    let rect = canvas.get_bounding_client_rect();
    let x_css = ev.client_x() as f32 - rect.left() as f32;
    let y_css = ev.client_y() as f32 - rect.top() as f32;
    let w = (rect.width() as f32).max(1.0);
    let h = (rect.height() as f32).max(1.0);
    Vec2::new(
        x_css / w * canvas.width() as f32,
        y_css / h * canvas.height() as f32,
    )
}

/// Hover picking over the scene canvas. Leaving or cancelling the pointer
/// clears hover so no sphere stays squished.
pub fn wire_pointer_handlers(
    canvas: &web::HtmlCanvasElement,
    stage: Rc<RefCell<TechStackStage>>,
) -> anyhow::Result<Vec<Listener>> {
    let mut listeners = Vec::with_capacity(3);

    let canvas_move = canvas.clone();
    let stage_move = stage.clone();
    listeners.push(Listener::new(canvas.as_ref(), "pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        if !canvas_move.is_connected() {
            return;
        }
        let px = pointer_canvas_px(ev, &canvas_move);
        let mut stage = stage_move.borrow_mut();
        let (ro, rd) = input::screen_to_world_ray(
            stage.camera(),
            canvas_move.width() as f32,
            canvas_move.height() as f32,
            px,
        );
        let hit = input::pick(ro, rd, &stage.pick_spheres());
        stage.hover(hit);
    })?);

    for event in ["pointerleave", "pointercancel"] {
        let stage_out = stage.clone();
        listeners.push(Listener::new(canvas.as_ref(), event, move |_| {
            stage_out.borrow_mut().cancel_hover();
        })?);
    }
    Ok(listeners)
}
