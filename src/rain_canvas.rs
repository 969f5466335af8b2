//! Browser binding for the matrix rain: intersection-gated interval ticks on
//! a 2D canvas, resized with the window.

use crate::constants::{RAIN_GLYPH_COLOR, RAIN_TICK_MS};
use crate::core::{DropField, Glyph, RainConfig, RainSurface, TickLoop, TickScheduler};
use crate::dom::{self, Interval, Listener};
use anyhow::anyhow;
use rand::rngs::StdRng;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

struct CanvasSurface<'a> {
    ctx: &'a web::CanvasRenderingContext2d,
    font_px: Option<f32>,
}

impl RainSurface for CanvasSurface<'_> {
    fn fill_trail(&mut self, width: f32, height: f32, alpha: f32) {
        self.ctx.set_fill_style_str(&format!("rgba(0, 0, 0, {})", alpha));
        self.ctx.fill_rect(0.0, 0.0, width as f64, height as f64);
        self.ctx.set_fill_style_str(RAIN_GLYPH_COLOR);
    }

    fn fill_glyph(&mut self, glyph: Glyph, x: f32, y: f32, size: f32) {
        if self.font_px != Some(size) {
            self.ctx.set_font(&format!("{}px monospace", size));
            self.font_px = Some(size);
        }
        _ = self.ctx.fill_text(glyph.as_str(), x as f64, y as f64);
    }
}

/// Schedules ticks with `setInterval`; the interval only holds a weak
/// reference back to the rain.
struct IntervalScheduler {
    inner: Weak<RainInner>,
}

impl TickScheduler for IntervalScheduler {
    type Handle = Interval;

    fn schedule(&mut self, period_ms: i32) -> Option<Interval> {
        let weak = self.inner.clone();
        let started = Interval::start(period_ms, move || {
            if let Some(inner) = weak.upgrade() {
                inner.tick();
            }
        });
        match started {
            Ok(interval) => Some(interval),
            Err(e) => {
                log::warn!("[rain] setInterval failed: {:?}", e);
                None
            }
        }
    }
}

struct RainInner {
    alive: Cell<bool>,
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
    field: RefCell<DropField<StdRng>>,
    ticks: RefCell<TickLoop<IntervalScheduler>>,
}

impl RainInner {
    fn tick(&self) {
        if !self.alive.get() || !self.canvas.is_connected() {
            return;
        }
        let mut surface = CanvasSurface {
            ctx: &self.ctx,
            font_px: None,
        };
        let mut field = self.field.borrow_mut();
        self.ticks.borrow().tick_field(&mut *field, &mut surface);
    }

    fn resize(&self) {
        if !self.alive.get() {
            return;
        }
        let (w, h) = dom::sync_canvas_to_parent(&self.canvas);
        self.field.borrow_mut().resize(w, h);
    }
}

pub struct RainCanvas {
    inner: Rc<RainInner>,
    observer: Option<web::IntersectionObserver>,
    _observer_cb: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
    resize: Option<Listener>,
}

impl RainCanvas {
    pub fn mount(
        canvas: web::HtmlCanvasElement,
        config: RainConfig,
        rng: StdRng,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let ctx = dom::context_2d(&canvas)?;
        let (w, h) = dom::sync_canvas_to_parent(&canvas);
        let inner = Rc::new_cyclic(|weak| RainInner {
            alive: Cell::new(true),
            canvas: canvas.clone(),
            ctx,
            field: RefCell::new(DropField::new(config, w, h, rng)),
            ticks: RefCell::new(TickLoop::new(
                config.visibility_threshold,
                RAIN_TICK_MS,
                IntervalScheduler {
                    inner: weak.clone(),
                },
            )),
        });

        let weak = Rc::downgrade(&inner);
        let observer_cb = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _obs: web::IntersectionObserver| {
                let Some(inner) = weak.upgrade() else { return };
                if !inner.alive.get() {
                    return;
                }
                // The newest entry reflects the current state.
                let Some(entry) = entries
                    .iter()
                    .filter_map(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
                    .last()
                else {
                    return;
                };
                inner
                    .ticks
                    .borrow_mut()
                    .observe(entry.is_intersecting(), entry.intersection_ratio());
            },
        )
            as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

        let opts = web::IntersectionObserverInit::new();
        opts.set_threshold(&JsValue::from_f64(config.visibility_threshold));
        let observer = web::IntersectionObserver::new_with_options(
            observer_cb.as_ref().unchecked_ref(),
            &opts,
        )
        .map_err(|e| anyhow!("IntersectionObserver: {:?}", e))?;
        observer.observe(&canvas);

        let weak_resize = Rc::downgrade(&inner);
        let resize = Listener::new(window.as_ref(), "resize", move |_| {
            if let Some(inner) = weak_resize.upgrade() {
                inner.resize();
            }
        })?;

        log::info!(
            "[rain] mounted {}x{} columns={}",
            w,
            h,
            inner.field.borrow().column_count()
        );
        Ok(Self {
            inner,
            observer: Some(observer),
            _observer_cb: observer_cb,
            resize: Some(resize),
        })
    }

    /// Stop ticking and detach every observer. Idempotent.
    pub fn dispose(&mut self) {
        if !self.inner.alive.replace(false) {
            return;
        }
        if self.inner.ticks.borrow_mut().dispose() {
            log::debug!("[rain] stopped running loop on dispose");
        }
        if let Some(observer) = self.observer.take() {
            observer.disconnect();
        }
        self.resize = None;
        log::info!("[rain] disposed");
    }
}

impl Drop for RainCanvas {
    fn drop(&mut self) {
        self.dispose();
    }
}
