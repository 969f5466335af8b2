use crate::constants::*;
use crate::core::{
    CursorSink, CursorStyle, LoadingTracker, PointerCursor, ProgressCell, RainConfig,
    ScrollTriggerConfig, StageConfig, TechStackStage, Viewport,
};
use crate::dom::{self, Listener};
use crate::events;
use crate::frame::FrameLoop;
use crate::overlay;
use crate::rain_canvas::RainCanvas;
use crate::render::SceneRenderer;
use crate::scroll::ScrollBinding;
use anyhow::anyhow;
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

/// Writes the cursor style onto `<body>`.
struct BodyCursor {
    document: web::Document,
}

impl CursorSink for BodyCursor {
    fn apply(&self, style: CursorStyle) {
        if let Some(body) = self.document.body() {
            _ = body.style().set_property("cursor", style.as_css());
        }
    }
}

/// Everything mounted on the page. Dropping it tears it all down.
struct Landing {
    stage: Rc<RefCell<TechStackStage>>,
    frame_loop: Option<FrameLoop>,
    scroll: Option<ScrollBinding>,
    pointer: Vec<Listener>,
    resize: Option<Listener>,
    rain: Option<RainCanvas>,
}

impl Landing {
    fn teardown(&mut self) {
        // Stop callbacks first, then release the scene they touch.
        if let Some(l) = self.frame_loop.take() {
            l.stop();
        }
        if let Some(mut s) = self.scroll.take() {
            s.dispose();
        }
        self.pointer.clear();
        self.resize = None;
        if let Some(mut r) = self.rain.take() {
            r.dispose();
        }
        self.stage.borrow_mut().unmount();
    }
}

impl Drop for Landing {
    fn drop(&mut self) {
        self.teardown();
    }
}

thread_local! {
    static LANDING: RefCell<Option<Landing>> = const { RefCell::new(None) };
}

fn canvas_aspect(canvas: &web::HtmlCanvasElement) -> f32 {
    canvas.width().max(1) as f32 / canvas.height().max(1) as f32
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("reel-web starting");

    if let Err(e) = init() {
        log::error!("init error: {:?}", e);
    }
    Ok(())
}

/// Tear down every listener, timer and observer. Calling it again is a no-op.
#[wasm_bindgen]
pub fn unmount() {
    let landing = LANDING.with(|l| l.borrow_mut().take());
    match landing {
        Some(landing) => {
            drop(landing);
            log::info!("[app] unmounted");
        }
        None => log::debug!("[app] unmount: nothing mounted"),
    }
}

fn init() -> anyhow::Result<()> {
    if LANDING.with(|l| l.borrow().is_some()) {
        log::warn!("[app] already mounted");
        return Ok(());
    }
    let window = web::window().ok_or_else(|| anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("no document"))?;

    let mut loading = LoadingTracker::new(2);
    overlay::update(&document, &loading);

    // ---------------- Tech stack scene ----------------
    let container: web::HtmlElement = dom::element_by_id(&document, SKILLS_CONTAINER_ID)?;
    let canvas: web::HtmlCanvasElement = dom::element_by_id(&document, SKILLS_CANVAS_ID)?;
    dom::sync_canvas_backing_size(&canvas);

    let config = StageConfig::default();
    let progress = ProgressCell::new();
    let cursor = PointerCursor::new(BodyCursor {
        document: document.clone(),
    });
    let viewport = Viewport::at_origin(&config.camera, canvas_aspect(&canvas));
    let stage = TechStackStage::mount(
        &TECH_NAMES,
        config,
        viewport,
        progress.clone(),
        cursor,
        &mut rand::thread_rng(),
    )
    .map_err(|e| anyhow!("stage mount: {}", e))?;
    let stage = Rc::new(RefCell::new(stage));

    let scroll = ScrollBinding::mount(
        &document,
        container,
        ScrollTriggerConfig::default(),
        progress,
    )?;

    let renderer = SceneRenderer::new(canvas.clone())?;
    let stage_frame = stage.clone();
    let started = Instant::now();
    let frame_loop = FrameLoop::start(move || {
        let elapsed = started.elapsed().as_secs_f32();
        let mut stage = stage_frame.borrow_mut();
        if let Err(e) = stage.frame(elapsed) {
            log::debug!("[app] frame skipped: {}", e);
            return;
        }
        renderer.draw(&stage);
    });

    let pointer = events::wire_pointer_handlers(&canvas, stage.clone())?;

    let canvas_resize = canvas.clone();
    let stage_resize = stage.clone();
    let resize = Listener::new(window.as_ref(), "resize", move |_| {
        dom::sync_canvas_backing_size(&canvas_resize);
        let mut stage = stage_resize.borrow_mut();
        let viewport = Viewport::at_origin(stage.camera(), canvas_aspect(&canvas_resize));
        if let Err(e) = stage.resize(viewport) {
            log::debug!("[app] resize skipped: {}", e);
        }
    })?;

    loading.complete_one();
    overlay::update(&document, &loading);

    // ---------------- Matrix rain (optional on the page) ----------------
    let rain = match dom::element_by_id::<web::HtmlCanvasElement>(&document, RAIN_CANVAS_ID) {
        Ok(rain_canvas) => {
            match RainCanvas::mount(rain_canvas, RainConfig::default(), StdRng::from_entropy()) {
                Ok(r) => Some(r),
                Err(e) => {
                    log::warn!("[rain] mount failed: {:?}", e);
                    None
                }
            }
        }
        Err(_) => {
            log::info!("[rain] no #{} on page", RAIN_CANVAS_ID);
            None
        }
    };
    loading.complete_one();
    overlay::update(&document, &loading);

    let landing = Landing {
        stage,
        frame_loop: Some(frame_loop),
        scroll: Some(scroll),
        pointer,
        resize: Some(resize),
        rain,
    };
    LANDING.with(|l| *l.borrow_mut() = Some(landing));
    log::info!("[app] mounted");
    Ok(())
}
