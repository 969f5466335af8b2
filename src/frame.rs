use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

struct LoopState {
    alive: Cell<bool>,
    raf_id: Cell<Option<i32>>,
    tick: RefCell<Option<Closure<dyn FnMut()>>>,
}

impl LoopState {
    fn request(&self) {
        let Some(w) = web::window() else { return };
        let id = match self.tick.borrow().as_ref() {
            Some(cb) => w.request_animation_frame(cb.as_ref().unchecked_ref()).ok(),
            None => None,
        };
        self.raf_id.set(id);
    }
}

/// `requestAnimationFrame` loop that stops rescheduling once stopped.
pub struct FrameLoop {
    state: Rc<LoopState>,
}

impl FrameLoop {
    pub fn start(mut on_frame: impl FnMut() + 'static) -> Self {
        let state = Rc::new(LoopState {
            alive: Cell::new(true),
            raf_id: Cell::new(None),
            tick: RefCell::new(None),
        });
        let weak = Rc::downgrade(&state);
        *state.tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let Some(state) = weak.upgrade() else { return };
            if !state.alive.get() {
                return;
            }
            on_frame();
            if state.alive.get() {
                state.request();
            }
        }) as Box<dyn FnMut()>));
        state.request();
        log::debug!("[app] frame loop started");
        Self { state }
    }

    /// Cancel the pending frame and release the callback. Idempotent.
    pub fn stop(&self) {
        if !self.state.alive.replace(false) {
            return;
        }
        if let (Some(w), Some(id)) = (web::window(), self.state.raf_id.take()) {
            _ = w.cancel_animation_frame(id);
        }
        self.state.tick.borrow_mut().take();
        log::debug!("[app] frame loop stopped");
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
