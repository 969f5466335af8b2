//! Browser side of the scroll trigger: the window scroll listener and the
//! sticky pin spacer.

use crate::core::{ProgressCell, ScrollTrigger, ScrollTriggerConfig};
use crate::dom::Listener;
use anyhow::anyhow;
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub struct ScrollBinding {
    trigger: Rc<RefCell<ScrollTrigger>>,
    container: web::HtmlElement,
    spacer: Option<web::Element>,
    listener: Option<Listener>,
    resize: Option<Listener>,
}

fn viewport_height(window: &web::Window) -> anyhow::Result<f64> {
    Ok(window
        .inner_height()
        .map_err(|e| anyhow!("innerHeight: {:?}", e))?
        .as_f64()
        .unwrap_or(0.0))
}

/// Re-measure the region after layout changed. While pinned the container is
/// sticky, so the region top comes from the spacer instead.
fn refresh(
    window: &web::Window,
    trigger: &RefCell<ScrollTrigger>,
    container: &web::HtmlElement,
    spacer: Option<&web::Element>,
) -> anyhow::Result<()> {
    let scroll_y = window.scroll_y().map_err(|e| anyhow!("scrollY: {:?}", e))?;
    let viewport_h = viewport_height(window)?;
    let region_top = match spacer {
        Some(spacer) => spacer.get_bounding_client_rect().top(),
        None => container.get_bounding_client_rect().top(),
    } + scroll_y;

    let mut trigger = trigger.borrow_mut();
    if trigger.is_disposed() {
        return Ok(());
    }
    trigger.set_region(region_top, viewport_h);
    if let Some(spacer) = spacer {
        let height = trigger.pin_length(container.get_bounding_client_rect().height());
        _ = spacer.set_attribute("style", &spacer_style(height));
    }
    _ = trigger.on_scroll(scroll_y);
    Ok(())
}

impl ScrollBinding {
    pub fn mount(
        document: &web::Document,
        container: web::HtmlElement,
        config: ScrollTriggerConfig,
        cell: ProgressCell,
    ) -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow!("no window"))?;
        let scroll_y = window.scroll_y().map_err(|e| anyhow!("scrollY: {:?}", e))?;
        let viewport_h = viewport_height(&window)?;
        let rect = container.get_bounding_client_rect();
        let trigger = ScrollTrigger::new(config, rect.top() + scroll_y, viewport_h, cell);

        let spacer = if config.pin {
            Some(pin(document, &container, trigger.pin_length(rect.height()))?)
        } else {
            None
        };

        let trigger = Rc::new(RefCell::new(trigger));
        trigger.borrow_mut().on_scroll(scroll_y);

        let trigger_scroll = trigger.clone();
        let window_scroll = window.clone();
        let listener = Listener::new(window.as_ref(), "scroll", move |_| {
            if let Ok(y) = window_scroll.scroll_y() {
                // None once disposed; the listener is about to be removed
                _ = trigger_scroll.borrow_mut().on_scroll(y);
            }
        })?;

        let trigger_resize = trigger.clone();
        let window_resize = window.clone();
        let container_resize = container.clone();
        let spacer_resize = spacer.clone();
        let resize = Listener::new(window.as_ref(), "resize", move |_| {
            if let Err(e) = refresh(
                &window_resize,
                &trigger_resize,
                &container_resize,
                spacer_resize.as_ref(),
            ) {
                log::warn!("[scroll] refresh failed: {:?}", e);
            }
        })?;
        log::info!("[scroll] bound, pin={}", config.pin);

        Ok(Self {
            trigger,
            container,
            spacer,
            listener: Some(listener),
            resize: Some(resize),
        })
    }

    /// Unregister and unpin. Safe to call more than once.
    pub fn dispose(&mut self) {
        if !self.trigger.borrow_mut().dispose() {
            return;
        }
        self.listener = None;
        self.resize = None;
        if let Some(spacer) = self.spacer.take() {
            unpin(&self.container, &spacer);
        }
        log::info!("[scroll] unbound");
    }
}

impl Drop for ScrollBinding {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn spacer_style(height: f64) -> String {
    format!("position: relative; height: {:.0}px;", height)
}

/// Wrap the container in a spacer tall enough to hold it for `height` px and
/// make it stick to the viewport top while the spacer scrolls past.
fn pin(
    document: &web::Document,
    container: &web::HtmlElement,
    height: f64,
) -> anyhow::Result<web::Element> {
    let parent = container
        .parent_node()
        .ok_or_else(|| anyhow!("pinned container has no parent"))?;
    let spacer = document
        .create_element("div")
        .map_err(|e| anyhow!("{:?}", e))?;
    spacer.set_class_name("pin-spacer");
    _ = spacer.set_attribute("style", &spacer_style(height));
    let container_node: &web::Node = container.as_ref();
    parent
        .insert_before(&spacer, Some(container_node))
        .map_err(|e| anyhow!("{:?}", e))?;
    spacer.append_child(container).map_err(|e| anyhow!("{:?}", e))?;
    let style = container.style();
    _ = style.set_property("position", "sticky");
    _ = style.set_property("top", "0px");
    Ok(spacer)
}

fn unpin(container: &web::HtmlElement, spacer: &web::Element) {
    let style = container.style();
    _ = style.set_property("position", "relative");
    _ = style.remove_property("top");
    if let Some(parent) = spacer.parent_node() {
        let spacer_node: &web::Node = spacer.as_ref();
        _ = parent.insert_before(container, Some(spacer_node));
        _ = parent.remove_child(spacer);
    }
}
