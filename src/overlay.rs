use crate::constants::{LOADING_BAR_ID, LOADING_LABEL_ID, LOADING_OVERLAY_ID};
use crate::core::LoadingTracker;
use web_sys as web;

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(LOADING_OVERLAY_ID) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback for pages without the CSS class
        _ = el.set_attribute("style", "display:none");
    }
}

/// Reflect loading progress in the overlay; hides it once everything mounted.
pub fn update(document: &web::Document, tracker: &LoadingTracker) {
    if let Some(bar) = document.get_element_by_id(LOADING_BAR_ID) {
        _ = bar.set_attribute("style", &format!("width: {}", tracker.bar_width()));
    }
    if let Some(label) = document.get_element_by_id(LOADING_LABEL_ID) {
        label.set_text_content(Some(&tracker.label()));
    }
    if tracker.is_done() {
        log::info!("[loading] done");
        hide(document);
    }
}
