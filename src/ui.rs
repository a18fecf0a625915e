//! DOM helpers for overlays, HUD text and the confirmation modal
//!
//! Every element lookup is optional: a page without the element skips that
//! update and nothing else. Game logic never depends on anything here.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::Closure;
use web_sys::{Document, HtmlElement};

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Set the text of the element with `id`, if present
pub fn set_text(id: &str, text: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        el.set_text_content(Some(text));
    }
}

/// Replace the `class` attribute of the element with `id`, if present
pub fn set_class(id: &str, class: &str) {
    if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
        let _ = el.set_attribute("class", class);
    }
}

/// Fill and reveal the play overlay
pub fn show_overlay(title: &str, message: &str, button_label: &str) {
    let Some(document) = document() else { return };
    let Some(overlay) = document.get_element_by_id("play-overlay") else {
        return;
    };

    if let Ok(Some(h2)) = overlay.query_selector("h2") {
        h2.set_text_content(Some(title));
    }
    if let Ok(Some(p)) = overlay.query_selector("p") {
        p.set_text_content(Some(message));
    }
    if let Ok(Some(btn)) = overlay.query_selector("#start-game") {
        btn.set_text_content(Some(button_label));
    }

    let _ = overlay.class_list().remove_1("hidden");
}

/// Hide the play overlay
pub fn hide_overlay() {
    if let Some(overlay) = document().and_then(|d| d.get_element_by_id("play-overlay")) {
        let _ = overlay.class_list().add_1("hidden");
    }
}

/// Ask the user to confirm a destructive action. The decision arrives
/// asynchronously via `on_confirm`; cancel just closes the modal.
///
/// Handlers are assigned through `onclick`, not added, so repeated prompts
/// never stack listeners.
pub fn confirm(title: &str, message: &str, confirm_label: &str, on_confirm: impl FnMut() + 'static) {
    let Some(document) = document() else { return };
    let Some(modal) = document.get_element_by_id("app-modal") else {
        log::warn!("No confirmation modal in page, skipping prompt");
        return;
    };

    set_text("modal-title", title);
    set_text("modal-message", message);
    set_text("modal-confirm", confirm_label);

    if let Some(btn) = document
        .get_element_by_id("modal-confirm")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        let mut on_confirm = on_confirm;
        let closure = Closure::<dyn FnMut()>::new(move || {
            close_modal();
            on_confirm();
        });
        btn.set_onclick(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    if let Some(btn) = document
        .get_element_by_id("modal-cancel")
        .and_then(|e| e.dyn_into::<HtmlElement>().ok())
    {
        let closure = Closure::<dyn FnMut()>::new(close_modal);
        btn.set_onclick(Some(closure.as_ref().unchecked_ref()));
        closure.forget();
    }

    let _ = modal.class_list().remove_1("hidden");
}

fn close_modal() {
    if let Some(modal) = document().and_then(|d| d.get_element_by_id("app-modal")) {
        let _ = modal.class_list().add_1("hidden");
    }
}
