use crate::constants::{HINT_ID, PICKER_BADGE_ID};
use web_sys as web;

const HINT_LINES: [&str; 4] = [
    "Drag to rotate",
    "Right-drag or shift-drag to pan",
    "Scroll for zoom",
    "P: pick points \u{2022} C: clear picks \u{2022} R: auto-rotate \u{2022} H: hide help",
];

#[inline]
fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        let cl = el.class_list();
        _ = cl.add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
fn is_hidden(document: &web::Document, id: &str) -> bool {
    if let Some(el) = document.get_element_by_id(id) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

/// Fill the instruction overlay and show it.
pub fn show_hint(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_ID) {
        let items: String = HINT_LINES
            .iter()
            .map(|line| format!("<div class='instruction-item'>{}</div>", line))
            .collect();
        el.set_inner_html(&items);
    }
    show(document, HINT_ID);
}

#[inline]
pub fn toggle_hint(document: &web::Document) {
    if is_hidden(document, HINT_ID) {
        show(document, HINT_ID);
    } else {
        hide(document, HINT_ID);
    }
}

/// Small badge shown while the surface picker is active.
pub fn set_picker_badge(document: &web::Document, active: bool) {
    if active {
        if let Some(el) = document.get_element_by_id(PICKER_BADGE_ID) {
            el.set_text_content(Some("Picking: click the head to log surface points"));
        }
        show(document, PICKER_BADGE_ID);
    } else {
        hide(document, PICKER_BADGE_ID);
    }
}
