use crate::constants::{CONFIG_ELEMENT_ID, CURSOR_DEFAULT, CURSOR_POINTER, LINK_TARGET};
use head_core::{CursorStyle, SceneConfig};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let dpr = w.device_pixel_ratio();
        let rect = canvas.get_bounding_client_rect();
        let w_px = (rect.width() * dpr) as u32;
        let h_px = (rect.height() * dpr) as u32;
        canvas.set_width(w_px.max(1));
        canvas.set_height(h_px.max(1));
    }
}

pub fn set_cursor(canvas: &web::HtmlCanvasElement, cursor: CursorStyle) {
    let value = match cursor {
        CursorStyle::Pointer => CURSOR_POINTER,
        CursorStyle::Default => CURSOR_DEFAULT,
    };
    _ = canvas.style().set_property("cursor", value);
}

/// Open `url` in a new browsing context. The URL is passed through as-is;
/// failures are logged and otherwise ignored.
pub fn open_link(url: &str) {
    let Some(window) = web::window() else {
        return;
    };
    match window.open_with_url_and_target(url, LINK_TARGET) {
        Ok(_) => log::info!("[marker] opened {}", url),
        Err(e) => log::warn!("[marker] could not open {}: {:?}", url, e),
    }
}

/// Read the optional JSON config block from the page. Missing block means
/// defaults; a malformed block is logged and also falls back to defaults.
pub fn read_scene_config(document: &web::Document) -> SceneConfig {
    let Some(text) = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content())
    else {
        return SceneConfig::default();
    };
    if text.trim().is_empty() {
        return SceneConfig::default();
    }
    match SceneConfig::from_json(&text) {
        Ok(cfg) => {
            log::info!("[config] {} markers from #{}", cfg.markers.len(), CONFIG_ELEMENT_ID);
            cfg
        }
        Err(e) => {
            log::warn!("[config] ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
            SceneConfig::default()
        }
    }
}
