use super::InputWiring;
use crate::input;
use crate::listener::ListenerGuard;
use crate::overlay;
use web_sys as web;

/// The surface picker as a page tool: while active it owns a click listener
/// on the canvas; deactivating drops the listener and the picker's visuals.
pub struct PickerTool {
    wiring: InputWiring,
    listener: Option<ListenerGuard>,
}

impl PickerTool {
    pub fn new(wiring: InputWiring) -> Self {
        Self {
            wiring,
            listener: None,
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.listener.is_some()
    }

    pub fn activate(&mut self) {
        if self.is_active() {
            return;
        }
        let w = self.wiring.clone();
        let target = w.canvas.clone();
        self.listener = ListenerGuard::new(&target, "click", move |ev: web::MouseEvent| {
            let pos = input::pointer_canvas_px(&ev, &w.canvas);
            let mut app = w.app.borrow_mut();
            if !app.state.is_click_gesture() {
                return;
            }
            let Some(mesh) = app.mesh.clone() else {
                log::debug!("[pick] no mesh loaded yet");
                return;
            };
            if let Some(found) = app.state.pick(&mesh, pos) {
                log::info!("{}", found.comment_line());
                log::info!("{}", found.record_line());
            }
        });
        let active = self.is_active();
        self.wiring.app.borrow_mut().state.set_picker_active(active);
        update_badge(active);
    }

    pub fn deactivate(&mut self) {
        self.listener = None;
        self.wiring.app.borrow_mut().state.set_picker_active(false);
        update_badge(false);
    }

    pub fn toggle(&mut self) {
        if self.is_active() {
            self.deactivate();
        } else {
            self.activate();
        }
    }
}

impl Drop for PickerTool {
    fn drop(&mut self) {
        self.listener = None;
        if let Ok(mut app) = self.wiring.app.try_borrow_mut() {
            app.state.set_picker_active(false);
        }
    }
}

fn update_badge(active: bool) {
    if let Some(doc) = crate::dom::window_document() {
        overlay::set_picker_badge(&doc, active);
    }
}
