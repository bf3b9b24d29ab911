use super::PickerTool;
use crate::app::App;
use crate::dom;
use crate::listener::ListenerGuard;
use crate::overlay;
use head_core::{key_action, KeyAction};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub fn handle_global_keydown(
    ev: &web::KeyboardEvent,
    app: &Rc<RefCell<App>>,
    picker: &Rc<RefCell<PickerTool>>,
) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let Some(action) = key_action(&ev.key()) else {
        return;
    };
    match action {
        KeyAction::TogglePicker => picker.borrow_mut().toggle(),
        KeyAction::ClearPicks => {
            app.borrow_mut().state.clear_picks();
            log::info!("[keys] cleared picks");
        }
        KeyAction::ToggleAutoRotate => {
            let mut a = app.borrow_mut();
            a.state.orbit.auto_rotate = !a.state.orbit.auto_rotate;
            log::info!("[keys] auto-rotate {}", a.state.orbit.auto_rotate);
        }
        KeyAction::ToggleHint => {
            if let Some(doc) = dom::window_document() {
                overlay::toggle_hint(&doc);
            }
        }
        KeyAction::ResetView => {
            app.borrow_mut().state.reset_view();
            log::info!("[keys] view reset");
        }
    }
    ev.prevent_default();
}

pub fn wire_global_keydown(
    app: Rc<RefCell<App>>,
    picker: Rc<RefCell<PickerTool>>,
) -> Option<ListenerGuard> {
    let window = web::window()?;
    ListenerGuard::new(&window, "keydown", move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &app, &picker);
    })
}
