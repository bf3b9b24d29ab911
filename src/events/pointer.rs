use crate::app::App;
use crate::dom;
use crate::input;
use crate::listener::{ListenerGuard, Listeners};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub app: Rc<RefCell<App>>,
}

/// Orbit drag (right or shift drag pans), wheel zoom, pointer tracking for hover, and label clicks.
pub fn wire_input_handlers(w: &InputWiring, listeners: &mut Listeners) {
    listeners.push(wire_pointermove(w));
    listeners.push(wire_pointerdown(w));
    listeners.push(wire_pointerup(w));
    listeners.push(wire_pointerleave(w));
    listeners.push(wire_wheel(w));
    listeners.push(wire_contextmenu(w));
    listeners.push(wire_label_click(w));
}

fn wire_pointermove(w: &InputWiring) -> Option<ListenerGuard> {
    let w = w.clone();
    let target = w.canvas.clone();
    ListenerGuard::new(&target, "pointermove", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        w.app.borrow_mut().state.pointer_move(pos);
    })
}

fn wire_pointerdown(w: &InputWiring) -> Option<ListenerGuard> {
    let w = w.clone();
    let target = w.canvas.clone();
    ListenerGuard::new(&target, "pointerdown", move |ev: web::PointerEvent| {
        let pos = input::pointer_canvas_px(&ev, &w.canvas);
        let pan = head_core::is_pan_drag(ev.button(), ev.shift_key());
        w.app.borrow_mut().state.pointer_down(pos, pan);
        _ = w.canvas.set_pointer_capture(ev.pointer_id());
    })
}

fn wire_pointerup(w: &InputWiring) -> Option<ListenerGuard> {
    let w = w.clone();
    let target = w.canvas.clone();
    ListenerGuard::new(&target, "pointerup", move |ev: web::PointerEvent| {
        w.app.borrow_mut().state.pointer_up();
        _ = w.canvas.release_pointer_capture(ev.pointer_id());
    })
}

fn wire_pointerleave(w: &InputWiring) -> Option<ListenerGuard> {
    let w = w.clone();
    let target = w.canvas.clone();
    ListenerGuard::new(&target, "pointerleave", move |_ev: web::PointerEvent| {
        let mut app = w.app.borrow_mut();
        if !app.state.drag.active {
            app.state.set_pointer(None);
        }
    })
}

fn wire_wheel(w: &InputWiring) -> Option<ListenerGuard> {
    let w = w.clone();
    let target = w.canvas.clone();
    ListenerGuard::new(&target, "wheel", move |ev: web::WheelEvent| {
        ev.prevent_default();
        w.app.borrow_mut().state.zoom(input::wheel_delta_px(&ev));
    })
}

// Right-drag pans, so the context menu stays closed over the canvas.
fn wire_contextmenu(w: &InputWiring) -> Option<ListenerGuard> {
    ListenerGuard::new(&w.canvas, "contextmenu", |ev: web::MouseEvent| {
        ev.prevent_default();
    })
}

fn wire_label_click(w: &InputWiring) -> Option<ListenerGuard> {
    let w = w.clone();
    let target = w.canvas.clone();
    ListenerGuard::new(&target, "click", move |_ev: web::MouseEvent| {
        let link = {
            let app = w.app.borrow();
            if !app.state.is_click_gesture() {
                return;
            }
            app.state.click_link()
        };
        if let Some(url) = link {
            dom::open_link(&url);
        }
    })
}
