use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A registered DOM event listener. Dropping the guard removes the listener,
/// so a handler never outlives whatever owns the guard.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    /// Register `handler` for `event` on `target`. Events that are not of
    /// type `E` are ignored.
    pub fn new<E, F>(target: &web::EventTarget, event: &'static str, mut handler: F) -> Option<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        }) as Box<dyn FnMut(web::Event)>);
        match target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                event,
                closure,
            }),
            Err(e) => {
                log::error!("addEventListener({}) failed: {:?}", event, e);
                None
            }
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// Guards for a group of listeners that live and die together.
#[derive(Default)]
pub struct Listeners(Vec<ListenerGuard>);

impl Listeners {
    pub fn push(&mut self, guard: Option<ListenerGuard>) {
        if let Some(g) = guard {
            self.0.push(g);
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
