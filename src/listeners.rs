// Document-level listeners that live for exactly one gesture.
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

pub type Handler = Closure<dyn FnMut(Event)>;

/// Register `handler` with `passive: false` so it may call `prevent_default`.
pub fn listen_active(target: &EventTarget, event: &str, handler: &Handler) {
    let opts = AddEventListenerOptions::new();
    opts.set_passive(false);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        event,
        handler.as_ref().unchecked_ref(),
        &opts,
    ) {
        log::warn!("could not listen for {event}: {err:?}");
    }
}

pub fn unlisten(target: &EventTarget, event: &str, handler: &Handler) {
    let _ = target.remove_event_listener_with_callback(event, handler.as_ref().unchecked_ref());
}

/// Listeners attached on gesture start and removed on the matching end.
///
/// A handler usually detaches its own set (mouseup removing mousemove and
/// itself), so detached closures are parked in `retired` instead of being
/// dropped while still on the stack. They are freed on the next attach or on
/// teardown.
pub struct GestureListeners {
    target: Option<EventTarget>,
    active: Vec<(&'static str, Handler)>,
    retired: Vec<Handler>,
}

impl GestureListeners {
    pub fn on_document() -> Self {
        let target = web_sys::window()
            .and_then(|w| w.document())
            .map(|d| d.unchecked_into::<EventTarget>());
        Self {
            target,
            active: Vec::new(),
            retired: Vec::new(),
        }
    }

    pub fn attach(&mut self, event: &'static str, f: impl FnMut(Event) + 'static) {
        self.retired.clear();
        let Some(target) = &self.target else {
            return;
        };
        let handler: Handler = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
        listen_active(target, event, &handler);
        self.active.push((event, handler));
    }

    #[cfg(test)]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Safe to call from inside one of the attached handlers.
    pub fn detach_all(&mut self) {
        for (event, handler) in self.active.drain(..) {
            if let Some(target) = &self.target {
                unlisten(target, event, &handler);
            }
            self.retired.push(handler);
        }
    }

    /// Detach and free everything. Must not run inside an attached handler.
    pub fn teardown(&mut self) {
        self.detach_all();
        self.retired.clear();
    }
}

impl Drop for GestureListeners {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fire(name: &str) {
        let doc = web_sys::window().and_then(|w| w.document()).unwrap();
        doc.dispatch_event(&Event::new(name).unwrap()).unwrap();
    }

    fn counter(hits: &Rc<Cell<u32>>) -> impl FnMut(Event) + 'static {
        let hits = hits.clone();
        move |_| hits.set(hits.get() + 1)
    }

    #[wasm_bindgen_test]
    fn release_handler_detaches_its_own_set() {
        let set = Rc::new(RefCell::new(GestureListeners::on_document()));
        let moves = Rc::new(Cell::new(0));
        {
            let mut l = set.borrow_mut();
            l.attach("mousemove", counter(&moves));
            let inner = set.clone();
            l.attach("mouseup", move |_| inner.borrow_mut().detach_all());
        }

        fire("mousemove");
        assert_eq!(moves.get(), 1);

        fire("mouseup");
        assert!(set.borrow().active.is_empty());
        assert_eq!(set.borrow().retired.len(), 2);

        fire("mousemove");
        assert_eq!(moves.get(), 1);

        set.borrow_mut().teardown();
        assert!(set.borrow().active.is_empty());
        assert!(set.borrow().retired.is_empty());
    }

    #[wasm_bindgen_test]
    fn next_attach_frees_retired_handlers() {
        let mut l = GestureListeners::on_document();
        let hits = Rc::new(Cell::new(0));
        l.attach("touchmove", counter(&hits));
        l.detach_all();
        assert_eq!(l.retired.len(), 1);

        l.attach("touchmove", counter(&hits));
        assert!(l.retired.is_empty());
        assert_eq!(l.active.len(), 1);
        fire("touchmove");
        assert_eq!(hits.get(), 1);
        l.teardown();
    }

    #[wasm_bindgen_test]
    fn dropping_the_set_removes_document_listeners() {
        let hits = Rc::new(Cell::new(0));
        {
            let mut l = GestureListeners::on_document();
            l.attach("mouseup", counter(&hits));
            fire("mouseup");
        }
        fire("mouseup");
        assert_eq!(hits.get(), 1);
    }
}
