use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use crate::config::TOUCH_BREAKPOINT_PX;

/// Phone user agents or narrow viewports count as touch-primary.
pub fn is_touch_primary(user_agent: &str, viewport_width: f64) -> bool {
    let phone = ["iPhone", "iPod", "Android"]
        .iter()
        .any(|needle| user_agent.contains(needle));
    phone || viewport_width <= TOUCH_BREAKPOINT_PX
}

fn detect() -> bool {
    let Some(win) = web_sys::window() else {
        return false;
    };
    let ua = win.navigator().user_agent().unwrap_or_default();
    let width = win
        .inner_width()
        .ok()
        .and_then(|w| w.as_f64())
        .unwrap_or(f64::MAX);
    is_touch_primary(&ua, width)
}

/// Touch-primary flag, re-evaluated on window resize.
#[hook]
pub fn use_touch_primary() -> bool {
    let flag = use_state(detect);
    {
        let setter = flag.setter();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
            if let Some(win) = &window {
                let cb = Closure::wrap(Box::new(move || setter.set(detect())) as Box<dyn FnMut()>);
                if win
                    .add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref())
                    .is_ok()
                {
                    *resize_cb.borrow_mut() = Some(cb);
                }
            }
            move || {
                if let (Some(win), Some(cb)) = (window, resize_cb.borrow_mut().take()) {
                    let _ = win.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
                }
            }
        });
    }
    *flag
}
