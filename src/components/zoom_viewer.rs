use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlElement, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use crate::config::{CLICK_GUARD_MS, PLACEHOLDER_IMAGE, asset_path};
use crate::listeners::{GestureListeners, Handler, listen_active, unlisten};
use crate::model::{Point, ZoomState};
use crate::records::GalleryImage;
use crate::state::{TouchPoint, ViewerController};

#[derive(Properties, PartialEq, Clone)]
pub struct ZoomViewerProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    #[prop_or_default]
    pub gallery: Vec<GalleryImage>,
    #[prop_or_default]
    pub touch_primary: bool,
}

type SharedController = Rc<RefCell<ViewerController>>;

fn touch_points(e: &TouchEvent) -> Vec<TouchPoint> {
    let list = e.touches();
    (0..list.length())
        .filter_map(|i| list.item(i))
        .map(|t| TouchPoint {
            id: t.identifier(),
            pos: Point::new(t.client_x() as f64, t.client_y() as f64),
        })
        .collect()
}

fn mouse_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

// Lift the click guard after the browser had its chance to deliver `click`.
fn release_guard_later(ctrl: &SharedController) {
    let ctrl = ctrl.clone();
    Timeout::new(CLICK_GUARD_MS, move || ctrl.borrow_mut().release_click_guard()).forget();
}

type SharedListeners = Rc<RefCell<GestureListeners>>;

// Document listeners for one mouse drag: move, release, and the pointer
// leaving the window, which ends the drag without a tap.
fn attach_mouse_drag(listeners: &SharedListeners, ctrl: &SharedController, sync: &Rc<dyn Fn()>) {
    let mut l = listeners.borrow_mut();
    l.detach_all();
    {
        let ctrl = ctrl.clone();
        let sync = sync.clone();
        l.attach("mousemove", move |ev: Event| {
            if let Some(me) = ev.dyn_ref::<MouseEvent>() {
                me.prevent_default();
                ctrl.borrow_mut().pointer_move(mouse_point(me));
                sync();
            }
        });
    }
    {
        let ctrl = ctrl.clone();
        let sync = sync.clone();
        let listeners = listeners.clone();
        l.attach("mouseup", move |_ev: Event| {
            ctrl.borrow_mut().pointer_up();
            sync();
            listeners.borrow_mut().detach_all();
            release_guard_later(&ctrl);
            log::debug!("drag candidate ended");
        });
    }
    {
        let ctrl = ctrl.clone();
        let sync = sync.clone();
        let listeners = listeners.clone();
        l.attach("mouseleave", move |_ev: Event| {
            ctrl.borrow_mut().cancel();
            sync();
            listeners.borrow_mut().detach_all();
            release_guard_later(&ctrl);
            log::debug!("drag cancelled: pointer left the window");
        });
    }
}

fn attach_touch_gesture(listeners: &SharedListeners, ctrl: &SharedController, sync: &Rc<dyn Fn()>) {
    let mut l = listeners.borrow_mut();
    l.detach_all();
    {
        let ctrl = ctrl.clone();
        let sync = sync.clone();
        l.attach("touchmove", move |ev: Event| {
            if let Some(te) = ev.dyn_ref::<TouchEvent>() {
                te.prevent_default();
                ctrl.borrow_mut().touch_move(&touch_points(te));
                sync();
            }
        });
    }
    {
        let ctrl = ctrl.clone();
        let sync = sync.clone();
        let listeners = listeners.clone();
        l.attach("touchend", move |_ev: Event| {
            ctrl.borrow_mut().touch_end();
            sync();
            listeners.borrow_mut().detach_all();
            release_guard_later(&ctrl);
        });
    }
    {
        let ctrl = ctrl.clone();
        let listeners = listeners.clone();
        l.attach("touchcancel", move |_ev: Event| {
            ctrl.borrow_mut().cancel();
            listeners.borrow_mut().detach_all();
            release_guard_later(&ctrl);
        });
    }
}

#[function_component(ZoomViewer)]
pub fn zoom_viewer(props: &ZoomViewerProps) -> Html {
    let container_ref = use_node_ref();
    let controller = use_mut_ref(|| ViewerController::new(props.touch_primary));
    let listeners = use_mut_ref(GestureListeners::on_document);
    let snapshot = use_state(ZoomState::default);
    let load_failed = use_state(|| false);

    let sync: Rc<dyn Fn()> = {
        let setter = snapshot.setter();
        let ctrl = controller.clone();
        Rc::new(move || setter.set(ctrl.borrow().state()))
    };

    // A new source is a new image: back to defaults.
    {
        let ctrl = controller.clone();
        let sync = sync.clone();
        let load_failed = load_failed.clone();
        use_effect_with(props.src.clone(), move |_| {
            ctrl.borrow_mut().select_image(0);
            load_failed.set(false);
            sync();
            || ()
        });
    }

    // Wheel zoom only on pointer-primary devices; needs a non-passive listener.
    {
        let container_ref = container_ref.clone();
        let ctrl = controller.clone();
        let sync = sync.clone();
        use_effect_with(props.touch_primary, move |touch_primary| {
            ctrl.borrow_mut().set_touch_primary(*touch_primary);
            let mut registered: Option<(EventTarget, Handler)> = None;
            if !*touch_primary {
                if let Some(el) = container_ref.cast::<HtmlElement>() {
                    let handler: Handler = Closure::wrap(Box::new(move |ev: Event| {
                        if let Some(we) = ev.dyn_ref::<WheelEvent>() {
                            we.prevent_default();
                            ctrl.borrow_mut().wheel(we.delta_y());
                            sync();
                        }
                    }) as Box<dyn FnMut(Event)>);
                    let target: EventTarget = el.into();
                    listen_active(&target, "wheel", &handler);
                    registered = Some((target, handler));
                }
            }
            move || {
                if let Some((target, handler)) = registered {
                    unlisten(&target, "wheel", &handler);
                }
            }
        });
    }

    // Unmount: nothing may stay attached to the document.
    {
        let listeners = listeners.clone();
        use_effect_with((), move |_| move || listeners.borrow_mut().teardown());
    }

    let onmousedown = {
        let ctrl = controller.clone();
        let listeners = listeners.clone();
        let sync = sync.clone();
        Callback::from(move |e: MouseEvent| {
            if !ctrl.borrow_mut().pointer_down(mouse_point(&e)) {
                return;
            }
            e.prevent_default();
            log::debug!("drag candidate started");
            attach_mouse_drag(&listeners, &ctrl, &sync);
        })
    };

    let ontouchstart = {
        let ctrl = controller.clone();
        let listeners = listeners.clone();
        let sync = sync.clone();
        Callback::from(move |e: TouchEvent| {
            let touches = touch_points(&e);
            if !ctrl.borrow_mut().touch_start(&touches) {
                return;
            }
            log::debug!("touch gesture started with {} contacts", touches.len());
            attach_touch_gesture(&listeners, &ctrl, &sync);
        })
    };

    let onclick = {
        let ctrl = controller.clone();
        let sync = sync.clone();
        Callback::from(move |_e: MouseEvent| {
            ctrl.borrow_mut().click();
            sync();
        })
    };

    let ondblclick = {
        let ctrl = controller.clone();
        let sync = sync.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            ctrl.borrow_mut().on_double_tap();
            sync();
        })
    };

    let on_select = {
        let ctrl = controller.clone();
        let sync = sync.clone();
        let load_failed = load_failed.clone();
        Callback::from(move |i: usize| {
            ctrl.borrow_mut().select_image(i);
            load_failed.set(false);
            sync();
        })
    };

    let onerror = {
        let load_failed = load_failed.clone();
        Callback::from(move |_| load_failed.set(true))
    };

    let images: Vec<GalleryImage> = if props.gallery.is_empty() {
        vec![GalleryImage {
            src: props.src.to_string(),
            caption: props.alt.to_string(),
        }]
    } else {
        props.gallery.clone()
    };
    let selected = controller.borrow().image_index();
    let current = images.get(selected).or_else(|| images.first());
    let src = if *load_failed {
        asset_path(PLACEHOLDER_IMAGE)
    } else {
        current.map(|img| asset_path(&img.src)).unwrap_or_default()
    };

    let (transform, hint) = {
        let c = controller.borrow();
        (c.render().css(), c.hint())
    };
    let cursor = if snapshot.is_zoomed() { "grab" } else { "zoom-in" };
    let container_class = if snapshot.is_zoomed() {
        "viewer-image-container zoomed"
    } else {
        "viewer-image-container"
    };

    let thumbnails = if images.len() > 1 {
        html! {<div class="viewer-gallery" style="display:flex; gap:8px; overflow-x:auto; padding:8px 0;">
            { for images.iter().enumerate().map(|(i, img)| {
                let cb = on_select.clone();
                let onclick = Callback::from(move |_| cb.emit(i));
                let border = if i == selected { "2px solid #58a6ff" } else { "1px solid #30363d" };
                html! {<div key={i} {onclick} style={format!("cursor:pointer; border:{}; border-radius:6px; padding:4px; width:96px; flex:0 0 auto;", border)}>
                    <img src={asset_path(&img.src)} alt={img.caption.clone()} style="width:100%; height:64px; object-fit:cover;" />
                    <div style="font-size:11px; text-align:center; opacity:0.8;">{ img.caption.clone() }</div>
                </div>}
            }) }
        </div>}
    } else {
        html! {}
    };

    html! {<div class="zoom-viewer" style="display:flex; flex-direction:column; width:100%; height:100%;">
        <div ref={container_ref} class={container_class}
            style="position:relative; flex:1; overflow:hidden; display:flex; align-items:center; justify-content:center; touch-action:none;"
            {onclick} {ondblclick} {onmousedown} {ontouchstart}>
            <img src={src} alt={props.alt.clone()} {onerror} draggable="false"
                style={format!("width:100%; height:100%; object-fit:contain; max-width:90%; max-height:90%; transform:{}; cursor:{}; user-select:none;", transform, cursor)} />
            <div class="viewer-zoom-indicator" style="position:absolute; bottom:12px; left:50%; transform:translateX(-50%); background:rgba(0,0,0,0.6); color:#fff; padding:4px 10px; border-radius:12px; font-size:12px; pointer-events:none;">
                { hint }
            </div>
            if props.touch_primary && !snapshot.is_zoomed() {
                <div class="viewer-tap-message" style="position:absolute; top:12px; left:50%; transform:translateX(-50%); font-size:12px; opacity:0.7; pointer-events:none;">{"tap to zoom"}</div>
            }
        </div>
        { thumbnails }
    </div>}
}
