// Viewer controller: owns one ZoomState and routes normalized gestures into it.
use crate::model::{Point, WheelDirection, ZoomAction, ZoomState};
use crate::state::gesture::{Gesture, GestureNormalizer, TouchPoint};
use crate::util::zoom_percent;

pub const HINT_IDLE: &str = "Click to zoom • Scroll to adjust";

/// `scale(s) translate(x, y)`: scale first, translation in post-scale space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTransform {
    pub scale: f64,
    pub translate: Point,
}

impl ZoomTransform {
    pub fn css(&self) -> String {
        format!(
            "scale({}) translate({}px, {}px)",
            self.scale, self.translate.x, self.translate.y
        )
    }

    /// Same transform as a CSS `matrix(a, b, c, d, e, f)`.
    pub fn matrix(&self) -> [f64; 6] {
        let s = self.scale;
        [s, 0.0, 0.0, s, s * self.translate.x, s * self.translate.y]
    }
}

#[derive(Debug, Clone)]
pub struct ViewerController {
    state: ZoomState,
    gestures: GestureNormalizer,
    touch_primary: bool,
    image_index: usize,
}

impl ViewerController {
    pub fn new(touch_primary: bool) -> Self {
        Self {
            state: ZoomState::default(),
            gestures: GestureNormalizer::default(),
            touch_primary,
            image_index: 0,
        }
    }

    pub fn state(&self) -> ZoomState {
        self.state
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn set_touch_primary(&mut self, touch_primary: bool) {
        self.touch_primary = touch_primary;
    }

    pub fn on_tap(&mut self) {
        self.state = self.state.apply(ZoomAction::Tap);
    }

    pub fn on_double_tap(&mut self) {
        self.gestures.cancel();
        self.state = self.state.apply(ZoomAction::Reset);
    }

    pub fn on_drag_update(&mut self, offset: Point) {
        self.state = self.state.apply(ZoomAction::Pan(offset));
    }

    pub fn on_wheel_zoom(&mut self, direction: WheelDirection) {
        if self.touch_primary {
            return;
        }
        self.state = self.state.apply(ZoomAction::Wheel(direction));
    }

    pub fn on_pinch_zoom(&mut self, scale_factor: f64) {
        let start_scale = self
            .gestures
            .pinch_start_scale()
            .unwrap_or(self.state.scale());
        self.state = self.state.apply(ZoomAction::Pinch {
            start_scale,
            factor: scale_factor,
        });
    }

    /// Switch gallery image. Always resets the zoom, even for the same index.
    pub fn select_image(&mut self, index: usize) {
        self.image_index = index;
        self.gestures.cancel();
        self.state = ZoomState::default();
    }

    pub fn render(&self) -> ZoomTransform {
        ZoomTransform {
            scale: self.state.scale(),
            translate: self.state.offset,
        }
    }

    pub fn hint(&self) -> String {
        if self.state.is_zoomed() {
            format!("Drag to pan • {}%", zoom_percent(self.state.scale()))
        } else {
            HINT_IDLE.to_string()
        }
    }

    fn dispatch(&mut self, gesture: Option<Gesture>) {
        match gesture {
            Some(Gesture::Tap) => self.on_tap(),
            Some(Gesture::DragUpdate(offset)) => self.on_drag_update(offset),
            Some(Gesture::Pinch { scale_factor }) => self.on_pinch_zoom(scale_factor),
            Some(Gesture::Wheel(dir)) => self.on_wheel_zoom(dir),
            None => {}
        }
    }

    // Raw input entry points. The `bool` returns tell the DOM layer whether a
    // session began and document listeners must be attached.

    pub fn pointer_down(&mut self, pos: Point) -> bool {
        self.gestures.pointer_down(pos, &self.state)
    }

    pub fn pointer_move(&mut self, pos: Point) {
        let g = self.gestures.pointer_move(pos);
        self.dispatch(g);
    }

    pub fn pointer_up(&mut self) {
        let g = self.gestures.pointer_up();
        self.dispatch(g);
    }

    pub fn touch_start(&mut self, touches: &[TouchPoint]) -> bool {
        self.gestures.touch_start(touches, &self.state)
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint]) {
        let g = self.gestures.touch_move(touches);
        self.dispatch(g);
    }

    pub fn touch_end(&mut self) {
        let g = self.gestures.touch_end();
        self.dispatch(g);
    }

    pub fn cancel(&mut self) {
        self.gestures.cancel();
    }

    pub fn click(&mut self) {
        let g = self.gestures.click();
        self.dispatch(g);
    }

    pub fn release_click_guard(&mut self) {
        self.gestures.release_click_guard();
    }

    pub fn wheel(&mut self, delta_y: f64) {
        let g = self.gestures.wheel(delta_y);
        self.dispatch(Some(g));
    }
}
