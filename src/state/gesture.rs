// Gesture normalizer: turns raw mouse/touch/wheel input into tap, drag, pinch
// and wheel primitives. Holds no zoom state of its own; callers pass in what it
// needs at gesture start.
use crate::config::DRAG_THRESHOLD_PX;
use crate::model::{Point, WheelDirection, ZoomState};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub id: i32,
    pub pos: Point,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub start: Point,
    pub start_offset: Point,
    pub dragged: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSession {
    /// Touch identifiers of the two fingers that started the pinch.
    pub ids: (i32, i32),
    pub start_distance: f64,
    pub start_scale: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureSession {
    Drag(DragSession),
    Pinch(PinchSession),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gesture {
    Tap,
    /// New absolute pan offset.
    DragUpdate(Point),
    /// Current finger distance over the distance at pinch start.
    Pinch { scale_factor: f64 },
    Wheel(WheelDirection),
}

#[derive(Debug, Default, Clone)]
pub struct GestureNormalizer {
    session: Option<GestureSession>,
    /// Armed on every release; swallows the browser click that trails it.
    click_guard: bool,
}

impl GestureNormalizer {
    #[cfg(test)]
    pub fn session(&self) -> Option<&GestureSession> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub fn click_guard(&self) -> bool {
        self.click_guard
    }

    /// Mouse press. Returns true when a drag candidate started, i.e. the caller
    /// must attach document-level move/up listeners.
    pub fn pointer_down(&mut self, pos: Point, zoom: &ZoomState) -> bool {
        if !zoom.is_zoomed() {
            return false;
        }
        self.session = Some(GestureSession::Drag(DragSession {
            start: pos,
            start_offset: zoom.offset,
            dragged: false,
        }));
        self.click_guard = false;
        true
    }

    pub fn pointer_move(&mut self, pos: Point) -> Option<Gesture> {
        let Some(GestureSession::Drag(drag)) = self.session.as_mut() else {
            return None;
        };
        if !drag.dragged && drag.start.distance_to(pos) > DRAG_THRESHOLD_PX {
            drag.dragged = true;
        }
        if !drag.dragged {
            return None;
        }
        Some(Gesture::DragUpdate(drag.start_offset + (pos - drag.start)))
    }

    /// Mouse release. Ends any session; a drag candidate that never crossed the
    /// threshold is reported as a tap.
    pub fn pointer_up(&mut self) -> Option<Gesture> {
        let session = self.session.take()?;
        self.click_guard = true;
        match session {
            GestureSession::Drag(drag) if !drag.dragged => Some(Gesture::Tap),
            _ => None,
        }
    }

    /// Touch start with the full list of active touches. Returns true when a
    /// session (drag or pinch) started.
    pub fn touch_start(&mut self, touches: &[TouchPoint], zoom: &ZoomState) -> bool {
        match touches {
            [a, b, ..] => {
                self.session = Some(GestureSession::Pinch(PinchSession {
                    ids: (a.id, b.id),
                    start_distance: a.pos.distance_to(b.pos),
                    start_scale: zoom.scale(),
                }));
                self.click_guard = false;
                true
            }
            [only] => self.pointer_down(only.pos, zoom),
            [] => false,
        }
    }

    pub fn touch_move(&mut self, touches: &[TouchPoint]) -> Option<Gesture> {
        let session = self.session?;
        match (session, touches) {
            (GestureSession::Drag(_), [only]) => self.pointer_move(only.pos),
            (GestureSession::Pinch(pinch), _) => {
                if pinch.start_distance <= 0.0 {
                    return None;
                }
                let find = |id: i32| touches.iter().find(|t| t.id == id).map(|t| t.pos);
                let (Some(a), Some(b)) = (find(pinch.ids.0), find(pinch.ids.1)) else {
                    return None;
                };
                let current = a.distance_to(b);
                Some(Gesture::Pinch {
                    scale_factor: current / pinch.start_distance,
                })
            }
            _ => None,
        }
    }

    pub fn touch_end(&mut self) -> Option<Gesture> {
        self.pointer_up()
    }

    /// Abnormal end (touchcancel, pointer left the window): no tap.
    pub fn cancel(&mut self) {
        if self.session.take().is_some() {
            self.click_guard = true;
        }
    }

    /// Browser click. Taps that were already reported on release are swallowed.
    pub fn click(&mut self) -> Option<Gesture> {
        if self.click_guard || self.session.is_some() {
            return None;
        }
        Some(Gesture::Tap)
    }

    pub fn release_click_guard(&mut self) {
        self.click_guard = false;
    }

    pub fn wheel(&self, delta_y: f64) -> Gesture {
        Gesture::Wheel(WheelDirection::from_delta_y(delta_y))
    }

    /// Start scale of the active pinch, if any.
    pub fn pinch_start_scale(&self) -> Option<f64> {
        match self.session {
            Some(GestureSession::Pinch(p)) => Some(p.start_scale),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zoomed() -> ZoomState {
        ZoomState::with_scale(2.0, Point::new(10.0, 20.0))
    }

    fn touch(id: i32, x: f64, y: f64) -> TouchPoint {
        TouchPoint { id, pos: Point::new(x, y) }
    }

    #[test]
    fn no_drag_candidate_when_not_zoomed() {
        let mut g = GestureNormalizer::default();
        assert!(!g.pointer_down(Point::ORIGIN, &ZoomState::default()));
        assert_eq!(g.pointer_move(Point::new(50.0, 0.0)), None);
        assert_eq!(g.pointer_up(), None);
        assert_eq!(g.click(), Some(Gesture::Tap));
    }

    #[test]
    fn press_release_without_move_is_one_tap() {
        let mut g = GestureNormalizer::default();
        assert!(g.pointer_down(Point::new(100.0, 100.0), &zoomed()));
        let mut taps = 0;
        if g.pointer_up() == Some(Gesture::Tap) {
            taps += 1;
        }
        if g.click() == Some(Gesture::Tap) {
            taps += 1;
        }
        assert_eq!(taps, 1);
    }

    #[test]
    fn drag_past_threshold_updates_offset_and_suppresses_tap() {
        let mut g = GestureNormalizer::default();
        g.pointer_down(Point::new(100.0, 100.0), &zoomed());
        let upd = g.pointer_move(Point::new(130.0, 90.0));
        assert_eq!(upd, Some(Gesture::DragUpdate(Point::new(40.0, 10.0))));
        assert_eq!(g.pointer_up(), None);
        assert_eq!(g.click(), None);
        g.release_click_guard();
        assert!(!g.click_guard());
    }

    #[test]
    fn move_of_4_9_px_stays_a_tap() {
        let mut g = GestureNormalizer::default();
        g.pointer_down(Point::ORIGIN, &zoomed());
        assert_eq!(g.pointer_move(Point::new(4.9, 0.0)), None);
        assert_eq!(g.pointer_up(), Some(Gesture::Tap));
    }

    #[test]
    fn move_of_5_1_px_becomes_a_drag() {
        let mut g = GestureNormalizer::default();
        g.pointer_down(Point::ORIGIN, &zoomed());
        assert!(matches!(
            g.pointer_move(Point::new(0.0, 5.1)),
            Some(Gesture::DragUpdate(_))
        ));
        assert_eq!(g.pointer_up(), None);
    }

    #[test]
    fn dragged_flag_is_sticky_within_a_gesture() {
        let mut g = GestureNormalizer::default();
        g.pointer_down(Point::ORIGIN, &zoomed());
        g.pointer_move(Point::new(20.0, 0.0));
        assert_eq!(
            g.pointer_move(Point::new(1.0, 0.0)),
            Some(Gesture::DragUpdate(Point::new(11.0, 20.0)))
        );
        assert_eq!(g.pointer_up(), None);
    }

    #[test]
    fn session_is_torn_down_on_release_even_without_movement() {
        let mut g = GestureNormalizer::default();
        g.pointer_down(Point::ORIGIN, &zoomed());
        g.pointer_up();
        assert!(g.session().is_none());
        assert_eq!(g.pointer_move(Point::new(99.0, 99.0)), None);
    }

    #[test]
    fn two_touches_start_a_pinch_with_start_scale() {
        let mut g = GestureNormalizer::default();
        let z = ZoomState::with_scale(1.0, Point::ORIGIN);
        assert!(g.touch_start(&[touch(1, 0.0, 0.0), touch(2, 100.0, 0.0)], &z));
        assert_eq!(g.pinch_start_scale(), Some(1.0));
        let m = g.touch_move(&[touch(1, 0.0, 0.0), touch(2, 200.0, 0.0)]);
        assert_eq!(m, Some(Gesture::Pinch { scale_factor: 2.0 }));
        assert_eq!(g.touch_end(), None);
        assert!(g.session().is_none());
    }

    #[test]
    fn pinch_starts_even_when_not_zoomed() {
        let mut g = GestureNormalizer::default();
        assert!(g.touch_start(&[touch(1, 0.0, 0.0), touch(2, 0.0, 50.0)], &ZoomState::default()));
    }

    #[test]
    fn degenerate_pinch_emits_nothing() {
        let mut g = GestureNormalizer::default();
        g.touch_start(&[touch(1, 5.0, 5.0), touch(2, 5.0, 5.0)], &zoomed());
        assert_eq!(g.touch_move(&[touch(1, 0.0, 0.0), touch(2, 10.0, 0.0)]), None);
    }

    #[test]
    fn pinch_follows_touch_identifiers_not_list_order() {
        let mut g = GestureNormalizer::default();
        g.touch_start(&[touch(3, 0.0, 0.0), touch(9, 100.0, 0.0)], &zoomed());
        let m = g.touch_move(&[
            touch(4, 500.0, 500.0),
            touch(9, 150.0, 0.0),
            touch(3, 0.0, 0.0),
        ]);
        assert_eq!(m, Some(Gesture::Pinch { scale_factor: 1.5 }));
    }

    #[test]
    fn pinch_pauses_when_a_starting_finger_is_missing() {
        let mut g = GestureNormalizer::default();
        g.touch_start(&[touch(1, 0.0, 0.0), touch(2, 100.0, 0.0)], &zoomed());
        assert_eq!(g.touch_move(&[touch(1, 0.0, 0.0), touch(5, 300.0, 0.0)]), None);
        assert_eq!(g.touch_move(&[touch(2, 100.0, 0.0)]), None);
    }

    #[test]
    fn single_touch_drag_matches_mouse_drag() {
        let mut g = GestureNormalizer::default();
        assert!(g.touch_start(&[touch(7, 0.0, 0.0)], &zoomed()));
        assert_eq!(
            g.touch_move(&[touch(7, 30.0, -10.0)]),
            Some(Gesture::DragUpdate(Point::new(40.0, 10.0)))
        );
        assert_eq!(g.touch_end(), None);
    }

    #[test]
    fn cancel_ends_without_tap() {
        let mut g = GestureNormalizer::default();
        g.pointer_down(Point::ORIGIN, &zoomed());
        g.cancel();
        assert!(g.session().is_none());
        assert_eq!(g.click(), None);
    }

    #[test]
    fn wheel_maps_delta_to_direction() {
        let g = GestureNormalizer::default();
        assert_eq!(g.wheel(53.0), Gesture::Wheel(WheelDirection::Out));
        assert_eq!(g.wheel(-53.0), Gesture::Wheel(WheelDirection::In));
    }
}
