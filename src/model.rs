//! Core data model for the image viewer: the zoom/pan state and the actions
//! that move it.

use crate::config::{DEFAULT_SCALE, MAX_SCALE, MIN_SCALE, TAP_ZOOM_SCALE, WHEEL_STEP};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WheelDirection {
    /// Scroll up: zoom in.
    In,
    /// Scroll down: zoom out.
    Out,
}

impl WheelDirection {
    pub fn from_delta_y(delta_y: f64) -> Self {
        if delta_y > 0.0 { Self::Out } else { Self::In }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ZoomAction {
    /// Toggle between the default view and the tap zoom level.
    Tap,
    /// Return to the default view.
    Reset,
    /// Replace the pan offset. Ignored unless zoomed.
    Pan(Point),
    Wheel(WheelDirection),
    /// Pinch relative to the scale the gesture started from.
    Pinch { start_scale: f64, factor: f64 },
}

/// Scale and translation of one displayed image.
///
/// `scale` is private so every write goes through [`ZoomState::with_scale`],
/// which clamps it; `is_zoomed` is computed from it on read.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomState {
    scale: f64,
    pub offset: Point,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            offset: Point::ORIGIN,
        }
    }
}

impl ZoomState {
    pub fn with_scale(scale: f64, offset: Point) -> Self {
        Self {
            scale: clamp_scale(scale),
            offset,
        }
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn is_zoomed(&self) -> bool {
        self.scale > 1.0
    }

    pub fn apply(self, action: ZoomAction) -> ZoomState {
        use ZoomAction::*;
        match action {
            Tap => {
                if self.is_zoomed() {
                    ZoomState::default()
                } else {
                    ZoomState::with_scale(TAP_ZOOM_SCALE, self.offset)
                }
            }
            Reset => ZoomState::default(),
            Pan(offset) => {
                if !self.is_zoomed() {
                    return self;
                }
                ZoomState { offset, ..self }
            }
            Wheel(dir) => {
                let delta = match dir {
                    WheelDirection::In => WHEEL_STEP,
                    WheelDirection::Out => -WHEEL_STEP,
                };
                ZoomState::with_scale(self.scale + delta, self.offset)
            }
            Pinch {
                start_scale,
                factor,
            } => {
                if !factor.is_finite() {
                    return self;
                }
                ZoomState::with_scale(start_scale * factor, self.offset)
            }
        }
    }
}

fn clamp_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return DEFAULT_SCALE;
    }
    scale.clamp(MIN_SCALE, MAX_SCALE)
}
