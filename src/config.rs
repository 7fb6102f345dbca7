//! Build-time configuration: asset locations, storage keys and the viewer's
//! numeric tuning.

/// Smallest scale the viewer allows.
pub const MIN_SCALE: f64 = 0.5;
/// Largest scale the viewer allows.
pub const MAX_SCALE: f64 = 5.0;
/// Scale shown when an image is first displayed or reset.
pub const DEFAULT_SCALE: f64 = 0.7;
/// Scale a tap zooms to.
pub const TAP_ZOOM_SCALE: f64 = 2.0;
/// Scale change per wheel notch.
pub const WHEEL_STEP: f64 = 0.1;
/// Pointer travel (px) beyond which a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 5.0;
/// Delay before the post-release click guard is lifted.
pub const CLICK_GUARD_MS: u32 = 10;

/// Viewport width at or below which the device is treated as touch-primary.
pub const TOUCH_BREAKPOINT_PX: f64 = 768.0;

pub const THEME_STORAGE_KEY: &str = "theme";

pub const LOGO_CLICK_WINDOW_MS: f64 = 2000.0;
pub const LOGO_CLICKS_TO_UNLOCK: u32 = 10;
pub const LOGO_HINT_FROM: u32 = 7;
/// How long the "taps away" hint stays up after the latest click.
pub const HINT_POPUP_MS: u32 = 2000;

pub const PLACEHOLDER_IMAGE: &str = "Health/David Brown.png";

#[cfg(debug_assertions)]
fn asset_base() -> &'static str {
    "/"
}

#[cfg(not(debug_assertions))]
fn asset_base() -> &'static str {
    "/healthinsurancedave/"
}

/// Resolve a catalog-relative asset path against the deployment base. Values
/// with a scheme (`https:`, `mailto:`, `tel:`) are returned unchanged.
pub fn asset_path(path: &str) -> String {
    if path.contains(':') {
        return path.to_string();
    }
    format!("{}{}", asset_base(), path.trim_start_matches('/'))
}
