pub mod controller;
pub mod gesture;
pub mod logo_clicks;

pub use controller::ViewerController;
pub use gesture::TouchPoint;
pub use logo_clicks::{LogoClickCounter, LogoClickOutcome};
