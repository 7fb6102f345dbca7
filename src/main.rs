mod components;
mod config;
mod device;
mod error;
mod listeners;
mod model;
mod records;
mod state;
mod storage;
mod util;

fn main() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    yew::Renderer::<components::app::App>::new().render();
}
