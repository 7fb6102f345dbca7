use gloo_timers::callback::Timeout;
use yew::prelude::*;

use super::app::SiteContext;
use crate::config::{HINT_POPUP_MS, asset_path};
use crate::state::{LogoClickCounter, LogoClickOutcome};
use crate::storage::Theme;
use crate::util::plural;

/// At most one pending hide. Restarting drops, and so cancels, the previous timer.
#[derive(Default)]
struct HintTimer(Option<Timeout>);

impl HintTimer {
    fn restart(&mut self, ms: u32, f: impl FnOnce() + 'static) {
        self.0 = Some(Timeout::new(ms, f));
    }

    fn cancel(&mut self) {
        self.0 = None;
    }
}

#[derive(Properties, PartialEq, Clone)]
pub struct HeaderProps {
    pub on_home: Callback<()>,
    pub on_unlock: Callback<()>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    let ctx = use_context::<SiteContext>();
    let counter = use_mut_ref(LogoClickCounter::default);
    let popup = use_state(|| None::<String>);
    let popup_timer = use_mut_ref(HintTimer::default);

    let on_logo = {
        let counter = counter.clone();
        let popup = popup.clone();
        let popup_timer = popup_timer.clone();
        let on_home = props.on_home.clone();
        let on_unlock = props.on_unlock.clone();
        Callback::from(move |_: MouseEvent| {
            let outcome = counter.borrow_mut().register(js_sys::Date::now());
            match outcome {
                LogoClickOutcome::Unlocked => {
                    log::info!("diagnostics unlocked");
                    popup_timer.borrow_mut().cancel();
                    popup.set(None);
                    on_unlock.emit(());
                }
                LogoClickOutcome::Hint(remaining) => {
                    popup.set(Some(format!(
                        "{} away from debug mode",
                        plural(remaining, "tap", "taps")
                    )));
                    let popup = popup.clone();
                    popup_timer
                        .borrow_mut()
                        .restart(HINT_POPUP_MS, move || popup.set(None));
                }
                LogoClickOutcome::Counted(_) => on_home.emit(()),
            }
        })
    };

    let (theme_label, on_theme) = match &ctx {
        Some(c) => {
            let toggle = c.toggle_theme.clone();
            let label = match c.theme {
                Theme::Dark => "Light mode",
                Theme::Light => "Dark mode",
            };
            (label, Callback::from(move |_| toggle.emit(())))
        }
        None => ("Dark mode", Callback::noop()),
    };

    html! {<header style="display:flex; justify-content:space-between; align-items:center; padding:10px 16px; border-bottom:1px solid #30363d;">
        <button onclick={on_logo} aria-label="Home" style="background:none; border:none; cursor:pointer; display:flex; align-items:center; gap:8px; color:inherit;">
            <img src={asset_path("logo.png")} alt="Living Victorious Always" style="height:36px;" />
            <span style="font-weight:600;">{"Living Victorious Always"}</span>
        </button>
        <button onclick={on_theme} aria-label="Toggle theme">{ theme_label }</button>
        if let Some(msg) = (*popup).clone() {
            <div style="position:fixed; top:72px; left:50%; transform:translateX(-50%); background:#1f6feb; color:#fff; padding:6px 14px; border-radius:8px; z-index:100;">
                { msg }
            </div>
        }
    </header>}
}
