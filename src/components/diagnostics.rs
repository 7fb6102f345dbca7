use yew::prelude::*;

use super::app::SiteContext;

#[derive(Properties, PartialEq, Clone)]
pub struct DiagnosticsProps {
    pub show: bool,
    pub on_close: Callback<()>,
    pub records: usize,
}

#[function_component]
pub fn Diagnostics(props: &DiagnosticsProps) -> Html {
    let ctx = use_context::<SiteContext>();
    if !props.show {
        return html! {};
    }

    let close_cb = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let (theme, touch) = ctx
        .map(|c| (c.theme.as_str(), c.touch_primary))
        .unwrap_or(("unknown", false));
    let build = if cfg!(debug_assertions) { "debug" } else { "release" };

    html! {<div style="position:fixed; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.55); z-index:50;">
        <div style="background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px 20px; min-width:300px; display:flex; flex-direction:column; gap:10px;">
            <div style="display:flex; justify-content:space-between; align-items:center;">
                <h3 style="margin:0; font-size:18px;">{"Diagnostics"}</h3>
                <button onclick={close_cb}>{"Close"}</button>
            </div>
            <div style="font-size:13px; display:flex; flex-direction:column; gap:4px;">
                <div>{ format!("Theme: {}", theme) }</div>
                <div>{ format!("Touch-primary: {}", touch) }</div>
                <div>{ format!("Catalog records: {}", props.records) }</div>
                <div>{ format!("Build: {}", build) }</div>
            </div>
        </div>
    </div>}
}
