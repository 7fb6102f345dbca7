use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::config::asset_path;
use crate::records::{Catalog, Category, DetailRecord, DisplayContract};

#[derive(Properties, PartialEq, Clone)]
pub struct DirectoryProps {
    pub catalog: Catalog,
    pub category: Category,
    pub query: AttrValue,
    pub on_category: Callback<Category>,
    pub on_query: Callback<String>,
    pub on_open: Callback<DetailRecord>,
}

#[function_component(Directory)]
pub fn directory(props: &DirectoryProps) -> Html {
    let oninput = {
        let on_query = props.on_query.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_query.emit(input.value());
        })
    };

    let matches = props.catalog.filter(props.category, props.query.as_str());

    html! {<div class="directory" style="display:flex; flex-direction:column; gap:14px;">
        <div style="display:flex; gap:8px; flex-wrap:wrap; align-items:center;">
            { for Category::TABS.iter().map(|tab| {
                let tab = *tab;
                let on_category = props.on_category.clone();
                let active = props.category == tab;
                let onclick = Callback::from(move |_| on_category.emit(tab));
                html! {<button {onclick} class={classes!("category-tab", active.then_some("active"))}>{ tab.label() }</button>}
            }) }
            <input type="search" placeholder="Search" value={props.query.clone()} {oninput}
                style="flex:1; min-width:160px; padding:6px 10px; border-radius:6px; border:1px solid #30363d; background:#0d1117; color:inherit;" />
        </div>
        if matches.is_empty() {
            <div style="opacity:0.7;">{"No matches"}</div>
        }
        <div style="display:grid; grid-template-columns:repeat(auto-fill, minmax(220px, 1fr)); gap:12px;">
            { for matches.into_iter().map(|record| {
                let open = props.on_open.clone();
                let owned = record.clone();
                let onclick = Callback::from(move |_| open.emit(owned.clone()));
                let thumb = record.primary_image().map(asset_path);
                html! {<div key={record.id().to_string()} {onclick}
                    style="cursor:pointer; background:#161b22; border:1px solid #30363d; border-radius:10px; padding:12px; display:flex; flex-direction:column; gap:6px;">
                    if let Some(src) = thumb {
                        <img src={src} alt={record.heading()} loading="lazy" style="width:100%; height:140px; object-fit:contain;" />
                    }
                    <div style="font-weight:600;">{ record.heading() }</div>
                    if record.is_featured() {
                        <span style="font-size:11px; color:#d29922;">{"Featured"}</span>
                    }
                    <div style="font-size:12px; opacity:0.75;">{ record.status() }</div>
                </div>}
            }) }
        </div>
    </div>}
}
