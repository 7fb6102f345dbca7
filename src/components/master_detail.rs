use yew::prelude::*;

use super::app::SiteContext;
use super::zoom_viewer::ZoomViewer;
use crate::config::asset_path;
use crate::records::{DetailRecord, DisplayContract};

#[derive(Properties, PartialEq, Clone)]
pub struct MasterDetailProps {
    pub record: DetailRecord,
    pub on_return: Callback<()>,
}

#[function_component(MasterDetail)]
pub fn master_detail(props: &MasterDetailProps) -> Html {
    let ctx = use_context::<SiteContext>();
    let touch_primary = ctx.map(|c| c.touch_primary).unwrap_or(false);
    let record = &props.record;

    let return_cb = {
        let cb = props.on_return.clone();
        Callback::from(move |_| cb.emit(()))
    };

    let flag = match record {
        DetailRecord::Certification(c) => c.flag_image.clone(),
        _ => None,
    };

    let rows = record.detail_rows();
    let links = record.links();
    let gallery = record.gallery();

    let viewer = match record.primary_image().filter(|s| !s.is_empty()) {
        Some(src) => html! { <ZoomViewer
            src={AttrValue::from(src.to_string())}
            alt={AttrValue::from(record.heading())}
            gallery={gallery}
            touch_primary={touch_primary}
        /> },
        None => html! {<div style="display:flex; align-items:center; justify-content:center; height:100%; opacity:0.7; font-size:1.1rem;">
            {"No image available"}
        </div>},
    };

    html! {<div class="master-detail" style="display:flex; flex-wrap:wrap; gap:16px; min-height:80vh;">
        <aside style="flex:0 0 320px; background:#161b22; border:1px solid #30363d; border-radius:12px; padding:16px; display:flex; flex-direction:column; gap:12px;">
            <div style="display:flex; justify-content:space-between; align-items:center; gap:8px;">
                <h3 style="margin:0;">{ record.heading() }</h3>
                <span style="font-size:12px; padding:2px 8px; border-radius:10px; background:#238636;">{ record.status() }</span>
            </div>
            if let Some(desc) = record.description() {
                <p style="margin:0; font-size:13px; opacity:0.85;">{ desc.to_string() }</p>
            }
            <div style="display:flex; flex-direction:column; gap:6px;">
                { for rows.iter().map(|r| html! {
                    <div style="display:flex; justify-content:space-between; gap:8px; font-size:13px;">
                        <span style="opacity:0.7;">{ format!("{}:", r.label) }</span>
                        <span>{ r.value.clone() }</span>
                    </div>
                }) }
            </div>
            if let Some(flag_src) = flag {
                <img src={asset_path(&flag_src)} alt="state flag" style="width:64px; border:1px solid #30363d;" />
            }
            <div style="display:flex; gap:8px; flex-wrap:wrap;">
                { for links.iter().map(|l| html! {
                    <a href={asset_path(&l.href)} target="_blank" rel="noopener noreferrer" class="action-btn">{ l.label }</a>
                }) }
                <button onclick={return_cb} class="action-btn return-btn">{"Return"}</button>
            </div>
        </aside>
        <main style="flex:1 1 480px; min-height:60vh; background:#0d1117; border:1px solid #30363d; border-radius:12px; overflow:hidden;">
            { viewer }
        </main>
    </div>}
}
