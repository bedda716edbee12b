use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ProgressPanelProps {
    pub purchased: usize,
    pub total: usize,
    pub singularity_ready: bool,
}

#[function_component]
pub fn ProgressPanel(props: &ProgressPanelProps) -> Html {
    let chip = "background:rgba(13,17,23,0.8); border-radius:6px; padding:4px 8px;";
    html! {<div style="position:absolute; bottom:12px; right:12px; display:flex; flex-direction:column; align-items:flex-end; gap:6px; z-index:20;">
        <div style={format!("{} font-size:12px; opacity:0.7;", chip)}>{ format!("Upgrades: {}/{}", props.purchased, props.total) }</div>
        {
            if props.singularity_ready {
                html! { <div style={format!("{} font-size:14px; font-weight:700; color:#ffa657;", chip)}>{"🔥 READY FOR SINGULARITY 🔥"}</div> }
            } else {
                html! {}
            }
        }
    </div>}
}
