use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub singularity_ready: bool,
    pub on_reset: Callback<()>,
    pub on_singularity: Callback<()>,
}

#[function_component]
pub fn ControlsPanel(props: &ControlsPanelProps) -> Html {
    let reset_cb = {
        let cb = props.on_reset.clone();
        Callback::from(move |_| {
            if let Some(win) = web_sys::window() {
                if win
                    .confirm_with_message(
                        "This will WIPE all progress (resources and upgrades) and start fresh. Are you sure?",
                    )
                    .unwrap_or(false)
                {
                    cb.emit(());
                }
            } else {
                cb.emit(());
            }
        })
    };
    let singularity_cb = {
        let cb = props.on_singularity.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {<div style="display:flex; align-items:center; gap:16px;">
        <button onclick={reset_cb} style="padding:4px 10px; font-size:12px; background:#1c2128; border:1px solid #30363d; color:#8b949e; border-radius:6px;">{"Reset Game"}</button>
        {
            if props.singularity_ready {
                html! { <button onclick={singularity_cb} style="padding:10px 18px; font-size:16px; font-weight:700; background:#a371f7; border:1px solid #d2a8ff; color:#fff; border-radius:8px; box-shadow:0 0 18px #a371f7;">{"🌟 ACHIEVE SINGULARITY 🌟"}</button> }
            } else {
                html! {}
            }
        }
    </div>}
}
