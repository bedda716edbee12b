use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct SingularityOverlayProps {
    pub show: bool,
    pub on_close: Callback<()>,
}

/// Acknowledgment only; reaching the singularity does not change game state.
#[function_component]
pub fn SingularityOverlay(props: &SingularityOverlayProps) -> Html {
    if !props.show {
        return html! {};
    }
    let close_btn = {
        let cb = props.on_close.clone();
        Callback::from(move |_| cb.emit(()))
    };
    html! {
        <div style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:rgba(0,0,0,0.6); z-index:50;">
            <div style="background:rgba(0,0,0,0.87); border:2px solid #a371f7; padding:28px 36px; border-radius:14px; max-width:460px; width:90%; text-align:center; box-shadow:0 0 24px #a371f7;">
                <h2 style="margin:0 0 12px 0; font-size:22px; color:#d2a8ff;">{"🌟 SINGULARITY ACHIEVED! 🌟"}</h2>
                <p style="margin:4px 0;">{"You are Knowledge. You are Mana. You are Infinite."}</p>
                <p style="margin:4px 0 16px 0; opacity:0.85;">{"Congratulations on transcending humanity!"}</p>
                <button onclick={close_btn}>{"Close"}</button>
            </div>
        </div>
    }
}
