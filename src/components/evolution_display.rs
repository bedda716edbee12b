use crate::config::{CLICK_FLASH_MS, MAX_EVOLUTION_STAGE};
use crate::model::Tree;
use crate::state::ClickFlash;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct EvolutionDisplayProps {
    pub evolution_stage: u32,
    pub on_click: Callback<Tree>,
}

/// Glow around the figure; grows with the stage and saturates at stage 5.
pub fn glow_style(stage: u32) -> String {
    if stage < 1 {
        return String::new();
    }
    let intensity = (stage as f64 * 0.2).min(1.0);
    format!(
        "filter:drop-shadow(0 0 {}px rgba(163,113,247,{:.1}));",
        20 + stage * 10,
        intensity
    )
}

#[function_component(EvolutionDisplay)]
pub fn evolution_display(props: &EvolutionDisplayProps) -> Html {
    let flash = use_state(ClickFlash::default);

    // Drop the highlight after a short delay
    {
        let flash = flash.clone();
        use_effect_with(*flash, move |current| {
            let seq = current.seq;
            let window = web_sys::window().filter(|_| current.side.is_some());
            let expire = Closure::wrap(Box::new(move || {
                flash.set((*flash).expire(seq));
            }) as Box<dyn FnMut()>);
            let timeout_id = window.as_ref().and_then(|w| {
                w.set_timeout_with_callback_and_timeout_and_arguments_0(
                    expire.as_ref().unchecked_ref(),
                    CLICK_FLASH_MS as i32,
                )
                .ok()
            });
            move || {
                if let (Some(win), Some(id)) = (window, timeout_id) {
                    win.clear_timeout_with_handle(id);
                }
                drop(expire);
            }
        });
    }

    let half = |tree: Tree, tint: &str, glyph: &str, label: &str| {
        let onclick = {
            let cb = props.on_click.clone();
            let flash = flash.clone();
            Callback::from(move |_| {
                cb.emit(tree);
                flash.set((*flash).trigger(tree));
            })
        };
        let bg = if flash.is_active(tree) {
            format!("background:{}33;", tint)
        } else {
            String::new()
        };
        html! {
            <div onclick={onclick} style={format!("flex:1; cursor:pointer; display:flex; flex-direction:column; align-items:center; justify-content:center; transition:background 0.2s; {}", bg)}>
                <div style="font-size:48px; opacity:0.5;">{ glyph.to_string() }</div>
                <div style={format!("font-size:13px; color:{}; opacity:0.7;", tint)}>{ label.to_string() }</div>
            </div>
        }
    };

    let stage = props.evolution_stage;
    let overlay = |min: u32, style: &str| {
        if stage >= min {
            html! { <div style={format!("position:absolute; {}", style)}></div> }
        } else {
            html! {}
        }
    };

    html! {
        <div style="flex:1; height:100%; display:flex; flex-direction:column; align-items:center;">
            <div style="text-align:center; margin-bottom:24px;">
                <h1 style="margin:0 0 8px 0; font-size:44px; font-weight:700; color:#d2a8ff;">{"Infinite Mage"}</h1>
                <div style="font-size:17px; color:#a371f7;">{"Path to Singularity"}</div>
            </div>
            <div style="position:relative; flex:1; width:100%; display:flex; align-items:center; justify-content:center;">
                <div style="position:absolute; inset:0; display:flex;">
                    { half(Tree::Knowledge, "#f85149", "🔴", "Click for Knowledge") }
                    { half(Tree::Mana, "#58a6ff", "🔵", "Click for Mana") }
                </div>
                <div style={format!("position:relative; width:160px; height:320px; pointer-events:none; z-index:2; {}", glow_style(stage))}>
                    <div style="position:absolute; left:50%; top:0; width:64px; height:64px; transform:translateX(-50%); border-radius:50%; background:#30363d;"></div>
                    <div style="position:absolute; left:50%; top:70px; width:110px; height:240px; transform:translateX(-50%); border-radius:48px 48px 12px 12px; background:#30363d;"></div>
                    { overlay(1, "top:20px; left:50%; width:24px; height:24px; transform:translateX(-50%); border-radius:50%; background:#a371f7; box-shadow:0 0 20px #a371f7;") }
                    { overlay(2, "top:48px; left:50%; width:4px; height:96px; transform:translateX(-50%); background:linear-gradient(#a371f7, transparent);") }
                    { overlay(3, "top:96px; left:50%; width:40px; height:40px; transform:translateX(-50%); border-radius:50%; background:rgba(163,113,247,0.5); box-shadow:0 0 30px #a371f7;") }
                    { overlay(4, "top:64px; left:16px; width:8px; height:80px; transform:rotate(12deg); background:rgba(163,113,247,0.7);") }
                    { overlay(4, "top:64px; right:16px; width:8px; height:80px; transform:rotate(-12deg); background:rgba(163,113,247,0.7);") }
                    { overlay(5, "inset:0; background:radial-gradient(rgba(163,113,247,0.3), transparent);") }
                    { overlay(6, "inset:-24px; background:radial-gradient(rgba(255,166,87,0.2), rgba(163,113,247,0.1), transparent);") }
                </div>
            </div>
            <div style="margin:24px 0; text-align:center;">
                <div style="font-size:15px; color:#a371f7;">{ format!("Evolution Stage: {}/{}", stage, MAX_EVOLUTION_STAGE) }</div>
                {
                    if stage >= MAX_EVOLUTION_STAGE {
                        html! { <div style="font-size:13px; margin-top:4px; color:#ffa657;">{"Ready for Singularity"}</div> }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}
