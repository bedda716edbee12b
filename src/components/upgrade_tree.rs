use super::resource_counter::resource_color;
use crate::model::{GameState, Tree};
use crate::util::format_cost;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct UpgradeTreeProps {
    pub tree: Tree,
    pub game: UseReducerHandle<GameState>,
    pub on_purchase: Callback<String>,
}

#[function_component(UpgradeTree)]
pub fn upgrade_tree(props: &UpgradeTreeProps) -> Html {
    let tree = props.tree;
    let color = resource_color(tree.boosts());
    let currency = tree.currency();
    let game: &GameState = &props.game;

    let cards: Vec<Html> = game
        .upgrades_for_tree(tree)
        .map(|up| {
            let purchased = up.purchased;
            let affordable = game.can_afford(&up.id);
            let (border, title) = if purchased {
                ("rgba(63,185,80,0.5)", "#3fb950")
            } else if affordable {
                (color, color)
            } else {
                ("#30363d", "#8b949e")
            };
            let label = if purchased {
                "✓ Owned"
            } else if affordable {
                "Buy"
            } else {
                "Locked"
            };
            let onclick = {
                let cb = props.on_purchase.clone();
                let id = up.id.clone();
                Callback::from(move |_| cb.emit(id.clone()))
            };
            html! {
                <div key={up.id.clone()} style={format!("border:1px solid {}; border-radius:10px; padding:8px 10px; background:{}; display:flex; flex-direction:column; gap:4px;", border, if purchased { "rgba(63,185,80,0.12)" } else { "#111821" })}>
                    <div style={format!("font-weight:600; font-size:14px; color:{};", title)}>{ up.name.clone() }</div>
                    <div style="font-size:12px; opacity:0.7;">{ up.description.clone() }</div>
                    <div style="font-size:12px; font-weight:500;">{ up.effect.clone() }</div>
                    <div style="display:flex; justify-content:space-between; align-items:center;">
                        <span style="font-size:12px;">{ format!("Cost: {} {}", format_cost(up.cost), currency.glyph()) }</span>
                        <button
                            disabled={purchased || !affordable}
                            onclick={onclick}
                            style={format!("font-size:12px; padding:2px 10px; border-radius:6px; border:1px solid #30363d; color:#fff; background:{};", if !purchased && affordable { color } else { "#1c2128" })}
                        >
                            { label }
                        </button>
                    </div>
                </div>
            }
        })
        .collect();

    html! {
        <div style={format!("width:320px; height:100%; padding:12px; box-sizing:border-box; border-left:1px solid {c}44; border-right:1px solid {c}44;", c = color)}>
            <div style="text-align:center; margin-bottom:16px;">
                <h2 style={format!("margin:0 0 4px 0; font-size:20px; color:{};", color)}>
                    { format!("{} {} Tree", tree.boosts().glyph(), tree.boosts().label()) }
                </h2>
                <div style="font-size:12px; opacity:0.7;">{ format!("Costs {}", currency.label()) }</div>
            </div>
            <div style="display:flex; flex-direction:column; gap:10px; max-height:calc(100vh - 220px); overflow-y:auto;">
                { for cards }
            </div>
        </div>
    }
}
