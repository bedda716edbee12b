use crate::model::Resource;
use crate::util::format_amount;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ResourceCounterProps {
    pub resource: Resource,
    pub amount: f64,
    pub per_second: f64,
}

pub fn resource_color(resource: Resource) -> &'static str {
    match resource {
        Resource::Knowledge => "#f85149",
        Resource::Mana => "#58a6ff",
    }
}

#[function_component]
pub fn ResourceCounter(props: &ResourceCounterProps) -> Html {
    let color = resource_color(props.resource);
    html! {
        <div style={format!("width:240px; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:10px 14px; text-align:center; box-shadow:0 0 12px {}33;", color)}>
            <div style={format!("font-size:14px; font-weight:500; color:{};", color)}>
                { format!("{} {}", props.resource.glyph(), props.resource.label()) }
            </div>
            <div style={format!("font-size:24px; font-weight:700; font-variant-numeric:tabular-nums; color:{};", color)}>
                { format_amount(props.amount) }
            </div>
            <div style="font-size:12px; opacity:0.7;">
                { format!("+{}/sec", format_amount(props.per_second)) }
            </div>
        </div>
    }
}
