use super::{
    controls_panel::ControlsPanel, evolution_display::EvolutionDisplay,
    progress_panel::ProgressPanel, resource_counter::ResourceCounter,
    singularity_overlay::SingularityOverlay, upgrade_tree::UpgradeTree,
};
use crate::config::TICK_INTERVAL_MS;
use crate::model::{GameAction, GameState, Resource, Tree};
use crate::persistence::{self, Autosave, LocalStore};
use crate::util::{clog, cwarn, now_ms};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

#[function_component(App)]
pub fn app() -> Html {
    let game = use_reducer(|| persistence::load_or_default(&LocalStore, now_ms()));
    let show_singularity = use_state(|| false);

    // Mirror every state change to storage
    {
        let autosave = use_mut_ref(Autosave::default);
        use_effect_with((*game).clone(), move |state| {
            autosave.borrow_mut().write(&LocalStore, state);
            || ()
        });
    }

    // Passive accrual tick; the reducer measures real elapsed time itself
    {
        let game = game.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let tick = Closure::wrap(Box::new(move || {
                game.dispatch(GameAction::Tick { now_ms: now_ms() });
            }) as Box<dyn FnMut()>);
            let tick_id = window.as_ref().and_then(|w| {
                w.set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    TICK_INTERVAL_MS as i32,
                )
                .ok()
            });
            if tick_id.is_none() {
                cwarn("could not start the accrual timer");
            }
            move || {
                if let (Some(win), Some(id)) = (window, tick_id) {
                    win.clear_interval_with_handle(id);
                }
                drop(tick);
            }
        });
    }

    let on_click = {
        let game = game.clone();
        Callback::from(move |tree: Tree| game.dispatch(GameAction::Click(tree)))
    };
    let on_purchase = {
        let game = game.clone();
        Callback::from(move |id: String| game.dispatch(GameAction::Purchase(id)))
    };
    let on_reset = {
        let game = game.clone();
        Callback::from(move |_| {
            if let Err(e) = persistence::clear(&LocalStore) {
                cwarn(&format!("could not clear save: {e}"));
            }
            game.dispatch(GameAction::Reset { now_ms: now_ms() });
        })
    };
    let on_singularity = {
        let show_singularity = show_singularity.clone();
        Callback::from(move |_| {
            clog("singularity achieved");
            show_singularity.set(true);
        })
    };
    let close_singularity = {
        let show_singularity = show_singularity.clone();
        Callback::from(move |_| show_singularity.set(false))
    };

    let state: &GameState = &game;
    let ready = state.singularity_ready();

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0d1117; color:#e6edf3;">
            <div id="top-bar" style="position:absolute; top:12px; left:12px; right:12px; display:flex; justify-content:space-between; align-items:flex-start; z-index:30;">
                <ResourceCounter resource={Resource::Knowledge} amount={state.knowledge} per_second={state.knowledge_per_second} />
                <ControlsPanel singularity_ready={ready} on_reset={on_reset} on_singularity={on_singularity} />
                <ResourceCounter resource={Resource::Mana} amount={state.mana} per_second={state.mana_per_second} />
            </div>
            <div style="display:flex; height:100vh; padding-top:128px; box-sizing:border-box;">
                <UpgradeTree tree={Tree::Knowledge} game={game.clone()} on_purchase={on_purchase.clone()} />
                <EvolutionDisplay evolution_stage={state.evolution_stage} on_click={on_click} />
                <UpgradeTree tree={Tree::Mana} game={game.clone()} on_purchase={on_purchase} />
            </div>
            <ProgressPanel purchased={state.purchased_count()} total={state.total_upgrades()} singularity_ready={ready} />
            <SingularityOverlay show={*show_singularity} on_close={close_singularity} />
        </div>
    }
}
