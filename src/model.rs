//! Core data models for Infinite Mage.
//! Resources, the two upgrade trees, and the progression engine that mutates
//! `GameState` in response to clicks, purchases and elapsed time.

use crate::catalog::{self, UPGRADE_DEFS, UpgradeDef};
use crate::config::{
    BASE_RATE, CLICK_RATE_FACTOR, FINAL_KNOWLEDGE_ID, FINAL_MANA_ID, MAX_EVOLUTION_STAGE,
    UPGRADES_PER_STAGE,
};
use crate::util::{clog, cwarn};
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use thiserror::Error;
use yew::Reducible;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Knowledge,
    Mana,
}

impl Resource {
    pub fn label(self) -> &'static str {
        match self {
            Resource::Knowledge => "Knowledge",
            Resource::Mana => "Mana",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Resource::Knowledge => "🔴",
            Resource::Mana => "🔵",
        }
    }
}

/// One of the two parallel upgrade tracks. A tree boosts its own resource
/// and is paid for in the other one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tree {
    Knowledge,
    Mana,
}

impl Tree {
    pub const ALL: [Tree; 2] = [Tree::Knowledge, Tree::Mana];

    /// Tree owning an upgrade id, by its one-character prefix.
    pub fn from_id(id: &str) -> Option<Tree> {
        match id.as_bytes().first() {
            Some(b'k') => Some(Tree::Knowledge),
            Some(b'm') => Some(Tree::Mana),
            _ => None,
        }
    }

    pub fn boosts(self) -> Resource {
        match self {
            Tree::Knowledge => Resource::Knowledge,
            Tree::Mana => Resource::Mana,
        }
    }

    pub fn currency(self) -> Resource {
        match self {
            Tree::Knowledge => Resource::Mana,
            Tree::Mana => Resource::Knowledge,
        }
    }
}

/// Runtime copy of a catalog entry carrying the per-session flags.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Upgrade {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: f64,
    pub cost_type: Resource,
    pub effect: String,
    pub purchased: bool,
    /// Always true; nothing gates an upgrade behind another one.
    pub unlocked: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flat_bonus: Option<f64>,
}

impl From<&UpgradeDef> for Upgrade {
    fn from(def: &UpgradeDef) -> Self {
        Self {
            id: def.id.to_string(),
            name: def.name.to_string(),
            description: def.description.to_string(),
            cost: def.cost,
            cost_type: def.cost_type,
            effect: def.effect.to_string(),
            purchased: false,
            unlocked: true,
            multiplier: def.multiplier,
            flat_bonus: def.flat_bonus,
        }
    }
}

impl Upgrade {
    pub fn tree(&self) -> Option<Tree> {
        Tree::from_id(&self.id)
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PurchaseError {
    #[error("unknown upgrade {0}")]
    UnknownUpgrade(String),
    #[error("upgrade {0} is already owned")]
    AlreadyPurchased(String),
    #[error("need {cost} {currency:?}, have {balance}")]
    InsufficientFunds { cost: f64, balance: f64, currency: Resource },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    pub knowledge: f64,
    pub mana: f64,
    pub knowledge_per_second: f64,
    pub mana_per_second: f64,
    pub upgrades: Vec<Upgrade>,
    /// floor(purchased / 5); recomputed after each purchase.
    pub evolution_stage: u32,
    /// Wall clock (ms since epoch) of the last passive accrual.
    pub last_tick: f64,
}

impl GameState {
    pub fn new(now_ms: f64) -> Self {
        if let Err(e) = catalog::validate(&UPGRADE_DEFS) {
            cwarn(&format!("upgrade catalog failed validation: {e}"));
        }
        Self {
            knowledge: 0.0,
            mana: 0.0,
            knowledge_per_second: BASE_RATE,
            mana_per_second: BASE_RATE,
            upgrades: UPGRADE_DEFS.iter().map(Upgrade::from).collect(),
            evolution_stage: 0,
            last_tick: now_ms,
        }
    }

    pub fn balance(&self, resource: Resource) -> f64 {
        match resource {
            Resource::Knowledge => self.knowledge,
            Resource::Mana => self.mana,
        }
    }

    fn balance_mut(&mut self, resource: Resource) -> &mut f64 {
        match resource {
            Resource::Knowledge => &mut self.knowledge,
            Resource::Mana => &mut self.mana,
        }
    }

    pub fn rate(&self, tree: Tree) -> f64 {
        match tree {
            Tree::Knowledge => self.knowledge_per_second,
            Tree::Mana => self.mana_per_second,
        }
    }

    fn rate_mut(&mut self, tree: Tree) -> &mut f64 {
        match tree {
            Tree::Knowledge => &mut self.knowledge_per_second,
            Tree::Mana => &mut self.mana_per_second,
        }
    }

    pub fn upgrade(&self, id: &str) -> Option<&Upgrade> {
        self.upgrades.iter().find(|u| u.id == id)
    }

    pub fn upgrades_for_tree(&self, tree: Tree) -> impl Iterator<Item = &Upgrade> {
        self.upgrades.iter().filter(move |u| u.tree() == Some(tree))
    }

    pub fn is_purchased(&self, id: &str) -> bool {
        self.upgrade(id).is_some_and(|u| u.purchased)
    }

    pub fn purchased_count(&self) -> usize {
        self.upgrades.iter().filter(|u| u.purchased).count()
    }

    pub fn total_upgrades(&self) -> usize {
        self.upgrades.len()
    }

    /// Both terminal upgrades owned; independent of `evolution_stage`.
    pub fn singularity_ready(&self) -> bool {
        self.is_purchased(FINAL_KNOWLEDGE_ID) && self.is_purchased(FINAL_MANA_ID)
    }

    /// Amount a single manual click on `tree` yields.
    pub fn click_gain(&self, tree: Tree) -> f64 {
        1.0 + (self.rate(tree) * CLICK_RATE_FACTOR).floor()
    }

    pub fn apply_click(&mut self, tree: Tree) {
        let gain = self.click_gain(tree);
        *self.balance_mut(tree.boosts()) += gain;
    }

    /// Credits passive income for `delta_secs` of real elapsed time.
    pub fn apply_elapsed(&mut self, delta_secs: f64) {
        if !(delta_secs.is_finite() && delta_secs > 0.0) {
            return;
        }
        self.knowledge += self.knowledge_per_second * delta_secs;
        self.mana += self.mana_per_second * delta_secs;
    }

    /// Advances the clock to `now_ms`, crediting the time since `last_tick`.
    /// A clock that moved backwards credits nothing.
    pub fn tick(&mut self, now_ms: f64) {
        let delta = ((now_ms - self.last_tick) / 1000.0).max(0.0);
        self.apply_elapsed(delta);
        self.last_tick = now_ms;
    }

    pub fn can_afford(&self, id: &str) -> bool {
        match self.upgrade(id) {
            Some(u) if !u.purchased => self.balance(u.cost_type) >= u.cost,
            _ => false,
        }
    }

    /// Buys `id`. On any error the state is left untouched.
    pub fn purchase(&mut self, id: &str) -> Result<(), PurchaseError> {
        let idx = self
            .upgrades
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| PurchaseError::UnknownUpgrade(id.to_string()))?;
        let up = &self.upgrades[idx];
        if up.purchased {
            return Err(PurchaseError::AlreadyPurchased(id.to_string()));
        }
        let tree = up
            .tree()
            .ok_or_else(|| PurchaseError::UnknownUpgrade(id.to_string()))?;
        let balance = self.balance(up.cost_type);
        if balance < up.cost {
            return Err(PurchaseError::InsufficientFunds {
                cost: up.cost,
                balance,
                currency: up.cost_type,
            });
        }
        let (cost, currency, flat_bonus, multiplier) =
            (up.cost, up.cost_type, up.flat_bonus, up.multiplier);

        *self.balance_mut(currency) -= cost;
        self.upgrades[idx].purchased = true;
        let rate = self.rate_mut(tree);
        if let Some(bonus) = flat_bonus {
            *rate += bonus;
        }
        if let Some(factor) = multiplier {
            *rate *= factor;
        }
        self.evolution_stage = self.stage_from_count();
        Ok(())
    }

    pub(crate) fn stage_from_count(&self) -> u32 {
        ((self.purchased_count() / UPGRADES_PER_STAGE) as u32).min(MAX_EVOLUTION_STAGE)
    }
}

// ---------------- Reducer & Actions -----------------
#[derive(Clone, Debug)]
pub enum GameAction {
    Click(Tree),
    Tick { now_ms: f64 },
    Purchase(String),
    /// Fresh game; the caller clears storage first.
    Reset { now_ms: f64 },
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use GameAction::*;
        let mut new = (*self).clone();
        match action {
            Click(tree) => new.apply_click(tree),
            Tick { now_ms } => new.tick(now_ms),
            Purchase(id) => {
                if let Err(e) = new.purchase(&id) {
                    clog(&format!("purchase rejected: {e}"));
                    return self;
                }
                clog(&format!(
                    "purchased {id}; {}/{} owned, stage {}",
                    new.purchased_count(),
                    new.total_upgrades(),
                    new.evolution_stage
                ));
            }
            Reset { now_ms } => {
                clog("game reset");
                new = GameState::new(now_ms);
            }
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> GameState {
        GameState::new(0.0)
    }

    #[test]
    fn new_game_starts_at_base_rates() {
        let gs = fresh();
        assert_eq!(gs.knowledge, 0.0);
        assert_eq!(gs.mana, 0.0);
        assert_eq!(gs.knowledge_per_second, 1.0);
        assert_eq!(gs.mana_per_second, 1.0);
        assert_eq!(gs.total_upgrades(), 30);
        assert_eq!(gs.purchased_count(), 0);
        assert_eq!(gs.evolution_stage, 0);
        assert!(gs.upgrades.iter().all(|u| u.unlocked && !u.purchased));
    }

    #[test]
    fn click_gain_uses_floored_tenth_of_rate() {
        let mut gs = fresh();
        gs.apply_click(Tree::Knowledge);
        assert_eq!(gs.knowledge, 1.0);
        gs.mana_per_second = 25.0;
        gs.apply_click(Tree::Mana);
        assert_eq!(gs.mana, 3.0);
        assert_eq!(gs.mana_per_second, 25.0);
    }

    #[test]
    fn tick_credits_measured_time_and_ignores_backwards_clock() {
        let mut gs = GameState::new(1_000.0);
        gs.tick(3_500.0);
        assert!((gs.knowledge - 2.5).abs() < 1e-9);
        assert!((gs.mana - 2.5).abs() < 1e-9);
        assert_eq!(gs.last_tick, 3_500.0);
        gs.tick(2_000.0);
        assert!((gs.knowledge - 2.5).abs() < 1e-9);
        assert_eq!(gs.last_tick, 2_000.0);
    }

    #[test]
    fn purchase_modifies_owning_tree_not_paying_tree() {
        let mut gs = fresh();
        gs.knowledge = 50.0;
        assert_eq!(gs.purchase("m2"), Ok(()));
        assert_eq!(gs.knowledge, 0.0);
        assert_eq!(gs.mana_per_second, 2.0);
        assert_eq!(gs.knowledge_per_second, 1.0);
    }

    #[test]
    fn flat_bonus_applies_before_multiplier_in_purchase_order() {
        let mut gs = fresh();
        gs.mana = 10.0 + 50.0 + 100.0;
        gs.purchase("k1").unwrap(); // 1 + 1 = 2
        gs.purchase("k2").unwrap(); // 2 + 2 = 4
        gs.purchase("k3").unwrap(); // 4 * 2 = 8
        assert_eq!(gs.knowledge_per_second, 8.0);
        assert_eq!(gs.mana, 0.0);
    }

    #[test]
    fn purchase_errors_leave_state_untouched() {
        let mut gs = fresh();
        let before = gs.clone();
        assert_eq!(
            gs.purchase("k1"),
            Err(PurchaseError::InsufficientFunds { cost: 10.0, balance: 0.0, currency: Resource::Mana })
        );
        assert_eq!(gs.purchase("zz"), Err(PurchaseError::UnknownUpgrade("zz".into())));
        assert_eq!(gs, before);

        gs.mana = 20.0;
        gs.purchase("k1").unwrap();
        let after_first = gs.clone();
        assert_eq!(gs.purchase("k1"), Err(PurchaseError::AlreadyPurchased("k1".into())));
        assert_eq!(gs, after_first);
    }

    #[test]
    fn can_afford_checks_opposite_currency() {
        let mut gs = fresh();
        gs.knowledge = 1_000.0;
        assert!(!gs.can_afford("k1"));
        assert!(gs.can_afford("m1"));
        gs.mana = 10.0;
        assert!(gs.can_afford("k1"));
        gs.purchase("k1").unwrap();
        assert!(!gs.can_afford("k1"));
        assert!(!gs.can_afford("nope"));
    }

    #[test]
    fn singularity_needs_both_terminal_upgrades() {
        let mut gs = fresh();
        gs.knowledge = 1_000_000.0;
        gs.mana = 1_000_000.0;
        gs.purchase("k15").unwrap();
        assert!(!gs.singularity_ready());
        gs.purchase("m15").unwrap();
        assert!(gs.singularity_ready());
        assert_eq!(gs.evolution_stage, 0);
    }

    #[test]
    fn stage_caps_at_six_with_all_upgrades() {
        let mut gs = fresh();
        gs.knowledge = 1e9;
        gs.mana = 1e9;
        let ids: Vec<String> = gs.upgrades.iter().map(|u| u.id.clone()).collect();
        for id in &ids {
            gs.purchase(id).unwrap();
        }
        assert_eq!(gs.purchased_count(), 30);
        assert_eq!(gs.evolution_stage, 6);
    }

    #[test]
    fn reducer_rejected_purchase_returns_same_rc() {
        let gs = Rc::new(fresh());
        let next = gs.clone().reduce(GameAction::Purchase("k1".into()));
        assert!(Rc::ptr_eq(&gs, &next));
    }

    #[test]
    fn reducer_reset_restores_defaults() {
        let mut gs = fresh();
        gs.knowledge = 42.0;
        let next = Rc::new(gs).reduce(GameAction::Reset { now_ms: 7.0 });
        assert_eq!(*next, GameState::new(7.0));
    }
}
