//! Static upgrade catalog: 15 knowledge-tree upgrades paid in mana and
//! 15 mana-tree upgrades paid in knowledge.
//!
//! The table is read-only. Runtime `purchased` flags live on the
//! [`crate::model::Upgrade`] copies held by `GameState`.

use crate::model::Resource::{Knowledge as K, Mana as M};
use crate::model::{Resource, Tree};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpgradeDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub effect: &'static str,
    pub cost: f64,
    pub cost_type: Resource,
    /// Applied to the owning tree's rate after `flat_bonus`.
    pub multiplier: Option<f64>,
    pub flat_bonus: Option<f64>,
}

impl UpgradeDef {
    /// Tree whose per-second rate this upgrade modifies (from the id prefix).
    pub fn tree(&self) -> Option<Tree> {
        Tree::from_id(self.id)
    }
}

const fn flat(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    effect: &'static str,
    cost: f64,
    cost_type: Resource,
    bonus: f64,
) -> UpgradeDef {
    UpgradeDef { id, name, description, effect, cost, cost_type, multiplier: None, flat_bonus: Some(bonus) }
}

const fn mult(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    effect: &'static str,
    cost: f64,
    cost_type: Resource,
    factor: f64,
) -> UpgradeDef {
    UpgradeDef { id, name, description, effect, cost, cost_type, multiplier: Some(factor), flat_bonus: None }
}

pub static UPGRADE_DEFS: [UpgradeDef; 30] = [
    // Knowledge tree (paid in mana)
    flat("k1", "Old Books", "Study ancient texts", "+1 Knowledge/sec", 10.0, M, 1.0),
    flat("k2", "Observation Notes", "Document your findings", "+2 Knowledge/sec", 50.0, M, 2.0),
    mult("k3", "Basic Theory", "Understand fundamentals", "x2 Knowledge gain", 100.0, M, 2.0),
    flat("k4", "Circle of Focus", "Enhance concentration", "+3 Knowledge/sec", 250.0, M, 3.0),
    mult("k5", "Advanced Theorems", "Complex mathematical insights", "x3 Knowledge gain", 500.0, M, 3.0),
    flat("k6", "Runic Studies", "Decode ancient symbols", "+5 Knowledge/sec", 1_000.0, M, 5.0),
    mult("k7", "Mana Resonance Theory", "Knowledge scales with Mana spent", "Knowledge boost from Mana", 2_500.0, M, 1.5),
    mult("k8", "Visualization Techniques", "Mental projection mastery", "x5 Knowledge gain", 5_000.0, M, 5.0),
    mult("k9", "Dimensional Theory", "Understand space-time", "x10 Knowledge gain", 10_000.0, M, 10.0),
    flat("k10", "Mana Circuits Optimization", "Perfect energy flow", "+Knowledge per Mana/sec", 25_000.0, M, 10.0),
    mult("k11", "Arcane Philosophy", "Deep understanding", "x2 global Knowledge", 50_000.0, M, 2.0),
    flat("k12", "Singularity Hypothesis", "Theoretical breakthrough", "Unlock final stage", 100_000.0, M, 0.0),
    mult("k13", "Mana-Cognition Fusion", "Mind and magic unite", "x25 Knowledge gain", 250_000.0, M, 25.0),
    mult("k14", "Infinite Library", "Access all knowledge", "x50 Knowledge gain", 500_000.0, M, 50.0),
    flat("k15", "Final Insight", "Truth of existence", "Required for Singularity", 1_000_000.0, M, 0.0),
    // Mana tree (paid in knowledge)
    flat("m1", "Meditation", "Basic energy cultivation", "+1 Mana/sec", 10.0, K, 1.0),
    mult("m2", "Mana Breathing", "Controlled energy flow", "x2 Mana regen", 50.0, K, 2.0),
    flat("m3", "Mana Threads", "Weave energy patterns", "+2 Mana/sec", 100.0, K, 2.0),
    mult("m4", "Vein Expansion", "Widen energy channels", "x2 Mana regen", 250.0, K, 2.0),
    mult("m5", "Mana Heart", "Core energy source", "x5 Mana regen", 500.0, K, 5.0),
    flat("m6", "Pool Expansion", "Increase capacity", "+3 Mana/sec", 1_000.0, K, 3.0),
    mult("m7", "Visualization", "Mental mana projection", "Mana boost from Knowledge", 2_500.0, K, 1.5),
    mult("m8", "Elemental Sparks", "Harness elemental forces", "x3 Mana regen", 5_000.0, K, 3.0),
    mult("m9", "Elemental Mastery", "Command all elements", "x10 Mana regen", 10_000.0, K, 10.0),
    flat("m10", "Time Dilation", "Manipulate temporal flow", "50% offline production", 25_000.0, K, 5.0),
    flat("m11", "Spellcasting Practice", "Perfect magical technique", "Gain Mana from Knowledge clicks", 50_000.0, K, 0.0),
    mult("m12", "Reality Anchor", "Stabilize existence", "Scales with upgrades", 100_000.0, K, 2.0),
    mult("m13", "Mana Overflow", "Unlimited energy flow", "x20 Mana regen", 250_000.0, K, 20.0),
    mult("m14", "World-Breaker Spell", "Reality-shaping magic", "x100 Mana regen", 500_000.0, K, 100.0),
    flat("m15", "Final Fusion", "Ultimate magical state", "Required for Singularity", 1_000_000.0, K, 0.0),
];

pub fn lookup(id: &str) -> Option<&'static UpgradeDef> {
    UPGRADE_DEFS.iter().find(|d| d.id == id)
}

/// Upgrades of one tree in declaration order.
pub fn all_for_tree(tree: Tree) -> impl Iterator<Item = &'static UpgradeDef> {
    UPGRADE_DEFS.iter().filter(move |d| d.tree() == Some(tree))
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate upgrade id {0}")]
    DuplicateId(&'static str),
    #[error("upgrade id {0} has no tree prefix")]
    UnknownTree(&'static str),
    #[error("upgrade {0} must cost a positive amount")]
    NonPositiveCost(&'static str),
    #[error("upgrade {0} must be paid in the opposite currency of its tree")]
    WrongCurrency(&'static str),
    #[error("upgrade {0} has an invalid multiplier or bonus")]
    InvalidEffect(&'static str),
}

/// Checks the authored table once; called when a fresh game is built.
pub fn validate(defs: &[UpgradeDef]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for def in defs {
        if !seen.insert(def.id) {
            return Err(CatalogError::DuplicateId(def.id));
        }
        let tree = def.tree().ok_or(CatalogError::UnknownTree(def.id))?;
        if !(def.cost.is_finite() && def.cost > 0.0) {
            return Err(CatalogError::NonPositiveCost(def.id));
        }
        if def.cost_type != tree.currency() {
            return Err(CatalogError::WrongCurrency(def.id));
        }
        let bad_mult = def.multiplier.is_some_and(|m| !(m.is_finite() && m > 0.0));
        let bad_flat = def.flat_bonus.is_some_and(|b| !(b.is_finite() && b >= 0.0));
        if bad_mult || bad_flat {
            return Err(CatalogError::InvalidEffect(def.id));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authored_catalog_is_valid() {
        assert_eq!(validate(&UPGRADE_DEFS), Ok(()));
    }

    #[test]
    fn each_tree_has_fifteen_in_declared_order() {
        let k: Vec<&str> = all_for_tree(Tree::Knowledge).map(|d| d.id).collect();
        let m: Vec<&str> = all_for_tree(Tree::Mana).map(|d| d.id).collect();
        assert_eq!(k.len(), 15);
        assert_eq!(m.len(), 15);
        assert_eq!(k[0], "k1");
        assert_eq!(k[9], "k10");
        assert_eq!(m[14], "m15");
    }

    #[test]
    fn lookup_finds_known_and_rejects_unknown() {
        let k1 = lookup("k1").unwrap();
        assert_eq!(k1.cost, 10.0);
        assert_eq!(k1.cost_type, Resource::Mana);
        assert_eq!(k1.flat_bonus, Some(1.0));
        assert!(lookup("k16").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn validate_flags_currency_mismatch() {
        let mut defs = UPGRADE_DEFS;
        defs[0].cost_type = Resource::Knowledge;
        assert_eq!(validate(&defs), Err(CatalogError::WrongCurrency("k1")));
    }

    #[test]
    fn validate_flags_duplicate_ids() {
        let mut defs = UPGRADE_DEFS;
        defs[1].id = "k1";
        assert_eq!(validate(&defs), Err(CatalogError::DuplicateId("k1")));
    }
}
