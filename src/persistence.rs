//! Save/restore of `GameState` as one JSON blob under [`STORAGE_KEY`].
//!
//! Writes overwrite the whole blob and are best-effort. A blob that fails to
//! parse or validate is treated as absent so the game starts fresh. Restored
//! state gets `last_tick = now`, so no offline progress is credited.

use crate::catalog::UPGRADE_DEFS;
use crate::config::{SAVE_VERSION, STORAGE_KEY};
use crate::model::GameState;
use crate::util::{clog, cwarn};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("local storage is unavailable")]
    Unavailable,
    #[error("could not encode save: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("could not decode save: {0}")]
    Deserialize(#[source] serde_json::Error),
    #[error("save rejected: {0}")]
    Invalid(String),
    #[error("unsupported save version {0}")]
    UnsupportedVersion(u32),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Key/value backend holding the save blob.
pub trait SaveStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Browser `window.localStorage`.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStore;

impl LocalStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        web_sys::window()
            .and_then(|win| win.local_storage().ok().flatten())
            .ok_or(StoreError::Unavailable)
    }
}

fn js_err(v: wasm_bindgen::JsValue) -> StoreError {
    StoreError::Backend(format!("{:?}", v))
}

impl SaveStore for LocalStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()?.get_item(key).map_err(js_err)
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()?.set_item(key, value).map_err(js_err)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()?.remove_item(key).map_err(js_err)
    }
}

/// In-memory backend for native tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SaveStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}

fn current_version() -> u32 {
    SAVE_VERSION
}

#[derive(Serialize, Deserialize)]
struct SaveFile {
    #[serde(default = "current_version")]
    version: u32,
    #[serde(flatten)]
    state: GameState,
}

#[derive(Serialize)]
struct SaveFileRef<'a> {
    version: u32,
    #[serde(flatten)]
    state: &'a GameState,
}

pub fn encode(state: &GameState) -> Result<String, StoreError> {
    serde_json::to_string(&SaveFileRef { version: SAVE_VERSION, state }).map_err(StoreError::Serialize)
}

pub fn decode(raw: &str) -> Result<GameState, StoreError> {
    let file: SaveFile = serde_json::from_str(raw).map_err(StoreError::Deserialize)?;
    if file.version != SAVE_VERSION {
        return Err(StoreError::UnsupportedVersion(file.version));
    }
    validate(&file.state)?;
    Ok(file.state)
}

fn validate(state: &GameState) -> Result<(), StoreError> {
    let amounts = [
        ("knowledge", state.knowledge),
        ("mana", state.mana),
        ("knowledgePerSecond", state.knowledge_per_second),
        ("manaPerSecond", state.mana_per_second),
    ];
    for (name, v) in amounts {
        if !(v.is_finite() && v >= 0.0) {
            return Err(StoreError::Invalid(format!("{name} is {v}")));
        }
    }
    if state.upgrades.len() != UPGRADE_DEFS.len() {
        return Err(StoreError::Invalid(format!(
            "{} upgrades, expected {}",
            state.upgrades.len(),
            UPGRADE_DEFS.len()
        )));
    }
    for (u, def) in state.upgrades.iter().zip(UPGRADE_DEFS.iter()) {
        if u.id != def.id {
            return Err(StoreError::Invalid(format!("upgrade {} where {} belongs", u.id, def.id)));
        }
        if !(u.cost.is_finite() && u.cost > 0.0) {
            return Err(StoreError::Invalid(format!("upgrade {} cost {}", u.id, u.cost)));
        }
    }
    let stage = state.stage_from_count();
    if state.evolution_stage != stage {
        return Err(StoreError::Invalid(format!(
            "evolution stage {} does not match {} owned upgrades",
            state.evolution_stage,
            state.purchased_count()
        )));
    }
    Ok(())
}

/// Overwrites the stored blob with `state`.
pub fn save(store: &impl SaveStore, state: &GameState) -> Result<(), StoreError> {
    store.write(STORAGE_KEY, &encode(state)?)
}

/// Stored state with `last_tick` moved to `now_ms`, or `None` if there is none.
pub fn load(store: &impl SaveStore, now_ms: f64) -> Result<Option<GameState>, StoreError> {
    let Some(raw) = store.read(STORAGE_KEY)? else {
        return Ok(None);
    };
    let mut state = decode(&raw)?;
    state.last_tick = now_ms;
    Ok(Some(state))
}

pub fn clear(store: &impl SaveStore) -> Result<(), StoreError> {
    store.remove(STORAGE_KEY)
}

/// Start-of-session state: the saved game if readable, defaults otherwise.
pub fn load_or_default(store: &impl SaveStore, now_ms: f64) -> GameState {
    match load(store, now_ms) {
        Ok(Some(state)) => {
            clog(&format!("restored save: {} upgrades owned", state.purchased_count()));
            state
        }
        Ok(None) => GameState::new(now_ms),
        Err(e) => {
            cwarn(&format!("discarding save: {e}"));
            GameState::new(now_ms)
        }
    }
}

/// Fire-and-forget writer. The first failure is logged; further failures stay
/// quiet until a write succeeds again.
#[derive(Debug, Default)]
pub struct Autosave {
    failing: bool,
    warnings: u32,
}

impl Autosave {
    pub fn write(&mut self, store: &impl SaveStore, state: &GameState) {
        match save(store, state) {
            Ok(()) => {
                if self.failing {
                    clog("saving resumed");
                }
                self.failing = false;
            }
            Err(e) => {
                if !self.failing {
                    cwarn(&format!("save failed: {e}"));
                    self.warnings += 1;
                }
                self.failing = true;
            }
        }
    }

    pub fn is_failing(&self) -> bool {
        self.failing
    }

    /// Number of failures reported so far.
    pub fn warnings(&self) -> u32 {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_uses_camel_case_layout_with_version() {
        let mut gs = GameState::new(5.0);
        gs.mana = 10.0;
        gs.purchase("k1").unwrap();
        let json: serde_json::Value = serde_json::from_str(&encode(&gs).unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["knowledgePerSecond"], 2.0);
        assert_eq!(json["evolutionStage"], 0);
        assert_eq!(json["lastTick"], 5.0);
        let k1 = &json["upgrades"][0];
        assert_eq!(k1["id"], "k1");
        assert_eq!(k1["costType"], "mana");
        assert_eq!(k1["flatBonus"], 1.0);
        assert_eq!(k1["purchased"], true);
        assert!(k1.get("multiplier").is_none());
    }

    #[test]
    fn load_resets_last_tick() {
        let store = MemoryStore::new();
        let mut gs = GameState::new(100.0);
        gs.knowledge = 12.5;
        save(&store, &gs).unwrap();
        let loaded = load(&store, 9_000.0).unwrap().unwrap();
        assert_eq!(loaded.knowledge, 12.5);
        assert_eq!(loaded.last_tick, 9_000.0);
    }

    #[test]
    fn missing_blob_is_absent() {
        let store = MemoryStore::new();
        assert!(load(&store, 0.0).unwrap().is_none());
        assert_eq!(load_or_default(&store, 3.0), GameState::new(3.0));
    }

    #[test]
    fn malformed_blob_falls_back_to_defaults() {
        let store = MemoryStore::new();
        store.write(STORAGE_KEY, "{not json").unwrap();
        assert!(matches!(load(&store, 0.0), Err(StoreError::Deserialize(_))));
        assert_eq!(load_or_default(&store, 1.0), GameState::new(1.0));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut gs = GameState::new(0.0);
        gs.mana = -4.0;
        assert!(matches!(decode(&encode(&gs).unwrap()), Err(StoreError::Invalid(_))));

        let mut gs = GameState::new(0.0);
        gs.upgrades[3].id = "x9".into();
        assert!(matches!(decode(&encode(&gs).unwrap()), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn unversioned_blob_is_accepted_other_versions_are_not() {
        let gs = GameState::new(0.0);
        let mut json: serde_json::Value = serde_json::from_str(&encode(&gs).unwrap()).unwrap();
        json.as_object_mut().unwrap().remove("version");
        assert_eq!(decode(&json.to_string()).unwrap(), gs);
        json["version"] = serde_json::json!(2);
        assert!(matches!(decode(&json.to_string()), Err(StoreError::UnsupportedVersion(2))));
    }

    #[test]
    fn clear_removes_blob() {
        let store = MemoryStore::new();
        save(&store, &GameState::new(0.0)).unwrap();
        clear(&store).unwrap();
        assert!(store.read(STORAGE_KEY).unwrap().is_none());
    }

    fn catalog_game() -> GameState {
        let mut gs = GameState::new(0.0);
        gs.knowledge = 1e9;
        gs.mana = 1e9;
        for id in ["k1", "k2", "m1", "m2", "m3", "k15"] {
            gs.purchase(id).unwrap();
        }
        gs
    }

    #[test]
    fn truncated_upgrade_list_is_rejected() {
        let mut gs = catalog_game();
        gs.upgrades.truncate(14);
        gs.evolution_stage = gs.stage_from_count();
        assert!(matches!(decode(&encode(&gs).unwrap()), Err(StoreError::Invalid(_))));

        gs.upgrades.clear();
        gs.evolution_stage = 4;
        assert!(matches!(decode(&encode(&gs).unwrap()), Err(StoreError::Invalid(_))));
        assert_eq!(load_or_default(&stored(&gs), 2.0), GameState::new(2.0));
    }

    #[test]
    fn reordered_upgrade_list_is_rejected() {
        let mut gs = catalog_game();
        gs.upgrades.reverse();
        assert!(matches!(decode(&encode(&gs).unwrap()), Err(StoreError::Invalid(_))));
    }

    #[test]
    fn stage_not_matching_owned_upgrades_is_rejected() {
        let mut gs = catalog_game();
        assert_eq!(gs.evolution_stage, 1);
        assert!(decode(&encode(&gs).unwrap()).is_ok());
        gs.evolution_stage = 3;
        assert!(matches!(decode(&encode(&gs).unwrap()), Err(StoreError::Invalid(_))));
    }

    fn stored(gs: &GameState) -> MemoryStore {
        let store = MemoryStore::new();
        save(&store, gs).unwrap();
        store
    }

    /// Backend whose writes fail while `down` is set.
    #[derive(Default)]
    struct FlakyStore {
        down: std::cell::Cell<bool>,
        inner: MemoryStore,
    }

    impl SaveStore for FlakyStore {
        fn read(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.inner.read(key)
        }

        fn write(&self, key: &str, value: &str) -> Result<(), StoreError> {
            if self.down.get() {
                return Err(StoreError::Unavailable);
            }
            self.inner.write(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), StoreError> {
            self.inner.remove(key)
        }
    }

    #[test]
    fn autosave_reports_an_outage_once() {
        let store = FlakyStore::default();
        let gs = GameState::new(0.0);
        let mut autosave = Autosave::default();

        store.down.set(true);
        for _ in 0..50 {
            autosave.write(&store, &gs);
        }
        assert!(autosave.is_failing());
        assert_eq!(autosave.warnings(), 1);

        store.down.set(false);
        autosave.write(&store, &gs);
        assert!(!autosave.is_failing());
        assert!(store.read(STORAGE_KEY).unwrap().is_some());

        store.down.set(true);
        autosave.write(&store, &gs);
        autosave.write(&store, &gs);
        assert_eq!(autosave.warnings(), 2);
    }
}
