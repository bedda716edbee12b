//! Game tuning constants shared by the engine, the storage adapter and the views.

/// localStorage key holding the whole save blob.
pub const STORAGE_KEY: &str = "infinite-mage-save";

/// Current save schema. Blobs without a version are read as this one.
pub const SAVE_VERSION: u32 = 1;

/// Nominal period of the passive accrual timer. Accrual itself uses measured time.
pub const TICK_INTERVAL_MS: u32 = 100;

/// Starting per-second rate of both resources.
pub const BASE_RATE: f64 = 1.0;

/// Share of the per-second rate added to each manual click (floored).
pub const CLICK_RATE_FACTOR: f64 = 0.1;

pub const UPGRADES_PER_STAGE: usize = 5;
pub const MAX_EVOLUTION_STAGE: u32 = 6;

/// Terminal upgrades; both must be owned before the singularity can be reached.
pub const FINAL_KNOWLEDGE_ID: &str = "k15";
pub const FINAL_MANA_ID: &str = "m15";

/// Lifetime of the click highlight in the evolution view.
pub const CLICK_FLASH_MS: u32 = 200;
