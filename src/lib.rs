//! Infinite Mage: an idle game about accruing knowledge and mana.
//!
//! Game logic (`catalog`, `model`, `persistence`) is plain Rust and runs
//! natively under `cargo test`; `components` renders it with yew in the browser.

pub mod catalog;
pub mod components;
pub mod config;
pub mod model;
pub mod persistence;
pub mod state;
pub mod util;
