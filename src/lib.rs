//! Paper Forker — an incremental game about writing lines of code and
//! forking papers.
//!
//! The progression model (`state`, `config`, `logic`) is pure and
//! platform-agnostic. `save` and `session` add persistence and timing on top
//! through an injected [`save::KeyValueStore`]; the remaining modules are the
//! terminal-in-browser shell.

pub mod actions;
pub mod config;
pub mod game;
pub mod input;
pub mod logger;
pub mod logic;
pub mod render;
pub mod save;
pub mod session;
pub mod state;
pub mod time;
pub mod widgets;

pub use config::{EconomyConfig, ForkRequirement, UpgradeCurve};
pub use logic::ForkOutcome;
pub use save::{KeyValueStore, MemoryStore};
pub use session::Session;
pub use state::{ProgressState, UpgradeKind};
