//! Semantic action IDs for click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const WRITE_CODE: u16 = 0;
pub const FORK_PAPER: u16 = 1;

// ── Upgrade purchase (base + UpgradeKind::index()) ──────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Save management ─────────────────────────────────────────────
pub const RESET_GAME: u16 = 500;
pub const CANCEL_RESET: u16 = 501;
