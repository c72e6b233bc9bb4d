//! Semantic action IDs for BMC Clicker click targets.
//!
//! These IDs are registered during render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_IMAGE: u16 = 0;

// ── Upgrade purchase (base + upgrade index) ─────────────────────
pub const BUY_UPGRADE_BASE: u16 = 100;

// ── Reset flow ──────────────────────────────────────────────────
pub const RESET_REQUEST: u16 = 500;
pub const RESET_CONFIRM: u16 = 501;
pub const RESET_CANCEL: u16 = 502;
