//! Bill Chase - A currency-chasing arcade mini-game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (catalog, hit detection, timers, session)
//! - `platform`: Browser/native platform abstraction (wall-clock formatting)
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod sim;
pub mod tuning;

pub use platform::time::{TimeSource, format_local_time};
pub use sim::{Catalog, ClickOutcome, GameSession, GameSnapshot};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Distance (percentage units) below which a click counts as a hit
    pub const HIT_RADIUS: f32 = 15.0;
    /// Points awarded per resolved hit
    pub const SCORE_PER_HIT: u64 = 10;
    /// Length of the post-hit "hitting" window
    pub const HIT_DELAY_MS: u64 = 300;
    /// Clock refresh period
    pub const CLOCK_INTERVAL_MS: u64 = 1000;

    /// Target spawn area, kept away from the edges so the bill stays visible
    pub const TARGET_X_MIN: f32 = 10.0;
    pub const TARGET_X_MAX: f32 = 90.0;
    pub const TARGET_Y_MIN: f32 = 15.0;
    pub const TARGET_Y_MAX: f32 = 85.0;

    /// Denomination used when a currency code is missing from the catalog
    pub const FALLBACK_DENOMINATION: u32 = 100;
    /// Displayed when the local time cannot be formatted
    pub const FALLBACK_TIME: &str = "12:00 PM";
}
