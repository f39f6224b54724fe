//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Time comes from the host as milliseconds, never read directly
//! - No rendering or platform dependencies (the clock is injected)

pub mod catalog;
pub mod hit;
pub mod position;
pub mod random;
pub mod session;
pub mod state;
pub mod tick;
pub mod timer;

pub use catalog::{Catalog, CatalogError, CurrencyRecord};
pub use hit::{HitCheck, check_hit, compute_distance, is_hit};
pub use position::{
    ContainerBounds, Position, character_position_from_pointer, random_target_position,
};
pub use random::{pick_initial_currency, pick_random_currency, pick_random_denomination};
pub use session::{ClickOutcome, GameSession};
pub use state::{GamePhase, GameSnapshot, GameState};
pub use tick::{Effect, GameEvent, step};
pub use timer::{Scheduler, TimerHandle, TimerKind};
