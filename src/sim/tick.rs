//! State transitions
//!
//! Every change to [`GameState`] goes through [`step`]. Timers are not
//! touched here; the returned [`Effect`] tells the session what to schedule.

use glam::Vec2;
use rand::Rng;

use super::catalog::Catalog;
use super::hit::check_hit;
use super::position::{ContainerBounds, character_position_from_pointer, random_target_position};
use super::random::{pick_random_currency, pick_random_denomination};
use super::state::{GamePhase, GameState};
use crate::tuning::Tuning;

/// Inputs to the state machine
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Pointer moved to an absolute location over the container
    PointerMoved {
        pointer: Vec2,
        bounds: ContainerBounds,
    },
    /// Player clicked; check for a hit
    Click,
    /// The post-hit window elapsed
    HitResolved,
    /// A fresh local time string for the active currency
    ClockRefreshed { display_time: String },
}

/// What a transition asks of its caller
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Entered `Hitting`; resolve after the hit delay
    HitStarted { distance: f32 },
    /// Click landed too far away
    Missed { distance: f32 },
    /// Click arrived while already hitting
    ClickIgnored,
    /// The active currency changed; the clock must follow it
    CurrencyChanged { code: String },
}

/// Apply one event to the state
pub fn step<R: Rng + ?Sized>(
    state: &mut GameState,
    event: &GameEvent,
    catalog: &Catalog,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Effect> {
    match event {
        GameEvent::PointerMoved { pointer, bounds } => {
            if let Some(pos) = character_position_from_pointer(*pointer, bounds) {
                state.character = pos;
            }
            None
        }
        GameEvent::Click => {
            if state.phase == GamePhase::Hitting {
                return Some(Effect::ClickIgnored);
            }
            let check = check_hit(state.character, state.target, tuning.hit_radius);
            if check.hit {
                state.phase = GamePhase::Hitting;
                Some(Effect::HitStarted {
                    distance: check.distance,
                })
            } else {
                Some(Effect::Missed {
                    distance: check.distance,
                })
            }
        }
        GameEvent::HitResolved => {
            if state.phase != GamePhase::Hitting {
                return None;
            }
            // All four changes land together
            let next = pick_random_currency(&state.currency_code, catalog, rng)
                .code
                .clone();
            let denomination = pick_random_denomination(&next, catalog, rng);
            let target = random_target_position(rng, tuning);

            state.phase = GamePhase::Idle;
            state.score = state.score.saturating_add(tuning.score_per_hit);
            state.currency_code = next.clone();
            state.denomination = denomination;
            state.target = target;
            Some(Effect::CurrencyChanged { code: next })
        }
        GameEvent::ClockRefreshed { display_time } => {
            if state.display_time != *display_time {
                state.display_time.clone_from(display_time);
            }
            None
        }
    }
}
