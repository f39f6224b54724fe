//! Game state and core simulation types
//!
//! Lives for one page session and is never persisted; the view only ever
//! sees a [`GameSnapshot`].

use rand::Rng;
use serde::Serialize;

use super::catalog::Catalog;
use super::position::{Position, random_target_position};
use super::random::{pick_initial_currency, pick_random_denomination};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Bill on screen, waiting for a click
    #[default]
    Idle,
    /// Bill was just hit; clicks are ignored until it moves on
    Hitting,
}

/// Complete mutable game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub score: u64,
    /// Always a code present in the session's catalog
    pub currency_code: String,
    /// Always one of the current currency's denominations
    pub denomination: u32,
    /// Where the bill is
    pub target: Position,
    /// Where the pointer-driven character is
    pub character: Position,
    pub phase: GamePhase,
    /// Formatted local time of the currency's capital
    pub display_time: String,
}

impl GameState {
    /// Fresh state with a random opening bill
    pub fn new<R: Rng + ?Sized>(catalog: &Catalog, tuning: &Tuning, rng: &mut R) -> Self {
        let target = random_target_position(rng, tuning);
        let currency_code = pick_initial_currency(catalog, rng).code.clone();
        let denomination = pick_random_denomination(&currency_code, catalog, rng);
        Self {
            score: 0,
            currency_code,
            denomination,
            target,
            character: Position::default(),
            phase: GamePhase::Idle,
            display_time: String::new(),
        }
    }

    pub fn is_hitting(&self) -> bool {
        self.phase == GamePhase::Hitting
    }
}

/// Everything the view needs to draw one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub score: u64,
    pub currency_code: String,
    pub symbol: String,
    pub color: String,
    pub background_color: String,
    pub capital: String,
    pub denomination: u32,
    pub target: Position,
    pub character: Position,
    pub is_hitting: bool,
    pub display_time: String,
}

impl GameSnapshot {
    pub fn capture(state: &GameState, catalog: &Catalog) -> Self {
        let currency = catalog.get_or_first(&state.currency_code);
        Self {
            score: state.score,
            currency_code: currency.code.clone(),
            symbol: currency.symbol.clone(),
            color: currency.color.clone(),
            background_color: currency.background_color.clone(),
            capital: currency.capital.clone(),
            denomination: state.denomination,
            target: state.target,
            character: state.character,
            is_hitting: state.is_hitting(),
            display_time: state.display_time.clone(),
        }
    }
}
