//! One running game
//!
//! The session owns the state, the seeded RNG and every timer. The host feeds
//! it pointer/click events and the current monotonic time; it never spawns
//! work of its own.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::catalog::Catalog;
use super::position::{ContainerBounds, Position, character_position_from_pointer};
use super::state::{GameSnapshot, GameState};
use super::tick::{Effect, GameEvent, step};
use super::timer::{Fired, Scheduler, TimerHandle, TimerKind};
use crate::platform::time::{TimeSource, format_local_time};
use crate::tuning::{Tuning, TuningError};

/// What happened to a click
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickOutcome {
    /// Close enough; the bill resolves after the hit delay
    Hit { distance: f32 },
    /// Too far from the bill
    Miss { distance: f32 },
    /// A hit is already in flight, or the session has ended
    Ignored,
}

/// A running game bound to a catalog, tuning and time source
pub struct GameSession<C: TimeSource> {
    state: GameState,
    catalog: Catalog,
    tuning: Tuning,
    clock: C,
    rng: Pcg32,
    seed: u64,
    scheduler: Scheduler,
    /// One-shot end of the hitting window
    pending_hit: Option<TimerHandle>,
    /// The single clock refresh timer, bound to the current currency
    clock_timer: Option<TimerHandle>,
    active: bool,
}

impl<C: TimeSource> GameSession<C> {
    /// Start a session with a random opening bill, rejecting invalid tuning
    pub fn new(seed: u64, catalog: Catalog, tuning: Tuning, clock: C) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self::start(seed, catalog, tuning, clock))
    }

    /// Session with the embedded catalog and default tuning
    pub fn with_defaults(seed: u64, clock: C) -> Self {
        Self::start(seed, Catalog::builtin(), Tuning::default(), clock)
    }

    fn start(seed: u64, catalog: Catalog, tuning: Tuning, clock: C) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let state = GameState::new(&catalog, &tuning, &mut rng);
        let mut session = Self {
            state,
            catalog,
            tuning,
            clock,
            rng,
            seed,
            scheduler: Scheduler::new(),
            pending_hit: None,
            clock_timer: None,
            active: true,
        };
        session.rebind_clock();
        log::info!(
            "Session started (seed {}): {} {} at ({:.1}, {:.1})",
            seed,
            session.state.currency_code,
            session.state.denomination,
            session.state.target.x,
            session.state.target.y
        );
        session
    }

    fn apply(&mut self, event: GameEvent) -> Option<Effect> {
        step(
            &mut self.state,
            &event,
            &self.catalog,
            &self.tuning,
            &mut self.rng,
        )
    }

    /// Track the pointer; returns the character's new position
    pub fn pointer_moved(&mut self, pointer: Vec2, bounds: ContainerBounds) -> Option<Position> {
        if !self.active {
            return None;
        }
        let pos = character_position_from_pointer(pointer, &bounds)?;
        self.apply(GameEvent::PointerMoved { pointer, bounds });
        Some(pos)
    }

    /// Check for a hit at the character's current position
    pub fn click(&mut self) -> ClickOutcome {
        if !self.active {
            return ClickOutcome::Ignored;
        }
        match self.apply(GameEvent::Click) {
            Some(Effect::HitStarted { distance }) => {
                let handle = self
                    .scheduler
                    .schedule_once(TimerKind::HitResolution, self.tuning.hit_delay_ms);
                self.pending_hit = Some(handle);
                log::info!(
                    "Hit {} {} (distance {:.1})",
                    self.state.currency_code,
                    self.state.denomination,
                    distance
                );
                ClickOutcome::Hit { distance }
            }
            Some(Effect::Missed { distance }) => {
                log::debug!("Miss (distance {:.1})", distance);
                ClickOutcome::Miss { distance }
            }
            _ => {
                log::debug!("Click ignored while hitting");
                ClickOutcome::Ignored
            }
        }
    }

    /// Run every timer due at or before `now_ms` (host monotonic time)
    pub fn advance(&mut self, now_ms: u64) {
        if !self.active {
            return;
        }
        while let Some(fired) = self.scheduler.pop_due(now_ms) {
            self.on_timer(fired);
        }
        self.scheduler.set_now(now_ms);
    }

    fn on_timer(&mut self, fired: Fired) {
        match fired.kind {
            TimerKind::HitResolution => {
                if self.pending_hit != Some(fired.handle) {
                    return;
                }
                self.pending_hit = None;
                if let Some(Effect::CurrencyChanged { code }) = self.apply(GameEvent::HitResolved) {
                    log::info!(
                        "Score {} - next bill {} {}",
                        self.state.score,
                        code,
                        self.state.denomination
                    );
                    self.rebind_clock();
                }
            }
            TimerKind::ClockRefresh => {
                if self.clock_timer == Some(fired.handle) {
                    self.refresh_time();
                }
            }
        }
    }

    fn refresh_time(&mut self) {
        let timezone = &self.catalog.get_or_first(&self.state.currency_code).timezone;
        let display_time = format_local_time(&self.clock, timezone);
        log::trace!("Clock {} -> {}", timezone, display_time);
        self.apply(GameEvent::ClockRefreshed { display_time });
    }

    /// Replace the clock timer with one bound to the current currency
    fn rebind_clock(&mut self) {
        if let Some(old) = self.clock_timer.take() {
            self.scheduler.cancel(old);
        }
        self.refresh_time();
        self.clock_timer = Some(
            self.scheduler
                .schedule_repeating(TimerKind::ClockRefresh, self.tuning.clock_interval_ms),
        );
    }

    /// Start over with a new opening bill; pending work is dropped
    pub fn reset(&mut self, seed: u64) {
        if let Some(pending) = self.pending_hit.take() {
            self.scheduler.cancel(pending);
        }
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.state = GameState::new(&self.catalog, &self.tuning, &mut self.rng);
        self.active = true;
        self.rebind_clock();
        log::info!("Session reset (seed {})", seed);
    }

    /// Tear down all timers; further input is ignored
    pub fn shutdown(&mut self) {
        if !self.active {
            return;
        }
        self.scheduler.cancel_all();
        self.pending_hit = None;
        self.clock_timer = None;
        self.active = false;
        log::info!("Session ended with score {}", self.state.score);
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(&self.state, &self.catalog)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_hit_pending(&self) -> bool {
        self.pending_hit.is_some()
    }

    /// Number of live timers (hit resolution + clock)
    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use crate::platform::time::FixedClock;
    use crate::sim::state::GamePhase;
    use chrono::{TimeZone, Utc};
    use std::cell::Cell;

    /// Unit container so pointer pixels equal percentages
    const UNIT: ContainerBounds = ContainerBounds::new(0.0, 0.0, 100.0, 100.0);

    fn fixed() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap())
    }

    fn session(seed: u64) -> GameSession<FixedClock> {
        GameSession::with_defaults(seed, fixed())
    }

    fn aim_at_target<C: TimeSource>(session: &mut GameSession<C>) {
        let target = session.state().target;
        session.pointer_moved(target.as_vec2(), UNIT);
    }

    /// Counts how often the session asks for the time
    #[derive(Default)]
    struct CountingClock {
        calls: Cell<u32>,
    }

    impl TimeSource for CountingClock {
        fn local_time(&self, _timezone: &str) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            Some("09:41 AM".to_string())
        }
    }

    #[test]
    fn test_opening_state() {
        let s = session(11);
        assert!(s.is_active());
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().phase, GamePhase::Idle);
        // Clock formatted immediately, one repeating timer armed
        assert!(!s.state().display_time.is_empty());
        assert_eq!(s.pending_timers(), 1);
    }

    #[test]
    fn test_hit_at_distance_zero_scores_ten() {
        let mut s = session(12);
        aim_at_target(&mut s);
        let before = s.state().clone();

        assert!(matches!(s.click(), ClickOutcome::Hit { .. }));
        assert!(s.state().is_hitting());

        s.advance(299);
        assert!(s.state().is_hitting());
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().currency_code, before.currency_code);

        s.advance(300);
        let after = s.state();
        assert_eq!(after.phase, GamePhase::Idle);
        assert_eq!(after.score, 10);
        assert_ne!(after.currency_code, before.currency_code);
        let currency = s.catalog().get(&after.currency_code).unwrap();
        assert!(currency.denominations.contains(&after.denomination));
        assert!((10.0..=90.0).contains(&after.target.x));
        assert!((15.0..=85.0).contains(&after.target.y));
    }

    #[test]
    fn test_miss_changes_nothing() {
        let mut s = session(13);
        let target = s.state().target;
        // The opposite corner of the field is always out of reach
        let far = Vec2::new(
            if target.x < 50.0 { 100.0 } else { 0.0 },
            if target.y < 50.0 { 100.0 } else { 0.0 },
        );
        s.pointer_moved(far, UNIT);

        assert!(matches!(s.click(), ClickOutcome::Miss { .. }));
        assert_eq!(s.pending_timers(), 1);
        s.advance(5_000);
        assert_eq!(s.state().score, 0);
    }

    #[test]
    fn test_reentrant_click_ignored() {
        let mut s = session(14);
        aim_at_target(&mut s);
        assert!(matches!(s.click(), ClickOutcome::Hit { .. }));
        assert_eq!(s.click(), ClickOutcome::Ignored);
        assert_eq!(s.click(), ClickOutcome::Ignored);
        // Clock plus exactly one hit resolution
        assert_eq!(s.pending_timers(), 2);

        s.advance(1_000);
        assert_eq!(s.state().score, 10);
        assert!(!s.is_hit_pending());
    }

    #[test]
    fn test_clock_rebinds_on_currency_change() {
        let mut s = session(15);
        aim_at_target(&mut s);
        s.click();
        s.advance(300);

        // Old clock timer replaced, not stacked
        assert_eq!(s.pending_timers(), 1);
        let tz = &s.catalog().get(&s.state().currency_code).unwrap().timezone;
        assert_eq!(s.state().display_time, format_local_time(s.clock(), tz));
    }

    #[test]
    fn test_clock_refreshes_every_interval() {
        let mut s = GameSession::with_defaults(16, CountingClock::default());
        assert_eq!(s.clock().calls.get(), 1);
        s.advance(999);
        assert_eq!(s.clock().calls.get(), 1);
        s.advance(3_000);
        // A jump over several periods collapses into one refresh
        assert_eq!(s.clock().calls.get(), 2);
        s.advance(4_000);
        s.advance(5_000);
        assert_eq!(s.clock().calls.get(), 4);
        assert_eq!(s.state().display_time, "09:41 AM");
    }

    #[test]
    fn test_unknown_timezone_shows_fallback() {
        let json = r##"[
            {"code": "AAA", "symbol": "A", "color": "#111", "background_color": "#fff",
             "denominations": [1], "capital": "Nowhere", "timezone": "Nowhere/Atlantis"},
            {"code": "BBB", "symbol": "B", "color": "#222", "background_color": "#eee",
             "denominations": [2], "capital": "Elsewhere", "timezone": "Nowhere/Lemuria"}
        ]"##;
        let catalog = Catalog::from_json(json).unwrap();
        let s = GameSession::new(17, catalog, Tuning::default(), fixed()).unwrap();
        assert_eq!(s.state().display_time, "12:00 PM");
    }

    #[test]
    fn test_invalid_tuning_is_rejected() {
        let inverted = Tuning {
            target_x_range: (90.0, 10.0),
            ..Tuning::default()
        };
        assert!(matches!(
            GameSession::new(1, Catalog::builtin(), inverted, fixed()),
            Err(TuningError::TargetRange { axis: 'x', .. })
        ));

        let no_delay = Tuning {
            hit_delay_ms: 0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameSession::new(1, Catalog::builtin(), no_delay, fixed()),
            Err(TuningError::ZeroDuration("hit_delay_ms"))
        ));

        let custom = Tuning {
            target_x_range: (40.0, 60.0),
            ..Tuning::default()
        };
        let s = GameSession::new(1, Catalog::builtin(), custom, fixed()).unwrap();
        assert!((40.0..=60.0).contains(&s.state().target.x));
    }

    #[test]
    fn test_reset_cancels_pending_hit() {
        let mut s = session(18);
        aim_at_target(&mut s);
        s.click();
        s.advance(100);
        s.reset(99);

        assert_eq!(s.seed(), 99);
        assert!(!s.is_hit_pending());
        assert_eq!(s.pending_timers(), 1);
        s.advance(1_000);
        assert_eq!(s.state().score, 0);
        assert_eq!(s.state().phase, GamePhase::Idle);
    }

    #[test]
    fn test_shutdown_stops_everything() {
        let mut s = GameSession::with_defaults(19, CountingClock::default());
        aim_at_target(&mut s);
        s.click();
        s.shutdown();

        assert!(!s.is_active());
        assert_eq!(s.pending_timers(), 0);
        assert_eq!(s.click(), ClickOutcome::Ignored);
        assert!(s.pointer_moved(Vec2::new(1.0, 1.0), UNIT).is_none());

        s.advance(60_000);
        assert_eq!(s.clock().calls.get(), 1);
        assert_eq!(s.state().score, 0);
    }

    #[test]
    fn test_reset_after_shutdown_resumes() {
        let mut s = GameSession::with_defaults(23, CountingClock::default());
        s.shutdown();
        s.reset(24);

        assert!(s.is_active());
        assert_eq!(s.pending_timers(), 1);
        assert_eq!(s.clock().calls.get(), 2);
        s.advance(1_000);
        assert_eq!(s.clock().calls.get(), 3);

        aim_at_target(&mut s);
        assert!(matches!(s.click(), ClickOutcome::Hit { .. }));
        s.advance(1_300);
        assert_eq!(s.state().score, 10);
    }

    #[test]
    fn test_many_hits_accumulate() {
        let mut s = session(20);
        let mut now = 0;
        for round in 1..=25u64 {
            let previous = s.state().currency_code.clone();
            aim_at_target(&mut s);
            assert!(matches!(s.click(), ClickOutcome::Hit { .. }));
            now += 300;
            s.advance(now);
            assert_eq!(s.state().score, round * 10);
            assert_ne!(s.state().currency_code, previous);
        }
        assert_eq!(s.pending_timers(), 1);
    }

    fn play_two_rounds(s: &mut GameSession<FixedClock>) {
        aim_at_target(s);
        s.click();
        s.advance(300);
        aim_at_target(s);
        s.click();
        s.advance(600);
    }

    #[test]
    fn test_same_seed_same_game() {
        let mut a = session(21);
        let mut b = session(21);
        play_two_rounds(&mut a);
        play_two_rounds(&mut b);
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.state().score, 20);
    }

    #[test]
    fn test_snapshot_follows_state() {
        let mut s = session(22);
        aim_at_target(&mut s);
        s.click();
        let snap = s.snapshot();
        assert!(snap.is_hitting);
        assert_eq!(snap.currency_code, s.state().currency_code);
        assert_eq!(snap.character, s.state().character);
    }
}
