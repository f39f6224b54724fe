//! Page lifecycle decisions
//!
//! A `pagehide` with `persisted` set means the page went into the
//! back/forward cache and may come back; only a real unload ends the session.

/// A `pagehide` / `pageshow` transition as reported by the browser
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTransition {
    Hide { persisted: bool },
    Show { persisted: bool },
}

/// What the host should do with its session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    /// Leave the session alone; a cached page keeps its timers and loop
    Keep,
    /// Cancel every timer, the page is being unloaded
    Shutdown,
    /// Start a fresh round and re-arm the frame loop
    Resume,
}

pub fn lifecycle_action(transition: PageTransition, session_active: bool) -> LifecycleAction {
    match transition {
        PageTransition::Hide { persisted: true } => LifecycleAction::Keep,
        PageTransition::Hide { persisted: false } => LifecycleAction::Shutdown,
        PageTransition::Show { persisted: true } if !session_active => LifecycleAction::Resume,
        PageTransition::Show { .. } => LifecycleAction::Keep,
    }
}
