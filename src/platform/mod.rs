//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Wall-clock time in arbitrary IANA timezones
//! - Page lifecycle (back/forward cache)

pub mod lifecycle;
pub mod time;
