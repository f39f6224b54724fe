//! Local time of day for a currency's home timezone
//!
//! The simulation never reads the wall clock itself; it asks a [`TimeSource`].
//! Native builds format with chrono-tz, the browser uses `Intl.DateTimeFormat`.

use crate::consts::FALLBACK_TIME;

/// Formats "now" for an IANA timezone as a 12-hour `hh:mm AM/PM` string
pub trait TimeSource {
    /// `None` when the timezone is unknown or formatting is unavailable
    fn local_time(&self, timezone: &str) -> Option<String>;
}

/// Current local time in `timezone`, or `"12:00 PM"` if it can't be formatted
pub fn format_local_time<T: TimeSource + ?Sized>(source: &T, timezone: &str) -> String {
    source.local_time(timezone).unwrap_or_else(|| {
        log::warn!("Cannot format time for timezone {:?}, using fallback", timezone);
        FALLBACK_TIME.to_string()
    })
}

impl<T: TimeSource + ?Sized> TimeSource for Box<T> {
    fn local_time(&self, timezone: &str) -> Option<String> {
        (**self).local_time(timezone)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use chrono::{DateTime, Utc};
    use chrono_tz::Tz;

    use super::TimeSource;

    /// Format a UTC instant in the given timezone
    pub fn format_instant(instant: DateTime<Utc>, timezone: &str) -> Option<String> {
        let tz: Tz = timezone.parse().ok()?;
        Some(instant.with_timezone(&tz).format("%I:%M %p").to_string())
    }

    /// The machine's real clock
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl TimeSource for SystemClock {
        fn local_time(&self, timezone: &str) -> Option<String> {
            format_instant(Utc::now(), timezone)
        }
    }

    /// A clock frozen at one instant, for replays and tests
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock(pub DateTime<Utc>);

    impl TimeSource for FixedClock {
        fn local_time(&self, timezone: &str) -> Option<String> {
            format_instant(self.0, timezone)
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{FixedClock, SystemClock, format_instant};

#[cfg(target_arch = "wasm32")]
mod browser {
    use wasm_bindgen::prelude::*;

    use super::TimeSource;

    // Intl throws a RangeError for unknown zones; swallow it and report undefined
    #[wasm_bindgen(inline_js = "
        export function format_time_in_zone(tz) {
            try {
                return new Intl.DateTimeFormat('en-US', {
                    hour: '2-digit',
                    minute: '2-digit',
                    hour12: true,
                    timeZone: tz,
                }).format(new Date());
            } catch (e) {
                return undefined;
            }
        }
    ")]
    extern "C" {
        fn format_time_in_zone(tz: &str) -> Option<String>;
    }

    /// The browser's clock and timezone database
    #[derive(Debug, Clone, Copy, Default)]
    pub struct IntlClock;

    impl TimeSource for IntlClock {
        fn local_time(&self, timezone: &str) -> Option<String> {
            format_time_in_zone(timezone)
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::IntlClock;
