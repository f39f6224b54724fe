//! Game balance and timing
//!
//! Read from LocalStorage on the web so the knobs can be tweaked without a
//! rebuild; the game itself never writes them. Native builds always use the
//! defaults.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Reasons a tuning document is rejected
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("malformed tuning JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{axis} spawn range {min}..={max} must be ordered and inside 0..=100")]
    TargetRange { axis: char, min: f32, max: f32 },
    #[error("hit radius must be positive, got {0}")]
    HitRadius(f32),
    #[error("{0} must be at least 1 ms")]
    ZeroDuration(&'static str),
}

/// Tunable gameplay parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Click succeeds when the character is strictly closer than this
    pub hit_radius: f32,
    /// Points per resolved hit
    pub score_per_hit: u64,
    /// Length of the "hitting" window before the bill changes
    pub hit_delay_ms: u64,
    /// Local time refresh period
    pub clock_interval_ms: u64,
    /// Target spawn range on x (percent, inclusive)
    pub target_x_range: (f32, f32),
    /// Target spawn range on y (percent, inclusive)
    pub target_y_range: (f32, f32),
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            hit_radius: HIT_RADIUS,
            score_per_hit: SCORE_PER_HIT,
            hit_delay_ms: HIT_DELAY_MS,
            clock_interval_ms: CLOCK_INTERVAL_MS,
            target_x_range: (TARGET_X_MIN, TARGET_X_MAX),
            target_y_range: (TARGET_Y_MIN, TARGET_Y_MAX),
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn validate(&self) -> Result<(), TuningError> {
        for (axis, (min, max)) in [('x', self.target_x_range), ('y', self.target_y_range)] {
            let in_field = (0.0..=100.0).contains(&min) && (0.0..=100.0).contains(&max);
            if !in_field || min > max {
                return Err(TuningError::TargetRange { axis, min, max });
            }
        }
        if self.hit_radius.is_nan() || self.hit_radius <= 0.0 {
            return Err(TuningError::HitRadius(self.hit_radius));
        }
        if self.hit_delay_ms == 0 {
            return Err(TuningError::ZeroDuration("hit_delay_ms"));
        }
        if self.clock_interval_ms == 0 {
            return Err(TuningError::ZeroDuration("clock_interval_ms"));
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "bill_chase_tuning";

    /// Load tuning from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(tuning) => {
                        log::info!("Loaded tuning from LocalStorage");
                        return tuning;
                    }
                    Err(e) => log::warn!("Ignoring stored tuning: {}", e),
                }
            }
        }

        log::info!("Using default tuning");
        Self::default()
    }

    /// Native builds have no storage to read from
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
