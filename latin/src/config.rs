//! Latin-frontend configuration extending the base dispatch config.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the Latin input-method layer.
///
/// Flattens the core dispatch config (repeat delays, vertical correction)
/// and adds the frontend's own knobs. The shift double-tap window is
/// deliberately independent of the repeat delays; tune them separately.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LatinConfig {
    /// Base dispatch timing and touch tuning.
    #[serde(flatten)]
    pub base: libsoftkey_core::Config,

    /// Window within which a second shift tap latches caps lock, in ms.
    pub shift_double_tap_ms: u64,
}

impl Default for LatinConfig {
    fn default() -> Self {
        Self {
            base: libsoftkey_core::Config::default(),
            shift_double_tap_ms: 600,
        }
    }
}

impl LatinConfig {
    /// Convert into the base config for constructing a `KeyDispatcher`.
    pub fn into_base(self) -> libsoftkey_core::Config {
        self.base
    }

    /// Get a reference to the base config.
    pub fn base(&self) -> &libsoftkey_core::Config {
        &self.base
    }

    /// Get a mutable reference to the base config.
    pub fn base_mut(&mut self) -> &mut libsoftkey_core::Config {
        &mut self.base
    }

    pub fn shift_double_tap(&self) -> Duration {
        Duration::from_millis(self.shift_double_tap_ms)
    }
}
