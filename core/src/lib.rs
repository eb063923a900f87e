//! libsoftkey-core
//!
//! Touch resolution, gesture dispatch, auto-repeat and dead-key composition
//! shared by softkey frontends (liblatin).
//!
//! The crate is the render-independent half of a virtual keyboard: it maps a
//! continuous touch coordinate stream to discrete key codes, including
//! five-zone extended keys reachable by dragging past a key's edge, and
//! hands the codes to an input-method layer. Everything runs on one logical
//! UI thread; the only asynchronous piece is the repeat deadline the host
//! event loop polls.
//!
//! Public API:
//! - `Layout`, `Key`, `Zone` - key model with a spatial candidate index
//! - `KeyDispatcher`, `KeyListener`, `TouchEvent` - the gesture state machine
//! - `RepeatScheduler` - auto-repeat deadlines
//! - `ComposingBuffer` - single-character diacritic composition
//! - `Renderer`, `RedrawRequest` - redraw capability for hosts
//! - `Config` - named timing and touch tuning values

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod geometry;
pub use geometry::{Point, Rect};

pub mod keycode;
pub use keycode::Keycode;

pub mod layout;
pub use layout::{Key, KeyKind, Layout, Zone};

pub mod touch;
pub use touch::{resolve_key, resolve_zone};

pub mod repeat;
pub use repeat::RepeatScheduler;

pub mod dispatch;
pub use dispatch::{GestureState, KeyDispatcher, KeyListener, TouchEvent};

pub mod render;
pub use render::{RedrawRequest, Renderer, ZoneAnchor};

pub mod compose;
pub use compose::{ComposeResult, ComposingBuffer};

/// Timing and touch tuning for the dispatch core.
///
/// Every value is an independent knob; none is derived from another. The
/// defaults come from hand tuning on real hardware.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Interval between auto-repeat emissions while a key is held, in ms.
    pub repeat_interval_ms: u64,

    /// Initial delay before an explicitly repeatable key (delete, cursor
    /// movement) starts repeating, in ms.
    pub repeat_start_delay_ms: u64,

    /// Initial delay before a character key starts repeating, in ms.
    /// Longer than `repeat_start_delay_ms` so dragging toward a side zone
    /// does not fire an accidental repeat first.
    pub char_repeat_start_delay_ms: u64,

    /// Correction added to incoming touch y coordinates, in px. Negative
    /// values shift touches upward, where users actually aim.
    pub vertical_correction: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // ~16 repeats per second once repeating
            repeat_interval_ms: 60,
            repeat_start_delay_ms: 400,
            char_repeat_start_delay_ms: 800,
            vertical_correction: -10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        use anyhow::Context;
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        Ok(toml::from_str(&content)?)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        use anyhow::Context;
        let path = path.as_ref();
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).with_context(|| format!("write config {}", path.display()))?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms)
    }

    pub fn repeat_start_delay(&self) -> Duration {
        Duration::from_millis(self.repeat_start_delay_ms)
    }

    pub fn char_repeat_start_delay(&self) -> Duration {
        Duration::from_millis(self.char_repeat_start_delay_ms)
    }
}
