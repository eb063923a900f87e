//! liblatin crate root
//!
//! Latin-script input-method layer on top of `libsoftkey-core`. The engine
//! here is the event sink behind the dispatcher: it consumes resolved key
//! codes, runs dead-key composition, tracks shift/caps-lock and the active
//! layout variant, and queues editor requests for the host to apply to the
//! focused text field.
//!
//! Public API exported here:
//! - `InputEngine`, `EditorRequest`, `LayoutVariant` from `engine`
//! - `EngineListener`, the dispatcher-to-engine bridge
//! - `LatinConfig` from `config`

pub mod config;
pub mod engine;

pub use config::LatinConfig;
pub use engine::{EditorRequest, EngineListener, InputEngine, LayoutVariant};

// Convenience re-exports of the core types callers wire up with the engine.
pub use libsoftkey_core::{
    ComposeResult, ComposingBuffer, Config, GestureState, Key, KeyDispatcher, KeyKind, KeyListener,
    Keycode, Layout, Point, Rect, RedrawRequest, Renderer, TouchEvent, Zone,
};
