//! Input engine: the event sink behind the dispatcher.
//!
//! `InputEngine` implements the input-method side of the keyboard. It takes
//! resolved key codes, runs dead-key composition, tracks shift/caps-lock and
//! the active layout variant, and queues `EditorRequest`s describing what
//! should happen to the focused text field. There are no host callbacks:
//! the host drains the queue after each processed event and reads the
//! engine's state (variant, caps lock) to keep the visible keyboard in sync.

use crate::config::LatinConfig;
use libsoftkey_core::{ComposeResult, ComposingBuffer, KeyListener, Keycode};
use std::time::{Duration, Instant};
use tracing::debug;

/// One request for the host editor.
///
/// `SetComposing` text is provisional: it is shown at the cursor (typically
/// underlined) and replaced by the next `SetComposing` or `Commit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorRequest {
    /// Commit literal text at the cursor, replacing provisional text.
    Commit(String),
    /// Show provisional (composing) text at the cursor.
    SetComposing(String),
    /// Drop provisional text without committing it.
    ClearComposing,
    /// Freeze provisional text as committed where it stands.
    FinishComposing,
    /// Delete one character before the cursor.
    DeleteBackward,
    /// Move the cursor one position left.
    CursorLeft,
    /// Move the cursor one position right.
    CursorRight,
    /// Move the cursor to the start of the field.
    CursorHome,
    /// Move the cursor to the end of the field.
    CursorEnd,
    /// Dismiss the keyboard.
    HideKeyboard,
}

/// Which of the four layout variants should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutVariant {
    #[default]
    Alpha,
    AlphaShifted,
    Numeral,
    NumeralShifted,
}

impl LayoutVariant {
    pub fn is_numeral(self) -> bool {
        matches!(self, LayoutVariant::Numeral | LayoutVariant::NumeralShifted)
    }

    pub fn is_shifted(self) -> bool {
        matches!(
            self,
            LayoutVariant::AlphaShifted | LayoutVariant::NumeralShifted
        )
    }

    /// The shifted or unshifted sibling within the same family.
    fn with_shift(self, shifted: bool) -> Self {
        match (self.is_numeral(), shifted) {
            (false, false) => LayoutVariant::Alpha,
            (false, true) => LayoutVariant::AlphaShifted,
            (true, false) => LayoutVariant::Numeral,
            (true, true) => LayoutVariant::NumeralShifted,
        }
    }
}

/// The input-method layer for a Latin-script keyboard.
pub struct InputEngine {
    composing: ComposingBuffer,
    variant: LayoutVariant,
    caps_lock: bool,
    last_shift: Option<Instant>,
    shift_double_tap: Duration,
    requests: Vec<EditorRequest>,
}

impl InputEngine {
    pub fn new(config: &LatinConfig) -> Self {
        Self {
            composing: ComposingBuffer::new(),
            variant: LayoutVariant::Alpha,
            caps_lock: false,
            last_shift: None,
            shift_double_tap: config.shift_double_tap(),
            requests: Vec::new(),
        }
    }

    /// The layout variant the host should display.
    pub fn variant(&self) -> LayoutVariant {
        self.variant
    }

    pub fn is_shifted(&self) -> bool {
        self.variant.is_shifted()
    }

    pub fn caps_lock(&self) -> bool {
        self.caps_lock
    }

    /// The character shown provisionally while an accent is pending.
    pub fn pending_accent(&self) -> Option<char> {
        self.composing.pending()
    }

    /// Drain the editor requests produced by the events processed so far.
    pub fn take_requests(&mut self) -> Vec<EditorRequest> {
        std::mem::take(&mut self.requests)
    }

    /// Begin editing a new field. The previous field's pending state must
    /// not leak into it.
    pub fn start_session(&mut self) {
        self.composing.clear();
        debug!("input session started");
    }

    /// Stop editing the current field. Shift, caps lock and the variant all
    /// return to their resting state; the next field starts fresh.
    pub fn finish_session(&mut self) {
        self.composing.clear();
        self.variant = LayoutVariant::Alpha;
        self.caps_lock = false;
        self.last_shift = None;
        debug!("input session finished");
    }

    /// The editor's cursor moved for a reason other than this engine.
    ///
    /// A pending accent must not combine across the jump: drop it without
    /// committing and freeze whatever was displayed provisionally.
    pub fn cursor_moved(&mut self) {
        if self.composing.is_composing() {
            self.composing.clear();
            self.requests.push(EditorRequest::FinishComposing);
            debug!("external cursor move cleared pending accent");
        }
    }

    /// Process one resolved key code. `now` feeds shift double-tap
    /// detection.
    pub fn process_key(&mut self, code: Keycode, now: Instant) {
        match code {
            Keycode::DELETE => self.handle_backspace(),
            Keycode::SHIFT => self.handle_shift(now),
            Keycode::MODE_CHANGE => self.handle_mode_change(),
            Keycode::CANCEL => self.handle_close(),
            Keycode::OPTIONS => {} // the host surfaces its own options UI
            Keycode::CURSOR_LEFT => self.requests.push(EditorRequest::CursorLeft),
            Keycode::CURSOR_RIGHT => self.requests.push(EditorRequest::CursorRight),
            Keycode::CURSOR_HOME => self.requests.push(EditorRequest::CursorHome),
            Keycode::CURSOR_END => self.requests.push(EditorRequest::CursorEnd),
            _ => {
                if let Some(accent) = code.accent() {
                    self.handle_dead_key(accent);
                } else if let Some(ch) = code.to_char() {
                    self.handle_char(ch);
                }
                // unknown command codes are dropped, not errors
            }
        }
    }

    /// Bulk text commit (multi-character gestures), bypassing per-key
    /// handling.
    pub fn process_text(&mut self, text: &str) {
        if let Some(pending) = self.composing.flush() {
            self.requests.push(EditorRequest::Commit(pending.to_string()));
        }
        self.requests.push(EditorRequest::Commit(text.to_string()));
        self.release_one_shot_shift();
    }

    fn handle_char(&mut self, ch: char) {
        match self.composing.compose(ch) {
            ComposeResult::NotComposing => {
                self.requests.push(EditorRequest::Commit(ch.to_string()));
            }
            ComposeResult::Combined(composed) => {
                self.requests
                    .push(EditorRequest::SetComposing(composed.to_string()));
            }
            ComposeResult::Flushed(pending) => {
                self.requests.push(EditorRequest::Commit(pending.to_string()));
                self.requests.push(EditorRequest::Commit(ch.to_string()));
            }
        }
        self.release_one_shot_shift();
    }

    fn handle_dead_key(&mut self, accent: char) {
        self.composing.set_pending(accent);
        self.requests
            .push(EditorRequest::SetComposing(accent.to_string()));
    }

    fn handle_backspace(&mut self) {
        // with an accent pending, backspace cancels the accent only
        if self.composing.is_composing() {
            self.composing.clear();
            self.requests.push(EditorRequest::ClearComposing);
        } else {
            self.requests.push(EditorRequest::DeleteBackward);
        }
    }

    fn handle_shift(&mut self, now: Instant) {
        // a second tap within the window latches caps lock
        let double_tap = self
            .last_shift
            .is_some_and(|last| now.saturating_duration_since(last) <= self.shift_double_tap);
        self.last_shift = Some(now);
        self.caps_lock = double_tap;
        let shifted = self.caps_lock || !self.variant.is_shifted();
        self.variant = self.variant.with_shift(shifted);
        debug!(caps_lock = self.caps_lock, shifted, "shift");
    }

    fn handle_mode_change(&mut self) {
        // mode change always drops shift state
        self.variant = if self.variant.is_numeral() {
            LayoutVariant::Alpha
        } else {
            LayoutVariant::Numeral
        };
        self.caps_lock = false;
        self.last_shift = None;
        debug!(variant = ?self.variant, "mode change");
    }

    fn handle_close(&mut self) {
        // commit anything pending before the keyboard goes away
        if let Some(pending) = self.composing.flush() {
            self.requests.push(EditorRequest::Commit(pending.to_string()));
        }
        self.requests.push(EditorRequest::HideKeyboard);
    }

    fn release_one_shot_shift(&mut self) {
        // caps lock survives typing; a single shift applies to one character
        if self.variant.is_shifted() && !self.caps_lock {
            self.variant = self.variant.with_shift(false);
        }
    }
}

/// Adapter wiring a `KeyDispatcher` to an `InputEngine` for one event
/// delivery.
///
/// Press/release notifications carry no editor action at this layer and are
/// ignored; only resolved codes and bulk text reach the engine.
pub struct EngineListener<'a> {
    engine: &'a mut InputEngine,
    now: Instant,
}

impl<'a> EngineListener<'a> {
    pub fn new(engine: &'a mut InputEngine, now: Instant) -> Self {
        Self { engine, now }
    }
}

impl KeyListener for EngineListener<'_> {
    fn on_press(&mut self, _code: Keycode) {}

    fn on_release(&mut self, _code: Keycode) {}

    fn on_key(&mut self, code: Keycode) {
        self.engine.process_key(code, self.now);
    }

    fn on_text(&mut self, text: &str) {
        self.engine.process_text(text);
    }
}
