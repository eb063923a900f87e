//! Dead-key accent composition.
//!
//! Holds at most one pending accent character. Combination maps the spacing
//! accent to its combining mark and asks Unicode NFC whether mark plus base
//! fuse into a single precomposed character; anything NFC cannot fuse is not
//! a combination. The buffer never holds more than one character.

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

/// Outcome of offering a character to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposeResult {
    /// Nothing was pending; handle the character normally.
    NotComposing,
    /// The accent fused with the character. The result is now the pending
    /// character and should replace the provisional display.
    Combined(char),
    /// No combination exists. The returned pending character must be
    /// committed as literal text, then the offered character handled
    /// normally.
    Flushed(char),
}

/// Single-character diacritic composition buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposingBuffer {
    pending: Option<char>,
}

impl ComposingBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> Option<char> {
        self.pending
    }

    pub fn is_composing(&self) -> bool {
        self.pending.is_some()
    }

    /// Store one pending accent. A second accent replaces the first; the
    /// provisional display follows.
    pub fn set_pending(&mut self, accent: char) {
        self.pending = Some(accent);
        debug!(%accent, "accent pending");
    }

    /// Offer the next typed character for combination.
    pub fn compose(&mut self, next: char) -> ComposeResult {
        let Some(accent) = self.pending else {
            return ComposeResult::NotComposing;
        };
        match combine(accent, next) {
            Some(composed) => {
                self.pending = Some(composed);
                debug!(%composed, "accent combined");
                ComposeResult::Combined(composed)
            }
            None => {
                self.pending = None;
                ComposeResult::Flushed(accent)
            }
        }
    }

    /// Commit: take the pending character for the host to insert as literal
    /// text, clearing the buffer.
    pub fn flush(&mut self) -> Option<char> {
        self.pending.take()
    }

    /// Drop pending state without committing (external cursor movement,
    /// session reset).
    pub fn clear(&mut self) {
        self.pending = None;
    }
}

/// The combining diacritical mark for a spacing accent character.
fn combining_mark(accent: char) -> Option<char> {
    match accent {
        '\u{00b4}' => Some('\u{0301}'), // acute
        '`' => Some('\u{0300}'),        // grave
        '\u{00a8}' => Some('\u{0308}'), // diaeresis
        '^' => Some('\u{0302}'),        // circumflex
        '~' => Some('\u{0303}'),        // tilde
        _ => None,
    }
}

/// Fuse accent and base via NFC. Only a single-scalar result counts as a
/// combination.
fn combine(accent: char, base: char) -> Option<char> {
    let mark = combining_mark(accent)?;
    let mut fused = [base, mark].into_iter().nfc();
    let first = fused.next()?;
    if fused.next().is_none() {
        Some(first)
    } else {
        None
    }
}
