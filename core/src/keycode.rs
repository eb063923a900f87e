//! Signed key codes and the reserved command range.
//!
//! Non-negative codes are the Unicode scalar values of printable characters;
//! negative codes are reserved commands understood by the input-method layer.
//! `NOT_USED` is the sentinel for a side zone with no assigned action and is
//! never emitted by dispatch.

use serde::{Deserialize, Serialize};

/// A key code carried by keyboard events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Keycode(pub i32);

impl Keycode {
    pub const SHIFT: Keycode = Keycode(-1);
    pub const MODE_CHANGE: Keycode = Keycode(-2);
    pub const CANCEL: Keycode = Keycode(-3);
    pub const DELETE: Keycode = Keycode(-5);
    pub const CURSOR_LEFT: Keycode = Keycode(-70);
    pub const CURSOR_RIGHT: Keycode = Keycode(-71);
    pub const CURSOR_END: Keycode = Keycode(-72);
    pub const CURSOR_HOME: Keycode = Keycode(-73);
    /// Sentinel: this zone has no assigned action.
    pub const NOT_USED: Keycode = Keycode(-99);
    pub const OPTIONS: Keycode = Keycode(-100);
    pub const DEAD_ACUTE: Keycode = Keycode(-120);
    pub const DEAD_GRAVE: Keycode = Keycode(-121);
    pub const DEAD_DIAERESIS: Keycode = Keycode(-122);
    pub const DEAD_CIRCUMFLEX: Keycode = Keycode(-123);
    pub const DEAD_TILDE: Keycode = Keycode(-124);

    pub fn from_char(ch: char) -> Self {
        Keycode(ch as i32)
    }

    /// The printable character for a non-negative code.
    pub fn to_char(self) -> Option<char> {
        u32::try_from(self.0).ok().and_then(char::from_u32)
    }

    /// Whether this is a reserved command code.
    pub fn is_command(self) -> bool {
        self.0 < 0
    }

    /// Whether the code carries an action at all.
    pub fn is_used(self) -> bool {
        self != Self::NOT_USED
    }

    /// The spacing accent character for a dead-key code.
    pub fn accent(self) -> Option<char> {
        match self {
            Self::DEAD_ACUTE => Some('\u{00b4}'),
            Self::DEAD_GRAVE => Some('`'),
            Self::DEAD_DIAERESIS => Some('\u{00a8}'),
            Self::DEAD_CIRCUMFLEX => Some('^'),
            Self::DEAD_TILDE => Some('~'),
            _ => None,
        }
    }
}

impl From<char> for Keycode {
    fn from(ch: char) -> Self {
        Keycode::from_char(ch)
    }
}
