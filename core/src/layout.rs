//! Key and layout model with a spatial candidate index.
//!
//! A `Layout` owns an ordered list of `Key`s and answers
//! nearest-keys-by-position queries through a fixed grid of candidate
//! buckets. Layout definitions themselves (which keys exist, where, with
//! which codes) are opaque external data; this module only consumes them.

use crate::geometry::{Point, Rect};
use crate::keycode::Keycode;
use serde::{Deserialize, Serialize};

/// One of the up-to-five regions of an extended key.
///
/// The numeric order matches the key's code list: center, left, top, right,
/// bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Center,
    Left,
    Top,
    Right,
    Bottom,
}

impl Zone {
    /// Index into `Key::codes`.
    pub fn code_index(self) -> usize {
        match self {
            Zone::Center => 0,
            Zone::Left => 1,
            Zone::Top => 2,
            Zone::Right => 3,
            Zone::Bottom => 4,
        }
    }
}

/// Behavior capability of a key.
///
/// Toggle-capable keys (shift lock, mode indicators) latch a visible on/off
/// state; that state lives in the layout, not in the key itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyKind {
    #[default]
    Plain,
    Toggle,
}

/// One key of a layout: a rectangle plus one or five codes.
///
/// Five-code keys are extended keys: `codes[0]` is the center meaning and
/// `codes[1..5]` are the left/top/right/bottom side meanings, in zone order.
/// Side zones without a real meaning carry `Keycode::NOT_USED`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub rect: Rect,
    pub codes: Vec<Keycode>,
    /// Repeatable keys emit on press and auto-repeat with the short delay.
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub kind: KeyKind,
}

impl Key {
    /// A plain single-code key.
    pub fn new(rect: Rect, code: Keycode) -> Self {
        Self {
            rect,
            codes: vec![code],
            repeatable: false,
            kind: KeyKind::Plain,
        }
    }

    /// An extended key with a center code and four side codes, in
    /// left/top/right/bottom order after the center.
    pub fn extended(rect: Rect, codes: [Keycode; 5]) -> Self {
        Self {
            rect,
            codes: codes.to_vec(),
            repeatable: false,
            kind: KeyKind::Plain,
        }
    }

    /// Mark the key as auto-repeating from the press (delete, cursor keys).
    pub fn repeating(mut self) -> Self {
        self.repeatable = true;
        self
    }

    /// Mark the key as carrying a latched on/off indicator.
    pub fn toggle(mut self) -> Self {
        self.kind = KeyKind::Toggle;
        self
    }

    pub fn is_extended(&self) -> bool {
        self.codes.len() == 5
    }

    /// Primary (center) code.
    pub fn primary(&self) -> Keycode {
        self.codes.first().copied().unwrap_or(Keycode::NOT_USED)
    }

    /// Code assigned to `zone`; `NOT_USED` when the zone has no meaning on
    /// this key.
    pub fn code(&self, zone: Zone) -> Keycode {
        self.codes
            .get(zone.code_index())
            .copied()
            .unwrap_or(Keycode::NOT_USED)
    }
}

// Candidate grid dimensions for nearest-key queries.
const GRID_COLUMNS: i32 = 10;
const GRID_ROWS: i32 = 5;

/// An ordered collection of keys plus the candidate grid.
///
/// Swappable at runtime; the dispatcher re-resolves an in-flight gesture
/// against the new layout on swap.
#[derive(Debug, Clone)]
pub struct Layout {
    keys: Vec<Key>,
    toggled: Vec<bool>,
    width: i32,
    height: i32,
    cell_width: i32,
    cell_height: i32,
    cells: Vec<Vec<usize>>,
}

impl Layout {
    /// Build a layout from externally provided keys.
    ///
    /// Width and height derive from the keys' bounding box. The candidate
    /// grid is built eagerly: every key lands in each bucket its rectangle
    /// overlaps, so a contained point always sees its key among the
    /// candidates.
    pub fn new(keys: Vec<Key>) -> Self {
        let width = keys.iter().map(|k| k.rect.right()).max().unwrap_or(0).max(1);
        let height = keys
            .iter()
            .map(|k| k.rect.bottom())
            .max()
            .unwrap_or(0)
            .max(1);
        let cell_width = ((width + GRID_COLUMNS - 1) / GRID_COLUMNS).max(1);
        let cell_height = ((height + GRID_ROWS - 1) / GRID_ROWS).max(1);

        let mut cells = vec![Vec::new(); (GRID_COLUMNS * GRID_ROWS) as usize];
        for (index, key) in keys.iter().enumerate() {
            let first_col = (key.rect.left() / cell_width).clamp(0, GRID_COLUMNS - 1);
            let last_col = ((key.rect.right() - 1) / cell_width).clamp(0, GRID_COLUMNS - 1);
            let first_row = (key.rect.top() / cell_height).clamp(0, GRID_ROWS - 1);
            let last_row = ((key.rect.bottom() - 1) / cell_height).clamp(0, GRID_ROWS - 1);
            for row in first_row..=last_row {
                for col in first_col..=last_col {
                    cells[(row * GRID_COLUMNS + col) as usize].push(index);
                }
            }
        }

        let toggled = vec![false; keys.len()];
        Self {
            keys,
            toggled,
            width,
            height,
            cell_width,
            cell_height,
            cells,
        }
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn key(&self, index: usize) -> Option<&Key> {
        self.keys.get(index)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Candidate key indices near a position.
    ///
    /// This is a pre-filter, not an answer: callers still test containment.
    /// Points outside the layout clamp to the border buckets so edge
    /// overshoot still sees the border keys.
    pub fn nearest_keys(&self, point: Point) -> &[usize] {
        let col = (point.x / self.cell_width).clamp(0, GRID_COLUMNS - 1);
        let row = (point.y / self.cell_height).clamp(0, GRID_ROWS - 1);
        &self.cells[(row * GRID_COLUMNS + col) as usize]
    }

    /// Set the on/off indicator of every toggle-capable key whose primary
    /// code is `code`. Plain keys are left untouched.
    pub fn set_toggled(&mut self, code: Keycode, on: bool) {
        for (index, key) in self.keys.iter().enumerate() {
            if key.kind == KeyKind::Toggle && key.primary() == code {
                self.toggled[index] = on;
            }
        }
    }

    /// Whether a key's latched indicator is currently on.
    pub fn is_toggled(&self, index: usize) -> bool {
        self.toggled.get(index).copied().unwrap_or(false)
    }
}
