//! Gesture dispatch: the press/move/release state machine.
//!
//! `KeyDispatcher` drives a single touch gesture from press to
//! release/cancel, coordinating touch resolution and auto-repeat, and
//! emitting key codes to a `KeyListener`. The model is single-touch: at most
//! one gesture is in flight, and an overlapping press replaces the previous
//! gesture rather than interleaving with it.
//!
//! Dispatch never draws. Every entry point returns the `RedrawRequest`s it
//! produced; the host hands them to its `Renderer`.

use crate::geometry::Point;
use crate::keycode::Keycode;
use crate::layout::{Layout, Zone};
use crate::render::RedrawRequest;
use crate::repeat::RepeatScheduler;
use crate::touch;
use crate::Config;
use std::time::Instant;
use tracing::{debug, trace};

/// Listener for keyboard events, implemented by the input-method layer.
pub trait KeyListener {
    /// A key went down. Sent once per gesture, before any `on_key`.
    fn on_press(&mut self, code: Keycode);

    /// A key came up. Sent after the `on_key` it belongs to.
    fn on_release(&mut self, code: Keycode);

    /// A resolved key code to act on.
    fn on_key(&mut self, code: Keycode);

    /// A multi-character commit that bypasses per-key dispatch.
    fn on_text(&mut self, text: &str);
}

/// A touch event in keyboard-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    Cancel,
}

/// State of one in-flight gesture.
///
/// Constructed fresh on every press and destroyed on release/cancel. A press
/// that missed every key still carries a gesture (with no key) so stray
/// moves and the matching release stay tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureState {
    key: Option<usize>,
    zone: Option<Zone>,
    origin: Point,
}

impl GestureState {
    fn press(key: Option<usize>, origin: Point) -> Self {
        Self {
            key,
            zone: key.map(|_| Zone::Center),
            origin,
        }
    }

    /// Index of the pressed key, if the press landed on one.
    pub fn key(&self) -> Option<usize> {
        self.key
    }

    /// Zone currently hovered within/around the pressed key.
    pub fn zone(&self) -> Option<Zone> {
        self.zone
    }

    /// Where the press started; used to re-resolve across layout swaps.
    pub fn origin(&self) -> Point {
        self.origin
    }
}

/// The IDLE/PRESSED state machine for one touch gesture.
pub struct KeyDispatcher {
    layout: Layout,
    scheduler: RepeatScheduler,
    gesture: Option<GestureState>,
    vertical_correction: i32,
}

impl KeyDispatcher {
    pub fn new(layout: Layout, config: &Config) -> Self {
        Self {
            layout,
            scheduler: RepeatScheduler::new(config),
            gesture: None,
            vertical_correction: config.vertical_correction,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Mutable access for toggle-indicator updates.
    pub fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    /// The in-flight gesture, while one exists.
    pub fn gesture(&self) -> Option<&GestureState> {
        self.gesture.as_ref()
    }

    /// The key currently held down, for pressed-state rendering.
    pub fn pressed_key(&self) -> Option<usize> {
        self.gesture.as_ref().and_then(|g| g.key)
    }

    /// The zone currently hovered, for zone-highlight rendering.
    pub fn active_zone(&self) -> Option<Zone> {
        self.gesture.as_ref().and_then(|g| g.zone)
    }

    /// Swap the active layout (shift or mode toggling between variants).
    ///
    /// An in-flight gesture survives the swap: the pressed coordinate is
    /// re-resolved against the new layout so the corresponding key stays
    /// pressed. The whole keyboard is reported stale.
    pub fn set_layout(&mut self, layout: Layout) -> Vec<RedrawRequest> {
        self.layout = layout;
        if let Some(gesture) = self.gesture.as_mut() {
            if gesture.key.is_some() {
                gesture.key = touch::resolve_key(&self.layout, gesture.origin);
                debug!(key = ?gesture.key, "layout swapped mid-gesture");
            }
        }
        vec![RedrawRequest::All]
    }

    /// Feed one touch event through the state machine.
    pub fn handle_touch(
        &mut self,
        event: TouchEvent,
        now: Instant,
        listener: &mut dyn KeyListener,
    ) -> Vec<RedrawRequest> {
        match event {
            TouchEvent::Down(point) => self.press(self.correct(point), now, listener),
            TouchEvent::Move(point) => self.drag(self.correct(point), now),
            TouchEvent::Up(point) => self.release(self.correct(point), listener),
            TouchEvent::Cancel => self.end_gesture(),
        }
    }

    /// The instant the host should call `handle_timeout`, if a repeat is
    /// armed.
    pub fn next_timeout(&self) -> Option<Instant> {
        self.scheduler.next_timeout()
    }

    /// Fire the repeat schedule if due. Early or spurious calls are no-ops.
    pub fn handle_timeout(&mut self, now: Instant, listener: &mut dyn KeyListener) {
        if self.scheduler.fire(now) {
            trace!("repeat fired");
            self.send_current_code(listener);
        }
    }

    // Fingers land below where the user aims; nudge the touch upward.
    fn correct(&self, point: Point) -> Point {
        Point::new(point.x, point.y + self.vertical_correction)
    }

    fn press(
        &mut self,
        point: Point,
        now: Instant,
        listener: &mut dyn KeyListener,
    ) -> Vec<RedrawRequest> {
        let mut redraws = Vec::new();
        if self.gesture.is_some() {
            // single-touch model: an overlapping press replaces the gesture
            redraws.extend(self.end_gesture());
        }

        let hit = touch::resolve_key(&self.layout, point);
        self.gesture = Some(GestureState::press(hit, point));

        if let Some(index) = hit {
            let Some((primary, repeatable)) = self
                .layout
                .key(index)
                .map(|key| (key.primary(), key.repeatable))
            else {
                return redraws;
            };
            debug!(index, code = primary.0, "key pressed");
            listener.on_press(primary);
            redraws.push(RedrawRequest::Key(index));
            self.scheduler.start(repeatable, now);
            if repeatable {
                // press-to-emit keys (delete, cursor movement)
                self.send_current_code(listener);
            }
        } else {
            debug!(x = point.x, y = point.y, "press hit no key");
        }
        redraws
    }

    fn drag(&mut self, point: Point, now: Instant) -> Vec<RedrawRequest> {
        // a move in IDLE (platform event duplication) is a no-op
        let Some(gesture) = self.gesture else {
            return Vec::new();
        };
        let Some(index) = gesture.key else {
            return Vec::new();
        };
        let Some(key) = self.layout.key(index) else {
            return Vec::new();
        };

        let zone = touch::resolve_zone(key, point);
        let repeatable = key.repeatable;
        if zone != gesture.zone {
            if let Some(g) = self.gesture.as_mut() {
                g.zone = zone;
            }
            debug!(index, ?zone, "zone changed");
            // repeat timing always reflects the currently hovered zone
            self.scheduler.cancel();
            self.scheduler.start(repeatable, now);
            return vec![RedrawRequest::Key(index)];
        }
        Vec::new()
    }

    fn release(&mut self, point: Point, listener: &mut dyn KeyListener) -> Vec<RedrawRequest> {
        // a release in IDLE is a no-op
        let Some(gesture) = self.gesture else {
            return Vec::new();
        };
        if let Some(index) = gesture.key {
            if !self.scheduler.is_repeating() {
                // the zone under the lifting finger decides what is typed
                if let Some(zone) = self
                    .layout
                    .key(index)
                    .map(|key| touch::resolve_zone(key, point))
                {
                    if let Some(g) = self.gesture.as_mut() {
                        g.zone = zone;
                    }
                    self.send_current_code(listener);
                }
            }
        }
        self.end_gesture()
    }

    fn end_gesture(&mut self) -> Vec<RedrawRequest> {
        self.scheduler.cancel();
        match self.gesture.take() {
            Some(gesture) => {
                trace!(key = ?gesture.key, "gesture ended");
                gesture.key.map(RedrawRequest::Key).into_iter().collect()
            }
            None => Vec::new(),
        }
    }

    fn send_current_code(&self, listener: &mut dyn KeyListener) {
        let Some(gesture) = self.gesture else {
            return;
        };
        let Some(index) = gesture.key else {
            return;
        };
        let code = match (self.layout.key(index), gesture.zone) {
            (Some(key), Some(zone)) => key.code(zone),
            _ => Keycode::NOT_USED,
        };
        // unused side zones are a no-op
        if code.is_used() {
            listener.on_key(code);
            listener.on_release(code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::layout::Key;

    #[derive(Default)]
    struct Recorder {
        keys: Vec<Keycode>,
        presses: Vec<Keycode>,
        releases: Vec<Keycode>,
    }

    impl KeyListener for Recorder {
        fn on_press(&mut self, code: Keycode) {
            self.presses.push(code);
        }
        fn on_release(&mut self, code: Keycode) {
            self.releases.push(code);
        }
        fn on_key(&mut self, code: Keycode) {
            self.keys.push(code);
        }
        fn on_text(&mut self, _text: &str) {}
    }

    fn test_config() -> Config {
        Config {
            vertical_correction: 0,
            ..Config::default()
        }
    }

    fn dispatcher() -> KeyDispatcher {
        let layout = Layout::new(vec![
            Key::new(Rect::new(0, 0, 40, 40), Keycode::from_char('a')),
            Key::new(Rect::new(40, 0, 40, 40), Keycode::DELETE).repeating(),
        ]);
        KeyDispatcher::new(layout, &test_config())
    }

    #[test]
    fn test_press_release_emits_once() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle_touch(TouchEvent::Down(Point::new(10, 10)), now, &mut rec);
        assert_eq!(rec.presses, vec![Keycode::from_char('a')]);
        assert!(rec.keys.is_empty());
        d.handle_touch(TouchEvent::Up(Point::new(10, 10)), now, &mut rec);
        assert_eq!(rec.keys, vec![Keycode::from_char('a')]);
        assert_eq!(rec.releases, vec![Keycode::from_char('a')]);
        assert!(d.gesture().is_none());
    }

    #[test]
    fn test_repeatable_emits_on_press() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        d.handle_touch(
            TouchEvent::Down(Point::new(50, 10)),
            Instant::now(),
            &mut rec,
        );
        assert_eq!(rec.keys, vec![Keycode::DELETE]);
    }

    #[test]
    fn test_events_in_idle_are_noops() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle_touch(TouchEvent::Move(Point::new(10, 10)), now, &mut rec);
        d.handle_touch(TouchEvent::Up(Point::new(10, 10)), now, &mut rec);
        d.handle_timeout(now, &mut rec);
        assert!(rec.keys.is_empty());
        assert!(rec.presses.is_empty());
        assert!(rec.releases.is_empty());
    }

    #[test]
    fn test_missed_press_tracks_gesture_silently() {
        let mut d = dispatcher();
        let mut rec = Recorder::default();
        let now = Instant::now();
        d.handle_touch(TouchEvent::Down(Point::new(10, 200)), now, &mut rec);
        assert!(d.gesture().is_some());
        assert_eq!(d.pressed_key(), None);
        assert_eq!(d.next_timeout(), None);
        d.handle_touch(TouchEvent::Up(Point::new(10, 200)), now, &mut rec);
        assert!(d.gesture().is_none());
        assert!(rec.keys.is_empty() && rec.presses.is_empty());
    }

    #[test]
    fn test_vertical_correction_applies() {
        let layout = Layout::new(vec![Key::new(
            Rect::new(0, 0, 40, 40),
            Keycode::from_char('a'),
        )]);
        let mut d = KeyDispatcher::new(layout, &Config::default());
        let mut rec = Recorder::default();
        // y = 45 corrects to 35, inside the key
        d.handle_touch(
            TouchEvent::Down(Point::new(10, 45)),
            Instant::now(),
            &mut rec,
        );
        assert_eq!(d.pressed_key(), Some(0));
    }
}
