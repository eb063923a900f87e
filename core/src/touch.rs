//! Touch-to-key resolution.
//!
//! Maps a touch point to a key index (hit testing over the layout's
//! candidate set) and to one of the up-to-five zones of an extended key.
//! Both lookups degrade to "nothing" on any out-of-range input; they never
//! fail.

use crate::geometry::Point;
use crate::layout::{Key, Layout, Zone};

/// Find the key hit by `point`, if any.
///
/// Queries the layout's candidate buckets (a small set near the point, to
/// tolerate finger imprecision) and returns the first candidate whose
/// rectangle contains the point.
pub fn resolve_key(layout: &Layout, point: Point) -> Option<usize> {
    layout
        .nearest_keys(point)
        .iter()
        .copied()
        .find(|&index| layout.key(index).is_some_and(|key| key.rect.contains(point)))
}

/// Decode which zone of `key` a point selects.
///
/// Inside the rectangle is always the center zone. Outside, extended keys
/// resolve in fixed priority order: left, right, above, below. Corner
/// points therefore resolve to the horizontal zones. Plain keys have no
/// side zones.
pub fn resolve_zone(key: &Key, point: Point) -> Option<Zone> {
    if key.rect.contains(point) {
        return Some(Zone::Center);
    }
    if !key.is_extended() {
        return None;
    }
    if point.x < key.rect.left() {
        Some(Zone::Left)
    } else if point.x >= key.rect.right() {
        Some(Zone::Right)
    } else if point.y < key.rect.top() {
        Some(Zone::Top)
    } else if point.y >= key.rect.bottom() {
        Some(Zone::Bottom)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;
    use crate::keycode::Keycode;

    fn extended_key() -> Key {
        Key::extended(
            Rect::new(40, 40, 40, 40),
            [
                Keycode::from_char('a'),
                Keycode::from_char('b'),
                Keycode::from_char('c'),
                Keycode::from_char('d'),
                Keycode::from_char('e'),
            ],
        )
    }

    #[test]
    fn test_inside_is_center() {
        let key = extended_key();
        for &(x, y) in &[(40, 40), (79, 79), (60, 60), (40, 79)] {
            assert_eq!(resolve_zone(&key, Point::new(x, y)), Some(Zone::Center));
        }
    }

    #[test]
    fn test_left_beats_vertical() {
        let key = extended_key();
        // x < left with y inside the vertical span
        assert_eq!(resolve_zone(&key, Point::new(30, 60)), Some(Zone::Left));
        // corners on the left side still resolve left
        assert_eq!(resolve_zone(&key, Point::new(30, 10)), Some(Zone::Left));
        assert_eq!(resolve_zone(&key, Point::new(30, 200)), Some(Zone::Left));
    }

    #[test]
    fn test_right_beats_vertical() {
        let key = extended_key();
        assert_eq!(resolve_zone(&key, Point::new(80, 60)), Some(Zone::Right));
        assert_eq!(resolve_zone(&key, Point::new(120, 10)), Some(Zone::Right));
    }

    #[test]
    fn test_above_and_below() {
        let key = extended_key();
        assert_eq!(resolve_zone(&key, Point::new(60, 10)), Some(Zone::Top));
        assert_eq!(resolve_zone(&key, Point::new(60, 80)), Some(Zone::Bottom));
        assert_eq!(resolve_zone(&key, Point::new(60, 39)), Some(Zone::Top));
    }

    #[test]
    fn test_plain_key_outside_is_none() {
        let key = Key::new(Rect::new(40, 40, 40, 40), Keycode::from_char('a'));
        assert_eq!(resolve_zone(&key, Point::new(60, 60)), Some(Zone::Center));
        assert_eq!(resolve_zone(&key, Point::new(10, 60)), None);
        assert_eq!(resolve_zone(&key, Point::new(60, 100)), None);
    }

    #[test]
    fn test_resolve_key_hit_and_miss() {
        let layout = Layout::new(vec![
            Key::new(Rect::new(0, 0, 40, 40), Keycode::from_char('a')),
            Key::new(Rect::new(40, 0, 40, 40), Keycode::from_char('b')),
        ]);
        assert_eq!(resolve_key(&layout, Point::new(10, 10)), Some(0));
        assert_eq!(resolve_key(&layout, Point::new(50, 10)), Some(1));
        // below the row: candidates exist but none contains the point
        assert_eq!(resolve_key(&layout, Point::new(10, 100)), None);
    }

    #[test]
    fn test_resolve_key_shared_edge_goes_right() {
        let layout = Layout::new(vec![
            Key::new(Rect::new(0, 0, 40, 40), Keycode::from_char('a')),
            Key::new(Rect::new(40, 0, 40, 40), Keycode::from_char('b')),
        ]);
        // exclusive-max bounds: the shared edge belongs to the right key
        assert_eq!(resolve_key(&layout, Point::new(40, 10)), Some(1));
    }
}
