//! Scripted end-to-end demo: touches in, editor requests out.
//!
//! Builds a one-row layout, wires a dispatcher to the input engine the way a
//! platform view would, and replays a short touch script that types "hé"
//! through a dead key, then closes the keyboard.
//!
//! Run with: cargo run -p liblatin --example touch_demo

use liblatin::{
    EngineListener, InputEngine, Key, KeyDispatcher, Keycode, LatinConfig, Layout, Point, Rect,
    TouchEvent,
};
use std::time::{Duration, Instant};

fn layout() -> Layout {
    Layout::new(vec![
        Key::new(Rect::new(0, 0, 40, 40), Keycode::from_char('h')),
        Key::new(Rect::new(40, 0, 40, 40), Keycode::from_char('e')),
        Key::new(Rect::new(80, 0, 40, 40), Keycode::DEAD_ACUTE),
        Key::new(Rect::new(120, 0, 40, 40), Keycode::CANCEL),
    ])
}

fn main() {
    let mut config = LatinConfig::default();
    config.base_mut().vertical_correction = 0;

    let mut dispatcher = KeyDispatcher::new(layout(), config.base());
    let mut engine = InputEngine::new(&config);
    engine.start_session();

    let script: &[(&str, i32)] = &[
        ("h", 10),
        ("dead acute", 90),
        ("e", 50),
        ("close", 130),
    ];

    let mut clock = Instant::now();
    for (label, x) in script {
        clock += Duration::from_millis(150);
        let point = Point::new(*x, 10);
        let mut listener = EngineListener::new(&mut engine, clock);
        dispatcher.handle_touch(TouchEvent::Down(point), clock, &mut listener);
        dispatcher.handle_touch(TouchEvent::Up(point), clock, &mut listener);

        println!("tap {label}:");
        for request in engine.take_requests() {
            println!("  -> {request:?}");
        }
    }
}
