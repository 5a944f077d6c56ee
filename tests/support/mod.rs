#![allow(dead_code)]

use kbdump::event_codes::EV_KEY;
use kbdump::InputEvent;

pub const PRESS: i32 = 1;
pub const RELEASE: i32 = 0;
pub const REPEAT: i32 = 2;

pub fn key(secs: u64, code: u16, value: i32) -> InputEvent {
    InputEvent {
        secs,
        micros: 0,
        kind: EV_KEY,
        code,
        value,
    }
}

/// Encode `events` as the byte stream a device would produce.
pub fn stream(events: &[InputEvent]) -> Vec<u8> {
    events.iter().flat_map(|ev| ev.encode()).collect()
}
