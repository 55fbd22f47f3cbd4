use chip8_vm::emulator::keypad::{Keypad, NUM_KEYS};
use crossterm::event::KeyCode;
use std::time::{Duration, Instant};

/// Terminals report key presses (and repeats) but never releases,
/// so a key counts as held for a while after it was last reported.
pub struct KeyManager {
    hold: Duration,
    last_seen: [Option<Instant>; NUM_KEYS],
}

impl KeyManager {
    pub fn new(hold: Duration) -> KeyManager {
        KeyManager {
            hold,
            last_seen: [None; NUM_KEYS],
        }
    }

    /// Record that `key` was reported at `at`.
    pub fn press(&mut self, key: u8, at: Instant) {
        if let Some(seen) = self.last_seen.get_mut(key as usize) {
            *seen = Some(at);
        }
    }

    /// Write the keys that are still held at `now` into `keypad`.
    pub fn fill(&self, keypad: &mut Keypad, now: Instant) {
        let mut held = [false; NUM_KEYS];
        for (key, seen) in self.last_seen.iter().enumerate() {
            held[key] = seen.map_or(false, |at| now.saturating_duration_since(at) < self.hold);
        }
        keypad.set_all(held);
    }
}

/// The usual layout, with the keypad on the left of a QWERTY keyboard.
pub fn key_to_hex(key: KeyCode) -> Option<u8> {
    let c = match key {
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let hex = match c {
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        '4' => 0xC,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'r' => 0xD,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'f' => 0xE,
        'z' => 0xA,
        'x' => 0x0,
        'c' => 0xB,
        'v' => 0xF,
        _ => return None,
    };
    Some(hex)
}
