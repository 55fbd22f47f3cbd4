pub const NUM_KEYS: usize = 16;

/// State of the sixteen hexadecimal keys, refreshed by the frontend once per frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; NUM_KEYS],
}

impl Keypad {
    pub fn new() -> Keypad {
        Keypad::default()
    }

    /// Whether `key` is held, or `None` if it isn't a key at all.
    pub fn is_pressed(&self, key: u8) -> Option<bool> {
        self.keys.get(key as usize).copied()
    }

    /// Lowest held key, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|held| *held).map(|key| key as u8)
    }

    /// Out of range keys are ignored.
    pub fn press(&mut self, key: u8) {
        if let Some(held) = self.keys.get_mut(key as usize) {
            *held = true;
        }
    }

    pub fn release(&mut self, key: u8) {
        if let Some(held) = self.keys.get_mut(key as usize) {
            *held = false;
        }
    }

    pub fn set_all(&mut self, keys: [bool; NUM_KEYS]) {
        self.keys = keys;
    }

    pub fn release_all(&mut self) {
        self.keys = [false; NUM_KEYS];
    }

    pub fn as_array(&self) -> &[bool; NUM_KEYS] {
        &self.keys
    }
}
