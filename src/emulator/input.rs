use std::io;

use super::keypad::Keypad;

/// What the input device wants after being polled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    Continue,
    Quit,
}

/// Represents an input device that is capable of providing keys in the range 0..0xF.
pub trait EmulatorInput {
    /// Bring `keypad` up to date with what is held right now.
    fn poll(&mut self, keypad: &mut Keypad) -> io::Result<Poll>;
}

/// An input device that never provides any input
pub struct DummyInput;

impl EmulatorInput for DummyInput {
    fn poll(&mut self, keypad: &mut Keypad) -> io::Result<Poll> {
        keypad.release_all();
        Ok(Poll::Continue)
    }
}

/// Replays a fixed keypad state every frame. Useful for scripted runs.
pub struct ConstantInput(pub Keypad);

impl EmulatorInput for ConstantInput {
    fn poll(&mut self, keypad: &mut Keypad) -> io::Result<Poll> {
        *keypad = self.0;
        Ok(Poll::Continue)
    }
}
