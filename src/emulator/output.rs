use std::io;

use super::framebuffer::Framebuffer;

/// Represents an output device that the framebuffer can be presented on.
pub trait EmulatorOutput {
    fn present(&mut self, framebuffer: &Framebuffer) -> io::Result<()>;

    /// Called once per frame with whether the sound timer is running.
    fn beep(&mut self, _active: bool) -> io::Result<()> {
        Ok(())
    }
}

/// A simple output device that keeps the last presented frame.
pub struct DummyOutput {
    last: Framebuffer,
    frames: u64,
}

impl DummyOutput {
    pub fn new() -> DummyOutput {
        DummyOutput {
            last: Framebuffer::new(),
            frames: 0,
        }
    }

    pub fn last_frame(&self) -> &Framebuffer {
        &self.last
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Default for DummyOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl EmulatorOutput for DummyOutput {
    fn present(&mut self, framebuffer: &Framebuffer) -> io::Result<()> {
        self.last.clone_from(framebuffer);
        self.frames += 1;
        Ok(())
    }
}
