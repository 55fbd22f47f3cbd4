//! The frame loop that sits between the emulator and a frontend.
//!
//! Every frame the input is polled into the keypad, a fixed number of
//! instructions run, the timers tick once and the framebuffer is presented.

use std::thread;
use std::time::{Duration, Instant};

use crate::emulator::input::{EmulatorInput, Poll};
use crate::emulator::output::EmulatorOutput;
use crate::emulator::{Emulator, Result};

/// How fast the emulated machine runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverConfig {
    pub instructions_per_frame: u32,
    pub frames_per_second: u32,
}

impl DriverConfig {
    pub fn frame_duration(&self) -> Duration {
        Duration::from_secs(1) / self.frames_per_second.max(1)
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            instructions_per_frame: 10,
            frames_per_second: 60,
        }
    }
}

pub struct Driver<I: EmulatorInput, O: EmulatorOutput> {
    emulator: Emulator,
    input: I,
    output: O,
    config: DriverConfig,
    frames: u64,
}

impl<I: EmulatorInput, O: EmulatorOutput> Driver<I, O> {
    pub fn new(emulator: Emulator, input: I, output: O, config: DriverConfig) -> Driver<I, O> {
        Driver {
            emulator,
            input,
            output,
            config,
            frames: 0,
        }
    }

    /// Run a single frame without sleeping.
    pub fn run_frame(&mut self) -> Result<Poll> {
        if self.input.poll(self.emulator.keypad_mut())? == Poll::Quit {
            return Ok(Poll::Quit);
        }

        for _ in 0..self.config.instructions_per_frame {
            self.emulator.step()?;
        }
        self.emulator.tick();

        self.output.present(self.emulator.framebuffer())?;
        self.output.beep(self.emulator.sound_active())?;
        self.frames += 1;
        Ok(Poll::Continue)
    }

    /// Run frames at the configured rate until the input asks to quit,
    /// or `limit` frames have run.
    pub fn run(&mut self, limit: Option<u64>) -> Result<()> {
        let frame_duration = self.config.frame_duration();
        while limit.map_or(true, |limit| self.frames < limit) {
            let frame_start = Instant::now();

            match self.run_frame() {
                Ok(Poll::Continue) => {}
                Ok(Poll::Quit) => break,
                Err(err) => {
                    log::warn!("Stopping after {} frames: {}", self.frames, err);
                    return Err(err);
                }
            }

            if let Some(remaining) = frame_duration.checked_sub(frame_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
        log::info!("Ran {} frames", self.frames);
        Ok(())
    }

    pub fn emulator(&self) -> &Emulator {
        &self.emulator
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emulator::input::{ConstantInput, DummyInput};
    use crate::emulator::output::DummyOutput;
    use crate::emulator::{Error, Keypad};
    use pretty_assertions::assert_eq;
    use std::io;

    fn fast() -> DriverConfig {
        DriverConfig {
            instructions_per_frame: 10,
            frames_per_second: 1000,
        }
    }

    struct QuitAfter(u32);

    impl EmulatorInput for QuitAfter {
        fn poll(&mut self, _: &mut Keypad) -> io::Result<Poll> {
            if self.0 == 0 {
                return Ok(Poll::Quit);
            }
            self.0 -= 1;
            Ok(Poll::Continue)
        }
    }

    #[test]
    fn frame_runs_instructions_then_ticks_once() {
        // Set the delay timer to 100 once, then spin
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0x60, 100, 0xF0, 0x15, 0x12, 0x04]).unwrap();
        let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), fast());

        assert_eq!(driver.run_frame().unwrap(), Poll::Continue);
        assert_eq!(driver.emulator().delay_timer(), 99);
        assert_eq!(driver.output().frames(), 1);

        driver.run_frame().unwrap();
        assert_eq!(driver.emulator().delay_timer(), 98);
    }

    #[test]
    fn presents_the_framebuffer() {
        // Draw the glyph for 0 at (0, 0), then spin
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0xA0, 0x50, 0xD0, 0x05, 0x12, 0x04]).unwrap();
        let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), fast());
        driver.run_frame().unwrap();
        assert!(driver.output().last_frame().get(0, 0));
        assert_eq!(driver.output().last_frame(), driver.emulator().framebuffer());
    }

    #[test]
    fn keypad_is_refreshed_before_stepping() {
        let mut keys = Keypad::new();
        keys.press(0x7);
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0xF3, 0x0A, 0x12, 0x02]).unwrap();
        let mut driver = Driver::new(emulator, ConstantInput(keys), DummyOutput::new(), fast());
        driver.run_frame().unwrap();
        assert_eq!(driver.emulator().registers()[0x3], 0x7);
    }

    #[test]
    fn run_stops_when_input_quits() {
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0x12, 0x00]).unwrap();
        let mut driver = Driver::new(emulator, QuitAfter(3), DummyOutput::new(), fast());
        driver.run(None).unwrap();
        assert_eq!(driver.frames(), 3);
    }

    #[test]
    fn run_stops_at_limit() {
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0x12, 0x00]).unwrap();
        let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), fast());
        driver.run(Some(2)).unwrap();
        assert_eq!(driver.frames(), 2);
    }

    #[test]
    fn faults_end_the_run() {
        let mut emulator = Emulator::with_seed(1);
        emulator.load(&[0x00, 0xEE]).unwrap();
        let mut driver = Driver::new(emulator, DummyInput, DummyOutput::new(), fast());
        let err = driver.run(None).unwrap_err();
        assert!(matches!(err, Error::StackUnderflow { pc: 0x200 }));
        assert_eq!(driver.frames(), 0);
    }
}
