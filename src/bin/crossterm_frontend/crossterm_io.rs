use chip8_vm::emulator::framebuffer::{Framebuffer, HEIGHT, WIDTH};
use chip8_vm::emulator::input::{EmulatorInput, Poll};
use chip8_vm::emulator::keypad::Keypad;
use chip8_vm::emulator::output::EmulatorOutput;

use super::key_manager::{key_to_hex, KeyManager};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{self, stdout, Stdout, Write};
use std::time::{Duration, Instant};

fn io_error(err: crossterm::ErrorKind) -> io::Error {
    io::Error::new(io::ErrorKind::Other, err.to_string())
}

pub struct CrosstermInput {
    key_manager: KeyManager,
}

impl CrosstermInput {
    pub fn new(key_manager: KeyManager) -> CrosstermInput {
        CrosstermInput { key_manager }
    }
}

impl EmulatorInput for CrosstermInput {
    fn poll(&mut self, keypad: &mut Keypad) -> io::Result<Poll> {
        // Drain whatever arrived since the last frame
        while event::poll(Duration::from_millis(0)).map_err(io_error)? {
            let event = event::read().map_err(io_error)?;
            log::trace!("Got event {:?}", event);
            if let Event::Key(KeyEvent { code, modifiers }) = event {
                let ctrl_c = code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL);
                if code == KeyCode::Esc || ctrl_c {
                    return Ok(Poll::Quit);
                }
                if let Some(key) = key_to_hex(code) {
                    self.key_manager.press(key, Instant::now());
                }
            }
        }

        self.key_manager.fill(keypad, Instant::now());
        Ok(Poll::Continue)
    }
}

/// Draws each pixel as two terminal cells inside a frame.
pub struct CrosstermOutput {
    stdout: Stdout,
    shown: Framebuffer,
}

impl CrosstermOutput {
    pub fn new() -> io::Result<CrosstermOutput> {
        let mut stdout = stdout();
        terminal::enable_raw_mode().map_err(io_error)?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All)).map_err(io_error)?;

        let mut output = CrosstermOutput {
            stdout,
            shown: Framebuffer::new(),
        };
        output.draw_border()?;
        Ok(output)
    }

    fn draw_border(&mut self) -> io::Result<()> {
        let right = 2 * WIDTH as u16 + 1;
        let bottom = HEIGHT as u16 + 1;
        let horizontal = "━".repeat(2 * WIDTH);
        queue!(
            self.stdout,
            cursor::MoveTo(0, 0),
            Print(format!("┏{}┓", horizontal)),
            cursor::MoveTo(0, bottom),
            Print(format!("┗{}┛", horizontal))
        )
        .map_err(io_error)?;
        for y in 1..bottom {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                Print('┃'),
                cursor::MoveTo(right, y),
                Print('┃')
            )
            .map_err(io_error)?;
        }
        self.stdout.flush()
    }

    fn draw(&mut self, x: usize, y: usize, lit: bool) -> io::Result<()> {
        queue!(
            self.stdout,
            cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1),
            Print(if lit { "██" } else { "  " })
        )
        .map_err(io_error)
    }
}

impl Drop for CrosstermOutput {
    fn drop(&mut self) {
        // Nothing sensible to do if the terminal can't be restored
        let _ = execute!(self.stdout, cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

impl EmulatorOutput for CrosstermOutput {
    /// Only cells that changed since the last frame are redrawn.
    fn present(&mut self, framebuffer: &Framebuffer) -> io::Result<()> {
        for y in 0..HEIGHT {
            for x in 0..WIDTH {
                let lit = framebuffer.get(x, y);
                if lit != self.shown.get(x, y) {
                    self.draw(x, y, lit)?;
                }
            }
        }
        self.shown.clone_from(framebuffer);
        self.stdout.flush()
    }
}
