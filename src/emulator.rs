//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.
//!
//! The machine is purely call-driven: [`Emulator::step`] executes one instruction
//! and [`Emulator::tick`] counts the timers down once. Whoever owns the emulator
//! decides how often to call them, see [`crate::driver`].

pub mod emulator;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod keypad;
pub mod opcode;
pub mod output;
pub mod rng;

pub use emulator::Emulator;
pub use error::{Error, Result};
pub use framebuffer::Framebuffer;
pub use keypad::Keypad;

/// Bytes of addressable memory.
pub const MEM_SIZE: usize = 4096;

/// Where programs are loaded, and where execution starts.
pub const PC_START: u16 = 0x200;

/// The largest ROM that fits between `PC_START` and the end of memory.
pub const MAX_ROM_SIZE: usize = MEM_SIZE - PC_START as usize;

/// Addresses are 12 bits wide.
pub const ADDR_MASK: u16 = 0x0FFF;

pub const NUM_REGISTERS: usize = 16;
pub const STACK_SIZE: usize = 16;
