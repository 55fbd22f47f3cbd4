//! The machine state and the execution of every instruction.

use super::error::{self, Error};
use super::font::{self, FONT, FONT_BASE};
use super::framebuffer::Framebuffer;
use super::instruction::*;
use super::keypad::Keypad;
use super::opcode::Opcode;
use super::rng::Xorshift32;
use super::{ADDR_MASK, MAX_ROM_SIZE, MEM_SIZE, NUM_REGISTERS, PC_START, STACK_SIZE};

const VF: usize = 0xF;

/// Register fields are 4 bits wide, even in instructions built by hand.
fn reg(x: u8) -> usize {
    (x & 0xF) as usize
}

pub struct Emulator {
    memory: [u8; MEM_SIZE],
    registers: [u8; NUM_REGISTERS],
    delay_timer: u8,
    sound_timer: u8,
    i: u16,
    program_counter: u16,
    stack_pointer: u8,
    stack: [u16; STACK_SIZE],
    opcode: u16,

    framebuffer: Framebuffer,
    keypad: Keypad,
    rng: Xorshift32,
}

impl Emulator {
    /// Create a new emulator seeded from the clock.
    pub fn new() -> Emulator {
        Emulator::with_rng(Xorshift32::from_time())
    }

    /// Create a new emulator whose random instruction is reproducible.
    pub fn with_seed(seed: u32) -> Emulator {
        Emulator::with_rng(Xorshift32::new(seed))
    }

    fn with_rng(rng: Xorshift32) -> Emulator {
        let mut memory = [0; MEM_SIZE];
        let font_start = FONT_BASE as usize;
        memory[font_start..font_start + FONT.len()].copy_from_slice(&FONT);

        Emulator {
            memory,
            registers: [0; NUM_REGISTERS],
            delay_timer: 0,
            sound_timer: 0,
            i: 0,
            program_counter: PC_START,
            stack_pointer: 0,
            stack: [0; STACK_SIZE],
            opcode: 0,

            framebuffer: Framebuffer::new(),
            keypad: Keypad::new(),
            rng,
        }
    }

    /// Copy a program into memory at 0x200.
    ///
    /// Nothing is written if the program doesn't fit.
    pub fn load(&mut self, program: &[u8]) -> error::Result<()> {
        if program.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }

        let start = PC_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        log::debug!("Loaded {} byte program", program.len());
        Ok(())
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// The program counter is advanced past the instruction before it runs,
    /// so jumps and skips work relative to the next instruction.
    pub fn step(&mut self) -> error::Result<()> {
        let pc = self.program_counter & ADDR_MASK;

        // Each opcode is two bytes
        let opcode = Opcode::from_bytes(self.read(pc), self.read(pc + 1));
        self.opcode = opcode.raw();
        self.program_counter = pc.wrapping_add(2);

        let instruction = Instruction::decode(opcode).ok_or(Error::UnknownOpcode {
            opcode: opcode.raw(),
            pc,
        })?;
        log::trace!("{:#05x}: {:04x} {:?}", pc, opcode.raw(), instruction);

        self.execute_at(instruction, pc)
    }

    /// Count both timers down by one. Call this at 60Hz, independent of `step`.
    pub fn tick(&mut self) {
        self.delay_timer = self.delay_timer.saturating_sub(1);
        self.sound_timer = self.sound_timer.saturating_sub(1);
    }

    /// Execute an instruction without fetching it. The program counter is not advanced first.
    pub fn execute_single(&mut self, instruction: Instruction) -> error::Result<()> {
        self.execute_at(instruction, self.program_counter)
    }

    /// Execute instructions one after another, stopping at the first fault.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> error::Result<()> {
        instructions
            .iter()
            .try_for_each(|instruction| self.execute_single(*instruction))
    }

    fn read(&self, addr: u16) -> u8 {
        self.memory[(addr & ADDR_MASK) as usize]
    }

    fn write(&mut self, addr: u16, value: u8) {
        self.memory[(addr & ADDR_MASK) as usize] = value;
    }

    fn skip_if(&mut self, condition: bool) {
        if condition {
            self.program_counter = self.program_counter.wrapping_add(2);
        }
    }

    fn key_held(&self, x: u8, pc: u16) -> error::Result<bool> {
        let key = self.registers[reg(x)];
        self.keypad
            .is_pressed(key)
            .ok_or(Error::InvalidKeyIndex { key, pc })
    }

    /// Execute a single instruction. `pc` is where it was fetched from.
    fn execute_at(&mut self, instruction: Instruction, pc: u16) -> error::Result<()> {
        match instruction {
            // Machine code routines don't exist here, so treat them as jumps
            Instruction::Sys(Addr(addr)) => {
                self.program_counter = addr;
            }

            Instruction::ClearScreen => {
                self.framebuffer.clear();
            }

            // Return to the previous call site via the stack.
            Instruction::Return => {
                if self.stack_pointer == 0 {
                    return Err(Error::StackUnderflow { pc });
                }
                self.stack_pointer -= 1;
                self.program_counter = self.stack[self.stack_pointer as usize];
            }

            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the current address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                let slot = self
                    .stack
                    .get_mut(self.stack_pointer as usize)
                    .ok_or(Error::StackOverflow { pc })?;
                *slot = self.program_counter;
                self.stack_pointer += 1;
                self.program_counter = addr;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[reg(x)] == n);
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                self.skip_if(self.registers[reg(x)] != n);
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[reg(x)] == self.registers[reg(y)]);
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.registers[reg(x)] = n;
            }

            // No carry flag
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.registers[reg(x)] = self.registers[reg(x)].wrapping_add(n);
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.registers[reg(x)] = self.registers[reg(y)];
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.registers[reg(x)] |= self.registers[reg(y)];
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.registers[reg(x)] &= self.registers[reg(y)];
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.registers[reg(x)] ^= self.registers[reg(y)];
            }

            // The flag-setting operations read both operands before touching VF,
            // then write VF before the result.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[reg(x)], self.registers[reg(y)]);
                let (sum, carry) = vx.overflowing_add(vy);
                self.registers[VF] = carry as u8;
                self.registers[reg(x)] = sum;
            }

            // VF is 1 when there is no borrow
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[reg(x)], self.registers[reg(y)]);
                self.registers[VF] = (vx > vy) as u8;
                self.registers[reg(x)] = vx.wrapping_sub(vy);
            }

            Instruction::BitshiftRight(Reg(x)) => {
                let vx = self.registers[reg(x)];
                self.registers[VF] = vx & 1;
                self.registers[reg(x)] = vx >> 1;
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (vx, vy) = (self.registers[reg(x)], self.registers[reg(y)]);
                self.registers[VF] = (vy > vx) as u8;
                self.registers[reg(x)] = vy.wrapping_sub(vx);
            }

            Instruction::BitshiftLeft(Reg(x)) => {
                let vx = self.registers[reg(x)];
                self.registers[VF] = (vx >> 7) & 1;
                self.registers[reg(x)] = vx << 1;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                self.skip_if(self.registers[reg(x)] != self.registers[reg(y)]);
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = addr + self.registers[0] as u16;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                self.registers[reg(x)] = self.rng.next_byte() & n;
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                // Each sprite row is one byte, at most 15 of them
                let mut sprite = [0u8; 15];
                let sprite = &mut sprite[..(sprite_height & 0xF) as usize];
                for (row, byte) in sprite.iter_mut().enumerate() {
                    *byte = self.read(self.i.wrapping_add(row as u16));
                }

                let collision = self.framebuffer.draw_sprite(
                    self.registers[reg(x)],
                    self.registers[reg(y)],
                    sprite,
                );
                self.registers[VF] = collision as u8;
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                let held = self.key_held(x, pc)?;
                self.skip_if(held);
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                let held = self.key_held(x, pc)?;
                self.skip_if(!held);
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.registers[reg(x)] = self.delay_timer;
            }

            // Wait for a key press by running this instruction again until one arrives
            Instruction::SetRegToGetKey(Reg(x)) => match self.keypad.first_pressed() {
                Some(key) => self.registers[reg(x)] = key,
                None => self.program_counter = self.program_counter.wrapping_sub(2),
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                self.delay_timer = self.registers[reg(x)];
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                self.sound_timer = self.registers[reg(x)];
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.registers[reg(x)] as u16);
            }

            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = font::glyph_address(self.registers[reg(x)]);
            }

            // Hundreds at I, tens at I+1, ones at I+2
            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.registers[reg(x)];
                self.write(self.i, value / 100);
                self.write(self.i.wrapping_add(1), value / 10 % 10);
                self.write(self.i.wrapping_add(2), value % 10);
            }

            // Dump register values up to and including Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=reg(x) {
                    self.write(self.i.wrapping_add(reg_no as u16), self.registers[reg_no]);
                }
            }

            // Load register values up to and including Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=reg(x) {
                    self.registers[reg_no] = self.read(self.i.wrapping_add(reg_no as u16));
                }
            }
        };

        Ok(())
    }

    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn memory(&self) -> &[u8; MEM_SIZE] {
        &self.memory
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn program_counter(&self) -> u16 {
        self.program_counter
    }

    pub fn stack_pointer(&self) -> u8 {
        self.stack_pointer
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }

    /// The most recently fetched instruction word.
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    /// Whether a frontend should be beeping.
    pub fn sound_active(&self) -> bool {
        self.sound_timer > 0
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}
