/*!

A CHIP-8 virtual machine as specified at https://en.wikipedia.org/wiki/CHIP-8.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
The hex keypad is mapped onto the left side of the keyboard:

```text
1 2 3 4        1 2 3 C
q w e r   ->   4 5 6 D
a s d f        7 8 9 E
z x c v        A 0 B F
```

Press Esc to quit.

# Library

The core is call-driven. `Emulator::step` executes a single instruction and
`Emulator::tick` counts the timers down. Nothing runs on its own.

```rust
use chip8_vm::emulator::Emulator;

let mut emulator = Emulator::with_seed(1);

// Load a program at address 0x200.
let load_v0 = [0x60, 0x2A];
emulator.load(&load_v0).unwrap();
emulator.step().unwrap(); // V0 is now 42
assert_eq!(emulator.registers()[0], 42);
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip8_vm::emulator::Emulator;
use chip8_vm::emulator::instruction::{Instruction, Reg, Const, Addr};

let mut emulator = Emulator::with_seed(1);

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
```

Faults such as an unknown opcode or a return with an empty stack are
returned from `step` with the address they happened at, and end the session.

## Custom input and output

To run a program in real time, implement `EmulatorInput` and `EmulatorOutput`,
which represent somewhere to get keyboard input from and a screen respectively,
and hand them to a `Driver`.

```ignore
use chip8_vm::driver::{Driver, DriverConfig};

let mut driver = Driver::new(emulator, MyInput::new(), MyOutput::new(), DriverConfig::default());
driver.run(None)?;
```
*/

pub mod driver;
pub mod emulator;
pub mod rom;
