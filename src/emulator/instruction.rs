use super::opcode::Opcode;

/// A wrapper for addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Addr(pub u16);

/// A wrapper for registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reg(pub u8);

/// A wrapper for constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Const(pub u8);

/// A single instruction from the CHIP-8 instruction set.
/// Two bytes written in hexadecimal, with the following special characters:
/// - NNN: address
/// - NN: 8-bit constant
/// - N: 4-bit constant
/// - X and Y: 4-bit register identifier
/// - PC: Program counter
/// - I: 16 bit register for memory address
/// - VN: One of the 16 available variables (register identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    Sys(Addr),                  // 0NNN
    ClearScreen,                // 00E0
    Return,                     // 00EE
    Goto(Addr),                 // 1NNN
    Call(Addr),                 // 2NNN
    IfRegEqConst(Reg, Const),   // 3XNN
    IfRegNeqConst(Reg, Const),  // 4XNN
    IfRegEqReg(Reg, Reg),       // 5XY0
    SetRegToConst(Reg, Const),  // 6XNN
    IncRegByConst(Reg, Const),  // 7XNN
    SetRegToReg(Reg, Reg),      // 8XY0
    BitwiseOr(Reg, Reg),        // 8XY1
    BitwiseAnd(Reg, Reg),       // 8XY2
    BitwiseXor(Reg, Reg),       // 8XY3
    IncRegByReg(Reg, Reg),      // 8XY4
    DecRegByReg(Reg, Reg),      // 8XY5
    BitshiftRight(Reg),         // 8XY6
    SetVxVyMinusVx(Reg, Reg),   // 8XY7
    BitshiftLeft(Reg),          // 8XYE
    IfRegNeqReg(Reg, Reg),      // 9XY0
    SetI(Addr),                 // ANNN
    SetPcToV0PlusAddr(Addr),    // BNNN
    SetVxRand(Reg, Const),      // CXNN
    Draw(Reg, Reg, Const),      // DXYN
    IfKeyEqVx(Reg),             // EX9E
    IfKeyNeqVx(Reg),            // EXA1
    SetRegToDelayTimer(Reg),    // FX07
    SetRegToGetKey(Reg),        // FX0A
    SetDelayTimerToReg(Reg),    // FX15
    SetSoundTimerToReg(Reg),    // FX18
    AddRegToI(Reg),             // FX1E
    SetIToSpriteAddrVx(Reg),    // FX29
    SetIToBcdOfReg(Reg),        // FX33
    RegDump(Reg),               // FX55
    RegLoad(Reg),               // FX65
}

impl Instruction {
    /// Decode an opcode, or `None` if no instruction is encoded by it.
    ///
    /// The top nibble selects the class. Classes 0, 8, E and F share it between
    /// several instructions and are told apart by the low byte or low nibble.
    /// The shifts ignore Y and operate on VX alone.
    pub fn decode(opcode: Opcode) -> Option<Instruction> {
        let addr = Addr(opcode.nnn());
        let kk = Const(opcode.kk());
        let instruction = match opcode.nibbles() {
            (0, 0, 0xE, 0) => Instruction::ClearScreen,
            (0, 0, 0xE, 0xE) => Instruction::Return,
            (0, _, _, _) => Instruction::Sys(addr),
            (1, _, _, _) => Instruction::Goto(addr),
            (2, _, _, _) => Instruction::Call(addr),
            (3, x, _, _) => Instruction::IfRegEqConst(Reg(x), kk),
            (4, x, _, _) => Instruction::IfRegNeqConst(Reg(x), kk),
            (5, x, y, 0) => Instruction::IfRegEqReg(Reg(x), Reg(y)),
            (6, x, _, _) => Instruction::SetRegToConst(Reg(x), kk),
            (7, x, _, _) => Instruction::IncRegByConst(Reg(x), kk),
            (8, x, y, 0) => Instruction::SetRegToReg(Reg(x), Reg(y)),
            (8, x, y, 1) => Instruction::BitwiseOr(Reg(x), Reg(y)),
            (8, x, y, 2) => Instruction::BitwiseAnd(Reg(x), Reg(y)),
            (8, x, y, 3) => Instruction::BitwiseXor(Reg(x), Reg(y)),
            (8, x, y, 4) => Instruction::IncRegByReg(Reg(x), Reg(y)),
            (8, x, y, 5) => Instruction::DecRegByReg(Reg(x), Reg(y)),
            (8, x, _, 6) => Instruction::BitshiftRight(Reg(x)),
            (8, x, y, 7) => Instruction::SetVxVyMinusVx(Reg(x), Reg(y)),
            (8, x, _, 0xE) => Instruction::BitshiftLeft(Reg(x)),
            (9, x, y, 0) => Instruction::IfRegNeqReg(Reg(x), Reg(y)),
            (0xA, _, _, _) => Instruction::SetI(addr),
            (0xB, _, _, _) => Instruction::SetPcToV0PlusAddr(addr),
            (0xC, x, _, _) => Instruction::SetVxRand(Reg(x), kk),
            (0xD, x, y, n) => Instruction::Draw(Reg(x), Reg(y), Const(n)),
            (0xE, x, 9, 0xE) => Instruction::IfKeyEqVx(Reg(x)),
            (0xE, x, 0xA, 1) => Instruction::IfKeyNeqVx(Reg(x)),
            (0xF, x, 0, 7) => Instruction::SetRegToDelayTimer(Reg(x)),
            (0xF, x, 0, 0xA) => Instruction::SetRegToGetKey(Reg(x)),
            (0xF, x, 1, 5) => Instruction::SetDelayTimerToReg(Reg(x)),
            (0xF, x, 1, 8) => Instruction::SetSoundTimerToReg(Reg(x)),
            (0xF, x, 1, 0xE) => Instruction::AddRegToI(Reg(x)),
            (0xF, x, 2, 9) => Instruction::SetIToSpriteAddrVx(Reg(x)),
            (0xF, x, 3, 3) => Instruction::SetIToBcdOfReg(Reg(x)),
            (0xF, x, 5, 5) => Instruction::RegDump(Reg(x)),
            (0xF, x, 6, 5) => Instruction::RegLoad(Reg(x)),
            _ => return None,
        };
        Some(instruction)
    }

    pub fn from_u16(value: u16) -> Option<Instruction> {
        Instruction::decode(Opcode(value))
    }
}
