/// A raw 16-bit instruction word, with accessors for the fields
/// instructions are encoded with.
///
/// ```text
/// 0xDXYN
///   |||+- n:   lowest nibble
///   ||+-- y:   register
///   |+--- x:   register
///   +---- the instruction class
/// kk  = the lowest byte
/// nnn = the lowest 12 bits
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opcode(pub u16);

impl Opcode {
    /// Combine two bytes big-endian, the way they are laid out in memory.
    pub fn from_bytes(high: u8, low: u8) -> Opcode {
        Opcode(u16::from_be_bytes([high, low]))
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    /// The four nibbles, most significant first.
    pub fn nibbles(self) -> (u8, u8, u8, u8) {
        let [high, low] = self.0.to_be_bytes();
        (high >> 4, high & 0xF, low >> 4, low & 0xF)
    }

    pub fn kk(self) -> u8 {
        (self.0 & 0x00FF) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0x0FFF
    }
}
