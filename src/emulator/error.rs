use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while loading or running a program.
///
/// Faults raised while executing carry the address of the offending instruction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("ROM is too large ({size} bytes), max size is {max} bytes")]
    RomTooLarge { size: usize, max: usize },

    #[error("could not read ROM {path:?}")]
    RomUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("stack overflow: call at {pc:#05x} nests deeper than 16 frames")]
    StackOverflow { pc: u16 },

    #[error("stack underflow: return at {pc:#05x} with an empty call stack")]
    StackUnderflow { pc: u16 },

    #[error("unknown opcode {opcode:#06x} at {pc:#05x}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    #[error("key index {key:#04x} at {pc:#05x} is outside the keypad")]
    InvalidKeyIndex { key: u8, pc: u16 },

    #[error("frontend i/o error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_use_hex_addresses() {
        let err = Error::UnknownOpcode { opcode: 0x5001, pc: 0x200 };
        assert_eq!(err.to_string(), "unknown opcode 0x5001 at 0x200");

        let err = Error::StackUnderflow { pc: 0x2fe };
        assert_eq!(err.to_string(), "stack underflow: return at 0x2fe with an empty call stack");
    }
}
