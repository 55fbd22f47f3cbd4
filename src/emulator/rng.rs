//! A small xorshift generator backing the random instruction.
//!
//! It is owned by the emulator rather than being global, so two emulators
//! seeded alike produce the same bytes.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{RngCore, SeedableRng};

/// Xorshift32 (shifts 13, 17, 5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    pub fn new(seed: u32) -> Xorshift32 {
        let mut rng = Xorshift32 { state: 1 };
        rng.seed(seed);
        rng
    }

    /// Seed from the wall clock.
    pub fn from_time() -> Xorshift32 {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs() as u32 ^ elapsed.subsec_nanos())
            .unwrap_or(1);
        Xorshift32::new(seed)
    }

    /// Reset the state. Zero is a fixed point of the mixing, so it becomes 1.
    pub fn seed(&mut self, seed: u32) {
        self.state = if seed == 0 { 1 } else { seed };
    }

    fn advance(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Advance once and return the low byte.
    pub fn next_byte(&mut self) -> u8 {
        self.advance() as u8
    }
}

impl RngCore for Xorshift32 {
    fn next_u32(&mut self) -> u32 {
        self.advance()
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.advance() as u64;
        let low = self.advance() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.advance().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Xorshift32 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Xorshift32 {
        Xorshift32::new(u32::from_le_bytes(seed))
    }
}
