//! Seeded pseudo-random number generator
//!
//! Every match gets its own ChaCha8 stream derived from the tournament seed
//! and the match index, so a run is reproducible from its seed alone.

use rand::{Error, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Expand a 64-bit seed into the 32-byte form used by [`SeededRng`]
pub fn seed_bytes(seed: u64) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    for chunk in bytes.chunks_mut(8) {
        chunk.copy_from_slice(&seed.to_le_bytes());
    }
    bytes
}

/// Seeded random number generator
///
/// Deterministic: same seed + match index = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    inner: ChaCha8Rng,
    seed: [u8; 32],
    match_index: u32,
}

impl SeededRng {
    /// Create a new RNG from a 32-byte seed and match index
    pub fn new(seed: &[u8; 32], match_index: u32) -> Self {
        Self {
            inner: Self::stream(seed, match_index, 0),
            seed: *seed,
            match_index,
        }
    }

    /// Independent stream for one decision slot within this match.
    ///
    /// The engine uses `2 * round` for player A and `2 * round + 1` for B.
    pub fn for_round(&self, slot: u32) -> Self {
        Self {
            inner: Self::stream(&self.seed, self.match_index, slot as u64 + 1),
            seed: self.seed,
            match_index: self.match_index,
        }
    }

    fn stream(seed: &[u8; 32], match_index: u32, slot: u64) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(*seed);
        rng.set_stream(((match_index as u64) << 32) | slot);
        rng
    }

    /// Generate a value 0-99 (for percentage checks)
    pub fn next_percent(&mut self) -> u8 {
        (self.inner.next_u32() % 100) as u8
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        self.inner.next_u32() % max
    }
}

impl RngCore for SeededRng {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.inner.try_fill_bytes(dest)
    }
}
