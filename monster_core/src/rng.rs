//! RandomGen - Seeded linear-congruential generator shared by every random draw
//!
//! Seeded runs must replay bit-exactly, so every consumer draws from the same
//! stream in a fixed order. The generator also implements `rand::RngCore` so
//! it can be handed to anything expecting `impl Rng`.

use rand::{RngCore, SeedableRng};

const MODULUS_MASK: u64 = (1 << 48) - 1;
const MULTIPLIER: u64 = 25_214_903_917;
const INCREMENT: u64 = 11;

/// 48-bit LCG producing 32-bit outputs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomGen {
    seed: u64,
}

impl RandomGen {
    /// Create a generator with the given seed
    pub fn new(seed: u64) -> Self {
        RandomGen { seed }
    }

    /// Reseed; all future draws follow from `seed`
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = seed;
    }

    /// Next integer in `0..2^32`
    pub fn random(&mut self) -> u32 {
        self.seed = MULTIPLIER
            .wrapping_mul(self.seed)
            .wrapping_add(INCREMENT)
            & MODULUS_MASK;
        (self.seed >> 16) as u32
    }

    /// Next float in `[0, 1)`
    pub fn random_float(&mut self) -> f64 {
        self.random() as f64 / (1u64 << 32) as f64
    }

    /// Integer in `lo..=hi`. A reversed range collapses to `lo`.
    pub fn randint(&mut self, lo: u32, hi: u32) -> u32 {
        let span = hi.saturating_sub(lo) as u64 + 1;
        (self.random() as u64 % span) as u32 + lo
    }

    /// True with probability `ratio`
    pub fn random_chance(&mut self, ratio: f64) -> bool {
        self.random_float() < ratio
    }

    /// Uniform pick from `items`. An empty slice consumes no draw.
    pub fn random_choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.randint(0, (items.len() - 1) as u32) as usize;
        items.get(idx)
    }

    /// Shuffle by drawing one key per element and sorting on (key, position).
    ///
    /// Draws exactly `items.len()` values, in element order.
    pub fn random_shuffle<T>(&mut self, items: &mut Vec<T>) {
        let mut keyed: Vec<(u32, usize)> = (0..items.len()).map(|i| (self.random(), i)).collect();
        keyed.sort_unstable();

        let mut slots: Vec<Option<T>> = items.drain(..).map(Some).collect();
        items.extend(keyed.into_iter().filter_map(|(_, i)| slots[i].take()));
    }
}

impl RngCore for RandomGen {
    fn next_u32(&mut self) -> u32 {
        self.random()
    }

    fn next_u64(&mut self) -> u64 {
        let high = self.random() as u64;
        let low = self.random() as u64;
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.random().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for RandomGen {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        RandomGen::new(u64::from_le_bytes(seed))
    }

    /// Uses the state directly so `seed_from_u64(n)` matches `RandomGen::new(n)`
    fn seed_from_u64(state: u64) -> Self {
        RandomGen::new(state)
    }
}
