//! # Tape Noise Generator
//!
//! Xorshift32 driving every random placement in the overlay.
//!
//! ## Determinism Guarantee
//!
//! Given the same seed and the same call sequence, the generator produces
//! **exactly** the same values on any platform. The compositor reseeds it
//! every frame from (previous state, frame counter, time), so a recorded
//! sequence of frame times replays the identical overlay.

/// Fallback state used when seeded with zero (xorshift is stuck at zero).
pub const ZERO_SEED_FALLBACK: u32 = 0xDEAD_BEEF;

/// Values discarded after seeding to mix the state.
const WARMUP_ROUNDS: usize = 3;

/// Xorshift32 generator. State is never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapeRng {
    state: u32,
}

impl TapeRng {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        let mut rng = Self {
            state: ZERO_SEED_FALLBACK,
        };
        rng.seed(seed);
        rng
    }

    /// Reseeds the generator. Zero falls back to [`ZERO_SEED_FALLBACK`].
    pub fn seed(&mut self, value: u32) {
        self.state = if value == 0 { ZERO_SEED_FALLBACK } else { value };
        for _ in 0..WARMUP_ROUNDS {
            self.next_u32();
        }
    }

    /// Current internal state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advances the state and returns it.
    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform float from the low 16 bits. Range is [0, 1].
    #[inline]
    pub fn next_float(&mut self) -> f32 {
        (self.next_u32() & 0xFFFF) as f32 / 65535.0
    }

    /// Uniform integer in `[0, max)`; 0 when `max <= 0`.
    #[inline]
    pub fn next_int(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        (self.next_u32() % max as u32) as i32
    }

    /// Uniform float in `[-0.5, 0.5]`.
    #[inline]
    pub fn next_centered(&mut self) -> f32 {
        self.next_float() - 0.5
    }
}

impl Default for TapeRng {
    fn default() -> Self {
        Self::new(ZERO_SEED_FALLBACK)
    }
}
