//! Random sources for maze generation
//!
//! The generator only needs one operation, picking an index in `[0, len)`,
//! expressed by [`RandomSource`]. [`SimpleLCG`] is the default source: a
//! Park-Miller Linear Congruential Generator (MINSTD), so the same seed
//! always produces the same maze on every platform.
//!
//! Constants:
//! - Multiplier (a): 48271
//! - Modulus (m): 2^31 - 1 = 2147483647
//!
//! Reference: https://en.wikipedia.org/wiki/Lehmer_random_number_generator

/// Source of uniform random choices
pub trait RandomSource {
    /// Choose an index uniformly from `[0, len)`; `len` is never zero
    fn choice_index(&mut self, len: usize) -> usize;
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn choice_index(&mut self, len: usize) -> usize {
        (**self).choice_index(len)
    }
}

const MODULUS: u64 = 2147483647; // 2^31 - 1
const MULTIPLIER: u64 = 48271;

/// Park-Miller Linear Congruential Generator
///
/// Generates a deterministic sequence of pseudo-random numbers from a seed.
/// Same seed always produces the same sequence.
#[derive(Debug, Clone)]
pub struct SimpleLCG {
    state: u32,
}

impl SimpleLCG {
    /// Create a new LCG with the given seed
    ///
    /// The state must lie in `[1, 2^31 - 2]`: the seed is reduced modulo
    /// `2^31 - 1`, and a zero result is replaced with 1 to avoid the
    /// degenerate all-zero sequence.
    pub fn new(seed: u32) -> Self {
        let reduced = (seed as u64 % MODULUS) as u32;
        Self {
            state: if reduced == 0 { 1 } else { reduced },
        }
    }

    fn advance(&mut self) {
        // u64 keeps the multiplication from overflowing
        self.state = ((self.state as u64 * MULTIPLIER) % MODULUS) as u32;
    }

    /// Next raw value in `[1, 2^31 - 2]`
    pub fn next_u32(&mut self) -> u32 {
        self.advance();
        self.state
    }
}

impl RandomSource for SimpleLCG {
    fn choice_index(&mut self, len: usize) -> usize {
        self.advance();

        // (state * len) / M stays below len because state < M
        let scaled = (self.state as u64 * len as u64) / MODULUS;
        scaled as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SimpleLCG::new(12345);
        let mut rng2 = SimpleLCG::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32(), "RNG not deterministic");
        }
    }

    #[test]
    fn test_seed_zero() {
        let mut rng = SimpleLCG::new(0);
        // Seed 0 behaves exactly like seed 1
        let mut one = SimpleLCG::new(1);
        assert_eq!(rng.next_u32(), one.next_u32());
        assert_eq!(rng.next_u32(), 48271u32.wrapping_mul(48271) % 2147483647);
    }

    #[test]
    fn test_seed_equal_to_modulus_is_not_degenerate() {
        let mut rng = SimpleLCG::new(2147483647);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_known_first_value() {
        let mut rng = SimpleLCG::new(1);
        assert_eq!(rng.next_u32(), 48271);
    }

    #[test]
    fn test_choice_index_range() {
        let mut rng = SimpleLCG::new(54321);

        for len in 1..=4 {
            for _ in 0..1000 {
                let idx = rng.choice_index(len);
                assert!(idx < len, "choice_index {} not in [0, {})", idx, len);
            }
        }
    }

    #[test]
    fn test_choice_index_covers_all_options() {
        let mut rng = SimpleLCG::new(2918957128);
        let mut seen = [false; 4];
        for _ in 0..200 {
            seen[rng.choice_index(4)] = true;
        }
        assert!(seen.iter().all(|&s| s), "Some index never chosen: {:?}", seen);
    }

    #[test]
    fn test_mut_ref_is_a_source() {
        fn pick<R: RandomSource>(mut source: R) -> usize {
            source.choice_index(3)
        }

        let mut rng = SimpleLCG::new(7);
        let mut copy = rng.clone();
        assert_eq!(pick(&mut rng), copy.choice_index(3));
    }
}
