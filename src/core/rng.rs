//! Deterministic random number generation for dealing.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Uniform**: Shuffles via Fisher-Yates, every permutation equally likely
//!
//! A seeded deal makes replays and tests reproducible; production hosts
//! construct with `from_entropy` instead.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG used to shuffle the deck.
///
/// Uses ChaCha8 for speed while maintaining cryptographic quality
/// randomness.
#[derive(Clone, Debug)]
pub struct DeckRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl DeckRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a new RNG from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random::<u64>())
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DeckRng::new(42);
        let mut rng2 = DeckRng::new(42);

        let mut deck1: Vec<_> = (0..32).collect();
        let mut deck2 = deck1.clone();

        rng1.shuffle(&mut deck1);
        rng2.shuffle(&mut deck2);

        assert_eq!(deck1, deck2);
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DeckRng::new(1);
        let mut rng2 = DeckRng::new(2);

        let mut deck1: Vec<_> = (0..32).collect();
        let mut deck2 = deck1.clone();

        rng1.shuffle(&mut deck1);
        rng2.shuffle(&mut deck2);

        assert_ne!(deck1, deck2);
    }

    #[test]
    fn test_shuffle_preserves_elements() {
        let mut rng = DeckRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        // Should be same elements, different order (very likely)
        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    }

    #[test]
    fn test_seed_accessor() {
        let rng = DeckRng::new(7);
        assert_eq!(rng.seed(), 7);
    }
}
