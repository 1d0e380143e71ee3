pub mod seq;

use neat_core::ShortId;
use std::iter;
use typed_builder::TypedBuilder;

/// Open Location Code base-20 alphabet plus E, L, S and T. No vowels that
/// form words, no look-alike characters.
pub const ID_ALPHABET: &[u8] = b"23456789CEFGHJLMPQRSTVWX";

/// Default number of characters in a generated id.
pub const DEFAULT_ID_LENGTH: usize = 6;

/// Trait for generating short ids.
///
/// Implementations are pure generators that don't interact with storage.
pub trait Generator: Send + Sync + 'static {
    /// Generates an id for a new short.
    fn generate(&self) -> ShortId;
}

/// Generates random ids from [`ID_ALPHABET`].
///
/// With six characters there are 24^6 (about 190 million) ids, so a collision
/// among a personal feed's shorts is unlikely but possible.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_ID_LENGTH)]
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortId {
        let id: String = iter::repeat_with(|| {
            ID_ALPHABET[rand::random_range(0..ID_ALPHABET.len())] as char
        })
        .take(self.length)
        .collect();
        ShortId::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_ids_use_alphabet() {
        let generator = RandomGenerator::new();

        for _ in 0..100 {
            let id = generator.generate();
            assert_eq!(id.as_str().len(), DEFAULT_ID_LENGTH);
            assert!(id.as_str().bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
    }

    #[test]
    fn custom_length() {
        let generator = RandomGenerator::builder().length(10).build();
        assert_eq!(generator.length(), 10);
        assert_eq!(generator.generate().as_str().len(), 10);
    }

    #[test]
    fn random_ids_vary() {
        let generator = RandomGenerator::new();
        let first = generator.generate();
        // 24^6 possibilities; ten identical draws in a row would mean a broken rng.
        assert!((0..10).any(|_| generator.generate() != first));
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
