//! PSRNG seeds.
//!
//! A seed is a plain `u64`. Pokémon Showdown also writes seeds as four 16-bit
//! words (`[a, b, c, d]`, most significant word first), so both spellings are
//! accepted when parsing.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a seed from external input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SeedError {
    #[error("malformed seed '{input}': {reason}")]
    Malformed { input: String, reason: String },

    #[error("seed needs exactly 4 words, got {0}")]
    WordCount(usize),

    #[error("seed word {index} out of range: {value} > 65535")]
    WordOutOfRange { index: usize, value: u64 },
}

/// A 64-bit PSRNG seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(u64);

impl Seed {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }

    /// Build a seed from Showdown's four-word form.
    pub fn from_words(words: &[u16]) -> Result<Self, SeedError> {
        let [a, b, c, d] = words else {
            return Err(SeedError::WordCount(words.len()));
        };
        Ok(Self(
            (*a as u64) << 48 | (*b as u64) << 32 | (*c as u64) << 16 | *d as u64,
        ))
    }

    /// Split the seed back into Showdown's four-word form.
    pub fn words(self) -> [u16; 4] {
        [
            (self.0 >> 48) as u16,
            (self.0 >> 32) as u16,
            (self.0 >> 16) as u16,
            self.0 as u16,
        ]
    }

    /// Seed drawn from the thread RNG. Only for battles that never need replaying.
    pub fn from_entropy() -> Self {
        let seed = Self(rand::random());
        tracing::debug!(seed = seed.0, "drew PSRNG seed from entropy");
        seed
    }
}

impl From<u64> for Seed {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl From<Seed> for u64 {
    fn from(seed: Seed) -> Self {
        seed.0
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Seed {
    type Err = SeedError;

    /// Accepts `12345`, `0x3039` or `0,0,0,12345`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let text = input.trim();
        let malformed = |reason: String| SeedError::Malformed {
            input: input.to_string(),
            reason,
        };

        if text.contains(',') {
            let mut words = Vec::with_capacity(4);
            for (index, part) in text.split(',').enumerate() {
                let value: u64 = part
                    .trim()
                    .parse()
                    .map_err(|e| malformed(format!("word {index}: {e}")))?;
                if value > u16::MAX as u64 {
                    return Err(SeedError::WordOutOfRange { index, value });
                }
                words.push(value as u16);
            }
            return Self::from_words(&words);
        }

        let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
            Some(hex) => u64::from_str_radix(hex, 16),
            None => text.parse(),
        };
        parsed.map(Self).map_err(|e| malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_round_trip() {
        let seed = Seed::from_words(&[1, 2, 3, 4]).unwrap();
        assert_eq!(seed.get(), 0x0001_0002_0003_0004);
        assert_eq!(seed.words(), [1, 2, 3, 4]);
    }

    #[test]
    fn test_wrong_word_count_is_rejected() {
        assert_eq!(Seed::from_words(&[1, 2, 3]), Err(SeedError::WordCount(3)));
        assert_eq!(Seed::from_words(&[]), Err(SeedError::WordCount(0)));
    }

    #[test]
    fn test_parses_all_spellings() {
        assert_eq!("35".parse::<Seed>().unwrap(), Seed::new(35));
        assert_eq!("0x23".parse::<Seed>().unwrap(), Seed::new(35));
        assert_eq!(" 0,0,0,35 ".parse::<Seed>().unwrap(), Seed::new(35));
        assert_eq!(
            "18446744073709551615".parse::<Seed>().unwrap(),
            Seed::new(u64::MAX)
        );
    }

    #[test]
    fn test_rejects_bad_text() {
        assert!(matches!(
            "twelve".parse::<Seed>(),
            Err(SeedError::Malformed { .. })
        ));
        assert!(matches!(
            "18446744073709551616".parse::<Seed>(),
            Err(SeedError::Malformed { .. })
        ));
        assert_eq!(
            "1,2,70000,4".parse::<Seed>(),
            Err(SeedError::WordOutOfRange {
                index: 2,
                value: 70000
            })
        );
        assert_eq!("1,2".parse::<Seed>(), Err(SeedError::WordCount(2)));
    }
}
