//! Character universe for secret generation

use std::collections::HashSet;

use rand::{CryptoRng, Rng, RngCore};

use vaultprime_core::{VaultError, VaultResult};

use crate::secret::SecretOptions;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const NUMERIC: &str = "0123456789";
pub const SPECIAL: &str = "!#$%&*@\\";

/// Glyphs easily confused with one another when displayed
pub const AMBIGUOUS: &str = "l1O0";

/// De-duplicated, non-empty set of characters eligible for a secret
///
/// Characters keep the order in which they were first added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterUniverse {
    chars: Vec<char>,
}

impl CharacterUniverse {
    /// Union the classes selected in `options`, then drop ambiguous glyphs if asked.
    pub fn from_options(options: &SecretOptions) -> VaultResult<Self> {
        let classes = [
            (options.include_lowercase, LOWERCASE),
            (options.include_uppercase, UPPERCASE),
            (options.include_numeric, NUMERIC),
            (options.include_special, SPECIAL),
        ];

        let selected = classes
            .into_iter()
            .filter(|(enabled, _)| *enabled)
            .flat_map(|(_, class)| class.chars());

        Self::from_chars(selected, options.exclude_ambiguous)
    }

    /// Build a universe from arbitrary characters.
    ///
    /// Fails with `EmptyCharacterUniverse` if nothing is left after filtering.
    pub fn from_chars<I>(chars: I, exclude_ambiguous: bool) -> VaultResult<Self>
    where
        I: IntoIterator<Item = char>,
    {
        let mut seen = HashSet::new();
        let mut universe = Vec::new();
        for c in chars {
            if exclude_ambiguous && AMBIGUOUS.contains(c) {
                continue;
            }
            if seen.insert(c) {
                universe.push(c);
            }
        }

        if universe.is_empty() {
            return Err(VaultError::EmptyCharacterUniverse);
        }

        Ok(CharacterUniverse { chars: universe })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Always false; construction rejects empty universes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    #[inline]
    pub fn as_slice(&self) -> &[char] {
        &self.chars
    }

    /// Draw one character uniformly.
    ///
    /// `gen_range` uses rejection sampling, so there is no modulo bias.
    #[inline]
    pub fn choose<R: RngCore + CryptoRng>(&self, rng: &mut R) -> char {
        self.chars[rng.gen_range(0..self.chars.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_universe_excludes_ambiguous() {
        let universe = CharacterUniverse::from_options(&SecretOptions::default()).unwrap();

        // 26 + 26 + 10 + 8 minus l, 1, O, 0
        assert_eq!(universe.len(), 66);
        for c in AMBIGUOUS.chars() {
            assert!(!universe.contains(c));
        }
        assert!(universe.contains('\\'));
    }

    #[test]
    fn test_full_universe_with_ambiguous() {
        let options = SecretOptions::default().with_exclude_ambiguous(false);
        let universe = CharacterUniverse::from_options(&options).unwrap();
        assert_eq!(universe.len(), 70);
        assert!(universe.contains('0'));
    }

    #[test]
    fn test_single_class() {
        let options = SecretOptions::default()
            .with_lowercase(false)
            .with_uppercase(false)
            .with_special(false);
        let universe = CharacterUniverse::from_options(&options).unwrap();
        assert_eq!(universe.as_slice(), &['2', '3', '4', '5', '6', '7', '8', '9']);
    }

    #[test]
    fn test_no_classes_is_empty_error() {
        let options = SecretOptions::default()
            .with_lowercase(false)
            .with_uppercase(false)
            .with_numeric(false)
            .with_special(false);
        assert_eq!(
            CharacterUniverse::from_options(&options),
            Err(VaultError::EmptyCharacterUniverse)
        );
    }

    #[test]
    fn test_ambiguous_filter_can_empty_universe() {
        let result = CharacterUniverse::from_chars("l1O0".chars(), true);
        assert_eq!(result, Err(VaultError::EmptyCharacterUniverse));

        let kept = CharacterUniverse::from_chars("l1O0".chars(), false).unwrap();
        assert_eq!(kept.len(), 4);
    }

    #[test]
    fn test_from_chars_deduplicates() {
        let universe = CharacterUniverse::from_chars("abcabc".chars(), false).unwrap();
        assert_eq!(universe.as_slice(), &['a', 'b', 'c']);
    }

    #[test]
    fn test_from_chars_large_input() {
        // 200k characters over 1000 distinct code points, first-seen order kept
        let distinct: Vec<char> = (0x4E00u32..0x4E00 + 1000).filter_map(char::from_u32).collect();
        let input = distinct.iter().copied().cycle().take(200_000);
        let universe = CharacterUniverse::from_chars(input, true).unwrap();
        assert_eq!(universe.as_slice(), distinct.as_slice());
    }

    #[test]
    fn test_choose_stays_in_universe() {
        let universe = CharacterUniverse::from_chars("xyz".chars(), true).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..1000 {
            assert!(universe.contains(universe.choose(&mut rng)));
        }
    }
}
