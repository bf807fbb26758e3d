//! Cryptographically secure secret (password) generation
//!
//! Every character is drawn independently and uniformly from the configured
//! `CharacterUniverse`, then the whole sequence is permuted with a Fisher-Yates
//! shuffle. Both steps use the same cryptographically secure RNG.

use std::fmt;

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::{CryptoRng, RngCore};

use vaultprime_core::{VaultError, VaultResult};

use crate::charset::CharacterUniverse;

pub const MIN_SECRET_LENGTH: usize = 8;
pub const MAX_SECRET_LENGTH: usize = 128;
pub const DEFAULT_SECRET_LENGTH: usize = 12;

/// Secret generation parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretOptions {
    /// Number of characters, in `[MIN_SECRET_LENGTH, MAX_SECRET_LENGTH]`
    pub length: usize,
    pub include_lowercase: bool,
    pub include_uppercase: bool,
    pub include_numeric: bool,
    pub include_special: bool,
    /// Remove `l`, `1`, `O` and `0` from the universe
    pub exclude_ambiguous: bool,
}

impl Default for SecretOptions {
    fn default() -> Self {
        SecretOptions {
            length: DEFAULT_SECRET_LENGTH,
            include_lowercase: true,
            include_uppercase: true,
            include_numeric: true,
            include_special: true,
            exclude_ambiguous: true,
        }
    }
}

impl SecretOptions {
    pub fn with_length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn with_lowercase(mut self, include: bool) -> Self {
        self.include_lowercase = include;
        self
    }

    pub fn with_uppercase(mut self, include: bool) -> Self {
        self.include_uppercase = include;
        self
    }

    pub fn with_numeric(mut self, include: bool) -> Self {
        self.include_numeric = include;
        self
    }

    pub fn with_special(mut self, include: bool) -> Self {
        self.include_special = include;
        self
    }

    pub fn with_exclude_ambiguous(mut self, exclude: bool) -> Self {
        self.exclude_ambiguous = exclude;
        self
    }

    /// Check the length bounds
    pub fn validate(&self) -> VaultResult<()> {
        if !(MIN_SECRET_LENGTH..=MAX_SECRET_LENGTH).contains(&self.length) {
            return Err(VaultError::InvalidLength {
                length: self.length,
                min: MIN_SECRET_LENGTH,
                max: MAX_SECRET_LENGTH,
            });
        }
        Ok(())
    }
}

/// A generated secret
///
/// `Debug` never prints the contents.
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length in characters
    #[inline]
    pub fn len(&self) -> usize {
        self.0.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Secret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Secret").field(&"<redacted>").finish()
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stateless secret generator
pub struct SecretGenerator;

impl SecretGenerator {
    /// Generate a secret using the operating system RNG
    pub fn generate(options: &SecretOptions) -> VaultResult<Secret> {
        Self::generate_with_rng(options, &mut OsRng)
    }

    /// Generate a secret using the given secure RNG
    ///
    /// Fails without consuming entropy if the options are invalid.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        options: &SecretOptions,
        rng: &mut R,
    ) -> VaultResult<Secret> {
        options.validate()?;
        let universe = CharacterUniverse::from_options(options)?;

        let mut chars: Vec<char> = (0..options.length)
            .map(|_| universe.choose(rng))
            .collect();
        chars.shuffle(rng);

        tracing::trace!(
            length = options.length,
            universe = universe.len(),
            "generated secret"
        );

        Ok(Secret(chars.into_iter().collect()))
    }
}

/// Generate a secret from individual flags
pub fn generate_secret(
    length: usize,
    include_lowercase: bool,
    include_uppercase: bool,
    include_numeric: bool,
    include_special: bool,
    exclude_ambiguous: bool,
) -> VaultResult<Secret> {
    let options = SecretOptions {
        length,
        include_lowercase,
        include_uppercase,
        include_numeric,
        include_special,
        exclude_ambiguous,
    };
    SecretGenerator::generate(&options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::AMBIGUOUS;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_default_length() {
        let secret = SecretGenerator::generate(&SecretOptions::default()).unwrap();
        assert_eq!(secret.len(), DEFAULT_SECRET_LENGTH);
    }

    #[test]
    fn test_requested_length() {
        let secret = generate_secret(16, true, true, true, true, true).unwrap();
        assert_eq!(secret.len(), 16);
    }

    #[test]
    fn test_length_bounds() {
        for length in [7, 129, 0] {
            let err = generate_secret(length, true, true, true, true, true).unwrap_err();
            assert_eq!(
                err,
                VaultError::InvalidLength {
                    length,
                    min: MIN_SECRET_LENGTH,
                    max: MAX_SECRET_LENGTH,
                }
            );
        }

        assert_eq!(generate_secret(8, true, true, true, true, true).unwrap().len(), 8);
        assert_eq!(
            generate_secret(128, true, true, true, true, true).unwrap().len(),
            128
        );
    }

    #[test]
    fn test_no_character_class_selected() {
        let err = generate_secret(16, false, false, false, false, false).unwrap_err();
        assert_eq!(err, VaultError::EmptyCharacterUniverse);
    }

    #[test]
    fn test_length_checked_before_universe() {
        let err = generate_secret(3, false, false, false, false, false).unwrap_err();
        assert!(matches!(err, VaultError::InvalidLength { .. }));
    }

    #[test]
    fn test_numeric_only() {
        let secret = generate_secret(64, false, false, true, false, false).unwrap();
        assert!(secret.as_str().chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_seeded_rng_is_deterministic() {
        let options = SecretOptions::default().with_length(32);
        let a = SecretGenerator::generate_with_rng(&options, &mut StdRng::seed_from_u64(9)).unwrap();
        let b = SecretGenerator::generate_with_rng(&options, &mut StdRng::seed_from_u64(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretGenerator::generate(&SecretOptions::default()).unwrap();
        let debug = format!("{:?}", secret);
        assert!(!debug.contains(secret.as_str()));
        assert!(debug.contains("redacted"));
    }

    #[test]
    fn test_consecutive_secrets_differ() {
        let options = SecretOptions::default().with_length(32);
        let a = SecretGenerator::generate(&options).unwrap();
        let b = SecretGenerator::generate(&options).unwrap();
        assert_ne!(a, b);
    }

    fn options_strategy() -> impl Strategy<Value = SecretOptions> {
        (
            MIN_SECRET_LENGTH..=MAX_SECRET_LENGTH,
            any::<[bool; 4]>(),
            any::<bool>(),
        )
            .prop_filter("at least one class", |(_, classes, _)| {
                classes.iter().any(|c| *c)
            })
            .prop_map(|(length, classes, exclude_ambiguous)| SecretOptions {
                length,
                include_lowercase: classes[0],
                include_uppercase: classes[1],
                include_numeric: classes[2],
                include_special: classes[3],
                exclude_ambiguous,
            })
    }

    proptest! {
        #[test]
        fn prop_length_and_membership(options in options_strategy(), seed in any::<u64>()) {
            let universe = CharacterUniverse::from_options(&options).unwrap();
            let secret = SecretGenerator::generate_with_rng(
                &options,
                &mut StdRng::seed_from_u64(seed),
            ).unwrap();

            prop_assert_eq!(secret.len(), options.length);
            prop_assert!(secret.as_str().chars().all(|c| universe.contains(c)));
            if options.exclude_ambiguous {
                prop_assert!(!secret.as_str().chars().any(|c| AMBIGUOUS.contains(c)));
            }
        }

        #[test]
        fn prop_out_of_range_rejected(length in prop_oneof![0usize..MIN_SECRET_LENGTH, (MAX_SECRET_LENGTH + 1)..4096]) {
            let options = SecretOptions::default().with_length(length);
            let is_invalid_length = matches!(
                SecretGenerator::generate(&options),
                Err(VaultError::InvalidLength { .. })
            );
            prop_assert!(is_invalid_length);
        }
    }
}
