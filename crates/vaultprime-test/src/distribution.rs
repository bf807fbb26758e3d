//! Character frequency checks for secret generation
//!
//! Guards against biased index sampling (e.g. modulo reduction) by running a
//! chi-square goodness-of-fit test against the uniform distribution over a
//! character universe.

use std::collections::HashMap;

use rand::{CryptoRng, RngCore};
use vaultprime_core::VaultResult;
use vaultprime_crypto::{CharacterUniverse, SecretGenerator, SecretOptions};

/// Standard normal quantile for a one-sided p-value of 1e-4
const Z_P_0001: f64 = 3.719;

/// Observed character counts
#[derive(Clone, Debug, Default)]
pub struct FrequencyTable {
    counts: HashMap<char, u64>,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, c: char) {
        *self.counts.entry(c).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn record_str(&mut self, s: &str) {
        for c in s.chars() {
            self.record(c);
        }
    }

    pub fn count(&self, c: char) -> u64 {
        self.counts.get(&c).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Characters seen that are not in `universe`
    pub fn outside(&self, universe: &CharacterUniverse) -> Vec<char> {
        let mut stray: Vec<char> = self
            .counts
            .keys()
            .copied()
            .filter(|c| !universe.contains(*c))
            .collect();
        stray.sort_unstable();
        stray
    }

    /// Pearson chi-square statistic against a uniform distribution over `universe`
    pub fn chi_square(&self, universe: &CharacterUniverse) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        let expected = self.total as f64 / universe.len() as f64;
        universe
            .as_slice()
            .iter()
            .map(|c| {
                let diff = self.count(*c) as f64 - expected;
                diff * diff / expected
            })
            .sum()
    }

    /// True if the counts are consistent with a uniform distribution at p = 1e-4
    pub fn looks_uniform(&self, universe: &CharacterUniverse) -> bool {
        let df = universe.len().saturating_sub(1).max(1);
        self.chi_square(universe) <= chi_square_critical(df)
    }
}

/// Approximate upper critical value of chi-square with `df` degrees of freedom
/// at p = 1e-4 (Wilson-Hilferty)
pub fn chi_square_critical(df: usize) -> f64 {
    let k = df as f64;
    let h = 2.0 / (9.0 * k);
    k * (1.0 - h + Z_P_0001 * h.sqrt()).powi(3)
}

/// Generate `samples` secrets and tally every character
pub fn sample_frequencies<R: RngCore + CryptoRng>(
    options: &SecretOptions,
    samples: usize,
    rng: &mut R,
) -> VaultResult<FrequencyTable> {
    let mut table = FrequencyTable::new();
    for _ in 0..samples {
        let secret = SecretGenerator::generate_with_rng(options, rng)?;
        table.record_str(secret.as_str());
    }
    Ok(table)
}
