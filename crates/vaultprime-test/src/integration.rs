//! End-to-end checks across both generators
//!
//! - Identifier ordering under controlled and system clocks
//! - Concurrent generation from many threads
//! - Generated secrets scored by the strength classifier

use std::collections::HashSet;
use std::thread::{self, JoinHandle};

use vaultprime_core::{SequentialId, SystemTicks};
use vaultprime_crypto::{evaluate, SecretGenerator, SecretOptions, Strength};

use crate::tick_simulator::{generate_sequence, ordering_violations, SteppedTicks};

/// Outcome of a concurrent generation run
#[derive(Debug, Default)]
pub struct ConcurrencyReport {
    pub ids_generated: usize,
    pub unique_ids: usize,
    pub secrets_generated: usize,
    pub secret_failures: usize,
}

impl ConcurrencyReport {
    pub fn all_unique(&self) -> bool {
        self.ids_generated == self.unique_ids
    }
}

/// Generate identifiers and secrets from `threads` threads with no coordination
pub fn run_concurrent(threads: usize, per_thread: usize) -> ConcurrencyReport {
    let handles: Vec<_> = (0..threads)
        .map(|_| {
            thread::spawn(move || {
                let ids: Vec<SequentialId> =
                    (0..per_thread).map(|_| SequentialId::generate()).collect();
                let failures = (0..per_thread)
                    .filter(|_| SecretGenerator::generate(&SecretOptions::default()).is_err())
                    .count();
                (ids, failures)
            })
        })
        .collect();

    collect_report(handles, per_thread)
}

/// Join generator threads, re-raising the first panic
fn collect_report(
    handles: Vec<JoinHandle<(Vec<SequentialId>, usize)>>,
    per_thread: usize,
) -> ConcurrencyReport {
    let mut report = ConcurrencyReport::default();
    let mut seen = HashSet::new();
    for handle in handles {
        let (ids, failures) = handle.join().expect("generator thread panicked");
        report.ids_generated += ids.len();
        seen.extend(ids);
        report.secrets_generated += per_thread;
        report.secret_failures += failures;
    }
    report.unique_ids = seen.len();
    report
}

/// Distribution of strength tiers over `samples` secrets
pub fn strength_profile(options: &SecretOptions, samples: usize) -> [usize; 4] {
    let mut tiers = [0usize; 4];
    for _ in 0..samples {
        if let Ok(secret) = SecretGenerator::generate(options) {
            tiers[evaluate(secret.as_str()) as usize] += 1;
        }
    }
    tiers
}

/// Identifiers from a clock stepping by one tick are strictly ordered
pub fn test_stepped_clock_ordering(count: usize) -> bool {
    let clock = SteppedTicks::new(1 << 44, 1);
    let ids = generate_sequence(&clock, count, 0xC0FFEE);
    ordering_violations(&ids) == 0 && ids.windows(2).all(|w| w[0] < w[1])
}

/// Identifiers from the system clock never embed a suffix older than a prior one,
/// except across a 48-bit wrap
pub fn test_system_clock_suffix_monotonic(count: usize) -> bool {
    let mut rng = rand::thread_rng();
    let ids: Vec<SequentialId> = (0..count)
        .map(|_| SequentialId::generate_with(&SystemTicks, &mut rng))
        .collect();
    ids.windows(2).all(|w| {
        let (a, b) = (w[0].timestamp_suffix(), w[1].timestamp_suffix());
        b >= a || a - b > 1 << 47
    })
}
