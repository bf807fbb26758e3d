//! Controllable tick sources for ordering tests
//!
//! The system clock can return the same tick twice or, after an adjustment,
//! go backwards. These sources produce exactly the sequence a test asks for.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vaultprime_core::{SequentialId, TickSource, Ticks};

/// Strictly increasing tick source: `start`, `start + step`, ...
pub struct SteppedTicks {
    next: AtomicU64,
    step: u64,
}

impl SteppedTicks {
    /// A zero step is bumped to 1 so the sequence stays strictly increasing
    pub fn new(start: u64, step: u64) -> Self {
        SteppedTicks {
            next: AtomicU64::new(start),
            step: step.max(1),
        }
    }

    /// Tick the next call to `now` will return
    pub fn peek(&self) -> Ticks {
        Ticks::new(self.next.load(Ordering::SeqCst))
    }
}

impl TickSource for SteppedTicks {
    fn now(&self) -> Ticks {
        Ticks::new(self.next.fetch_add(self.step, Ordering::SeqCst))
    }
}

/// Replays a fixed list of ticks, repeating the last one when exhausted
pub struct ScriptedTicks {
    ticks: Vec<u64>,
    cursor: AtomicUsize,
}

impl ScriptedTicks {
    pub fn new(ticks: Vec<u64>) -> Self {
        ScriptedTicks {
            ticks,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Strictly increasing script with random gaps in `1..=max_gap`
    pub fn increasing(start: u64, count: usize, max_gap: u64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut tick = start;
        let ticks = (0..count)
            .map(|_| {
                tick += rng.gen_range(1..=max_gap.max(1));
                tick
            })
            .collect();
        Self::new(ticks)
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

impl TickSource for ScriptedTicks {
    fn now(&self) -> Ticks {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let tick = self
            .ticks
            .get(index)
            .or_else(|| self.ticks.last())
            .copied()
            .unwrap_or(0);
        Ticks::new(tick)
    }
}

/// Generate `count` identifiers from `clock`, seeding the prefix RNG with `seed`
pub fn generate_sequence<T: TickSource>(clock: &T, count: usize, seed: u64) -> Vec<SequentialId> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| SequentialId::generate_with(clock, &mut rng))
        .collect()
}

/// Number of adjacent pairs where the later identifier sorts lower
pub fn ordering_violations(ids: &[SequentialId]) -> usize {
    ids.windows(2).filter(|pair| pair[1] < pair[0]).count()
}
