//! Tick clock for VaultPrime
//!
//! Time is measured in ticks: 100-nanosecond intervals since
//! 0001-01-01T00:00:00 UTC. All encodings are big-endian so that byte-wise
//! comparison of encoded ticks matches numeric comparison on every host.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Nanoseconds per tick
pub const NANOS_PER_TICK: u64 = 100;

/// Ticks between 0001-01-01 and 1970-01-01
pub const UNIX_EPOCH_TICKS: u64 = 621_355_968_000_000_000;

/// Point in time as a count of 100ns ticks since 0001-01-01 UTC
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ticks(pub u64);

impl Ticks {
    pub const ZERO: Ticks = Ticks(0);
    pub const MAX: Ticks = Ticks(u64::MAX);

    #[inline]
    pub fn new(ticks: u64) -> Self {
        Ticks(ticks)
    }

    /// Convert a wall-clock time. Times before the Unix epoch clamp to it.
    pub fn from_system_time(time: SystemTime) -> Self {
        let since_unix = time.duration_since(UNIX_EPOCH).unwrap_or(Duration::ZERO);
        let ticks = since_unix.as_nanos() / NANOS_PER_TICK as u128;
        let ticks = u64::try_from(ticks).unwrap_or(u64::MAX);
        Ticks(UNIX_EPOCH_TICKS.saturating_add(ticks))
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0
    }

    /// Big-endian (most significant byte first) encoding
    #[inline]
    pub fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    #[inline]
    pub fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Ticks(u64::from_be_bytes(bytes))
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        let ticks = duration.as_nanos() / NANOS_PER_TICK as u128;
        Ticks(self.0.saturating_add(u64::try_from(ticks).unwrap_or(u64::MAX)))
    }
}

impl std::fmt::Debug for Ticks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Ticks({})", self.0)
    }
}

/// Source of the current tick count
pub trait TickSource: Send + Sync {
    fn now(&self) -> Ticks;
}

/// Wall-clock tick source (UTC)
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemTicks;

impl TickSource for SystemTicks {
    #[inline]
    fn now(&self) -> Ticks {
        Ticks::from_system_time(SystemTime::now())
    }
}

impl<T: TickSource + ?Sized> TickSource for &T {
    #[inline]
    fn now(&self) -> Ticks {
        (**self).now()
    }
}
