//! Sequential (COMB) identifiers
//!
//! A `SequentialId` is 128 bits laid out as:
//!
//! ```text
//! [ random prefix : 10 bytes ][ tick suffix : 6 bytes ]
//! ```
//!
//! The suffix is bytes 2..8 of the big-endian tick count, i.e. the low 48 bits
//! of the timestamp, most significant byte first.
//!
//! Ordering compares the suffix bytes first and the prefix bytes second, the
//! same grouping SQL Server applies to `uniqueidentifier` keys. An identifier
//! taken at a later tick therefore sorts after one taken at an earlier tick.
//! The prefix carries no ordering; two identifiers from the same tick are
//! ordered arbitrarily. `as_u128` exposes the plain storage order.
//!
//! The 48-bit suffix wraps every 2^48 ticks (about 325.8 days). Ordering holds
//! for identifiers whose tick counts share the same upper 16 bits.

use std::fmt;
use std::str::FromStr;

use rand::RngCore;
use uuid::Uuid;

use crate::time::{SystemTicks, TickSource, Ticks};

/// Total identifier size in bytes
pub const ID_LEN: usize = 16;
/// Random prefix size in bytes
pub const PREFIX_LEN: usize = 10;
/// Tick suffix size in bytes
pub const SUFFIX_LEN: usize = 6;

/// Most significant tick bytes dropped from the suffix
const TICK_SKIP: usize = 2;

/// 128-bit identifier whose trailing bytes increase with creation time
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SequentialId(Uuid);

impl SequentialId {
    pub const NIL: SequentialId = SequentialId(Uuid::nil());

    /// Generate an identifier from the system clock.
    ///
    /// Always succeeds; there is no shared counter and no fallible resource.
    pub fn generate() -> Self {
        Self::generate_with(&SystemTicks, &mut rand::thread_rng())
    }

    /// Generate an identifier from an explicit tick source and RNG.
    ///
    /// The RNG only needs to be well distributed, not unpredictable.
    pub fn generate_with<T, R>(clock: &T, rng: &mut R) -> Self
    where
        T: TickSource + ?Sized,
        R: RngCore + ?Sized,
    {
        let mut bytes = [0u8; ID_LEN];
        rng.fill_bytes(&mut bytes);
        Self::from_parts(&bytes, clock.now())
    }

    /// Overwrite the last 6 bytes of `random` with the tick suffix.
    pub fn from_parts(random: &[u8; ID_LEN], ticks: Ticks) -> Self {
        let mut bytes = *random;
        let tick_bytes = ticks.to_be_bytes();
        bytes[PREFIX_LEN..].copy_from_slice(&tick_bytes[TICK_SKIP..]);

        let id = SequentialId(Uuid::from_bytes(bytes));
        tracing::trace!(%id, ticks = ticks.as_u64(), "generated sequential id");
        id
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; ID_LEN]) -> Self {
        SequentialId(Uuid::from_bytes(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; ID_LEN] {
        self.0.as_bytes()
    }

    #[inline]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// The 10 random leading bytes
    pub fn random_prefix(&self) -> [u8; PREFIX_LEN] {
        let mut prefix = [0u8; PREFIX_LEN];
        prefix.copy_from_slice(&self.as_bytes()[..PREFIX_LEN]);
        prefix
    }

    /// The embedded 48-bit tick value
    pub fn timestamp_suffix(&self) -> u64 {
        let mut wide = [0u8; 8];
        wide[TICK_SKIP..].copy_from_slice(&self.as_bytes()[PREFIX_LEN..]);
        u64::from_be_bytes(wide)
    }

    /// The full 128 bits as a big-endian unsigned integer, in storage order
    #[inline]
    pub fn as_u128(&self) -> u128 {
        self.0.as_u128()
    }

    /// The 128 bits regrouped as suffix then prefix; `Ord` follows this value
    pub fn sort_key(&self) -> u128 {
        let mut key = [0u8; ID_LEN];
        key[..SUFFIX_LEN].copy_from_slice(&self.as_bytes()[PREFIX_LEN..]);
        key[SUFFIX_LEN..].copy_from_slice(&self.as_bytes()[..PREFIX_LEN]);
        u128::from_be_bytes(key)
    }
}

impl Ord for SequentialId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        let (a, b) = (self.as_bytes(), other.as_bytes());
        a[PREFIX_LEN..]
            .cmp(&b[PREFIX_LEN..])
            .then_with(|| a[..PREFIX_LEN].cmp(&b[..PREFIX_LEN]))
    }
}

impl PartialOrd for SequentialId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Uuid> for SequentialId {
    fn from(uuid: Uuid) -> Self {
        SequentialId(uuid)
    }
}

impl From<SequentialId> for Uuid {
    fn from(id: SequentialId) -> Self {
        id.0
    }
}

impl FromStr for SequentialId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(SequentialId)
    }
}

impl fmt::Debug for SequentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SeqId({})", self.0.hyphenated())
    }
}

/// Canonical 8-4-4-4-12 lowercase hexadecimal form
impl fmt::Display for SequentialId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

/// Generate a sequential identifier from the system clock
#[inline]
pub fn generate_sequential_id() -> SequentialId {
    SequentialId::generate()
}
