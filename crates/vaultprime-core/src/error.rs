//! Error types for VaultPrime

use thiserror::Error;

/// Core VaultPrime errors
///
/// Both variants describe bad caller input. They are returned synchronously
/// and never retried or logged by the library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    #[error("Invalid secret length: {length} (must be between {min} and {max})")]
    InvalidLength {
        length: usize,
        min: usize,
        max: usize,
    },

    #[error("Character universe is empty: select at least one character class")]
    EmptyCharacterUniverse,
}

/// Result type for VaultPrime operations
pub type VaultResult<T> = Result<T, VaultError>;
