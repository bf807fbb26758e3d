//! VaultPrime Core - Fundamental value types
//!
//! This crate defines the types shared across VaultPrime:
//! - Sequential (COMB) identifiers
//! - Tick clock primitives
//! - Error types

pub mod id;
pub mod time;
pub mod error;

pub use id::*;
pub use time::*;
pub use error::*;
