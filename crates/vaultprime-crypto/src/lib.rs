//! VaultPrime Crypto - Secret generation and strength classification
//!
//! Provides:
//! - Character universes built from fixed ASCII classes
//! - Secret generation from a cryptographically secure RNG
//! - Heuristic strength classification

pub mod charset;
pub mod secret;
pub mod strength;

pub use charset::*;
pub use secret::*;
pub use strength::*;
