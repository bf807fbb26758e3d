//! VaultPrime Test Harness - Ordering, distribution and integration checks
//!
//! This crate provides:
//! - Controllable tick sources for identifier ordering tests
//! - Chi-square frequency checks for secret generation
//! - End-to-end and concurrency scenarios

pub mod tick_simulator;
pub mod distribution;
pub mod integration;

pub use tick_simulator::*;
pub use distribution::*;
pub use integration::*;
