//! Heuristic password strength classification
//!
//! The score is one point per satisfied check:
//! - at least 8 characters
//! - at least 12 characters
//! - contains a lowercase letter
//! - contains an uppercase letter
//! - contains an ASCII digit
//! - contains one of the special characters `!#$%&*@\`
//!
//! This is a coarse heuristic, NOT an entropy estimate. `"Password1!"`-style
//! strings score well while being trivially guessable; do not present the
//! result as a measure of cryptographic strength.

use std::fmt;

use crate::charset::SPECIAL;

/// Highest attainable score
pub const MAX_SCORE: u8 = 6;

/// Ordered strength tiers
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Strength {
    /// Score 0-2
    Weak = 0,
    /// Score 3-4
    Medium = 1,
    /// Score 5
    Strong = 2,
    /// Score 6
    VeryStrong = 3,
}

impl Strength {
    /// Map a score to its tier: 0-2 Weak, 3-4 Medium, 5 Strong, 6+ VeryStrong
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=2 => Strength::Weak,
            3 | 4 => Strength::Medium,
            5 => Strength::Strong,
            _ => Strength::VeryStrong,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
            Strength::VeryStrong => "very strong",
        }
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Count the satisfied checks (0..=6). Length is measured in characters.
pub fn strength_score(candidate: &str) -> u8 {
    if candidate.is_empty() {
        return 0;
    }

    let length = candidate.chars().count();
    let checks = [
        length >= 8,
        length >= 12,
        candidate.chars().any(char::is_lowercase),
        candidate.chars().any(char::is_uppercase),
        candidate.chars().any(|c| c.is_ascii_digit()),
        candidate.chars().any(|c| SPECIAL.contains(c)),
    ];

    checks.iter().filter(|passed| **passed).count() as u8
}

/// Classify a candidate string
pub fn evaluate(candidate: &str) -> Strength {
    Strength::from_score(strength_score(candidate))
}

/// Classify a possibly absent candidate; `None` is Weak.
pub fn evaluate_optional(candidate: Option<&str>) -> Strength {
    candidate.map_or(Strength::Weak, evaluate)
}
