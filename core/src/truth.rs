//! Truth values.
//!
//! Every atom carries a mutable (strength, confidence) pair. Changing it never
//! changes the atom's identity.

use std::fmt;

/// Strength at or above which a truth value reads as "true" in crisp logic.
pub const CRISP_THRESHOLD: f64 = 0.5;

/// A simple truth value: strength and confidence, both in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthValue {
    /// Probability-like strength of the assertion.
    pub strength: f64,
    /// How much evidence backs the strength.
    pub confidence: f64,
}

impl TruthValue {
    /// Assigned to atoms when they are first created: true-ish, no evidence.
    pub const DEFAULT: TruthValue = TruthValue {
        strength: 1.0,
        confidence: 0.0,
    };

    /// True and certain.
    pub const TRUE: TruthValue = TruthValue {
        strength: 1.0,
        confidence: 1.0,
    };

    /// False and certain.
    pub const FALSE: TruthValue = TruthValue {
        strength: 0.0,
        confidence: 1.0,
    };

    /// Create a truth value, clamping both components into `[0, 1]`.
    pub fn new(strength: f64, confidence: f64) -> Self {
        Self {
            strength: strength.clamp(0.0, 1.0),
            confidence: confidence.clamp(0.0, 1.0),
        }
    }

    /// Crisp reading of this truth value.
    pub fn is_true(&self) -> bool {
        self.strength >= CRISP_THRESHOLD
    }

    /// True with full confidence.
    pub fn is_certainly_true(&self) -> bool {
        *self == Self::TRUE
    }
}

impl Default for TruthValue {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for TruthValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(stv {} {})", self.strength, self.confidence)
    }
}
