use serde::{Deserialize, Serialize};
use std::fmt;

/// Match strength clamped to [0.0, 1.0].
///
/// Exactly zero is the designated signal for "could not ground the answer,
/// an arbitrary fallback was used", distinguishing it from a genuine
/// low-but-nonzero similarity match.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Confidence(f64);

impl Confidence {
    /// The ungrounded-fallback signal.
    pub const ZERO: Confidence = Confidence(0.0);
    /// An exact match.
    pub const CERTAIN: Confidence = Confidence(1.0);

    /// Create a new Confidence, clamping to [0.0, 1.0].
    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// Convert an integer percent score (0-100) into a confidence.
    pub fn from_percent(percent: u8) -> Self {
        Self::new(f64::from(percent.min(100)) / 100.0)
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Whether the answer was grounded in an actual match. A fallback answer
    /// always reports exactly zero.
    pub fn is_grounded(self) -> bool {
        self.0 > 0.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Confidence {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Confidence> for f64 {
    fn from(confidence: Confidence) -> Self {
        confidence.0
    }
}
