//! Confidence tiers derived from similarity scores.

use std::fmt;

/// Lowest score classified as [`ScoreTier::High`].
pub const HIGH_THRESHOLD: f64 = 0.8;

/// Lowest score classified as [`ScoreTier::Medium`].
pub const MEDIUM_THRESHOLD: f64 = 0.7;

/// Coarse confidence band used when presenting a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScoreTier {
    High,
    Medium,
    Low,
}

impl ScoreTier {
    /// Classify a similarity score. Each band includes its lower bound.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_THRESHOLD {
            ScoreTier::High
        } else if score >= MEDIUM_THRESHOLD {
            ScoreTier::Medium
        } else {
            ScoreTier::Low
        }
    }

    /// Badge color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            ScoreTier::High => "#22c55e",   // green
            ScoreTier::Medium => "#3b82f6", // blue
            ScoreTier::Low => "#f59e0b",    // orange
        }
    }

    /// ANSI foreground escape closest to [`ScoreTier::color`].
    pub fn ansi(self) -> &'static str {
        match self {
            ScoreTier::High => "\x1b[32m",
            ScoreTier::Medium => "\x1b[34m",
            ScoreTier::Low => "\x1b[33m",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScoreTier::High => "high",
            ScoreTier::Medium => "medium",
            ScoreTier::Low => "low",
        }
    }
}

impl fmt::Display for ScoreTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Shorthand for [`ScoreTier::from_score`].
pub fn tier(score: f64) -> ScoreTier {
    ScoreTier::from_score(score)
}
