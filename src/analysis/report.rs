//! Score reports, levels and the score accumulator shared by every scorer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse grade derived from a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Critical,
    Low,
    Medium,
    Good,
    Excellent,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Critical => "Critical",
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        };
        f.write_str(label)
    }
}

/// Grade of the suspicious-site score (higher score = more suspicious)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SuspicionLevel {
    Normal,
    Caution,
    Suspicious,
    #[serde(rename = "Very suspicious")]
    VerySuspicious,
}

impl SuspicionLevel {
    /// Maps a suspicious-site score to its level (strict thresholds)
    pub fn for_score(score: u8) -> Self {
        if score > 70 {
            Self::VerySuspicious
        } else if score > 50 {
            Self::Suspicious
        } else if score > 25 {
            Self::Caution
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for SuspicionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "Normal",
            Self::Caution => "Caution",
            Self::Suspicious => "Suspicious",
            Self::VerySuspicious => "Very suspicious",
        };
        f.write_str(label)
    }
}

/// Fixed score thresholds of one module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelScale {
    pub excellent: u8,
    pub good: u8,
    pub medium: u8,
    /// Level below the `medium` threshold
    pub floor: Level,
}

impl LevelScale {
    pub const fn new(excellent: u8, good: u8, medium: u8, floor: Level) -> Self {
        Self {
            excellent,
            good,
            medium,
            floor,
        }
    }

    /// Maps a score to its level (inclusive thresholds)
    pub fn level_for(&self, score: u8) -> Level {
        if score >= self.excellent {
            Level::Excellent
        } else if score >= self.good {
            Level::Good
        } else if score >= self.medium {
            Level::Medium
        } else {
            self.floor
        }
    }
}

pub const SEO_SCALE: LevelScale = LevelScale::new(80, 60, 40, Level::Low);
pub const ACCESSIBILITY_SCALE: LevelScale = LevelScale::new(90, 70, 50, Level::Low);
pub const PERFORMANCE_SCALE: LevelScale = LevelScale::new(80, 60, 40, Level::Low);
pub const SECURITY_SCALE: LevelScale = LevelScale::new(90, 70, 50, Level::Critical);

/// Outcome of one scoring module
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport<D, L = Level> {
    /// Final score, always within 0..=100
    pub score: u8,
    pub level: L,
    /// Problems found, in rule order
    pub issues: Vec<String>,
    /// Positive findings, in rule order
    pub good_points: Vec<String>,
    pub details: D,
}

/// Rounds and clamps a raw score into 0..=100
pub fn clamp_score(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

/// Running score with the issues and good points collected so far
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreTally {
    raw: f64,
    issues: Vec<String>,
    good_points: Vec<String>,
}

impl ScoreTally {
    pub fn starting_at(raw: f64) -> Self {
        Self {
            raw,
            issues: Vec::new(),
            good_points: Vec::new(),
        }
    }

    /// Adds a signed delta without a message
    pub fn adjust(&mut self, delta: f64) {
        self.raw += delta;
    }

    pub fn issue(&mut self, message: impl Into<String>) {
        self.issues.push(message.into());
    }

    pub fn good(&mut self, message: impl Into<String>) {
        self.good_points.push(message.into());
    }

    /// Adds points and records a good point
    pub fn reward(&mut self, points: f64, message: impl Into<String>) {
        self.adjust(points);
        self.good(message);
    }

    /// Removes points and records an issue
    pub fn penalize(&mut self, points: f64, message: impl Into<String>) {
        self.adjust(-points);
        self.issue(message);
    }

    /// Score before rounding and clamping
    pub fn raw(&self) -> f64 {
        self.raw
    }

    /// Score after rounding and clamping
    pub fn score(&self) -> u8 {
        clamp_score(self.raw)
    }

    /// Finishes with one of the fixed module scales
    pub fn finish<D>(self, scale: &LevelScale, details: D) -> ScoreReport<D> {
        self.finish_with(|score| scale.level_for(score), details)
    }

    /// Finishes with a custom level mapping
    pub fn finish_with<D, L>(self, level_for: impl Fn(u8) -> L, details: D) -> ScoreReport<D, L> {
        let score = self.score();
        ScoreReport {
            score,
            level: level_for(score),
            issues: self.issues,
            good_points: self.good_points,
            details,
        }
    }
}
