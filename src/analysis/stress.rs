use serde::{Deserialize, Serialize};

use super::sentiment::SentimentScore;

/// Coarse stress label derived from an entry's sentiment score and mood rating.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "stress_level", rename_all = "lowercase")]
pub enum StressLevel {
    Low,
    Medium,
    High,
}

impl StressLevel {
    /// Display order used by charts.
    pub const ALL: [StressLevel; 3] = [StressLevel::Low, StressLevel::Medium, StressLevel::High];

    /// Either signal alone can escalate severity; both must look good for Low.
    /// Branches are checked in order and the first match wins.
    pub fn classify(score: SentimentScore, mood: i32) -> Self {
        if score <= -0.5 || mood <= 3 {
            StressLevel::High
        } else if score < 0.0 || mood <= 5 {
            StressLevel::Medium
        } else {
            StressLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressLevel::Low => "Low",
            StressLevel::Medium => "Medium",
            StressLevel::High => "High",
        }
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
