//! Turns an assessed entry plus the user's prior history into display-ready
//! wellness suggestions.
//!
//! The rule-based path is always computed and is the answer of record. When a
//! [`TextGenerator`] is configured the engine asks it first and only keeps the
//! reply if something usable can be parsed out of it.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use super::sentiment::SentimentScore;
use super::stress::StressLevel;
use super::trends::{HistorySeries, TrendAlert, TrendAnalyzer};
use crate::services::generation::TextGenerator;

pub const STRESS_RELIEF: &str =
    "🧘 Your stress level looks high today. Try a 5-minute breathing exercise or a short walk to reset.";
pub const MOOD_CHECK_IN: &str =
    "💬 Today felt a bit heavy. Consider checking in with a friend or writing down one thing that went okay.";
pub const POSITIVE_REINFORCEMENT: &str =
    "🌟 Great energy today! Note what went well so you can do more of it.";
pub const MAINTAIN_BALANCE: &str =
    "⚖️ You're holding steady. Keep up the basics: regular sleep, some movement, and time offline.";
pub const DECLINE_ADVICE: &str =
    "🌤️ Your mood over the last week is below your usual. Prioritise rest and get some daylight every day.";
pub const CHRONIC_STRESS_ADVICE: &str =
    "📅 High stress shows up on many of your logged days. Review your schedule for something you can drop or delegate.";

const MIN_GENERATED_ITEMS: usize = 2;
const MAX_GENERATED_ITEMS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Generated,
    Rules,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestionSet {
    pub items: Vec<String>,
    pub source: SuggestionSource,
}

pub struct SuggestionEngine {
    trends: TrendAnalyzer,
    generator: Option<Arc<dyn TextGenerator>>,
}

impl SuggestionEngine {
    /// Rule-based engine with no generation backend.
    pub fn new(trends: TrendAnalyzer) -> Self {
        Self {
            trends,
            generator: None,
        }
    }

    pub fn with_generator(mut self, generator: Arc<dyn TextGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn trends(&self) -> &TrendAnalyzer {
        &self.trends
    }

    pub fn generation_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// One current-entry message followed by one message per trend alert,
    /// deduplicated. Never empty.
    pub fn rule_based(
        &self,
        score: SentimentScore,
        level: StressLevel,
        history: &HistorySeries,
    ) -> Vec<String> {
        let mut items = vec![current_entry_suggestion(score, level).to_string()];
        items.extend(
            self.trends
                .analyze(history)
                .iter()
                .map(|alert| alert_suggestion(alert).to_string()),
        );
        dedup_preserving_order(items)
    }

    /// Never fails: any generation problem degrades to [`Self::rule_based`].
    pub async fn suggest(
        &self,
        score: SentimentScore,
        level: StressLevel,
        raw_text: &str,
        history: &HistorySeries,
    ) -> SuggestionSet {
        let rules = SuggestionSet {
            items: self.rule_based(score, level, history),
            source: SuggestionSource::Rules,
        };

        let Some(generator) = &self.generator else {
            return rules;
        };

        let prompt = self.build_prompt(score, level, raw_text, history);
        match generator.generate(&prompt, MAX_GENERATED_ITEMS).await {
            Ok(reply) => {
                let items = parse_generated(&reply);
                if items.is_empty() {
                    tracing::warn!("Generator returned no usable lines, using rule-based suggestions");
                    rules
                } else {
                    SuggestionSet {
                        items,
                        source: SuggestionSource::Generated,
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Suggestion generation failed, using rule-based suggestions");
                rules
            }
        }
    }

    pub fn build_prompt(
        &self,
        score: SentimentScore,
        level: StressLevel,
        raw_text: &str,
        history: &HistorySeries,
    ) -> String {
        let window = self.trends.window();
        let history_line = match self.trends.summarize_recent(history) {
            Some(summary) => format!(
                "recent {}-day mood average {:.1}/10, {} high-stress day(s) in that period",
                window, summary.mood_avg, summary.high_stress_days
            ),
            None => format!("no data (fewer than {} entries logged)", window),
        };

        format!(
            r#"You are a supportive wellness coach. A user just wrote this journal entry:

"""
{}
"""

Sentiment score: {:.3} (scale -1 to 1)
Stress level: {}
History: {}

Reply with {}-{} short, practical wellness suggestions. Put each suggestion on its own line and start every line with an emoji or a bullet. Do not add any other text."#,
            raw_text.trim(),
            score,
            level,
            history_line,
            MIN_GENERATED_ITEMS,
            MAX_GENERATED_ITEMS,
        )
    }
}

pub fn current_entry_suggestion(score: SentimentScore, level: StressLevel) -> &'static str {
    if level == StressLevel::High {
        STRESS_RELIEF
    } else if score < 0.0 && level == StressLevel::Medium {
        MOOD_CHECK_IN
    } else if score > 0.5 {
        POSITIVE_REINFORCEMENT
    } else {
        MAINTAIN_BALANCE
    }
}

pub fn alert_suggestion(alert: &TrendAlert) -> &'static str {
    match alert {
        TrendAlert::Decline { .. } => DECLINE_ADVICE,
        TrendAlert::ChronicStress { .. } => CHRONIC_STRESS_ADVICE,
    }
}

/// Keeps lines that look like bullets (first character not alphanumeric).
/// If none do, keeps every non-empty line instead.
pub fn parse_generated(reply: &str) -> Vec<String> {
    let lines: Vec<&str> = reply
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let bulleted: Vec<String> = lines
        .iter()
        .filter(|line| line.chars().next().is_some_and(|c| !c.is_alphanumeric()))
        .map(|line| line.to_string())
        .collect();

    if bulleted.is_empty() {
        dedup_preserving_order(lines.into_iter().map(String::from).collect())
    } else {
        dedup_preserving_order(bulleted)
    }
}

pub fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}
