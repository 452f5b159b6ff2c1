use serde::Serialize;

use super::stress::StressLevel;
use crate::models::journal_entry::JournalEntry;

/// Date-ordered, read-only snapshot of one user's journal.
#[derive(Debug, Clone, Default)]
pub struct HistorySeries {
    entries: Vec<JournalEntry>,
}

impl HistorySeries {
    pub fn new(mut entries: Vec<JournalEntry>) -> Self {
        entries.sort_by_key(|e| e.entry_date);
        Self { entries }
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `n` entries by date (all of them if fewer).
    pub fn recent(&self, n: usize) -> &[JournalEntry] {
        &self.entries[self.entries.len().saturating_sub(n)..]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TrendAlert {
    /// Recent mood is clearly below the user's long-run average.
    Decline {
        recent_mood_avg: f64,
        overall_mood_avg: f64,
    },
    /// High stress shows up on too large a share of logged days.
    ChronicStress { high_stress_fraction: f64 },
}

/// Snapshot of the recent window used when describing history in a prompt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecentSummary {
    pub mood_avg: f64,
    pub high_stress_days: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct TrendAnalyzer {
    window: usize,
    decline_ratio: f64,
    chronic_stress_fraction: f64,
}

impl Default for TrendAnalyzer {
    fn default() -> Self {
        Self {
            window: 7,
            decline_ratio: 0.9,
            chronic_stress_fraction: 0.3,
        }
    }
}

impl TrendAnalyzer {
    pub fn window(&self) -> usize {
        self.window
    }

    /// Below `window` entries no alert is ever raised.
    pub fn analyze(&self, history: &HistorySeries) -> Vec<TrendAlert> {
        if history.len() < self.window {
            return Vec::new();
        }

        let mut alerts = Vec::new();

        let recent_mood_avg = mean_mood(history.recent(self.window));
        let overall_mood_avg = mean_mood(history.entries());
        if recent_mood_avg < overall_mood_avg * self.decline_ratio {
            alerts.push(TrendAlert::Decline {
                recent_mood_avg,
                overall_mood_avg,
            });
        }

        let high_stress_fraction =
            count_high_stress(history.entries()) as f64 / history.len() as f64;
        if high_stress_fraction > self.chronic_stress_fraction {
            alerts.push(TrendAlert::ChronicStress {
                high_stress_fraction,
            });
        }

        alerts
    }

    /// `None` when there is not yet a full window of history.
    pub fn summarize_recent(&self, history: &HistorySeries) -> Option<RecentSummary> {
        if history.len() < self.window {
            return None;
        }
        let recent = history.recent(self.window);
        Some(RecentSummary {
            mood_avg: mean_mood(recent),
            high_stress_days: count_high_stress(recent),
        })
    }
}

pub fn mean_mood(entries: &[JournalEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    entries.iter().map(|e| e.mood_rating as f64).sum::<f64>() / entries.len() as f64
}

fn count_high_stress(entries: &[JournalEntry]) -> usize {
    entries
        .iter()
        .filter(|e| e.stress_level == StressLevel::High)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(moods: &[i32], high_days: &[usize]) -> HistorySeries {
        let entries = moods
            .iter()
            .enumerate()
            .map(|(i, &mood)| {
                let level = if high_days.contains(&i) {
                    StressLevel::High
                } else {
                    StressLevel::Low
                };
                JournalEntry::fixture(i as i64, mood, level)
            })
            .collect();
        HistorySeries::new(entries)
    }

    #[test]
    fn test_history_series_sorts_by_date() {
        let entries = vec![
            JournalEntry::fixture(3, 5, StressLevel::Low),
            JournalEntry::fixture(1, 6, StressLevel::Low),
            JournalEntry::fixture(2, 7, StressLevel::Low),
        ];
        let series = HistorySeries::new(entries);
        let moods: Vec<i32> = series.entries().iter().map(|e| e.mood_rating).collect();
        assert_eq!(moods, vec![6, 7, 5]);
        assert_eq!(series.recent(2).len(), 2);
        assert_eq!(series.recent(10).len(), 3);
    }

    #[test]
    fn test_short_history_never_alerts() {
        let analyzer = TrendAnalyzer::default();
        // Every entry High and mood crashing, but only 6 entries.
        let h = history(&[10, 10, 10, 1, 1, 1], &[0, 1, 2, 3, 4, 5]);
        assert!(analyzer.analyze(&h).is_empty());
        assert!(analyzer.analyze(&HistorySeries::default()).is_empty());
    }

    #[test]
    fn test_seven_entries_recent_equals_overall_no_decline() {
        let analyzer = TrendAnalyzer::default();
        let h = history(&[8, 8, 8, 8, 2, 2, 2], &[]);
        let alerts = analyzer.analyze(&h);
        assert!(!alerts.iter().any(|a| matches!(a, TrendAlert::Decline { .. })));
    }

    #[test]
    fn test_ten_entries_recent_drop_fires_decline() {
        let analyzer = TrendAnalyzer::default();
        // overall 6.2, recent 5.0 < 5.58
        let h = history(&[9, 9, 9, 5, 5, 5, 5, 5, 5, 5], &[]);
        let alerts = analyzer.analyze(&h);
        assert_eq!(alerts.len(), 1);
        match &alerts[0] {
            TrendAlert::Decline {
                recent_mood_avg,
                overall_mood_avg,
            } => {
                assert!((recent_mood_avg - 5.0).abs() < 1e-9);
                assert!((overall_mood_avg - 6.2).abs() < 1e-9);
            }
            other => panic!("expected Decline, got {:?}", other),
        }
    }

    #[test]
    fn test_chronic_stress_threshold_is_strict() {
        let analyzer = TrendAnalyzer::default();
        let moods = [7; 10];

        let four_high = history(&moods, &[0, 2, 4, 6]);
        assert_eq!(
            analyzer.analyze(&four_high),
            vec![TrendAlert::ChronicStress {
                high_stress_fraction: 0.4
            }]
        );

        let three_high = history(&moods, &[0, 2, 4]);
        assert!(analyzer.analyze(&three_high).is_empty());
    }

    #[test]
    fn test_both_alerts_in_order() {
        let analyzer = TrendAnalyzer::default();
        let h = history(&[9, 9, 9, 3, 3, 3, 3, 3, 3, 3], &[3, 4, 5, 6, 7]);
        let alerts = analyzer.analyze(&h);
        assert_eq!(alerts.len(), 2);
        assert!(matches!(alerts[0], TrendAlert::Decline { .. }));
        assert!(matches!(alerts[1], TrendAlert::ChronicStress { .. }));
    }

    #[test]
    fn test_analyze_is_idempotent_and_leaves_history_untouched() {
        let analyzer = TrendAnalyzer::default();
        let h = history(&[9, 9, 9, 3, 3, 3, 3, 3, 3, 3], &[3, 4, 5, 6, 7]);
        let before = h.entries().to_vec();
        assert_eq!(analyzer.analyze(&h), analyzer.analyze(&h));
        assert_eq!(h.entries(), before.as_slice());
    }

    #[test]
    fn test_summarize_recent_uses_last_window() {
        let analyzer = TrendAnalyzer::default();
        assert!(analyzer
            .summarize_recent(&history(&[5, 5, 5], &[0]))
            .is_none());

        let h = history(&[1, 1, 7, 7, 7, 7, 7, 7, 7], &[0, 1, 2]);
        let summary = analyzer.summarize_recent(&h).unwrap();
        assert!((summary.mood_avg - 7.0).abs() < 1e-9);
        assert_eq!(summary.high_stress_days, 1);
    }

    #[test]
    fn test_alert_serializes_with_kind_tag() {
        let json = serde_json::to_value(TrendAlert::ChronicStress {
            high_stress_fraction: 0.5,
        })
        .unwrap();
        assert_eq!(json["kind"], "chronic_stress");
        assert_eq!(json["high_stress_fraction"], 0.5);
    }
}
