use crate::library::Tier;
use chrono::{DateTime, Utc};

/// Snapshot of the metrics taken on the last input change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiveStats {
    pub wpm: u32,
    pub accuracy: u32,
    pub correct_chars: usize,
    pub total_chars: usize,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for LiveStats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
            correct_chars: 0,
            total_chars: 0,
            started_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub difficulty: Tier,
    pub target_text: String,
    pub user_input: String,
    pub is_active: bool,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub live_stats: LiveStats,
}

impl SessionState {
    /// Install a new target text and drop all progress on the old one.
    pub fn reset_with(&mut self, target_text: String) {
        self.target_text = target_text;
        self.user_input.clear();
        self.is_active = false;
        self.started_at = None;
        self.ended_at = None;
        self.live_stats = LiveStats::default();
    }

    pub fn target_len(&self) -> usize {
        self.target_text.chars().count()
    }

    pub fn input_len(&self) -> usize {
        self.user_input.chars().count()
    }
}
