use crate::clock::Clock;
use crate::history::{parse_history, parse_leaderboard, HistoryEntry, Leaderboard};
use crate::library::{Tier, WordLibrary};
use crate::metrics;
use crate::session::{LiveStats, SessionState};
use crate::storage::{Storage, HISTORY_KEY, LEADERBOARD_KEY};
use chrono::{DateTime, Utc};
use itertools::Itertools;
use rand::seq::SliceRandom;
use tracing::{debug, info, warn};

/// Owns the practice session: text generation, input tracking, live
/// metrics, and the persisted history and leaderboard.
///
/// All operations are total. Storage failures are logged and never
/// interrupt the in-memory session.
pub struct SessionManager<S: Storage, C: Clock> {
    library: WordLibrary,
    storage: S,
    clock: C,
    state: SessionState,
    history: Vec<HistoryEntry>,
}

impl<S: Storage, C: Clock> SessionManager<S, C> {
    /// Build a manager and load any persisted history.
    pub fn new(library: WordLibrary, storage: S, clock: C) -> Self {
        let mut manager = Self {
            library,
            storage,
            clock,
            state: SessionState::default(),
            history: Vec::new(),
        };
        manager.load_history();
        manager
    }

    /// Shuffle the tier's words, take its configured count and make them the
    /// new target text.
    pub fn generate_text(&mut self, tier: Tier) {
        let count = self.library.config(tier).count;
        let mut words: Vec<&String> = self.library.words(tier).iter().collect();
        words.shuffle(&mut rand::thread_rng());

        let text = words.into_iter().take(count).join(" ");
        debug!(%tier, chars = text.len(), "generated practice text");
        self.state.reset_with(text);
    }

    /// Practise a caller-supplied text instead of a generated one.
    pub fn use_custom_text(&mut self, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.generate_text(self.state.difficulty);
        } else {
            self.state.reset_with(text.to_string());
        }
    }

    pub fn start_session(&mut self) {
        if self.state.input_len() == self.state.target_len() {
            self.generate_text(self.state.difficulty);
        }

        if !self.state.is_active {
            let now = self.clock.now();
            self.state.is_active = true;
            self.state.started_at = Some(now);
            self.state.live_stats.started_at = Some(now);
            debug!(difficulty = %self.state.difficulty, "session started");
        }
    }

    /// Finish the running session, record it, and return its entry.
    /// Does nothing when no session is running.
    pub fn end_session(&mut self) -> Option<HistoryEntry> {
        if !self.state.is_active {
            return None;
        }

        let now = self.clock.now();
        let elapsed = self.elapsed_at(now);
        let entry = HistoryEntry {
            date: now,
            difficulty: self.state.difficulty,
            wpm: metrics::wpm(&self.state.user_input, elapsed),
            accuracy: self.accuracy(),
            elapsed_seconds: elapsed,
        };

        self.state.is_active = false;
        self.state.ended_at = Some(now);

        self.history.insert(0, entry.clone());
        self.record_on_leaderboard(&entry);
        self.persist_history();

        info!(
            difficulty = %entry.difficulty,
            wpm = entry.wpm,
            accuracy = entry.accuracy,
            secs = entry.elapsed_seconds,
            "session recorded"
        );
        Some(entry)
    }

    /// Replace the typed input. Input past the end of the target is dropped.
    pub fn update_input(&mut self, value: &str) {
        let limit = self.state.target_len();
        let clamped = match value.char_indices().nth(limit) {
            Some((cut, _)) => &value[..cut],
            None => value,
        };
        self.state.user_input = clamped.to_string();

        if self.state.is_active {
            let elapsed = self.elapsed_seconds();
            let input = &self.state.user_input;
            let target = &self.state.target_text;
            self.state.live_stats = LiveStats {
                wpm: metrics::wpm(input, elapsed),
                accuracy: metrics::accuracy(input, target),
                correct_chars: metrics::correct_chars(input, target),
                total_chars: self.state.input_len(),
                started_at: self.state.started_at,
            };
        }
    }

    pub fn select_difficulty(&mut self, tier: Tier) {
        self.state.difficulty = tier;
        self.generate_text(tier);
    }

    /// Forget all history, in memory and in storage.
    pub fn reset_stats(&mut self) {
        self.history.clear();
        if let Err(err) = self.storage.remove(HISTORY_KEY) {
            warn!(error = %err, "failed to remove persisted history");
        }
    }

    /// Replace in-memory history with the persisted copy. Missing or
    /// unreadable data yields an empty history.
    pub fn load_history(&mut self) {
        self.history = match self.storage.load(HISTORY_KEY) {
            Ok(Some(raw)) => parse_history(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "ignoring malformed history");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(err) => {
                warn!(error = %err, "failed to read history");
                Vec::new()
            }
        };
    }

    /// Abandon the current attempt without recording it.
    pub fn clear_current(&mut self) {
        self.state.user_input.clear();
        self.state.is_active = false;
        self.state.started_at = None;
        self.state.live_stats = LiveStats::default();
    }

    /// The persisted leaderboard, empty when absent or unreadable.
    pub fn leaderboard(&self) -> Leaderboard {
        match self.storage.load(LEADERBOARD_KEY) {
            Ok(Some(raw)) => parse_leaderboard(&raw).unwrap_or_else(|err| {
                warn!(error = %err, "ignoring malformed leaderboard");
                Leaderboard::default()
            }),
            Ok(None) => Leaderboard::default(),
            Err(err) => {
                warn!(error = %err, "failed to read leaderboard");
                Leaderboard::default()
            }
        }
    }

    pub fn clear_leaderboard(&mut self) {
        if let Err(err) = self.storage.remove(LEADERBOARD_KEY) {
            warn!(error = %err, "failed to remove persisted leaderboard");
        }
    }

    fn record_on_leaderboard(&mut self, entry: &HistoryEntry) {
        let mut board = self.leaderboard();
        board.insert(entry.clone());
        let encoded = serde_json::to_string(&board);
        self.write_raw(LEADERBOARD_KEY, encoded);
    }

    fn persist_history(&mut self) {
        let encoded = serde_json::to_string(&self.history);
        self.write_raw(HISTORY_KEY, encoded);
    }

    fn write_raw(&mut self, key: &str, encoded: serde_json::Result<String>) {
        let result = encoded
            .map_err(crate::Error::from)
            .and_then(|raw| self.storage.save(key, &raw));
        if let Err(err) = result {
            warn!(key, error = %err, "failed to persist");
        }
    }

    fn elapsed_at(&self, now: DateTime<Utc>) -> u64 {
        metrics::elapsed_seconds(self.state.is_active, self.state.started_at, now)
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_at(self.clock.now())
    }

    pub fn wpm(&self) -> u32 {
        metrics::wpm(&self.state.user_input, self.elapsed_seconds())
    }

    pub fn accuracy(&self) -> u32 {
        metrics::accuracy(&self.state.user_input, &self.state.target_text)
    }

    /// Whether every character of the target has been typed.
    pub fn is_complete(&self) -> bool {
        !self.state.user_input.is_empty() && self.state.input_len() == self.state.target_len()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn difficulty(&self) -> Tier {
        self.state.difficulty
    }

    pub fn target_text(&self) -> &str {
        &self.state.target_text
    }

    pub fn user_input(&self) -> &str {
        &self.state.user_input
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.state.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.state.ended_at
    }

    pub fn live_stats(&self) -> &LiveStats {
        &self.state.live_stats
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn library(&self) -> &WordLibrary {
        &self.library
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
