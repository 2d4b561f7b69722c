use crate::library::Tier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;

/// Entries kept per tier on the leaderboard
pub const LEADERBOARD_SIZE: usize = 10;

/// Result of one finished session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: DateTime<Utc>,
    pub difficulty: Tier,
    pub wpm: u32,
    pub accuracy: u32,
    #[serde(rename = "time")]
    pub elapsed_seconds: u64,
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}  {:<6}  {:>3} wpm  {:>3}% acc  {}s",
            self.date.format("%Y-%m-%d %H:%M"),
            self.difficulty,
            self.wpm,
            self.accuracy,
            self.elapsed_seconds
        )
    }
}

/// Best results per tier, highest wpm first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Leaderboard {
    tiers: BTreeMap<Tier, Vec<HistoryEntry>>,
}

impl Leaderboard {
    /// Add an entry under its tier, keeping that tier sorted and capped.
    /// The sort is stable, so earlier entries win wpm ties.
    pub fn insert(&mut self, entry: HistoryEntry) {
        let ranked = self.tiers.entry(entry.difficulty).or_default();
        ranked.push(entry);
        ranked.sort_by(|a, b| b.wpm.cmp(&a.wpm));
        ranked.truncate(LEADERBOARD_SIZE);
    }

    pub fn top(&self, tier: Tier) -> &[HistoryEntry] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tier, &[HistoryEntry])> {
        self.tiers.iter().map(|(tier, ranked)| (*tier, ranked.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.values().all(Vec::is_empty)
    }
}

/// Decode stored entries one at a time, skipping any that no longer decode.
fn decode_entries(values: Vec<Value>) -> Vec<HistoryEntry> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value(value) {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .collect()
}

/// Stored history, newest first. Fails only when the value is not a JSON array.
pub fn parse_history(raw: &str) -> serde_json::Result<Vec<HistoryEntry>> {
    let values: Vec<Value> = serde_json::from_str(raw)?;
    Ok(decode_entries(values))
}

/// Stored leaderboard. Fails only when the value is not a JSON object; unknown
/// tiers and unreadable entries are dropped so the rest of the board survives.
pub fn parse_leaderboard(raw: &str) -> serde_json::Result<Leaderboard> {
    let stored: BTreeMap<String, Value> = serde_json::from_str(raw)?;

    let mut board = Leaderboard::default();
    for (name, ranked) in stored {
        let Ok(tier) = serde_json::from_value::<Tier>(Value::String(name.clone())) else {
            warn!(tier = %name, "dropping leaderboard for unknown tier");
            continue;
        };
        let Value::Array(values) = ranked else {
            warn!(%tier, "dropping leaderboard that is not a list");
            continue;
        };
        let mut entries = decode_entries(values);
        entries.sort_by(|a, b| b.wpm.cmp(&a.wpm));
        entries.truncate(LEADERBOARD_SIZE);
        board.tiers.insert(tier, entries);
    }
    Ok(board)
}
