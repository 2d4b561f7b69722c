//! Live typing metrics, computed from the session state on demand.

use chrono::{DateTime, Utc};

/// Whole seconds since `started_at`, or 0 when the session isn't running.
pub fn elapsed_seconds(
    is_active: bool,
    started_at: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> u64 {
    match (is_active, started_at) {
        (true, Some(start)) => (now - start).num_seconds().max(0) as u64,
        _ => 0,
    }
}

/// Number of whitespace-delimited, non-empty tokens.
pub fn word_count(input: &str) -> usize {
    input.split_whitespace().count()
}

/// Words per minute over `elapsed_secs`; 0 until a full second has passed.
pub fn wpm(input: &str, elapsed_secs: u64) -> u32 {
    if elapsed_secs == 0 {
        return 0;
    }

    let minutes = elapsed_secs as f64 / 60.0;
    let rate = word_count(input) as f64 / minutes;

    if rate.is_finite() {
        rate.round() as u32
    } else {
        0
    }
}

/// Positions where the input matches the target, compared index by index.
pub fn correct_chars(input: &str, target: &str) -> usize {
    input
        .chars()
        .zip(target.chars())
        .filter(|(typed, expected)| typed == expected)
        .count()
}

/// Percentage of correct characters in `input`, 100 for empty input.
pub fn accuracy(input: &str, target: &str) -> u32 {
    let total = input.chars().count();
    if total == 0 {
        return 100;
    }

    let pct = 100.0 * correct_chars(input, target) as f64 / total as f64;

    if pct.is_finite() {
        pct.round().clamp(0.0, 100.0) as u32
    } else {
        100
    }
}
