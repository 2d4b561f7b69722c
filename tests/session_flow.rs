// End-to-end behaviour of the session manager through its public API,
// using an in-memory store and a manual clock.

use chrono::{TimeZone, Utc};
use keyrate::clock::ManualClock;
use keyrate::history::LEADERBOARD_SIZE;
use keyrate::storage::{MemoryStorage, Storage, SqliteStorage, HISTORY_KEY, LEADERBOARD_KEY};
use keyrate::{SessionManager, Tier, WordLibrary};

fn manager() -> (SessionManager<MemoryStorage, ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 9, 1, 18, 30, 0).unwrap());
    let manager = SessionManager::new(WordLibrary::embedded(), MemoryStorage::new(), clock.clone());
    (manager, clock)
}

/// Type `typed` against `target` over `secs` seconds and finish.
fn play<S: Storage>(
    manager: &mut SessionManager<S, ManualClock>,
    clock: &ManualClock,
    target: &str,
    typed: &str,
    secs: i64,
) {
    manager.use_custom_text(target);
    manager.start_session();
    clock.advance_secs(secs);
    manager.update_input(typed);
    manager.end_session();
}

#[test]
fn generated_text_matches_tier_config() {
    let (mut manager, _) = manager();
    let library = WordLibrary::embedded();

    for tier in Tier::ALL {
        manager.select_difficulty(tier);
        let words: Vec<&str> = manager.target_text().split(' ').collect();
        let expected = library.config(tier).count.min(library.words(tier).len());

        assert_eq!(words.len(), expected, "{tier}");
        for word in words {
            assert!(
                library.words(tier).iter().any(|w| w == word),
                "{word} is not a {tier} word"
            );
        }
    }
}

#[test]
fn perfect_minute_on_two_words() {
    let (mut manager, clock) = manager();
    manager.use_custom_text("cat dog");
    manager.start_session();
    manager.update_input("cat dog");
    clock.advance_secs(60);

    assert_eq!(manager.accuracy(), 100);
    assert_eq!(manager.wpm(), 2);

    let entry = manager.end_session().unwrap();
    assert_eq!((entry.wpm, entry.accuracy, entry.elapsed_seconds), (2, 100, 60));
}

#[test]
fn one_wrong_char_in_seven() {
    let (mut manager, _) = manager();
    manager.use_custom_text("cat dog");
    manager.start_session();
    manager.update_input("cbt dog");

    assert_eq!(manager.accuracy(), 86);
    assert_eq!(manager.live_stats().correct_chars, 6);
}

#[test]
fn wpm_is_zero_until_a_second_passes() {
    let (mut manager, clock) = manager();
    manager.use_custom_text("cat dog");
    assert_eq!(manager.wpm(), 0);

    manager.start_session();
    manager.update_input("cat dog");
    assert_eq!(manager.wpm(), 0);

    clock.advance_secs(1);
    assert_eq!(manager.wpm(), 120);
}

#[test]
fn leaderboard_stays_sorted_and_capped() {
    let (mut manager, clock) = manager();

    // 1..=15 words typed in one minute each, in a scrambled order
    for n in [7, 3, 12, 1, 15, 9, 4, 11, 2, 14, 6, 13, 5, 10, 8] {
        let text = vec!["go"; n].join(" ");
        play(&mut manager, &clock, &text, &text, 60);

        let board = manager.leaderboard();
        let top = board.top(Tier::Easy);
        assert!(top.len() <= LEADERBOARD_SIZE);
        assert!(top.windows(2).all(|w| w[0].wpm >= w[1].wpm));
    }

    let board = manager.leaderboard();
    let wpms: Vec<u32> = board.top(Tier::Easy).iter().map(|e| e.wpm).collect();
    assert_eq!(wpms, (6..=15).rev().collect::<Vec<u32>>());
    assert_eq!(manager.history().len(), 15);
}

#[test]
fn leaderboard_is_per_tier() {
    let (mut manager, clock) = manager();
    manager.select_difficulty(Tier::Hard);
    play(&mut manager, &clock, "abc", "abc", 60);
    manager.select_difficulty(Tier::Medium);
    play(&mut manager, &clock, "abc", "abc", 60);

    let board = manager.leaderboard();
    assert_eq!(board.top(Tier::Hard).len(), 1);
    assert_eq!(board.top(Tier::Medium).len(), 1);
    assert!(board.top(Tier::Easy).is_empty());
}

#[test]
fn ending_twice_records_once() {
    let (mut manager, clock) = manager();
    play(&mut manager, &clock, "cat", "cat", 10);
    assert!(manager.end_session().is_none());
    assert_eq!(manager.history().len(), 1);
}

#[test]
fn reset_then_load_is_empty() {
    let (mut manager, clock) = manager();
    play(&mut manager, &clock, "cat", "cat", 10);

    manager.reset_stats();
    manager.load_history();

    assert!(manager.history().is_empty());
}

#[test]
fn persisted_keys_are_json() {
    let (mut manager, clock) = manager();
    play(&mut manager, &clock, "cat", "cat", 30);

    let history = manager.storage().load(HISTORY_KEY).unwrap().unwrap();
    let history: serde_json::Value = serde_json::from_str(&history).unwrap();
    assert_eq!(history[0]["difficulty"], "easy");
    assert_eq!(history[0]["time"], 30);

    let board = manager.storage().load(LEADERBOARD_KEY).unwrap().unwrap();
    let board: serde_json::Value = serde_json::from_str(&board).unwrap();
    assert_eq!(board["easy"][0]["wpm"], 2);
}

#[test]
fn sqlite_history_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("keyrate.db");
    let clock = ManualClock::default();

    {
        let storage = SqliteStorage::open(&db).unwrap();
        let mut manager = SessionManager::new(WordLibrary::embedded(), storage, clock.clone());
        play(&mut manager, &clock, "cat dog", "cat dog", 60);
    }

    let storage = SqliteStorage::open(&db).unwrap();
    let manager = SessionManager::new(WordLibrary::embedded(), storage, clock);
    assert_eq!(manager.history().len(), 1);
    assert_eq!(manager.history()[0].wpm, 2);
    assert_eq!(manager.leaderboard().top(Tier::Easy).len(), 1);
}
