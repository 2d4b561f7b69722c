use keyrate::history::HistoryEntry;
use ratatui::{
    layout::Constraint,
    style::{Color, Modifier, Style},
    widgets::{Cell, Row},
};

pub const LEADERBOARD_WIDTHS: [Constraint; 4] = [
    Constraint::Length(4),
    Constraint::Length(5),
    Constraint::Length(5),
    Constraint::Min(10),
];

pub const HISTORY_WIDTHS: [Constraint; 5] = [
    Constraint::Length(17),
    Constraint::Length(8),
    Constraint::Length(5),
    Constraint::Length(5),
    Constraint::Length(6),
];

fn accuracy_color(accuracy: u32) -> Color {
    if accuracy >= 98 {
        Color::Green
    } else if accuracy >= 90 {
        Color::Yellow
    } else {
        Color::Red
    }
}

pub fn leaderboard_header() -> Row<'static> {
    Row::new(vec!["#", "wpm", "acc", "date"])
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
}

pub fn history_header() -> Row<'static> {
    Row::new(vec!["date", "tier", "wpm", "acc", "time"])
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
}

/// One leaderboard line; `is_latest` marks the session just finished
pub fn present_leaderboard_row(rank: usize, entry: &HistoryEntry, is_latest: bool) -> Row<'static> {
    let row = Row::new(vec![
        Cell::from(format!("{}.", rank + 1)),
        Cell::from(entry.wpm.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format!("{}%", entry.accuracy))
            .style(Style::default().fg(accuracy_color(entry.accuracy))),
        Cell::from(entry.date.format("%Y-%m-%d").to_string()),
    ]);

    if is_latest {
        row.style(Style::default().fg(Color::Cyan))
    } else {
        row
    }
}

pub fn present_history_row(entry: &HistoryEntry) -> Row<'static> {
    Row::new(vec![
        Cell::from(entry.date.format("%Y-%m-%d %H:%M").to_string()),
        Cell::from(entry.difficulty.to_string()),
        Cell::from(entry.wpm.to_string()).style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from(format!("{}%", entry.accuracy))
            .style(Style::default().fg(accuracy_color(entry.accuracy))),
        Cell::from(format!("{}s", entry.elapsed_seconds)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_bands() {
        assert_eq!(accuracy_color(100), Color::Green);
        assert_eq!(accuracy_color(95), Color::Yellow);
        assert_eq!(accuracy_color(42), Color::Red);
    }
}
