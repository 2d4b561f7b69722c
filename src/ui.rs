pub mod tables;

use keyrate::app::{App, Screen};
use keyrate::clock::Clock;
use keyrate::library::Tier;
use keyrate::storage::Storage;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Table, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use tables::{history_header, leaderboard_header, present_history_row, present_leaderboard_row};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn draw<S: Storage, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    match app.screen {
        Screen::Typing => render_typing(app, f),
        Screen::Results => render_results(app, f),
        Screen::Leaderboard => render_leaderboard(app, f),
        Screen::History => render_history(app, f),
    }
}

/// Terminal colour for a tier's colour tag
pub fn tag_color(tag: &str) -> Color {
    match tag {
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "red" => Color::Red,
        "blue" => Color::Blue,
        "cyan" => Color::Cyan,
        "magenta" => Color::Magenta,
        _ => Color::White,
    }
}

fn tier_span<S: Storage, C: Clock>(app: &App<S, C>, tier: Tier) -> Span<'static> {
    let config = app.manager.library().config(tier);
    Span::styled(
        format!("[{}]", config.label),
        Style::default()
            .fg(tag_color(&config.color_tag))
            .add_modifier(Modifier::BOLD),
    )
}

fn legend(text: &'static str) -> Paragraph<'static> {
    Paragraph::new(Span::styled(text, Style::default().add_modifier(Modifier::ITALIC)))
}

fn render_typing<S: Storage, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    let area = f.area();
    let manager = &app.manager;

    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = bold_style.fg(Color::Green);
    let red_bold_style = bold_style.fg(Color::Red);
    let dim_bold_style = bold_style.add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = dim_bold_style.add_modifier(Modifier::UNDERLINED);

    let target = manager.target_text();
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let prompt_lines = if target.width() <= max_chars_per_line as usize {
        1
    } else {
        ((target.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16
    };
    let padding = area.height.saturating_sub(prompt_lines + 4) / 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Length(padding),
            Constraint::Length(1), // tier + live stats
            Constraint::Length(1),
            Constraint::Length(prompt_lines),
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let status = Line::from(vec![
        tier_span(app, manager.difficulty()),
        Span::styled(
            format!(
                "  {} wpm   {}% acc   {}s",
                manager.wpm(),
                manager.accuracy(),
                manager.elapsed_seconds()
            ),
            if manager.is_active() {
                bold_style
            } else {
                dim_bold_style
            },
        ),
    ]);
    f.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        chunks[1],
    );

    let typed: Vec<char> = manager.user_input().chars().collect();
    let spans = target
        .chars()
        .enumerate()
        .map(|(idx, expected)| match typed.get(idx) {
            Some(&c) if c == expected => Span::styled(expected.to_string(), green_bold_style),
            Some(&c) => Span::styled(
                match c {
                    ' ' => "·".to_owned(),
                    c => c.to_string(),
                },
                red_bold_style,
            ),
            None if idx == typed.len() => {
                Span::styled(expected.to_string(), underlined_dim_bold_style)
            }
            None => Span::styled(expected.to_string(), dim_bold_style),
        })
        .collect::<Vec<Span>>();

    let prompt = Paragraph::new(Line::from(spans))
        .alignment(if prompt_lines == 1 {
            Alignment::Center
        } else {
            Alignment::Left
        })
        .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[3]);

    f.render_widget(legend("(tab) difficulty / (esc)ape"), chunks[5]);
}

fn render_results<S: Storage, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    let area = f.area();
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let tier = app.manager.difficulty();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // stats
            Constraint::Length(1),
            Constraint::Min(3), // leaderboard for this tier
            Constraint::Length(1),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let summary = match &app.last_result {
        Some(entry) => format!(
            "  {} wpm   {}% acc   {}s",
            entry.wpm, entry.accuracy, entry.elapsed_seconds
        ),
        None => "  no result recorded".to_string(),
    };
    f.render_widget(
        Paragraph::new(Line::from(vec![
            tier_span(app, tier),
            Span::styled(summary, bold_style),
        ]))
        .alignment(Alignment::Center),
        chunks[0],
    );

    let rows = app
        .leaderboard
        .top(tier)
        .iter()
        .enumerate()
        .map(|(rank, entry)| {
            present_leaderboard_row(rank, entry, app.last_result.as_ref() == Some(entry))
        })
        .collect::<Vec<_>>();
    let table = Table::new(rows, tables::LEADERBOARD_WIDTHS)
        .header(leaderboard_header())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Top {}", tier)),
        );
    f.render_widget(table, chunks[2]);

    f.render_widget(
        legend("(n)ew / (r)etry / (tab) next tier / (l)eaderboard / (h)istory / (esc)ape"),
        chunks[4],
    );
}

fn render_leaderboard<S: Storage, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    let area = f.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(rows[0]);

    for (tier, column) in Tier::ALL.into_iter().zip(columns.iter()) {
        let config = app.manager.library().config(tier);
        let ranked = app
            .leaderboard
            .top(tier)
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                present_leaderboard_row(rank, entry, app.last_result.as_ref() == Some(entry))
            })
            .collect::<Vec<_>>();

        let table = Table::new(ranked, tables::LEADERBOARD_WIDTHS)
            .header(leaderboard_header())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(tag_color(&config.color_tag)))
                    .title(config.label.clone()),
            );
        f.render_widget(table, *column);
    }

    f.render_widget(legend("(c)lear / (b)ack / (n)ew / (esc)ape"), rows[1]);
}

fn render_history<S: Storage, C: Clock>(app: &App<S, C>, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);

    let history = app.manager.history();
    let rows = history
        .iter()
        .skip(app.history_offset)
        .map(present_history_row)
        .collect::<Vec<_>>();

    let table = Table::new(rows, tables::HISTORY_WIDTHS)
        .header(history_header())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("History ({} sessions)", history.len())),
        );
    f.render_widget(table, chunks[0]);

    f.render_widget(
        legend("↑/↓ scroll / (c)lear / (b)ack / (n)ew / (esc)ape"),
        chunks[1],
    );
}
