use crate::clock::Clock;
use crate::history::{HistoryEntry, Leaderboard};
use crate::library::Tier;
use crate::manager::SessionManager;
use crate::storage::Storage;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Typing,
    Results,
    Leaderboard,
    History,
}

/// Whether the UI loop should keep going after a key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Screen state and key bindings on top of a [`SessionManager`]
pub struct App<S: Storage, C: Clock> {
    pub manager: SessionManager<S, C>,
    pub screen: Screen,
    /// Entry recorded by the last finished session
    pub last_result: Option<HistoryEntry>,
    /// Leaderboard snapshot shown on the results/leaderboard screens
    pub leaderboard: Leaderboard,
    pub history_offset: usize,
}

impl<S: Storage, C: Clock> App<S, C> {
    pub fn new(mut manager: SessionManager<S, C>, difficulty: Tier, prompt: Option<&str>) -> Self {
        manager.select_difficulty(difficulty);
        if let Some(text) = prompt {
            manager.use_custom_text(text);
        }

        Self {
            manager,
            screen: Screen::Typing,
            last_result: None,
            leaderboard: Leaderboard::default(),
            history_offset: 0,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return Flow::Quit;
        }

        match self.screen {
            Screen::Typing => self.on_typing_key(key),
            Screen::Results => self.on_results_key(key),
            Screen::Leaderboard => self.on_leaderboard_key(key),
            Screen::History => self.on_history_key(key),
        }

        Flow::Continue
    }

    fn on_typing_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char(c) => {
                if !self.manager.is_active() {
                    self.manager.start_session();
                }
                let mut input = self.manager.user_input().to_string();
                input.push(c);
                self.manager.update_input(&input);

                if self.manager.is_complete() {
                    self.finish();
                }
            }
            KeyCode::Backspace => {
                let mut input = self.manager.user_input().to_string();
                if input.pop().is_some() {
                    self.manager.update_input(&input);
                }
            }
            KeyCode::Tab => {
                let next = self.manager.difficulty().next();
                self.manager.select_difficulty(next);
            }
            _ => {}
        }
    }

    fn on_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('n') => self.new_text(self.manager.difficulty()),
            KeyCode::Tab => self.new_text(self.manager.difficulty().next()),
            KeyCode::Char('r') => {
                self.manager.clear_current();
                self.screen = Screen::Typing;
            }
            KeyCode::Char('l') => {
                self.leaderboard = self.manager.leaderboard();
                self.screen = Screen::Leaderboard;
            }
            KeyCode::Char('h') => {
                self.history_offset = 0;
                self.screen = Screen::History;
            }
            _ => {}
        }
    }

    fn on_leaderboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') => {
                self.manager.clear_leaderboard();
                self.leaderboard = self.manager.leaderboard();
            }
            KeyCode::Char('b') | KeyCode::Backspace => self.screen = Screen::Results,
            KeyCode::Char('n') => self.new_text(self.manager.difficulty()),
            _ => {}
        }
    }

    fn on_history_key(&mut self, key: KeyEvent) {
        let len = self.manager.history().len();
        match key.code {
            KeyCode::Up => self.history_offset = self.history_offset.saturating_sub(1),
            KeyCode::Down => {
                if self.history_offset + 1 < len {
                    self.history_offset += 1;
                }
            }
            KeyCode::Home => self.history_offset = 0,
            KeyCode::Char('c') => {
                self.manager.reset_stats();
                self.history_offset = 0;
            }
            KeyCode::Char('b') | KeyCode::Backspace => self.screen = Screen::Results,
            KeyCode::Char('n') => self.new_text(self.manager.difficulty()),
            _ => {}
        }
    }

    fn finish(&mut self) {
        self.last_result = self.manager.end_session();
        self.leaderboard = self.manager.leaderboard();
        self.screen = Screen::Results;
    }

    fn new_text(&mut self, tier: Tier) {
        self.manager.select_difficulty(tier);
        self.screen = Screen::Typing;
    }
}
