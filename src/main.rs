mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keyrate::{
    app::{App, Flow},
    app_dirs::AppDirs,
    clock::{Clock, SystemClock},
    config::{Config, ConfigStore, FileConfigStore},
    logging::init_logging,
    runtime::{AppEvent, Runner},
    storage::{MemoryStorage, SqliteStorage, Storage},
    SessionManager, Tier, WordLibrary,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// typing speed practice with live wpm, accuracy, history and leaderboards
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing speed trainer: pick a difficulty tier, type the generated words, and track words per minute and accuracy across sessions with a per-tier top 10."
)]
pub struct Cli {
    /// difficulty tier to practise (defaults to the last one used)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<Tier>,

    /// custom text to practise instead of generated words
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// path of the stats database
    #[clap(long)]
    db: Option<PathBuf>,

    /// print the leaderboard and exit
    #[clap(long)]
    leaderboard: bool,

    /// print session history and exit
    #[clap(long)]
    history: bool,

    /// delete session history and exit
    #[clap(long)]
    reset_stats: bool,

    /// delete the leaderboard and exit
    #[clap(long)]
    clear_leaderboard: bool,

    /// log verbosity (-v warn, -vv info, -vvv debug); the TUI logs to the state directory
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

impl Cli {
    fn is_one_shot(&self) -> bool {
        self.leaderboard || self.history || self.reset_stats || self.clear_leaderboard
    }
}

fn open_storage(path: Option<&Path>) -> Box<dyn Storage> {
    let opened = match path {
        Some(path) => SqliteStorage::open(path),
        None => SqliteStorage::open_default(),
    };
    match opened {
        Ok(storage) => Box::new(storage),
        Err(err) => {
            tracing::warn!(error = %err, "falling back to in-memory storage");
            eprintln!("keyrate: results will not be saved ({err})");
            Box::new(MemoryStorage::new())
        }
    }
}

fn run_one_shot<S: Storage, C: Clock>(cli: &Cli, manager: &mut SessionManager<S, C>) {
    if cli.reset_stats {
        manager.reset_stats();
        println!("history cleared");
    }

    if cli.clear_leaderboard {
        manager.clear_leaderboard();
        println!("leaderboard cleared");
    }

    if cli.history {
        if manager.history().is_empty() {
            println!("no sessions recorded yet");
        }
        for entry in manager.history() {
            println!("{entry}");
        }
    }

    if cli.leaderboard {
        let board = manager.leaderboard();
        for tier in Tier::ALL {
            println!("{}", manager.library().config(tier).label);
            let ranked = board.top(tier);
            if ranked.is_empty() {
                println!("  -");
            }
            for (rank, entry) in ranked.iter().enumerate() {
                println!("  {:>2}. {entry}", rank + 1);
            }
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.verbosity > 0 {
        let log_file = if cli.is_one_shot() {
            None
        } else {
            AppDirs::log_path()
        };
        if let Err(err) = init_logging(cli.verbosity, log_file.as_deref()) {
            eprintln!("keyrate: {err}");
        }
    }

    let storage = open_storage(cli.db.as_deref());
    let mut manager = SessionManager::new(WordLibrary::embedded(), storage, SystemClock);

    if cli.is_one_shot() {
        run_one_shot(&cli, &mut manager);
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let difficulty = cli
        .difficulty
        .unwrap_or_else(|| config_store.load().difficulty);
    let mut app = App::new(manager, difficulty, cli.prompt.as_deref());

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let config = Config {
        difficulty: app.manager.difficulty(),
    };
    if let Err(err) = config_store.save(&config) {
        tracing::warn!(error = %err, "failed to save config");
    }

    result
}

fn start_tui<B: Backend, S: Storage, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<S, C>,
) -> Result<(), Box<dyn Error>> {
    let runner = Runner::crossterm(Duration::from_millis(TICK_RATE_MS));

    terminal.draw(|f| ui::draw(app, f))?;

    loop {
        match runner.step(app.manager.is_active()) {
            AppEvent::Closed => break,
            AppEvent::Tick | AppEvent::Resize => {
                terminal.draw(|f| ui::draw(app, f))?;
            }
            AppEvent::Key(key) => {
                if app.handle_key(key) == Flow::Quit {
                    break;
                }
                terminal.draw(|f| ui::draw(app, f))?;
            }
        }
    }

    Ok(())
}
