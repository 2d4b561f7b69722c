use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};

/// What the UI loop reacts to
#[derive(Clone, Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// Redraw interval passed while a session is running
    Tick,
    /// Input is gone for good, the loop should stop
    Closed,
}

/// Pulls terminal events off a channel, ticking only while a session is live.
pub struct Runner {
    rx: Receiver<AppEvent>,
    tick: Duration,
}

impl Runner {
    pub fn new(rx: Receiver<AppEvent>, tick: Duration) -> Self {
        Self { rx, tick }
    }

    /// Reads crossterm events on a background thread.
    /// Key releases are dropped so each keystroke arrives once on every platform.
    pub fn crossterm(tick: Duration) -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let forwarded = match event::read() {
                Ok(CtEvent::Key(key)) if key.kind != KeyEventKind::Release => {
                    tx.send(AppEvent::Key(key))
                }
                Ok(CtEvent::Resize(_, _)) => tx.send(AppEvent::Resize),
                Ok(_) => Ok(()),
                Err(err) => {
                    tracing::error!(error = %err, "terminal event reader stopped");
                    break;
                }
            };
            if forwarded.is_err() {
                break;
            }
        });

        Self::new(rx, tick)
    }

    /// Next event. While `live` a `Tick` is produced after each quiet interval
    /// so the clock on screen keeps moving; otherwise this waits for input.
    pub fn step(&self, live: bool) -> AppEvent {
        if !live {
            return self.rx.recv().unwrap_or(AppEvent::Closed);
        }
        match self.rx.recv_timeout(self.tick) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => AppEvent::Tick,
            Err(RecvTimeoutError::Disconnected) => AppEvent::Closed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn runner() -> (mpsc::Sender<AppEvent>, Runner) {
        let (tx, rx) = mpsc::channel();
        (tx, Runner::new(rx, Duration::from_millis(1)))
    }

    #[test]
    fn live_step_ticks_when_quiet() {
        let (_tx, runner) = runner();
        assert_matches!(runner.step(true), AppEvent::Tick);
    }

    #[test]
    fn step_passes_through_events_in_order() {
        let (tx, runner) = runner();
        tx.send(AppEvent::Resize).unwrap();
        tx.send(AppEvent::Key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE)))
            .unwrap();

        assert_matches!(runner.step(false), AppEvent::Resize);
        assert_matches!(runner.step(true), AppEvent::Key(k) if k.code == KeyCode::Char('a'));
    }

    #[test]
    fn dropped_sender_closes() {
        let (tx, runner) = runner();
        drop(tx);

        assert_matches!(runner.step(true), AppEvent::Closed);
        assert_matches!(runner.step(false), AppEvent::Closed);
    }
}
