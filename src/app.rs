use crate::command::Command;
use crate::game::Game;
use crate::scheduler::Scheduler;
use crate::util::get_display_area;
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;

/// The running program: the game, any startup warnings still waiting to be
/// dismissed, and the clock that drives the snake
#[derive(Clone, Debug)]
pub(crate) struct App<R> {
    game: Game<R>,
    warnings: VecDeque<Warning>,
    scheduler: Scheduler,
    quitting: bool,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(game: Game<R>, warnings: VecDeque<Warning>) -> App<R> {
        App {
            game,
            warnings,
            scheduler: Scheduler::new(),
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            self.draw(&mut terminal)?;
            self.process_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| {
            self.game.draw(frame);
            if let Some(warning) = self.warnings.front() {
                frame.render_widget(warning, get_display_area(frame.area()));
            }
        })?;
        Ok(())
    }

    /// Wait for either the next snake tick or the next input event, and
    /// handle whichever comes first
    fn process_input(&mut self) -> io::Result<()> {
        if self.warnings.is_empty() && self.game.is_playing() {
            let now = Instant::now();
            if !self.scheduler.is_running() {
                self.scheduler.start(now, self.game.tick_interval());
            }
            if self.scheduler.poll(now) {
                if let Some(outcome) = self.game.advance() {
                    tracing::trace!(?outcome, "Tick");
                }
                return Ok(());
            }
            let wait = self.scheduler.time_until_next(now).unwrap_or_default();
            if poll(wait)? {
                self.handle_event(read()?);
            }
        } else {
            self.scheduler.stop();
            self.handle_event(read()?);
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if event == Event::FocusLost {
            self.game.suspend();
            return;
        }
        let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        else {
            return;
        };
        if let Some(warning) = self.warnings.front() {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => {
                    let _ = self.warnings.pop_front();
                }
                Some(WarningOutcome::Quit) => self.quitting = true,
                None => (),
            }
        } else if cmd == Command::Quit {
            tracing::info!("Quitting");
            self.quitting = true;
        } else {
            self.game.handle_command(cmd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Rules;
    use anyhow::anyhow;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;

    fn new_app(warnings: usize) -> App<ChaCha12Rng> {
        let game = Game::new(Rules::default(), ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF));
        let warnings = (0..warnings)
            .map(|i| Warning::from(anyhow!("problem {i}")))
            .collect();
        App::new(game, warnings)
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn warnings_are_dismissed_in_order() {
        let mut app = new_app(2);
        app.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(app.warnings.len(), 1);
        // Keys meant for the game do not reach it while a warning is shown
        assert!(!app.game.is_playing());
        app.handle_event(key(KeyCode::Enter));
        assert!(app.warnings.is_empty());
        app.handle_event(key(KeyCode::Char(' ')));
        app.handle_event(key(KeyCode::Char(' ')));
        assert!(app.game.is_playing());
        assert!(!app.quitting);
    }

    #[test]
    fn quit_from_warning() {
        let mut app = new_app(1);
        app.handle_event(key(KeyCode::Char('q')));
        assert!(app.quitting);
    }

    #[test]
    fn quit_from_game() {
        let mut app = new_app(0);
        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL,
        )));
        assert!(app.quitting);
    }

    #[test]
    fn focus_loss_pauses() {
        let mut app = new_app(0);
        app.handle_event(key(KeyCode::Enter));
        app.handle_event(key(KeyCode::Enter));
        assert!(app.game.is_playing());
        app.handle_event(key(KeyCode::Up));
        app.handle_event(Event::FocusLost);
        assert!(!app.game.is_playing());
        app.handle_event(Event::FocusGained);
        assert!(!app.game.is_playing());
        app.handle_event(key(KeyCode::Char('p')));
        assert!(app.game.is_playing());
    }
}
