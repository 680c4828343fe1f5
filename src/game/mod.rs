mod direction;
mod grid;
mod overlay;
mod phase;
mod round;
mod simulation;
mod snake;
pub(crate) use self::direction::Direction;
use self::phase::{GamePhase, PrimaryAction};
use self::round::RoundState;
pub(crate) use self::round::Rules;
use self::simulation::{Outcome, Simulation};
use crate::command::Command;
use crate::consts;
use crate::util::{center_rect, get_display_area};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Widget},
    Frame,
};
use std::time::Duration;

/// A full game of rounds: the board, the player's progress through the
/// rounds, and which phase of the round lifecycle the game is in
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R> {
    rules: Rules,
    round: RoundState,
    sim: Simulation<R>,
    phase: GamePhase,
}

impl<R: Rng> Game<R> {
    /// Create a game on the start screen
    pub(crate) fn new(rules: Rules, rng: R) -> Game<R> {
        Game {
            rules,
            round: RoundState::new(0, &rules),
            sim: Simulation::new(rules.grid(), rng),
            phase: GamePhase::Idle,
        }
    }

    /// Apply a player command.  [`Command::Quit`] is left to the caller.
    pub(crate) fn handle_command(&mut self, cmd: Command) {
        match (self.phase, cmd) {
            (_, Command::Restart) => self.restart(),
            (_, Command::Primary) => self.primary_action(),
            (GamePhase::Playing, Command::Turn(direction)) => {
                if !self.sim.set_intended_direction(direction) {
                    tracing::trace!(?direction, "Ignoring turn that would reverse the snake");
                }
            }
            (GamePhase::Playing, Command::TogglePause) => self.transition(GamePhase::Paused),
            (GamePhase::Paused, Command::TogglePause) => self.transition(GamePhase::Playing),
            _ => (),
        }
    }

    /// Move the snake one step and settle the consequences.  Does nothing
    /// and returns `None` unless a round is being played.
    pub(crate) fn advance(&mut self) -> Option<Outcome> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let outcome = self.sim.tick();
        match outcome {
            Outcome::Moved => (),
            Outcome::Ate => {
                let reached = self.round.record_apple();
                tracing::debug!(
                    score = self.round.score(),
                    target = self.round.target(),
                    length = self.sim.snake_len(),
                    "Apple eaten"
                );
                if reached || self.sim.is_board_full() {
                    self.finish_round();
                }
            }
            Outcome::Crashed(collision) => {
                tracing::info!(
                    round = self.round.number(),
                    ?collision,
                    head = ?self.sim.snake_head(),
                    direction = ?self.sim.direction(),
                    score = self.round.score(),
                    "Snake crashed"
                );
                self.transition(GamePhase::Crashed(collision));
            }
        }
        Some(outcome)
    }

    /// Go back to the start screen with a fresh first round set up
    pub(crate) fn restart(&mut self) {
        self.round = RoundState::new(0, &self.rules);
        self.sim.reset(0);
        self.transition(GamePhase::Idle);
    }

    fn primary_action(&mut self) {
        let Some(action) = self.phase.primary_action() else {
            return;
        };
        match action {
            PrimaryAction::StartGame | PrimaryAction::PlayAgain => self.start_round(0),
            PrimaryAction::StartRound | PrimaryAction::Resume => {
                self.transition(GamePhase::Playing);
            }
            PrimaryAction::RetryRound => self.start_round(self.round.index()),
            PrimaryAction::NextRound => self.start_round(self.round.index().saturating_add(1)),
        }
    }

    /// Set up the round with the given index and show its intro
    fn start_round(&mut self, index: u32) {
        self.round = RoundState::new(index, &self.rules);
        self.sim.reset(index);
        tracing::info!(
            round = self.round.number(),
            target = self.round.target(),
            interval = ?self.round.tick_interval(),
            "Round set up"
        );
        self.transition(GamePhase::RoundIntro);
    }

    fn finish_round(&mut self) {
        if self.rules.is_final_round(self.round.index()) {
            self.transition(GamePhase::GameWon);
        } else {
            self.transition(GamePhase::RoundWon);
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Is the snake currently moving?
    pub(crate) fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Time between snake movements in the current round
    pub(crate) fn tick_interval(&self) -> Duration {
        self.round.tick_interval()
    }

    /// Pause the game if a round is being played, e.g., because the terminal
    /// lost focus
    pub(crate) fn suspend(&mut self) {
        if self.phase == GamePhase::Playing {
            self.transition(GamePhase::Paused);
        }
    }

    fn transition(&mut self, phase: GamePhase) {
        if self.phase != phase {
            tracing::info!(from = ?self.phase, to = ?phase, "Phase change");
            self.phase = phase;
        }
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [hud_area, board_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(display);
        Line::styled(format!(" Round {}", self.round.number()), consts::HUD_STYLE)
            .render(hud_area, buf);
        Line::styled(
            format!(
                "Apples: {} / {} ",
                self.round.score(),
                self.round.target()
            ),
            consts::HUD_STYLE,
        )
        .right_aligned()
        .render(hud_area, buf);

        let mut block_size = self.sim.grid().size();
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);

        let mut canvas = Canvas {
            area: block_area.inner(Margin::new(1, 1)),
            buf,
        };
        for pos in self.sim.snake_segments().skip(1) {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(pos) = self.sim.apple() {
            canvas.draw_cell(pos, consts::APPLE_SYMBOL, consts::APPLE_STYLE);
        }
        if matches!(self.phase, GamePhase::Crashed(_)) {
            canvas.draw_cell(
                self.sim.snake_head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            canvas.draw_cell(
                self.sim.snake_head(),
                self.sim.snake_head_symbol(),
                consts::SNAKE_STYLE,
            );
        }

        if let Some(overlay) = self.phase.overlay(&self.round, &self.rules) {
            overlay.render(display, buf);
        }
    }
}

/// A view of the cells inside the board's border, addressed in grid
/// coordinates
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if pos.x >= self.area.width || pos.y >= self.area.height {
            return;
        }
        let x = self.area.x.saturating_add(pos.x);
        let y = self.area.y.saturating_add(pos.y);
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}
