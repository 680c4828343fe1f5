use super::overlay::Overlay;
use super::round::{RoundState, Rules};
use super::simulation::Collision;
use enum_map::{enum_map, Enum, EnumMap};
use std::sync::LazyLock;

/// Where the game is in its round lifecycle
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GamePhase {
    /// The start screen; no round has been set up yet
    Idle,

    /// A round has been set up and is waiting for the player to start it
    RoundIntro,

    /// The snake is moving
    Playing,

    /// Play has been suspended mid-round
    Paused,

    /// The snake hit something and the round is over
    Crashed(Collision),

    /// The round's target was reached and there are more rounds to play
    RoundWon,

    /// The final round's target was reached
    GameWon,
}

impl GamePhase {
    pub(crate) fn kind(self) -> PhaseKind {
        match self {
            GamePhase::Idle => PhaseKind::Idle,
            GamePhase::RoundIntro => PhaseKind::RoundIntro,
            GamePhase::Playing => PhaseKind::Playing,
            GamePhase::Paused => PhaseKind::Paused,
            GamePhase::Crashed(_) => PhaseKind::Crashed,
            GamePhase::RoundWon => PhaseKind::RoundWon,
            GamePhase::GameWon => PhaseKind::GameWon,
        }
    }

    /// What the primary action (Space/Enter) does in this phase, if anything
    pub(crate) fn primary_action(self) -> Option<PrimaryAction> {
        PRIMARY_ACTIONS[self.kind()]
    }

    /// The pop-up to show over the board in this phase.  `round` is the
    /// round currently set up (or just finished).
    pub(crate) fn overlay(self, round: &RoundState, rules: &Rules) -> Option<Overlay> {
        let action = self.primary_action()?;
        let (title, subtitle) = match self {
            GamePhase::Idle => (
                String::from("Snake — Rounds Mode"),
                format!(
                    "{} rounds. Round 1 target: {} apples, +{} each round.",
                    rules.rounds(),
                    rules.target(0),
                    rules.target(1).saturating_sub(rules.target(0)),
                ),
            ),
            GamePhase::RoundIntro => (
                format!("Round {}", round.number()),
                format!("Eat {} apples to advance", round.target()),
            ),
            GamePhase::Playing => return None,
            GamePhase::Paused => (String::from("Paused"), String::from("Game is paused")),
            GamePhase::Crashed(collision) => (
                String::from(match collision {
                    Collision::Wall => "You hit a wall!",
                    Collision::Body => "You bit yourself!",
                }),
                format!(
                    "Round {}: You ate {} / {} apples",
                    round.number(),
                    round.score(),
                    round.target()
                ),
            ),
            GamePhase::RoundWon => (
                format!("Round {} complete!", round.number()),
                format!(
                    "Next round target: {} apples",
                    rules.target(round.index().saturating_add(1))
                ),
            ),
            GamePhase::GameWon => (
                format!("You won all {} rounds!", rules.rounds()),
                format!(
                    "Final round target was {} apples. Great job!",
                    round.target()
                ),
            ),
        };
        Some(Overlay::new(title, subtitle, action))
    }
}

/// The variants of [`GamePhase`] without their data, for use as table keys
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum PhaseKind {
    Idle,
    RoundIntro,
    Playing,
    Paused,
    Crashed,
    RoundWon,
    GameWon,
}

/// The transition triggered by confirming the current overlay
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum PrimaryAction {
    /// Set up the first round
    StartGame,

    /// Start moving in the round that has been set up
    StartRound,

    /// Continue a paused round
    Resume,

    /// Set up the current round again from scratch
    RetryRound,

    /// Set up the round after the current one
    NextRound,

    /// Set up the first round after winning them all
    PlayAgain,
}

impl PrimaryAction {
    /// Text for the overlay's button
    pub(crate) fn label(self) -> &'static str {
        match self {
            PrimaryAction::StartGame => "Start (Space)",
            PrimaryAction::StartRound => "Start Round (Space)",
            PrimaryAction::Resume => "Resume (Space)",
            PrimaryAction::RetryRound => "Retry Round (Space)",
            PrimaryAction::NextRound => "Start Next Round (Space)",
            PrimaryAction::PlayAgain => "Play Again (Space)",
        }
    }

    /// Short description for the overlay's "Press Space to ..." line
    pub(crate) fn hint(self) -> &'static str {
        match self {
            PrimaryAction::StartGame => "Start",
            PrimaryAction::StartRound => "Start Round",
            PrimaryAction::Resume => "Resume",
            PrimaryAction::RetryRound => "Retry Round",
            PrimaryAction::NextRound => "Next Round",
            PrimaryAction::PlayAgain => "Play Again",
        }
    }
}

static PRIMARY_ACTIONS: LazyLock<EnumMap<PhaseKind, Option<PrimaryAction>>> = LazyLock::new(|| {
    enum_map! {
        PhaseKind::Idle => Some(PrimaryAction::StartGame),
        PhaseKind::RoundIntro => Some(PrimaryAction::StartRound),
        PhaseKind::Playing => None,
        PhaseKind::Paused => Some(PrimaryAction::Resume),
        PhaseKind::Crashed => Some(PrimaryAction::RetryRound),
        PhaseKind::RoundWon => Some(PrimaryAction::NextRound),
        PhaseKind::GameWon => Some(PrimaryAction::PlayAgain),
    }
});
