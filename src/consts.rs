//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default number of columns in the board
pub(crate) const DEFAULT_COLUMNS: u16 = 50;

/// Default number of rows in the board
pub(crate) const DEFAULT_ROWS: u16 = 20;

/// Default number of rounds in a full game
pub(crate) const DEFAULT_ROUNDS: u32 = 10;

/// Default number of apples needed to clear the first round
pub(crate) const DEFAULT_FIRST_TARGET: u32 = 10;

/// Default number of extra apples needed for each subsequent round
pub(crate) const DEFAULT_TARGET_INCREMENT: u32 = 5;

/// Default number of snake movements per second in the first round
pub(crate) const DEFAULT_BASE_SPEED: u32 = 10;

/// Default number of extra movements per second for each subsequent round
pub(crate) const DEFAULT_SPEED_INCREMENT: u32 = 1;

/// Length of the snake at the start of every round
pub(crate) const INITIAL_SNAKE_LENGTH: u16 = 5;

/// Number of random cells to try when placing an apple before falling back to
/// scanning the whole board
pub(crate) const APPLE_PLACEMENT_ATTEMPTS: u32 = 5000;

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the apple
pub(crate) const APPLE_SYMBOL: char = '●';

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the apple
pub(crate) const APPLE_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key names shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the round & apple counters at the top of the game screen
pub(crate) const HUD_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the primary action button of an overlay
pub(crate) const BUTTON_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
