use super::direction::Direction;
use super::grid::Grid;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake's body, heading, and pending growth.
///
/// All positions are relative to the top-left corner of the grid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the rest of the snake, starting with the segment
    /// right behind the head and ending with the tip of the tail
    pub(super) tail: VecDeque<Position>,

    /// The direction in which the snake moved on its last tick
    pub(super) direction: Direction,

    /// The direction in which the snake will move on its next tick, unless
    /// that would reverse it
    pub(super) intended: Direction,

    /// The number of ticks for which the tail will stay in place
    pub(super) growth: u32,
}

impl Snake {
    /// Create a snake of `length` segments with its head at `head`, facing
    /// `direction`, and its body stretched out straight behind it.  The body is
    /// cut short if it would leave `grid`.
    pub(super) fn new(head: Position, direction: Direction, length: u16, grid: Grid) -> Snake {
        let behind = direction.reverse();
        let tail = std::iter::successors(behind.advance(head, grid), |&p| behind.advance(p, grid))
            .take(usize::from(length.saturating_sub(1)))
            .collect();
        Snake {
            head,
            tail,
            direction,
            intended: direction,
            growth: 0,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.head
    }

    /// Iterate over the cells occupied by the snake, from head to tail
    pub(super) fn segments(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.tail.iter().copied())
    }

    pub(super) fn len(&self) -> usize {
        self.tail.len() + 1
    }

    pub(super) fn direction(&self) -> Direction {
        self.direction
    }

    pub(super) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.tail.contains(&pos)
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Request that the snake move in `direction` on its next tick.  Returns
    /// `false` and leaves the request unchanged if `direction` is the
    /// opposite of the direction the snake last moved in.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction.is_opposite(self.direction) {
            false
        } else {
            self.intended = direction;
            true
        }
    }

    /// Make the requested direction the one the snake moves in, unless it
    /// would reverse the snake
    pub(super) fn commit_turn(&mut self) {
        if !self.intended.is_opposite(self.direction) {
            self.direction = self.intended;
        }
    }

    /// The cell the head would move into on the next tick, or `None` if
    /// that is outside `grid`
    pub(super) fn next_head(&self, grid: Grid) -> Option<Position> {
        self.direction.advance(self.head, grid)
    }

    /// Move the head to `pos`, keeping the old head as the first body segment
    pub(super) fn push_head(&mut self, pos: Position) {
        self.tail.push_front(self.head);
        self.head = pos;
    }

    /// Schedule one segment of growth in response to eating an apple
    pub(super) fn grow(&mut self) {
        self.growth += 1;
    }

    /// Drop the tip of the tail, unless growth is pending, in which case one
    /// unit of it is used up instead
    pub(super) fn settle_tail(&mut self) {
        if self.growth > 0 {
            self.growth -= 1;
        } else {
            let _ = self.tail.pop_back();
        }
    }
}
