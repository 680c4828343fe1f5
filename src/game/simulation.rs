use super::direction::Direction;
use super::grid::Grid;
use super::snake::Snake;
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::HashSet;

/// What happened on a single tick of the simulation
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Outcome {
    /// The snake moved one cell without eating anything
    Moved,

    /// The snake moved onto the apple and ate it
    Ate,

    /// The snake could not move; nothing on the board was changed
    Crashed(Collision),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Collision {
    /// The snake tried to leave the grid
    Wall,

    /// The snake ran into its own body
    Body,
}

/// The board: the snake, the apple, and the grid they live on.  Advances one
/// discrete tick at a time.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Simulation<R> {
    rng: R,
    grid: Grid,
    pub(super) snake: Snake,
    pub(super) apple: Option<Position>,
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation on `grid`, already reset for the first round
    pub(crate) fn new(grid: Grid, rng: R) -> Simulation<R> {
        let mut sim = Simulation {
            rng,
            grid,
            snake: Self::starting_snake(grid),
            apple: None,
        };
        sim.reset(0);
        sim
    }

    fn starting_snake(grid: Grid) -> Snake {
        Snake::new(
            grid.center(),
            Direction::East,
            consts::INITIAL_SNAKE_LENGTH,
            grid,
        )
    }

    /// Put a fresh snake in the middle of the grid, facing east, with no
    /// pending growth, and place a new apple.
    pub(crate) fn reset(&mut self, round: u32) {
        self.snake = Self::starting_snake(self.grid);
        self.apple = self.place_apple();
        tracing::debug!(round, apple = ?self.apple, "Board reset");
    }

    /// Advance the snake by one cell.
    ///
    /// If the snake would hit a wall or itself, nothing moves and the
    /// collision is reported; ticking again reports the same collision.
    pub(crate) fn tick(&mut self) -> Outcome {
        self.snake.commit_turn();
        let Some(head) = self.snake.next_head(self.grid) else {
            return Outcome::Crashed(Collision::Wall);
        };
        // Checked against the body before it moves, so the tip of the tail
        // still counts even though it is about to leave its cell.
        if self.snake.occupies(head) {
            return Outcome::Crashed(Collision::Body);
        }
        self.snake.push_head(head);
        let ate = self.apple == Some(head);
        if ate {
            self.snake.grow();
            self.apple = None;
            self.apple = self.place_apple();
        }
        self.snake.settle_tail();
        if ate {
            Outcome::Ate
        } else {
            Outcome::Moved
        }
    }

    /// Choose a cell for a new apple that the snake does not occupy.
    ///
    /// Random cells are tried first; if none of
    /// [`APPLE_PLACEMENT_ATTEMPTS`][consts::APPLE_PLACEMENT_ATTEMPTS] of them
    /// are free, a free cell is chosen from an exhaustive scan instead.
    /// Returns `None` only if the snake fills the whole grid.
    fn place_apple(&mut self) -> Option<Position> {
        self.place_apple_with(consts::APPLE_PLACEMENT_ATTEMPTS)
    }

    fn place_apple_with(&mut self, attempts: u32) -> Option<Position> {
        let occupied = self.snake.segments().collect::<HashSet<_>>();
        if occupied.len() >= self.grid.area() {
            tracing::info!(
                length = occupied.len(),
                "Snake fills the board; no room for an apple"
            );
            return None;
        }
        for _ in 0..attempts {
            let pos = Position::new(
                self.rng.random_range(0..self.grid.width()),
                self.rng.random_range(0..self.grid.height()),
            );
            if !occupied.contains(&pos) {
                return Some(pos);
            }
        }
        tracing::debug!(
            length = occupied.len(),
            "Random apple placement exhausted; scanning for a free cell"
        );
        self.grid
            .positions()
            .filter(|p| !occupied.contains(p))
            .choose(&mut self.rng)
    }
}

impl<R> Simulation<R> {
    /// Ask the snake to move in `direction` from the next tick on.  Returns
    /// `false` (and changes nothing) if that would reverse the snake.
    pub(crate) fn set_intended_direction(&mut self, direction: Direction) -> bool {
        self.snake.turn(direction)
    }

    pub(crate) fn grid(&self) -> Grid {
        self.grid
    }

    pub(crate) fn apple(&self) -> Option<Position> {
        self.apple
    }

    pub(crate) fn snake_head(&self) -> Position {
        self.snake.head()
    }

    pub(crate) fn snake_head_symbol(&self) -> char {
        self.snake.head_symbol()
    }

    /// Iterate over the cells occupied by the snake, from head to tail
    pub(crate) fn snake_segments(&self) -> impl Iterator<Item = Position> + '_ {
        self.snake.segments()
    }

    pub(crate) fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.snake.direction()
    }

    /// True iff there was no free cell left for an apple
    pub(crate) fn is_board_full(&self) -> bool {
        self.apple.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn new_sim(width: u16, height: u16) -> Simulation<ChaCha12Rng> {
        Simulation::new(
            Grid::new(width, height),
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    fn place_snake<R, I: IntoIterator<Item = Position>>(
        sim: &mut Simulation<R>,
        head: Position,
        tail: I,
        direction: Direction,
    ) {
        sim.snake.head = head;
        sim.snake.tail = tail.into_iter().collect::<VecDeque<_>>();
        sim.snake.direction = direction;
        sim.snake.intended = direction;
        sim.snake.growth = 0;
    }

    #[test]
    fn reset_board() {
        let sim = new_sim(50, 20);
        assert_eq!(sim.snake_len(), 5);
        assert_eq!(sim.snake_head(), Position::new(25, 10));
        assert_eq!(sim.direction(), Direction::East);
        assert_eq!(
            sim.snake_segments().skip(1).collect::<Vec<_>>(),
            [
                Position::new(24, 10),
                Position::new(23, 10),
                Position::new(22, 10),
                Position::new(21, 10),
            ]
        );
        let apple = sim.apple().expect("a fresh board should have an apple");
        assert!(sim.grid().contains(apple));
        assert!(!sim.snake_segments().any(|p| p == apple));
    }

    #[test]
    fn reset_after_play() {
        let mut sim = new_sim(50, 20);
        sim.apple = Some(Position::new(26, 10));
        assert_eq!(sim.tick(), Outcome::Ate);
        assert!(sim.set_intended_direction(Direction::North));
        sim.apple = Some(Position::new(0, 0));
        assert_eq!(sim.tick(), Outcome::Moved);
        sim.reset(3);
        assert_eq!(sim.snake_len(), 5);
        assert_eq!(sim.snake_head(), Position::new(25, 10));
        assert_eq!(sim.direction(), Direction::East);
        assert_eq!(sim.snake.growth, 0);
        assert!(sim.apple().is_some());
    }

    #[test]
    fn move_forwards() {
        let mut sim = new_sim(50, 20);
        sim.apple = Some(Position::new(0, 0));
        assert_eq!(sim.tick(), Outcome::Moved);
        assert_eq!(
            sim.snake_segments().collect::<Vec<_>>(),
            [
                Position::new(26, 10),
                Position::new(25, 10),
                Position::new(24, 10),
                Position::new(23, 10),
                Position::new(22, 10),
            ]
        );
        assert_eq!(sim.apple(), Some(Position::new(0, 0)));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut sim = new_sim(50, 20);
        sim.apple = Some(Position::new(0, 0));
        assert!(!sim.set_intended_direction(Direction::West));
        assert_eq!(sim.tick(), Outcome::Moved);
        assert_eq!(sim.direction(), Direction::East);
        assert_eq!(sim.snake_head(), Position::new(26, 10));
    }

    #[test]
    fn quick_turns_cannot_reverse() {
        let mut sim = new_sim(50, 20);
        sim.apple = Some(Position::new(0, 0));
        assert!(sim.set_intended_direction(Direction::North));
        // West is judged against the committed East, not the pending North
        assert!(!sim.set_intended_direction(Direction::West));
        assert_eq!(sim.tick(), Outcome::Moved);
        assert_eq!(sim.direction(), Direction::North);
        assert_eq!(sim.snake_head(), Position::new(25, 9));
        assert!(sim.set_intended_direction(Direction::West));
        assert_eq!(sim.tick(), Outcome::Moved);
        assert_eq!(sim.snake_head(), Position::new(24, 9));
    }

    #[test]
    fn wall_crash_changes_nothing() {
        let mut sim = new_sim(10, 5);
        sim.apple = Some(Position::new(0, 0));
        for _ in 0..4 {
            assert_eq!(sim.tick(), Outcome::Moved);
        }
        assert_eq!(sim.snake_head(), Position::new(9, 2));
        let before = sim.clone();
        assert_eq!(sim.tick(), Outcome::Crashed(Collision::Wall));
        assert_eq!(sim, before);
        assert_eq!(sim.tick(), Outcome::Crashed(Collision::Wall));
        assert_eq!(sim, before);
    }

    #[test]
    fn self_crash() {
        let mut sim = new_sim(10, 10);
        sim.apple = Some(Position::new(0, 0));
        place_snake(
            &mut sim,
            Position::new(4, 4),
            [
                Position::new(4, 5),
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 4),
                Position::new(5, 4),
                Position::new(5, 3),
            ],
            Direction::North,
        );
        assert!(sim.set_intended_direction(Direction::East));
        let before = sim.snake.clone();
        assert_eq!(sim.tick(), Outcome::Crashed(Collision::Body));
        assert_eq!(
            sim.snake_segments().collect::<Vec<_>>(),
            before.segments().collect::<Vec<_>>()
        );
    }

    #[test]
    fn tail_tip_counts_as_body() {
        let mut sim = new_sim(10, 10);
        sim.apple = Some(Position::new(0, 0));
        place_snake(
            &mut sim,
            Position::new(4, 4),
            [Position::new(4, 5), Position::new(5, 5), Position::new(5, 4)],
            Direction::North,
        );
        assert!(sim.set_intended_direction(Direction::East));
        assert_eq!(sim.tick(), Outcome::Crashed(Collision::Body));
    }

    #[test]
    fn eat_apple() {
        let mut sim = new_sim(50, 20);
        sim.apple = Some(Position::new(26, 10));
        assert_eq!(sim.tick(), Outcome::Ate);
        assert_eq!(sim.snake_len(), 6);
        assert_eq!(sim.snake_head(), Position::new(26, 10));
        assert_eq!(sim.snake.growth, 0);
        let apple = sim.apple().expect("a new apple should have been placed");
        assert!(!sim.snake_segments().any(|p| p == apple));
        sim.apple = Some(Position::new(0, 0));
        assert_eq!(sim.tick(), Outcome::Moved);
        assert_eq!(sim.snake_len(), 6);
    }

    #[test]
    fn back_to_back_apples_grow_one_per_tick() {
        let mut sim = new_sim(50, 20);
        let mut lengths = Vec::new();
        for x in 26..30 {
            sim.apple = Some(Position::new(x, 10));
            assert_eq!(sim.tick(), Outcome::Ate);
            lengths.push(sim.snake_len());
        }
        assert_eq!(lengths, [6, 7, 8, 9]);
    }

    #[test]
    fn length_never_shrinks_and_grows_by_at_most_one() {
        let mut turns = ChaCha12Rng::seed_from_u64(RNG_SEED ^ 0xFFFF);
        let directions = [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ];
        for _ in 0..20 {
            let mut sim = new_sim(12, 12);
            let mut len = sim.snake_len();
            for _ in 0..500 {
                if turns.random_bool(0.3) {
                    let d = directions[turns.random_range(0..directions.len())];
                    let _ = sim.set_intended_direction(d);
                }
                let outcome = sim.tick();
                let new_len = sim.snake_len();
                assert!(new_len >= len, "snake shrank from {len} to {new_len}");
                assert!(new_len <= len + 1, "snake grew from {len} to {new_len}");
                if let Outcome::Crashed(_) = outcome {
                    assert_eq!(new_len, len);
                    break;
                }
                if let Some(apple) = sim.apple() {
                    assert!(!sim.snake_segments().any(|p| p == apple));
                }
                len = new_len;
            }
        }
    }

    #[test]
    fn apple_goes_in_only_free_cell() {
        let mut sim = new_sim(3, 2);
        place_snake(
            &mut sim,
            Position::new(0, 0),
            [
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(1, 1),
            ],
            Direction::West,
        );
        for _ in 0..10 {
            assert_eq!(sim.place_apple(), Some(Position::new(0, 1)));
        }
    }

    #[test]
    fn scan_finds_only_free_cell() {
        let mut sim = new_sim(3, 2);
        place_snake(
            &mut sim,
            Position::new(2, 1),
            [
                Position::new(1, 1),
                Position::new(0, 1),
                Position::new(0, 0),
                Position::new(1, 0),
            ],
            Direction::East,
        );
        for _ in 0..10 {
            assert_eq!(sim.place_apple_with(0), Some(Position::new(2, 0)));
        }
    }

    #[test]
    fn scan_picks_among_free_cells() {
        let mut sim = new_sim(4, 2);
        place_snake(
            &mut sim,
            Position::new(0, 1),
            [Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)],
            Direction::South,
        );
        let free = [
            Position::new(3, 0),
            Position::new(1, 1),
            Position::new(2, 1),
            Position::new(3, 1),
        ];
        let mut seen = HashSet::new();
        for _ in 0..100 {
            let pos = sim
                .place_apple_with(0)
                .expect("board should have free cells");
            assert!(free.contains(&pos), "apple placed on snake at {pos:?}");
            seen.insert(pos);
        }
        assert_eq!(seen.len(), free.len());
    }

    #[test]
    fn no_apple_on_full_board() {
        let mut sim = new_sim(3, 2);
        place_snake(
            &mut sim,
            Position::new(1, 1),
            [
                Position::new(2, 1),
                Position::new(2, 0),
                Position::new(1, 0),
                Position::new(0, 0),
            ],
            Direction::West,
        );
        sim.apple = Some(Position::new(0, 1));
        assert!(!sim.is_board_full());
        assert_eq!(sim.tick(), Outcome::Ate);
        assert_eq!(sim.snake_len(), 6);
        assert_eq!(sim.apple(), None);
        assert!(sim.is_board_full());
    }
}
