use ratatui::layout::{Position, Positions, Rect, Size};

/// The fixed rectangle of cells that the snake moves around in.  Cells are
/// addressed from the top-left corner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub(crate) fn new(width: u16, height: u16) -> Grid {
        Grid { width, height }
    }

    pub(crate) fn width(self) -> u16 {
        self.width
    }

    pub(crate) fn height(self) -> u16 {
        self.height
    }

    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// The total number of cells in the grid
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The cell at the middle of the grid, rounding down
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// Iterate over every cell in the grid, row by row
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Position::new(0, 0), true)]
    #[case(Position::new(9, 4), true)]
    #[case(Position::new(10, 4), false)]
    #[case(Position::new(9, 5), false)]
    #[case(Position::new(u16::MAX, 0), false)]
    fn test_contains(#[case] pos: Position, #[case] inside: bool) {
        assert_eq!(Grid::new(10, 5).contains(pos), inside);
    }

    #[test]
    fn positions_cover_grid() {
        let grid = Grid::new(4, 3);
        let cells = grid.positions().collect::<Vec<_>>();
        assert_eq!(cells.len(), grid.area());
        assert_eq!(cells.first(), Some(&Position::new(0, 0)));
        assert_eq!(cells.last(), Some(&Position::new(3, 2)));
        assert!(cells.iter().all(|&p| grid.contains(p)));
    }

    #[test]
    fn center() {
        assert_eq!(Grid::new(50, 20).center(), Position::new(25, 10));
        assert_eq!(Grid::new(25, 25).center(), Position::new(12, 12));
    }
}
