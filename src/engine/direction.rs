use ratatui::layout::{Position, Size};

/// One of the four unit vectors the snake can travel along
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Move one cell from `pos` in this direction.  Returns `None` if the
    /// result would fall outside of a grid of size `grid`.
    pub(crate) fn advance(self, pos: Position, grid: Size) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => y = y.checked_sub(1)?,
            Direction::Down => y = increment_in_bounds(y, grid.height)?,
            Direction::Left => x = x.checked_sub(1)?,
            Direction::Right => x = increment_in_bounds(x, grid.width)?,
        }
        Some(Position { x, y })
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Can a snake currently travelling in `self` turn to face `requested`
    /// on the next tick?  Only an immediate 180° reversal is forbidden.
    pub(crate) fn is_allowed(self, requested: Direction) -> bool {
        requested != self.reverse()
    }
}

fn increment_in_bounds(x: u16, max: u16) -> Option<u16> {
    x.checked_add(1).filter(|&xx| xx < max)
}
