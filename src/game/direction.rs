use super::bounds::Bounds;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the position one cell away from `pos` in this direction.  On a
    /// wraparound board, leaving one edge re-enters at the opposite edge;
    /// otherwise, leaving the board returns `None`.
    pub(crate) fn advance(self, pos: Position, bounds: Bounds) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::Up => {
                y = decrement_in_bounds(y, bounds.height, bounds.wrap)?;
            }
            Direction::Down => {
                y = increment_in_bounds(y, bounds.height, bounds.wrap)?;
            }
            Direction::Left => {
                x = decrement_in_bounds(x, bounds.width, bounds.wrap)?;
            }
            Direction::Right => {
                x = increment_in_bounds(x, bounds.width, bounds.wrap)?;
            }
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
}

fn decrement_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_sub(1) {
        Some(x2)
    } else if wrap {
        max.checked_sub(1)
    } else {
        None
    }
}

fn increment_in_bounds(x: u16, max: u16, wrap: bool) -> Option<u16> {
    if let Some(x2) = x.checked_add(1).filter(|&xx| xx < max) {
        Some(x2)
    } else if wrap {
        Some(0)
    } else {
        None
    }
}
