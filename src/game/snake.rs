use super::bounds::Bounds;
use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the board.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The cells occupied by the snake, head first
    pub(super) segments: VecDeque<Position>,

    /// The direction in which the snake moved on the most recent tick
    pub(super) direction: Direction,

    /// The direction the snake will move in on the next tick
    pub(super) pending: Direction,
}

impl Snake {
    /// Create a horizontal snake of `length` cells facing right, with its
    /// tail against the left edge of `bounds` and centered vertically.
    ///
    /// `length` is clamped to `1..=bounds.width` so that the snake always
    /// fits on the board without overlapping itself.
    pub(crate) fn new(length: usize, bounds: Bounds) -> Snake {
        let length = u16::try_from(length)
            .unwrap_or(u16::MAX)
            .clamp(1, bounds.width.max(1));
        let y = bounds.height / 2;
        Snake {
            segments: (0..length).rev().map(|x| Position::new(x, y)).collect(),
            direction: Direction::Right,
            pending: Direction::Right,
        }
    }

    /// Create a snake occupying the given cells, head first, that last moved
    /// in `direction`
    #[cfg(test)]
    pub(crate) fn from_segments<I: IntoIterator<Item = Position>>(
        segments: I,
        direction: Direction,
    ) -> Snake {
        Snake {
            segments: segments.into_iter().collect(),
            direction,
            pending: direction,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.segments
            .front()
            .copied()
            .unwrap_or(Position::ORIGIN)
    }

    /// Return the snake's cells, head first
    pub(crate) fn segments(&self) -> &VecDeque<Position> {
        &self.segments
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn direction(&self) -> Direction {
        self.direction
    }

    #[cfg(test)]
    pub(crate) fn pending(&self) -> Direction {
        self.pending
    }

    /// Return the glyph to use for drawing the snake's head
    pub(crate) fn head_symbol(&self) -> char {
        match self.direction {
            Direction::Up => consts::SNAKE_HEAD_UP_SYMBOL,
            Direction::Down => consts::SNAKE_HEAD_DOWN_SYMBOL,
            Direction::Left => consts::SNAKE_HEAD_LEFT_SYMBOL,
            Direction::Right => consts::SNAKE_HEAD_RIGHT_SYMBOL,
        }
    }

    /// Buffer a turn to be applied on the next tick.  A turn straight back
    /// into the snake's neck (relative to the direction it last moved in) is
    /// ignored, in which case `false` is returned.
    pub(super) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.pending = direction;
            true
        }
    }

    /// Make the buffered turn the snake's current direction
    pub(super) fn commit_turn(&mut self) {
        self.direction = self.pending;
    }

    pub(super) fn occupies(&self, pos: Position) -> bool {
        self.segments.contains(&pos)
    }

    pub(super) fn push_head(&mut self, pos: Position) {
        self.segments.push_front(pos);
    }

    pub(super) fn pop_tail(&mut self) {
        let _ = self.segments.pop_back();
    }
}
