use ratatui::layout::{Position, Positions, Rect, Size};

/// The playing field's dimensions and topology
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,

    /// If true, the board is toroidal: leaving one edge re-enters at the
    /// opposite one.  If false, leaving the board is a collision.
    pub(crate) wrap: bool,
}

impl Bounds {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    /// Iterate over every cell of the board in row-major order
    pub(crate) fn positions(self) -> Positions {
        Rect::from((Position::ORIGIN, self.size())).positions()
    }

    /// Total number of cells on the board
    pub(crate) fn area(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl From<(Size, bool)> for Bounds {
    fn from((size, wrap): (Size, bool)) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
            wrap,
        }
    }
}
