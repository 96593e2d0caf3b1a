use crate::consts;
use crate::game::{GameOverCause, GameState, Snapshot};
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};

/// The playing field: a border (dotted when the snake wraps around the
/// edges) enclosing the snake and the food, plus the countdown overlay
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BoardView<'a> {
    game: Snapshot<'a>,
}

impl<'a> BoardView<'a> {
    pub(crate) fn new(game: Snapshot<'a>) -> Self {
        BoardView { game }
    }

    /// The size of the area the board occupies, border included
    pub(crate) fn outer_size(bounds_size: Size) -> Size {
        Size {
            width: bounds_size.width.saturating_add(2),
            height: bounds_size.height.saturating_add(2),
        }
    }
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.game.bounds.wrap {
            DottedBorder.render(area, buf);
        } else {
            Block::bordered().render(area, buf);
        }

        let mut board = Canvas {
            area: area.inner(Margin::new(1, 1)),
            buf,
        };
        let snake = self.game.snake;
        for &p in snake.segments().iter().skip(1) {
            board.draw_cell(p, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        if let Some(pos) = self.game.food {
            board.draw_cell(pos, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        }
        // The head goes last so that a collision overwrites whatever the
        // snake ran into.
        if matches!(
            self.game.ending,
            Some(GameOverCause::Wall | GameOverCause::SelfCollision)
        ) {
            board.draw_cell(
                snake.head(),
                consts::COLLISION_SYMBOL,
                consts::COLLISION_STYLE,
            );
        } else {
            board.draw_cell(snake.head(), snake.head_symbol(), consts::SNAKE_STYLE);
        }

        if self.game.state == GameState::Countdown {
            if let Some(n) = self.game.countdown {
                Countdown(n).render(area, buf);
            }
        }
    }
}

/// A small box showing the number of seconds until play begins, centered in
/// the area it's rendered to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct Countdown(u8);

impl Countdown {
    const SIZE: Size = Size {
        width: 5,
        height: 3,
    };
}

impl Widget for Countdown {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let box_area = center_rect(area, Countdown::SIZE);
        Clear.render(box_area, buf);
        let block = Block::bordered();
        let inner = block.inner(box_area);
        block.render(box_area, buf);
        Line::from(Span::styled(self.0.to_string(), consts::COUNTDOWN_STYLE))
            .centered()
            .render(inner, buf);
    }
}

/// Draws individual cells relative to the top-left corner of `area`
#[derive(Debug, Eq, PartialEq)]
struct Canvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn cell_mut(&mut self, pos: Position) -> Option<&mut ratatui::buffer::Cell> {
        let x = self.area.x.checked_add(pos.x)?;
        let y = self.area.y.checked_add(pos.y)?;
        self.buf.cell_mut((x, y))
    }

    fn draw_char(&mut self, pos: Position, symbol: char) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
        }
    }

    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

/// Border drawn around a board whose edges wrap around
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct DottedBorder;

impl Widget for DottedBorder {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        let max_x = area.width.saturating_sub(1);
        let max_y = area.height.saturating_sub(1);
        let mut canvas = Canvas { area, buf };
        for corner in [
            Position::ORIGIN,
            Position::new(max_x, 0),
            Position::new(max_x, max_y),
            Position::new(0, max_y),
        ] {
            canvas.draw_char(corner, '·');
        }
        for x in 1..max_x {
            canvas.draw_char(Position::new(x, 0), '⋯');
            canvas.draw_char(Position::new(x, max_y), '⋯');
        }
        for y in 1..max_y {
            canvas.draw_char(Position::new(0, y), '⋮');
            canvas.draw_char(Position::new(max_x, y), '⋮');
        }
    }
}
