use super::options_menu::OptionsMenu;
use crate::consts;
use crate::game::{GameOverCause, GameState, Snapshot};
use crate::toast::Toasts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

const INSTRUCTIONS: &[&str] = &[
    "Move the snake with:",
    "       ← ↓ ↑ →",
    "   or: h j k l",
    "   or: a s w d",
    "Eat the food, but",
    "don't hit yourself!",
];

#[allow(clippy::cast_possible_truncation)]
const INSTRUCTIONS_HEIGHT: u16 = INSTRUCTIONS.len() as u16;

#[allow(clippy::cast_possible_truncation)]
const TOAST_ROWS: u16 = consts::MAX_TOASTS as u16;

/// The panel to the right of the board.  Its contents depend on the state of
/// the game; toasts are stacked at the bottom.
#[derive(Clone, Copy, Debug)]
pub(crate) struct SidePanel<'a> {
    pub(crate) game: Snapshot<'a>,
    pub(crate) high_score: u32,
    pub(crate) new_record: bool,
    pub(crate) options: &'a OptionsMenu,
    pub(crate) toasts: &'a Toasts,
}

impl SidePanel<'_> {
    fn render_idle(self, area: Rect, buf: &mut Buffer) {
        let [start_area, options_area, help_area, quit_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(OptionsMenu::HEIGHT),
            Constraint::Length(INSTRUCTIONS_HEIGHT),
            Constraint::Length(1),
        ])
        .flex(Flex::Start)
        .spacing(1)
        .areas(area);
        keyed("Start", "Space").render(start_area, buf);
        let [options_area] = Layout::horizontal([OptionsMenu::WIDTH])
            .flex(Flex::Start)
            .areas(options_area);
        self.options.render(options_area, buf);
        Text::from_iter(INSTRUCTIONS.iter().copied()).render(help_area, buf);
        keyed("Quit", "q").render(quit_area, buf);
    }

    fn lines(self) -> Vec<Line<'static>> {
        match self.game.state {
            GameState::Idle => Vec::new(),
            GameState::Countdown => vec![
                heading("Get ready!"),
                Line::default(),
                keyed("Cancel", "r"),
                keyed("Quit", "q"),
            ],
            GameState::Playing | GameState::Paused => {
                let mut lines = INSTRUCTIONS
                    .iter()
                    .map(|&s| Line::from(s))
                    .collect::<Vec<_>>();
                lines.push(Line::default());
                lines.push(keyed("Pause", "p"));
                lines
            }
            GameState::GameOver => {
                let mut lines = vec![
                    if self.new_record {
                        heading("New Record!")
                    } else {
                        heading("Game Over")
                    },
                    Line::default(),
                    Line::from(format!("Final score: {}", self.game.score)),
                    Line::from(score_rating(self.game.score, self.game.ending)),
                ];
                if !self.new_record && self.high_score > 0 {
                    lines.push(Line::from(format!("Best: {}", self.high_score)));
                }
                lines.push(Line::default());
                lines.push(keyed("Play again", "Enter"));
                lines.push(keyed("Options", "Space"));
                lines.push(keyed("Quit", "q"));
                lines
            }
        }
    }
}

impl Widget for SidePanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [main_area, toast_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(TOAST_ROWS)]).areas(area);
        if self.game.state == GameState::Idle {
            self.render_idle(main_area, buf);
        } else {
            Text::from(self.lines()).render(main_area, buf);
        }
        self.toasts.render(toast_area, buf);
    }
}

/// A few words on how well the player did
pub(crate) fn score_rating(score: u32, ending: Option<GameOverCause>) -> &'static str {
    if ending == Some(GameOverCause::BoardFilled) {
        return "Board cleared!";
    }
    match score {
        0 => "Try again!",
        1..50 => "Good start!",
        50..100 => "Getting better!",
        100..200 => "Nice score!",
        200..300 => "Great job!",
        300..500 => "Excellent!",
        _ => "Snake Master!",
    }
}

/// Render "`label` (`key`)" with the key highlighted
fn keyed(label: &'static str, key: &'static str) -> Line<'static> {
    Line::from_iter([
        Span::raw(label),
        Span::raw(" ("),
        Span::styled(key, consts::KEY_STYLE),
        Span::raw(")"),
    ])
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(text, consts::HEADING_STYLE))
}
