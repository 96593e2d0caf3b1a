use crate::consts;
use crate::game::{GameState, Snapshot};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};
use std::time::Duration;

/// The one-line bar across the top of the screen showing the score, the
/// high score, the game's status, and (once the snake has sped up) a label
/// for the current speed
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct StatusBar {
    score: u32,
    high_score: u32,
    state: GameState,
    tick_period: Duration,
}

impl StatusBar {
    pub(crate) fn new(game: &Snapshot<'_>, high_score: u32) -> StatusBar {
        StatusBar {
            score: game.score,
            high_score,
            state: game.state,
            tick_period: game.tick_period,
        }
    }
}

impl Widget for StatusBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut line = Line::from_iter([
            Span::raw(format!(" Score: {}", self.score)),
            Span::raw(format!("   Best: {}", self.high_score)),
            Span::raw("   "),
            Span::raw(self.state.status()),
        ]);
        if self.state == GameState::Playing && self.tick_period < consts::SPEED_LABEL_THRESHOLD {
            line.push_span("   Speed: ");
            line.push_span(speed_label(self.tick_period));
        }
        line.style(consts::STATUS_BAR_STYLE).render(area, buf);
    }
}

/// Describe how fast the snake is moving
pub(crate) fn speed_label(tick_period: Duration) -> &'static str {
    match tick_period.as_millis() {
        0..=80 => "TURBO",
        81..=120 => "FAST",
        121..=160 => "NORMAL",
        _ => "SLOW",
    }
}
