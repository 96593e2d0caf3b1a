//! Widgets for drawing the game screen
mod board;
mod options_menu;
mod panel;
mod paused;
mod status;
pub(crate) use self::options_menu::OptionsMenu;
pub(crate) use self::paused::{PauseOpt, Paused};
use self::board::BoardView;
use self::panel::SidePanel;
use self::status::StatusBar;
use crate::consts;
use crate::game::{GameState, Snapshot};
use crate::toast::Toasts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    widgets::Widget,
};

/// The whole screen: status bar on top, the board below it, and the side
/// panel to the right of the board
#[derive(Clone, Copy, Debug)]
pub(crate) struct Screen<'a> {
    pub(crate) game: Snapshot<'a>,
    pub(crate) high_score: u32,
    /// Whether the game that just ended set a new high score
    pub(crate) new_record: bool,
    pub(crate) options: &'a OptionsMenu,
    pub(crate) paused: Paused,
    pub(crate) toasts: &'a Toasts,
}

impl Widget for Screen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [status_area, body] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1)]).areas(area);
        StatusBar::new(&self.game, self.high_score).render(status_area, buf);

        let board_size = BoardView::outer_size(self.game.bounds.size());
        let [board_area, panel_area] = Layout::horizontal([
            Constraint::Length(board_size.width),
            Constraint::Length(consts::SIDE_PANEL_WIDTH),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(body);
        let [board_area] = Layout::vertical([board_size.height])
            .flex(Flex::Start)
            .areas(board_area);
        BoardView::new(self.game).render(board_area, buf);

        SidePanel {
            game: self.game,
            high_score: self.high_score,
            new_record: self.new_record,
            options: self.options,
            toasts: self.toasts,
        }
        .render(panel_area, buf);

        if self.game.state == GameState::Paused {
            self.paused
                .render(center_rect(board_area, Paused::SIZE), buf);
        }
    }
}
