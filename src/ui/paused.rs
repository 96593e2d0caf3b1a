use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Clear, Widget},
};

/// Pop-up menu shown over the board while the game is paused
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Paused {
    selection: PauseOpt,
}

impl Paused {
    /// The size of the `Rect` that should be passed to `Paused::render()`
    pub(crate) const SIZE: Size = Size {
        width: 16,
        height: 5,
    };

    pub(crate) fn new() -> Paused {
        Paused {
            selection: PauseOpt::min(),
        }
    }

    /// Handle a command.  Returns `Some` if the player made a choice.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<PauseOpt> {
        match cmd {
            Command::Esc | Command::P | Command::Space => return Some(PauseOpt::Resume),
            Command::R => return Some(PauseOpt::Restart),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
            Command::Enter => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => self.selection = self.selection.next().unwrap_or_else(PauseOpt::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(PauseOpt::max),
            _ => (),
        }
        None
    }
}

impl Default for Paused {
    fn default() -> Paused {
        Paused::new()
    }
}

/// The choices in the pause menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum PauseOpt {
    Resume,
    /// Abandon the game and go back to the idle screen
    Restart,
    Quit,
}

impl PauseOpt {
    fn label(self) -> (&'static str, &'static str) {
        match self {
            PauseOpt::Resume => ("Resume", "Esc"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::Quit => ("Quit", "q"),
        }
    }

    fn to_line(self, selected: bool) -> Line<'static> {
        let (label, key) = self.label();
        let line = Line::from_iter([
            Span::raw(if selected { "» " } else { "  " }),
            Span::raw(label),
            Span::raw(" ("),
            Span::styled(key, consts::KEY_STYLE),
            Span::raw(")"),
        ]);
        if selected {
            line.style(consts::MENU_SELECTION_STYLE)
        } else {
            line
        }
    }
}

impl Widget for Paused {
    /*
     * ┌─── PAUSED ───┐
     * │» Resume (Esc)│
     * │  Restart (r) │
     * │  Quit (q)    │
     * └──────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        for (opt, row) in PauseOpt::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shortcuts() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_command(Command::Esc), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::Space), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::R), Some(PauseOpt::Restart));
        assert_eq!(paused.handle_command(Command::Q), Some(PauseOpt::Quit));
        assert_eq!(paused.handle_command(Command::Left), None);
    }

    #[test]
    fn navigate() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_command(Command::Up), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::Down), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Restart));
        assert_eq!(paused.handle_command(Command::Down), None);
        assert_eq!(paused.handle_command(Command::Down), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Quit));
        assert_eq!(paused.handle_command(Command::Next), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Resume));
        assert_eq!(paused.handle_command(Command::Prev), None);
        assert_eq!(paused.handle_command(Command::Enter), Some(PauseOpt::Quit));
    }

    #[test]
    fn render() {
        let mut paused = Paused::new();
        assert_eq!(paused.handle_command(Command::Down), None);
        let area = Rect::new(0, 0, 16, 5);
        let mut buffer = Buffer::empty(area);
        paused.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌─── PAUSED ───┐",
            "│  Resume (Esc)│",
            "│» Restart (r) │",
            "│  Quit (q)    │",
            "└──────────────┘",
        ]);
        expected.set_style(area, Style::reset());
        expected.set_style(Rect::new(11, 1, 3, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(1, 2, 14, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(12, 2, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(9, 3, 1, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
