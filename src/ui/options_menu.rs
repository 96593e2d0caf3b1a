use crate::command::Command;
use crate::consts;
use crate::options::{Adjustable, OptKey, OptValue, Options};
use crate::util::EnumExt;
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Span,
    widgets::{
        block::{Block, Padding},
        Widget,
    },
};

/// The menu of gameplay options shown while the game is idle
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct OptionsMenu {
    selection: OptKey,
    settings: EnumMap<OptKey, OptValue>,
}

impl OptionsMenu {
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) const HEIGHT: u16 = (OptKey::LENGTH as u16) + 2 /* for border */;
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    pub(crate) const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::POINTER_WIDTH + OptKey::DISPLAY_WIDTH + Self::LABEL_VALUE_GUTTER + OptValue::DISPLAY_WIDTH;

    pub(crate) fn new(options: Options) -> Self {
        let settings = EnumMap::from_iter(OptKey::iter().map(|key| (key, options.get(key))));
        OptionsMenu {
            selection: OptKey::min(),
            settings,
        }
    }

    pub(crate) fn to_options(&self) -> Options {
        let mut opts = Options::default();
        for key in OptKey::iter() {
            opts.set(key, self.settings[key]);
        }
        opts
    }

    /// Handle a command.  Returns `true` if an option's value changed;
    /// moving the selection never changes a value.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> bool {
        let key = self.selection;
        let before = self.settings[key];
        match cmd {
            Command::Up => {
                if let Some(prev) = key.prev() {
                    self.selection = prev;
                }
                return false;
            }
            Command::Down => {
                if let Some(next) = key.next() {
                    self.selection = next;
                }
                return false;
            }
            Command::Next => {
                self.selection = key.next().unwrap_or_else(OptKey::min);
                return false;
            }
            Command::Prev => {
                self.selection = key.prev().unwrap_or_else(OptKey::max);
                return false;
            }
            Command::Left => self.settings[key].decrease(),
            Command::Right => self.settings[key].increase(),
            Command::Enter => self.settings[key].toggle(),
            _ => return false,
        }
        self.settings[key] != before
    }
}

impl Widget for &OptionsMenu {
    /*
     * ┌ Options: ────────────────┐
     * │ » Difficulty  ◀ Medium ▶ │
     * │   Wraparound     [ ]     │
     * └──────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" Options: ")
            .padding(Padding::horizontal(OptionsMenu::HORIZONTAL_PADDING));
        let menu_area = block.inner(area);
        block.render(area, buf);
        for ((key, value), row) in OptKey::iter()
            .map(|key| (key, self.settings[key]))
            .zip(menu_area.rows())
        {
            let selected = key == self.selection;
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(OptionsMenu::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(OptionsMenu::LABEL_VALUE_GUTTER),
            );
            Span::styled(s, style).render(row, buf);
        }
    }
}
