use crate::consts;
use crate::util::EnumExt;
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use ratatui::layout::Size;
use serde::Deserialize;
use std::fmt;

/// Gameplay options that the player can change between games
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Options {
    pub(crate) difficulty: Difficulty,
    pub(crate) wraparound: bool,
}

impl Options {
    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Difficulty => self.difficulty.into(),
            OptKey::Wraparound => self.wraparound.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match (key, value) {
            (OptKey::Difficulty, OptValue::Difficulty(d)) => self.difficulty = d,
            (OptKey::Wraparound, OptValue::Bool(b)) => self.wraparound = b,
            // Mismatched pairs can only come from a bug in the options
            // panel; keep the current value.
            _ => (),
        }
    }
}

#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Difficulty,
    Wraparound,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Difficulty => "Difficulty",
            OptKey::Wraparound => "Wraparound",
        }
    }
}

impl fmt::Display for OptKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[enum_dispatch]
pub(crate) trait Adjustable {
    fn increase(&mut self);
    fn decrease(&mut self);
    fn toggle(&mut self);
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    Bool(bool),
    Difficulty,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 10;
}

// This is needed for EnumMap to be convenient to construct.
impl Default for OptValue {
    fn default() -> OptValue {
        OptValue::Bool(false)
    }
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            OptValue::Bool(false) => write!(f, "   [ ]    "),
            OptValue::Bool(true) => write!(f, "   [✓]    "),
            OptValue::Difficulty(d) => {
                write!(
                    f,
                    "{left} {d:6} {right}",
                    left = if d.can_decrease() { '◀' } else { '◁' },
                    right = if d.can_increase() { '▶' } else { '▷' }
                )
            }
        }
    }
}

impl Adjustable for bool {
    fn increase(&mut self) {
        *self = true;
    }

    fn decrease(&mut self) {
        *self = false;
    }

    fn toggle(&mut self) {
        *self = !*self;
    }

    fn can_increase(&self) -> bool {
        !*self
    }

    fn can_decrease(&self) -> bool {
        *self
    }
}

/// How fast the snake moves at the start of a game
#[derive(Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        };
        f.pad(name)
    }
}

impl Adjustable for Difficulty {
    fn increase(&mut self) {
        if let Some(d) = self.next() {
            *self = d;
        }
    }

    fn decrease(&mut self) {
        if let Some(d) = self.prev() {
            *self = d;
        }
    }

    fn toggle(&mut self) {}

    fn can_increase(&self) -> bool {
        *self != Self::max()
    }

    fn can_decrease(&self) -> bool {
        *self != Self::min()
    }
}

/// Board dimensions, picked according to how much room the terminal has
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(crate) enum BoardSize {
    /// 25 × 20
    #[default]
    Wide,
    /// 20 × 25
    Tall,
    /// 15 × 20
    Narrow,
}

impl BoardSize {
    pub(crate) fn as_size(self) -> Size {
        match self {
            BoardSize::Wide => Size {
                width: 25,
                height: 20,
            },
            BoardSize::Tall => Size {
                width: 20,
                height: 25,
            },
            BoardSize::Narrow => Size {
                width: 15,
                height: 20,
            },
        }
    }

    /// The terminal size needed to show a board of this size along with the
    /// status bar and side panel
    pub(crate) fn required_area(self) -> Size {
        let Size { width, height } = self.as_size();
        Size {
            width: width
                .saturating_add(3)
                .saturating_add(consts::SIDE_PANEL_WIDTH),
            height: height.saturating_add(3),
        }
    }

    /// Return the first of Wide, Tall, and Narrow that fits in `area`,
    /// falling back to Narrow if none do
    pub(crate) fn for_area(area: Size) -> BoardSize {
        BoardSize::iter()
            .find(|bs| {
                let req = bs.required_area();
                req.width <= area.width && req.height <= area.height
            })
            .unwrap_or(BoardSize::Narrow)
    }
}
