//! Assorted constants & hard-coded configuration
use ratatui::style::{Color, Modifier, Style};
use std::time::Duration;

/// Number of segments in a freshly-reset snake
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Points awarded for each piece of food eaten
pub(crate) const FOOD_REWARD: u32 = 10;

/// The snake speeds up each time the score crosses a multiple of this value
pub(crate) const SPEEDUP_MILESTONE: u32 = 50;

/// How much the tick period shrinks at each score milestone
pub(crate) const SPEEDUP_STEP: Duration = Duration::from_millis(10);

/// The tick period never drops below this value
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Tick period at the start of an "Easy" game
pub(crate) const EASY_TICK_PERIOD: Duration = Duration::from_millis(200);

/// Tick period at the start of a "Medium" game
pub(crate) const MEDIUM_TICK_PERIOD: Duration = Duration::from_millis(150);

/// Tick period at the start of a "Hard" game
pub(crate) const HARD_TICK_PERIOD: Duration = Duration::from_millis(100);

/// Value the pre-game countdown starts at
pub(crate) const COUNTDOWN_START: u8 = 3;

/// Time between decrements of the pre-game countdown
pub(crate) const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// How long a toast notification stays on screen
pub(crate) const TOAST_LIFETIME: Duration = Duration::from_secs(3);

/// Maximum number of toasts shown at once; older ones are dropped first
pub(crate) const MAX_TOASTS: usize = 4;

/// Width of the panel drawn beside the board
pub(crate) const SIDE_PANEL_WIDTH: u16 = 30;

/// Glyph for the snake's head when it is moving up
pub(crate) const SNAKE_HEAD_UP_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving down
pub(crate) const SNAKE_HEAD_DOWN_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving right
pub(crate) const SNAKE_HEAD_RIGHT_SYMBOL: char = '<';

/// Glyph for the snake's head when it is moving left
pub(crate) const SNAKE_HEAD_LEFT_SYMBOL: char = '>';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head once the game is over
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the status bar at the top of the screen
pub(crate) const STATUS_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for the big countdown digit
pub(crate) const COUNTDOWN_STYLE: Style = Style::new()
    .fg(Color::Yellow)
    .add_modifier(Modifier::BOLD);

/// Style for toasts reporting something good
pub(crate) const TOAST_SUCCESS_STYLE: Style = Style::new().fg(Color::Green);

/// Style for informational toasts
pub(crate) const TOAST_INFO_STYLE: Style = Style::new().fg(Color::Cyan);

/// Style for toasts reporting a failure
pub(crate) const TOAST_ERROR_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for headings in the side panel
pub(crate) const HEADING_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// The speed label only appears in the status bar once the tick period is
/// shorter than this
pub(crate) const SPEED_LABEL_THRESHOLD: Duration = Duration::from_millis(200);
