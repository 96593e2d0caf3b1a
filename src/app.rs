use crate::command::Command;
use crate::config::Config;
use crate::game::{Game, GameEvent, GameOverCause, GameState};
use crate::highscore::HighScore;
use crate::options::BoardSize;
use crate::schedule::earliest;
use crate::toast::{ToastKind, Toasts};
use crate::ui::{OptionsMenu, PauseOpt, Paused, Screen};
use crate::warning::{Warning, WarningOutcome};
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Rect, Size},
    widgets::Widget,
    Terminal,
};
use std::io;
use std::time::Instant;

/// The top-level application: the game plus everything around it that the
/// player sees and that outlives a single game
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    game: Game<R>,
    config: Config,
    high_score: HighScore,
    new_record: bool,
    options: OptionsMenu,
    paused: Paused,
    toasts: Toasts,
    warning: Option<Warning>,
    quitting: bool,
}

impl App<rand::rngs::ThreadRng> {
    pub(crate) fn new(config: Config, display: Size) -> Self {
        App::new_with_rng(config, display, rand::rng())
    }
}

impl<R: Rng> App<R> {
    /// Create an `App` for a display of the given size.  The high score is
    /// loaded here; failing to load it is reported to the player but is not
    /// fatal.
    pub(crate) fn new_with_rng(config: Config, display: Size, rng: R) -> App<R> {
        let (high_score, warning) = match config.load_high_score() {
            Ok(hs) => (hs, None),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load high score");
                (HighScore::default(), Some(Warning::from(e)))
            }
        };
        let board = BoardSize::for_area(display);
        tracing::info!(
            ?board,
            high_score = high_score.get(),
            options = ?config.options,
            "Starting up"
        );
        let game = Game::new_with_rng(config.rules.clone(), config.options, board.as_size(), rng);
        let options = OptionsMenu::new(config.options);
        App {
            game,
            config,
            high_score,
            new_record: false,
            options,
            paused: Paused::new(),
            toasts: Toasts::default(),
            warning,
            quitting: false,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.process_input()?;
            self.advance(Instant::now());
        }
        Ok(())
    }

    /// Wait for an input event, but no later than the next timer deadline,
    /// and handle the event if one arrived
    fn process_input(&mut self) -> io::Result<()> {
        if let Some(when) = earliest(self.game.next_deadline(), self.toasts.next_expiry()) {
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                return Ok(());
            }
        }
        let event = read()?;
        self.handle_event(event, Instant::now());
        Ok(())
    }

    /// Fire any timers that are due at `now`
    fn advance(&mut self, now: Instant) {
        for event in self.game.advance(now) {
            self.handle_game_event(event, now);
        }
        self.toasts.prune(now);
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        match event {
            Event::Resize(width, height) => {
                let board = BoardSize::for_area(Size { width, height });
                if self.game.resize(board.as_size()) {
                    tracing::debug!(?board, "Board resized");
                }
            }
            Event::FocusLost => self.pause(),
            _ => {
                if let Some(cmd) = event
                    .as_key_press_event()
                    .and_then(Command::from_key_event)
                {
                    self.handle_command(cmd, now);
                }
            }
        }
    }

    fn handle_command(&mut self, cmd: Command, now: Instant) {
        if let Some(warning) = self.warning.as_mut() {
            match warning.handle_command(cmd) {
                Some(WarningOutcome::Dismissed) => self.warning = None,
                Some(WarningOutcome::Quit) => self.quitting = true,
                None => (),
            }
            return;
        }
        if cmd == Command::Quit {
            self.quitting = true;
            return;
        }
        match self.game.state() {
            GameState::Idle => match cmd {
                Command::Space => self.start(now),
                Command::Q => self.quitting = true,
                _ => {
                    if self.options.handle_command(cmd) {
                        let options = self.options.to_options();
                        tracing::debug!(?options, "Options changed");
                        let _ = self.game.set_options(options);
                    }
                }
            },
            GameState::Countdown => match cmd {
                Command::R | Command::Esc => self.restart(),
                Command::Q => self.quitting = true,
                _ => (),
            },
            GameState::Playing => match cmd {
                Command::Space | Command::Esc | Command::P => self.pause(),
                _ => {
                    if let Some(d) = cmd.direction() {
                        let _ = self.game.turn(d);
                    }
                }
            },
            GameState::Paused => match self.paused.handle_command(cmd) {
                Some(PauseOpt::Resume) => {
                    let _ = self.game.resume(now);
                }
                Some(PauseOpt::Restart) => self.restart(),
                Some(PauseOpt::Quit) => self.quitting = true,
                None => (),
            },
            GameState::GameOver => match cmd {
                Command::Enter => {
                    self.restart();
                    self.start(now);
                }
                Command::Space | Command::R => self.restart(),
                Command::Q => self.quitting = true,
                _ => (),
            },
        }
    }

    fn handle_game_event(&mut self, event: GameEvent, now: Instant) {
        match event {
            GameEvent::CountdownTick(_) | GameEvent::Started => (),
            GameEvent::FoodEaten { points, .. } => {
                self.toasts
                    .push(now, ToastKind::Success, format!("+{points} points!"));
            }
            GameEvent::SpedUp { .. } => self.toasts.push(now, ToastKind::Info, "Speed increased!"),
            GameEvent::GameOver { score, cause } => self.record_score(score, cause, now),
        }
    }

    /// Update & save the high score at the end of a game
    fn record_score(&mut self, score: u32, cause: GameOverCause, now: Instant) {
        if cause == GameOverCause::BoardFilled {
            self.toasts.push(now, ToastKind::Success, "Board cleared!");
        }
        self.new_record = score > 0 && score >= self.high_score.get();
        if self.new_record {
            tracing::info!(score, "New high score");
            self.toasts.push(now, ToastKind::Success, "New high score!");
        }
        if self.high_score.update(score) {
            if let Err(e) = self.config.save_high_score(self.high_score) {
                tracing::warn!(error = %e, "Failed to save high score");
                self.toasts
                    .push(now, ToastKind::Error, "Could not save high score");
                self.warning = Some(Warning::from(e));
            }
        }
    }

    fn start(&mut self, now: Instant) {
        self.new_record = false;
        let _ = self.game.start(now);
    }

    fn restart(&mut self) {
        self.new_record = false;
        let _ = self.game.restart();
    }
}

impl<R> App<R> {
    fn pause(&mut self) {
        if self.game.pause() {
            self.paused = Paused::new();
        }
    }
}

impl<R> Widget for &App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Screen {
            game: self.game.snapshot(),
            high_score: self.high_score.get(),
            new_record: self.new_record,
            options: &self.options,
            paused: self.paused,
            toasts: &self.toasts,
        }
        .render(area, buf);
        if let Some(ref warning) = self.warning {
            warning.render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::path::Path;
    use std::time::Duration;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    const DISPLAY: Size = Size {
        width: 80,
        height: 24,
    };

    const SECOND: Duration = Duration::from_secs(1);

    fn config_with_file(path: &Path) -> Config {
        toml::from_str(&format!(
            "[files]\nhigh-score-file = '{}'\n",
            path.display()
        ))
        .unwrap()
    }

    fn new_app(config: Config) -> App<ChaCha12Rng> {
        App::new_with_rng(config, DISPLAY, ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn no_files() -> Config {
        toml::from_str("[files]\nsave-high-score = false\n").unwrap()
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(code.into())
    }

    #[test]
    fn start_and_play() {
        let mut app = new_app(no_files());
        let t0 = Instant::now();
        assert_eq!(app.game.state(), GameState::Idle);
        app.handle_event(key(KeyCode::Char(' ')), t0);
        assert_eq!(app.game.state(), GameState::Countdown);
        app.advance(t0 + SECOND);
        app.advance(t0 + SECOND * 2);
        assert_eq!(app.game.state(), GameState::Countdown);
        app.advance(t0 + SECOND * 3);
        assert_eq!(app.game.state(), GameState::Playing);
        app.handle_event(key(KeyCode::Up), t0 + SECOND * 3);
        assert_eq!(
            app.game.snapshot().snake.pending(),
            crate::game::Direction::Up
        );
    }

    #[test]
    fn pause_menu() {
        let mut app = new_app(no_files());
        let t0 = Instant::now();
        app.handle_event(key(KeyCode::Char(' ')), t0);
        for i in 1..=3 {
            app.advance(t0 + SECOND * i);
        }
        app.handle_event(key(KeyCode::Esc), t0 + SECOND * 3);
        assert_eq!(app.game.state(), GameState::Paused);
        app.handle_event(key(KeyCode::Esc), t0 + SECOND * 4);
        assert_eq!(app.game.state(), GameState::Playing);
        app.handle_event(Event::FocusLost, t0 + SECOND * 4);
        assert_eq!(app.game.state(), GameState::Paused);
        app.handle_event(key(KeyCode::Down), t0 + SECOND * 5);
        app.handle_event(key(KeyCode::Enter), t0 + SECOND * 5);
        assert_eq!(app.game.state(), GameState::Idle);
        assert!(!app.quitting);
    }

    #[test]
    fn cancel_countdown() {
        let mut app = new_app(no_files());
        let t0 = Instant::now();
        app.handle_event(key(KeyCode::Char(' ')), t0);
        app.handle_event(key(KeyCode::Char('r')), t0);
        assert_eq!(app.game.state(), GameState::Idle);
        assert_eq!(app.game.next_deadline(), None);
    }

    #[test]
    fn options_apply_while_idle() {
        let mut app = new_app(no_files());
        app.handle_event(key(KeyCode::Right), Instant::now());
        assert_eq!(
            app.game.snapshot().tick_period,
            Duration::from_millis(100)
        );
        app.handle_event(key(KeyCode::Down), Instant::now());
        app.handle_event(key(KeyCode::Enter), Instant::now());
        assert!(app.game.snapshot().bounds.wrap);
    }

    #[test]
    fn moving_options_cursor_keeps_board() {
        let mut app = new_app(no_files());
        let t0 = Instant::now();
        app.handle_event(key(KeyCode::Right), t0);
        let food = app.game.snapshot().food;
        assert!(food.is_some());
        for code in [KeyCode::Down, KeyCode::Up, KeyCode::Tab, KeyCode::BackTab] {
            app.handle_event(key(code), t0);
            assert_eq!(app.game.snapshot().food, food);
        }
        assert_eq!(
            app.options.to_options(),
            crate::options::Options {
                difficulty: crate::options::Difficulty::Hard,
                wraparound: false,
            }
        );
    }

    #[test]
    fn resize_picks_board() {
        let mut app = new_app(no_files());
        assert_eq!(app.game.snapshot().bounds.size(), Size::new(25, 20));
        app.handle_event(Event::Resize(55, 30), Instant::now());
        assert_eq!(app.game.snapshot().bounds.size(), Size::new(20, 25));
        app.handle_event(key(KeyCode::Char(' ')), Instant::now());
        app.handle_event(Event::Resize(80, 24), Instant::now());
        assert_eq!(app.game.snapshot().bounds.size(), Size::new(20, 25));
    }

    #[test]
    fn quit_keys() {
        let mut app = new_app(no_files());
        app.handle_event(key(KeyCode::Char('q')), Instant::now());
        assert!(app.quitting);

        let mut app = new_app(no_files());
        let ctrl_c = crossterm::event::KeyEvent::new(
            KeyCode::Char('c'),
            crossterm::event::KeyModifiers::CONTROL,
        );
        app.handle_event(Event::Key(ctrl_c), Instant::now());
        assert!(app.quitting);
    }

    #[test]
    fn food_and_speedup_toasts() {
        let mut app = new_app(no_files());
        let t0 = Instant::now();
        app.handle_game_event(
            GameEvent::FoodEaten {
                points: 10,
                score: 50,
            },
            t0,
        );
        app.handle_game_event(
            GameEvent::SpedUp {
                tick_period: Duration::from_millis(140),
            },
            t0,
        );
        assert_eq!(app.toasts.len(), 2);
        app.advance(t0 + SECOND * 3);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn high_score_saved() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        let mut app = new_app(config_with_file(&path));
        assert_eq!(app.high_score.get(), 0);
        let t0 = Instant::now();
        app.record_score(120, GameOverCause::Wall, t0);
        assert!(app.new_record);
        assert_eq!(app.high_score.get(), 120);
        assert_eq!(HighScore::load(&path).unwrap().get(), 120);
        assert!(app.warning.is_none());

        app.restart();
        assert!(!app.new_record);
        app.record_score(120, GameOverCause::SelfCollision, t0);
        assert!(app.new_record);
        app.record_score(60, GameOverCause::SelfCollision, t0);
        assert!(!app.new_record);
        assert_eq!(HighScore::load(&path).unwrap().get(), 120);

        let app = new_app(config_with_file(&path));
        assert_eq!(app.high_score.get(), 120);
    }

    #[test]
    fn tied_best_is_a_record() {
        let mut app = new_app(no_files());
        let t0 = Instant::now();
        app.record_score(90, GameOverCause::Wall, t0);
        assert!(app.new_record);
        app.toasts.prune(t0 + crate::consts::TOAST_LIFETIME);
        assert!(app.toasts.is_empty());

        app.restart();
        let t1 = t0 + crate::consts::TOAST_LIFETIME;
        app.record_score(90, GameOverCause::SelfCollision, t1);
        assert!(app.new_record);
        assert_eq!(app.high_score.get(), 90);
        assert_eq!(app.toasts.len(), 1);
        let area = Rect::new(0, 0, 20, 1);
        let mut buffer = Buffer::empty(area);
        app.toasts.render(area, &mut buffer);
        let text = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect::<String>();
        assert_eq!(text.trim_end(), "New high score!");

        let t2 = t1 + crate::consts::TOAST_LIFETIME;
        app.record_score(40, GameOverCause::SelfCollision, t2);
        assert!(!app.new_record);
    }

    #[test]
    fn zero_score_is_no_record() {
        let mut app = new_app(no_files());
        app.record_score(0, GameOverCause::Wall, Instant::now());
        assert!(!app.new_record);
        assert!(app.toasts.is_empty());
    }

    #[test]
    fn save_failure_warns() {
        let tmpdir = tempfile::tempdir().unwrap();
        let blocker = tmpdir.path().join("blocker");
        fs_err::write(&blocker, "").unwrap();
        let mut app = new_app(no_files());
        app.config = config_with_file(&blocker.join("highscore.json"));
        app.record_score(30, GameOverCause::Wall, Instant::now());
        assert_eq!(app.high_score.get(), 30);
        assert!(app.warning.is_some());
        // The warning swallows input until dismissed
        app.handle_event(key(KeyCode::Char('r')), Instant::now());
        assert!(app.warning.is_some());
        app.handle_event(key(KeyCode::Enter), Instant::now());
        assert!(app.warning.is_none());
    }

    #[test]
    fn load_failure_warns() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("highscore.json");
        fs_err::write(&path, "{\"snakeHighScore\": \"lots\"}").unwrap();
        let mut app = new_app(config_with_file(&path));
        assert_eq!(app.high_score.get(), 0);
        assert!(app.warning.is_some());
        app.handle_event(key(KeyCode::Char(' ')), Instant::now());
        assert!(app.warning.is_none());
        assert_eq!(app.game.state(), GameState::Idle);
    }
}
