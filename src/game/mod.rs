mod bounds;
mod direction;
mod engine;
mod snake;
pub(crate) use self::bounds::Bounds;
pub(crate) use self::direction::Direction;
pub(crate) use self::engine::GameOverCause;
use self::engine::{Engine, TickReport};
pub(crate) use self::snake::Snake;
use crate::consts;
use crate::options::Options;
use crate::rules::Rules;
use crate::schedule::{earliest, Periodic};
use rand::Rng;
use ratatui::layout::{Position, Size};
use std::time::{Duration, Instant};

/// The game's lifecycle state machine.
///
/// `Game` owns the simulation engine along with the two timers that drive
/// it: the pre-game countdown and the tick clock.  The clock exists exactly
/// while the game is in [`GameState::Playing`].
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    state: GameState,
    engine: Engine<R>,
    board: Size,
    countdown: u8,
    countdown_timer: Option<Periodic>,
    clock: Option<Periodic>,
    ending: Option<GameOverCause>,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(rules: Rules, options: Options, board: Size, rng: R) -> Game<R> {
        Game {
            state: GameState::Idle,
            engine: Engine::new(rules, options, board, rng),
            board,
            countdown: 0,
            countdown_timer: None,
            clock: None,
            ending: None,
        }
    }

    /// Idle → Countdown.  The board is reset so that the countdown is shown
    /// over a fresh game.
    pub(crate) fn start(&mut self, now: Instant) -> bool {
        if self.state != GameState::Idle {
            return false;
        }
        self.reset_engine();
        self.countdown = consts::COUNTDOWN_START;
        self.countdown_timer = Some(Periodic::start(now, consts::COUNTDOWN_PERIOD));
        self.enter(GameState::Countdown);
        true
    }

    /// Paused, GameOver, or Countdown → Idle, discarding the current game
    pub(crate) fn restart(&mut self) -> bool {
        if !matches!(
            self.state,
            GameState::Paused | GameState::GameOver | GameState::Countdown
        ) {
            return false;
        }
        self.countdown_timer = None;
        self.stop_clock();
        self.reset_engine();
        self.enter(GameState::Idle);
        true
    }

    /// Change gameplay options.  Only allowed while idle; the board is reset
    /// to reflect the new options.
    pub(crate) fn set_options(&mut self, options: Options) -> bool {
        if self.state != GameState::Idle {
            return false;
        }
        self.engine.set_options(options);
        self.reset_engine();
        true
    }

    /// Change the board dimensions.  Only allowed while idle.
    pub(crate) fn resize(&mut self, board: Size) -> bool {
        if self.state != GameState::Idle || board == self.board {
            return false;
        }
        self.board = board;
        self.reset_engine();
        true
    }

    /// Fire whichever timers are due at `now` and return what happened
    pub(crate) fn advance(&mut self, now: Instant) -> Vec<GameEvent> {
        let mut events = Vec::new();
        match self.state {
            GameState::Countdown => {
                if self.countdown_timer.as_mut().is_some_and(|t| t.fire(now)) {
                    self.countdown = self.countdown.saturating_sub(1);
                    if self.countdown == 0 {
                        self.countdown_timer = None;
                        self.start_clock(now);
                        self.enter(GameState::Playing);
                        events.push(GameEvent::Started);
                    } else {
                        events.push(GameEvent::CountdownTick(self.countdown));
                    }
                }
            }
            GameState::Playing => {
                if self.clock.as_mut().is_some_and(|c| c.fire(now)) {
                    let report = self.engine.tick();
                    self.handle_report(&report, now, &mut events);
                }
            }
            GameState::Idle | GameState::Paused | GameState::GameOver => (),
        }
        events
    }

    fn handle_report(&mut self, report: &TickReport, now: Instant, events: &mut Vec<GameEvent>) {
        if report.ate_food() {
            events.push(GameEvent::FoodEaten {
                points: self.engine.rules().food_reward,
                score: report.score,
            });
        }
        if report.sped_up {
            tracing::debug!(
                score = report.score,
                tick_period = ?report.tick_period,
                "Snake sped up"
            );
            events.push(GameEvent::SpedUp {
                tick_period: report.tick_period,
            });
        }
        if let Some(cause) = report.game_over() {
            tracing::info!(score = report.score, ?cause, "Game over");
            self.ending = Some(cause);
            self.stop_clock();
            self.enter(GameState::GameOver);
            events.push(GameEvent::GameOver {
                score: report.score,
                cause,
            });
        } else if report.sped_up {
            self.start_clock(now);
        }
    }

    fn reset_engine(&mut self) {
        let initial_length = self.engine.rules().initial_length;
        self.engine.reset(initial_length, self.board);
        self.ending = None;
    }
}

impl<R> Game<R> {
    /// Playing → Paused.  The buffered turn survives the pause.
    pub(crate) fn pause(&mut self) -> bool {
        if self.state != GameState::Playing {
            return false;
        }
        self.stop_clock();
        self.enter(GameState::Paused);
        true
    }

    /// Paused → Playing
    pub(crate) fn resume(&mut self, now: Instant) -> bool {
        if self.state != GameState::Paused {
            return false;
        }
        self.start_clock(now);
        self.enter(GameState::Playing);
        true
    }

    /// Ask the snake to turn on the next tick.  Ignored unless playing.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        self.state == GameState::Playing && self.engine.set_pending_direction(direction)
    }

    pub(crate) fn state(&self) -> GameState {
        self.state
    }

    /// The instant at which [`Game::advance()`] next has something to do
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        earliest(
            self.countdown_timer.map(|t| t.deadline()),
            self.clock.map(|c| c.deadline()),
        )
    }

    /// Return a read-only view of the game for rendering
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            snake: self.engine.snake(),
            food: self.engine.food(),
            bounds: self.engine.bounds(),
            score: self.engine.score(),
            countdown: (self.state == GameState::Countdown).then_some(self.countdown),
            tick_period: self.engine.tick_period(),
            ending: self.ending,
        }
    }

    /// (Re)start the tick clock at the engine's current speed, replacing any
    /// clock already running
    fn start_clock(&mut self, now: Instant) {
        self.clock = Some(Periodic::start(now, self.engine.tick_period()));
    }

    fn stop_clock(&mut self) {
        self.clock = None;
    }

    fn enter(&mut self, state: GameState) {
        tracing::debug!(from = ?self.state, to = ?state, "Game state transition");
        self.state = state;
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameState {
    /// Waiting for the player to start a game
    Idle,
    /// Counting down to the start of a game
    Countdown,
    Playing,
    Paused,
    GameOver,
}

impl GameState {
    /// Text for the status bar
    pub(crate) fn status(self) -> &'static str {
        match self {
            GameState::Idle => "Ready",
            GameState::Countdown => "Starting...",
            GameState::Playing => "Playing",
            GameState::Paused => "Paused",
            GameState::GameOver => "Game Over",
        }
    }
}

/// Things that happened during [`Game::advance()`] that the rest of the
/// program may want to react to
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameEvent {
    /// The countdown went down to the given nonzero value
    CountdownTick(u8),
    /// The countdown finished and the snake is moving
    Started,
    FoodEaten {
        /// Points awarded for this piece of food
        points: u32,
        /// Score after eating
        score: u32,
    },
    SpedUp {
        tick_period: Duration,
    },
    GameOver {
        score: u32,
        cause: GameOverCause,
    },
}

/// Everything a renderer needs to draw the game
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) state: GameState,
    pub(crate) snake: &'a Snake,
    pub(crate) food: Option<Position>,
    pub(crate) bounds: Bounds,
    pub(crate) score: u32,

    /// The current countdown value, if counting down
    pub(crate) countdown: Option<u8>,

    pub(crate) tick_period: Duration,

    /// Why the game ended, if it has
    pub(crate) ending: Option<GameOverCause>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Difficulty;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    const BOARD: Size = Size {
        width: 25,
        height: 20,
    };

    const SECOND: Duration = Duration::from_secs(1);

    const TICK: Duration = Duration::from_millis(150);

    fn new_game() -> Game<ChaCha12Rng> {
        Game::new_with_rng(
            Rules::default(),
            Options::default(),
            BOARD,
            ChaCha12Rng::seed_from_u64(RNG_SEED),
        )
    }

    /// Start a game at `t0` and run the countdown to completion, returning
    /// the instant at which play began
    fn playing(game: &mut Game<ChaCha12Rng>, t0: Instant) -> Instant {
        assert!(game.start(t0));
        let _ = game.advance(t0 + SECOND);
        let _ = game.advance(t0 + SECOND * 2);
        let _ = game.advance(t0 + SECOND * 3);
        assert_eq!(game.state(), GameState::Playing);
        t0 + SECOND * 3
    }

    #[test]
    fn starts_idle() {
        let game = new_game();
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.next_deadline(), None);
        let snap = game.snapshot();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.snake.len(), 3);
        assert_eq!(snap.countdown, None);
    }

    #[test]
    fn countdown() {
        let mut game = new_game();
        let t0 = Instant::now();
        assert!(game.start(t0));
        assert_eq!(game.state(), GameState::Countdown);
        assert_eq!(game.snapshot().countdown, Some(3));
        assert_eq!(game.next_deadline(), Some(t0 + SECOND));
        assert!(game.advance(t0 + SECOND / 2).is_empty());
        assert_eq!(
            game.advance(t0 + SECOND),
            [GameEvent::CountdownTick(2)]
        );
        assert_eq!(
            game.advance(t0 + SECOND * 2),
            [GameEvent::CountdownTick(1)]
        );
        assert_eq!(game.snapshot().countdown, Some(1));
        assert_eq!(game.advance(t0 + SECOND * 3), [GameEvent::Started]);
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.snapshot().countdown, None);
        assert_eq!(game.next_deadline(), Some(t0 + SECOND * 3 + TICK));
    }

    #[test]
    fn no_turns_during_countdown() {
        let mut game = new_game();
        assert!(game.start(Instant::now()));
        assert!(!game.turn(Direction::Up));
        assert_eq!(game.snapshot().snake.pending(), Direction::Right);
    }

    #[test]
    fn ticks_move_snake() {
        let mut game = new_game();
        let t = playing(&mut game, Instant::now());
        game.engine.food = Some(Position::new(20, 3));
        assert!(game.advance(t + TICK / 2).is_empty());
        assert_eq!(game.snapshot().snake.head(), Position::new(2, 10));
        assert!(game.advance(t + TICK).is_empty());
        assert_eq!(game.snapshot().snake.head(), Position::new(3, 10));
        assert!(game.turn(Direction::Down));
        assert!(game.advance(t + TICK * 2).is_empty());
        assert_eq!(game.snapshot().snake.head(), Position::new(3, 11));
    }

    #[test]
    fn late_ticks_keep_cadence() {
        let mut game = new_game();
        let t = playing(&mut game, Instant::now());
        game.engine.food = Some(Position::new(20, 3));
        let _ = game.advance(t + TICK + Duration::from_millis(9));
        assert_eq!(game.snapshot().snake.head(), Position::new(3, 10));
        assert_eq!(game.next_deadline(), Some(t + TICK * 2));
        let _ = game.advance(t + TICK * 2 + Duration::from_millis(3));
        assert_eq!(game.next_deadline(), Some(t + TICK * 3));
    }

    #[test]
    fn pause_and_resume() {
        let mut game = new_game();
        let t = playing(&mut game, Instant::now());
        game.engine.food = Some(Position::new(20, 3));
        assert!(game.turn(Direction::Up));
        assert!(game.pause());
        assert_eq!(game.state(), GameState::Paused);
        assert_eq!(game.next_deadline(), None);
        assert!(game.advance(t + TICK * 10).is_empty());
        assert_eq!(game.snapshot().snake.head(), Position::new(2, 10));
        assert!(!game.turn(Direction::Left));
        let t2 = t + SECOND * 10;
        assert!(game.resume(t2));
        assert_eq!(game.state(), GameState::Playing);
        assert_eq!(game.next_deadline(), Some(t2 + TICK));
        let _ = game.advance(t2 + TICK);
        assert_eq!(game.snapshot().snake.head(), Position::new(2, 9));
    }

    #[test]
    fn invalid_transitions_ignored() {
        let mut game = new_game();
        let now = Instant::now();
        assert!(!game.pause());
        assert!(!game.resume(now));
        assert!(!game.restart());
        assert_eq!(game.state(), GameState::Idle);
        assert!(game.start(now));
        assert!(!game.start(now));
        assert!(!game.pause());
        assert!(!game.resume(now));
        assert_eq!(game.state(), GameState::Countdown);
    }

    #[test]
    fn wall_ends_game() {
        let mut game = new_game();
        let t = playing(&mut game, Instant::now());
        game.engine.food = Some(Position::new(20, 3));
        game.engine.snake.segments = VecDeque::from([
            Position::new(24, 4),
            Position::new(23, 4),
            Position::new(22, 4),
        ]);
        let events = game.advance(t + TICK);
        assert_eq!(
            events,
            [GameEvent::GameOver {
                score: 0,
                cause: GameOverCause::Wall
            }]
        );
        assert_eq!(game.state(), GameState::GameOver);
        assert_eq!(game.snapshot().ending, Some(GameOverCause::Wall));
        assert_eq!(game.next_deadline(), None);
        assert!(!game.pause());
        assert!(!game.turn(Direction::Up));
    }

    #[test]
    fn eating_and_speedup_restart_clock() {
        let mut game = new_game();
        let t = playing(&mut game, Instant::now());
        game.engine.score = 40;
        game.engine.food = Some(Position::new(3, 10));
        let events = game.advance(t + TICK);
        assert_eq!(
            events,
            [
                GameEvent::FoodEaten {
                    points: 10,
                    score: 50
                },
                GameEvent::SpedUp {
                    tick_period: Duration::from_millis(140)
                },
            ]
        );
        assert_eq!(
            game.next_deadline(),
            Some(t + TICK + Duration::from_millis(140))
        );
        assert_eq!(game.clock.map(|c| c.period()), Some(Duration::from_millis(140)));
    }

    #[test]
    fn restart_from_game_over() {
        let mut game = new_game();
        let t = playing(&mut game, Instant::now());
        game.engine.food = Some(Position::new(3, 10));
        let _ = game.advance(t + TICK);
        assert_eq!(game.snapshot().score, 10);
        assert!(game.turn(Direction::Up));
        let _ = game.advance(t + TICK * 2);
        game.engine.snake.segments = VecDeque::from([
            Position::new(3, 0),
            Position::new(3, 1),
            Position::new(3, 2),
            Position::new(3, 3),
        ]);
        let _ = game.advance(t + TICK * 3);
        assert_eq!(game.state(), GameState::GameOver);
        assert!(game.restart());
        assert_eq!(game.state(), GameState::Idle);
        let snap = game.snapshot();
        assert_eq!(snap.score, 0);
        assert_eq!(snap.snake.len(), 3);
        assert_eq!(snap.snake.head(), Position::new(2, 10));
        assert_eq!(snap.ending, None);
        assert_eq!(game.next_deadline(), None);
    }

    #[test]
    fn restart_cancels_countdown() {
        let mut game = new_game();
        let t0 = Instant::now();
        assert!(game.start(t0));
        assert!(game.restart());
        assert_eq!(game.state(), GameState::Idle);
        assert_eq!(game.next_deadline(), None);
        assert!(game.advance(t0 + SECOND * 5).is_empty());
        assert_eq!(game.state(), GameState::Idle);
    }

    #[test]
    fn options_only_while_idle() {
        let mut game = new_game();
        let hard = Options {
            difficulty: Difficulty::Hard,
            wraparound: true,
        };
        assert!(game.set_options(hard));
        let snap = game.snapshot();
        assert!(snap.bounds.wrap);
        assert_eq!(snap.tick_period, Duration::from_millis(100));
        assert!(game.start(Instant::now()));
        assert!(!game.set_options(Options::default()));
        assert!(game.snapshot().bounds.wrap);
    }

    #[test]
    fn resize_only_while_idle() {
        let mut game = new_game();
        assert!(game.resize(Size::new(15, 20)));
        assert_eq!(game.snapshot().bounds.size(), Size::new(15, 20));
        assert!(!game.resize(Size::new(15, 20)));
        assert!(game.start(Instant::now()));
        assert!(!game.resize(BOARD));
        assert_eq!(game.snapshot().bounds.size(), Size::new(15, 20));
    }

    #[test]
    fn at_most_one_clock() {
        let mut game = new_game();
        let t = playing(&mut game, Instant::now());
        game.engine.food = Some(Position::new(20, 3));
        assert!(game.clock.is_some());
        assert!(game.countdown_timer.is_none());
        assert!(game.pause());
        assert!(game.clock.is_none());
        assert!(game.resume(t + SECOND));
        assert!(!game.resume(t + SECOND * 2));
        assert_eq!(game.next_deadline(), Some(t + SECOND + TICK));
    }
}
