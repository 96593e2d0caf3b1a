use super::bounds::Bounds;
use super::direction::Direction;
use super::snake::Snake;
use crate::options::{Difficulty, Options};
use crate::rules::Rules;
use rand::Rng;
use ratatui::layout::{Position, Size};
use std::time::Duration;

/// The per-tick snake simulation: movement, collisions, food, score, and
/// speed
#[derive(Clone, Debug)]
pub(crate) struct Engine<R = rand::rngs::ThreadRng> {
    pub(super) rng: R,
    pub(super) rules: Rules,
    pub(super) difficulty: Difficulty,
    pub(super) bounds: Bounds,
    pub(super) snake: Snake,
    pub(super) food: Option<Position>,
    pub(super) score: u32,
    pub(super) tick_period: Duration,
}

impl<R: Rng> Engine<R> {
    pub(crate) fn new(rules: Rules, options: Options, size: Size, rng: R) -> Engine<R> {
        let bounds = Bounds::from((size, options.wraparound));
        let initial_length = rules.initial_length;
        let tick_period = rules.tick_period(options.difficulty);
        let mut engine = Engine {
            rng,
            rules,
            difficulty: options.difficulty,
            bounds,
            snake: Snake::new(initial_length, bounds),
            food: None,
            score: 0,
            tick_period,
        };
        engine.reset(initial_length, size);
        engine
    }

    /// Start a fresh game on a board of the given size: a horizontal snake of
    /// `initial_length` cells moving right, zero score, the difficulty's
    /// starting speed, and newly-placed food.
    pub(crate) fn reset(&mut self, initial_length: usize, size: Size) {
        self.bounds = Bounds::from((size, self.bounds.wrap));
        self.snake = Snake::new(initial_length, self.bounds);
        self.score = 0;
        self.tick_period = self.rules.tick_period(self.difficulty);
        self.food = self.place_food();
    }

    /// Advance the simulation by one step.
    ///
    /// If the snake runs into a wall or into itself, the snake and food are
    /// left untouched and the report's `game_over` is set.
    pub(crate) fn tick(&mut self) -> TickReport {
        self.snake.commit_turn();
        let Some(head) = self.snake.direction().advance(self.snake.head(), self.bounds) else {
            return self.report(TickEvent::GameOver(GameOverCause::Wall), false);
        };
        // The tail still counts here, even though it would move out of the
        // way on this tick.
        if self.snake.occupies(head) {
            return self.report(TickEvent::GameOver(GameOverCause::SelfCollision), false);
        }
        self.snake.push_head(head);
        if self.food != Some(head) {
            self.snake.pop_tail();
            return self.report(TickEvent::Moved, false);
        }
        let old_score = self.score;
        self.score = self.score.saturating_add(self.rules.food_reward);
        self.food = self.place_food();
        let period = self
            .rules
            .sped_up(self.tick_period, old_score, self.score);
        let sped_up = period < self.tick_period;
        self.tick_period = period;
        if self.food.is_none() {
            self.report(TickEvent::GameOver(GameOverCause::BoardFilled), sped_up)
        } else {
            self.report(TickEvent::AteFood, sped_up)
        }
    }

    /// Pick a uniformly random cell not occupied by the snake by drawing
    /// cells until a free one turns up.  Returns `None` if the snake covers
    /// the whole board.
    fn place_food(&mut self) -> Option<Position> {
        // Segments never overlap, so a shorter snake leaves a free cell and
        // the loop below terminates.
        if self.snake.len() >= self.bounds.area() {
            return None;
        }
        loop {
            let pos = Position::new(
                self.rng.random_range(0..self.bounds.width),
                self.rng.random_range(0..self.bounds.height),
            );
            if !self.snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}

impl<R> Engine<R> {
    /// Request that the snake turn on the next tick.  Returns `false` if the
    /// request was ignored for being a reversal of the current direction.
    pub(crate) fn set_pending_direction(&mut self, direction: Direction) -> bool {
        self.snake.turn(direction)
    }

    /// Apply new gameplay options.  The new difficulty's speed takes effect at
    /// the next reset.
    pub(crate) fn set_options(&mut self, options: Options) {
        self.difficulty = options.difficulty;
        self.bounds.wrap = options.wraparound;
    }

    pub(crate) fn rules(&self) -> &Rules {
        &self.rules
    }

    pub(crate) fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub(crate) fn snake(&self) -> &Snake {
        &self.snake
    }

    pub(crate) fn food(&self) -> Option<Position> {
        self.food
    }

    pub(crate) fn score(&self) -> u32 {
        self.score
    }

    pub(crate) fn tick_period(&self) -> Duration {
        self.tick_period
    }

    fn report(&self, event: TickEvent, sped_up: bool) -> TickReport {
        TickReport {
            event,
            snake: self.snake.segments().iter().copied().collect(),
            food: self.food,
            score: self.score,
            tick_period: self.tick_period,
            sped_up,
        }
    }
}

/// The outcome of a single tick
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct TickReport {
    pub(crate) event: TickEvent,

    /// The snake's cells after the tick, head first
    pub(crate) snake: Vec<Position>,

    pub(crate) food: Option<Position>,
    pub(crate) score: u32,
    pub(crate) tick_period: Duration,

    /// True if eating on this tick made the snake faster
    pub(crate) sped_up: bool,
}

impl TickReport {
    pub(crate) fn ate_food(&self) -> bool {
        matches!(
            self.event,
            TickEvent::AteFood | TickEvent::GameOver(GameOverCause::BoardFilled)
        )
    }

    pub(crate) fn game_over(&self) -> Option<GameOverCause> {
        match self.event {
            TickEvent::GameOver(cause) => Some(cause),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickEvent {
    Moved,
    AteFood,
    GameOver(GameOverCause),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum GameOverCause {
    /// The snake left a non-wraparound board
    Wall,

    /// The snake ran into its own body
    SelfCollision,

    /// The snake ate the last food there was room for
    BoardFilled,
}
