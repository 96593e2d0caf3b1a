use crate::consts;
use crate::options::Difficulty;
use enum_map::{enum_map, EnumMap};
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Tunable constants governing growth, scoring, and speed
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "RawRules")]
pub(crate) struct Rules {
    /// Length of the snake at the start of a game
    pub(crate) initial_length: usize,

    /// Points awarded per food eaten
    pub(crate) food_reward: u32,

    /// Speed up every time the score passes a multiple of this
    pub(crate) speedup_milestone: u32,

    /// Amount by which the tick period shrinks at each milestone
    pub(crate) speedup_step: Duration,

    /// Floor for the tick period
    pub(crate) min_tick_period: Duration,

    /// Tick period at the start of a game, by difficulty
    pub(crate) tick_periods: EnumMap<Difficulty, Duration>,
}

impl Rules {
    pub(crate) fn tick_period(&self, difficulty: Difficulty) -> Duration {
        self.tick_periods[difficulty]
    }

    /// Compute the tick period after the score has gone from `old_score` to
    /// `new_score`, starting from `period`.  Each milestone crossed shortens
    /// the period by one step, down to the floor.
    pub(crate) fn sped_up(&self, period: Duration, old_score: u32, new_score: u32) -> Duration {
        let crossed = (new_score / self.speedup_milestone)
            .saturating_sub(old_score / self.speedup_milestone);
        if crossed == 0 {
            return period;
        }
        period
            .saturating_sub(self.speedup_step.saturating_mul(crossed))
            .max(self.min_tick_period)
    }
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            initial_length: consts::INITIAL_SNAKE_LENGTH,
            food_reward: consts::FOOD_REWARD,
            speedup_milestone: consts::SPEEDUP_MILESTONE,
            speedup_step: consts::SPEEDUP_STEP,
            min_tick_period: consts::MIN_TICK_PERIOD,
            tick_periods: enum_map! {
                Difficulty::Easy => consts::EASY_TICK_PERIOD,
                Difficulty::Medium => consts::MEDIUM_TICK_PERIOD,
                Difficulty::Hard => consts::HARD_TICK_PERIOD,
            },
        }
    }
}

/// `Rules` as written in the configuration file, with durations in
/// milliseconds
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawRules {
    initial_length: usize,
    food_reward: u32,
    speedup_milestone: u32,
    speedup_step_ms: u64,
    min_tick_ms: u64,
    easy_tick_ms: u64,
    medium_tick_ms: u64,
    hard_tick_ms: u64,
}

impl Default for RawRules {
    fn default() -> RawRules {
        let rules = Rules::default();
        RawRules {
            initial_length: rules.initial_length,
            food_reward: rules.food_reward,
            speedup_milestone: rules.speedup_milestone,
            speedup_step_ms: millis(rules.speedup_step),
            min_tick_ms: millis(rules.min_tick_period),
            easy_tick_ms: millis(rules.tick_period(Difficulty::Easy)),
            medium_tick_ms: millis(rules.tick_period(Difficulty::Medium)),
            hard_tick_ms: millis(rules.tick_period(Difficulty::Hard)),
        }
    }
}

impl TryFrom<RawRules> for Rules {
    type Error = RulesError;

    fn try_from(value: RawRules) -> Result<Rules, RulesError> {
        if value.initial_length == 0 {
            return Err(RulesError::ZeroLength);
        }
        if value.speedup_milestone == 0 {
            return Err(RulesError::ZeroMilestone);
        }
        if value.min_tick_ms == 0 {
            return Err(RulesError::ZeroFloor);
        }
        let tick_periods = enum_map! {
            Difficulty::Easy => Duration::from_millis(value.easy_tick_ms),
            Difficulty::Medium => Duration::from_millis(value.medium_tick_ms),
            Difficulty::Hard => Duration::from_millis(value.hard_tick_ms),
        };
        let min_tick_period = Duration::from_millis(value.min_tick_ms);
        if let Some((difficulty, _)) = tick_periods
            .iter()
            .find(|&(_, &period)| period < min_tick_period)
        {
            return Err(RulesError::BelowFloor(difficulty));
        }
        Ok(Rules {
            initial_length: value.initial_length,
            food_reward: value.food_reward,
            speedup_milestone: value.speedup_milestone,
            speedup_step: Duration::from_millis(value.speedup_step_ms),
            min_tick_period,
            tick_periods,
        })
    }
}

fn millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum RulesError {
    #[error("initial-length must be at least 1")]
    ZeroLength,
    #[error("speedup-milestone must be at least 1")]
    ZeroMilestone,
    #[error("min-tick-ms must be at least 1")]
    ZeroFloor,
    #[error("tick period for {0} difficulty is below min-tick-ms")]
    BelowFloor(Difficulty),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(150, 40, 50, 140)]
    #[case(140, 90, 100, 130)]
    #[case(150, 0, 10, 150)]
    #[case(150, 50, 60, 150)]
    #[case(60, 90, 100, 50)]
    #[case(50, 490, 500, 50)]
    #[case(150, 40, 110, 130)]
    fn test_sped_up(
        #[case] period_ms: u64,
        #[case] old_score: u32,
        #[case] new_score: u32,
        #[case] expected_ms: u64,
    ) {
        let rules = Rules::default();
        assert_eq!(
            rules.sped_up(Duration::from_millis(period_ms), old_score, new_score),
            Duration::from_millis(expected_ms)
        );
    }

    #[test]
    fn medium_progression_never_below_floor() {
        let rules = Rules::default();
        let mut period = rules.tick_period(Difficulty::Medium);
        let mut score = 0;
        let mut history = Vec::new();
        while score < 1000 {
            let new_score = score + rules.food_reward;
            period = rules.sped_up(period, score, new_score);
            score = new_score;
            history.push((score, period));
        }
        assert!(history.contains(&(50, Duration::from_millis(140))));
        assert!(history.contains(&(100, Duration::from_millis(130))));
        assert!(history.windows(2).all(|w| w[1].1 <= w[0].1));
        assert_eq!(period, rules.min_tick_period);
    }

    #[test]
    fn deserialize_defaults() {
        let rules = toml::from_str::<Rules>("").unwrap();
        assert_eq!(rules, Rules::default());
    }

    #[test]
    fn deserialize_custom() {
        let rules = toml::from_str::<Rules>(concat!(
            "initial-length = 5\n",
            "food-reward = 15\n",
            "hard-tick-ms = 80\n",
            "min-tick-ms = 40\n",
        ))
        .unwrap();
        assert_eq!(rules.initial_length, 5);
        assert_eq!(rules.food_reward, 15);
        assert_eq!(rules.tick_period(Difficulty::Hard), Duration::from_millis(80));
        assert_eq!(rules.tick_period(Difficulty::Easy), Duration::from_millis(200));
        assert_eq!(rules.min_tick_period, Duration::from_millis(40));
    }

    #[rstest]
    #[case("initial-length = 0\n")]
    #[case("speedup-milestone = 0\n")]
    #[case("min-tick-ms = 0\n")]
    #[case("hard-tick-ms = 30\n")]
    fn deserialize_invalid(#[case] src: &str) {
        assert!(toml::from_str::<Rules>(src).is_err());
    }
}
