use crate::highscore::{HighScore, LoadError, SaveError};
use crate::options::Options;
use crate::rules::Rules;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay options in effect at startup
    #[serde(default)]
    pub(crate) options: Options,

    /// Scoring, growth, and speed constants
    #[serde(default)]
    pub(crate) rules: Rules,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Return the filepath at which the high score should be stored: the file
    /// given in the configuration or, if that is not set, the default high
    /// score file path.  Return `None` if no path is present in the
    /// configuration and the default path could not be computed.
    fn high_score_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .high_score_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| HighScore::default_path().map(Cow::from))
    }

    /// Load the high score from disk.
    ///
    /// If `self.files.save_high_score` is `false`, a zero high score is
    /// returned without reading anything.
    pub(crate) fn load_high_score(&self) -> Result<HighScore, LoadError> {
        if !self.files.save_high_score {
            Ok(HighScore::default())
        } else if let Some(p) = self.high_score_file() {
            HighScore::load(&p)
        } else {
            Err(LoadError::no_path())
        }
    }

    /// Save the high score to disk.
    ///
    /// If `self.files.save_high_score` is `false`, nothing is saved.
    pub(crate) fn save_high_score(&self, high_score: HighScore) -> Result<(), SaveError> {
        if !self.files.save_high_score {
            return Ok(());
        }
        if let Some(p) = self.high_score_file() {
            high_score.save(&p)
        } else {
            Err(SaveError::no_path())
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score should be stored
    high_score_file: Option<PathBuf>,

    /// Whether to load & save the high score at all
    save_high_score: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: None,
            save_high_score: true,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Difficulty;
    use std::time::Duration;

    #[test]
    fn empty_config() {
        let cfg = toml::from_str::<Config>("").unwrap();
        assert_eq!(cfg, Config::default());
        assert!(cfg.files.save_high_score);
    }

    #[test]
    fn full_config() {
        let cfg = toml::from_str::<Config>(concat!(
            "[options]\n",
            "difficulty = \"hard\"\n",
            "wraparound = true\n",
            "\n",
            "[rules]\n",
            "initial-length = 4\n",
            "speedup-step-ms = 20\n",
            "\n",
            "[files]\n",
            "high-score-file = \"/tmp/gridsnake/best.json\"\n",
            "save-high-score = false\n",
        ))
        .unwrap();
        assert_eq!(
            cfg.options,
            Options {
                difficulty: Difficulty::Hard,
                wraparound: true,
            }
        );
        assert_eq!(cfg.rules.initial_length, 4);
        assert_eq!(cfg.rules.speedup_step, Duration::from_millis(20));
        assert_eq!(cfg.rules.food_reward, 10);
        assert_eq!(
            cfg.files.high_score_file.as_deref(),
            Some(Path::new("/tmp/gridsnake/best.json"))
        );
        assert!(!cfg.files.save_high_score);
    }

    #[test]
    fn bad_difficulty() {
        assert!(toml::from_str::<Config>("[options]\ndifficulty = \"nightmare\"\n").is_err());
    }

    #[test]
    fn load_missing() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        assert_eq!(Config::load(&path, true).unwrap(), Config::default());
        assert!(matches!(
            Config::load(&path, false),
            Err(ConfigError::Read(_))
        ));
    }

    #[test]
    fn load_unparseable() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("config.toml");
        fs_err::write(&path, "[rules]\ninitial-length = 0\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn high_score_roundtrip_via_config() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("best.json");
        let cfg = Config {
            files: FileConfig {
                high_score_file: Some(path.clone()),
                save_high_score: true,
            },
            ..Config::default()
        };
        assert_eq!(cfg.load_high_score().unwrap().get(), 0);
        cfg.save_high_score(HighScore::new(70)).unwrap();
        assert_eq!(cfg.load_high_score().unwrap().get(), 70);
        assert!(path.exists());
    }

    #[test]
    fn high_score_disabled() {
        let tmpdir = tempfile::tempdir().unwrap();
        let path = tmpdir.path().join("best.json");
        let cfg = Config {
            files: FileConfig {
                high_score_file: Some(path.clone()),
                save_high_score: false,
            },
            ..Config::default()
        };
        cfg.save_high_score(HighScore::new(70)).unwrap();
        assert!(!path.exists());
        assert_eq!(cfg.load_high_score().unwrap().get(), 0);
    }
}
