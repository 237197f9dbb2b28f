use crate::appearance::Appearance;
use crate::consts;
use crate::util::{LoadError, SaveError};
use serde::Deserialize;
use std::borrow::Cow;
use std::num::NonZeroU64;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay settings
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Default appearance when no saved settings are present
    #[serde(default)]
    pub(crate) appearance: Appearance,

    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("snakeskin").join("config.toml"))
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

    /// Return the filepath at which appearance settings should be stored:
    /// the file given in the configuration or, if that is not set, the
    /// default settings file path.  Return `None` if no path is present in
    /// the configuration and the default path could not be computed.
    fn settings_file(&self) -> Option<Cow<'_, Path>> {
        self.files
            .settings_file
            .as_deref()
            .map(Cow::from)
            .or_else(|| Appearance::default_path().map(Cow::from))
    }

    /// Load appearance settings from a file.  If the file does not exist,
    /// `self.appearance` is returned.
    ///
    /// If `self.files.save_settings` is `false`, `self.appearance` is returned
    /// without reading anything from disk.
    pub(crate) fn load_appearance(&self) -> Result<Appearance, LoadError> {
        let r = if !self.files.save_settings {
            Ok(None)
        } else if let Some(p) = self.settings_file() {
            Appearance::load(&p)
        } else {
            Err(LoadError::no_path("appearance settings"))
        };
        match r {
            Ok(Some(appearance)) => Ok(appearance),
            Ok(None) => Ok(self.appearance),
            Err(e) => Err(e),
        }
    }

    /// Save the given appearance settings to a file.
    ///
    /// If `self.files.save_settings` is `false`, nothing is saved.
    pub(crate) fn save_appearance(&self, appearance: Appearance) -> Result<(), SaveError> {
        if !self.files.save_settings {
            return Ok(());
        }
        if let Some(p) = self.settings_file() {
            appearance.save(&p)
        } else {
            Err(SaveError::no_path("appearance settings"))
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Milliseconds between movements of the snake
    tick_period_ms: NonZeroU64,
}

impl GameConfig {
    pub(crate) fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms.get())
    }
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        let millis = u64::try_from(consts::TICK_PERIOD.as_millis())
            .ok()
            .and_then(NonZeroU64::new)
            .unwrap_or(NonZeroU64::MIN);
        GameConfig {
            tick_period_ms: millis,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which appearance settings should be stored
    pub(crate) settings_file: Option<PathBuf>,

    /// Whether to load & save appearance settings in a file
    pub(crate) save_settings: bool,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            settings_file: None,
            save_settings: true,
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
    use crate::appearance::{EyeStyle, FoodKind, SnakeColor, SnakeKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config() {
        let config = toml::from_str::<Config>("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.game.tick_period(), Duration::from_millis(150));
        assert!(config.files.save_settings);
    }

    #[test]
    fn full_config() {
        let src = concat!(
            "[game]\n",
            "tick-period-ms = 90\n",
            "\n",
            "[appearance]\n",
            "snake = \"double-head\"\n",
            "color = \"rainbow\"\n",
            "eyes = \"cute\"\n",
            "food = \"cheese\"\n",
            "\n",
            "[files]\n",
            "settings-file = \"/tmp/snakeskin/appearance.json\"\n",
            "save-settings = false\n",
        );
        let config = toml::from_str::<Config>(src).unwrap();
        assert_eq!(
            config,
            Config {
                game: GameConfig {
                    tick_period_ms: NonZeroU64::new(90).unwrap(),
                },
                appearance: Appearance {
                    snake: SnakeKind::DoubleHead,
                    color: SnakeColor::Rainbow,
                    eyes: EyeStyle::Cute,
                    food: FoodKind::Cheese,
                },
                files: FileConfig {
                    settings_file: Some(PathBuf::from("/tmp/snakeskin/appearance.json")),
                    save_settings: false,
                },
            }
        );
    }

    #[test]
    fn zero_tick_period() {
        assert!(toml::from_str::<Config>("[game]\ntick-period-ms = 0\n").is_err());
    }

    #[test]
    fn unknown_color() {
        assert!(toml::from_str::<Config>("[appearance]\ncolor = \"plaid\"\n").is_err());
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
        fs_err::write(&path, "[game\n").unwrap();
        assert!(matches!(
            Config::load(&path, true),
            Err(ConfigError::Parse(_))
        ));
    }

    fn config_in(dir: &Path, save_settings: bool) -> Config {
        Config {
            appearance: Appearance {
                color: SnakeColor::Brown,
                ..Appearance::default()
            },
            files: FileConfig {
                settings_file: Some(dir.join("appearance.json")),
                save_settings,
            },
            ..Config::default()
        }
    }

    #[test]
    fn appearance_falls_back_to_config() {
        let tmpdir = tempfile::tempdir().unwrap();
        let config = config_in(tmpdir.path(), true);
        assert_eq!(config.load_appearance().unwrap(), config.appearance);
    }

    #[test]
    fn appearance_roundtrip() {
        let tmpdir = tempfile::tempdir().unwrap();
        let config = config_in(tmpdir.path(), true);
        let chosen = Appearance {
            snake: SnakeKind::DoubleHead,
            eyes: EyeStyle::Angry,
            ..config.appearance
        };
        config.save_appearance(chosen).unwrap();
        assert_eq!(config.load_appearance().unwrap(), chosen);
    }

    #[test]
    fn saving_disabled() {
        let tmpdir = tempfile::tempdir().unwrap();
        let config = config_in(tmpdir.path(), false);
        let chosen = Appearance {
            food: FoodKind::Frog,
            ..config.appearance
        };
        config.save_appearance(chosen).unwrap();
        assert!(!tmpdir.path().join("appearance.json").exists());
        assert_eq!(config.load_appearance().unwrap(), config.appearance);
    }
}
