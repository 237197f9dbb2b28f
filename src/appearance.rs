//! Cosmetic options chosen in the settings panel
use crate::engine::GrowthMode;
use crate::util::{EnumExt, LoadError, SaveError};
use enum_dispatch::enum_dispatch;
use enum_map::Enum;
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct Appearance {
    pub(crate) snake: SnakeKind,
    pub(crate) color: SnakeColor,
    pub(crate) eyes: EyeStyle,
    pub(crate) food: FoodKind,
}

impl Appearance {
    /// Return the default path at which the appearance chosen by the user is
    /// saved between runs
    pub(crate) fn default_path() -> Option<PathBuf> {
        dirs::data_local_dir().map(|p| p.join("snakeskin").join("appearance.json"))
    }

    /// Read saved appearance settings from `path`.  Returns `Ok(None)` if the
    /// file does not exist.
    pub(crate) fn load(path: &Path) -> Result<Option<Appearance>, LoadError> {
        let src = match fs_err::read(path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(LoadError::read("appearance settings", e)),
        };
        serde_json::from_slice(&src)
            .map(Some)
            .map_err(|e| LoadError::deserialize("appearance settings", e))
    }

    /// Write the appearance settings to `path`, creating parent directories
    /// as needed
    pub(crate) fn save(&self, path: &Path) -> Result<(), SaveError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent)
                .map_err(|e| SaveError::mkdir("appearance settings", e))?;
        }
        let mut src = serde_json::to_string_pretty(self)
            .map_err(|e| SaveError::serialize("appearance settings", e))?;
        src.push('\n');
        fs_err::write(path, &src)
            .map_err(|e| SaveError::write("appearance settings", e))?;
        Ok(())
    }

    pub(crate) fn growth_mode(&self) -> GrowthMode {
        self.snake.growth_mode()
    }

    pub(crate) fn get(&self, key: OptKey) -> OptValue {
        match key {
            OptKey::Snake => self.snake.into(),
            OptKey::Color => self.color.into(),
            OptKey::Eyes => self.eyes.into(),
            OptKey::Food => self.food.into(),
        }
    }

    pub(crate) fn set(&mut self, key: OptKey, value: OptValue) {
        match key {
            OptKey::Snake => {
                self.snake = value
                    .try_into()
                    .expect("Appearance::set(Snake, value) called with non-SnakeKind value");
            }
            OptKey::Color => {
                self.color = value
                    .try_into()
                    .expect("Appearance::set(Color, value) called with non-SnakeColor value");
            }
            OptKey::Eyes => {
                self.eyes = value
                    .try_into()
                    .expect("Appearance::set(Eyes, value) called with non-EyeStyle value");
            }
            OptKey::Food => {
                self.food = value
                    .try_into()
                    .expect("Appearance::set(Food, value) called with non-FoodKind value");
            }
        }
    }
}

/// The adjustable rows of the settings panel
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum OptKey {
    Snake,
    Color,
    Eyes,
    Food,
}

impl OptKey {
    pub(crate) const DISPLAY_WIDTH: u16 = 11;

    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            OptKey::Snake => "Snake Type",
            OptKey::Color => "Snake Color",
            OptKey::Eyes => "Eye Style",
            OptKey::Food => "Food",
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
    fn can_increase(&self) -> bool;
    fn can_decrease(&self) -> bool;
}

#[enum_dispatch(Adjustable)] // This also gives us From and TryInto
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum OptValue {
    SnakeKind,
    SnakeColor,
    EyeStyle,
    FoodKind,
}

impl OptValue {
    pub(crate) const DISPLAY_WIDTH: u16 = 15;
    const NAME_WIDTH: usize = 11;
}

impl fmt::Display for OptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            OptValue::SnakeKind(v) => v.as_str(),
            OptValue::SnakeColor(v) => v.as_str(),
            OptValue::EyeStyle(v) => v.as_str(),
            OptValue::FoodKind(v) => v.as_str(),
        };
        write!(
            f,
            "{left} {name:^width$} {right}",
            left = if self.can_decrease() { '◀' } else { '◁' },
            right = if self.can_increase() { '▶' } else { '▷' },
            width = OptValue::NAME_WIDTH,
        )
    }
}

/// Implement [`Adjustable`] for a fieldless enum by stepping through its
/// variants in declaration order, stopping at either end
macro_rules! adjustable_enum {
    ($($t:ty),* $(,)?) => {
        $(
            impl Adjustable for $t {
                fn increase(&mut self) {
                    if let Some(v) = self.next() {
                        *self = v;
                    }
                }

                fn decrease(&mut self) {
                    if let Some(v) = self.prev() {
                        *self = v;
                    }
                }

                fn can_increase(&self) -> bool {
                    self.next().is_some()
                }

                fn can_decrease(&self) -> bool {
                    self.prev().is_some()
                }
            }

            impl fmt::Display for $t {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.pad(self.as_str())
                }
            }
        )*
    };
}

adjustable_enum!(SnakeKind, SnakeColor, EyeStyle, FoodKind);

/// How many heads the snake has
#[derive(
    Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SnakeKind {
    #[default]
    Normal,
    DoubleHead,
}

impl SnakeKind {
    fn as_str(self) -> &'static str {
        match self {
            SnakeKind::Normal => "Normal",
            SnakeKind::DoubleHead => "Double Head",
        }
    }

    pub(crate) fn growth_mode(self) -> GrowthMode {
        match self {
            SnakeKind::Normal => GrowthMode::Single,
            SnakeKind::DoubleHead => GrowthMode::TwoHead,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SnakeColor {
    #[default]
    Black,
    Red,
    Blue,
    Yellow,
    Orange,
    Pink,
    Brown,
    /// Each segment gets a different hue
    Rainbow,
}

impl SnakeColor {
    fn as_str(self) -> &'static str {
        match self {
            SnakeColor::Black => "Black",
            SnakeColor::Red => "Red",
            SnakeColor::Blue => "Blue",
            SnakeColor::Yellow => "Yellow",
            SnakeColor::Orange => "Orange",
            SnakeColor::Pink => "Pink",
            SnakeColor::Brown => "Brown",
            SnakeColor::Rainbow => "Rainbow",
        }
    }

    /// Return the color of the segment at index `i` (counting from the head)
    pub(crate) fn segment_color(self, i: usize) -> Color {
        match self {
            SnakeColor::Black => Color::Rgb(0x00, 0x00, 0x00),
            SnakeColor::Red => Color::Rgb(0xFF, 0x00, 0x00),
            SnakeColor::Blue => Color::Rgb(0x00, 0x00, 0xFF),
            SnakeColor::Yellow => Color::Rgb(0xFF, 0xFF, 0x00),
            SnakeColor::Orange => Color::Rgb(0xFF, 0xA5, 0x00),
            SnakeColor::Pink => Color::Rgb(0xFF, 0xC0, 0xCB),
            SnakeColor::Brown => Color::Rgb(0xA5, 0x2A, 0x2A),
            SnakeColor::Rainbow => crate::util::hue_to_rgb(i),
        }
    }

    /// Return a color for the snake's eyes that can be seen against the
    /// snake's body
    pub(crate) fn eye_color(self) -> Color {
        match self {
            SnakeColor::Black | SnakeColor::Red | SnakeColor::Blue | SnakeColor::Brown => {
                Color::White
            }
            _ => Color::Black,
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum EyeStyle {
    #[default]
    Normal,
    Angry,
    Cute,
    Sleepy,
}

impl EyeStyle {
    fn as_str(self) -> &'static str {
        match self {
            EyeStyle::Normal => "Normal",
            EyeStyle::Angry => "Angry",
            EyeStyle::Cute => "Cute",
            EyeStyle::Sleepy => "Sleepy",
        }
    }

    /// Glyphs for a pair of eyes, filling one grid cell
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            EyeStyle::Normal => "oo",
            EyeStyle::Angry => r"\/",
            EyeStyle::Cute => "^^",
            EyeStyle::Sleepy => "--",
        }
    }
}

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Enum, Eq, Hash, PartialEq, Serialize,
)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum FoodKind {
    #[default]
    Apple,
    Watermelon,
    Cherry,
    Kiwi,
    Banana,
    Berry,
    Chilli,
    Rabbit,
    Frog,
    Tortoise,
    Cheese,
    Mushroom,
    Carrot,
    Tomato,
}

impl FoodKind {
    fn as_str(self) -> &'static str {
        match self {
            FoodKind::Apple => "Apple",
            FoodKind::Watermelon => "Watermelon",
            FoodKind::Cherry => "Cherry",
            FoodKind::Kiwi => "Kiwi",
            FoodKind::Banana => "Banana",
            FoodKind::Berry => "Berry",
            FoodKind::Chilli => "Chilli",
            FoodKind::Rabbit => "Rabbit",
            FoodKind::Frog => "Frog",
            FoodKind::Tortoise => "Tortoise",
            FoodKind::Cheese => "Cheese",
            FoodKind::Mushroom => "Mushroom",
            FoodKind::Carrot => "Carrot",
            FoodKind::Tomato => "Tomato",
        }
    }

    /// Glyph for drawing the food, filling one grid cell
    pub(crate) fn symbol(self) -> &'static str {
        match self {
            FoodKind::Apple => "● ",
            FoodKind::Watermelon => "◓ ",
            FoodKind::Cherry => "ő ",
            FoodKind::Kiwi => "◎ ",
            FoodKind::Banana => "☽ ",
            FoodKind::Berry => "♣ ",
            FoodKind::Chilli => "∫ ",
            FoodKind::Rabbit => "¥ ",
            FoodKind::Frog => "ᴥ ",
            FoodKind::Tortoise => "◠ ",
            FoodKind::Cheese => "◭ ",
            FoodKind::Mushroom => "♠ ",
            FoodKind::Carrot => "▼ ",
            FoodKind::Tomato => "◍ ",
        }
    }

    pub(crate) fn color(self) -> Color {
        match self {
            FoodKind::Apple | FoodKind::Tomato => Color::Rgb(0xE7, 0x4C, 0x3C),
            FoodKind::Watermelon | FoodKind::Frog => Color::Rgb(0x2E, 0xCC, 0x71),
            FoodKind::Cherry => Color::Rgb(0x9B, 0x59, 0xB6),
            FoodKind::Kiwi => Color::Rgb(0x27, 0xAE, 0x60),
            FoodKind::Banana => Color::Rgb(0xF1, 0xC4, 0x0F),
            FoodKind::Berry => Color::Rgb(0x8E, 0x44, 0xAD),
            FoodKind::Chilli => Color::Rgb(0xC0, 0x39, 0x2B),
            FoodKind::Rabbit => Color::Rgb(0x95, 0xA5, 0xA6),
            FoodKind::Tortoise => Color::Rgb(0x34, 0x49, 0x5E),
            FoodKind::Cheese => Color::Rgb(0xF3, 0x9C, 0x12),
            FoodKind::Mushroom => Color::Rgb(0xEC, 0xF0, 0xF1),
            FoodKind::Carrot => Color::Rgb(0xE6, 0x7E, 0x22),
        }
    }
}
