//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Dimensions of the playing field, in cells
pub(crate) const GRID_SIZE: Size = Size {
    width: 20,
    height: 20,
};

/// Default time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(150);

/// Probability that the snake hisses (and flicks its tongue) on a given tick
pub(crate) const HISS_PROBABILITY: f64 = 0.05;

/// How long the snake's tongue stays out after a hiss
pub(crate) const TONGUE_DURATION: Duration = Duration::from_millis(300);

/// How long the snake's mouth stays open after eating
pub(crate) const MOUTH_OPEN_DURATION: Duration = Duration::from_millis(500);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of terminal columns used to draw one grid cell, so that cells come
/// out roughly square
pub(crate) const CELL_WIDTH: u16 = 2;

/// Hue step between consecutive segments of a rainbow snake, in degrees
pub(crate) const RAINBOW_HUE_STEP: usize = 30;

/// Background of the playing field
pub(crate) const FIELD_STYLE: Style = Style::new().bg(Color::Rgb(0x2E, 0xCC, 0x71));

/// Background behind the food: the field color lightened halfway to white
pub(crate) const FOOD_HIGHLIGHT_COLOR: Color = Color::Rgb(0x96, 0xE5, 0xB8);

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: &str = "██";

/// Glyph for the snake's tongue, drawn in front of its head
pub(crate) const TONGUE_SYMBOL: &str = "~~";

/// Glyph for the snake's head when it's collided with a wall or itself
pub(crate) const COLLISION_SYMBOL: &str = "××";

/// Style for the snake's tongue
pub(crate) const TONGUE_STYLE: Style = Style::new().fg(Color::Red).add_modifier(Modifier::BOLD);

/// Background for the snake's head while its mouth is open
pub(crate) const MOUTH_COLOR: Color = Color::Red;

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
