use crate::appearance::{Adjustable, Appearance, OptKey, OptValue};
use crate::command::Command;
use crate::consts;
use crate::engine::Ending;
use crate::util::EnumExt;
use enum_map::{Enum, EnumMap};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// The pop-up shown when a game ends: reports the score and lets the user
/// restyle the snake before playing again
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct SettingsPanel {
    score: u32,
    ending: Ending,
    selection: Item,
    settings: EnumMap<OptKey, OptValue>,
}

impl SettingsPanel {
    const HORIZONTAL_PADDING: u16 = 1; // padding on each side
    const POINTER_WIDTH: u16 = 2;
    const LABEL_VALUE_GUTTER: u16 = 2;
    const ROW_WIDTH: u16 = Self::POINTER_WIDTH
        + OptKey::DISPLAY_WIDTH
        + Self::LABEL_VALUE_GUTTER
        + OptValue::DISPLAY_WIDTH;

    /// The width that should be used for the `Rect` passed to
    /// `SettingsPanel::render()`
    pub(super) const WIDTH: u16 = 2 /* for border */ + 2 * Self::HORIZONTAL_PADDING + Self::ROW_WIDTH;

    /// The height that should be used for the `Rect` passed to
    /// `SettingsPanel::render()`
    #[allow(clippy::cast_possible_truncation)]
    pub(super) const HEIGHT: u16 = 2 /* for border */ + 3 /* score, ending, blank */ + (OptKey::LENGTH as u16) + 3 /* blank, buttons */;

    pub(super) fn new(appearance: Appearance, score: u32, ending: Ending) -> SettingsPanel {
        SettingsPanel {
            score,
            ending,
            selection: Item::PlayAgain,
            settings: EnumMap::from_fn(|key| appearance.get(key)),
        }
    }

    pub(super) fn appearance(&self) -> Appearance {
        let mut appearance = Appearance::default();
        for key in OptKey::iter() {
            appearance.set(key, self.settings[key]);
        }
        appearance
    }

    /// Handle a command.  Returns `Some` if the user made a choice.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<PanelChoice> {
        match (self.selection, cmd) {
            (_, Command::Quit | Command::Q) | (Item::Quit, Command::Enter) => {
                return Some(PanelChoice::Quit)
            }
            (_, Command::R | Command::Enter) => {
                return Some(PanelChoice::PlayAgain(self.appearance()))
            }
            (_, Command::Up) => {
                if let Some(item) = self.selection.prev() {
                    self.selection = item;
                }
            }
            (_, Command::Down) => {
                if let Some(item) = self.selection.next() {
                    self.selection = item;
                }
            }
            (_, Command::Next) => self.selection = self.selection.next().unwrap_or(Item::FIRST),
            (_, Command::Prev) => self.selection = self.selection.prev().unwrap_or(Item::LAST),
            (_, Command::Home) => self.selection = Item::FIRST,
            (_, Command::End) => self.selection = Item::LAST,
            (Item::Option(key), Command::Left) => self.settings[key].decrease(),
            (Item::Option(key), Command::Right) => self.settings[key].increase(),
            (Item::PlayAgain | Item::Quit, Command::Left | Command::Right) => (),
        }
        None
    }

    fn ending_message(&self) -> &'static str {
        match self.ending {
            Ending::Wall => "You hit the wall.",
            Ending::SelfCollision => "You ran into yourself.",
            Ending::BoardFull => "You filled the board!",
        }
    }
}

/// What the user chose in the settings panel
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum PanelChoice {
    PlayAgain(Appearance),
    Quit,
}

/// The selectable rows of the panel, top to bottom
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Item {
    Option(OptKey),
    PlayAgain,
    Quit,
}

impl Item {
    const FIRST: Item = Item::Option(OptKey::Snake);
    const LAST: Item = Item::Quit;

    fn next(self) -> Option<Item> {
        match self {
            Item::Option(key) => Some(key.next().map_or(Item::PlayAgain, Item::Option)),
            Item::PlayAgain => Some(Item::Quit),
            Item::Quit => None,
        }
    }

    fn prev(self) -> Option<Item> {
        match self {
            Item::Option(key) => key.prev().map(Item::Option),
            Item::PlayAgain => Some(Item::Option(OptKey::max())),
            Item::Quit => Some(Item::PlayAgain),
        }
    }
}

impl Widget for &SettingsPanel {
    /*
     * ┌────────── GAME OVER ───────────┐
     * │         Your score: 3          │
     * │       You hit the wall.        │
     * │                                │
     * │ » Snake Type   ◁   Normal    ▶ │
     * │   Snake Color  ◁    Black    ▶ │
     * │   Eye Style    ◁   Normal    ▶ │
     * │   Food         ◁    Apple    ▶ │
     * │                                │
     * │        [Play Again (r)]        │
     * │           [Quit (q)]           │
     * └────────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(SettingsPanel::HORIZONTAL_PADDING))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Line::from(format!("Your score: {}", self.score))
                .centered()
                .render(row, buf);
        }
        if let Some(row) = rows.next() {
            Line::from(self.ending_message()).centered().render(row, buf);
        }
        let _ = rows.next();
        for (key, row) in OptKey::iter().zip(rows.by_ref()) {
            let selected = self.selection == Item::Option(key);
            let style = if selected {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            let s = format!(
                "{pointer:pwidth$}{key:lwidth$}{space:gutter$}{value}",
                pointer = if selected { "»" } else { "" },
                pwidth = usize::from(SettingsPanel::POINTER_WIDTH),
                lwidth = usize::from(OptKey::DISPLAY_WIDTH),
                space = "",
                gutter = usize::from(SettingsPanel::LABEL_VALUE_GUTTER),
                value = self.settings[key],
            );
            Span::styled(s, style).render(row, buf);
        }
        let _ = rows.next();
        for (item, label, hotkey, row) in [
            (Item::PlayAgain, "[Play Again (", "r", rows.next()),
            (Item::Quit, "[Quit (", "q", rows.next()),
        ] {
            let Some(row) = row else {
                break;
            };
            let style = if self.selection == item {
                consts::MENU_SELECTION_STYLE
            } else {
                Style::new()
            };
            Line::from_iter([
                Span::styled(label, style),
                Span::styled(hotkey, consts::KEY_STYLE.patch(style)),
                Span::styled(")]", style),
            ])
            .centered()
            .render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::{EyeStyle, FoodKind, SnakeColor, SnakeKind};

    fn panel() -> SettingsPanel {
        SettingsPanel::new(Appearance::default(), 3, Ending::Wall)
    }

    #[test]
    fn dimensions() {
        assert_eq!(SettingsPanel::WIDTH, 34);
        assert_eq!(SettingsPanel::HEIGHT, 12);
    }

    #[test]
    fn play_again_unchanged() {
        let mut panel = panel();
        assert_eq!(
            panel.handle_command(Command::Enter),
            Some(PanelChoice::PlayAgain(Appearance::default()))
        );
    }

    #[test]
    fn quit() {
        let mut panel = panel();
        assert_eq!(panel.handle_command(Command::Q), Some(PanelChoice::Quit));
        let mut panel = self::panel();
        assert_eq!(panel.handle_command(Command::Down), None);
        assert_eq!(panel.selection, Item::Quit);
        assert_eq!(panel.handle_command(Command::Down), None);
        assert_eq!(panel.selection, Item::Quit);
        assert_eq!(panel.handle_command(Command::Enter), Some(PanelChoice::Quit));
    }

    #[test]
    fn adjust_options() {
        let mut panel = panel();
        for cmd in [
            Command::Home,
            Command::Right,
            Command::Down,
            Command::Right,
            Command::Right,
            Command::Right,
            Command::Left,
            Command::Down,
            Command::Right,
            Command::Right,
            Command::Down,
            Command::End,
            Command::Up,
            Command::Up,
            Command::Left,
            Command::Right,
            Command::Right,
        ] {
            assert_eq!(panel.handle_command(cmd), None, "{cmd:?}");
        }
        assert_eq!(
            panel.handle_command(Command::R),
            Some(PanelChoice::PlayAgain(Appearance {
                snake: SnakeKind::DoubleHead,
                color: SnakeColor::Blue,
                eyes: EyeStyle::Cute,
                food: FoodKind::Cherry,
            }))
        );
    }

    #[test]
    fn tab_wraps() {
        let mut panel = panel();
        assert_eq!(panel.handle_command(Command::Next), None);
        assert_eq!(panel.selection, Item::Quit);
        assert_eq!(panel.handle_command(Command::Next), None);
        assert_eq!(panel.selection, Item::FIRST);
        assert_eq!(panel.handle_command(Command::Prev), None);
        assert_eq!(panel.selection, Item::LAST);
        assert_eq!(panel.handle_command(Command::Home), None);
        assert_eq!(panel.handle_command(Command::Up), None);
        assert_eq!(panel.selection, Item::FIRST);
    }

    #[test]
    fn arrows_ignored_on_buttons() {
        let mut panel = panel();
        assert_eq!(panel.handle_command(Command::Right), None);
        assert_eq!(panel.appearance(), Appearance::default());
    }

    #[test]
    fn render() {
        let panel = panel();
        let area = Rect::new(0, 0, SettingsPanel::WIDTH, SettingsPanel::HEIGHT);
        let mut buffer = Buffer::empty(area);
        panel.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌────────── GAME OVER ───────────┐",
            "│         Your score: 3          │",
            "│       You hit the wall.        │",
            "│                                │",
            "│   Snake Type   ◁   Normal    ▶ │",
            "│   Snake Color  ◁    Black    ▶ │",
            "│   Eye Style    ◁   Normal    ▶ │",
            "│   Food         ◁    Apple    ▶ │",
            "│                                │",
            "│        [Play Again (r)]        │",
            "│           [Quit (q)]           │",
            "└────────────────────────────────┘",
        ]);
        expected.set_style(Rect::new(9, 9, 16, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(22, 9, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(19, 10, 1, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_selected_option() {
        let mut panel = panel();
        assert_eq!(panel.handle_command(Command::Up), None);
        let area = Rect::new(0, 0, SettingsPanel::WIDTH, SettingsPanel::HEIGHT);
        let mut buffer = Buffer::empty(area);
        panel.render(area, &mut buffer);
        let row: String = (2..32).map(|x| buffer[(x, 7)].symbol()).collect();
        assert_eq!(row, "» Food         ◁    Apple    ▶");
        assert_eq!(
            buffer[(2, 7)].style().add_modifier,
            consts::MENU_SELECTION_STYLE.add_modifier
        );
    }
}
