use crate::command::Command;
use crate::util::center_rect;
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up reporting a non-fatal error, such as a failure to save the
/// appearance settings
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Warning {
    lines: Vec<String>,
}

impl Warning {
    const MAX_LINES: u16 = 12;
    const TEXT_WIDTH: u16 = 44;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_event(&self, event: Event) -> Option<WarningOutcome> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Enter | Command::Q => Some(WarningOutcome::Dismissed),
            Command::Quit => Some(WarningOutcome::Quit),
            _ => None,
        }
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        let mut msgs = msgs.into_iter();
        let Some(first) = msgs.next() else {
            return Warning {
                lines: vec![String::from("Something went wrong.")],
            };
        };
        let width = usize::from(Warning::TEXT_WIDTH);
        let mut lines = wrap(&first, textwrap::Options::new(width).break_words(true));
        let causes = msgs.collect::<Vec<_>>();
        if !causes.is_empty() {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            if let [cause] = causes.as_slice() {
                let opts = textwrap::Options::new(width)
                    .break_words(true)
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                lines.extend(wrap(cause, opts));
            } else {
                for (i, cause) in causes.iter().enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    let opts = textwrap::Options::new(width)
                        .break_words(true)
                        .initial_indent(&init_indent)
                        .subsequent_indent("       ");
                    lines.extend(wrap(cause, opts));
                }
            }
        }
        lines.truncate(usize::from(Warning::MAX_LINES));
        Warning { lines }
    }
}

fn wrap(text: &str, opts: textwrap::Options<'_>) -> Vec<String> {
    textwrap::wrap(text, opts)
        .into_iter()
        .map(Cow::into_owned)
        .collect()
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum WarningOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Warning {
    fn from(e: E) -> Warning {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Warning::from_error_messages(msgs)
    }
}

impl Widget for &Warning {
    // `area` is here the area of the entire display in which the program is
    // drawing, not the area for just the widget proper.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Warning::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::SaveError;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn from_error_chain() {
        let e = SaveError::write(
            "appearance settings",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let warning = Warning::from(e);
        assert_eq!(
            warning.lines,
            [
                "Failed to save appearance settings to disk",
                "",
                "Caused by:",
                "    0: failed to write file",
                "    1: permission denied",
            ]
        );
    }

    #[test]
    fn wrapped_message() {
        let warning = Warning::from_error_messages(vec![String::from(
            "'Twas brillig, and the slithy toves did gyre and gimble in the wabe",
        )]);
        assert_eq!(
            warning.lines,
            [
                "'Twas brillig, and the slithy toves did gyre",
                "and gimble in the wabe",
            ]
        );
    }

    #[test]
    fn dismiss() {
        let warning = Warning::from_error_messages(vec![String::from("Oops")]);
        assert_eq!(
            warning.handle_event(Event::Key(KeyCode::Enter.into())),
            Some(WarningOutcome::Dismissed)
        );
        assert_eq!(
            warning.handle_event(Event::Key(KeyEvent::new(
                KeyCode::Char('c'),
                KeyModifiers::CONTROL
            ))),
            Some(WarningOutcome::Quit)
        );
        assert_eq!(warning.handle_event(Event::Key(KeyCode::Left.into())), None);
    }

    #[test]
    fn render_one_cause() {
        let warning = Warning::from_error_messages(vec![
            String::from("Failed to save appearance settings to disk"),
            String::from("failed to write file"),
        ]);
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        warning.render(area, &mut buffer);
        let expected = Buffer::with_lines([
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "                ┌────────────────── WARNING ───────────────────┐                ",
            "                │ Failed to save appearance settings to disk   │                ",
            "                │                                              │                ",
            "                │ Caused by:                                   │                ",
            "                │     failed to write file                     │                ",
            "                │                                              │                ",
            "                │                     [OK]                     │                ",
            "                └──────────────────────────────────────────────┘                ",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
