use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Style,
};

/// Draws grid cells into the part of a buffer occupied by the playing field.
/// Each grid cell is [`consts::CELL_WIDTH`] columns wide.
#[derive(Debug, Eq, PartialEq)]
pub(super) struct Canvas<'a> {
    pub(super) area: Rect,
    pub(super) buf: &'a mut Buffer,
}

impl Canvas<'_> {
    /// Draw `symbol` (one character per column) at grid cell `pos`.  Columns
    /// that fall outside the canvas are skipped.
    pub(super) fn draw_cell(&mut self, pos: Position, symbol: &str, style: Style) {
        let Some(x0) = pos
            .x
            .checked_mul(consts::CELL_WIDTH)
            .and_then(|x| self.area.x.checked_add(x))
        else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        for (x, ch) in (x0..).zip(symbol.chars().take(usize::from(consts::CELL_WIDTH))) {
            if !self.area.contains(Position { x, y }) {
                continue;
            }
            if let Some(cell) = self.buf.cell_mut((x, y)) {
                cell.set_char(ch);
                cell.set_style(style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn draws_two_columns() {
        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        let mut canvas = Canvas {
            area: Rect::new(1, 1, 8, 2),
            buf: &mut buffer,
        };
        let style = Style::new().fg(Color::Red);
        canvas.draw_cell(Position::new(2, 1), "ab", style);
        canvas.draw_cell(Position::new(4, 0), "zz", style);
        let mut expected = Buffer::with_lines(["          ", "          ", "     ab   "]);
        expected.set_style(Rect::new(5, 2, 2, 1), style);
        pretty_assertions::assert_eq!(buffer, expected);
    }
}
