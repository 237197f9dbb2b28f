use super::direction::Direction;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// One grid cell occupied by the snake
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Segment {
    pub(crate) pos: Position,

    /// The direction the segment was facing when it was the head.  Only used
    /// for drawing.
    pub(crate) facing: Direction,
}

impl Segment {
    pub(crate) const fn new(x: u16, y: u16, facing: Direction) -> Segment {
        Segment {
            pos: Position { x, y },
            facing,
        }
    }
}

/// Snake state.  The head is at the front of `segments` and the tail is at
/// the back.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) segments: VecDeque<Segment>,
}

impl Snake {
    /// Create a snake from its segments, head first.  Returns `None` if
    /// `segments` is empty.
    #[cfg(test)]
    pub(crate) fn new<I: IntoIterator<Item = Segment>>(segments: I) -> Option<Snake> {
        let segments = VecDeque::from_iter(segments);
        (!segments.is_empty()).then_some(Snake { segments })
    }

    pub(crate) fn head(&self) -> Segment {
        self.segments[0]
    }

    pub(crate) fn tail(&self) -> Segment {
        self.segments[self.segments.len() - 1]
    }

    pub(crate) fn len(&self) -> usize {
        self.segments.len()
    }

    pub(crate) fn segments(&self) -> impl DoubleEndedIterator<Item = Segment> + '_ {
        self.segments.iter().copied()
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.segments.iter().map(|seg| seg.pos)
    }

    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.positions().any(|p| p == pos)
    }
}
