//! The tick engine: the rules of the game, free of any input or drawing
//! concerns.
//!
//! A [`GameState`] is an immutable snapshot; [`GameState::advance()`] produces
//! the state for the next tick.  The only source of nondeterminism is the
//! random number generator passed in for placing food.
mod direction;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::snake::{Segment, Snake};
use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::{Position, Rect, Size};

/// The snake every game starts with, head first
pub(crate) const INITIAL_SNAKE: [Segment; 2] = [
    Segment::new(10, 10, Direction::Right),
    Segment::new(9, 10, Direction::Right),
];

/// The direction the snake travels in at the start of a game
pub(crate) const INITIAL_DIRECTION: Direction = Direction::Right;

/// How the body follows the head
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum GrowthMode {
    /// Classic movement: the new head is pushed onto the front and the tail
    /// is dropped unless the snake is growing.  Moving into the cell the tail
    /// currently occupies is a collision.
    #[default]
    Single,

    /// The body is a deque: the trailing segment is popped before the
    /// leading one advances, so the trailing end is free to be moved into.
    /// Growing re-appends the popped segment.
    TwoHead,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RunState {
    Running,
    Terminated(Ending),
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Ending {
    Wall,
    SelfCollision,
    /// The snake covers the whole grid and there is nowhere left to put food
    BoardFull,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GameState {
    snake: Snake,
    /// Always `Some` while the game is running
    food: Option<Position>,
    score: u32,
    run_state: RunState,
    mode: GrowthMode,
}

/// The result of advancing a [`GameState`] by one tick
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Tick {
    pub(crate) state: GameState,

    /// Did the snake eat the food on this tick?
    pub(crate) ate: bool,
}

impl GameState {
    /// Return the state at the start of a new game
    pub(crate) fn reset<R: Rng>(mode: GrowthMode, rng: &mut R) -> GameState {
        let snake = Snake {
            segments: INITIAL_SNAKE.into(),
        };
        let food = spawn_food(&snake, consts::GRID_SIZE, rng);
        let run_state = if food.is_some() {
            RunState::Running
        } else {
            RunState::Terminated(Ending::BoardFull)
        };
        GameState {
            snake,
            food,
            score: 0,
            run_state,
            mode,
        }
    }

    /// Compute the next state after moving the snake one cell in
    /// `direction`.  `direction` must already have been checked against
    /// reversal with [`Direction::is_allowed()`].
    ///
    /// On a collision, the returned state is terminated and the snake is left
    /// as it was before the move.  Advancing a terminated state returns it
    /// unchanged.
    pub(crate) fn advance<R: Rng>(&self, direction: Direction, rng: &mut R) -> Tick {
        if !self.running() {
            return Tick {
                state: self.clone(),
                ate: false,
            };
        }
        let Some(pos) = direction.advance(self.snake.head().pos, consts::GRID_SIZE) else {
            return self.terminate(Ending::Wall);
        };
        let mut segments = self.snake.segments.clone();
        let dropped = match self.mode {
            GrowthMode::Single => None,
            GrowthMode::TwoHead => segments.pop_back(),
        };
        if segments.iter().any(|seg| seg.pos == pos) {
            return self.terminate(Ending::SelfCollision);
        }
        segments.push_front(Segment {
            pos,
            facing: direction,
        });
        let ate = self.food == Some(pos);
        match (self.mode, ate) {
            (GrowthMode::Single, false) => {
                let _ = segments.pop_back();
            }
            (GrowthMode::TwoHead, true) => segments.extend(dropped),
            (GrowthMode::Single, true) | (GrowthMode::TwoHead, false) => (),
        }
        let mut state = GameState {
            snake: Snake { segments },
            food: self.food,
            score: self.score,
            run_state: RunState::Running,
            mode: self.mode,
        };
        if ate {
            state.score = state.score.saturating_add(1);
            state.food = spawn_food(&state.snake, consts::GRID_SIZE, rng);
            if state.food.is_none() {
                state.run_state = RunState::Terminated(Ending::BoardFull);
            }
        }
        Tick { state, ate }
    }

    fn terminate(&self, ending: Ending) -> Tick {
        Tick {
            state: GameState {
                run_state: RunState::Terminated(ending),
                ..self.clone()
            },
            ate: false,
        }
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

    pub(crate) fn run_state(&self) -> RunState {
        self.run_state
    }

    pub(crate) fn mode(&self) -> GrowthMode {
        self.mode
    }

    pub(crate) fn running(&self) -> bool {
        self.run_state == RunState::Running
    }

    #[cfg(test)]
    pub(crate) fn with_parts(snake: Snake, food: Position, score: u32, mode: GrowthMode) -> Self {
        GameState {
            snake,
            food: Some(food),
            score,
            run_state: RunState::Running,
            mode,
        }
    }
}

/// Pick a uniformly random cell within `grid` that the snake does not
/// occupy.  Returns `None` if there are no such cells.
pub(crate) fn spawn_food<R: Rng>(snake: &Snake, grid: Size, rng: &mut R) -> Option<Position> {
    Rect::from((Position::ORIGIN, grid))
        .positions()
        .filter(|&p| !snake.occupies(p))
        .choose(rng)
}
