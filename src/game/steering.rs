use crate::engine::{Direction, INITIAL_DIRECTION};

/// The single pending-direction slot written by input handling and read once
/// per tick.
///
/// Requests are checked against the direction actually applied on the most
/// recent tick, so several key presses between two ticks cannot add up to a
/// reversal.  The last accepted request before a tick wins.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Steering {
    applied: Direction,
    pending: Direction,
}

impl Steering {
    pub(super) fn new() -> Steering {
        Steering {
            applied: INITIAL_DIRECTION,
            pending: INITIAL_DIRECTION,
        }
    }

    /// Ask for the snake to travel in `direction` from the next tick on.
    /// Returns `false` if the request was a reversal and has been ignored.
    pub(super) fn request(&mut self, direction: Direction) -> bool {
        let allowed = self.applied.is_allowed(direction);
        if allowed {
            self.pending = direction;
        }
        allowed
    }

    /// Return the direction to apply on the current tick
    pub(super) fn commit(&mut self) -> Direction {
        self.applied = self.pending;
        self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_rightwards() {
        let mut steering = Steering::new();
        assert_eq!(steering.commit(), Direction::Right);
    }

    #[test]
    fn reversal_ignored() {
        let mut steering = Steering::new();
        assert!(!steering.request(Direction::Left));
        assert_eq!(steering.commit(), Direction::Right);
    }

    #[test]
    fn last_request_wins() {
        let mut steering = Steering::new();
        assert!(steering.request(Direction::Up));
        assert!(steering.request(Direction::Down));
        assert_eq!(steering.commit(), Direction::Down);
    }

    #[test]
    fn no_reversal_across_several_requests() {
        let mut steering = Steering::new();
        assert!(steering.request(Direction::Up));
        // Still moving right until the next tick, so this is a reversal
        assert!(!steering.request(Direction::Left));
        assert_eq!(steering.commit(), Direction::Up);
        assert!(steering.request(Direction::Left));
        assert_eq!(steering.commit(), Direction::Left);
    }

    #[test]
    fn pending_persists_between_ticks() {
        let mut steering = Steering::new();
        assert!(steering.request(Direction::Down));
        assert_eq!(steering.commit(), Direction::Down);
        assert_eq!(steering.commit(), Direction::Down);
        assert!(!steering.request(Direction::Up));
    }
}
