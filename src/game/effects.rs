//! Cosmetic side effects of ticks.  Nothing here feeds back into the engine.
use crate::consts;
use rand::{
    distr::{Bernoulli, Distribution},
    Rng,
};
use std::time::Duration;

/// Countdowns for the snake's tongue and mouth animations, measured in ticks
#[derive(Clone, Debug, PartialEq)]
pub(super) struct Effects {
    hiss: Bernoulli,
    tongue_ticks: u32,
    mouth_ticks: u32,
    tongue_remaining: u32,
    mouth_remaining: u32,
}

/// What happened cosmetically on a tick
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct Flourish {
    pub(super) hiss: bool,
}

impl Effects {
    pub(super) fn new(tick_period: Duration) -> Effects {
        Effects {
            hiss: Bernoulli::new(consts::HISS_PROBABILITY)
                .expect("HISS_PROBABILITY should be between 0 and 1"),
            tongue_ticks: ticks_for(consts::TONGUE_DURATION, tick_period),
            mouth_ticks: ticks_for(consts::MOUTH_OPEN_DURATION, tick_period),
            tongue_remaining: 0,
            mouth_remaining: 0,
        }
    }

    /// Update the animations for one tick of a running game.  `ate` is
    /// whether the snake ate on this tick.
    pub(super) fn tick<R: Rng>(&mut self, ate: bool, rng: &mut R) -> Flourish {
        self.tongue_remaining = self.tongue_remaining.saturating_sub(1);
        self.mouth_remaining = self.mouth_remaining.saturating_sub(1);
        if ate {
            self.mouth_remaining = self.mouth_ticks;
        }
        let hiss = self.hiss.sample(rng);
        if hiss {
            self.tongue_remaining = self.tongue_ticks;
        }
        Flourish { hiss }
    }

    pub(super) fn clear(&mut self) {
        self.tongue_remaining = 0;
        self.mouth_remaining = 0;
    }

    pub(super) fn tongue_out(&self) -> bool {
        self.tongue_remaining > 0
    }

    pub(super) fn mouth_open(&self) -> bool {
        self.mouth_remaining > 0
    }
}

/// Number of whole ticks of length `tick_period` needed to cover `duration`
fn ticks_for(duration: Duration, tick_period: Duration) -> u32 {
    let period = tick_period.as_millis().max(1);
    u32::try_from(duration.as_millis().div_ceil(period)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    #[rstest]
    #[case(500, 150, 4)]
    #[case(300, 150, 2)]
    #[case(300, 100, 3)]
    #[case(300, 1000, 1)]
    #[case(0, 150, 0)]
    fn test_ticks_for(#[case] duration: u64, #[case] period: u64, #[case] ticks: u32) {
        assert_eq!(
            ticks_for(Duration::from_millis(duration), Duration::from_millis(period)),
            ticks
        );
    }

    #[test]
    fn mouth_stays_open() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        let mut effects = Effects::new(Duration::from_millis(150));
        assert!(!effects.mouth_open());
        let _ = effects.tick(true, &mut rng);
        for _ in 0..3 {
            assert!(effects.mouth_open());
            let _ = effects.tick(false, &mut rng);
        }
        assert!(effects.mouth_open());
        let _ = effects.tick(false, &mut rng);
        assert!(!effects.mouth_open());
    }

    #[test]
    fn hiss_shows_tongue() {
        let mut rng = ChaCha12Rng::seed_from_u64(0x0123456789ABCDEF);
        let mut effects = Effects::new(Duration::from_millis(150));
        let mut hisses = 0;
        for _ in 0..2000 {
            let flourish = effects.tick(false, &mut rng);
            if flourish.hiss {
                hisses += 1;
                assert!(effects.tongue_out());
            }
        }
        // Expected value is 100
        assert!((50..150).contains(&hisses), "{hisses} hisses");
        effects.clear();
        assert!(!effects.tongue_out());
        assert!(!effects.mouth_open());
    }
}
