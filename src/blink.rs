//! Blinking and looking around.
//!
//! Two states. While `Waiting` the eyes of the active expression are shown
//! until the wall clock second matches the wake up value; then the eyes
//! close (or look left or right when the face has been quiet for long) and
//! the state becomes `Closed`. `Closed` lasts until the tick counter passes
//! the wake up value, which reopens the eyes and picks the next second.
//!
//! The two wake ups live on different time bases: seconds of the wall clock
//! for `Waiting`, raw timer ticks for `Closed`. Both are kept as they are.

use crate::config::{BLINK_TICKS, BLINK_WAIT_SECONDS, BORED_THRESHOLD, LOOK_TICKS, RNG_SEED};
use crate::drivers::led_matrix::DisplayState;
use crate::face::Eyes;
use oorandom::Rand32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlinkState {
    Waiting,
    Closed,
}

pub struct Blinker {
    state: BlinkState,
    wakeup: u16,
    rng: Rand32,
}

impl Blinker {
    pub fn new() -> Self {
        Self::with_seed(RNG_SEED)
    }

    /// Starts `Closed` with a wake up of zero, so the first step opens the
    /// eyes.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            state: BlinkState::Closed,
            wakeup: 0,
            rng: Rand32::new(seed),
        }
    }

    #[inline]
    pub fn state(&self) -> BlinkState {
        self.state
    }

    /// Second (while waiting) or tick (while closed) of the next transition
    #[inline]
    pub fn wakeup(&self) -> u16 {
        self.wakeup
    }

    /// Run one step of the machine.
    ///
    /// `seconds` is the wall clock second, `ticks` the free running timer
    /// counter and `bored` the number of quiet main loop iterations. Returns
    /// the eyes written to `display` when a transition happened.
    pub fn advance(
        &mut self,
        seconds: u8,
        ticks: u16,
        bored: u16,
        display: &DisplayState,
    ) -> Option<Eyes> {
        match self.state {
            BlinkState::Waiting => {
                if u16::from(seconds) != self.wakeup {
                    return None;
                }
                self.state = BlinkState::Closed;
                let eyes = if bored > BORED_THRESHOLD {
                    self.wakeup = ticks.wrapping_add(LOOK_TICKS);
                    if self.rng.rand_range(0..2) == 0 {
                        Eyes::Left
                    } else {
                        Eyes::Right
                    }
                } else {
                    self.wakeup = ticks.wrapping_add(BLINK_TICKS);
                    Eyes::Closed
                };
                display.set_eyes(eyes);
                Some(eyes)
            }
            BlinkState::Closed => {
                if ticks < self.wakeup {
                    return None;
                }
                self.state = BlinkState::Waiting;
                display.set_eyes(Eyes::None);
                self.wakeup = self.rng.rand_range(0..BLINK_WAIT_SECONDS) as u16;
                Some(Eyes::None)
            }
        }
    }
}

impl Default for Blinker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Blinker that has just opened its eyes at tick 0.
    fn waiting(display: &DisplayState) -> Blinker {
        let mut blinker = Blinker::new();
        assert_eq!(blinker.advance(0, 0, 0, display), Some(Eyes::None));
        assert_eq!(blinker.state(), BlinkState::Waiting);
        blinker
    }

    #[test]
    fn first_step_opens_the_eyes() {
        let display = DisplayState::new();
        display.set_eyes(Eyes::Closed);
        let blinker = waiting(&display);
        assert_eq!(display.eyes(), Eyes::None);
        assert!(blinker.wakeup() < BLINK_WAIT_SECONDS as u16);
    }

    #[test]
    fn waits_for_the_wakeup_second() {
        let display = DisplayState::new();
        let mut blinker = waiting(&display);
        let wakeup = blinker.wakeup() as u8;

        assert_eq!(blinker.advance((wakeup + 1) % 60, 100, 0, &display), None);
        assert_eq!(blinker.state(), BlinkState::Waiting);

        assert_eq!(blinker.advance(wakeup, 100, 0, &display), Some(Eyes::Closed));
        assert_eq!(blinker.state(), BlinkState::Closed);
        assert_eq!(blinker.wakeup(), 100 + BLINK_TICKS);
        assert_eq!(display.eyes(), Eyes::Closed);
    }

    #[test]
    fn blink_lasts_blink_ticks() {
        let display = DisplayState::new();
        let mut blinker = waiting(&display);
        let wakeup = blinker.wakeup() as u8;
        blinker.advance(wakeup, 1_000, 0, &display);

        // seconds do not matter while closed
        assert_eq!(blinker.advance(wakeup, 1_000 + BLINK_TICKS - 1, 0, &display), None);
        assert_eq!(
            blinker.advance(wakeup, 1_000 + BLINK_TICKS, 0, &display),
            Some(Eyes::None)
        );
        assert_eq!(blinker.state(), BlinkState::Waiting);
        assert_eq!(display.eyes(), Eyes::None);
        assert!(blinker.wakeup() < BLINK_WAIT_SECONDS as u16);
    }

    #[test]
    fn bored_face_looks_around() {
        let display = DisplayState::new();
        for seed in 0..32 {
            let mut blinker = Blinker::with_seed(seed);
            blinker.advance(0, 0, 0, &display);
            let wakeup = blinker.wakeup() as u8;

            let eyes = blinker.advance(wakeup, 500, BORED_THRESHOLD + 1, &display);
            assert!(matches!(eyes, Some(Eyes::Left) | Some(Eyes::Right)), "{:?}", eyes);
            assert_eq!(blinker.wakeup(), 500 + LOOK_TICKS);
        }
    }

    #[test]
    fn threshold_itself_is_not_bored() {
        let display = DisplayState::new();
        let mut blinker = waiting(&display);
        let wakeup = blinker.wakeup() as u8;
        assert_eq!(
            blinker.advance(wakeup, 0, BORED_THRESHOLD, &display),
            Some(Eyes::Closed)
        );
    }

    #[test]
    fn looks_both_ways_eventually() {
        let display = DisplayState::new();
        let mut blinker = Blinker::new();
        let mut left = false;
        let mut right = false;
        let mut ticks: u16 = 0;
        for _ in 0..200 {
            blinker.advance(0, ticks, 0, &display);
            let wakeup = blinker.wakeup() as u8;
            match blinker.advance(wakeup, ticks, u16::MAX, &display) {
                Some(Eyes::Left) => left = true,
                Some(Eyes::Right) => right = true,
                other => panic!("unexpected {:?}", other),
            }
            ticks = ticks.wrapping_add(LOOK_TICKS);
        }
        assert!(left && right);
    }

    #[test]
    fn wakeup_wraps_with_the_tick_counter() {
        let display = DisplayState::new();
        let mut blinker = waiting(&display);
        let wakeup = blinker.wakeup() as u8;
        blinker.advance(wakeup, u16::MAX - 50, 0, &display);
        assert_eq!(blinker.wakeup(), BLINK_TICKS - 51);
    }
}
