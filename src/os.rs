//! System tick bookkeeping shared by the timer interrupt and the main loop
use crate::clock::Clock;
use crate::config::SUB_COUNT_MAX;
use crate::drivers::led_matrix::{ColumnScanner, DisplayState, MatrixPort};
use portable_atomic::{AtomicU16, Ordering};

/// Everything the timer interrupt touches.
///
/// The interrupt is the only writer of the tick counters and the clock. The
/// main loop only writes the display state.
pub struct System {
    ticks: AtomicU16,
    sub_ticks: AtomicU16,
    clock: Clock,
    display: DisplayState,
}

impl System {
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU16::new(0),
            sub_ticks: AtomicU16::new(0),
            clock: Clock::new(),
            display: DisplayState::new(),
        }
    }

    /// Timer0 overflow handler body.
    ///
    /// Every second tick refreshes one column, so the full frame takes
    /// 16 ticks (about 122 Hz). Every `SUB_COUNT_MAX` ticks the clock
    /// gains a second.
    pub fn on_timer_overflow<P: MatrixPort>(&self, scanner: &mut ColumnScanner<P>) {
        let ticks = self.ticks.load(Ordering::Relaxed).wrapping_add(1);
        self.ticks.store(ticks, Ordering::Relaxed);
        if ticks % 2 == 0 {
            scanner.scan(&self.display);
        }

        let sub_ticks = self.sub_ticks.load(Ordering::Relaxed) + 1;
        if sub_ticks >= SUB_COUNT_MAX {
            self.clock.tick();
            self.sub_ticks.store(0, Ordering::Relaxed);
        } else {
            self.sub_ticks.store(sub_ticks, Ordering::Relaxed);
        }
    }

    /// Free running tick counter, wraps at `u16::MAX`
    #[inline]
    pub fn ticks(&self) -> u16 {
        self.ticks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sub_ticks(&self) -> u16 {
        self.sub_ticks.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    #[inline]
    pub fn display(&self) -> &DisplayState {
        &self.display
    }
}

impl Default for System {
    fn default() -> Self {
        Self::new()
    }
}

/// Global system instance
pub static SYSTEM: System = System::new();
