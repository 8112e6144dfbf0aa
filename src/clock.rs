//! Wall clock advanced from the timer interrupt.
//!
//! The crystal runs at 4 MHz so a second is 1953 timer overflows and the
//! clock drifts by about 64 ppm. Nothing but the blink schedule and the
//! debug log reads it.

use portable_atomic::{AtomicU8, Ordering};

/// Snapshot of the clock
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl TimeOfDay {
    pub const fn new(hours: u8, minutes: u8, seconds: u8) -> Self {
        Self { hours, minutes, seconds }
    }
}

impl ufmt::uDisplay for TimeOfDay {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        for (i, field) in [self.hours, self.minutes, self.seconds].iter().enumerate() {
            if i > 0 {
                f.write_str(":")?;
            }
            if *field < 10 {
                f.write_str("0")?;
            }
            ufmt::uDisplay::fmt(field, f)?;
        }
        Ok(())
    }
}

/// Seconds, minutes and hours.
///
/// Only the timer interrupt writes the fields; the main loop reads them.
pub struct Clock {
    seconds: AtomicU8,
    minutes: AtomicU8,
    hours: AtomicU8,
}

impl Clock {
    pub const fn new() -> Self {
        Self {
            seconds: AtomicU8::new(0),
            minutes: AtomicU8::new(0),
            hours: AtomicU8::new(0),
        }
    }

    /// Add one second, carrying into minutes and hours.
    pub fn tick(&self) {
        let seconds = self.seconds.load(Ordering::Relaxed) + 1;
        if seconds < 60 {
            self.seconds.store(seconds, Ordering::Relaxed);
            return;
        }
        self.seconds.store(0, Ordering::Relaxed);

        let minutes = self.minutes.load(Ordering::Relaxed) + 1;
        if minutes < 60 {
            self.minutes.store(minutes, Ordering::Relaxed);
            return;
        }
        self.minutes.store(0, Ordering::Relaxed);

        let hours = self.hours.load(Ordering::Relaxed) + 1;
        self.hours.store(if hours < 24 { hours } else { 0 }, Ordering::Relaxed);
    }

    #[inline]
    pub fn seconds(&self) -> u8 {
        self.seconds.load(Ordering::Relaxed)
    }

    pub fn now(&self) -> TimeOfDay {
        TimeOfDay {
            hours: self.hours.load(Ordering::Relaxed),
            minutes: self.minutes.load(Ordering::Relaxed),
            seconds: self.seconds.load(Ordering::Relaxed),
        }
    }

    /// Preset the clock. Out of range fields wrap to their modulus.
    ///
    /// Call before the timer interrupt is enabled.
    pub fn set(&self, time: TimeOfDay) {
        self.seconds.store(time.seconds % 60, Ordering::Relaxed);
        self.minutes.store(time.minutes % 60, Ordering::Relaxed);
        self.hours.store(time.hours % 24, Ordering::Relaxed);
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}
