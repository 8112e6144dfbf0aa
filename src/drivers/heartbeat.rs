//! Debug LED toggled once per main loop iteration.
//!
//! A scope on the pin shows the loop period directly.

use embedded_hal::digital::v2::OutputPin;

pub struct Heartbeat<P> {
    pin: P,
    lit: bool,
}

impl<P: OutputPin> Heartbeat<P> {
    pub fn new(pin: P) -> Self {
        Self { pin, lit: false }
    }

    pub fn toggle(&mut self) -> Result<(), P::Error> {
        if self.lit {
            self.pin.set_low()?;
        } else {
            self.pin.set_high()?;
        }
        self.lit = !self.lit;
        Ok(())
    }

    #[inline]
    pub fn is_lit(&self) -> bool {
        self.lit
    }

    pub fn release(self) -> P {
        self.pin
    }
}
