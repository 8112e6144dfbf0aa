use crate::config::CPU_FREQ_HZ;
use avr_device::atmega48p::{TC0, TC2};
use embedded_hal::blocking::delay::DelayMs;

/// Timer0 clock select
#[derive(Clone, Copy)]
pub enum Prescaler {
    Stop = 0,
    Direct = 1,
    Div8 = 2,
    Div64 = 3,
    Div256 = 4,
    Div1024 = 5,
}

const PRESCALER_MASK: u8 = 0x07;
const TOIE0: u8 = 0x01;

/// Timer0 in normal mode; its overflow interrupt drives the display.
pub struct DisplayTimer {
    tc0: TC0,
}

impl DisplayTimer {
    pub fn new(tc0: TC0) -> Self {
        unsafe {
            tc0.tccr0a.write(|w| w.bits(0));
            tc0.tcnt0.write(|w| w.bits(0));
        }
        Self { tc0 }
    }

    pub fn start(&mut self, prescaler: Prescaler) {
        unsafe {
            self.tc0.tccr0b.modify(|r, w| {
                w.bits((r.bits() & !PRESCALER_MASK) | (prescaler as u8 & PRESCALER_MASK))
            });
        }
    }

    pub fn enable_overflow_interrupt(&mut self) {
        unsafe {
            self.tc0.timsk0.modify(|r, w| w.bits(r.bits() | TOIE0));
        }
    }
}

/// Timer2 clock select for /32
const TC2_DIV32: u8 = 0x03;
const TC2_HZ: u32 = CPU_FREQ_HZ / 32;
/// 125 counts at 4 MHz
const TICKS_PER_MS: u8 = (TC2_HZ / 1_000) as u8;

/// Busy wait on Timer2, which nothing else uses.
pub struct Delay {
    tc2: TC2,
}

impl Delay {
    pub fn new(tc2: TC2) -> Self {
        unsafe {
            tc2.tccr2a.write(|w| w.bits(0));
            tc2.tccr2b.write(|w| w.bits(TC2_DIV32));
        }
        Self { tc2 }
    }

    fn wait_counts(&mut self, counts: u8) {
        unsafe {
            self.tc2.tcnt2.write(|w| w.bits(0));
        }
        while self.tc2.tcnt2.read().bits() < counts {}
    }
}

impl DelayMs<u8> for Delay {
    fn delay_ms(&mut self, ms: u8) {
        for _ in 0..ms {
            self.wait_counts(TICKS_PER_MS);
        }
    }
}

impl DelayMs<u16> for Delay {
    fn delay_ms(&mut self, ms: u16) {
        for _ in 0..ms {
            self.wait_counts(TICKS_PER_MS);
        }
    }
}
