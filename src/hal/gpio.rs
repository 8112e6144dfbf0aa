use crate::config::ROW_MASK;
use crate::drivers::led_matrix::MatrixPort;
use avr_device::atmega48p::{PORTB, PORTC, PORTD};
use core::convert::Infallible;
use core::marker::PhantomData;
use embedded_hal::digital::v2::OutputPin;

pub trait PinMode {}
pub struct Input;
pub struct Output;
impl PinMode for Input {}
impl PinMode for Output {}

#[derive(Debug)]
pub struct Pin<PORT, const PIN: u8, MODE> {
    _port: PhantomData<PORT>,
    _mode: PhantomData<MODE>,
}

impl<PORT, const P: u8> Pin<PORT, P, Input> {
    /// Pins come out of reset as inputs without pull-up.
    pub const fn new() -> Self {
        Pin {
            _port: PhantomData,
            _mode: PhantomData,
        }
    }
}

macro_rules! impl_port {
    ($PORT:ident, $ddr:ident, $port:ident) => {
        impl<const P: u8, MODE: PinMode> Pin<$PORT, P, MODE> {
            pub fn into_output(self) -> Pin<$PORT, P, Output> {
                // Set DDRx bit
                unsafe {
                    (*$PORT::ptr()).$ddr.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Pin {
                    _port: PhantomData,
                    _mode: PhantomData,
                }
            }
        }

        impl<const P: u8> OutputPin for Pin<$PORT, P, Output> {
            type Error = Infallible;

            #[inline]
            fn set_high(&mut self) -> Result<(), Self::Error> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() | (1 << P)));
                }
                Ok(())
            }

            #[inline]
            fn set_low(&mut self) -> Result<(), Self::Error> {
                unsafe {
                    (*$PORT::ptr()).$port.modify(|r, w| w.bits(r.bits() & !(1 << P)));
                }
                Ok(())
            }
        }
    };
}

impl_port!(PORTB, ddrb, portb);
impl_port!(PORTC, ddrc, portc);
impl_port!(PORTD, ddrd, portd);

// Face board wiring
pub mod board {
    use super::*;

    /// Debug LED on PD4
    pub type DebugLed = Pin<PORTD, 4, Output>;

    /// Columns 6 and 7 on PD2 and PD3
    const PORTD_COLUMNS: u8 = 0x0C;

    /// Matrix lines: rows PC0..PC4 (active low), columns PB0..PB5, PD2, PD3.
    ///
    /// Whole port writes so one scan step stays a handful of instructions.
    pub struct MatrixPins {
        _private: (),
    }

    impl MatrixPins {
        pub fn new() -> Self {
            unsafe {
                (*PORTC::ptr()).ddrc.modify(|r, w| w.bits(r.bits() | ROW_MASK));
                (*PORTB::ptr()).ddrb.modify(|r, w| w.bits(r.bits() | 0x3F));
                (*PORTD::ptr()).ddrd.modify(|r, w| w.bits(r.bits() | PORTD_COLUMNS));
            }
            Self { _private: () }
        }
    }

    impl Default for MatrixPins {
        fn default() -> Self {
            Self::new()
        }
    }

    impl MatrixPort for MatrixPins {
        #[inline]
        fn rows_off(&mut self) {
            unsafe {
                (*PORTC::ptr()).portc.modify(|r, w| w.bits(r.bits() | ROW_MASK));
            }
        }

        #[inline]
        fn column_off(&mut self, column: u8) {
            unsafe {
                if column > 5 {
                    (*PORTD::ptr()).portd.modify(|r, w| w.bits(r.bits() & !PORTD_COLUMNS));
                } else {
                    (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() & !(1 << column)));
                }
            }
        }

        #[inline]
        fn write_rows(&mut self, levels: u8) {
            unsafe {
                (*PORTC::ptr())
                    .portc
                    .modify(|r, w| w.bits((r.bits() & !ROW_MASK) | (levels & ROW_MASK)));
            }
        }

        #[inline]
        fn column_on(&mut self, column: u8) {
            unsafe {
                match column {
                    6 => (*PORTD::ptr()).portd.modify(|r, w| w.bits(r.bits() | 0x04)),
                    7 => (*PORTD::ptr()).portd.modify(|r, w| w.bits(r.bits() | 0x08)),
                    _ => (*PORTB::ptr()).portb.modify(|r, w| w.bits(r.bits() | (1 << column))),
                }
            }
        }
    }
}
