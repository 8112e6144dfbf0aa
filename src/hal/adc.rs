use crate::config::ADC_CHANNEL;
use avr_device::atmega48p::ADC;
use core::convert::Infallible;
use embedded_hal::adc::{Channel, OneShot};

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcReference {
    Aref = 0,          // External AREF
    Avcc = 1,          // AVCC with external cap at AREF
    Internal1_1V = 3,  // Internal 1.1V with external cap at AREF
}

#[derive(Clone, Copy)]
#[repr(u8)]
pub enum AdcPrescaler {
    Div2 = 1,
    Div4 = 2,
    Div8 = 3,
    Div16 = 4,
    Div32 = 5,
    Div64 = 6,
    Div128 = 7,
}

const ADEN: u8 = 0x80;
const ADSC: u8 = 0x40;
const MUX_MASK: u8 = 0x0F;

/// Microphone input pin
pub struct MicrophonePin;

impl Channel<Adc> for MicrophonePin {
    type ID = u8;

    fn channel() -> u8 {
        ADC_CHANNEL
    }
}

pub struct Adc {
    adc: ADC,
    converting: bool,
}

impl Adc {
    /// Enable the converter, AREF reference, 500 kHz conversion clock at 4 MHz.
    pub fn new(adc: ADC) -> Self {
        unsafe {
            adc.adcsra.write(|w| w.bits(ADEN | AdcPrescaler::Div8 as u8));
            adc.admux.write(|w| w.bits((AdcReference::Aref as u8) << 6));
        }
        Self {
            adc,
            converting: false,
        }
    }
}

impl<PIN> OneShot<Adc, u16, PIN> for Adc
where
    PIN: Channel<Adc, ID = u8>,
{
    type Error = Infallible;

    /// Starts a conversion on the first call and yields the 10 bit result
    /// once ADSC clears.
    fn read(&mut self, _pin: &mut PIN) -> nb::Result<u16, Self::Error> {
        if !self.converting {
            unsafe {
                self.adc
                    .admux
                    .modify(|r, w| w.bits((r.bits() & !MUX_MASK) | (PIN::channel() & MUX_MASK)));
                self.adc.adcsra.modify(|r, w| w.bits(r.bits() | ADSC));
            }
            self.converting = true;
            return Err(nb::Error::WouldBlock);
        }

        if self.adc.adcsra.read().bits() & ADSC != 0 {
            return Err(nb::Error::WouldBlock);
        }

        self.converting = false;
        Ok(self.adc.adc.read().bits())
    }
}
