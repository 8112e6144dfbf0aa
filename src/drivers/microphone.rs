//! Loudness sampling on the microphone ADC input.
//!
//! A silent microphone reads `ADC_CENTER`. Each reading is rectified around
//! that centre with a dead zone of `DELTA` on either side, the deviations of
//! one batch are averaged and scaled down to a face index.

use crate::config::{ADC_CENTER, DELTA, MAX_FACES, MAX_SAMPLES, SAMPLE_DELAY_MS, SCALE};
use core::marker::PhantomData;
use embedded_hal::adc::{Channel, OneShot};
use embedded_hal::blocking::delay::DelayMs;

/// Source of face indices derived from sound.
pub trait Loudness {
    type Error;

    /// Take one batch of readings and return the matching face index.
    fn sample_face<D: DelayMs<u8>>(&mut self, delay: &mut D) -> Result<u8, Self::Error>;
}

/// Rectified distance of a raw reading from silence.
#[inline]
pub fn deviation(raw: u16) -> u16 {
    if raw > ADC_CENTER + DELTA {
        raw - (ADC_CENTER + DELTA)
    } else if raw < ADC_CENTER - DELTA {
        ADC_CENTER - raw - DELTA
    } else {
        0
    }
}

/// Face index for the summed deviations of one batch.
#[inline]
pub fn face_for(sum: u16) -> u8 {
    let index = sum / MAX_SAMPLES / SCALE;
    if index >= MAX_FACES as u16 {
        MAX_FACES as u8 - 1
    } else {
        index as u8
    }
}

/// Microphone on one ADC channel
pub struct Microphone<A, PIN, ADC> {
    adc: A,
    pin: PIN,
    _adc: PhantomData<ADC>,
}

impl<A, PIN, ADC> Microphone<A, PIN, ADC>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    pub fn new(adc: A, pin: PIN) -> Self {
        Self {
            adc,
            pin,
            _adc: PhantomData,
        }
    }

    /// Blocking single conversion
    pub fn read_raw(&mut self) -> Result<u16, A::Error> {
        nb::block!(self.adc.read(&mut self.pin))
    }

    pub fn release(self) -> (A, PIN) {
        (self.adc, self.pin)
    }
}

impl<A, PIN, ADC> Loudness for Microphone<A, PIN, ADC>
where
    A: OneShot<ADC, u16, PIN>,
    PIN: Channel<ADC>,
{
    type Error = A::Error;

    fn sample_face<D: DelayMs<u8>>(&mut self, delay: &mut D) -> Result<u8, Self::Error> {
        let mut sum: u16 = 0;
        for _ in 0..MAX_SAMPLES {
            let raw = self.read_raw()?;
            sum = sum.saturating_add(deviation(raw));
            delay.delay_ms(SAMPLE_DELAY_MS);
        }
        Ok(face_for(sum))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::adc::{Mock, MockChan0, Transaction};
    use embedded_hal_mock::delay::MockNoop;

    fn batch(values: [u16; 8]) -> Vec<Transaction<u16>> {
        values.iter().map(|v| Transaction::read(0, *v)).collect()
    }

    #[test]
    fn dead_zone_is_silent() {
        for raw in ADC_CENTER - DELTA..=ADC_CENTER + DELTA {
            assert_eq!(deviation(raw), 0, "raw {}", raw);
        }
    }

    #[test]
    fn deviation_outside_dead_zone() {
        assert_eq!(deviation(525), 1);
        assert_eq!(deviation(1023), 499);
        assert_eq!(deviation(499), 1);
        assert_eq!(deviation(0), 500);
    }

    #[test]
    fn face_scaling_saturates() {
        assert_eq!(face_for(0), 0);
        assert_eq!(face_for(95), 0);
        assert_eq!(face_for(96), 1);
        assert_eq!(face_for(5 * 96), 5);
        assert_eq!(face_for(4000), 5);
        assert_eq!(face_for(u16::MAX), 5);
    }

    #[test]
    fn silence_selects_resting_face() {
        let expectations = batch([512; 8]);
        let mut adc = Mock::new(&expectations);
        let mut mic = Microphone::new(adc.clone(), MockChan0 {});

        assert_eq!(mic.sample_face(&mut MockNoop::new()).ok(), Some(0));
        adc.done();
    }

    #[test]
    fn loud_batch_opens_the_mouth() {
        // average deviation 36 -> face 3
        let expectations = batch([560, 464, 560, 464, 560, 464, 560, 464]);
        let mut adc = Mock::new(&expectations);
        let mut mic = Microphone::new(adc.clone(), MockChan0 {});

        assert_eq!(mic.sample_face(&mut MockNoop::new()).ok(), Some(3));
        adc.done();
    }

    #[test]
    fn clipping_input_saturates() {
        let expectations = batch([1023, 0, 1023, 0, 1023, 0, 1023, 0]);
        let mut adc = Mock::new(&expectations);
        let mut mic = Microphone::new(adc.clone(), MockChan0 {});

        assert_eq!(mic.sample_face(&mut MockNoop::new()).ok(), Some(MAX_FACES as u8 - 1));
        adc.done();
    }

    struct FakeAdc;
    struct FakePin;

    impl Channel<FakeAdc> for FakePin {
        type ID = u8;

        fn channel() -> u8 {
            5
        }
    }

    /// Returns `good` readings of silence, then fails.
    struct FlakyAdc {
        good: usize,
    }

    impl OneShot<FakeAdc, u16, FakePin> for FlakyAdc {
        type Error = ();

        fn read(&mut self, _pin: &mut FakePin) -> nb::Result<u16, ()> {
            if self.good == 0 {
                return Err(nb::Error::Other(()));
            }
            self.good -= 1;
            Ok(ADC_CENTER)
        }
    }

    #[test]
    fn adc_error_aborts_the_batch() {
        let mut mic = Microphone::new(FlakyAdc { good: 3 }, FakePin);
        assert_eq!(mic.sample_face(&mut MockNoop::new()), Err(()));
        let (adc, _) = mic.release();
        assert_eq!(adc.good, 0);
    }
}
