//! Application layer: the cooperative main loop of the face.
//!
//! Each iteration updates the boredom counter, advances the blink machine,
//! samples the microphone to pick the face and then pauses. The timer
//! interrupt keeps scanning the matrix meanwhile.

use crate::blink::Blinker;
use crate::config::LOOP_DELAY_MS;
use crate::drivers::heartbeat::Heartbeat;
use crate::drivers::microphone::Loudness;
use crate::error::Error;
use crate::face::Eyes;
use crate::log;
use crate::logger::{LogType, Logger};
use crate::os::System;
use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;
use ufmt::uWrite;

/// Main application state and logic
pub struct Application {
    blinker: Blinker,
    bored_count: u16,
    last_face: u8,
}

impl Application {
    pub fn new() -> Self {
        Self::with_blinker(Blinker::new())
    }

    pub fn with_blinker(blinker: Blinker) -> Self {
        Self {
            blinker,
            bored_count: 0,
            last_face: 0,
        }
    }

    /// Consecutive iterations spent on the resting face
    #[inline]
    pub fn bored_count(&self) -> u16 {
        self.bored_count
    }

    #[inline]
    pub fn blinker(&self) -> &Blinker {
        &self.blinker
    }

    /// One main loop iteration without the trailing pause.
    ///
    /// Returns the face index now on display. When sampling fails the
    /// previous face stays up.
    pub fn step<M, D, W>(
        &mut self,
        system: &System,
        mic: &mut M,
        delay: &mut D,
        log: &mut Logger<W>,
    ) -> Result<u8, Error>
    where
        M: Loudness,
        D: DelayMs<u8>,
        W: uWrite,
    {
        let display = system.display();

        if display.face() == 0 {
            self.bored_count = self.bored_count.wrapping_add(1);
        } else {
            self.bored_count = 0;
        }

        let seconds = system.clock().seconds();
        if let Some(eyes) = self.blinker.advance(seconds, system.ticks(), self.bored_count, display) {
            let now = system.clock().now();
            if eyes == Eyes::None {
                log!(log, LogType::Debug, "{} eyes open, next blink at :{}", now, self.blinker.wakeup());
            } else {
                log!(log, LogType::Debug, "{} eyes {} until tick {}", now, eyes, self.blinker.wakeup());
            }
        }

        let face = mic.sample_face(delay).map_err(|_| Error::Adc)?;
        display.set_face(face);
        if face != self.last_face {
            log!(log, LogType::Sensor, "face {}", face);
            self.last_face = face;
        }
        Ok(face)
    }

    /// Run the face forever.
    pub fn run<M, D, P, W>(
        mut self,
        system: &System,
        mic: &mut M,
        delay: &mut D,
        heartbeat: &mut Heartbeat<P>,
        log: &mut Logger<W>,
    ) -> !
    where
        M: Loudness,
        D: DelayMs<u8>,
        P: OutputPin,
        W: uWrite,
    {
        loop {
            if let Err(err) = self.step(system, mic, delay, log) {
                log!(log, LogType::Error, "{:?} code {}", err, err.code());
            }
            if heartbeat.toggle().is_err() {
                let err = Error::Output;
                log!(log, LogType::Error, "{:?} code {}", err, err.code());
            }
            delay.delay_ms(LOOP_DELAY_MS);
        }
    }
}

impl Default for Application {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blink::BlinkState;
    use crate::config::BORED_THRESHOLD;
    use crate::logger::tests::Text;
    use embedded_hal_mock::delay::MockNoop;

    /// Plays back a list of faces, then fails.
    struct Script {
        faces: Vec<u8>,
    }

    impl Loudness for Script {
        type Error = ();

        fn sample_face<D: DelayMs<u8>>(&mut self, _delay: &mut D) -> Result<u8, ()> {
            if self.faces.is_empty() {
                Err(())
            } else {
                Ok(self.faces.remove(0))
            }
        }
    }

    fn logger() -> Logger<Text> {
        Logger::new(Text::default(), LogType::Debug)
    }

    #[test]
    fn boredom_counts_quiet_iterations() {
        let system = System::new();
        let mut app = Application::new();
        let mut mic = Script { faces: vec![0, 0, 2, 0, 0] };
        let mut log = logger();

        let mut counts = Vec::new();
        for _ in 0..5 {
            app.step(&system, &mut mic, &mut MockNoop::new(), &mut log).unwrap();
            counts.push(app.bored_count());
        }
        // the count looks at the face shown before sampling
        assert_eq!(counts, vec![1, 2, 3, 0, 1]);
    }

    #[test]
    fn sampled_face_goes_on_display() {
        let system = System::new();
        let mut app = Application::new();
        let mut mic = Script { faces: vec![4] };
        let mut log = logger();

        assert_eq!(app.step(&system, &mut mic, &mut MockNoop::new(), &mut log), Ok(4));
        assert_eq!(system.display().face(), 4);
        assert!(log.release().0.contains("[SNS] face 4\r\n"));
    }

    #[test]
    fn failed_sample_keeps_previous_face() {
        let system = System::new();
        let mut app = Application::new();
        let mut mic = Script { faces: vec![3] };
        let mut log = logger();

        app.step(&system, &mut mic, &mut MockNoop::new(), &mut log).unwrap();
        assert_eq!(
            app.step(&system, &mut mic, &mut MockNoop::new(), &mut log),
            Err(Error::Adc)
        );
        assert_eq!(system.display().face(), 3);
    }

    #[test]
    fn first_step_opens_the_eyes() {
        let system = System::new();
        let mut app = Application::new();
        let mut mic = Script { faces: vec![0] };
        let mut log = logger();

        app.step(&system, &mut mic, &mut MockNoop::new(), &mut log).unwrap();
        assert_eq!(app.blinker().state(), BlinkState::Waiting);
        assert_eq!(system.display().eyes(), Eyes::None);
        assert!(log.release().0.starts_with("[DBG] 00:00:00 eyes open, next blink at :"));
    }

    #[test]
    fn long_silence_makes_the_face_bored() {
        let system = System::new();
        let mut app = Application::new();
        let mut mic = Script { faces: vec![0; BORED_THRESHOLD as usize + 1] };
        let mut log = Logger::new(Text::default(), LogType::Error);

        for _ in 0..=BORED_THRESHOLD {
            app.step(&system, &mut mic, &mut MockNoop::new(), &mut log).unwrap();
        }
        assert_eq!(app.bored_count(), BORED_THRESHOLD + 1);
        assert!(log.release().0.is_empty());
    }
}
