//! Line based trace output over any `ufmt` writer.
//!
//! On target the writer is the serial console; builds without the `debug`
//! feature plug in [`Discard`].

use core::convert::Infallible;
use ufmt::uWrite;

/// Message class, ordered from most to least important.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogType {
    Error = 0,
    System = 1,
    Sensor = 2,
    Debug = 3,
}

impl LogType {
    pub const fn tag(self) -> &'static str {
        match self {
            LogType::Error => "[ERR] ",
            LogType::System => "[SYS] ",
            LogType::Sensor => "[SNS] ",
            LogType::Debug => "[DBG] ",
        }
    }
}

pub struct Logger<W> {
    writer: W,
    max_level: LogType,
}

impl<W: uWrite> Logger<W> {
    /// Messages less important than `max_level` are dropped.
    pub fn new(writer: W, max_level: LogType) -> Self {
        Self { writer, max_level }
    }

    #[inline]
    pub fn enabled(&self, level: LogType) -> bool {
        level <= self.max_level
    }

    #[doc(hidden)]
    pub fn begin(&mut self, level: LogType) {
        self.writer.write_str(level.tag()).ok();
    }

    #[doc(hidden)]
    pub fn end(&mut self) {
        self.writer.write_str("\r\n").ok();
    }

    pub fn writer(&mut self) -> &mut W {
        &mut self.writer
    }

    pub fn release(self) -> W {
        self.writer
    }
}

/// Writes one tagged line, e.g. `log!(logger, LogType::Debug, "face {}", 3)`.
///
/// Write errors are ignored; a dropped trace line must not stop the face.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        if $logger.enabled($level) {
            $logger.begin($level);
            ufmt::uwrite!($logger.writer(), $($arg)+).ok();
            $logger.end();
        }
    };
}

/// Writer that drops everything
#[derive(Clone, Copy, Debug, Default)]
pub struct Discard;

impl uWrite for Discard {
    type Error = Infallible;

    #[inline]
    fn write_str(&mut self, _s: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}
