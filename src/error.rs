//! Error codes of the main loop
use ufmt::derive::uDebug;

#[derive(Debug, uDebug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Microphone conversion failed, the previous face stays up
    Adc = 0x10,
    /// Debug LED could not be driven
    Output = 0x20,
}

impl Error {
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }
}
