//! ATmega48P peripherals used by the face
pub mod adc;
pub mod gpio;
pub mod timer;
pub mod uart;

// Re-export commonly used types
pub use adc::{Adc, MicrophonePin};
pub use gpio::board::{DebugLed, MatrixPins};
pub use gpio::{Input, Output, Pin};
pub use timer::{Delay, DisplayTimer, Prescaler};
pub use uart::Uart;
