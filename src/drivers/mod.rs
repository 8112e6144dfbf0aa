pub mod heartbeat;
pub mod led_matrix;
pub mod microphone;
#[cfg(target_arch = "avr")]
pub mod serial_console;

pub use heartbeat::Heartbeat;
pub use led_matrix::{ColumnScanner, DisplayState, MatrixPort};
pub use microphone::{Loudness, Microphone};
#[cfg(target_arch = "avr")]
pub use serial_console::SerialConsole;
