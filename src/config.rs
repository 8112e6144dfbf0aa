//! Configuration constants for the LED face firmware

/// CPU frequency in Hz
pub const CPU_FREQ_HZ: u32 = 4_000_000;

/// Timer0 overflow rate: CPU clock, prescaler 8, 256 counts per overflow.
pub const TICK_HZ: u32 = CPU_FREQ_HZ / 8 / 256;

/// Timer ticks per wall clock second (1953.125 Hz rounded down).
pub const SUB_COUNT_MAX: u16 = 1953;

/// Column lines on the matrix: PB0..PB5, PD2, PD3
pub const COLUMNS: u8 = 8;

/// Row lines on the matrix: PC0..PC4
pub const ROW_MASK: u8 = 0x1F;

/// Column whose pattern is replaced by the eyes overlay
pub const EYES_COLUMN: u8 = 1;

/// Number of mouth expressions, from closed to wide open
pub const MAX_FACES: usize = 6;

/// ADC readings averaged per face selection
pub const MAX_SAMPLES: u16 = 8;

/// Average deviation per face step
pub const SCALE: u16 = 12;

/// Half width of the silence dead zone
pub const DELTA: u16 = 12;

/// ADC reading of a silent microphone
pub const ADC_CENTER: u16 = 512;

/// Microphone input (ADC5 / PC5)
pub const ADC_CHANNEL: u8 = 5;

/// Pause between two ADC readings in milliseconds
pub const SAMPLE_DELAY_MS: u8 = 1;

/// Pause at the end of every main loop iteration in milliseconds
pub const LOOP_DELAY_MS: u8 = 40;

/// Quiet iterations after which the face starts looking around
pub const BORED_THRESHOLD: u16 = 2000;

/// Timer ticks the eyes look left or right (about one second)
pub const LOOK_TICKS: u16 = 2000;

/// Timer ticks the eyes stay closed (about 0.1 seconds)
pub const BLINK_TICKS: u16 = 200;

/// Next blink is scheduled at a random second in `0..BLINK_WAIT_SECONDS`
pub const BLINK_WAIT_SECONDS: u32 = 30;

/// Seed of the blink pseudo random generator
pub const RNG_SEED: u64 = 1;

/// UART baud rate of the debug console
pub const UART_BAUD: u32 = 9600;
