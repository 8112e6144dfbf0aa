#![cfg_attr(target_arch = "avr", no_std)]
#![cfg_attr(target_arch = "avr", no_main)]
#![cfg_attr(target_arch = "avr", feature(abi_avr_interrupt))]

#[cfg(target_arch = "avr")]
use panic_halt as _;

#[cfg(target_arch = "avr")]
use avr_device::atmega48p::{Peripherals, PORTD};
#[cfg(target_arch = "avr")]
use avr_device::interrupt::{self, Mutex};
#[cfg(target_arch = "avr")]
use core::cell::RefCell;
#[cfg(target_arch = "avr")]
use face_firmware::{
    application::Application,
    drivers::{ColumnScanner, Heartbeat, Microphone},
    hal::{Adc, DebugLed, Delay, DisplayTimer, Input, MatrixPins, MicrophonePin, Pin, Prescaler},
    log,
    logger::{LogType, Logger},
    os::SYSTEM,
};

// Scanner state lives with the timer interrupt
#[cfg(target_arch = "avr")]
static SCANNER: Mutex<RefCell<Option<ColumnScanner<MatrixPins>>>> =
    Mutex::new(RefCell::new(None));

#[cfg(target_arch = "avr")]
#[avr_device::entry]
fn main() -> ! {
    let dp = Peripherals::take().unwrap();

    let scanner = ColumnScanner::new(MatrixPins::new());
    interrupt::free(|cs| {
        SCANNER.borrow(cs).replace(Some(scanner));
    });

    // 4MHz / 8 / 256 = 1953Hz overflow, one column every two overflows
    let mut display_timer = DisplayTimer::new(dp.TC0);
    display_timer.start(Prescaler::Div8);
    display_timer.enable_overflow_interrupt();

    let mut delay = Delay::new(dp.TC2);
    let mut mic = Microphone::new(Adc::new(dp.ADC), MicrophonePin);
    let led: DebugLed = Pin::<PORTD, 4, Input>::new().into_output();
    let mut heartbeat = Heartbeat::new(led);

    #[cfg(feature = "debug")]
    let mut logger = Logger::new(
        face_firmware::drivers::SerialConsole::new(dp.USART0),
        LogType::Debug,
    );
    #[cfg(not(feature = "debug"))]
    let mut logger = Logger::new(face_firmware::logger::Discard, LogType::Error);

    // Enable interrupts globally
    unsafe { avr_device::interrupt::enable() };

    log!(logger, LogType::System, "face firmware v0.1.0 ready");

    Application::new().run(&SYSTEM, &mut mic, &mut delay, &mut heartbeat, &mut logger)
}

#[cfg(target_arch = "avr")]
#[avr_device::interrupt(atmega48p)]
fn TIMER0_OVF() {
    interrupt::free(|cs| {
        if let Some(scanner) = SCANNER.borrow(cs).borrow_mut().as_mut() {
            SYSTEM.on_timer_overflow(scanner);
        }
    });
}

// Host builds only run the library tests
#[cfg(not(target_arch = "avr"))]
fn main() {}
