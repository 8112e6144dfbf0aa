use crate::hal::Uart;
use avr_device::atmega48p::USART0;
use core::convert::Infallible;

/// Trace console on the debug UART
pub struct SerialConsole {
    uart: Uart,
}

impl SerialConsole {
    pub fn new(usart: USART0) -> Self {
        Self {
            uart: Uart::new(usart),
        }
    }
}

impl ufmt::uWrite for SerialConsole {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.uart.write_str(s);
        Ok(())
    }
}
