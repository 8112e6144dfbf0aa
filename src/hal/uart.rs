use crate::config::{CPU_FREQ_HZ, UART_BAUD};
use avr_device::atmega48p::USART0;

// (4MHz / (16 * 9600)) - 1, 0.2% error
const UBRR: u16 = (CPU_FREQ_HZ / (16 * UART_BAUD) - 1) as u16;

const UDRE0: u8 = 0x20;
const TXEN0: u8 = 0x08;
/// Asynchronous, no parity, one stop bit, eight data bits
const FRAME_8N1: u8 = 0x06;

/// Transmit only USART0 (TXD on PD1).
pub struct Uart {
    usart: USART0,
}

impl Uart {
    pub fn new(usart: USART0) -> Self {
        unsafe {
            usart.ubrr0.write(|w| w.bits(UBRR));
            usart.ucsr0c.write(|w| w.bits(FRAME_8N1));
            usart.ucsr0b.write(|w| w.bits(TXEN0));
        }
        Self { usart }
    }

    /// Blocks until the data register is free.
    pub fn write_byte(&mut self, byte: u8) {
        while self.usart.ucsr0a.read().bits() & UDRE0 == 0 {}
        unsafe {
            self.usart.udr0.write(|w| w.bits(byte));
        }
    }

    pub fn write_str(&mut self, s: &str) {
        for byte in s.bytes() {
            self.write_byte(byte);
        }
    }
}
