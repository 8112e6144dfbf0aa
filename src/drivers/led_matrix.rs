//! Column multiplexed 8x5 LED matrix.
//!
//! One column line is active at a time. Every scan step switches the rows
//! off, moves to the next column, writes that column's row levels and
//! turns the column on. Rows are wired active low.

use crate::config::{COLUMNS, EYES_COLUMN, MAX_FACES, ROW_MASK};
use crate::face::{self, Eyes};
use portable_atomic::{AtomicU8, Ordering};

/// What the matrix shows, shared between the main loop and the timer
/// interrupt.
///
/// Both cells are single bytes written only by the main loop; the interrupt
/// reads them on every scan step and sees either the old or the new value.
pub struct DisplayState {
    face: AtomicU8,
    eyes: AtomicU8,
}

impl DisplayState {
    pub const fn new() -> Self {
        Self {
            face: AtomicU8::new(0),
            eyes: AtomicU8::new(Eyes::None as u8),
        }
    }

    #[inline]
    pub fn face(&self) -> u8 {
        self.face.load(Ordering::Relaxed)
    }

    /// Select the active expression, saturating at the widest mouth.
    #[inline]
    pub fn set_face(&self, index: u8) {
        let index = index.min(MAX_FACES as u8 - 1);
        self.face.store(index, Ordering::Relaxed);
    }

    #[inline]
    pub fn eyes(&self) -> Eyes {
        Eyes::from_bits(self.eyes.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_eyes(&self, eyes: Eyes) {
        self.eyes.store(eyes.bits(), Ordering::Relaxed);
    }

    /// Lit rows of `column`, with the eye overlay applied.
    pub fn column_pattern(&self, column: u8) -> u8 {
        if column == EYES_COLUMN {
            let eyes = self.eyes();
            if eyes != Eyes::None {
                return eyes.bits();
            }
        }
        face::expression(self.face())[(column % COLUMNS) as usize]
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}

/// Output lines of the matrix.
///
/// Implementations must not block; they run inside the timer interrupt.
pub trait MatrixPort {
    /// Drive every row line to its off level.
    fn rows_off(&mut self);

    fn column_off(&mut self, column: u8);

    /// Write raw row levels. A set bit switches that row off.
    fn write_rows(&mut self, levels: u8);

    fn column_on(&mut self, column: u8);
}

pub struct ColumnScanner<P> {
    port: P,
    active_col: u8,
}

impl<P> ColumnScanner<P> {
    pub const fn new(port: P) -> Self {
        Self { port, active_col: 0 }
    }

    #[inline]
    pub fn active_column(&self) -> u8 {
        self.active_col
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn release(self) -> P {
        self.port
    }
}

impl<P: MatrixPort> ColumnScanner<P> {
    /// Deactivate the current column and show the next one.
    pub fn scan(&mut self, display: &DisplayState) {
        self.port.rows_off();
        self.port.column_off(self.active_col);

        self.active_col = (self.active_col + 1) % COLUMNS;

        let pattern = display.column_pattern(self.active_col);
        self.port.write_rows(!pattern & ROW_MASK);
        self.port.column_on(self.active_col);
    }
}
