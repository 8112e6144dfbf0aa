//! Expression bitmaps and eye overlays shown on the 8x5 matrix.
//!
//! Each expression holds one entry per column line; the low five bits of an
//! entry are the row LEDs that are lit in that column. Column 1 carries the
//! eyes, columns 3..7 the mouth.

use crate::config::{COLUMNS, MAX_FACES};

/// Lit rows for every column of one expression
pub type Expression = [u8; COLUMNS as usize];

/// Mouth expressions ordered by loudness, index 0 is the resting face.
pub static FACES: [Expression; MAX_FACES] = [
    [0b00000, 0b01010, 0b00000, 0b01110, 0b00000, 0b00000, 0b00000, 0b00000],
    [0b00000, 0b01010, 0b00000, 0b01110, 0b01110, 0b00000, 0b00000, 0b00000],
    [0b00000, 0b01010, 0b00000, 0b01110, 0b10001, 0b01110, 0b00000, 0b00000],
    [0b00000, 0b01010, 0b00000, 0b01110, 0b10001, 0b10001, 0b01110, 0b00000],
    [0b00000, 0b01010, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
    // shouting also widens the eyes
    [0b00000, 0b11011, 0b00000, 0b01110, 0b10001, 0b10001, 0b10001, 0b01110],
];

/// Expression for a face index, saturating at the widest mouth.
#[inline]
pub fn expression(index: u8) -> &'static Expression {
    let index = (index as usize).min(MAX_FACES - 1);
    &FACES[index]
}

/// Eye overlay written into the eyes column.
///
/// `None` is a sentinel: the column shows the eyes of the active expression.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Eyes {
    None = 0xFF,
    Closed = 0x00,
    Left = 0x14,
    Right = 0x05,
}

impl Eyes {
    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    /// Decode a stored overlay. Unknown values fall back to `None`.
    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        match bits {
            0x00 => Eyes::Closed,
            0x14 => Eyes::Left,
            0x05 => Eyes::Right,
            _ => Eyes::None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Eyes::None => "open",
            Eyes::Closed => "closed",
            Eyes::Left => "left",
            Eyes::Right => "right",
        }
    }
}

impl ufmt::uDisplay for Eyes {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}
