//! Driver error types

/// A pixel or glyph was placed outside the 128x64 frame
///
/// Returned by the drawing primitives. Whatever was in bounds has still been
/// drawn; only the offending pixels or glyphs were skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidBounds;

/// Display driver errors
///
/// `E` is the bus error type of the [`I2cBus`](monoled_hal::I2cBus) in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError<E> {
    /// Pixel, glyph or byte range outside the frame
    InvalidBounds,
    /// No staging buffer free in the pool
    AllocationFailure,
    /// The bus reported a failed transaction; the transfer was aborted
    Bus(E),
    /// Zero-length transfer request
    EmptyInput,
}

impl<E> From<InvalidBounds> for DisplayError<E> {
    fn from(_: InvalidBounds) -> Self {
        DisplayError::InvalidBounds
    }
}
