//! Page-packed frame buffer
//!
//! One bit per pixel, 8 vertically stacked pixels per byte. Pixel `(x, y)`
//! lives in bit `y % 8` of byte `(y / 8) * WIDTH + x`, which is exactly the
//! order the SH1106 expects its page data in, so a page of the frame can be
//! sent to the panel without any repacking.

use crate::error::InvalidBounds;
use crate::{FRAME_SIZE, HEIGHT, PAGES, WIDTH};

/// 128x64 monochrome frame
///
/// Owned by the caller. The driver only borrows it for the duration of a
/// single transfer.
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    buf: [u8; FRAME_SIZE],
}

impl Frame {
    /// Create a blank frame
    pub const fn new() -> Self {
        Self {
            buf: [0; FRAME_SIZE],
        }
    }

    /// Create a frame from raw page-packed bytes
    pub const fn from_bytes(buf: [u8; FRAME_SIZE]) -> Self {
        Self { buf }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.buf.fill(0);
    }

    /// Fill every byte with `pattern`
    ///
    /// `0xFF` lights the whole panel, `0xAA`/`0x55` give horizontal stripes.
    pub fn fill(&mut self, pattern: u8) {
        self.buf.fill(pattern);
    }

    /// Raw page-packed bytes
    pub fn as_bytes(&self) -> &[u8; FRAME_SIZE] {
        &self.buf
    }

    /// Mutable raw page-packed bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8; FRAME_SIZE] {
        &mut self.buf
    }

    /// Bytes of one page (`WIDTH` bytes), or `None` if `page >= PAGES`
    pub fn page(&self, page: usize) -> Option<&[u8]> {
        if page >= PAGES {
            return None;
        }
        Some(&self.buf[page * WIDTH..(page + 1) * WIDTH])
    }

    /// Iterate over the pages, top to bottom
    pub fn pages(&self) -> core::slice::ChunksExact<'_, u8> {
        self.buf.chunks_exact(WIDTH)
    }

    /// Turn a pixel on or off
    ///
    /// Coordinates outside the frame return [`InvalidBounds`] and leave the
    /// frame untouched.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) -> Result<(), InvalidBounds> {
        let (index, mask) = Self::locate(x, y).ok_or(InvalidBounds)?;
        if on {
            self.buf[index] |= mask;
        } else {
            self.buf[index] &= !mask;
        }
        Ok(())
    }

    /// Read a pixel back, or `None` outside the frame
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        let (index, mask) = Self::locate(x, y)?;
        Some(self.buf[index] & mask != 0)
    }

    /// Number of pixels currently on
    pub fn lit_pixels(&self) -> u32 {
        self.buf.iter().map(|b| b.count_ones()).sum()
    }

    /// Byte index and bit mask for a pixel
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * WIDTH + x, 1 << (y % 8)))
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for Frame {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Frame")
            .field("lit_pixels", &self.lit_pixels())
            .finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Frame {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Frame[{} lit]", self.lit_pixels());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_frame_is_blank() {
        let frame = Frame::new();
        assert!(frame.as_bytes().iter().all(|&b| b == 0));
        assert_eq!(frame.lit_pixels(), 0);
    }

    #[test]
    fn test_set_pixel_bit_layout() {
        let mut frame = Frame::new();

        frame.set_pixel(0, 0, true).unwrap();
        assert_eq!(frame.as_bytes()[0], 0b0000_0001);

        frame.set_pixel(0, 7, true).unwrap();
        assert_eq!(frame.as_bytes()[0], 0b1000_0001);

        // Row 8 starts page 1
        frame.set_pixel(5, 8, true).unwrap();
        assert_eq!(frame.as_bytes()[WIDTH + 5], 0b0000_0001);

        // Bottom-right corner is the last bit of the last byte
        frame.set_pixel(127, 63, true).unwrap();
        assert_eq!(frame.as_bytes()[FRAME_SIZE - 1], 0b1000_0000);
    }

    #[test]
    fn test_clear_pixel_leaves_neighbours() {
        let mut frame = Frame::new();
        frame.fill(0xFF);

        frame.set_pixel(10, 19, false).unwrap();
        assert_eq!(frame.as_bytes()[2 * WIDTH + 10], 0b1111_0111);
        assert_eq!(frame.pixel(10, 18), Some(true));
        assert_eq!(frame.pixel(10, 19), Some(false));
        assert_eq!(frame.pixel(10, 20), Some(true));
    }

    #[test]
    fn test_out_of_bounds_is_rejected() {
        let mut frame = Frame::new();
        let before = frame.clone();

        assert_eq!(frame.set_pixel(-1, 0, true), Err(InvalidBounds));
        assert_eq!(frame.set_pixel(0, -1, true), Err(InvalidBounds));
        assert_eq!(frame.set_pixel(128, 0, true), Err(InvalidBounds));
        assert_eq!(frame.set_pixel(0, 64, true), Err(InvalidBounds));
        assert_eq!(frame, before);

        assert_eq!(frame.pixel(128, 63), None);
    }

    #[test]
    fn test_page_slices() {
        let mut frame = Frame::new();
        frame.set_pixel(3, 17, true).unwrap();

        let page = frame.page(2).unwrap();
        assert_eq!(page.len(), WIDTH);
        assert_eq!(page[3], 0b0000_0010);
        assert!(frame.page(PAGES).is_none());
        assert_eq!(frame.pages().count(), PAGES);
    }

    #[test]
    fn test_clear_after_fill() {
        let mut frame = Frame::new();
        frame.fill(0xFF);
        assert_eq!(frame.lit_pixels(), (WIDTH * HEIGHT) as u32);

        frame.clear();
        assert_eq!(frame, Frame::new());
    }
}
