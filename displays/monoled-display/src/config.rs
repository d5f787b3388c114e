//! Panel configuration
//!
//! Everything the driver needs to know about a particular module: where it
//! sits on the bus and the analog settings sent during power-up. The
//! defaults match the common 1.3" 128x64 SH1106 module.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default 7-bit I2C address (SA0 low)
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// SH1106 display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// 7-bit I2C address (0x3C or 0x3D)
    pub address: u8,
    /// Contrast (0-255)
    pub contrast: u8,
    /// Multiplex ratio minus one (0x3F for 64 rows)
    pub multiplex_ratio: u8,
    /// Vertical display offset in rows
    pub display_offset: u8,
    /// Oscillator frequency (high nibble) and clock divider (low nibble)
    pub clock_divide: u8,
    /// Pre-charge period (discharge high nibble, pre-charge low nibble)
    pub precharge: u8,
    /// COM pins hardware configuration
    pub com_pins: u8,
    /// VCOM deselect level
    pub vcomh: u8,
    /// First visible RAM column
    ///
    /// The SH1106 has 132 columns of RAM for a 128 column panel; most
    /// modules center the glass, so column 2 is the leftmost pixel.
    pub column_offset: u8,
    /// Mirror horizontally (segment remap)
    pub segment_remap: bool,
    /// Mirror vertically (COM scan from COM[N-1] to COM0)
    pub com_scan_reversed: bool,
    /// Inverted pixels (lit = off)
    pub inverted: bool,
    /// Delay between the init sequence and display-on, in milliseconds
    pub settle_ms: u32,
}

impl DisplayConfig {
    /// Configuration for a standard 128x64 SH1106 module
    pub const fn new() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            contrast: 0xBF,
            multiplex_ratio: 0x3F,
            display_offset: 0x00,
            clock_divide: 0x80,
            precharge: 0x1F,
            com_pins: 0x12,
            vcomh: 0x40,
            column_offset: 2,
            segment_remap: true,
            com_scan_reversed: true,
            inverted: false,
            settle_ms: 20,
        }
    }

    /// Use a different I2C address
    pub const fn with_address(mut self, address: u8) -> Self {
        self.address = address;
        self
    }

    /// Use a different contrast
    pub const fn with_contrast(mut self, contrast: u8) -> Self {
        self.contrast = contrast;
        self
    }

    /// Use a different first visible RAM column
    ///
    /// Use 0 for SSD1306-style modules that map RAM column 0 to the edge.
    pub const fn with_column_offset(mut self, column_offset: u8) -> Self {
        self.column_offset = column_offset;
        self
    }

    /// Rotate the picture by 180 degrees
    pub const fn rotated(mut self) -> Self {
        self.segment_remap = !self.segment_remap;
        self.com_scan_reversed = !self.com_scan_reversed;
        self
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DisplayConfig::default();
        assert_eq!(config.address, 0x3C);
        assert_eq!(config.contrast, 0xBF);
        assert_eq!(config.column_offset, 2);
        assert_eq!(config.settle_ms, 20);
        assert!(!config.inverted);
    }

    #[test]
    fn test_builders() {
        let config = DisplayConfig::new()
            .with_address(0x3D)
            .with_contrast(0x10)
            .with_column_offset(0);

        assert_eq!(config.address, 0x3D);
        assert_eq!(config.contrast, 0x10);
        assert_eq!(config.column_offset, 0);
    }

    #[test]
    fn test_rotation_flips_both_axes() {
        let config = DisplayConfig::new().rotated();
        assert!(!config.segment_remap);
        assert!(!config.com_scan_reversed);
        assert_eq!(config.rotated(), DisplayConfig::new());
    }
}
