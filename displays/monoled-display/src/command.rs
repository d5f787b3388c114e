//! SH1106 command set
//!
//! Every bus transaction starts with a control byte: [`COMMAND_MODE`] for
//! a command, [`DATA_MODE`] for display RAM data. Commands are sent one byte
//! per transaction, including the argument byte of two-byte commands.

use heapless::Vec;

use crate::config::DisplayConfig;

/// Control byte for a command transaction
pub const COMMAND_MODE: u8 = 0x00;

/// Control byte for a data transaction
pub const DATA_MODE: u8 = 0x40;

/// SH1106 opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    ColumnLow = 0x00,
    ColumnHigh = 0x10,
    StartLine = 0x40,
    Contrast = 0x81,
    SegmentNormal = 0xA0,
    SegmentRemap = 0xA1,
    DisplayNormal = 0xA6,
    DisplayInverse = 0xA7,
    MultiplexRatio = 0xA8,
    DisplayOff = 0xAE,
    DisplayOn = 0xAF,
    PageAddress = 0xB0,
    ComScanNormal = 0xC0,
    ComScanReversed = 0xC8,
    DisplayOffset = 0xD3,
    ClockDivide = 0xD5,
    Precharge = 0xD9,
    ComPins = 0xDA,
    Vcomh = 0xDB,
}

/// A command with its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Panel on or off (sleep)
    DisplayOn(bool),
    /// Low nibble of the column cursor
    ColumnLow(u8),
    /// High nibble of the column cursor
    ColumnHigh(u8),
    /// RAM row shown at the top of the panel (0-63)
    StartLine(u8),
    /// Page cursor (0-7)
    PageAddress(u8),
    /// Contrast (0-255)
    Contrast(u8),
    /// Mirror horizontally
    SegmentRemap(bool),
    /// Inverted pixels
    Inverted(bool),
    /// Multiplex ratio minus one
    MultiplexRatio(u8),
    /// Mirror vertically
    ComScanReversed(bool),
    /// Vertical offset in rows
    DisplayOffset(u8),
    /// Oscillator frequency and divider
    ClockDivide(u8),
    /// Pre-charge period
    Precharge(u8),
    /// COM pins configuration
    ComPins(u8),
    /// VCOM deselect level
    Vcomh(u8),
}

impl Command {
    /// Bytes of this command, each sent as its own transaction
    pub fn bytes(self) -> Vec<u8, 2> {
        let (op, arg) = match self {
            Command::DisplayOn(true) => (Opcode::DisplayOn as u8, None),
            Command::DisplayOn(false) => (Opcode::DisplayOff as u8, None),
            Command::ColumnLow(c) => (Opcode::ColumnLow as u8 | (c & 0x0F), None),
            Command::ColumnHigh(c) => (Opcode::ColumnHigh as u8 | (c & 0x0F), None),
            Command::StartLine(line) => (Opcode::StartLine as u8 | (line & 0x3F), None),
            Command::PageAddress(page) => (Opcode::PageAddress as u8 | (page & 0x07), None),
            Command::Contrast(v) => (Opcode::Contrast as u8, Some(v)),
            Command::SegmentRemap(true) => (Opcode::SegmentRemap as u8, None),
            Command::SegmentRemap(false) => (Opcode::SegmentNormal as u8, None),
            Command::Inverted(true) => (Opcode::DisplayInverse as u8, None),
            Command::Inverted(false) => (Opcode::DisplayNormal as u8, None),
            Command::MultiplexRatio(v) => (Opcode::MultiplexRatio as u8, Some(v)),
            Command::ComScanReversed(true) => (Opcode::ComScanReversed as u8, None),
            Command::ComScanReversed(false) => (Opcode::ComScanNormal as u8, None),
            Command::DisplayOffset(v) => (Opcode::DisplayOffset as u8, Some(v)),
            Command::ClockDivide(v) => (Opcode::ClockDivide as u8, Some(v)),
            Command::Precharge(v) => (Opcode::Precharge as u8, Some(v)),
            Command::ComPins(v) => (Opcode::ComPins as u8, Some(v)),
            Command::Vcomh(v) => (Opcode::Vcomh as u8, Some(v)),
        };

        // Opcode plus at most one argument: never more than 2 bytes
        core::iter::once(op).chain(arg).collect()
    }
}

/// Number of commands in [`init_sequence`]
pub const INIT_SEQUENCE_LEN: usize = 15;

/// Power-up sequence, sent before the settle delay and display-on
pub fn init_sequence(config: &DisplayConfig) -> [Command; INIT_SEQUENCE_LEN] {
    [
        Command::DisplayOn(false),
        Command::ColumnLow(config.column_offset),
        Command::ColumnHigh(config.column_offset >> 4),
        Command::StartLine(0),
        Command::PageAddress(0),
        Command::Contrast(config.contrast),
        Command::SegmentRemap(config.segment_remap),
        Command::Inverted(config.inverted),
        Command::MultiplexRatio(config.multiplex_ratio),
        Command::ComScanReversed(config.com_scan_reversed),
        Command::DisplayOffset(config.display_offset),
        Command::ClockDivide(config.clock_divide),
        Command::Precharge(config.precharge),
        Command::ComPins(config.com_pins),
        Command::Vcomh(config.vcomh),
    ]
}

/// Commands that move the cursor to column 0 of `page`
pub fn page_select(config: &DisplayConfig, page: u8) -> [Command; 3] {
    [
        Command::PageAddress(page),
        Command::ColumnLow(config.column_offset),
        Command::ColumnHigh(config.column_offset >> 4),
    ]
}
