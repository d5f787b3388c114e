//! SH1106 OLED driver for 128x64 monochrome panels
//!
//! This crate provides:
//! - [`Frame`], the page-packed 1 bit per pixel buffer
//! - [`draw`] primitives (lines, circles, glyphs, strings, function plots)
//! - [`Sh1106`], the transfer engine that streams a frame to the panel,
//!   either directly or pipelined through a background copy engine
//! - [`DisplayConfig`] and the [`Command`] set used to bring the panel up
//!
//! # Memory layout
//!
//! The panel is addressed in 8 pages of 8 pixel rows. Each byte holds one
//! column of one page, least significant bit at the top:
//!
//! ```text
//!          x=0     x=1           x=127
//! page 0 [byte 0][byte 1] ... [byte 127]    rows 0..8
//! page 1 [  128 ][  129 ] ... [   255  ]    rows 8..16
//!   ...
//! page 7 [  896 ][  897 ] ... [  1023  ]    rows 56..64
//! ```
//!
//! # Usage
//!
//! Callers draw into a [`Frame`] they own, then hand it to the driver:
//!
//! ```ignore
//! draw::write_string(&mut frame, 0, 0, "HELLO")?;
//! draw::draw_circle(&mut frame, 64, 32, 20).ok();
//! display.render_frame_dma_and_clear(&mut frame)?;
//! ```

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod config;
pub mod draw;
pub mod error;
pub mod font;
pub mod frame;
pub mod sh1106;
pub mod staging;

/// Panel width in pixels
pub const WIDTH: usize = 128;

/// Panel height in pixels
pub const HEIGHT: usize = 64;

/// Number of 8-row pages
pub const PAGES: usize = HEIGHT / 8;

/// Size of a full frame in bytes
pub const FRAME_SIZE: usize = WIDTH * HEIGHT / 8;

// Re-export key types
pub use command::Command;
pub use config::DisplayConfig;
pub use error::{DisplayError, InvalidBounds};
pub use frame::Frame;
pub use sh1106::{Sh1106, TransferState};
pub use staging::{StagingBuffer, StagingPool};
