//! monoled Hardware Abstraction Layer
//!
//! This crate defines the two capabilities the display driver needs from
//! the chip it runs on. Chip-specific crates (RP2040, ...) implement them,
//! and host tests substitute recording fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  monoled-display (Sh1106, Frame, draw)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  monoled-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  monoled-hal- │       │ embedded-hal  │
//! │    rp2040     │       │  I2C (HalI2c) │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`i2c::I2cBus`] - Blocking addressed byte writes
//! - [`dma::CopyEngine`], [`dma::PendingCopy`] - Background memory copy

#![no_std]
#![deny(unsafe_code)]

pub mod dma;
pub mod i2c;

// Re-export key traits at crate root for convenience
pub use dma::{CopyEngine, CpuCopy, PendingCopy};
pub use i2c::{HalI2c, I2cBus, I2cBusError, I2cConfig};
