//! RP2040-specific HAL for the monoled display driver
//!
//! This crate provides RP2040 implementations of the shared
//! `monoled-hal` traits:
//!
//! - DMA copy engine (implements `monoled_hal::CopyEngine`)
//!
//! The I2C side needs no chip code: embassy-rp's blocking I2C implements
//! `embedded-hal` and is wrapped with `monoled_hal::HalI2c`.

#![no_std]

pub mod dma;

pub use dma::{DmaCopy, DmaPending};

// Re-export shared traits from monoled-hal for convenience
pub use monoled_hal::{CopyEngine, PendingCopy};
