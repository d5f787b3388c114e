//! Staging buffers for page transfers
//!
//! A page goes out on the bus as one transaction: the data control byte
//! followed by up to `WIDTH` bytes of page data. The staging buffer holds
//! that transaction. Its first byte is fixed to [`DATA_MODE`] when the
//! buffer is created and nothing can overwrite it; copies (by the CPU or
//! by the copy engine) only ever target the data region behind it.
//!
//! Buffers are borrowed from a [`StagingPool`] for the length of one
//! transfer and go back to the pool when the guard is dropped.

use core::cell::{RefCell, RefMut};

use crate::command::DATA_MODE;
use crate::WIDTH;

/// Length of a staging buffer: control byte plus one page
pub const STAGING_LEN: usize = WIDTH + 1;

/// One page-sized bus transaction
pub struct StagingBuffer {
    bytes: [u8; STAGING_LEN],
}

impl StagingBuffer {
    /// Create a buffer with the data control byte in place
    pub const fn new() -> Self {
        let mut bytes = [0; STAGING_LEN];
        bytes[0] = DATA_MODE;
        Self { bytes }
    }

    /// The page data region (`WIDTH` bytes, after the control byte)
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.bytes[1..]
    }

    /// Control byte plus the first `len` data bytes, ready for the bus
    ///
    /// `len` is clamped to `WIDTH`.
    pub fn transaction(&self, len: usize) -> &[u8] {
        &self.bytes[..=len.min(WIDTH)]
    }

    /// Copy `data` into the data region and return the transaction
    ///
    /// At most `WIDTH` bytes are taken from `data`.
    pub fn load(&mut self, data: &[u8]) -> &[u8] {
        let len = data.len().min(WIDTH);
        self.bytes[1..=len].copy_from_slice(&data[..len]);
        self.transaction(len)
    }
}

impl Default for StagingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Guard for a buffer borrowed from a [`StagingPool`]
pub type Staging<'a> = RefMut<'a, StagingBuffer>;

/// Fixed set of staging buffers
///
/// Single-threaded by construction (`!Sync`): buffers are handed out with
/// [`acquire`](Self::acquire) and returned when the guard drops.
pub struct StagingPool<const N: usize> {
    slots: [RefCell<StagingBuffer>; N],
}

impl<const N: usize> StagingPool<N> {
    /// Create a pool of `N` buffers
    pub fn new() -> Self {
        Self {
            slots: core::array::from_fn(|_| RefCell::new(StagingBuffer::new())),
        }
    }

    /// Borrow a free buffer, or `None` if all `N` are in use
    pub fn acquire(&self) -> Option<Staging<'_>> {
        self.slots.iter().find_map(|slot| slot.try_borrow_mut().ok())
    }

    /// Number of buffers not currently borrowed
    pub fn available(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.try_borrow_mut().is_ok())
            .count()
    }

    /// Total number of buffers
    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for StagingPool<N> {
    fn default() -> Self {
        Self::new()
    }
}
