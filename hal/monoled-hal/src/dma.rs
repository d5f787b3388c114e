//! Background copy engine abstractions
//!
//! A copy engine moves bytes from one buffer to another while the CPU does
//! something else (typically a DMA channel). Starting a copy returns a
//! [`PendingCopy`] that keeps both buffers borrowed until it is waited on,
//! so neither side can be touched while the engine still owns them.
//!
//! ```text
//!   start_copy(src, dst) ──► PendingCopy ──► wait() ──► dst readable
//!          │                      │
//!          └── src, dst borrowed ─┘
//! ```

use core::marker::PhantomData;

/// Memory-to-memory copy engine
///
/// Each [`start_copy`](CopyEngine::start_copy) rebinds the source and
/// destination, so one engine can be reused for every page of a frame.
pub trait CopyEngine {
    /// In-flight copy, borrowing the engine and both buffers
    type Pending<'a>: PendingCopy
    where
        Self: 'a;

    /// Start copying `src` into `dst`
    ///
    /// `src` and `dst` must have the same length. The copy may still be
    /// running when this returns.
    fn start_copy<'a>(&'a mut self, src: &'a [u8], dst: &'a mut [u8]) -> Self::Pending<'a>;
}

/// Handle to a copy started by a [`CopyEngine`]
pub trait PendingCopy {
    /// Block until the copy has completed
    fn wait(self);
}

/// Copy engine that copies on the CPU
///
/// The copy is done inside `start_copy`, so `wait` returns immediately.
/// Used on chips without a free DMA channel and in host tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct CpuCopy;

impl CpuCopy {
    /// Create a CPU copy engine
    pub const fn new() -> Self {
        Self
    }
}

/// Completed copy returned by [`CpuCopy`]
pub struct CpuPending<'a> {
    _buffers: PhantomData<&'a mut [u8]>,
}

impl PendingCopy for CpuPending<'_> {
    fn wait(self) {}
}

impl CopyEngine for CpuCopy {
    type Pending<'a> = CpuPending<'a>;

    fn start_copy<'a>(&'a mut self, src: &'a [u8], dst: &'a mut [u8]) -> Self::Pending<'a> {
        dst.copy_from_slice(src);
        CpuPending {
            _buffers: PhantomData,
        }
    }
}
