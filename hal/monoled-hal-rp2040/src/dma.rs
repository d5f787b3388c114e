//! DMA copy engine for RP2040
//!
//! Memory-to-memory copies on one DMA channel with 8-bit transfers and
//! both addresses incrementing. Implements `monoled_hal::CopyEngine`.

use embassy_rp::dma::{self, Channel, Transfer};
use embassy_rp::Peri;
use monoled_hal::{CopyEngine, PendingCopy};

/// RP2040 DMA copy engine
///
/// Owns one DMA channel for its whole lifetime. Every copy reprograms the
/// channel's read and write addresses, so the same channel serves every
/// page of a frame.
pub struct DmaCopy<'d, C: Channel> {
    channel: Peri<'d, C>,
}

impl<'d, C: Channel> DmaCopy<'d, C> {
    /// Claim a DMA channel for display copies
    pub fn new(channel: Peri<'d, C>) -> Self {
        Self { channel }
    }
}

/// In-flight DMA copy
///
/// Dropping it without [`wait`](PendingCopy::wait) aborts the channel.
pub struct DmaPending<'a, C: Channel> {
    transfer: Transfer<'a, C>,
}

impl<'d, C: Channel> CopyEngine for DmaCopy<'d, C> {
    type Pending<'a>
        = DmaPending<'a, C>
    where
        Self: 'a;

    fn start_copy<'a>(&'a mut self, src: &'a [u8], dst: &'a mut [u8]) -> Self::Pending<'a> {
        // SAFETY: `src` and `dst` stay borrowed for 'a, the lifetime of the
        // returned handle. The handle either waits for completion or aborts
        // the channel on drop, so the engine never touches either buffer
        // after the borrows end.
        #[allow(unsafe_code)]
        let transfer = unsafe { dma::copy(self.channel.reborrow(), src, dst) };
        DmaPending { transfer }
    }
}

impl<C: Channel> PendingCopy for DmaPending<'_, C> {
    fn wait(self) {
        // Busy-polls the channel; the display path is blocking end to end.
        embassy_futures::block_on(self.transfer);
    }
}
