//! SH1106 transfer engine
//!
//! Streams frames to the panel page by page. Every page is addressed the
//! same way: a page-select (page address, column low, column high, one
//! command transaction each) followed by a single data transaction with
//! the page bytes.
//!
//! Two paths produce the same bytes on the wire:
//!
//! - **Direct** ([`render_frame`](Sh1106::render_frame),
//!   [`render_array`](Sh1106::render_array)): the CPU copies each page into
//!   the staging buffer, then writes it.
//! - **Pipelined** ([`render_frame_dma`](Sh1106::render_frame_dma)): the
//!   copy engine fills the staging buffer with the next page while the
//!   page-select for it goes out on the bus.
//!
//! ```text
//!  bus:   [sel 0][data 0]        [sel 1][data 1]        ... [sel 7][data 7]
//!  copy:  [p0]          [p1.........]          [p2....]
//!                ^wait      ^start     ^wait
//! ```
//!
//! There is one staging buffer, so the copy of page `k + 1` is only started
//! after the write of page `k` has returned.

use embedded_hal::delay::DelayNs;
use monoled_hal::{CopyEngine, I2cBus, PendingCopy};

use crate::command::{self, Command, COMMAND_MODE};
use crate::config::DisplayConfig;
use crate::error::DisplayError;
use crate::frame::Frame;
use crate::staging::StagingPool;
use crate::{FRAME_SIZE, PAGES, WIDTH};

/// Where a transfer is in the page protocol
///
/// After a successful transfer this is [`Idle`](Self::Idle). After a bus
/// error it records the bus phase that failed, [`PageSelect`](Self::PageSelect)
/// or [`Transmit`](Self::Transmit).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransferState {
    /// No transfer in progress
    Idle,
    /// Sending the page-select commands
    PageSelect,
    /// Sending page data
    Transmit,
    /// Copy engine filling the staging buffer
    ///
    /// Transient: only held between starting a page copy and the next bus
    /// phase. Copies cannot fail, so [`state`](Sh1106::state) never reports
    /// it once a transfer has returned.
    CopyPending,
}

/// SH1106 OLED driver
///
/// Owns the bus and the copy engine. Staging buffers come from a pool that
/// may be shared with other users on the same thread.
pub struct Sh1106<'p, I2C, D, const N: usize> {
    i2c: I2C,
    dma: D,
    pool: &'p StagingPool<N>,
    config: DisplayConfig,
    state: TransferState,
}

/// Send one command, one transaction per byte
fn send_command<I2C: I2cBus>(i2c: &mut I2C, address: u8, cmd: Command) -> Result<(), I2C::Error> {
    for &byte in cmd.bytes().iter() {
        i2c.write(address, &[COMMAND_MODE, byte])?;
    }
    Ok(())
}

/// Move the RAM cursor to the first visible column of `page`
fn select_page<I2C: I2cBus>(
    i2c: &mut I2C,
    config: &DisplayConfig,
    page: usize,
) -> Result<(), I2C::Error> {
    for cmd in command::page_select(config, page as u8) {
        send_command(i2c, config.address, cmd)?;
    }
    Ok(())
}

impl<'p, I2C, D, const N: usize> Sh1106<'p, I2C, D, N>
where
    I2C: I2cBus,
    D: CopyEngine,
{
    /// Create a new SH1106 driver
    ///
    /// Nothing is sent until [`init`](Self::init).
    pub fn new(i2c: I2C, dma: D, pool: &'p StagingPool<N>, config: DisplayConfig) -> Self {
        Self {
            i2c,
            dma,
            pool,
            config,
            state: TransferState::Idle,
        }
    }

    /// Active configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Protocol phase of the last transfer
    pub fn state(&self) -> TransferState {
        self.state
    }

    /// Give back the bus and the copy engine
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.dma)
    }

    /// Initialize the display
    ///
    /// Sends the power-up sequence, waits `settle_ms` for the charge pump,
    /// then turns the panel on. Display RAM is not cleared.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), DisplayError<I2C::Error>> {
        #[cfg(feature = "defmt")]
        defmt::debug!("SH1106 init at {=u8:#x}", self.config.address);

        for cmd in command::init_sequence(&self.config) {
            self.command(cmd)?;
        }
        delay.delay_ms(self.config.settle_ms);
        self.command(Command::DisplayOn(true))
    }

    /// Send a single command
    pub fn command(&mut self, cmd: Command) -> Result<(), DisplayError<I2C::Error>> {
        send_command(&mut self.i2c, self.config.address, cmd).map_err(DisplayError::Bus)
    }

    /// Set display contrast (0-255)
    pub fn set_contrast(&mut self, contrast: u8) -> Result<(), DisplayError<I2C::Error>> {
        self.command(Command::Contrast(contrast))?;
        self.config.contrast = contrast;
        Ok(())
    }

    /// Turn display on/off
    pub fn set_display_on(&mut self, on: bool) -> Result<(), DisplayError<I2C::Error>> {
        self.command(Command::DisplayOn(on))
    }

    /// Invert display colors
    pub fn set_inverted(&mut self, inverted: bool) -> Result<(), DisplayError<I2C::Error>> {
        self.command(Command::Inverted(inverted))?;
        self.config.inverted = inverted;
        Ok(())
    }

    /// Blank the panel without touching any frame
    pub fn clear_screen(&mut self) -> Result<(), DisplayError<I2C::Error>> {
        self.fill_screen(0x00)
    }

    /// Write `pattern` to every byte of display RAM
    pub fn fill_screen(&mut self, pattern: u8) -> Result<(), DisplayError<I2C::Error>> {
        let pool = self.pool;
        let mut staging = pool.acquire().ok_or(DisplayError::AllocationFailure)?;
        staging.data_mut().fill(pattern);

        for page in 0..PAGES {
            self.state = TransferState::PageSelect;
            select_page(&mut self.i2c, &self.config, page).map_err(DisplayError::Bus)?;
            self.state = TransferState::Transmit;
            self.i2c
                .write(self.config.address, staging.transaction(WIDTH))
                .map_err(DisplayError::Bus)?;
        }

        self.state = TransferState::Idle;
        Ok(())
    }

    /// Flush a full frame to the display
    pub fn render_frame(&mut self, frame: &Frame) -> Result<(), DisplayError<I2C::Error>> {
        self.render_direct(frame.as_bytes())
    }

    /// Send an arbitrary run of page-packed bytes, starting at page 0
    ///
    /// `data` fills `data.len() / WIDTH` whole pages, then a partial page
    /// with the remainder. Runs longer than a frame are rejected.
    pub fn render_array(&mut self, data: &[u8]) -> Result<(), DisplayError<I2C::Error>> {
        if data.is_empty() {
            return Err(DisplayError::EmptyInput);
        }
        if data.len() > FRAME_SIZE {
            return Err(DisplayError::InvalidBounds);
        }
        self.render_direct(data)
    }

    fn render_direct(&mut self, data: &[u8]) -> Result<(), DisplayError<I2C::Error>> {
        let pool = self.pool;
        let mut staging = pool.acquire().ok_or(DisplayError::AllocationFailure)?;

        for (page, chunk) in data.chunks(WIDTH).enumerate() {
            self.state = TransferState::PageSelect;
            select_page(&mut self.i2c, &self.config, page).map_err(DisplayError::Bus)?;

            self.state = TransferState::Transmit;
            let tx = staging.load(chunk);
            self.i2c
                .write(self.config.address, tx)
                .map_err(DisplayError::Bus)?;
        }

        self.state = TransferState::Idle;
        Ok(())
    }

    /// Flush a full frame, copying pages with the copy engine
    ///
    /// Same bytes on the wire as [`render_frame`](Self::render_frame). The
    /// frame stays borrowed until the last page has been written.
    pub fn render_frame_dma(&mut self, frame: &Frame) -> Result<(), DisplayError<I2C::Error>> {
        let Self {
            i2c,
            dma,
            pool,
            config,
            state,
        } = self;

        let mut staging = pool.acquire().ok_or(DisplayError::AllocationFailure)?;
        let bytes = frame.as_bytes();

        let mut pending = dma.start_copy(&bytes[..WIDTH], staging.data_mut());
        *state = TransferState::CopyPending;

        for page in 0..PAGES {
            *state = TransferState::PageSelect;
            if let Err(e) = select_page(i2c, config, page) {
                #[cfg(feature = "defmt")]
                defmt::warn!("SH1106 page {} select failed", page);
                // Let the engine finish before the staging buffer is released
                pending.wait();
                return Err(DisplayError::Bus(e));
            }

            pending.wait();

            *state = TransferState::Transmit;
            i2c.write(config.address, staging.transaction(WIDTH))
                .map_err(DisplayError::Bus)?;

            let next = page + 1;
            if next == PAGES {
                break;
            }
            pending = dma.start_copy(
                &bytes[next * WIDTH..(next + 1) * WIDTH],
                staging.data_mut(),
            );
            *state = TransferState::CopyPending;
        }

        *state = TransferState::Idle;
        Ok(())
    }

    /// Flush a frame with the copy engine, then blank it for the next draw
    ///
    /// The frame is only cleared if the transfer succeeded, so a failed
    /// frame can be sent again as is.
    pub fn render_frame_dma_and_clear(
        &mut self,
        frame: &mut Frame,
    ) -> Result<(), DisplayError<I2C::Error>> {
        self.render_frame_dma(frame)?;
        frame.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use crate::command::DATA_MODE;
    use monoled_hal::CpuCopy;
    use std::vec::Vec;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Nack;

    /// Bus that records every transaction and can fail the n-th one
    #[derive(Default)]
    struct FakeBus {
        writes: Vec<(u8, Vec<u8>)>,
        fail_at: Option<usize>,
    }

    impl I2cBus for FakeBus {
        type Error = Nack;

        fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Nack> {
            if self.fail_at == Some(self.writes.len()) {
                return Err(Nack);
            }
            self.writes.push((address, data.to_vec()));
            Ok(())
        }
    }

    impl FakeBus {
        fn data_writes(&self) -> Vec<&[u8]> {
            self.writes
                .iter()
                .filter(|(_, d)| d[0] == DATA_MODE)
                .map(|(_, d)| &d[1..])
                .collect()
        }

        fn commands(&self) -> Vec<u8> {
            self.writes
                .iter()
                .filter(|(_, d)| d[0] == COMMAND_MODE)
                .map(|(_, d)| d[1])
                .collect()
        }
    }

    struct CountingDelay {
        total_ms: u32,
    }

    impl DelayNs for CountingDelay {
        fn delay_ns(&mut self, ns: u32) {
            self.total_ms += ns / 1_000_000;
        }

        fn delay_ms(&mut self, ms: u32) {
            self.total_ms += ms;
        }
    }

    fn driver<'p>(
        bus: FakeBus,
        pool: &'p StagingPool<1>,
    ) -> Sh1106<'p, FakeBus, CpuCopy, 1> {
        Sh1106::new(bus, CpuCopy::new(), pool, DisplayConfig::default())
    }

    #[test]
    fn test_init_sequence_and_settle() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);
        let mut delay = CountingDelay { total_ms: 0 };

        display.init(&mut delay).unwrap();
        assert_eq!(delay.total_ms, 20);

        let (bus, _) = display.release();
        assert!(bus.writes.iter().all(|(addr, d)| *addr == 0x3C && d.len() == 2));

        let cmds = bus.commands();
        assert_eq!(cmds.len(), 23);
        assert_eq!(cmds[0], 0xAE);
        assert_eq!(*cmds.last().unwrap(), 0xAF);
    }

    #[test]
    fn test_render_frame_pages() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);
        let mut frame = Frame::new();
        frame.set_pixel(0, 63, true).unwrap();

        display.render_frame(&frame).unwrap();
        assert_eq!(display.state(), TransferState::Idle);

        let (bus, _) = display.release();
        // 8 x (3 commands + 1 data)
        assert_eq!(bus.writes.len(), 32);
        let data = bus.data_writes();
        assert_eq!(data.len(), PAGES);
        assert!(data.iter().all(|page| page.len() == WIDTH));
        assert_eq!(data[7][0], 0x80);

        let cmds = bus.commands();
        for page in 0..PAGES {
            assert_eq!(&cmds[page * 3..page * 3 + 3], &[0xB0 | page as u8, 0x02, 0x10]);
        }
    }

    #[test]
    fn test_render_array_partial_page() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);
        let data = [0x5Au8; WIDTH + 10];

        display.render_array(&data).unwrap();

        let (bus, _) = display.release();
        let pages = bus.data_writes();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].len(), WIDTH);
        assert_eq!(pages[1].len(), 10);
        assert_eq!(&bus.commands()[3..6], &[0xB1, 0x02, 0x10]);
    }

    #[test]
    fn test_render_array_rejects_bad_lengths() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);

        assert_eq!(display.render_array(&[]), Err(DisplayError::EmptyInput));
        assert_eq!(
            display.render_array(&[0u8; FRAME_SIZE + 1]),
            Err(DisplayError::InvalidBounds)
        );

        let (bus, _) = display.release();
        assert!(bus.writes.is_empty());
    }

    #[test]
    fn test_pool_exhausted() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);
        let held = pool.acquire().unwrap();

        assert_eq!(
            display.render_frame(&Frame::new()),
            Err(DisplayError::AllocationFailure)
        );
        assert_eq!(
            display.render_frame_dma(&Frame::new()),
            Err(DisplayError::AllocationFailure)
        );

        drop(held);
        assert_eq!(display.render_frame(&Frame::new()), Ok(()));
    }

    #[test]
    fn test_bus_failure_records_phase() {
        let pool = StagingPool::new();

        // Transaction 3 is the first data write
        let bus = FakeBus {
            fail_at: Some(3),
            ..Default::default()
        };
        let mut display = driver(bus, &pool);
        assert_eq!(
            display.render_frame(&Frame::new()),
            Err(DisplayError::Bus(Nack))
        );
        assert_eq!(display.state(), TransferState::Transmit);

        // Transaction 5 is inside the second page-select
        let bus = FakeBus {
            fail_at: Some(5),
            ..Default::default()
        };
        let mut display = driver(bus, &pool);
        assert_eq!(
            display.render_frame_dma(&Frame::new()),
            Err(DisplayError::Bus(Nack))
        );
        assert_eq!(display.state(), TransferState::PageSelect);

        // The staging buffer went back to the pool both times
        assert_eq!(pool.available(), 1);
    }

    #[test]
    fn test_dma_failure_reports_bus_phase() {
        let pool = StagingPool::new();

        // 8 pages x (3 page-select commands + 1 data write)
        for fail_at in 0..PAGES * 4 {
            let bus = FakeBus {
                fail_at: Some(fail_at),
                ..Default::default()
            };
            let mut display = driver(bus, &pool);
            assert_eq!(
                display.render_frame_dma(&Frame::new()),
                Err(DisplayError::Bus(Nack))
            );

            let expected = if fail_at % 4 == 3 {
                TransferState::Transmit
            } else {
                TransferState::PageSelect
            };
            assert_eq!(display.state(), expected, "failed at {}", fail_at);
        }
    }

    #[test]
    fn test_dma_and_clear() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);
        let mut frame = Frame::new();
        frame.fill(0x81);

        display.render_frame_dma_and_clear(&mut frame).unwrap();
        assert_eq!(frame, Frame::new());

        let (bus, _) = display.release();
        assert!(bus
            .data_writes()
            .iter()
            .all(|page| page.iter().all(|&b| b == 0x81)));
    }

    #[test]
    fn test_failed_dma_keeps_frame() {
        let pool = StagingPool::new();
        let bus = FakeBus {
            fail_at: Some(0),
            ..Default::default()
        };
        let mut display = driver(bus, &pool);
        let mut frame = Frame::new();
        frame.fill(0x0F);

        assert!(display.render_frame_dma_and_clear(&mut frame).is_err());
        assert_eq!(frame.as_bytes()[0], 0x0F);
    }

    #[test]
    fn test_fill_screen() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);

        display.fill_screen(0xFF).unwrap();
        display.clear_screen().unwrap();

        let (bus, _) = display.release();
        let pages = bus.data_writes();
        assert_eq!(pages.len(), 2 * PAGES);
        assert!(pages[..PAGES].iter().all(|p| p.iter().all(|&b| b == 0xFF)));
        assert!(pages[PAGES..].iter().all(|p| p.iter().all(|&b| b == 0x00)));
    }

    #[test]
    fn test_runtime_settings_update_config() {
        let pool = StagingPool::new();
        let mut display = driver(FakeBus::default(), &pool);

        display.set_contrast(0x20).unwrap();
        display.set_inverted(true).unwrap();
        display.set_display_on(false).unwrap();
        assert_eq!(display.config().contrast, 0x20);
        assert!(display.config().inverted);

        let (bus, _) = display.release();
        assert_eq!(bus.commands(), [0x81, 0x20, 0xA7, 0xAE]);
    }
}
