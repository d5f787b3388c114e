//! monoled demo firmware
//!
//! Drives a 1.3" SH1106 module on an RP2040 (I2C0: GP5=SCL, GP4=SDA).
//! Frames are drawn on the CPU and streamed to the panel through the
//! DMA-pipelined path, one page copy overlapping each page-select.

#![no_std]
#![no_main]

use core::f32::consts::PI;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::{DMA_CH0, I2C0};
use embassy_time::{Delay, Duration, Instant, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use monoled_display::draw;
use monoled_display::{DisplayConfig, Frame, Sh1106, StagingPool, HEIGHT};
use monoled_hal::{HalI2c, I2cConfig};
use monoled_hal_rp2040::DmaCopy;

type Display = Sh1106<'static, HalI2c<I2c<'static, I2C0, Blocking>>, DmaCopy<'static, DMA_CH0>, 1>;

/// Staging buffers shared by every transfer (must live forever)
static STAGING: StaticCell<StagingPool<1>> = StaticCell::new();

/// Frame period
const FRAME_MS: u64 = 50;

/// Columns left blank on each side of the sine plot
const PLOT_MARGIN: u16 = 4;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("monoled demo starting...");

    let p = embassy_rp::init(Default::default());

    // The RP2040 I2C block tops out at fast mode plus
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = I2cConfig::FAST_PLUS.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);

    let pool = STAGING.init(StagingPool::new());
    let mut display = Sh1106::new(
        HalI2c::new(i2c),
        DmaCopy::new(p.DMA_CH0),
        pool,
        DisplayConfig::default(),
    );

    if let Err(e) = display.init(&mut Delay) {
        error!("Failed to initialize display: {:?}", e);
    } else {
        info!("OLED initialized");
        display.clear_screen().ok();
    }

    spawner.spawn(display_task(display)).unwrap();
}

/// Redraw and flush a frame every `FRAME_MS`
#[embassy_executor::task]
async fn display_task(mut display: Display) {
    info!("Display task started");

    let mut frame = Frame::new();
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_MS));
    let mut phase: u32 = 0;

    loop {
        draw_scene(&mut frame, phase);

        let start = Instant::now();
        match display.render_frame_dma_and_clear(&mut frame) {
            Ok(()) => trace!("Frame {} sent in {} us", phase, start.elapsed().as_micros()),
            Err(e) => {
                warn!("Frame {} failed in {:?}: {:?}", phase, display.state(), e);
                frame.clear();
            }
        }

        phase = phase.wrapping_add(1);
        ticker.next().await;
    }
}

/// Title, frame border, a bouncing circle and a scrolling sine wave
fn draw_scene(frame: &mut Frame, phase: u32) {
    draw::write_string(frame, 0, 0, "SH1106 DMA").ok();

    draw::draw_line(frame, 0, 10, 127, 10, true).ok();
    draw::draw_line(frame, 0, 63, 127, 63, true).ok();

    let bounce = (phase % 64) as i16;
    let cx = if bounce < 32 { 16 + bounce * 3 } else { 16 + (63 - bounce) * 3 };
    draw::draw_circle(frame, cx, 37, 8).ok();

    let shift = (phase % 128) as f32;
    let mid = (HEIGHT as f32 + 10.0) / 2.0;
    draw::plot_function(
        frame,
        |x| {
            let t = 2.0 * PI * (f32::from(x) + shift) / 64.0;
            libm::roundf(mid - 20.0 * libm::sinf(t)) as i32
        },
        PLOT_MARGIN,
    );
}
