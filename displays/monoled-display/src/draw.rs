//! Drawing primitives
//!
//! All primitives draw into a caller-owned [`Frame`]. They never write
//! outside the frame: pixels and glyphs that fall off the edge are skipped
//! one by one, the rest of the shape is still drawn, and the call reports
//! [`InvalidBounds`] so the caller knows the shape was clipped. Callers that
//! don't care can drop the result with `.ok()`.

use crate::error::InvalidBounds;
use crate::font::{self, GLYPH_SIZE};
use crate::frame::Frame;
use crate::{HEIGHT, WIDTH};

/// Tracks whether any point of a shape was clipped
#[derive(Default)]
struct Clip {
    clipped: bool,
}

impl Clip {
    fn plot(&mut self, frame: &mut Frame, x: i32, y: i32, on: bool) {
        if frame.set_pixel(x, y, on).is_err() {
            self.clipped = true;
        }
    }

    fn finish(self) -> Result<(), InvalidBounds> {
        if self.clipped {
            Err(InvalidBounds)
        } else {
            Ok(())
        }
    }
}

/// Draw a line from `(x0, y0)` to `(x1, y1)` inclusive
///
/// Integer Bresenham. Both endpoints are always plotted (when in bounds).
/// The error terms are kept in `i32`, which holds any `i16` span.
pub fn draw_line(
    frame: &mut Frame,
    x0: i16,
    y0: i16,
    x1: i16,
    y1: i16,
    on: bool,
) -> Result<(), InvalidBounds> {
    let (x0, y0, x1, y1) = (
        i32::from(x0),
        i32::from(y0),
        i32::from(x1),
        i32::from(y1),
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);
    let mut clip = Clip::default();

    loop {
        clip.plot(frame, x, y, on);
        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }

    clip.finish()
}

/// Draw a circle outline of radius `r` centred on `(cx, cy)`
///
/// Midpoint algorithm, plotting the 8 octant reflections of each step.
pub fn draw_circle(frame: &mut Frame, cx: i16, cy: i16, r: u16) -> Result<(), InvalidBounds> {
    let (cx, cy) = (i32::from(cx), i32::from(cy));
    let mut x = i32::from(r);
    let mut y = 0;
    let mut err = 1 - x;
    let mut clip = Clip::default();

    while x >= y {
        clip.plot(frame, cx + x, cy + y, true);
        clip.plot(frame, cx + y, cy + x, true);
        clip.plot(frame, cx - y, cy + x, true);
        clip.plot(frame, cx - x, cy + y, true);
        clip.plot(frame, cx - x, cy - y, true);
        clip.plot(frame, cx - y, cy - x, true);
        clip.plot(frame, cx + y, cy - x, true);
        clip.plot(frame, cx + x, cy - y, true);

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x + 1);
        }
    }

    clip.finish()
}

/// Draw one character
///
/// The glyph is 8 pixels wide and lands on the page containing `y`: `y` is
/// truncated to a multiple of 8, `x` is used as is. A glyph that would not
/// fit entirely (`x > WIDTH - 8` or `y > HEIGHT - 8`) is not drawn.
pub fn write_glyph(frame: &mut Frame, x: i32, y: i32, ch: char) -> Result<(), InvalidBounds> {
    const MAX_X: i32 = (WIDTH - GLYPH_SIZE) as i32;
    const MAX_Y: i32 = (HEIGHT - GLYPH_SIZE) as i32;

    if x < 0 || y < 0 || x > MAX_X || y > MAX_Y {
        return Err(InvalidBounds);
    }

    let start = (y as usize / 8) * WIDTH + x as usize;
    frame.as_bytes_mut()[start..start + GLYPH_SIZE].copy_from_slice(font::glyph(ch));
    Ok(())
}

/// Draw a string, one glyph every 8 pixels starting at `(x, y)`
///
/// Characters that run off the right edge are skipped; the ones that fit
/// are still drawn.
pub fn write_string(frame: &mut Frame, x: i32, y: i32, text: &str) -> Result<(), InvalidBounds> {
    let mut clipped = false;
    let mut cursor = x;

    for ch in text.chars() {
        if write_glyph(frame, cursor, y, ch).is_err() {
            clipped = true;
        }
        cursor = cursor.saturating_add(GLYPH_SIZE as i32);
    }

    if clipped {
        Err(InvalidBounds)
    } else {
        Ok(())
    }
}

/// Plot `y = f(x)` for every column in `[x_margin, WIDTH - x_margin)`
///
/// Samples whose `y` falls outside the frame are silently dropped, which
/// makes it safe to plot functions that leave the visible range.
pub fn plot_function<F>(frame: &mut Frame, mut f: F, x_margin: u16)
where
    F: FnMut(u16) -> i32,
{
    let end = (WIDTH as u16).saturating_sub(x_margin);
    for x in x_margin..end {
        let y = f(x);
        if (0..HEIGHT as i32).contains(&y) {
            // In bounds by the check above
            let _ = frame.set_pixel(i32::from(x), y, true);
        }
    }
}
