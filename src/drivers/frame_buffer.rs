//! Page-organised monochrome frame buffer.
//!
//! Mirrors the memory layout of SSD1306/SH1106-class controllers: the
//! 128×64 panel is split into eight horizontal pages of 8 rows, each page
//! holding one byte per column with bit `y % 8` set for a lit pixel.
//!
//! ```text
//!   page 0  ┌ col 0 ┬ col 1 ┬ … ┬ col 127 ┐  rows 0..8
//!   page 1  │       │       │   │         │  rows 8..16
//!   …       │       │       │   │         │
//!   page 7  └───────┴───────┴───┴─────────┘  rows 56..64
//! ```
//!
//! Drawing happens off-screen through [`DrawTarget`]; a [`PagePanel`]
//! then receives the finished frame page by page.

use core::convert::Infallible;
use core::fmt::Debug;

use embedded_graphics::Pixel;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::BinaryColor;

pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGE_COUNT: usize = HEIGHT / 8;

/// A physical panel that accepts one page of column bytes at a time.
pub trait PagePanel {
    type Error: Debug;

    /// Push `data` (one byte per column) to page `index`.
    fn write_page(&mut self, index: usize, data: &[u8]) -> Result<(), Self::Error>;
}

pub struct FrameBuffer {
    data: [u8; WIDTH * PAGE_COUNT],
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameBuffer {
    pub const fn new() -> Self {
        Self {
            data: [0; WIDTH * PAGE_COUNT],
        }
    }

    /// Whether the pixel at `(x, y)` is lit. Out of bounds reads as off.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.data[(y / 8) * WIDTH + x] & (1 << (y % 8)) != 0
    }

    /// Column bytes of one page.
    pub fn page(&self, index: usize) -> &[u8] {
        &self.data[index * WIDTH..(index + 1) * WIDTH]
    }

    /// All pages, top to bottom.
    pub fn pages(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(WIDTH)
    }

    /// Number of lit pixels inside the given rectangle (half-open ranges).
    pub fn lit_in(&self, xs: core::ops::Range<usize>, ys: core::ops::Range<usize>) -> usize {
        ys.flat_map(|y| xs.clone().map(move |x| (x, y)))
            .filter(|&(x, y)| self.pixel(x, y))
            .count()
    }

    /// Send the whole frame to a panel, stopping at the first error.
    pub fn flush_to<P: PagePanel>(&self, panel: &mut P) -> Result<(), P::Error> {
        for (index, page) in self.pages().enumerate() {
            panel.write_page(index, page)?;
        }
        Ok(())
    }

    fn set(&mut self, x: usize, y: usize, on: bool) {
        let idx = (y / 8) * WIDTH + x;
        let bit = 1 << (y % 8);
        if on {
            self.data[idx] |= bit;
        } else {
            self.data[idx] &= !bit;
        }
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            // Off-panel pixels are dropped.
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x < WIDTH && y < HEIGHT {
                self.set(x, y, color.is_on());
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.data.fill(if color.is_on() { 0xFF } else { 0x00 });
        Ok(())
    }
}
