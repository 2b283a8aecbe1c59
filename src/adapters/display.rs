//! Status display adapter.
//!
//! Implements [`DisplayPort`] by drawing the latest reading into an
//! off-screen [`FrameBuffer`] and pushing it page by page to a
//! [`PagePanel`]. Layout on the 128×64 panel:
//!
//! ```text
//!  ┌────────────────────────────┐
//!  │ GOOD                       │  status token, 10×20 font
//!  │                            │  (inverted header on alerts)
//!  │ CO2 1234 ppm               │
//!  │ 21.4 C  63.0 %RH           │  6×10 font
//!  │ fermenting well            │
//!  └────────────────────────────┘
//! ```

use core::convert::Infallible;
use core::fmt::Write as _;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_10X20};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;
use log::{Level, log_enabled, trace, warn};

use crate::adapters::log_sink::LINE_CAPACITY;
use crate::app::ports::DisplayPort;
use crate::drivers::frame_buffer::{FrameBuffer, HEIGHT, PAGE_COUNT, PagePanel, WIDTH};
use crate::reading::Reading;
use crate::status::StatusCode;

const HEADER_HEIGHT: u32 = 22;
const CO2_ROW_Y: i32 = 26;
const CLIMATE_ROW_Y: i32 = 38;
const HINT_ROW_Y: i32 = 52;

/// Temperature and humidity row. Values are not clamped, so the buffer
/// shares the serial line's capacity.
fn climate_row(reading: &Reading) -> String<LINE_CAPACITY> {
    let mut line = String::new();
    let _ = write!(
        line,
        "{:.1} C  {:.1} %RH",
        reading.temperature_c, reading.humidity_rh
    );
    line
}

/// Draw one status frame onto any monochrome target.
pub fn draw_status<D>(target: &mut D, reading: &Reading, status: StatusCode) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    target.clear(BinaryColor::Off)?;

    let (fg, bg) = if status.is_alert() {
        (BinaryColor::Off, BinaryColor::On)
    } else {
        (BinaryColor::On, BinaryColor::Off)
    };
    let width = target.bounding_box().size.width;
    Rectangle::new(Point::zero(), Size::new(width, HEADER_HEIGHT))
        .into_styled(PrimitiveStyle::with_fill(bg))
        .draw(target)?;
    Text::with_baseline(
        status.token(),
        Point::new(4, 1),
        MonoTextStyle::new(&FONT_10X20, fg),
        Baseline::Top,
    )
    .draw(target)?;

    let small = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
    let mut line: String<LINE_CAPACITY> = String::new();

    let _ = write!(line, "CO2 {} ppm", reading.co2_ppm);
    Text::with_baseline(&line, Point::new(0, CO2_ROW_Y), small, Baseline::Top).draw(target)?;

    let climate = climate_row(reading);
    Text::with_baseline(&climate, Point::new(0, CLIMATE_ROW_Y), small, Baseline::Top)
        .draw(target)?;

    Text::with_baseline(status.hint(), Point::new(0, HINT_ROW_Y), small, Baseline::Top)
        .draw(target)?;

    Ok(())
}

/// Renderer that owns the frame buffer and the panel it flushes to.
pub struct StatusDisplay<P> {
    frame: FrameBuffer,
    panel: P,
}

impl<P: PagePanel> StatusDisplay<P> {
    pub fn new(panel: P) -> Self {
        Self {
            frame: FrameBuffer::new(),
            panel,
        }
    }

    /// The last frame drawn.
    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }
}

impl<P: PagePanel> DisplayPort for StatusDisplay<P> {
    fn render(&mut self, reading: &Reading, status: StatusCode) {
        draw_status(&mut self.frame, reading, status).unwrap_or_else(|never| match never {});
        if let Err(e) = self.frame.flush_to(&mut self.panel) {
            // The previous frame stays on the glass.
            warn!("Display flush failed: {:?}", e);
        }
    }
}

// ── Host panel ────────────────────────────────────────────────

/// Host stand-in for an OLED controller: reassembles the pages and dumps
/// the frame as ASCII art at `trace` level.
pub struct AsciiPanel {
    pages: [[u8; WIDTH]; PAGE_COUNT],
    frames: u64,
}

impl Default for AsciiPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl AsciiPanel {
    pub fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGE_COUNT],
            frames: 0,
        }
    }

    /// Completed frames received so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// One panel row as `#` (lit) and `.` (dark).
    pub fn row(&self, y: usize) -> std::string::String {
        let page = &self.pages[y / 8];
        let bit = 1 << (y % 8);
        page.iter()
            .map(|&col| if col & bit != 0 { '#' } else { '.' })
            .collect()
    }
}

impl PagePanel for AsciiPanel {
    type Error = Infallible;

    fn write_page(&mut self, index: usize, data: &[u8]) -> Result<(), Self::Error> {
        let Some(page) = self.pages.get_mut(index) else {
            return Ok(());
        };
        let n = data.len().min(WIDTH);
        page[..n].copy_from_slice(&data[..n]);

        if index == PAGE_COUNT - 1 {
            self.frames += 1;
            if log_enabled!(Level::Trace) {
                for y in 0..HEIGHT {
                    trace!("{}", self.row(y));
                }
            }
        }
        Ok(())
    }
}
