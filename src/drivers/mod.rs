//! Low-level peripheral drivers.
//!
//! - **frame_buffer**: page-organised 128×64 monochrome buffer and the
//!   `PagePanel` trait that physical OLED controllers implement.

pub mod frame_buffer;
