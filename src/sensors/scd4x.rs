//! Sensirion SCD4x photoacoustic CO2 / temperature / humidity sensor.
//!
//! Talks to the sensor over any [`embedded_hal::i2c::I2c`] bus. Every
//! command is a 16-bit big-endian word; every response word is followed by
//! a CRC-8 byte (poly 0x31, init 0xFF).
//!
//! ```text
//!  begin()                      stop_periodic (500 ms) → get_serial (1 ms)
//!  start_periodic_measurement() start_periodic
//!  read_measurement()           get_data_ready (1 ms) → read_measurement (1 ms)
//! ```
//!
//! Bus and CRC failures never escape as panics: they are logged and reported
//! to the sampling loop as "no new data".

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::{debug, info, warn};

use crate::app::ports::SensorPort;
use crate::error::SensorError;

/// Fixed 7-bit I2C address of every SCD4x part.
pub const SCD4X_I2C_ADDR: u8 = 0x62;

const CMD_START_PERIODIC: u16 = 0x21B1;
const CMD_READ_MEASUREMENT: u16 = 0xEC05;
const CMD_STOP_PERIODIC: u16 = 0x3F86;
const CMD_GET_DATA_READY: u16 = 0xE4B8;
const CMD_GET_SERIAL: u16 = 0x3682;

const STOP_SETTLE_MS: u32 = 500;
const CMD_EXEC_MS: u32 = 1;

/// Lower 11 bits of the data-ready word are non-zero when data is waiting.
const DATA_READY_MASK: u16 = 0x07FF;

/// Bytes per response word (two data bytes plus CRC).
const WORD_LEN: usize = 3;

/// Sensirion CRC-8 over one response word.
pub fn crc8(data: &[u8]) -> u8 {
    let mut crc: u8 = 0xFF;
    for &byte in data {
        crc ^= byte;
        for _ in 0..8 {
            crc = if crc & 0x80 != 0 {
                (crc << 1) ^ 0x31
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// Decode `out.len()` CRC-protected words from a raw response.
pub fn decode_words(raw: &[u8], out: &mut [u16]) -> Result<(), SensorError> {
    if raw.len() < out.len() * WORD_LEN {
        return Err(SensorError::ShortResponse);
    }
    for (word, chunk) in out.iter_mut().zip(raw.chunks_exact(WORD_LEN)) {
        if crc8(&chunk[..2]) != chunk[2] {
            return Err(SensorError::CrcMismatch);
        }
        *word = u16::from_be_bytes([chunk[0], chunk[1]]);
    }
    Ok(())
}

/// A decoded measurement in engineering units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    pub co2_ppm: f32,
    pub temperature_c: f32,
    pub humidity_rh: f32,
}

impl Measurement {
    /// Convert the three raw `read_measurement` words.
    pub fn from_words(words: [u16; 3]) -> Self {
        Self {
            co2_ppm: f32::from(words[0]),
            temperature_c: -45.0 + 175.0 * f32::from(words[1]) / 65535.0,
            humidity_rh: 100.0 * f32::from(words[2]) / 65535.0,
        }
    }
}

/// SCD4x driver bound to a bus and a delay provider.
pub struct Scd4x<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    periodic: bool,
    last: Measurement,
}

impl<I2C: I2c, D: DelayNs> Scd4x<I2C, D> {
    pub fn new(i2c: I2C, delay: D) -> Self {
        Self::with_address(i2c, delay, SCD4X_I2C_ADDR)
    }

    pub fn with_address(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            periodic: false,
            last: Measurement::default(),
        }
    }

    /// Give the bus and delay back (e.g. to share the bus after teardown).
    pub fn release(self) -> (I2C, D) {
        (self.i2c, self.delay)
    }

    /// The last successfully decoded measurement.
    pub fn last_measurement(&self) -> Measurement {
        self.last
    }

    /// 48-bit factory serial number.
    pub fn serial_number(&mut self) -> Result<u64, SensorError> {
        let mut words = [0u16; 3];
        self.read_words(CMD_GET_SERIAL, CMD_EXEC_MS, &mut words)?;
        Ok(words
            .iter()
            .fold(0u64, |acc, &w| (acc << 16) | u64::from(w)))
    }

    /// Whether a fresh measurement is waiting in the sensor.
    pub fn data_ready(&mut self) -> Result<bool, SensorError> {
        let mut word = [0u16; 1];
        self.read_words(CMD_GET_DATA_READY, CMD_EXEC_MS, &mut word)?;
        Ok(word[0] & DATA_READY_MASK != 0)
    }

    /// Fetch and decode one measurement. Clears the data-ready flag.
    pub fn measure(&mut self) -> Result<Measurement, SensorError> {
        if !self.periodic {
            return Err(SensorError::NotStarted);
        }
        let mut words = [0u16; 3];
        self.read_words(CMD_READ_MEASUREMENT, CMD_EXEC_MS, &mut words)?;
        Ok(Measurement::from_words(words))
    }

    /// Leave periodic mode. The sensor ignores most commands for 500 ms.
    pub fn stop_periodic(&mut self) -> Result<(), SensorError> {
        self.send(CMD_STOP_PERIODIC)?;
        self.delay.delay_ms(STOP_SETTLE_MS);
        self.periodic = false;
        Ok(())
    }

    fn send(&mut self, cmd: u16) -> Result<(), SensorError> {
        self.i2c
            .write(self.address, &cmd.to_be_bytes())
            .map_err(|_| SensorError::I2cFailed)
    }

    fn read_words(&mut self, cmd: u16, exec_ms: u32, out: &mut [u16]) -> Result<(), SensorError> {
        debug_assert!(out.len() <= 3);
        self.send(cmd)?;
        self.delay.delay_ms(exec_ms);
        let mut raw = [0u8; 3 * WORD_LEN];
        let raw = &mut raw[..out.len() * WORD_LEN];
        self.i2c
            .read(self.address, raw)
            .map_err(|_| SensorError::I2cFailed)?;
        decode_words(raw, out)
    }
}

// ── SensorPort implementation ─────────────────────────────────

impl<I2C: I2c, D: DelayNs> SensorPort for Scd4x<I2C, D> {
    fn begin(&mut self) -> bool {
        // A warm-restarted MCU may find the sensor still in periodic mode,
        // where it rejects get_serial.
        if let Err(e) = self.stop_periodic() {
            warn!("SCD4x: stop_periodic failed: {e}");
            return false;
        }
        match self.serial_number() {
            Ok(serial) => {
                info!("SCD4x: serial 0x{serial:012X}");
                true
            }
            Err(e) => {
                warn!("SCD4x: serial read failed: {e}");
                false
            }
        }
    }

    fn start_periodic_measurement(&mut self) {
        match self.send(CMD_START_PERIODIC) {
            Ok(()) => self.periodic = true,
            Err(e) => warn!("SCD4x: start_periodic failed: {e}"),
        }
    }

    fn read_measurement(&mut self) -> bool {
        match self.data_ready() {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                warn!("SCD4x: data-ready poll failed: {e}");
                return false;
            }
        }
        match self.measure() {
            Ok(m) => {
                debug!("SCD4x: {m:?}");
                self.last = m;
                true
            }
            Err(e) => {
                warn!("SCD4x: measurement read failed: {e}");
                false
            }
        }
    }

    fn co2(&self) -> f32 {
        self.last.co2_ppm
    }

    fn temperature(&self) -> f32 {
        self.last.temperature_c
    }

    fn humidity(&self) -> f32 {
        self.last.humidity_rh
    }
}
