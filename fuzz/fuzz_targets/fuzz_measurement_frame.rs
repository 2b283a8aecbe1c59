//! Fuzz target: `decode_words` + `Measurement::from_words`
//!
//! Drives arbitrary byte sequences through the SCD4x response decoder and
//! asserts that it never panics, only accepts frames whose every CRC
//! checks out, and converts accepted words into finite engineering units.
//!
//! cargo fuzz run fuzz_measurement_frame

#![no_main]

use fermentmon::sensors::scd4x::{Measurement, crc8, decode_words};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut words = [0u16; 3];
    if decode_words(data, &mut words).is_err() {
        return;
    }

    assert!(data.len() >= 9, "short frame must be rejected");
    for chunk in data.chunks_exact(3).take(3) {
        assert_eq!(crc8(&chunk[..2]), chunk[2], "bad CRC accepted");
    }

    let m = Measurement::from_words(words);
    assert!(m.co2_ppm.is_finite());
    assert!((-45.0..=130.0).contains(&m.temperature_c));
    assert!((0.0..=100.0).contains(&m.humidity_rh));
});
