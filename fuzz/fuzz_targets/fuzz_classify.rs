//! Fuzz target: `classify` + `format_sample`
//!
//! Feeds arbitrary bit patterns (NaN, infinities, subnormals included) as a
//! reading and asserts that classification is deterministic and that the
//! diagnostic line always has its four tab-separated fields.
//!
//! cargo fuzz run fuzz_classify

#![no_main]

use fermentmon::adapters::log_sink::format_sample;
use fermentmon::config::MonitorConfig;
use fermentmon::{Reading, classify};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 12]| {
    let co2 = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let t = f32::from_le_bytes([data[4], data[5], data[6], data[7]]);
    let rh = f32::from_le_bytes([data[8], data[9], data[10], data[11]]);

    let reading = Reading::new(co2, t, rh);
    let config = MonitorConfig::default();
    let status = classify(&reading, &config);
    assert_eq!(status, classify(&reading, &config));

    let line = format_sample(&reading, status);
    assert_eq!(line.split('\t').count(), 4);
    assert!(line.ends_with(status.token()));
});
