//! Fuzz target: `dht::decode_frame`
//!
//! Any 5-byte frame must either be rejected or decode to a value inside
//! the sensor's physical range, for both sensor models.
//!
//! cargo fuzz run fuzz_dht_frame

#![no_main]

use fuzzyirrigation::config::SensorModel;
use fuzzyirrigation::drivers::dht::decode_frame;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|frame: [u8; 5]| {
    for model in [SensorModel::Dht11, SensorModel::Dht22] {
        if let Ok(m) = decode_frame(model, &frame) {
            assert!((0.0..=100.0).contains(&m.humidity_pct));
            assert!((-40.0..=80.0).contains(&m.temperature_c));
        }
    }
});
