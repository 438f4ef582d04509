//! Fuzz target: `WateringPlanner::duration_minutes`
//!
//! Feeds arbitrary f32 bit patterns (NaN and infinities included) into the
//! planner and checks the output always lands in the duration domain.
//!
//! cargo fuzz run fuzz_inference

#![no_main]

use fuzzyirrigation::control::WateringPlanner;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: [u8; 8]| {
    let temperature = f32::from_le_bytes([data[0], data[1], data[2], data[3]]);
    let humidity = f32::from_le_bytes([data[4], data[5], data[6], data[7]]);

    let Ok(mut planner) = WateringPlanner::new(200) else {
        return;
    };
    let minutes = planner.duration_minutes(temperature, humidity);

    assert!(minutes.is_finite(), "non-finite duration {minutes}");
    assert!((0.0..=15.0).contains(&minutes), "duration {minutes} out of range");
    assert_eq!(planner.last_minutes(), minutes);
});
