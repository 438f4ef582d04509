//! Peripheral drivers, generic over `embedded-hal` 1.0 traits.

pub mod dht;
pub mod ds3231;
pub mod hd44780;
pub mod relay;
