//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the business rules of the irrigation controller:
//! sampling cadence, the daily watering window, relay timing, the display
//! layout, and the diagnostic console mode.  All interaction with hardware
//! happens through **port traits** defined in [`ports`], keeping this layer
//! fully testable without real peripherals.

pub mod context;
pub mod diagnostics;
pub mod events;
pub mod ports;
pub mod screen;
pub mod service;
pub mod state;
