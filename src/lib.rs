//! FuzzyIrrigation firmware library.
//!
//! Exposes the pure-logic modules (fuzzy engine, scheduler, application
//! core) and the `embedded-hal` drivers for integration testing.  All
//! ESP-IDF-specific code is guarded by the `espidf` feature.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod clock;
pub mod config;
pub mod control;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod scheduler;
