//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the `log` facade (UART console in production, stderr on the host).

use log::{info, warn};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started => {
                info!("START | relay=OFF");
            }
            AppEvent::SampleTaken {
                temperature_c,
                humidity_pct,
            } => {
                info!("SAMPLE | T={:.1}\u{00b0}C | RH={:.1}%", temperature_c, humidity_pct);
            }
            AppEvent::SampleFailed(e) => {
                warn!("SAMPLE | DHT ERROR ({})", e);
            }
            AppEvent::PreviewComputed { minutes } => {
                info!("FUZZY | preview={:.2} min", minutes);
            }
            AppEvent::WateringArmed { at, minutes } => {
                info!("WATER | armed {} | duration={:.2} min", at, minutes);
            }
            AppEvent::RelayChanged { on } => {
                info!("RELAY | {}", if *on { "ON" } else { "OFF" });
            }
            AppEvent::ClockFailed(e) => {
                warn!("CLOCK | {}", e);
            }
        }
    }
}
