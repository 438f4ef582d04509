//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements    | Connects to                    |
//! |------------|---------------|--------------------------------|
//! | `hardware` | SensorPort    | DHT11 / DHT22 (single-wire)    |
//! |            | ClockPort     | DS3231 RTC (I²C)               |
//! |            | DisplayPort   | HD44780 16×2 LCD (4-bit)       |
//! |            | ActuatorPort  | Relay GPIO                     |
//! | `console`  | ConsolePort   | stdin / stdout (UART console)  |
//! | `log_sink` | EventSink     | `log` facade                   |
//! | `time`     | -             | ESP32 high-resolution timer    |

pub mod console;
pub mod hardware;
pub mod log_sink;
pub mod time;
