//! Stdio console adapter.
//!
//! On the device, ESP-IDF routes stdin/stdout to the UART console, so the
//! same adapter serves both targets.  A reader thread feeds lines into a
//! channel; [`ConsolePort::read_line`] waits on it with a timeout.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use log::warn;

use crate::app::ports::{CONSOLE_LINE_CAPACITY, ConsoleLine, ConsolePort};

pub struct StdioConsole {
    lines: Receiver<String>,
}

impl StdioConsole {
    pub fn new() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("console".into())
            .stack_size(4096)
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    let Ok(line) = line else { break };
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            })?;
        Ok(Self { lines: rx })
    }
}

impl ConsolePort for StdioConsole {
    fn read_line(&mut self, timeout_ms: u32) -> Option<ConsoleLine> {
        let timeout = Duration::from_millis(u64::from(timeout_ms));
        match self.lines.recv_timeout(timeout) {
            Ok(line) => {
                let mut out = ConsoleLine::new();
                for ch in line.trim_end_matches(['\r', '\n']).chars() {
                    if out.push(ch).is_err() {
                        warn!("Console: line truncated to {} bytes", CONSOLE_LINE_CAPACITY);
                        break;
                    }
                }
                Some(out)
            }
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                // Input closed: behave like a silent operator.
                thread::sleep(timeout);
                None
            }
        }
    }

    fn write_line(&mut self, line: &str) {
        let mut out = std::io::stdout().lock();
        let _ = writeln!(out, "{line}");
        let _ = out.flush();
    }
}
