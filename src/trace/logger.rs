use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use tracing::warn;

use crate::driver::driver_model::DriverCommand;
use crate::driver::error::DriverError;
use crate::trace::trace::TraceEvent;

/// JSONL transcript of driver commands. A logger without a sink accepts
/// every call and writes nothing.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    /// Append to `path`, creating it if needed.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            sink: Some(Mutex::new(file)),
        })
    }

    /// Like `open`, but an unopenable path yields a disabled logger.
    pub fn new(path: &str) -> Self {
        Self::open(path).unwrap_or_else(|e| {
            warn!(path, error = %e, "could not open trace file, tracing disabled");
            Self::disabled()
        })
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Log the outcome of one driver command.
    pub fn record(&self, step: u64, command: &DriverCommand, error: Option<&DriverError>) {
        let event = TraceEvent::now(step, command);
        let event = match error {
            Some(e) => event.with_error(e),
            None => event,
        };
        self.log(&event);
    }

    pub fn log(&self, event: &TraceEvent) {
        let Some(sink) = &self.sink else {
            return;
        };

        let line = match serde_json::to_string(event) {
            Ok(line) => line,
            Err(e) => {
                warn!(step = event.step, error = %e, "failed to serialize trace event");
                return;
            }
        };

        let mut file = sink.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Err(e) = writeln!(file, "{}", line) {
            warn!(step = event.step, error = %e, "failed to write trace event");
        }
    }
}
