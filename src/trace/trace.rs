use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::driver::driver_model::DriverCommand;

/// One driver command as written to the JSONL trace.
#[derive(Debug, Serialize)]
pub struct TraceEvent {
    pub timestamp_ms: u128,
    pub step: u64,

    pub command: String,
    pub target: Option<String>,

    pub ok: bool,
    pub error: Option<String>,
}

impl TraceEvent {
    pub fn now(step: u64, command: &DriverCommand) -> Self {
        Self {
            timestamp_ms: SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_millis())
                .unwrap_or_default(),
            step,
            command: command.name().to_string(),
            target: command.target().map(str::to_string),
            ok: true,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl ToString) -> Self {
        self.ok = false;
        self.error = Some(error.to_string());
        self
    }
}
