//! Append-only intent log.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use pinchpoint_common::error::{PinchpointError, PinchpointResult};
use pinchpoint_gesture_model::TimedIntent;

pub const INTENT_LOG_SCHEMA_VERSION: &str = "1.0";

/// Metadata written as the first (`#`-prefixed) line of an intent log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentLogHeader {
    pub schema_version: String,

    /// Wall-clock time the session started (RFC 3339).
    pub started_at: String,

    /// Name of the landmark source that drove the session.
    pub source: String,

    pub screen_width: u32,
    pub screen_height: u32,
}

/// Writes timed intents to a JSONL file.
pub struct IntentWriter {
    writer: BufWriter<File>,
    intents_written: u64,
}

impl IntentWriter {
    /// Create a new intent log, writing the header as the first line.
    pub fn new(path: impl AsRef<Path>, header: &IntentLogHeader) -> PinchpointResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;

        let mut writer = BufWriter::new(file);
        let header_json = serde_json::to_string(header)?;
        writeln!(writer, "# {header_json}")
            .map_err(|e| PinchpointError::sink(format!("Failed to write intent log header: {e}")))?;

        Ok(Self {
            writer,
            intents_written: 0,
        })
    }

    pub fn write_intent(&mut self, intent: &TimedIntent) -> PinchpointResult<()> {
        let json = serde_json::to_string(intent)?;
        writeln!(self.writer, "{json}")
            .map_err(|e| PinchpointError::sink(format!("Failed to write intent: {e}")))?;
        self.intents_written += 1;

        if self.intents_written % 1000 == 0 {
            self.flush()?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> PinchpointResult<()> {
        self.writer
            .flush()
            .map_err(|e| PinchpointError::sink(format!("Failed to flush intent log: {e}")))
    }

    pub fn intents_written(&self) -> u64 {
        self.intents_written
    }
}

impl Drop for IntentWriter {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

/// Read an intent log back, skipping the header.
pub fn read_intents(content: &str) -> Result<Vec<TimedIntent>, serde_json::Error> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(serde_json::from_str)
        .collect()
}
