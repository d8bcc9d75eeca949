//! Publishing per-frame telemetry.
//!
//! The locator never talks to a transport itself. Callers hand each solved
//! frame's [`TelemetryRecord`] to a [`TelemetrySink`]; [`LastKnownGood`]
//! keeps the most recent record around for frames where the target was lost.

use std::io::Write;

use vision_targets_solver::TelemetryRecord;

use crate::locator::FrameReport;

#[derive(thiserror::Error, Debug)]
pub enum TelemetryError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Destination for telemetry records.
pub trait TelemetrySink {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), TelemetryError>;
}

/// In-memory sink; keeps every record in publish order.
impl TelemetrySink for Vec<TelemetryRecord> {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        self.push(*record);
        Ok(())
    }
}

/// Writes one compact JSON object per line and flushes after each record.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Number of records written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for JsonLinesSink<W> {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        serde_json::to_writer(&mut self.writer, record)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }
}

/// Latches the last published record.
///
/// A frame without a solution leaves the latched value untouched, so
/// consumers keep steering toward the last known target position.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LastKnownGood {
    last: Option<TelemetryRecord>,
    frames_since_update: usize,
}

impl LastKnownGood {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update from a frame and return the record to act on.
    pub fn observe(&mut self, report: &FrameReport) -> Option<TelemetryRecord> {
        match report.telemetry() {
            Some(record) => {
                self.last = Some(record);
                self.frames_since_update = 0;
            }
            None => self.frames_since_update += 1,
        }
        self.last
    }

    pub fn last(&self) -> Option<&TelemetryRecord> {
        self.last.as_ref()
    }

    /// Frames observed since the last record was latched.
    pub fn frames_since_update(&self) -> usize {
        self.frames_since_update
    }
}

impl TelemetrySink for LastKnownGood {
    fn publish(&mut self, record: &TelemetryRecord) -> Result<(), TelemetryError> {
        self.last = Some(*record);
        self.frames_since_update = 0;
        Ok(())
    }
}
