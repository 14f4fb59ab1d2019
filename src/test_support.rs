//! Test doubles for the injected parts of the handler.

use crate::clock::Clock;
use crate::logging::{CompletedEntry, InvocationLog, StartedEntry};
use crate::Error;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

/// Returns `start`, then moves forward by `step` on every reading.
pub(crate) struct StepClock {
    next: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl StepClock {
    pub fn new(start: DateTime<Utc>, step: Duration) -> Self {
        Self {
            next: Mutex::new(start),
            step,
        }
    }

    /// 2024-05-01 12:00:00 UTC, advancing 250ms per reading
    pub fn quarter_second() -> Self {
        Self::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(), Duration::milliseconds(250))
    }
}

impl Clock for StepClock {
    fn now(&self) -> DateTime<Utc> {
        let mut next = self.next.lock().unwrap();
        let reading = *next;
        *next = reading + self.step;
        reading
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Recorded {
    Started(Value),
    Completed(Value),
}

/// Keeps the fields of every entry, as `TracingLog` would write them.
/// Can be switched to fail on `started` or `completed`.
#[derive(Default)]
pub(crate) struct RecordingLog {
    entries: Mutex<Vec<Recorded>>,
    pub fail_started: AtomicBool,
    pub fail_completed: AtomicBool,
}

impl RecordingLog {
    pub fn entries(&self) -> Vec<Recorded> {
        self.entries.lock().unwrap().clone()
    }
}

impl InvocationLog for RecordingLog {
    fn started(&self, entry: &StartedEntry<'_>) -> Result<(), Error> {
        if self.fail_started.load(Ordering::SeqCst) {
            return Err(Error::from("log sink unavailable"));
        }
        self.entries
            .lock()
            .unwrap()
            .push(Recorded::Started(entry.fields()));
        Ok(())
    }

    fn completed(&self, entry: &CompletedEntry<'_>) -> Result<(), Error> {
        if self.fail_completed.load(Ordering::SeqCst) {
            return Err(Error::from("log sink unavailable"));
        }
        self.entries
            .lock()
            .unwrap()
            .push(Recorded::Completed(entry.fields()));
        Ok(())
    }
}

/// In-memory target for a tracing subscriber.
#[derive(Clone, Default)]
pub(crate) struct BufferWriter(Arc<Mutex<Vec<u8>>>);

impl BufferWriter {
    pub fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap().lines().map(str::to_string).collect()
    }
}

impl io::Write for BufferWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for BufferWriter {
    type Writer = BufferWriter;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}
