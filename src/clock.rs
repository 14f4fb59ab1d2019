use chrono::{DateTime, Utc};

/// Source of wall-clock readings for duration and timestamp fields.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Reads the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Milliseconds between two readings with microsecond precision.
/// A clock that stepped backwards gives 0.
pub fn elapsed_ms(started: DateTime<Utc>, finished: DateTime<Utc>) -> f64 {
    match (finished - started).num_microseconds() {
        Some(micros) if micros > 0 => micros as f64 / 1000.0,
        Some(_) => 0.0,
        // only overflows after ~292k years
        None => f64::MAX,
    }
}
