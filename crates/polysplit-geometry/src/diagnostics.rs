//! Batch diagnostics: timing and counts for a split or sample run.
//!
//! Every `*_with_diagnostics` entry point in [`batch`](crate::batch)
//! returns a [`BatchDiagnostics`] alongside its results. The library
//! never reads the system clock itself; callers supply a [`Clock`].
//!
//! Durations are serialized as fractional seconds (`f64`) for JSON
//! compatibility, since `std::time::Duration` does not implement serde
//! traits.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Serde support for `std::time::Duration` as fractional seconds.
mod duration_serde {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    /// Serialize a `Duration` as fractional seconds (`f64`).
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        duration.as_secs_f64().serialize(serializer)
    }

    /// Deserialize a `Duration` from fractional seconds (`f64`).
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(|_| {
            serde::de::Error::custom(
                "duration seconds must be finite, non-negative, and representable as a Duration",
            )
        })
    }
}

/// Source of monotonic timestamps.
pub trait Clock {
    /// Opaque timestamp type.
    type Instant;

    /// Capture the current time.
    fn now(&self) -> Self::Instant;

    /// Time elapsed since `since`.
    fn elapsed(&self, since: &Self::Instant) -> Duration;
}

/// A clock that never advances. Useful in tests and when timing is not
/// wanted.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClock;

impl Clock for NoClock {
    type Instant = ();

    fn now(&self) -> Self::Instant {}

    fn elapsed(&self, _since: &()) -> Duration {
        Duration::ZERO
    }
}

/// Which batch operation produced a set of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Split polylines at candidate points.
    Split,
    /// Resample polylines at even spacing.
    Sample,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Split => f.write_str("split"),
            Self::Sample => f.write_str("sample"),
        }
    }
}

/// Diagnostics collected from a single batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchDiagnostics {
    /// Operation that was run.
    pub operation: Operation,
    /// Number of input polylines.
    pub polyline_count: usize,
    /// Inputs with fewer than 2 distinct points.
    pub degenerate_count: usize,
    /// Split candidates within snap tolerance (split only).
    pub candidates_accepted: usize,
    /// Split candidates discarded as too far away (split only).
    pub candidates_rejected: usize,
    /// Segments (split) or sampled points (sample) produced.
    pub output_items: usize,
    /// Total points across all outputs.
    pub output_points: usize,
    /// Wall-clock duration of the run (seconds).
    #[serde(with = "duration_serde")]
    pub duration: Duration,
}

impl BatchDiagnostics {
    /// Empty diagnostics for `operation` over `polyline_count` inputs.
    #[must_use]
    pub const fn new(operation: Operation, polyline_count: usize) -> Self {
        Self {
            operation,
            polyline_count,
            degenerate_count: 0,
            candidates_accepted: 0,
            candidates_rejected: 0,
            output_items: 0,
            output_points: 0,
            duration: Duration::ZERO,
        }
    }

    /// Format diagnostics as a human-readable report.
    #[must_use]
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Batch Diagnostics Report\n{}", "=".repeat(60)));
        lines.push(format!("Operation: {}", self.operation));
        lines.push(format!(
            "Total duration: {:.3}ms",
            duration_ms(self.duration)
        ));
        lines.push(String::new());

        lines.push(format!(
            "Polylines: {} ({} degenerate)",
            self.polyline_count, self.degenerate_count,
        ));
        if self.operation == Operation::Split {
            let total = self.candidates_accepted + self.candidates_rejected;
            #[allow(clippy::cast_precision_loss)]
            let pct = if total > 0 {
                self.candidates_accepted as f64 / total as f64 * 100.0
            } else {
                0.0
            };
            lines.push(format!(
                "Candidates: {} accepted, {} rejected ({pct:.1}% snapped)",
                self.candidates_accepted, self.candidates_rejected,
            ));
            lines.push(format!(
                "Segments: {}  |  Points: {}",
                self.output_items, self.output_points,
            ));
        } else {
            lines.push(format!("Samples: {}", self.output_points));
        }

        lines.join("\n")
    }
}

/// Convert a `Duration` to milliseconds as `f64`.
fn duration_ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}
