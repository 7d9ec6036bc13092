// PidLog - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no platform dependencies.
//
// These types are the shared vocabulary across all layers.

use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Log record (one row of the controller log)
// =============================================================================

/// A single sampling tick from the temperature-controller log.
///
/// Immutable once loaded. `wall_clock` is the yearless `MM-DD HH:MM:SS`
/// string exactly as written; `epoch` is the logger's own epoch-seconds
/// column and is what range filtering compares against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    /// 1-based line number in the source file (the header is line 1).
    #[serde(skip)]
    pub line_number: u64,

    /// Local wall-clock timestamp, `MM-DD HH:MM:SS`.
    #[serde(rename = "#Date")]
    pub wall_clock: String,

    /// Epoch seconds recorded alongside the wall-clock string.
    #[serde(rename = "time_t")]
    pub epoch: i64,

    /// Process temperature reading.
    pub temperature: f64,

    /// Setpoint.
    #[serde(rename = "SV")]
    pub sv: f64,

    /// Manipulated-variable output.
    #[serde(rename = "MV")]
    pub mv: f64,
}

impl LogRecord {
    /// Copy of this record with every floating-point field rounded to
    /// `decimals` places (half away from zero). The epoch is already integral.
    pub fn rounded(&self, decimals: i32) -> Self {
        Self {
            line_number: self.line_number,
            wall_clock: self.wall_clock.clone(),
            epoch: self.epoch,
            temperature: round_to(self.temperature, decimals),
            sv: round_to(self.sv, decimals),
            mv: round_to(self.mv, decimals),
        }
    }
}

/// Round `value` to `decimals` decimal places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// =============================================================================
// Loaded log
// =============================================================================

/// The full log: every record in file order, plus where it came from.
#[derive(Debug, Clone, Default)]
pub struct LogData {
    source: PathBuf,
    records: Vec<LogRecord>,
}

impl LogData {
    pub fn new(source: impl Into<PathBuf>, records: Vec<LogRecord>) -> Self {
        Self {
            source: source.into(),
            records,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&LogRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&LogRecord> {
        self.records.last()
    }
}

// =============================================================================
// Time range
// =============================================================================

/// Closed interval of epoch seconds, `start <= end`.
///
/// Only `RangeSelector::select` and `TimeRange::new` construct these, and both
/// order the ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TimeRange {
    start: i64,
    end: i64,
}

impl TimeRange {
    /// Build a range from two ends in either order.
    pub fn new(a: i64, b: i64) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    pub fn start(&self) -> i64 {
        self.start
    }

    pub fn end(&self) -> i64 {
        self.end
    }

    /// Inclusive on both ends.
    pub fn contains(&self, epoch: i64) -> bool {
        self.start <= epoch && epoch <= self.end
    }

    pub fn span_secs(&self) -> i64 {
        self.end - self.start
    }
}
