// PidLog - core/range.rs
//
// Range selector: slider bounds, clamping, and the start/end labels.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{LogData, TimeRange};
use crate::core::timebase::TimeBase;
use crate::util::error::TimestampError;
use serde::Serialize;

/// One row of the two-row selection table shown under the slider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionRow {
    /// `start` or `end`.
    pub name: &'static str,
    /// `MM/DD HH:MM`.
    pub label: String,
}

/// Bounds of the range slider for one loaded log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeSelector {
    t_min: i64,
    t_max: i64,
    time_base: TimeBase,
}

impl RangeSelector {
    /// Derive bounds from the first and last records' wall-clock strings.
    ///
    /// The log's own epoch column is deliberately not used here; see
    /// `core::timebase`.
    pub fn from_log(log: &LogData, time_base: TimeBase) -> Result<Self, TimestampError> {
        let first = log.first().ok_or(TimestampError::EmptyLog)?;
        let last = log.last().ok_or(TimestampError::EmptyLog)?;

        let start = time_base.wall_to_epoch(&first.wall_clock)?;
        let end = time_base.wall_to_epoch(&last.wall_clock)?;

        if start > end {
            // Year wrap or an unordered file; keep the slider usable.
            tracing::warn!(
                first = %first.wall_clock,
                last = %last.wall_clock,
                "Last wall-clock timestamp precedes the first; swapping slider bounds"
            );
        }
        let selector = Self::from_bounds(start, end, time_base);

        tracing::debug!(
            t_min = selector.t_min,
            t_max = selector.t_max,
            zone = %time_base.zone,
            "Range selector bounds"
        );
        Ok(selector)
    }

    /// Construct directly from bounds (ordered if necessary).
    pub fn from_bounds(a: i64, b: i64, time_base: TimeBase) -> Self {
        let range = TimeRange::new(a, b);
        Self {
            t_min: range.start(),
            t_max: range.end(),
            time_base,
        }
    }

    pub fn bounds(&self) -> (i64, i64) {
        (self.t_min, self.t_max)
    }

    pub fn time_base(&self) -> &TimeBase {
        &self.time_base
    }

    /// The whole log: `(t_min, t_max)`.
    pub fn default_range(&self) -> TimeRange {
        TimeRange::new(self.t_min, self.t_max)
    }

    /// Clamp both ends into the bounds and order them.
    pub fn select(&self, start: i64, end: i64) -> TimeRange {
        TimeRange::new(self.clamp(start), self.clamp(end))
    }

    /// Clamp a previous selection into these bounds.
    ///
    /// An end pinned to the previous maximum follows the new maximum so a
    /// growing log keeps showing its newest rows after a reload.
    pub fn carry_over(&self, previous: TimeRange, previous_max: i64) -> TimeRange {
        let end = if previous.end() >= previous_max {
            self.t_max
        } else {
            previous.end()
        };
        self.select(previous.start(), end)
    }

    pub fn clamp(&self, epoch: i64) -> i64 {
        epoch.clamp(self.t_min, self.t_max)
    }

    /// `MM/DD HH:MM` labels for the range's start and end.
    pub fn labels(&self, range: TimeRange) -> (String, String) {
        (
            self.time_base.label(range.start()),
            self.time_base.label(range.end()),
        )
    }

    pub fn selection_table(&self, range: TimeRange) -> [SelectionRow; 2] {
        let (start, end) = self.labels(range);
        [
            SelectionRow {
                name: "start",
                label: start,
            },
            SelectionRow {
                name: "end",
                label: end,
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::LogRecord;
    use crate::core::timebase::ConversionZone;
    use chrono::FixedOffset;

    fn utc_base() -> TimeBase {
        TimeBase::new(2023, ConversionZone::Fixed(FixedOffset::east_opt(0).unwrap()), 9)
    }

    fn record(wall_clock: &str, epoch: i64) -> LogRecord {
        LogRecord {
            line_number: 0,
            wall_clock: wall_clock.to_string(),
            epoch,
            temperature: 20.0,
            sv: 25.0,
            mv: 50.0,
        }
    }

    #[test]
    fn test_bounds_from_wall_clock_with_offset() {
        let log = LogData::new(
            "t.dat",
            vec![
                record("05-12 13:45:10", 0),
                record("05-12 13:45:20", 0),
                record("05-12 14:00:00", 0),
            ],
        );
        let sel = RangeSelector::from_log(&log, utc_base()).unwrap();
        let base = 1_683_899_110 - 9 * 3_600;
        assert_eq!(sel.bounds(), (base, base + 14 * 60 + 50));
        assert_eq!(sel.default_range(), TimeRange::new(base, base + 890));
    }

    #[test]
    fn test_unordered_wall_clock_bounds_are_swapped() {
        let log = LogData::new(
            "t.dat",
            vec![record("05-12 14:00:00", 0), record("05-12 13:45:10", 0)],
        );
        let sel = RangeSelector::from_log(&log, utc_base()).unwrap();
        let base = 1_683_899_110 - 9 * 3_600;
        assert_eq!(sel.bounds(), (base, base + 890));
    }

    #[test]
    fn test_empty_log_has_no_bounds() {
        let log = LogData::new("t.dat", Vec::new());
        assert!(matches!(
            RangeSelector::from_log(&log, utc_base()),
            Err(TimestampError::EmptyLog)
        ));
    }

    #[test]
    fn test_select_clamps_and_orders() {
        let sel = RangeSelector::from_bounds(100, 300, utc_base());
        assert_eq!(sel.select(50, 400), TimeRange::new(100, 300));
        assert_eq!(sel.select(250, 150), TimeRange::new(150, 250));
        assert_eq!(sel.select(350, 350), TimeRange::new(300, 300));
    }

    #[test]
    fn test_carry_over_follows_growing_end() {
        let old = RangeSelector::from_bounds(100, 300, utc_base());
        let new = RangeSelector::from_bounds(100, 400, utc_base());
        let pinned = old.select(150, 300);
        assert_eq!(new.carry_over(pinned, old.bounds().1), TimeRange::new(150, 400));
        let interior = old.select(150, 250);
        assert_eq!(new.carry_over(interior, old.bounds().1), TimeRange::new(150, 250));
    }

    #[test]
    fn test_selection_table_labels() {
        let base = utc_base();
        let start = base.wall_to_epoch("05-12 13:45:10").unwrap();
        let end = base.wall_to_epoch("05-13 01:02:03").unwrap();
        let sel = RangeSelector::from_bounds(start, end, base);
        let table = sel.selection_table(sel.default_range());
        assert_eq!(table[0].name, "start");
        assert_eq!(table[0].label, "05/12 13:45");
        assert_eq!(table[1].name, "end");
        assert_eq!(table[1].label, "05/13 01:02");
    }
}
