// PidLog - core/view.rs
//
// View builder: everything the presentation layer draws for one selection.
//
// `render` is re-run from scratch on every interaction. It never fails: an
// empty selection yields an empty chart, an empty table and no latest value.
// Core layer: pure logic, no I/O or UI dependencies.

use crate::core::model::{LogData, LogRecord, TimeRange};
use crate::util::constants;
use serde::Serialize;

/// Derived view of one time range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub range: TimeRange,

    /// Records inside the range, in file order.
    pub filtered: Vec<LogRecord>,

    /// Temperature of the last filtered record; `None` when nothing matched.
    pub latest_temperature: Option<f64>,

    /// `filtered`, rounded to one decimal and newest-first.
    pub display_table: Vec<LogRecord>,

    pub chart: ChartSeries,

    /// `None` when nothing matched.
    pub summary: Option<SelectionSummary>,
}

impl ViewModel {
    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Header text for the latest temperature, `None` for an empty selection.
    /// Whole numbers keep their `.0`.
    pub fn latest_temperature_label(&self) -> String {
        match self.latest_temperature {
            Some(t) => format!("{t:?}"),
            None => constants::NO_DATA_LABEL.to_string(),
        }
    }
}

/// Build the view for `range` over `log`.
pub fn render(log: &LogData, range: TimeRange) -> ViewModel {
    let filtered: Vec<LogRecord> = log
        .records()
        .iter()
        .filter(|r| range.contains(r.epoch))
        .cloned()
        .collect();

    let latest_temperature = filtered.last().map(|r| r.temperature);

    let display_table: Vec<LogRecord> = filtered
        .iter()
        .rev()
        .map(|r| r.rounded(constants::DISPLAY_DECIMALS))
        .collect();

    let chart = ChartSeries::from_records(&filtered);
    let summary = SelectionSummary::from_records(&filtered);

    tracing::debug!(
        start = range.start(),
        end = range.end(),
        total = log.len(),
        matched = filtered.len(),
        "Rendered view"
    );

    ViewModel {
        range,
        filtered,
        latest_temperature,
        display_table,
        chart,
        summary,
    }
}

// =============================================================================
// Chart series
// =============================================================================

/// Three aligned series sharing one time axis.
///
/// Temperature and SV share the primary (left) axis; MV is drawn against a
/// secondary (right) axis.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub timestamps: Vec<i64>,
    pub temperature: Vec<f64>,
    pub sv: Vec<f64>,
    pub mv: Vec<f64>,
}

impl ChartSeries {
    pub fn from_records(records: &[LogRecord]) -> Self {
        let mut series = Self {
            timestamps: Vec::with_capacity(records.len()),
            temperature: Vec::with_capacity(records.len()),
            sv: Vec::with_capacity(records.len()),
            mv: Vec::with_capacity(records.len()),
        };
        for r in records {
            series.timestamps.push(r.epoch);
            series.temperature.push(r.temperature);
            series.sv.push(r.sv);
            series.mv.push(r.mv);
        }
        series
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Extent of temperature and SV together.
    pub fn primary_extent(&self) -> Option<(f64, f64)> {
        extent(self.temperature.iter().chain(self.sv.iter()).copied())
    }

    /// Extent of MV.
    pub fn secondary_extent(&self) -> Option<(f64, f64)> {
        extent(self.mv.iter().copied())
    }

    /// Mapping that draws MV inside the primary axis' extent.
    pub fn secondary_axis(&self) -> AxisMapping {
        match (self.primary_extent(), self.secondary_extent()) {
            (Some(primary), Some(secondary)) => AxisMapping::between(secondary, primary),
            _ => AxisMapping::IDENTITY,
        }
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Linear map `primary = secondary * scale + offset`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AxisMapping {
    pub scale: f64,
    pub offset: f64,
}

impl AxisMapping {
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        offset: 0.0,
    };

    /// Map the `from` extent onto the `to` extent. Flat extents are widened
    /// by one unit each side so the mapping stays invertible.
    pub fn between(from: (f64, f64), to: (f64, f64)) -> Self {
        let (from_lo, from_hi) = widen(from);
        let (to_lo, to_hi) = widen(to);
        let scale = (to_hi - to_lo) / (from_hi - from_lo);
        Self {
            scale,
            offset: to_lo - from_lo * scale,
        }
    }

    /// Secondary-axis value to primary-axis coordinate.
    pub fn forward(&self, secondary: f64) -> f64 {
        secondary * self.scale + self.offset
    }

    /// Primary-axis coordinate back to a secondary-axis value.
    pub fn inverse(&self, primary: f64) -> f64 {
        (primary - self.offset) / self.scale
    }
}

fn widen((lo, hi): (f64, f64)) -> (f64, f64) {
    if hi - lo > f64::EPSILON {
        (lo, hi)
    } else {
        (lo - 1.0, hi + 1.0)
    }
}

// =============================================================================
// Selection summary
// =============================================================================

/// Statistics over the filtered records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionSummary {
    pub count: usize,
    /// Seconds between the first and last filtered record.
    pub span_secs: i64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub temperature_mean: f64,
    pub mv_min: f64,
    pub mv_max: f64,
}

impl SelectionSummary {
    pub fn from_records(records: &[LogRecord]) -> Option<Self> {
        let first = records.first()?;
        let last = records.last()?;

        let mut temperature_min = f64::INFINITY;
        let mut temperature_max = f64::NEG_INFINITY;
        let mut temperature_sum = 0.0;
        let mut mv_min = f64::INFINITY;
        let mut mv_max = f64::NEG_INFINITY;
        for r in records {
            temperature_min = temperature_min.min(r.temperature);
            temperature_max = temperature_max.max(r.temperature);
            temperature_sum += r.temperature;
            mv_min = mv_min.min(r.mv);
            mv_max = mv_max.max(r.mv);
        }

        Some(Self {
            count: records.len(),
            span_secs: TimeRange::new(first.epoch, last.epoch).span_secs(),
            temperature_min,
            temperature_max,
            temperature_mean: temperature_sum / records.len() as f64,
            mv_min,
            mv_max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(epoch: i64, temperature: f64, sv: f64, mv: f64) -> LogRecord {
        LogRecord {
            line_number: 0,
            wall_clock: format!("01-01 00:00:{:02}", epoch % 60),
            epoch,
            temperature,
            sv,
            mv,
        }
    }

    fn three_rows() -> LogData {
        LogData::new(
            "t.dat",
            vec![
                record(100, 20.05, 25.0, 10.0),
                record(200, 21.15, 25.0, 30.0),
                record(300, 22.25, 25.0, 20.0),
            ],
        )
    }

    #[test]
    fn test_render_selects_inclusive_slice() {
        let log = three_rows();
        let view = render(&log, TimeRange::new(150, 300));
        assert_eq!(view.filtered, log.records()[1..].to_vec());
        assert_eq!(view.latest_temperature, Some(22.25));
        assert_eq!(view.display_table.len(), 2);
        assert_eq!(view.display_table[0].epoch, 300);
        assert_eq!(view.display_table[0].temperature, 22.3);
        assert_eq!(view.display_table[1].epoch, 200);
    }

    #[test]
    fn test_full_range_returns_whole_log() {
        let log = three_rows();
        let view = render(&log, TimeRange::new(100, 300));
        assert_eq!(view.filtered, log.records().to_vec());
    }

    #[test]
    fn test_point_range_without_match_is_empty() {
        let view = render(&three_rows(), TimeRange::new(250, 250));
        assert!(view.is_empty());
        assert_eq!(view.latest_temperature, None);
        assert_eq!(view.latest_temperature_label(), "None");
        assert!(view.display_table.is_empty());
        assert!(view.chart.is_empty());
        assert!(view.summary.is_none());
    }

    #[test]
    fn test_point_range_with_match() {
        let view = render(&three_rows(), TimeRange::new(200, 200));
        assert_eq!(view.filtered.len(), 1);
        assert_eq!(view.latest_temperature_label(), "21.15");
    }

    #[test]
    fn test_display_table_is_reversed_rounded_filtered() {
        let log = three_rows();
        let view = render(&log, TimeRange::new(0, 1_000));
        let expected: Vec<LogRecord> = view.filtered.iter().rev().map(|r| r.rounded(1)).collect();
        assert_eq!(view.display_table, expected);
        assert_eq!(
            view.display_table[0],
            view.filtered[view.filtered.len() - 1].rounded(1)
        );
    }

    #[test]
    fn test_filter_uses_predicate_on_unordered_input() {
        let log = LogData::new(
            "t.dat",
            vec![
                record(100, 1.0, 0.0, 0.0),
                record(500, 2.0, 0.0, 0.0),
                record(200, 3.0, 0.0, 0.0),
            ],
        );
        let view = render(&log, TimeRange::new(100, 300));
        let epochs: Vec<i64> = view.filtered.iter().map(|r| r.epoch).collect();
        assert_eq!(epochs, vec![100, 200]);
    }

    #[test]
    fn test_chart_series_are_aligned() {
        let view = render(&three_rows(), TimeRange::new(0, 1_000));
        let c = &view.chart;
        assert_eq!(c.len(), 3);
        assert_eq!(c.timestamps, vec![100, 200, 300]);
        assert_eq!(c.temperature, vec![20.05, 21.15, 22.25]);
        assert_eq!(c.sv, vec![25.0, 25.0, 25.0]);
        assert_eq!(c.mv, vec![10.0, 30.0, 20.0]);
    }

    #[test]
    fn test_secondary_axis_maps_mv_onto_primary_extent() {
        let view = render(&three_rows(), TimeRange::new(0, 1_000));
        let map = view.chart.secondary_axis();
        // Primary extent is [20.05, 25.0]; MV extent is [10, 30].
        assert!((map.forward(10.0) - 20.05).abs() < 1e-9);
        assert!((map.forward(30.0) - 25.0).abs() < 1e-9);
        assert!((map.inverse(map.forward(17.5)) - 17.5).abs() < 1e-9);
    }

    #[test]
    fn test_flat_extent_mapping_is_invertible() {
        let map = AxisMapping::between((50.0, 50.0), (20.0, 30.0));
        assert!(map.scale.is_finite());
        assert!((map.inverse(map.forward(50.0)) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_chart_uses_identity_mapping() {
        assert_eq!(ChartSeries::default().secondary_axis(), AxisMapping::IDENTITY);
    }

    #[test]
    fn test_summary_statistics() {
        let view = render(&three_rows(), TimeRange::new(0, 1_000));
        let s = view.summary.unwrap();
        assert_eq!(s.count, 3);
        assert_eq!(s.span_secs, 200);
        assert_eq!(s.temperature_min, 20.05);
        assert_eq!(s.temperature_max, 22.25);
        assert!((s.temperature_mean - 21.15).abs() < 1e-9);
        assert_eq!((s.mv_min, s.mv_max), (10.0, 30.0));
    }

    #[test]
    fn test_summary_span_is_non_negative_for_unordered_records() {
        let log = LogData::new(
            "t.dat",
            vec![record(300, 22.0, 25.0, 20.0), record(100, 20.0, 25.0, 10.0)],
        );
        let s = render(&log, TimeRange::new(0, 1_000)).summary.unwrap();
        assert_eq!(s.span_secs, 200);
    }
}
