// PidLog - app/state.rs
//
// Application state management. Holds the open log source, the range
// selector, the current selection and the view derived from it.
// Owned by the eframe::App implementation.
//
// Every interaction funnels through `set_range`/`open`/`reload`, and each
// of those rebuilds the view from scratch via `core::view::render`.

use crate::app::source::LogSource;
use crate::core::model::TimeRange;
use crate::core::range::RangeSelector;
use crate::core::timebase::TimeBase;
use crate::core::view::{self, ViewModel};
use std::path::PathBuf;

/// Top-level application state.
#[derive(Debug)]
pub struct AppState {
    /// Timestamp derivation parameters (config + CLI).
    pub time_base: TimeBase,

    /// The open log, if any.
    pub source: Option<LogSource>,

    /// Slider bounds for the open log.
    pub selector: Option<RangeSelector>,

    /// Current slider value.
    pub range: Option<TimeRange>,

    /// View for `range`, rebuilt on every change.
    pub view: Option<ViewModel>,

    /// Fatal load error for the most recent open/reload attempt.
    pub load_error: Option<String>,

    /// Status message for the status bar.
    pub status_message: String,

    /// Non-fatal warnings (config problems, failed background reloads).
    pub warnings: Vec<String>,

    /// Whether to show the About dialog.
    pub show_about: bool,

    /// Whether to show the warnings window.
    pub show_warnings: bool,

    /// Dark (true) or light (false) visuals.
    pub dark_mode: bool,

    /// Body font size in points.
    pub ui_font_size: f32,

    /// Automatic reload interval; `None` disables polling.
    pub reload_poll_ms: Option<u64>,

    /// Path chosen from a menu, opened at the start of the next frame.
    pub pending_open: Option<PathBuf>,

    /// Whether debug mode is enabled.
    pub debug_mode: bool,
}

impl AppState {
    /// Create initial state with no file open.
    pub fn new(time_base: TimeBase, debug_mode: bool) -> Self {
        Self {
            time_base,
            source: None,
            selector: None,
            range: None,
            view: None,
            load_error: None,
            status_message: "Ready. Open a controller log to begin.".to_string(),
            warnings: Vec::new(),
            show_about: false,
            show_warnings: false,
            dark_mode: true,
            ui_font_size: crate::util::constants::DEFAULT_FONT_SIZE,
            reload_poll_ms: None,
            pending_open: None,
            debug_mode,
        }
    }

    /// Open a log file, replacing whatever was open.
    ///
    /// Returns false (and records `load_error`) on failure. The previous
    /// source is dropped either way.
    pub fn open(&mut self, path: PathBuf) -> bool {
        self.source = None;
        self.selector = None;
        self.range = None;
        self.view = None;

        match LogSource::open(&path) {
            Ok(source) => {
                self.source = Some(source);
                self.load_error = None;
                self.refresh_selector(None);
                true
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "Failed to load log");
                self.status_message = format!("Failed to load '{}'.", path.display());
                self.load_error = Some(e.to_string());
                false
            }
        }
    }

    /// Re-read the open file now.
    pub fn reload(&mut self) {
        let Some(source) = self.source.as_mut() else {
            return;
        };
        match source.reload() {
            Ok(()) => {
                self.load_error = None;
                let previous = self.previous_selection();
                self.refresh_selector(previous);
            }
            Err(e) => self.reload_failed(e.to_string()),
        }
    }

    /// Reload if the file changed on disk. Returns true if the view changed.
    pub fn poll_source(&mut self) -> bool {
        let Some(source) = self.source.as_mut() else {
            return false;
        };
        match source.reload_if_changed() {
            Ok(false) => false,
            Ok(true) => {
                self.load_error = None;
                let previous = self.previous_selection();
                self.refresh_selector(previous);
                true
            }
            Err(e) => {
                self.reload_failed(e.to_string());
                true
            }
        }
    }

    /// Apply a new slider value and rebuild the view.
    pub fn set_range(&mut self, start: i64, end: i64) {
        let Some(selector) = self.selector else {
            return;
        };
        let range = selector.select(start, end);
        if self.range == Some(range) {
            return;
        }
        self.range = Some(range);
        self.rebuild_view();
    }

    /// Reset the slider to the whole log.
    pub fn reset_range(&mut self) {
        if let Some(selector) = self.selector {
            self.range = Some(selector.default_range());
            self.rebuild_view();
        }
    }

    /// `(start_label, end_label)` for the current selection.
    pub fn range_labels(&self) -> Option<(String, String)> {
        let selector = self.selector?;
        let range = self.range?;
        Some(selector.labels(range))
    }

    pub fn record_count(&self) -> usize {
        self.source.as_ref().map_or(0, |s| s.data().len())
    }

    pub fn push_warning(&mut self, warning: String) {
        tracing::warn!(warning = %warning, "Warning recorded");
        self.warnings.push(warning);
    }

    fn previous_selection(&self) -> Option<(TimeRange, i64)> {
        let range = self.range?;
        let (_, previous_max) = self.selector?.bounds();
        Some((range, previous_max))
    }

    /// Recompute slider bounds after the data changed, carrying the previous
    /// selection over when there was one.
    fn refresh_selector(&mut self, previous: Option<(TimeRange, i64)>) {
        let Some(source) = self.source.as_ref() else {
            return;
        };
        let data = source.data();

        if data.is_empty() {
            self.selector = None;
            self.range = None;
            self.view = None;
            self.status_message = format!("'{}' contains no records.", source.path().display());
            return;
        }

        match RangeSelector::from_log(data, self.time_base) {
            Ok(selector) => {
                let range = match previous {
                    Some((range, previous_max)) => selector.carry_over(range, previous_max),
                    None => selector.default_range(),
                };
                self.status_message = format!(
                    "Loaded {} records from '{}'.",
                    data.len(),
                    source.path().display()
                );
                self.selector = Some(selector);
                self.range = Some(range);
                self.rebuild_view();
            }
            Err(e) => {
                tracing::error!(error = %e, "Cannot derive slider bounds");
                self.selector = None;
                self.range = None;
                self.view = None;
                self.load_error = Some(e.to_string());
                self.status_message = "Log timestamps could not be read.".to_string();
            }
        }
    }

    fn rebuild_view(&mut self) {
        let (Some(source), Some(range)) = (self.source.as_ref(), self.range) else {
            self.view = None;
            return;
        };
        self.view = Some(view::render(source.data(), range));
    }

    fn reload_failed(&mut self, message: String) {
        // Keep showing the last good contents.
        self.status_message = "Reload failed; showing previous contents.".to_string();
        self.push_warning(format!("Reload failed: {message}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timebase::ConversionZone;
    use chrono::FixedOffset;
    use std::io::Write;

    fn utc_base() -> TimeBase {
        TimeBase::new(2023, ConversionZone::Fixed(FixedOffset::east_opt(0).unwrap()), 0)
    }

    fn write_fixture(dir: &tempfile::TempDir, rows: &[&str]) -> PathBuf {
        let path = dir.path().join("log.dat");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "#Date\ttime_t\ttemperature\tSV\tMV").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        path
    }

    // Wall clock and epoch agree when the zone is UTC and the offset is 0.
    const ROWS: &[&str] = &[
        "01-01 00:00:00\t1672531200\t20.0\t25\t50",
        "01-01 00:01:00\t1672531260\t21.0\t25\t45",
        "01-01 00:02:00\t1672531320\t22.0\t25\t40",
    ];

    #[test]
    fn test_open_builds_full_range_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(utc_base(), false);
        assert!(state.open(write_fixture(&dir, ROWS)));
        assert_eq!(state.range, Some(TimeRange::new(1_672_531_200, 1_672_531_320)));
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.filtered.len(), 3);
        assert_eq!(view.latest_temperature, Some(22.0));
        assert_eq!(
            state.range_labels(),
            Some(("01/01 00:00".to_string(), "01/01 00:02".to_string()))
        );
    }

    #[test]
    fn test_set_range_rebuilds_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(utc_base(), false);
        state.open(write_fixture(&dir, ROWS));
        state.set_range(1_672_531_230, 9_999_999_999);
        let view = state.view.as_ref().unwrap();
        assert_eq!(view.range.end(), 1_672_531_320);
        assert_eq!(view.filtered.len(), 2);

        state.reset_range();
        assert_eq!(state.view.as_ref().unwrap().filtered.len(), 3);
    }

    #[test]
    fn test_open_failure_records_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(utc_base(), false);
        assert!(!state.open(dir.path().join("missing.dat")));
        assert!(state.load_error.is_some());
        assert!(state.view.is_none());
    }

    #[test]
    fn test_header_only_log_has_no_view() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(utc_base(), false);
        assert!(state.open(write_fixture(&dir, &[])));
        assert!(state.selector.is_none());
        assert!(state.view.is_none());
        assert!(state.load_error.is_none());
    }

    #[test]
    fn test_reload_keeps_interior_selection() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, ROWS);
        let mut state = AppState::new(utc_base(), false);
        state.open(path.clone());
        state.set_range(1_672_531_200, 1_672_531_260);

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "01-01 00:03:00\t1672531380\t23.0\t25\t35").unwrap();
        drop(file);

        state.reload();
        assert_eq!(state.record_count(), 4);
        assert_eq!(state.range, Some(TimeRange::new(1_672_531_200, 1_672_531_260)));
    }

    fn touch_later(path: &std::path::Path, secs: u64) {
        let file = std::fs::OpenOptions::new().append(true).open(path).unwrap();
        file.set_modified(std::time::SystemTime::now() + std::time::Duration::from_secs(secs))
            .unwrap();
    }

    #[test]
    fn test_poll_broken_file_warns_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, ROWS);
        let mut state = AppState::new(utc_base(), false);
        state.open(path.clone());

        std::fs::write(
            &path,
            "#Date\ttime_t\ttemperature\tSV\tMV\n01-01 00:00:00\tbad\t20.0\t25\t50\n",
        )
        .unwrap();
        touch_later(&path, 10);

        assert!(state.poll_source());
        for _ in 0..4 {
            assert!(!state.poll_source());
        }
        assert_eq!(state.warnings.len(), 1);
        assert_eq!(state.record_count(), 3);
        assert_eq!(state.view.as_ref().unwrap().filtered.len(), 3);
    }

    #[test]
    fn test_poll_deleted_file_warns_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, ROWS);
        let mut state = AppState::new(utc_base(), false);
        state.open(path.clone());

        std::fs::remove_file(&path).unwrap();
        for _ in 0..5 {
            state.poll_source();
        }
        assert_eq!(state.warnings.len(), 1);
        assert_eq!(state.record_count(), 3);
    }

    #[test]
    fn test_poll_picks_up_appended_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, ROWS);
        let mut state = AppState::new(utc_base(), false);
        state.open(path.clone());
        assert!(!state.poll_source());

        let mut file = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "01-01 00:03:00\t1672531380\t23.0\t25\t35").unwrap();
        drop(file);
        touch_later(&path, 10);

        assert!(state.poll_source());
        assert_eq!(state.record_count(), 4);
        assert_eq!(state.range.map(|r| r.end()), Some(1_672_531_380));
        assert!(state.warnings.is_empty());
    }
}
