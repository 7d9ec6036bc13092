// PidLog - app/headless.rs
//
// Non-interactive mode: load, select, render once, print JSON.

use crate::app::source::load_log;
use crate::core::range::RangeSelector;
use crate::core::timebase::TimeBase;
use crate::core::view;
use crate::util::error::{LogViewError, Result};
use std::io::Write;
use std::path::Path;

/// Render one selection of `path` and write it to `out` as JSON.
///
/// `start`/`end` default to the slider bounds and are clamped into them.
/// A header-only log prints a view with no bounds and an empty selection.
pub fn run<W: Write>(
    path: &Path,
    time_base: TimeBase,
    start: Option<i64>,
    end: Option<i64>,
    mut out: W,
) -> Result<()> {
    let log = load_log(path)?;

    let report = if log.is_empty() {
        tracing::warn!(path = %path.display(), "Log contains no records");
        serde_json::json!({
            "source": path.display().to_string(),
            "records": 0,
            "bounds": null,
            "selection": [],
            "latest_temperature_label": crate::util::constants::NO_DATA_LABEL,
            "view": null,
        })
    } else {
        let selector = RangeSelector::from_log(&log, time_base)?;
        let (t_min, t_max) = selector.bounds();
        let range = selector.select(start.unwrap_or(t_min), end.unwrap_or(t_max));
        let view = view::render(&log, range);
        serde_json::json!({
            "source": path.display().to_string(),
            "records": log.len(),
            "bounds": { "start": t_min, "end": t_max },
            "selection": selector.selection_table(range),
            "latest_temperature_label": view.latest_temperature_label(),
            "view": view,
        })
    };

    let io_err = |e: std::io::Error| LogViewError::Io {
        path: path.to_path_buf(),
        operation: "write report",
        source: e,
    };
    serde_json::to_writer_pretty(&mut out, &report).map_err(|e| io_err(e.into()))?;
    writeln!(out).map_err(io_err)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::timebase::ConversionZone;
    use chrono::FixedOffset;

    #[test]
    fn test_headless_clamps_and_prints_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.dat");
        std::fs::write(
            &path,
            "#Date\ttime_t\ttemperature\tSV\tMV\n\
             01-01 00:00:00\t1672531200\t20.0\t25\t50\n\
             01-01 00:01:00\t1672531260\t21.0\t25\t45\n",
        )
        .unwrap();
        let base = TimeBase::new(
            2023,
            ConversionZone::Fixed(FixedOffset::east_opt(0).unwrap()),
            0,
        );

        let mut out = Vec::new();
        run(&path, base, Some(1_672_531_230), Some(i64::MAX), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();

        assert_eq!(value["records"], 2);
        assert_eq!(value["view"]["range"]["start"], 1_672_531_230i64);
        assert_eq!(value["view"]["range"]["end"], 1_672_531_260i64);
        assert_eq!(value["latest_temperature_label"], "21.0");
        assert_eq!(value["selection"][1]["label"], "01/01 00:01");
    }

    #[test]
    fn test_headless_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.dat");
        std::fs::write(&path, "#Date\ttime_t\ttemperature\tSV\tMV\n").unwrap();
        let mut out = Vec::new();
        run(&path, TimeBase::default(), None, None, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["records"], 0);
        assert!(value["view"].is_null());
        assert_eq!(value["latest_temperature_label"], "None");
    }
}
