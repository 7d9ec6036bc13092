// PidLog - core/export.rs
//
// CSV and JSON export of the current view.
// Core layer: writes to any Write trait object.

use crate::core::model::LogRecord;
use crate::core::view::ViewModel;
use crate::util::constants;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Column names of a CSV export, matching `LogRecord`'s serde names.
const CSV_HEADER: [&str; 5] = ["#Date", "time_t", "temperature", "SV", "MV"];

/// Export display rows to CSV.
///
/// Writes: #Date, time_t, temperature, SV, MV (the viewer's own header
/// dialect), rows in the order given.
pub fn export_csv<W: Write>(
    rows: &[LogRecord],
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    if rows.len() > constants::MAX_EXPORT_ROWS {
        return Err(ExportError::TooManyRows {
            count: rows.len(),
            max: constants::MAX_EXPORT_ROWS,
        });
    }

    let csv_err = |e: csv::Error| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };

    // Header is written explicitly so an empty selection still yields one.
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv_writer.write_record(CSV_HEADER).map_err(csv_err)?;
    for row in rows {
        csv_writer.serialize(row).map_err(csv_err)?;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(path = %export_path.display(), rows = rows.len(), "Exported CSV");
    Ok(rows.len())
}

/// Export the whole view model as pretty-printed JSON.
pub fn export_json<W: Write>(
    view: &ViewModel,
    writer: W,
    export_path: &Path,
) -> Result<usize, ExportError> {
    if view.display_table.len() > constants::MAX_EXPORT_ROWS {
        return Err(ExportError::TooManyRows {
            count: view.display_table.len(),
            max: constants::MAX_EXPORT_ROWS,
        });
    }
    serde_json::to_writer_pretty(writer, view).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(
        path = %export_path.display(),
        rows = view.display_table.len(),
        "Exported JSON"
    );
    Ok(view.display_table.len())
}
