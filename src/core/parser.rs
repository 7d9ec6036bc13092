// PidLog - core/parser.rs
//
// Tab-separated controller log parser.
//
// Columns are located by header name, not position. Two header dialects are
// in circulation: the viewer's (`#Date time_t temperature SV MV`) and the one
// the controller front end writes (`Date Date_t temp [C] SV [C] Output [%]`).
// Any row that fails to parse fails the whole load; nothing is skipped.
//
// Core layer: reads from any `Read`, never opens files itself.

use crate::core::model::{LogData, LogRecord};
use crate::util::constants;
use crate::util::error::ParseError;
use std::io::Read;
use std::path::Path;

/// Resolved field indices of the required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnMap {
    date: usize,
    epoch: usize,
    temperature: usize,
    sv: usize,
    mv: usize,
}

impl ColumnMap {
    fn resolve(headers: &csv::StringRecord, source: &Path) -> Result<Self, ParseError> {
        let find = |column: &'static str, accepted: &'static [&'static str]| {
            headers
                .iter()
                .position(|h| {
                    let h = h.trim();
                    accepted.iter().any(|name| h.eq_ignore_ascii_case(name))
                })
                .ok_or_else(|| ParseError::MissingColumn {
                    file: source.to_path_buf(),
                    column,
                    accepted,
                })
        };

        Ok(Self {
            date: find("#Date", constants::DATE_COLUMN_NAMES)?,
            epoch: find("time_t", constants::EPOCH_COLUMN_NAMES)?,
            temperature: find("temperature", constants::TEMPERATURE_COLUMN_NAMES)?,
            sv: find("SV", constants::SV_COLUMN_NAMES)?,
            mv: find("MV", constants::MV_COLUMN_NAMES)?,
        })
    }
}

/// Parse a complete tab-separated log.
///
/// `source` is used only for error messages and is stored on the result.
pub fn parse_log<R: Read>(reader: R, source: &Path) -> Result<LogData, ParseError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(constants::LOG_DELIMITER)
        .has_headers(true)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(|e| ParseError::Csv {
        file: source.to_path_buf(),
        source: e,
    })?;
    let columns = ColumnMap::resolve(headers, source)?;

    tracing::debug!(
        file = %source.display(),
        ?columns,
        "Resolved log columns"
    );

    let mut records = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let row = result.map_err(|e| ParseError::Csv {
            file: source.to_path_buf(),
            source: e,
        })?;
        // Header is line 1; fall back to the row index if csv has no position.
        let line_number = row
            .position()
            .map(|p| p.line())
            .unwrap_or(idx as u64 + 2);

        records.push(parse_row(&row, &columns, line_number, source)?);
    }

    tracing::info!(
        file = %source.display(),
        records = records.len(),
        "Parsed controller log"
    );

    Ok(LogData::new(source, records))
}

fn parse_row(
    row: &csv::StringRecord,
    columns: &ColumnMap,
    line_number: u64,
    source: &Path,
) -> Result<LogRecord, ParseError> {
    let field = |idx: usize, column: &'static str| {
        row.get(idx)
            .map(str::trim)
            .ok_or_else(|| ParseError::MissingField {
                file: source.to_path_buf(),
                line_number,
                column,
            })
    };
    let invalid = |column: &'static str, raw: &str| ParseError::InvalidValue {
        file: source.to_path_buf(),
        line_number,
        column,
        raw_value: raw.to_string(),
    };
    let float = |idx: usize, column: &'static str| -> Result<f64, ParseError> {
        let raw = field(idx, column)?;
        raw.parse::<f64>().map_err(|_| invalid(column, raw))
    };

    let wall_clock = field(columns.date, "#Date")?;
    if wall_clock.is_empty() {
        return Err(invalid("#Date", wall_clock));
    }

    let raw_epoch = field(columns.epoch, "time_t")?;
    let epoch = raw_epoch
        .parse::<i64>()
        .map_err(|_| invalid("time_t", raw_epoch))?;

    Ok(LogRecord {
        line_number,
        wall_clock: wall_clock.to_string(),
        epoch,
        temperature: float(columns.temperature, "temperature")?,
        sv: float(columns.sv, "SV")?,
        mv: float(columns.mv, "MV")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(content: &str) -> Result<LogData, ParseError> {
        parse_log(content.as_bytes(), Path::new("test.dat"))
    }

    #[test]
    fn test_parse_viewer_header() {
        let content = "#Date\ttime_t\ttemperature\tSV\tMV\n\
                       05-12 13:45:10\t1683866710\t25.1\t30\t42.5\n\
                       05-12 13:45:20\t1683866720\t25.3\t30\t41.0\n";
        let log = parse(content).unwrap();
        assert_eq!(log.len(), 2);
        let first = &log.records()[0];
        assert_eq!(first.wall_clock, "05-12 13:45:10");
        assert_eq!(first.epoch, 1_683_866_710);
        assert_eq!(first.temperature, 25.1);
        assert_eq!(first.sv, 30.0);
        assert_eq!(first.mv, 42.5);
        assert_eq!(first.line_number, 2);
        assert_eq!(log.records()[1].line_number, 3);
    }

    #[test]
    fn test_parse_controller_header_column_order() {
        // The controller writes temp, SV, then output.
        let content = "Date\tDate_t\ttemp [C]\tSV [C]\tOutput [%]\n\
                       05-12 13:45:10\t1683866710\t25.1\t30\t42.5\n";
        let log = parse(content).unwrap();
        let r = &log.records()[0];
        assert_eq!((r.temperature, r.sv, r.mv), (25.1, 30.0, 42.5));
    }

    #[test]
    fn test_parse_reordered_columns_and_extras() {
        let content = "MV\textra\ttemperature\t#Date\tSV\ttime_t\n\
                       7.5\tx\t21.0\t01-02 03:04:05\t20\t100\n";
        let log = parse(content).unwrap();
        let r = &log.records()[0];
        assert_eq!(r.mv, 7.5);
        assert_eq!(r.temperature, 21.0);
        assert_eq!(r.sv, 20.0);
        assert_eq!(r.epoch, 100);
        assert_eq!(r.wall_clock, "01-02 03:04:05");
    }

    #[test]
    fn test_parse_header_case_insensitive() {
        let content = "#date\tTIME_T\tTemperature\tsv\tmv\n01-01 00:00:00\t1\t2\t3\t4\n";
        assert_eq!(parse(content).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_header_only_is_empty_log() {
        let log = parse("#Date\ttime_t\ttemperature\tSV\tMV\n").unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_missing_column_is_reported() {
        let err = parse("#Date\ttime_t\ttemperature\tSV\n").unwrap_err();
        match err {
            ParseError::MissingColumn { column, .. } => assert_eq!(column, "MV"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_number_reports_line() {
        let content = "#Date\ttime_t\ttemperature\tSV\tMV\n\
                       05-12 13:45:10\t1\t25.1\t30\t42.5\n\
                       05-12 13:45:20\t2\tERR\t30\t42.5\n";
        match parse(content).unwrap_err() {
            ParseError::InvalidValue {
                line_number,
                column,
                raw_value,
                ..
            } => {
                assert_eq!(line_number, 3);
                assert_eq!(column, "temperature");
                assert_eq!(raw_value, "ERR");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_fractional_epoch_is_rejected() {
        let content = "#Date\ttime_t\ttemperature\tSV\tMV\n01-01 00:00:00\t1.5\t2\t3\t4\n";
        assert!(matches!(
            parse(content),
            Err(ParseError::InvalidValue { column: "time_t", .. })
        ));
    }

    #[test]
    fn test_short_row_is_csv_error() {
        let content = "#Date\ttime_t\ttemperature\tSV\tMV\n01-01 00:00:00\t1\t2\n";
        assert!(matches!(parse(content), Err(ParseError::Csv { .. })));
    }
}
