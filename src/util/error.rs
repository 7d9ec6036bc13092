// PidLog - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// All errors preserve the causal chain for diagnostic logging.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Top-level error type for all PidLog operations.
/// Errors are categorised by the subsystem that produced them.
#[derive(Debug)]
pub enum LogViewError {
    /// Log file parsing failed.
    Parse(ParseError),

    /// A wall-clock timestamp could not be converted.
    Timestamp(TimestampError),

    /// Export operation failed.
    Export(ExportError),

    /// Configuration loading or validation failed.
    Config(ConfigError),

    /// I/O error with path context.
    Io {
        path: PathBuf,
        operation: &'static str,
        source: io::Error,
    },
}

impl fmt::Display for LogViewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "Parse error: {e}"),
            Self::Timestamp(e) => write!(f, "Timestamp error: {e}"),
            Self::Export(e) => write!(f, "Export error: {e}"),
            Self::Config(e) => write!(f, "Configuration error: {e}"),
            Self::Io {
                path,
                operation,
                source,
            } => write!(
                f,
                "I/O error during {operation} on '{}': {source}",
                path.display()
            ),
        }
    }
}

impl std::error::Error for LogViewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Timestamp(e) => Some(e),
            Self::Export(e) => Some(e),
            Self::Config(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse errors
// ---------------------------------------------------------------------------

/// Errors related to reading the tab-separated log.
#[derive(Debug)]
pub enum ParseError {
    /// The header row lacks one of the required columns.
    MissingColumn {
        file: PathBuf,
        column: &'static str,
        accepted: &'static [&'static str],
    },

    /// A cell could not be converted to the column's type.
    InvalidValue {
        file: PathBuf,
        line_number: u64,
        column: &'static str,
        raw_value: String,
    },

    /// A row has fewer fields than the header requires.
    MissingField {
        file: PathBuf,
        line_number: u64,
        column: &'static str,
    },

    /// CSV framing error (unequal field counts, bad UTF-8, ...).
    Csv { file: PathBuf, source: csv::Error },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn {
                file,
                column,
                accepted,
            } => write!(
                f,
                "'{}': missing required column '{column}' (accepted headers: {})",
                file.display(),
                accepted.join(", ")
            ),
            Self::InvalidValue {
                file,
                line_number,
                column,
                raw_value,
            } => write!(
                f,
                "'{}' line {line_number}: invalid {column} value '{raw_value}'",
                file.display()
            ),
            Self::MissingField {
                file,
                line_number,
                column,
            } => write!(
                f,
                "'{}' line {line_number}: row has no '{column}' field",
                file.display()
            ),
            Self::Csv { file, source } => {
                write!(f, "'{}': malformed tab-separated data: {source}", file.display())
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Csv { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ParseError> for LogViewError {
    fn from(e: ParseError) -> Self {
        Self::Parse(e)
    }
}

// ---------------------------------------------------------------------------
// Timestamp errors
// ---------------------------------------------------------------------------

/// Errors raised while deriving epoch seconds from wall-clock strings.
#[derive(Debug)]
pub enum TimestampError {
    /// The log contains no records, so no bounds exist.
    EmptyLog,

    /// The string does not match `MM-DD HH:MM:SS`.
    Format {
        raw_timestamp: String,
        source: chrono::ParseError,
    },

    /// The wall-clock time does not exist in the conversion zone
    /// (e.g. skipped by a DST transition) or the date is invalid for the
    /// assumed year.
    Nonexistent { raw_timestamp: String, year: i32 },

    /// A conversion zone is neither `local`, `utc` nor a `+HH:MM` offset.
    InvalidZone {
        raw: String,
        source: chrono::ParseError,
    },
}

impl fmt::Display for TimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyLog => write!(f, "log contains no records"),
            Self::Format {
                raw_timestamp,
                source,
            } => write!(
                f,
                "cannot parse '{raw_timestamp}' as MM-DD HH:MM:SS: {source}"
            ),
            Self::Nonexistent {
                raw_timestamp,
                year,
            } => write!(
                f,
                "'{raw_timestamp}' does not name a valid local time in {year}"
            ),
            Self::InvalidZone { raw, source } => write!(
                f,
                "'{raw}' is not 'local', 'utc' or a +HH:MM offset: {source}"
            ),
        }
    }
}

impl std::error::Error for TimestampError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format { source, .. } | Self::InvalidZone { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<TimestampError> for LogViewError {
    fn from(e: TimestampError) -> Self {
        Self::Timestamp(e)
    }
}

// ---------------------------------------------------------------------------
// Export errors
// ---------------------------------------------------------------------------

/// Errors related to export operations.
#[derive(Debug)]
pub enum ExportError {
    /// I/O error writing the export file.
    Io { path: PathBuf, source: io::Error },

    /// CSV serialisation error.
    Csv { path: PathBuf, source: csv::Error },

    /// JSON serialisation error.
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Export would exceed maximum row count.
    TooManyRows { count: usize, max: usize },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "Export I/O error '{}': {source}", path.display())
            }
            Self::Csv { path, source } => {
                write!(f, "CSV export error '{}': {source}", path.display())
            }
            Self::Json { path, source } => {
                write!(f, "JSON export error '{}': {source}", path.display())
            }
            Self::TooManyRows { count, max } => write!(
                f,
                "Export of {count} rows exceeds maximum of {max}. \
                 Narrow the selected time range."
            ),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Csv { source, .. } => Some(source),
            Self::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ExportError> for LogViewError {
    fn from(e: ExportError) -> Self {
        Self::Export(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<ConfigError> for LogViewError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Convenience type alias for PidLog results.
pub type Result<T> = std::result::Result<T, LogViewError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_parse_error_display_names_line_and_column() {
        let err = ParseError::InvalidValue {
            file: PathBuf::from("test.dat"),
            line_number: 7,
            column: "temperature",
            raw_value: "abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 7"), "{msg}");
        assert!(msg.contains("temperature"), "{msg}");
        assert!(msg.contains("'abc'"), "{msg}");
    }

    #[test]
    fn test_top_level_error_chains_source() {
        let io = io::Error::new(io::ErrorKind::NotFound, "gone");
        let err = LogViewError::Io {
            path: PathBuf::from("missing.dat"),
            operation: "open",
            source: io,
        };
        assert!(err.to_string().contains("missing.dat"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_missing_column_lists_accepted_headers() {
        let err: LogViewError = ParseError::MissingColumn {
            file: PathBuf::from("x.dat"),
            column: "MV",
            accepted: &["MV", "Output [%]"],
        }
        .into();
        let msg = err.to_string();
        assert!(msg.starts_with("Parse error:"), "{msg}");
        assert!(msg.contains("Output [%]"), "{msg}");
    }
}
