// PidLog - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "PidLog";

/// Window title shown above the range slider.
pub const APP_TITLE: &str = "Omron PID log viewer";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "PidLog";

/// Current application version (updated by release script).
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Timestamp derivation
// =============================================================================

/// Year assumed for the yearless `MM-DD HH:MM:SS` wall-clock column.
pub const DEFAULT_ASSUMED_YEAR: i32 = 2023;

/// Lowest accepted value for `[timestamps] year`.
pub const MIN_ASSUMED_YEAR: i32 = 1970;

/// Highest accepted value for `[timestamps] year`.
pub const MAX_ASSUMED_YEAR: i32 = 2200;

/// Hours the log's authored timezone runs ahead of the conversion zone.
///
/// The controller host writes JST wall-clock; the viewer historically parsed
/// it as if it were the viewer's own local time and then subtracted this
/// shift. Slider bounds depend on it, so it stays 9 unless configured.
pub const DEFAULT_SOURCE_OFFSET_HOURS: i64 = 9;

/// Largest magnitude accepted for the source offset (hours).
pub const MAX_SOURCE_OFFSET_HOURS: i64 = 14;

/// Wall-clock format of the log's date column.
pub const WALL_CLOCK_FORMAT: &str = "%m-%d %H:%M:%S";

/// Label format for the selected start/end of the range.
pub const LABEL_DATE_FORMAT: &str = "%m/%d";

/// Label time-of-day format, appended after a single space.
pub const LABEL_TIME_FORMAT: &str = "%H:%M";

// =============================================================================
// Log columns
// =============================================================================

/// Header names accepted for the wall-clock column. The first entry is the
/// viewer's own dialect; the second is what the controller's logger writes.
pub const DATE_COLUMN_NAMES: &[&str] = &["#Date", "Date"];

/// Header names accepted for the epoch-seconds column.
pub const EPOCH_COLUMN_NAMES: &[&str] = &["time_t", "Date_t"];

/// Header names accepted for the temperature column.
pub const TEMPERATURE_COLUMN_NAMES: &[&str] = &["temperature", "temp [C]"];

/// Header names accepted for the setpoint column.
pub const SV_COLUMN_NAMES: &[&str] = &["SV", "SV [C]"];

/// Header names accepted for the manipulated-variable column.
pub const MV_COLUMN_NAMES: &[&str] = &["MV", "Output [%]"];

/// Field delimiter of the log file.
pub const LOG_DELIMITER: u8 = b'\t';

/// Decimal places kept in the display table.
pub const DISPLAY_DECIMALS: i32 = 1;

/// Text shown in place of the latest temperature when the selection is empty.
pub const NO_DATA_LABEL: &str = "None";

// =============================================================================
// Source reloading
// =============================================================================

/// How often the GUI checks the loaded file's modification time (ms).
pub const SOURCE_POLL_INTERVAL_MS: u64 = 1_000;

/// Minimum user-configurable poll interval (ms).
pub const MIN_SOURCE_POLL_INTERVAL_MS: u64 = 200;

/// Maximum user-configurable poll interval (ms).
pub const MAX_SOURCE_POLL_INTERVAL_MS: u64 = 60_000;

/// File extensions offered by the Open dialog.
pub const LOG_FILE_EXTENSIONS: &[&str] = &["dat", "tsv", "txt", "log"];

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Export
// =============================================================================

/// Maximum number of rows that can be exported in a single operation.
pub const MAX_EXPORT_ROWS: usize = 5_000_000;

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
