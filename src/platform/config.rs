// PidLog - platform/config.rs
//
// Platform-specific configuration, config directory resolution, and
// config.toml loading with startup validation.
//
// Uses the `directories` crate for XDG (Linux), AppData (Windows),
// Library (macOS) compliance.

use crate::core::timebase::{ConversionZone, TimeBase};
use crate::util::constants;
use crate::util::error::ConfigError;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Resolved platform paths for PidLog configuration.
#[derive(Debug, Clone)]
pub struct PlatformPaths {
    /// Configuration directory (e.g. ~/.config/pidlog/ or %APPDATA%\PidLog\config\)
    pub config_dir: PathBuf,
}

impl PlatformPaths {
    /// Resolve platform-appropriate paths.
    ///
    /// Falls back to current directory if platform dirs cannot be determined.
    pub fn resolve() -> Self {
        if let Some(proj_dirs) = ProjectDirs::from("", "", constants::APP_ID) {
            let config_dir = proj_dirs.config_dir().to_path_buf();
            tracing::debug!(config = %config_dir.display(), "Platform paths resolved");
            Self { config_dir }
        } else {
            tracing::warn!("Could not determine platform directories, using current directory");
            Self {
                config_dir: PathBuf::from("."),
            }
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join(constants::CONFIG_FILE_NAME)
    }
}

// =============================================================================
// config.toml loading and validation
// =============================================================================

/// Raw deserialisable shape of config.toml.
///
/// Unknown keys are silently ignored for forward compatibility.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// `[timestamps]` section.
    pub timestamps: TimestampsSection,
    /// `[ui]` section.
    pub ui: UiSection,
    /// `[logging]` section.
    pub logging: LoggingSection,
}

/// `[timestamps]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct TimestampsSection {
    /// Year injected into the yearless wall-clock column.
    pub year: Option<i32>,
    /// Hours the log's authored zone runs ahead of `zone`.
    pub source_offset_hours: Option<i64>,
    /// "local", "utc", or "+HH:MM".
    pub zone: Option<String>,
}

/// `[ui]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct UiSection {
    /// Theme: "dark" or "light".
    pub theme: Option<String>,
    /// Body font size in points.
    pub font_size: Option<f32>,
    /// How often to check the open file for changes (ms). 0 disables.
    pub reload_poll_ms: Option<u64>,
}

/// `[logging]` config section.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "error", "warn", "info", "debug", "trace".
    pub level: Option<String>,
}

/// Validated application configuration derived from `config.toml`.
///
/// Invalid values produce actionable warnings and fall back to defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    // -- Timestamps --
    pub year: i32,
    pub source_offset_hours: i64,
    pub zone: ConversionZone,

    // -- UI --
    /// Dark mode (true) or light mode (false).
    pub dark_mode: bool,
    /// Body font size in points.
    pub font_size: f32,
    /// `None` disables automatic reloads.
    pub reload_poll_ms: Option<u64>,

    // -- Logging --
    /// Logging level string (for init before tracing is available).
    pub log_level: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            year: constants::DEFAULT_ASSUMED_YEAR,
            source_offset_hours: constants::DEFAULT_SOURCE_OFFSET_HOURS,
            zone: ConversionZone::Local,
            dark_mode: true,
            font_size: constants::DEFAULT_FONT_SIZE,
            reload_poll_ms: Some(constants::SOURCE_POLL_INTERVAL_MS),
            log_level: None,
        }
    }
}

impl AppConfig {
    pub fn time_base(&self) -> TimeBase {
        TimeBase::new(self.year, self.zone, self.source_offset_hours)
    }
}

/// Load and validate `config.toml` at `config_path`.
///
/// Returns `AppConfig` with validated values and a list of non-fatal warnings.
/// A missing file yields defaults with no warnings (first run). An unreadable
/// or unparseable file yields defaults with one warning.
pub fn load_config(config_path: &Path) -> (AppConfig, Vec<String>) {
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "No config.toml found; using defaults");
        return (AppConfig::default(), Vec::new());
    }

    let content = match std::fs::read_to_string(config_path) {
        Ok(c) => c,
        Err(e) => {
            let err = ConfigError::Io {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Using default configuration");
            return (AppConfig::default(), vec![format!("{err}. Using defaults.")]);
        }
    };

    let raw: RawConfig = match toml::from_str(&content) {
        Ok(r) => r,
        Err(e) => {
            let err = ConfigError::TomlParse {
                path: config_path.to_path_buf(),
                source: e,
            };
            tracing::warn!(error = %err, "Using default configuration");
            return (AppConfig::default(), vec![format!("{err}. Using defaults.")]);
        }
    };

    tracing::info!(path = %config_path.display(), "Loaded config.toml");
    validate(raw)
}

/// Validate every field against named constants, accumulating all problems.
pub fn validate(raw: RawConfig) -> (AppConfig, Vec<String>) {
    let mut config = AppConfig::default();
    let mut warnings: Vec<String> = Vec::new();
    let mut reject = |field: &str, value: String, expected: String| {
        let err = ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value,
            expected,
        };
        warnings.push(format!("{err}. Using default."));
    };

    // -- Timestamps: year --
    if let Some(year) = raw.timestamps.year {
        if (constants::MIN_ASSUMED_YEAR..=constants::MAX_ASSUMED_YEAR).contains(&year) {
            config.year = year;
        } else {
            reject(
                "timestamps.year",
                year.to_string(),
                format!(
                    "{}-{}",
                    constants::MIN_ASSUMED_YEAR,
                    constants::MAX_ASSUMED_YEAR
                ),
            );
        }
    }

    // -- Timestamps: source_offset_hours --
    if let Some(hours) = raw.timestamps.source_offset_hours {
        if hours.abs() <= constants::MAX_SOURCE_OFFSET_HOURS {
            config.source_offset_hours = hours;
        } else {
            reject(
                "timestamps.source_offset_hours",
                hours.to_string(),
                format!(
                    "-{0} to {0}",
                    constants::MAX_SOURCE_OFFSET_HOURS
                ),
            );
        }
    }

    // -- Timestamps: zone --
    if let Some(ref zone) = raw.timestamps.zone {
        match zone.parse::<ConversionZone>() {
            Ok(z) => config.zone = z,
            Err(_) => reject(
                "timestamps.zone",
                zone.clone(),
                "\"local\", \"utc\" or an offset like \"+09:00\"".to_string(),
            ),
        }
    }

    // -- UI: theme --
    if let Some(ref theme) = raw.ui.theme {
        match theme.to_lowercase().as_str() {
            "dark" => config.dark_mode = true,
            "light" => config.dark_mode = false,
            other => reject(
                "ui.theme",
                other.to_string(),
                "\"dark\" or \"light\"".to_string(),
            ),
        }
    }

    // -- UI: font_size --
    if let Some(size) = raw.ui.font_size {
        if (constants::MIN_FONT_SIZE..=constants::MAX_FONT_SIZE).contains(&size) {
            config.font_size = size;
        } else {
            reject(
                "ui.font_size",
                size.to_string(),
                format!("{}-{}", constants::MIN_FONT_SIZE, constants::MAX_FONT_SIZE),
            );
        }
    }

    // -- UI: reload_poll_ms --
    if let Some(ms) = raw.ui.reload_poll_ms {
        if ms == 0 {
            config.reload_poll_ms = None;
        } else if (constants::MIN_SOURCE_POLL_INTERVAL_MS
            ..=constants::MAX_SOURCE_POLL_INTERVAL_MS)
            .contains(&ms)
        {
            config.reload_poll_ms = Some(ms);
        } else {
            reject(
                "ui.reload_poll_ms",
                ms.to_string(),
                format!(
                    "0 (off) or {}-{}",
                    constants::MIN_SOURCE_POLL_INTERVAL_MS,
                    constants::MAX_SOURCE_POLL_INTERVAL_MS
                ),
            );
        }
    }

    // -- Logging: level --
    if let Some(ref level) = raw.logging.level {
        let valid = ["error", "warn", "info", "debug", "trace"];
        if valid.contains(&level.to_lowercase().as_str()) {
            config.log_level = Some(level.to_lowercase());
        } else {
            reject(
                "logging.level",
                level.clone(),
                "error, warn, info, debug, trace".to_string(),
            );
        }
    }

    if !warnings.is_empty() {
        tracing::warn!(
            count = warnings.len(),
            "Config validation produced warnings"
        );
    }

    (config, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn parse(content: &str) -> (AppConfig, Vec<String>) {
        validate(toml::from_str(content).unwrap())
    }

    #[test]
    fn test_empty_config_is_default() {
        let (config, warnings) = parse("");
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
        assert_eq!(config.time_base(), TimeBase::default());
    }

    #[test]
    fn test_timestamp_section_overrides() {
        let (config, warnings) = parse(
            "[timestamps]\nyear = 2024\nsource_offset_hours = 0\nzone = \"+09:00\"\n",
        );
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(config.year, 2024);
        assert_eq!(config.source_offset_hours, 0);
        assert_eq!(
            config.zone,
            ConversionZone::Fixed(FixedOffset::east_opt(9 * 3_600).unwrap())
        );
        assert_eq!(config.time_base().source_offset_secs, 0);
    }

    #[test]
    fn test_out_of_range_values_fall_back_with_warnings() {
        let (config, warnings) = parse(
            "[timestamps]\nyear = 1800\nsource_offset_hours = 30\nzone = \"mars\"\n\
             [ui]\ntheme = \"neon\"\nfont_size = 99.0\nreload_poll_ms = 5\n\
             [logging]\nlevel = \"loud\"\n",
        );
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 7, "{warnings:?}");
        assert!(warnings[0].contains("timestamps.year"));
    }

    #[test]
    fn test_reload_poll_zero_disables() {
        let (config, _) = parse("[ui]\nreload_poll_ms = 0\n");
        assert_eq!(config.reload_poll_ms, None);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (config, warnings) = parse("[future]\nflag = true\n[ui]\ntheme = \"light\"\n");
        assert!(warnings.is_empty());
        assert!(!config.dark_mode);
    }

    #[test]
    fn test_load_config_missing_file_is_silent() {
        let dir = tempfile::tempdir().unwrap();
        let (config, warnings) = load_config(&dir.path().join("config.toml"));
        assert_eq!(config, AppConfig::default());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_config_bad_toml_warns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[timestamps\nyear = ").unwrap();
        let (config, warnings) = load_config(&path);
        assert_eq!(config, AppConfig::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("Config parse error"), "{warnings:?}");
    }
}
