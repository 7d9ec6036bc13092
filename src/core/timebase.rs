// PidLog - core/timebase.rs
//
// Wall-clock <-> epoch conversion for the yearless log timestamps.
//
// The slider bounds are NOT taken from the log's epoch column. They are
// re-derived from the first and last wall-clock strings: the string is given
// an assumed year, read as a time in the conversion zone (normally the
// machine's local zone), and the source offset is subtracted. Labels invert
// the same rule so they show the log's own wall-clock time.

use crate::util::constants;
use crate::util::error::TimestampError;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

/// Zone in which yearless wall-clock strings are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionZone {
    /// The system's local timezone, including its DST rules.
    #[default]
    Local,
    /// A fixed UTC offset.
    Fixed(FixedOffset),
}

impl ConversionZone {
    fn to_utc(self, naive: &NaiveDateTime) -> Option<DateTime<Utc>> {
        // Ambiguous (DST fall-back) times resolve to the earlier instant.
        match self {
            Self::Local => Local
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
            Self::Fixed(offset) => offset
                .from_local_datetime(naive)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }

    fn format_utc(self, utc: DateTime<Utc>, fmt: &str) -> String {
        match self {
            Self::Local => utc.with_timezone(&Local).format(fmt).to_string(),
            Self::Fixed(offset) => utc.with_timezone(&offset).format(fmt).to_string(),
        }
    }
}

impl FromStr for ConversionZone {
    type Err = TimestampError;

    /// Accepts `local`, `utc`, or an offset such as `+09:00` / `-05:30`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "utc" | "z" => Ok(Self::Fixed(Utc.fix())),
            _ => FixedOffset::from_str(trimmed)
                .map(Self::Fixed)
                .map_err(|e| TimestampError::InvalidZone {
                    raw: trimmed.to_string(),
                    source: e,
                }),
        }
    }
}

impl fmt::Display for ConversionZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => f.write_str("local"),
            Self::Fixed(offset) => write!(f, "{offset}"),
        }
    }
}

/// Parameters of the wall-clock timestamp derivation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeBase {
    /// Year injected into the yearless wall-clock strings.
    pub year: i32,

    /// Zone the wall-clock strings are read in.
    pub zone: ConversionZone,

    /// Seconds subtracted after conversion (the authored-timezone shim).
    pub source_offset_secs: i64,
}

impl Default for TimeBase {
    fn default() -> Self {
        Self {
            year: constants::DEFAULT_ASSUMED_YEAR,
            zone: ConversionZone::Local,
            source_offset_secs: constants::DEFAULT_SOURCE_OFFSET_HOURS * 3_600,
        }
    }
}

impl TimeBase {
    pub fn new(year: i32, zone: ConversionZone, source_offset_hours: i64) -> Self {
        Self {
            year,
            zone,
            source_offset_secs: source_offset_hours * 3_600,
        }
    }

    /// Convert an `MM-DD HH:MM:SS` string to shifted epoch seconds.
    pub fn wall_to_epoch(&self, raw: &str) -> Result<i64, TimestampError> {
        let trimmed = raw.trim();
        let with_year = format!("{}-{trimmed}", self.year);
        let year_format = format!("%Y-{}", constants::WALL_CLOCK_FORMAT);

        let naive = NaiveDateTime::parse_from_str(&with_year, &year_format).map_err(|e| {
            TimestampError::Format {
                raw_timestamp: trimmed.to_string(),
                source: e,
            }
        })?;

        let utc = self
            .zone
            .to_utc(&naive)
            .ok_or_else(|| TimestampError::Nonexistent {
                raw_timestamp: trimmed.to_string(),
                year: self.year,
            })?;

        Ok(utc.timestamp() - self.source_offset_secs)
    }

    /// Format shifted epoch seconds back to wall-clock time with `fmt`.
    ///
    /// Returns `None` only for epochs outside chrono's representable range.
    pub fn format_epoch(&self, epoch: i64, fmt: &str) -> Option<String> {
        let shifted = epoch.checked_add(self.source_offset_secs)?;
        let utc = DateTime::<Utc>::from_timestamp(shifted, 0)?;
        Some(self.zone.format_utc(utc, fmt))
    }

    /// `MM/DD HH:MM` label for a selected range end.
    pub fn label(&self, epoch: i64) -> String {
        let fmt = format!(
            "{} {}",
            constants::LABEL_DATE_FORMAT,
            constants::LABEL_TIME_FORMAT
        );
        self.format_epoch(epoch, &fmt)
            .unwrap_or_else(|| "--/-- --:--".to_string())
    }
}
