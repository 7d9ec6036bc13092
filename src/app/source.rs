// PidLog - app/source.rs
//
// The loaded log file and its reload policy.
//
// The controller front end appends one row per logging tick, so the file
// grows while it is being viewed. The GUI polls `reload_if_changed` and
// re-runs the whole pipeline when the modification time moves.

use crate::core::model::LogData;
use crate::core::parser;
use crate::platform::fs;
use crate::util::error::{LogViewError, Result};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Open and parse a log file.
pub fn load_log(path: &Path) -> Result<LogData> {
    let reader = fs::open_buffered(path).map_err(|e| LogViewError::Io {
        path: path.to_path_buf(),
        operation: "open",
        source: e,
    })?;
    Ok(parser::parse_log(reader, path)?)
}

/// A log file on disk together with its last successfully parsed contents.
#[derive(Debug)]
pub struct LogSource {
    path: PathBuf,
    data: LogData,
    modified: Option<SystemTime>,
    /// mtime seen by the last failed reload (`Some(None)` once the file is
    /// gone). Polling does not retry until the mtime moves off this value.
    failed_modified: Option<Option<SystemTime>>,
}

impl LogSource {
    /// Load `path`. A load failure here is fatal for this source.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let modified = fs::modified_time(&path);
        let data = load_log(&path)?;
        tracing::info!(
            path = %path.display(),
            records = data.len(),
            "Opened log source"
        );
        Ok(Self {
            path,
            data,
            modified,
            failed_modified: None,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn data(&self) -> &LogData {
        &self.data
    }

    /// Re-read the file unconditionally.
    ///
    /// On failure the previous contents are kept and the error is returned.
    pub fn reload(&mut self) -> Result<()> {
        let modified = fs::modified_time(&self.path);
        let data = match load_log(&self.path) {
            Ok(data) => data,
            Err(e) => {
                self.failed_modified = Some(modified);
                return Err(e);
            }
        };
        tracing::debug!(
            path = %self.path.display(),
            records = data.len(),
            previous = self.data.len(),
            "Reloaded log source"
        );
        self.data = data;
        self.modified = modified;
        self.failed_modified = None;
        Ok(())
    }

    /// Re-read the file if its modification time changed since the last load.
    ///
    /// Returns `Ok(true)` when new contents were loaded. A file that failed
    /// to load is reported once, then left alone until it changes again.
    pub fn reload_if_changed(&mut self) -> Result<bool> {
        let current = fs::modified_time(&self.path);
        if current.is_some() && current == self.modified {
            return Ok(false);
        }
        if self.failed_modified == Some(current) {
            return Ok(false);
        }
        if current.is_none() && self.modified.is_none() {
            // No mtime support on this filesystem; only explicit reloads apply.
            return Ok(false);
        }
        self.reload()?;
        Ok(true)
    }
}
