// PidLog - platform/fs.rs
//
// Thin filesystem helpers used by the log source.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::time::SystemTime;

/// Open a file for buffered reading.
pub fn open_buffered(path: &Path) -> io::Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Last modification time, or `None` when the platform or filesystem cannot
/// report one (or the file has gone away).
pub fn modified_time(path: &Path) -> Option<SystemTime> {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(t) => Some(t),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "No modification time");
            None
        }
    }
}
