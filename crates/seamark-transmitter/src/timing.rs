//! Per-session timing measurements.
//!
//! Appends one CSV line per session to a level-named file. Instrumentation
//! only; protocol correctness never depends on it.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use seamark_proto::SecurityLevel;

/// Append `level,elapsed_microseconds,frames` to `timing_level_<n>.csv`
/// inside `dir`.
///
/// Returns the path written to.
pub fn append(
    dir: &Path,
    level: SecurityLevel,
    elapsed: Duration,
    frames: usize,
) -> std::io::Result<PathBuf> {
    let path = dir.join(format!("timing_level_{level}.csv"));
    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    writeln!(file, "{level},{},{frames}", elapsed.as_micros())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();

        append(dir.path(), SecurityLevel::Level2, Duration::from_micros(1500), 2).unwrap();
        let path = append(dir.path(), SecurityLevel::Level2, Duration::from_micros(900), 2)
            .unwrap();
        let contents = std::fs::read_to_string(path).unwrap();

        assert_eq!(contents.lines().count(), 2);
        assert!(contents.starts_with("2,1500,2"));
    }
}
