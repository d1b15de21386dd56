//! Accelerometer trace loader.
//!
//! Traces are JSON lines, one sample per line:
//!
//! ```text
//! {"t": 0,         "x": 0.1, "y": 9.7, "z": 0.3}
//! {"t": 20000000,  "x": 0.2, "y": 9.8, "z": 0.2}
//! ```
//!
//! `t` is the sensor timestamp in nanoseconds. Blank lines and lines
//! starting with `#` are skipped.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::shake::Sample;

#[derive(Debug, Deserialize)]
struct TraceRecord {
    t: u64,
    x: f32,
    y: f32,
    z: f32,
}

#[derive(Debug)]
pub enum ReplayError {
    Io(io::Error),
    /// Line `line` (1-based) is not a valid sample record.
    Parse { line: usize, source: serde_json::Error },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "trace I/O error: {e}"),
            Self::Parse { line, source } => write!(f, "trace line {line}: {source}"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

/// Parse every sample from `reader`, in file order.
pub fn parse_trace(reader: impl BufRead) -> Result<Vec<Sample>, ReplayError> {
    let mut samples = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let rec: TraceRecord = serde_json::from_str(trimmed).map_err(|source| ReplayError::Parse {
            line: idx + 1,
            source,
        })?;
        samples.push(Sample::new(rec.t, rec.x, rec.y, rec.z));
    }
    Ok(samples)
}

/// Open and parse a trace file.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Sample>, ReplayError> {
    let file = File::open(path)?;
    parse_trace(BufReader::new(file))
}
