use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::{ColorSink, Rgb, SinkError, color::encode_hex};

/// Writes straight into the zone file.
///
/// Requires the process to have write access, e.g. through a udev rule.
#[derive(Debug, Clone)]
pub struct ZoneFile {
    path: PathBuf,
}

impl ZoneFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ColorSink for ZoneFile {
    fn write(&mut self, color: Rgb) -> Result<(), SinkError> {
        let hex = encode_hex(color);
        let mut file = OpenOptions::new()
            .write(true)
            .open(&self.path)
            .map_err(|err| SinkError::from_io(err, self.path.clone()))?;
        file.write_all(hex.as_bytes())
            .map_err(|err| SinkError::from_io(err, self.path.clone()))
    }
}
