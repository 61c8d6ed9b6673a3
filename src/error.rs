//! Error types
//!
//! Per-frame write failures are swallowed by the animation loops; everything
//! here is what reaches a caller.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Failure to push a color to the device
#[derive(thiserror::Error, Debug)]
pub enum SinkError {
    #[error("permission denied writing to '{}'", .0.display())]
    PermissionDenied(PathBuf),

    #[error("lighting zone '{}' does not exist", .0.display())]
    DeviceMissing(PathBuf),

    #[error("privilege helper exited with {0}")]
    HelperFailed(ExitStatus),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl SinkError {
    /// Classify an IO error raised while touching `path`
    pub fn from_io(err: io::Error, path: PathBuf) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => Self::PermissionDenied(path),
            io::ErrorKind::NotFound => Self::DeviceMissing(path),
            _ => Self::Io(err),
        }
    }
}

/// Malformed hex color input
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0}")]
    InvalidLength(usize),

    #[error("invalid hex digit '{found}' at position {position}")]
    InvalidDigit { position: usize, found: char },
}

/// Errors surfaced by the mode coordinator
#[derive(thiserror::Error, Debug)]
pub enum LightError {
    #[error("device write failed: {0}")]
    DeviceWrite(#[from] SinkError),

    #[error("invalid color format: {0}")]
    InvalidColorFormat(#[from] ColorParseError),

    #[error("unknown color or preset '{0}'")]
    UnknownPreset(String),

    #[error("failed to spawn rainbow thread: {0}")]
    Spawn(io::Error),
}
