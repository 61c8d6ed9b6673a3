use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::{ColorSink, Rgb, SinkError, color::encode_hex};

/// Writes through an external privilege helper.
///
/// Runs `<program> [args..] tee <path>` and feeds the hex color on stdin,
/// so `sudo` (or `doas`, `pkexec`) decides whether the write is allowed.
#[derive(Debug, Clone)]
pub struct PrivilegedWriter {
    program: String,
    args: Vec<String>,
    path: PathBuf,
}

impl PrivilegedWriter {
    /// Build from a command line such as `["sudo", "-n"]`.
    ///
    /// An empty command runs `tee` directly.
    pub fn new<I, T>(command: I, path: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let mut parts = command.into_iter().map(Into::into);
        let (program, args) = match parts.next() {
            Some(program) => (program, parts.chain(["tee".to_string()]).collect()),
            None => ("tee".to_string(), Vec::new()),
        };
        Self {
            program,
            args,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ColorSink for PrivilegedWriter {
    fn write(&mut self, color: Rgb) -> Result<(), SinkError> {
        let hex = encode_hex(color);
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(&self.path)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()?;

        // Always reap the child, even if feeding it failed
        let fed = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(hex.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait()?;
        // A helper that exits early closes the pipe; its status is the real cause
        if !status.success() {
            return Err(SinkError::HelperFailed(status));
        }
        fed.map_err(SinkError::from)
    }
}
