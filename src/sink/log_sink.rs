use crate::{ColorSink, Rgb, SinkError, color::encode_hex};

/// Logs colors instead of writing them (dry run)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ColorSink for LogSink {
    fn write(&mut self, color: Rgb) -> Result<(), SinkError> {
        log::info!("zone <- {}", encode_hex(color));
        Ok(())
    }
}
