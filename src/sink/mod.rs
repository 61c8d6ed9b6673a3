//! Color sinks
//!
//! Everything that can receive a color: the zone file itself, a privilege
//! helper in front of it, and in-process doubles.

mod log_sink;
mod privileged;
mod recorder;
mod zone_file;

pub use log_sink::LogSink;
pub use privileged::PrivilegedWriter;
pub use recorder::Recorder;
pub use zone_file::ZoneFile;

/// Default `hp-wmi` keyboard zone
pub const DEFAULT_ZONE_PATH: &str = "/sys/devices/platform/hp-wmi/rgb_zones/zone00";
