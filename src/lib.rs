//! Single-zone keyboard lighting engine.
//!
//! Drives one RGB zone exposed by the kernel as a file taking `rrggbb` hex.
//! A static color is reached through a short linear crossfade, the rainbow
//! mode cycles hue on a background thread, and [`ModeCoordinator`] makes sure
//! only one of them talks to the device at any time.

pub mod color;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod frame_scheduler;
pub mod mode;
pub mod output;
pub mod rainbow;
pub mod sink;
pub mod store;
pub mod transition;

pub use color::{Rgb, decode_hex, encode_hex};
pub use config::{Config, Timings, WriteMethod};
pub use coordinator::ModeCoordinator;
pub use error::{ColorParseError, LightError, SinkError};
pub use frame_scheduler::FrameScheduler;
pub use mode::{LightMode, ModeId};
pub use output::SharedOutput;
pub use rainbow::RainbowDriver;
pub use store::{ModeStore, PersistedMode};
pub use transition::{ColorTransition, STEPS, TransitionEngine};

pub use embassy_time::{Duration, Instant};

/// Abstract lighting zone writer
///
/// Implement this trait to support different ways of reaching the hardware.
/// Writes are synchronous and never retried by the engine.
pub trait ColorSink: Send {
    /// Write a color to the zone
    fn write(&mut self, color: Rgb) -> Result<(), SinkError>;
}

impl<T: ColorSink + ?Sized> ColorSink for Box<T> {
    fn write(&mut self, color: Rgb) -> Result<(), SinkError> {
        (**self).write(color)
    }
}
