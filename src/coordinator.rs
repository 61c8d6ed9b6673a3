//! Mode coordination
//!
//! Serializes static and rainbow requests so the zone has exactly one writer:
//! every request takes the coordinator lock, and a static request stops the
//! rainbow before its first transition step.

use std::sync::{Mutex, MutexGuard, PoisonError};

use embassy_time::Duration;

use crate::color::{Rgb, decode_hex, encode_hex};
use crate::config::Timings;
use crate::mode::{LightMode, ModeId};
use crate::output::SharedOutput;
use crate::rainbow::RainbowDriver;
use crate::store::PersistedMode;
use crate::transition::TransitionEngine;
use crate::{ColorSink, LightError};

struct CoordinatorState<S: ColorSink + 'static> {
    transition: TransitionEngine<S>,
    rainbow: RainbowDriver<S>,
    mode: LightMode,
}

/// Entry point for the presentation layer
pub struct ModeCoordinator<S: ColorSink + 'static> {
    output: SharedOutput<S>,
    state: Mutex<CoordinatorState<S>>,
}

impl<S: ColorSink + 'static> ModeCoordinator<S> {
    pub fn new(sink: S) -> Self {
        Self::with_last_color(sink, None)
    }

    /// Coordinator for a zone already showing `last`.
    ///
    /// Lets a short-lived process crossfade from the color a previous run
    /// left behind instead of snapping.
    pub fn with_last_color(sink: S, last: Option<Rgb>) -> Self {
        let output = SharedOutput::with_last_color(sink, last);
        Self {
            state: Mutex::new(CoordinatorState {
                transition: TransitionEngine::new(output.clone()),
                rainbow: RainbowDriver::new(output.clone()),
                mode: LightMode::Off,
            }),
            output,
        }
    }

    /// Switch to a static color, stopping the rainbow first
    pub fn request_static(&self, color: Rgb, duration: Duration) -> Result<(), LightError> {
        let mut state = self.lock();
        state.rainbow.stop();
        state.mode = LightMode::Off;

        log::info!(
            "mode: static {} over {} ms",
            encode_hex(color),
            duration.as_millis()
        );
        state.transition.transition(color, duration)?;
        state.mode = LightMode::Static(color);
        Ok(())
    }

    /// Like [`Self::request_static`], validating the hex string before
    /// anything is stopped or written
    pub fn request_static_hex(&self, hex: &str, duration: Duration) -> Result<(), LightError> {
        let color = decode_hex(hex)?;
        self.request_static(color, duration)
    }

    /// Start a rainbow session, replacing any running one
    pub fn request_rainbow(&self, tick: Duration) -> Result<(), LightError> {
        let mut state = self.lock();
        state.mode = LightMode::Off;
        state.rainbow.start(tick)?;
        state.mode = LightMode::Rainbow { tick };
        Ok(())
    }

    /// Stop the rainbow, leaving its last frame on the zone
    pub fn request_stop(&self) {
        let mut state = self.lock();
        state.rainbow.stop();
        if matches!(state.mode, LightMode::Rainbow { .. }) {
            state.mode = LightMode::Off;
        }
    }

    /// Re-apply a stored mode.
    ///
    /// A stored static mode without a color only selects the mode.
    pub fn apply(&self, persisted: &PersistedMode, timings: &Timings) -> Result<(), LightError> {
        log::debug!("restoring {} mode", persisted.mode.as_str());
        match persisted.mode {
            ModeId::Static => match persisted.color.as_deref() {
                Some(hex) => self.request_static_hex(hex, timings.color_change),
                None => {
                    self.request_stop();
                    Ok(())
                }
            },
            ModeId::Rainbow => {
                let tick = persisted
                    .tick_ms
                    .map_or(timings.rainbow_tick, Duration::from_millis);
                self.request_rainbow(tick)
            }
        }
    }

    pub fn mode(&self) -> LightMode {
        self.lock().mode
    }

    pub fn is_rainbow_running(&self) -> bool {
        self.lock().rainbow.is_running()
    }

    /// Last color that reached the zone
    pub fn last_color(&self) -> Option<Rgb> {
        self.output.last_color()
    }

    fn lock(&self) -> MutexGuard<'_, CoordinatorState<S>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
