//! Smooth static color changes
//!
//! [`ColorTransition`] is the pure step calculator; [`TransitionEngine`]
//! plays it out against the shared output with a blocking pause between
//! steps.

use std::thread;

use embassy_time::{Duration, Instant};

use crate::color::{Rgb, lerp_colors};
use crate::frame_scheduler::{FrameScheduler, to_std};
use crate::output::SharedOutput;
use crate::{ColorSink, SinkError};

/// Number of writes in a non-trivial transition
pub const STEPS: u32 = 20;

/// Linear crossfade between two colors in [`STEPS`] steps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorTransition {
    /// Color at the start of transition
    source: Rgb,
    /// Color after the last step
    target: Rgb,
}

impl ColorTransition {
    pub const fn new(source: Rgb, target: Rgb) -> Self {
        Self { source, target }
    }

    /// Color written at `step` (1-based). Step [`STEPS`] is exactly the target.
    pub fn color_at(&self, step: u32) -> Rgb {
        lerp_colors(self.source, self.target, step, STEPS)
    }

    /// All step colors in write order
    pub fn steps(&self) -> impl Iterator<Item = Rgb> + '_ {
        (1..=STEPS).map(|step| self.color_at(step))
    }
}

/// Plays color transitions on the shared output
#[derive(Debug)]
pub struct TransitionEngine<S> {
    output: SharedOutput<S>,
}

impl<S> Clone for TransitionEngine<S> {
    fn clone(&self) -> Self {
        Self {
            output: self.output.clone(),
        }
    }
}

impl<S: ColorSink> TransitionEngine<S> {
    pub const fn new(output: SharedOutput<S>) -> Self {
        Self { output }
    }

    /// Move the zone to `target` over `duration`.
    ///
    /// Snaps with a single write when nothing was written yet, when the
    /// duration is zero or when the zone already shows `target`. Otherwise
    /// writes [`STEPS`] interpolated colors, pausing `duration / STEPS`
    /// between them. Failed intermediate steps are skipped; only the final
    /// write reports an error.
    pub fn transition(&self, target: Rgb, duration: Duration) -> Result<(), SinkError> {
        let source = match self.output.last_color() {
            Some(last) if duration.as_ticks() > 0 && last != target => last,
            _ => return self.output.write(target),
        };

        let transition = ColorTransition::new(source, target);
        let mut scheduler = FrameScheduler::new(duration / STEPS);

        for step in 1..STEPS {
            let color = transition.color_at(step);
            if let Err(err) = self.output.write(color) {
                log::warn!("transition: step {step}/{STEPS} failed: {err}");
            }
            let pause = scheduler.tick(Instant::now()).sleep_duration;
            thread::sleep(to_std(pause));
        }

        self.output.write(transition.color_at(STEPS))
    }
}
