//! Frame scheduling and timing utilities.
//!
//! Deadline-based pacing for the step and tick loops. The scheduler never
//! sleeps itself; the caller decides how to wait (plain sleep for
//! transitions, interruptible wait for the rainbow).

use embassy_time::{Duration, Instant};

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler with drift correction.
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(Duration::from_millis(10));
///
/// loop {
///     write_frame();
///     let result = scheduler.tick(Instant::now());
///     sleep(result.sleep_duration);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    next_frame: Option<Instant>,
    frame_duration: Duration,
}

impl FrameScheduler {
    pub const fn new(frame_duration: Duration) -> Self {
        Self {
            next_frame: None,
            frame_duration,
        }
    }

    /// Mark a frame as done and return timing information.
    ///
    /// The first call anchors the schedule at `now`. The returned sleep is
    /// never longer than one frame.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let mut frame_start = self.next_frame.unwrap_or(now);

        // Drift correction: if we've fallen too far behind, reset to now
        // This prevents catch-up bursts after long stalls
        let max_drift = self.frame_duration * 2;
        if now > frame_start + max_drift {
            frame_start = now;
        }

        let next_frame = frame_start + self.frame_duration;
        self.next_frame = Some(next_frame);

        let sleep_duration = if next_frame > now {
            (next_frame - now).min(self.frame_duration)
        } else {
            Duration::from_ticks(0)
        };

        FrameResult {
            next_deadline: next_frame,
            sleep_duration,
        }
    }

    /// Forget the current schedule
    pub fn reset(&mut self) {
        self.next_frame = None;
    }
}

/// Convert to a std duration for thread waits
pub(crate) fn to_std(duration: Duration) -> std::time::Duration {
    std::time::Duration::from_micros(duration.as_micros())
}
