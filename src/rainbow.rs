//! Rainbow cycling
//!
//! One background thread walks the hue circle a degree per tick at full
//! saturation and brightness. Stopping is synchronous: [`RainbowDriver::stop`]
//! returns only after the thread has exited, so no stale frame can land
//! after it.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use embassy_time::{Duration, Instant};

use crate::color::{HUE_CIRCLE, hue_to_rgb};
use crate::frame_scheduler::{FrameScheduler, to_std};
use crate::output::SharedOutput;
use crate::{ColorSink, LightError};

const THREAD_NAME: &str = "rainbow";

/// Hue for an unbounded frame counter
#[allow(clippy::cast_possible_truncation)]
pub fn frame_hue(counter: u64) -> u16 {
    (counter % u64::from(HUE_CIRCLE)) as u16
}

/// A running animation: cancellation handle plus the thread to join
#[derive(Debug)]
struct RainbowSession {
    cancel: Sender<()>,
    handle: JoinHandle<u64>,
    tick: Duration,
}

/// Starts and stops rainbow sessions. At most one session is alive.
#[derive(Debug)]
pub struct RainbowDriver<S: ColorSink + 'static> {
    output: SharedOutput<S>,
    session: Option<RainbowSession>,
}

impl<S: ColorSink + 'static> RainbowDriver<S> {
    pub const fn new(output: SharedOutput<S>) -> Self {
        Self {
            output,
            session: None,
        }
    }

    pub const fn is_running(&self) -> bool {
        self.session.is_some()
    }

    /// Tick interval of the running session
    pub fn tick(&self) -> Option<Duration> {
        self.session.as_ref().map(|session| session.tick)
    }

    /// Start a new session, stopping the previous one first
    pub fn start(&mut self, tick: Duration) -> Result<(), LightError> {
        self.stop();

        let (cancel, cancelled) = mpsc::channel();
        let output = self.output.clone();
        let handle = thread::Builder::new()
            .name(THREAD_NAME.into())
            .spawn(move || run(&output, tick, &cancelled))
            .map_err(LightError::Spawn)?;

        log::info!("rainbow: started, tick {} ms", tick.as_millis());
        self.session = Some(RainbowSession {
            cancel,
            handle,
            tick,
        });
        Ok(())
    }

    /// Stop the running session and wait for its thread to exit.
    ///
    /// No-op when idle.
    pub fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };
        // The loop also treats a dropped sender as cancellation
        let _ = session.cancel.send(());
        match session.handle.join() {
            Ok(frames) => log::info!("rainbow: stopped after {frames} frames"),
            Err(_) => log::error!("rainbow: animation thread panicked"),
        }
    }
}

impl<S: ColorSink + 'static> Drop for RainbowDriver<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Animation loop. Returns the number of frames produced.
fn run<S: ColorSink>(output: &SharedOutput<S>, tick: Duration, cancelled: &Receiver<()>) -> u64 {
    let mut scheduler = FrameScheduler::new(tick);
    let mut counter: u64 = 0;

    loop {
        if !matches!(cancelled.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }

        let color = hue_to_rgb(frame_hue(counter));
        if let Err(err) = output.write(color) {
            log::debug!("rainbow: dropped frame {counter}: {err}");
        }
        counter += 1;

        let wait = scheduler.tick(Instant::now()).sleep_duration;
        match cancelled.recv_timeout(to_std(wait)) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    counter
}
