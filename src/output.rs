//! Shared output state
//!
//! The zone has a single writer at a time. [`SharedOutput`] owns the sink
//! together with the last color that reached it, so the transition engine
//! and the rainbow loop agree on where the hardware currently is.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::{ColorSink, Rgb, SinkError};

#[derive(Debug)]
struct OutputState<S> {
    sink: S,
    /// Last successfully written color, `None` before the first write
    last: Option<Rgb>,
}

/// Sink plus last written color behind one lock.
///
/// Cloning yields another handle to the same state.
#[derive(Debug)]
pub struct SharedOutput<S> {
    inner: Arc<Mutex<OutputState<S>>>,
}

impl<S> Clone for SharedOutput<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ColorSink> SharedOutput<S> {
    pub fn new(sink: S) -> Self {
        Self::with_last_color(sink, None)
    }

    /// Start from a color the zone is assumed to already show
    pub fn with_last_color(sink: S, last: Option<Rgb>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(OutputState { sink, last })),
        }
    }

    /// Write a color and record it as current on success.
    ///
    /// The lock is held for the duration of the sink call.
    pub fn write(&self, color: Rgb) -> Result<(), SinkError> {
        let mut state = self.lock();
        state.sink.write(color)?;
        state.last = Some(color);
        Ok(())
    }

    /// Last color that reached the device
    pub fn last_color(&self) -> Option<Rgb> {
        self.lock().last
    }

    fn lock(&self) -> MutexGuard<'_, OutputState<S>> {
        // A panicking sink leaves `last` untouched, so the state stays usable
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
