use std::sync::{Arc, Mutex, PoisonError};

use crate::{ColorSink, Rgb, SinkError};

/// In-memory sink that remembers every color it was given.
///
/// Clones share the same history, so a test can keep one handle and move
/// the other into the engine.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    writes: Arc<Mutex<Vec<Rgb>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all writes so far
    pub fn writes(&self) -> Vec<Rgb> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn last(&self) -> Option<Rgb> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }

    pub fn clear(&self) {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl ColorSink for Recorder {
    fn write(&mut self, color: Rgb) -> Result<(), SinkError> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(color);
        Ok(())
    }
}
