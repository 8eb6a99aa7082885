//! Tracks whether a GUI's backing view must be recreated instead of redrawn.

use tracing::trace;

#[derive(Debug, Clone)]
pub struct DirtyTracker {
    dirty: bool,
}

impl Default for DirtyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl DirtyTracker {
    /// A new tracker starts dirty: no view exists yet.
    pub fn new() -> Self {
        Self { dirty: true }
    }

    pub fn mark(&mut self) {
        if !self.dirty {
            trace!("view marked dirty");
        }
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear(&mut self) {
        self.dirty = false;
    }
}
