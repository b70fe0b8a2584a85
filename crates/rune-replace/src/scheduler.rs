//! Coalescing request flag for deferred work.
//!
//! Any number of requests made before the deferred callback fires collapse
//! into one firing. The flag knows nothing about paint frames; a headless
//! host can drive it as a debounced task queue.

/// Pending-flag guarded request.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Debounced {
    pending: bool,
}

impl Debounced {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for a firing. Returns `true` only when this call scheduled it,
    /// i.e. the host must arrange the callback.
    pub fn request(&mut self) -> bool {
        if self.pending {
            return false;
        }
        self.pending = true;
        true
    }

    /// Consume the pending request from inside the callback. Returns `false`
    /// for a callback nothing asked for.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}
