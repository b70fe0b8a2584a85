//! Lifecycle dispatcher: settle passes, hook invocation and completion
//! routing.
//!
//! Invariants kept here:
//! - a key gets at most one hook in flight; `transitioning` records which
//! - every dispatched hook has a completion path, so every key that enters
//!   `transitioning` leaves it again unless the instance is torn down
//! - an appear/enter that completes after its slot was superseded is turned
//!   into exactly one leave

use tracing::{debug, trace, warn};

use crate::error::{ReplaceError, Result};
use crate::events::ReplaceEvent;
use crate::handle::{Completion, HookResult};
use crate::replace::ReplaceTransition;
use crate::types::{Phase, SlotKey};

impl<C, I> ReplaceTransition<C, I> {
    /// Run the settle pass owed by the last accepted update.
    ///
    /// Enters the current slot if an enter is owed, then starts the leave of
    /// every slot displaced since the previous pass. Every handle the pass
    /// needs is checked before anything fires, so a failing pass changes
    /// nothing.
    pub fn settle(&mut self) -> Result<()> {
        if self.torn_down {
            return Ok(());
        }

        if self.enter_owed {
            self.require_handle(self.current_key)?;
        }
        for &key in &self.keys_to_leave {
            self.require_handle(key)?;
        }

        if std::mem::take(&mut self.enter_owed) {
            self.perform_enter(self.current_key)?;
        }
        for key in std::mem::take(&mut self.keys_to_leave) {
            self.perform_leave(key)?;
        }

        self.events.push(ReplaceEvent::LayoutUpdated);
        self.drain_completions()
    }

    /// Hand back the token of a finished hook.
    ///
    /// Tokens of a torn-down instance, of another instance, or of a slot
    /// that was already discarded are ignored.
    pub fn complete(&mut self, done: Completion) -> Result<()> {
        if self.torn_down {
            trace!(key = %done.key(), phase = %done.phase(), "completion after teardown; ignoring");
            return Ok(());
        }
        self.completions.push_back(done);
        self.drain_completions()
    }

    pub(crate) fn perform_appear(&mut self, key: SlotKey) -> Result<()> {
        self.dispatch(key, Phase::Appear)
    }

    pub(crate) fn perform_enter(&mut self, key: SlotKey) -> Result<()> {
        self.dispatch(key, Phase::Enter)?;
        self.request_size_settle();
        Ok(())
    }

    pub(crate) fn perform_leave(&mut self, key: SlotKey) -> Result<()> {
        self.dispatch(key, Phase::Leave)?;
        // The entering child drives the size when there is one.
        if self.current_child.is_none() {
            self.request_size_settle();
        }
        Ok(())
    }

    /// Process every queued completion. A failing completion does not
    /// strand the ones queued behind it; the first error is returned once
    /// the queue is empty.
    pub(crate) fn drain_completions(&mut self) -> Result<()> {
        let mut first_error = None;
        while let Some(done) = self.completions.pop_front() {
            if let Err(err) = self.handle_completion(done) {
                warn!(error = %err, "completion could not be processed");
                first_error.get_or_insert(err);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    fn dispatch(&mut self, key: SlotKey, phase: Phase) -> Result<()> {
        if let Some(in_flight) = self.transitioning.get(&key) {
            warn!(key = %key, phase = %phase, in_flight = %in_flight, "slot already transitioning; not dispatching");
            return Ok(());
        }

        let (enabled, timeout) = match phase {
            Phase::Appear => (true, self.config.appear_timeout()),
            Phase::Enter => (self.config.enter, self.config.enter_timeout()),
            Phase::Leave => (self.config.leave, self.config.leave_timeout()),
        };
        let done = Completion::new(self.instance, key, phase);
        let handle = self
            .handles
            .get_mut(key)
            .ok_or(ReplaceError::MissingHandle(key))?;

        // A disabled transition keeps the bookkeeping and finishes at once.
        let result = if enabled {
            match phase {
                Phase::Appear => handle.on_appear(done, timeout),
                Phase::Enter => handle.on_enter(done, timeout),
                Phase::Leave => handle.on_leave(done, timeout),
            }
        } else {
            HookResult::Done(done)
        };

        self.transitioning.insert(key, phase);
        self.events.push(ReplaceEvent::HookDispatched { key, phase });
        debug!(key = %key, phase = %phase, enabled, ?timeout, "dispatched lifecycle hook");

        if let HookResult::Done(done) = result {
            self.completions.push_back(done);
        }
        Ok(())
    }

    fn handle_completion(&mut self, done: Completion) -> Result<()> {
        let (key, phase) = (done.key(), done.phase());
        if done.instance() != self.instance {
            warn!(key = %key, phase = %phase, "completion belongs to another transition; ignoring");
            return Ok(());
        }
        if self.transitioning.get(&key) != Some(&phase) {
            debug!(key = %key, phase = %phase, "stale completion; ignoring");
            return Ok(());
        }
        self.transitioning.remove(&key);
        self.events.push(ReplaceEvent::HookCompleted { key, phase });

        match phase {
            Phase::Appear | Phase::Enter if key != self.current_key => {
                debug!(key = %key, phase = %phase, "slot superseded before it settled; leaving");
                self.events.push(ReplaceEvent::Rerouted { key, phase });
                if !self.handles.contains(key) {
                    // Unmounted by the host; nothing left to run the leave on.
                    self.discard_slot(key);
                    return Err(ReplaceError::MissingHandle(key));
                }
                self.perform_leave(key)
            }
            Phase::Appear => Ok(()),
            Phase::Enter => {
                self.clear_height();
                Ok(())
            }
            Phase::Leave => {
                self.discard_slot(key);
                Ok(())
            }
        }
    }

    /// Forget a displaced slot: its leaving entry and its handle.
    fn discard_slot(&mut self, key: SlotKey) {
        self.leaving.remove(&key);
        self.handles.release(key);
        self.events.push(ReplaceEvent::SlotDiscarded { key });
        if self.current_child.is_none() {
            self.clear_height();
        }
        debug!(key = %key, "slot discarded");
    }

    fn clear_height(&mut self) {
        if self.size.clear_height() {
            self.events.push(ReplaceEvent::SizeChanged {
                size: self.size.size(),
            });
        }
    }

    fn request_size_settle(&mut self) {
        if self.size.request_settle() {
            self.events.push(ReplaceEvent::FrameRequested);
        } else {
            trace!("size settle already pending");
        }
    }
}
