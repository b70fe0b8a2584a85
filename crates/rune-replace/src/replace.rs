//! The replace transition component.
//!
//! `ReplaceTransition` owns every piece of state the transition needs in one
//! struct. Behaviour is split by concern:
//! - `controller.rs`: accepting child updates (`submit`)
//! - `dispatcher.rs`: settle passes and hook completions
//! - `render.rs`: describing what the host must draw
//!
//! This file holds construction, handle registration, mount/teardown, the
//! frame callback and read-only introspection.
//!
//! # Host protocol
//!
//! ```text
//! new ─► render ─► register_handle(..) ─► mount
//!                                          │
//!    ┌─────────────────────────────────────┘
//!    ▼
//! submit ─► render ─► register_handle(new slots) ─► settle
//!    ▲                                               │
//!    │        complete(token)   on_frame()  ◄────────┘ (FrameRequested)
//!    └──────────── any time, in any order ───────────
//! ```

use std::collections::{BTreeMap, VecDeque};

use rune_config::TransitionConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::child::{IdentityFn, only_child};
use crate::error::{ReplaceError, Result};
use crate::events::{EventQueue, ReplaceEvent};
use crate::handle::{Completion, HandleRegistry, TransitionChild};
use crate::size::SizeTracker;
use crate::types::{AnimatedSize, InstanceId, Phase, SlotKey};

/// Animated replacement of a single child.
///
/// `C` is the child value, `I` the identity extracted from it to decide
/// whether an update is a replacement.
pub struct ReplaceTransition<C, I> {
    pub(crate) instance: InstanceId,
    pub(crate) config: TransitionConfig,
    pub(crate) identity: IdentityFn<C, I>,

    /// Key of the slot in front. Advances by one per replacement.
    pub(crate) current_key: SlotKey,
    pub(crate) current_child: Option<C>,
    /// Displaced children that have not finished leaving.
    pub(crate) leaving: BTreeMap<SlotKey, C>,
    /// Keys with an in-flight hook, and which hook it is.
    pub(crate) transitioning: BTreeMap<SlotKey, Phase>,

    /// The current key still has to be entered on the next settle pass.
    pub(crate) enter_owed: bool,
    /// Displaced keys to start leaving on the next settle pass.
    pub(crate) keys_to_leave: Vec<SlotKey>,

    pub(crate) handles: HandleRegistry,
    pub(crate) size: SizeTracker,
    /// Completions handed back synchronously, processed before the
    /// triggering call returns.
    pub(crate) completions: VecDeque<Completion>,
    pub(crate) events: EventQueue,

    pub(crate) mounted: bool,
    pub(crate) torn_down: bool,
}

/// Serializable view of the bookkeeping state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplaceSnapshot {
    pub current_key: SlotKey,
    pub has_current_child: bool,
    pub leaving: Vec<SlotKey>,
    pub transitioning: Vec<SlotKey>,
    pub size: AnimatedSize,
    pub frame_pending: bool,
    pub torn_down: bool,
}

impl<C, I> ReplaceTransition<C, I>
where
    I: PartialEq,
{
    /// Create the component around the initially supplied children.
    ///
    /// The initial child (if any) occupies [`SlotKey::INITIAL`]. Fails when
    /// more than one child is supplied.
    pub fn new(
        config: TransitionConfig,
        children: Vec<C>,
        identity: impl Fn(&C) -> I + 'static,
    ) -> Result<Self> {
        let current_child = only_child(children)?;

        for stage in config.missing_timeouts() {
            warn!(stage, "transition enabled without a timeout; the child has no fallback");
        }

        let size = SizeTracker::new(config.track_width);
        Ok(Self {
            instance: InstanceId::new(),
            config,
            identity: Box::new(identity),
            current_key: SlotKey::INITIAL,
            current_child,
            leaving: BTreeMap::new(),
            transitioning: BTreeMap::new(),
            enter_owed: false,
            keys_to_leave: Vec::new(),
            handles: HandleRegistry::new(),
            size,
            completions: VecDeque::new(),
            events: EventQueue::new(),
            mounted: false,
            torn_down: false,
        })
    }
}

impl<C, I> ReplaceTransition<C, I> {
    /// Attach the live handle of a rendered slot.
    ///
    /// Only slots currently rendered (the current one or a leaving one) can
    /// be registered, and only once. Anything else is logged and skipped:
    /// that slot simply gets no hook dispatches or measurements.
    pub fn register_handle(&mut self, key: SlotKey, handle: Box<dyn TransitionChild>) -> bool {
        if self.torn_down {
            trace!(key = %key, "handle registered after teardown; ignoring");
            return false;
        }
        if !self.is_rendered(key) {
            warn!(key = %key, "handle registered for a slot that is not rendered; ignoring");
            return false;
        }
        if !self.handles.register(key, handle) {
            warn!(key = %key, "slot already has a handle; ignoring second registration");
            return false;
        }
        trace!(key = %key, "registered child handle");
        true
    }

    /// Detach the handle of an unmounted slot.
    ///
    /// Leave completion releases handles on its own; this is for hosts that
    /// unmount a slot outside of that path.
    pub fn release_handle(&mut self, key: SlotKey) -> bool {
        if self.transitioning.contains_key(&key) {
            warn!(key = %key, "releasing the handle of a slot with a hook in flight");
        }
        self.handles.release(key)
    }

    /// Finish mounting. Runs the appear transition on the initial child when
    /// `appear` is configured. Later calls do nothing.
    ///
    /// Only the initial slot appears. If the host accepted a replacement
    /// before mounting, the new slot is entered by `settle` instead.
    pub fn mount(&mut self) -> Result<()> {
        if self.torn_down || self.mounted {
            return Ok(());
        }
        let initial = self.current_key == SlotKey::INITIAL;
        if self.config.appear && !initial {
            debug!(key = %self.current_key, "mounted after a replacement; skipping appear");
        }
        let appear = self.config.appear && initial && self.current_child.is_some();
        if appear {
            self.require_handle(self.current_key)?;
        }
        self.mounted = true;
        if appear {
            self.perform_appear(self.current_key)?;
        }
        self.drain_completions()
    }

    /// Deferred frame callback. Call it on the paint frame following a
    /// [`ReplaceEvent::FrameRequested`].
    ///
    /// Pins the container to the live size of the current child, or to a
    /// collapsed box when there is none.
    pub fn on_frame(&mut self) -> Result<()> {
        if !self.size.take_request() {
            trace!("frame callback without a pending request");
            return Ok(());
        }
        if self.torn_down {
            return Ok(());
        }

        let child = match self.current_child {
            Some(_) => Some(self.require_handle(self.current_key)?),
            None => None,
        };
        let next = self.size.measure(child);
        if self.size.set(next) {
            self.events.push(ReplaceEvent::SizeChanged { size: next });
        }
        debug!(key = %self.current_key, height = ?next.height, width = ?next.width, "settled container size");
        Ok(())
    }

    /// Tear the instance down. Pending hooks are abandoned: every later
    /// completion, frame callback or update is ignored.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.completions.clear();
        self.events.push(ReplaceEvent::TornDown);
        debug!(
            in_flight = self.transitioning.len(),
            "replace transition torn down"
        );
    }

    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    pub fn current_key(&self) -> SlotKey {
        self.current_key
    }

    pub fn current_child(&self) -> Option<&C> {
        self.current_child.as_ref()
    }

    /// Keys of the leaving set, ascending.
    pub fn leaving_keys(&self) -> Vec<SlotKey> {
        self.leaving.keys().copied().collect()
    }

    pub fn leaving_child(&self, key: SlotKey) -> Option<&C> {
        self.leaving.get(&key)
    }

    pub fn is_transitioning(&self, key: SlotKey) -> bool {
        self.transitioning.contains_key(&key)
    }

    /// Keys with a hook in flight, ascending.
    pub fn transitioning_keys(&self) -> Vec<SlotKey> {
        self.transitioning.keys().copied().collect()
    }

    pub fn animated_size(&self) -> AnimatedSize {
        self.size.size()
    }

    pub fn has_handle(&self, key: SlotKey) -> bool {
        self.handles.contains(key)
    }

    pub fn frame_pending(&self) -> bool {
        self.size.is_pending()
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn snapshot(&self) -> ReplaceSnapshot {
        ReplaceSnapshot {
            current_key: self.current_key,
            has_current_child: self.current_child.is_some(),
            leaving: self.leaving_keys(),
            transitioning: self.transitioning_keys(),
            size: self.size.size(),
            frame_pending: self.size.is_pending(),
            torn_down: self.torn_down,
        }
    }

    /// Take every event recorded since the last drain.
    pub fn drain_events(&mut self) -> Vec<ReplaceEvent> {
        self.events.drain().collect()
    }

    /// Whether `key` is currently part of the rendered output.
    pub(crate) fn is_rendered(&self, key: SlotKey) -> bool {
        (key == self.current_key && self.current_child.is_some()) || self.leaving.contains_key(&key)
    }

    pub(crate) fn require_handle(&self, key: SlotKey) -> Result<&dyn TransitionChild> {
        self.handles
            .get(key)
            .ok_or(ReplaceError::MissingHandle(key))
    }
}
