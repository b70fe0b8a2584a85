//! Events recorded by the replace transition.
//!
//! Every handler appends what it did to an [`EventQueue`]. The host drains
//! the queue after each call; `FrameRequested` in particular tells it to
//! schedule `ReplaceTransition::on_frame` on the next paint frame, and
//! `LayoutUpdated` is the point to clear any active text selection.
//!
//! # Usage
//!
//! ```ignore
//! transition.submit(Some(next_panel))?;
//! // ... render, register handles ...
//! transition.settle()?;
//!
//! for event in transition.drain_events() {
//!     match event {
//!         ReplaceEvent::FrameRequested => host.request_animation_frame(),
//!         ReplaceEvent::LayoutUpdated => host.clear_selection(),
//!         _ => {}
//!     }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::types::{AnimatedSize, Phase, SlotKey};

/// Something the replace transition did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplaceEvent {
    /// A replacement was accepted.
    Replaced {
        /// Key of the displaced slot.
        from: SlotKey,
        /// Key of the new current slot.
        to: SlotKey,
    },
    /// A lifecycle hook was invoked.
    HookDispatched { key: SlotKey, phase: Phase },
    /// A lifecycle hook called back.
    HookCompleted { key: SlotKey, phase: Phase },
    /// An appear or enter finished after its slot was superseded and was
    /// turned into a leave.
    Rerouted { key: SlotKey, phase: Phase },
    /// A slot finished leaving and was discarded.
    SlotDiscarded { key: SlotKey },
    /// A size re-measurement is owed on the next paint frame.
    FrameRequested,
    /// The animated container size changed.
    SizeChanged { size: AnimatedSize },
    /// A settle pass finished.
    LayoutUpdated,
    /// The instance was torn down.
    TornDown,
}

impl ReplaceEvent {
    /// The slot this event is about, if any.
    pub fn key(&self) -> Option<SlotKey> {
        match self {
            Self::Replaced { to, .. } => Some(*to),
            Self::HookDispatched { key, .. }
            | Self::HookCompleted { key, .. }
            | Self::Rerouted { key, .. }
            | Self::SlotDiscarded { key } => Some(*key),
            Self::FrameRequested | Self::SizeChanged { .. } | Self::LayoutUpdated | Self::TornDown => {
                None
            }
        }
    }

    /// Check if this is a hook dispatch for `phase`.
    pub fn is_dispatch_of(&self, phase: Phase) -> bool {
        matches!(self, Self::HookDispatched { phase: p, .. } if *p == phase)
    }
}

/// Queue for collecting events between host polls.
#[derive(Debug, Default)]
pub struct EventQueue {
    events: VecDeque<ReplaceEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ReplaceEvent) {
        self.events.push_back(event);
    }

    /// Drain all events from the queue, returning an iterator.
    pub fn drain(&mut self) -> impl Iterator<Item = ReplaceEvent> + '_ {
        self.events.drain(..)
    }
}
