//! Replacement controller: accepting externally supplied child updates.

use tracing::{debug, trace};

use crate::child::only_child;
use crate::error::Result;
use crate::events::ReplaceEvent;
use crate::replace::ReplaceTransition;
use crate::types::AnimatedSize;

impl<C, I> ReplaceTransition<C, I>
where
    I: PartialEq,
{
    /// Accept the externally supplied children. Fails when more than one
    /// child is supplied.
    pub fn submit_children(&mut self, children: Vec<C>) -> Result<()> {
        let next = only_child(children)?;
        self.submit(next)
    }

    /// Accept the externally supplied child.
    ///
    /// An update with the same identity as the current child (or absence
    /// following absence) changes nothing. Anything else is a replacement:
    /// a new slot key is minted, the displaced child joins the leaving set
    /// and the container is pinned to the displaced child's size, measured
    /// now, before the new child mounts.
    ///
    /// Hooks are not dispatched here. Render, register the new slot's
    /// handle, then call [`ReplaceTransition::settle`].
    pub fn submit(&mut self, next: Option<C>) -> Result<()> {
        if self.torn_down {
            trace!("child update after teardown; ignoring");
            return Ok(());
        }
        if self.is_same_child(next.as_ref()) {
            trace!(key = %self.current_key, "child identity unchanged");
            return Ok(());
        }

        let displaced_key = self.current_key;
        let seed = match self.current_child {
            Some(_) => {
                let displaced = self.require_handle(displaced_key)?;
                self.size.measure(Some(displaced))
            }
            None => AnimatedSize::collapsed(self.size.tracks_width()),
        };

        let displaced = std::mem::replace(&mut self.current_child, next);
        self.current_key = displaced_key.next();
        if self.size.set(seed) {
            self.events.push(ReplaceEvent::SizeChanged { size: seed });
        }
        self.enter_owed = self.current_child.is_some();

        if let Some(child) = displaced {
            self.leaving.insert(displaced_key, child);
            if self.transitioning.contains_key(&displaced_key) {
                // Its appear/enter completion routes it into leave.
                debug!(key = %displaced_key, "displaced slot still transitioning");
            } else {
                self.keys_to_leave.push(displaced_key);
            }
        }

        self.events.push(ReplaceEvent::Replaced {
            from: displaced_key,
            to: self.current_key,
        });
        debug!(
            from = %displaced_key,
            to = %self.current_key,
            has_child = self.current_child.is_some(),
            height = ?seed.height,
            "accepted replacement"
        );
        Ok(())
    }

    fn is_same_child(&self, next: Option<&C>) -> bool {
        match (self.current_child.as_ref(), next) {
            (None, None) => true,
            (Some(current), Some(next)) => (self.identity)(current) == (self.identity)(next),
            _ => false,
        }
    }
}
