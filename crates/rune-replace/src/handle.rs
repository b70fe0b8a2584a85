//! Child transition collaborator contract and the handle registry.
//!
//! The replace transition never applies styling itself. Each rendered child
//! is wrapped by a collaborator implementing [`TransitionChild`], which runs
//! the visual appear/enter/leave transition and reports back through a
//! [`Completion`] token.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use crate::types::{InstanceId, Phase, SlotKey};

/// Proof that a lifecycle hook finished.
///
/// Each dispatched hook receives exactly one token. Tokens cannot be cloned,
/// so a hook completes at most once. Hand the token back through
/// `ReplaceTransition::complete` when the visual transition is over.
pub struct Completion {
    instance: InstanceId,
    key: SlotKey,
    phase: Phase,
}

impl Completion {
    pub(crate) fn new(instance: InstanceId, key: SlotKey, phase: Phase) -> Self {
        Self {
            instance,
            key,
            phase,
        }
    }

    /// Slot the finished hook belongs to.
    pub fn key(&self) -> SlotKey {
        self.key
    }

    /// Which hook finished.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn instance(&self) -> InstanceId {
        self.instance
    }
}

impl fmt::Debug for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Completion")
            .field("key", &self.key)
            .field("phase", &self.phase)
            .finish()
    }
}

/// Outcome of invoking a lifecycle hook.
#[derive(Debug)]
pub enum HookResult {
    /// The transition is running; the token will come back later.
    Pending,
    /// The transition finished synchronously.
    Done(Completion),
}

/// A live rendered child wrapped in its transition collaborator.
pub trait TransitionChild {
    /// Start the appear transition.
    fn on_appear(&mut self, done: Completion, timeout: Option<Duration>) -> HookResult;

    /// Start the enter transition.
    fn on_enter(&mut self, done: Completion, timeout: Option<Duration>) -> HookResult;

    /// Start the leave transition.
    fn on_leave(&mut self, done: Completion, timeout: Option<Duration>) -> HookResult;

    /// Current rendered height in layout units.
    fn measure_height(&self) -> f64;

    /// Current rendered width in layout units.
    fn measure_width(&self) -> f64;
}

/// Live child handles indexed by slot key. One owner per key.
#[derive(Default)]
pub struct HandleRegistry {
    handles: BTreeMap<SlotKey, Box<dyn TransitionChild>>,
}

impl HandleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a handle. Returns `false` and drops `handle` when the key is
    /// already owned.
    pub fn register(&mut self, key: SlotKey, handle: Box<dyn TransitionChild>) -> bool {
        if self.handles.contains_key(&key) {
            return false;
        }
        self.handles.insert(key, handle);
        true
    }

    /// Drop the handle for `key`, if any.
    pub fn release(&mut self, key: SlotKey) -> bool {
        self.handles.remove(&key).is_some()
    }

    pub fn get(&self, key: SlotKey) -> Option<&dyn TransitionChild> {
        self.handles.get(&key).map(|handle| &**handle)
    }

    pub fn get_mut(&mut self, key: SlotKey) -> Option<&mut (dyn TransitionChild + 'static)> {
        self.handles.get_mut(&key).map(|handle| &mut **handle)
    }

    pub fn contains(&self, key: SlotKey) -> bool {
        self.handles.contains_key(&key)
    }

    pub fn keys(&self) -> impl Iterator<Item = SlotKey> + '_ {
        self.handles.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }
}

impl fmt::Debug for HandleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handles.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(f64);

    impl TransitionChild for Fixed {
        fn on_appear(&mut self, done: Completion, _: Option<Duration>) -> HookResult {
            HookResult::Done(done)
        }

        fn on_enter(&mut self, done: Completion, _: Option<Duration>) -> HookResult {
            HookResult::Done(done)
        }

        fn on_leave(&mut self, done: Completion, _: Option<Duration>) -> HookResult {
            HookResult::Done(done)
        }

        fn measure_height(&self) -> f64 {
            self.0
        }

        fn measure_width(&self) -> f64 {
            self.0 * 2.0
        }
    }

    #[test]
    fn test_registry_single_owner_per_key() {
        let mut registry = HandleRegistry::new();
        assert!(registry.register(SlotKey(1), Box::new(Fixed(10.0))));
        assert!(!registry.register(SlotKey(1), Box::new(Fixed(99.0))));

        let handle = registry.get(SlotKey(1)).unwrap();
        assert_eq!(handle.measure_height(), 10.0);
        assert_eq!(handle.measure_width(), 20.0);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_registry_release() {
        let mut registry = HandleRegistry::new();
        registry.register(SlotKey(1), Box::new(Fixed(1.0)));
        registry.register(SlotKey(2), Box::new(Fixed(2.0)));

        assert!(registry.release(SlotKey(1)));
        assert!(!registry.release(SlotKey(1)));
        assert!(!registry.contains(SlotKey(1)));
        assert_eq!(registry.keys().collect::<Vec<_>>(), vec![SlotKey(2)]);
    }

    #[test]
    fn test_hook_hands_back_token() {
        let mut handle = Fixed(0.0);
        let token = Completion::new(InstanceId(7), SlotKey(3), Phase::Enter);
        match handle.on_enter(token, None) {
            HookResult::Done(done) => {
                assert_eq!(done.key(), SlotKey(3));
                assert_eq!(done.phase(), Phase::Enter);
                assert_eq!(done.instance(), InstanceId(7));
            }
            HookResult::Pending => panic!("expected synchronous completion"),
        }
    }
}
