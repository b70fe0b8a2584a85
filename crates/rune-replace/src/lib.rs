//! Animated replacement of a single child inside a size-tracking container.
//!
//! When the displayed child changes identity, the previous child stays
//! mounted and runs its leave transition while the new child runs its enter
//! transition, and the container's height (optionally width) is pinned and
//! re-pinned so that styling can animate it between the two sizes.
//!
//! # Architecture
//!
//! ```text
//! ReplaceTransition
//!   ├── Replacement controller  submit() mints slot keys, fills the leaving set
//!   ├── Lifecycle dispatcher    settle()/complete() fire and route hooks
//!   ├── Size tracker            pins the box, re-measures on the next frame
//!   ├── HandleRegistry          live TransitionChild per slot key
//!   └── EventQueue              what happened, drained by the host
//! ```
//!
//! Everything runs on one thread. The only deferred paths are hook
//! completions (handed back as [`Completion`] tokens) and the frame callback
//! requested through [`ReplaceEvent::FrameRequested`].

pub mod child;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod events;
pub mod handle;
pub mod render;
pub mod replace;
pub mod scheduler;
pub mod size;
pub mod types;

pub use child::{IdentityFn, only_child};
pub use error::{ReplaceError, Result};
pub use events::{EventQueue, ReplaceEvent};
pub use handle::{Completion, HandleRegistry, HookResult, TransitionChild};
pub use render::{ChildProps, ContainerStyle, Position, RenderPlan, RenderedSlot};
pub use replace::{ReplaceSnapshot, ReplaceTransition};
pub use rune_config::{TransitionClasses, TransitionConfig, TransitionName};
pub use scheduler::Debounced;
pub use size::SizeTracker;
pub use types::{AnimatedSize, InstanceId, Phase, SlotKey};
