//! Core identifiers and value types for the replace transition.
//!
//! - `SlotKey`: identifier of one child-occupancy episode
//! - `InstanceId`: identifier of one `ReplaceTransition` instance
//! - `Phase`: the lifecycle transition a hook belongs to
//! - `AnimatedSize`: the container's animated box dimensions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier assigned once per accepted replacement.
///
/// Keys are never reused: each replacement mints `previous + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotKey(pub u64);

impl SlotKey {
    /// Key of the first slot of every instance.
    pub const INITIAL: SlotKey = SlotKey(1);

    /// The key minted by the replacement following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl Default for SlotKey {
    fn default() -> Self {
        Self::INITIAL
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a `ReplaceTransition` instance.
///
/// Completion tokens carry it so that a token can never settle a key of
/// another instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceId(pub u64);

impl InstanceId {
    /// Generate a new unique instance ID.
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for InstanceId {
    fn default() -> Self {
        Self::new()
    }
}

/// Lifecycle transition run by a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// First child, animated on mount.
    Appear,
    /// New current child after a replacement.
    Enter,
    /// Displaced child.
    Leave,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Appear => "appear",
            Self::Enter => "enter",
            Self::Leave => "leave",
        };
        f.write_str(name)
    }
}

/// Animated container dimensions.
///
/// `None` means the dimension is not overridden and the box sizes itself
/// naturally.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimatedSize {
    pub height: Option<f64>,
    pub width: Option<f64>,
}

impl AnimatedSize {
    /// Both dimensions natural.
    pub const NATURAL: AnimatedSize = AnimatedSize {
        height: None,
        width: None,
    };

    /// Collapsed box. Width is only overridden when tracked.
    pub fn collapsed(track_width: bool) -> Self {
        Self::measured(0.0, track_width.then_some(0.0))
    }

    pub fn measured(height: f64, width: Option<f64>) -> Self {
        Self {
            height: Some(height),
            width,
        }
    }

    pub fn is_natural(&self) -> bool {
        self.height.is_none() && self.width.is_none()
    }
}
