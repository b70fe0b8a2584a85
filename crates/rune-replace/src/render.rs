//! What the host draws for the current state.
//!
//! The container is always positioned so that absolutely positioned slots
//! stack inside it. Leaving slots are drawn first (ascending key), then the
//! current slot on top of them.

use std::time::Duration;

use rune_config::{TransitionConfig, TransitionName};

use crate::replace::ReplaceTransition;
use crate::types::SlotKey;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Relative,
    /// Stretched over the container (top/right/bottom/left 0).
    Absolute,
}

/// Style of the container element.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerStyle {
    pub position: Position,
    pub overflow_hidden: bool,
    pub height: Option<f64>,
    pub width: Option<f64>,
    /// Height transition class, present while the height is overridden.
    pub class_name: Option<String>,
}

/// Settings every wrapped child transition receives.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildProps {
    pub name: TransitionName,
    pub appear: bool,
    pub enter: bool,
    pub leave: bool,
    pub appear_timeout: Option<Duration>,
    pub enter_timeout: Option<Duration>,
    pub leave_timeout: Option<Duration>,
}

impl ChildProps {
    pub fn from_config(config: &TransitionConfig) -> Self {
        Self {
            name: config.transition_name.without_height(),
            appear: config.appear,
            enter: config.enter,
            leave: config.leave,
            appear_timeout: config.appear_timeout(),
            enter_timeout: config.enter_timeout(),
            leave_timeout: config.leave_timeout(),
        }
    }
}

/// One child slot to draw.
#[derive(Debug)]
pub struct RenderedSlot<'a, C> {
    pub key: SlotKey,
    pub child: &'a C,
    pub position: Position,
    /// Set on leaving slots when `notify_leaving` is configured.
    pub is_leaving: bool,
}

#[derive(Debug)]
pub struct RenderPlan<'a, C> {
    pub container: ContainerStyle,
    pub child_props: ChildProps,
    pub slots: Vec<RenderedSlot<'a, C>>,
}

impl<'a, C> RenderPlan<'a, C> {
    pub fn slot(&self, key: SlotKey) -> Option<&RenderedSlot<'a, C>> {
        self.slots.iter().find(|slot| slot.key == key)
    }

    pub fn keys(&self) -> Vec<SlotKey> {
        self.slots.iter().map(|slot| slot.key).collect()
    }
}

impl<C, I> ReplaceTransition<C, I> {
    pub fn render(&self) -> RenderPlan<'_, C> {
        let size = self.size.size();
        let container = ContainerStyle {
            position: Position::Relative,
            overflow_hidden: self.config.clip_overflow,
            height: size.height,
            width: size.width,
            class_name: size
                .height
                .map(|_| self.config.transition_name.height_class()),
        };

        let mut slots: Vec<_> = self
            .leaving
            .iter()
            .map(|(&key, child)| RenderedSlot {
                key,
                child,
                position: Position::Absolute,
                is_leaving: self.config.notify_leaving,
            })
            .collect();

        if let Some(child) = self.current_child.as_ref() {
            // Absolute while transitioning keeps the current child stacked
            // on top of the leaving ones.
            let position = if self.transitioning.contains_key(&self.current_key) {
                Position::Absolute
            } else {
                Position::Relative
            };
            slots.push(RenderedSlot {
                key: self.current_key,
                child,
                position,
                is_leaving: false,
            });
        }

        RenderPlan {
            container,
            child_props: ChildProps::from_config(&self.config),
            slots,
        }
    }
}
