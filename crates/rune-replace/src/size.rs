//! Size tracking for the container box.
//!
//! On replacement the container is pinned to the displaced child's measured
//! size; one paint frame later it is re-pinned to the new child's size, and
//! the styling's height/width transition animates between the two. Once the
//! new child finishes entering the height override is dropped again; a
//! tracked width keeps its last measured value.

use crate::handle::TransitionChild;
use crate::scheduler::Debounced;
use crate::types::AnimatedSize;

#[derive(Debug, Default)]
pub struct SizeTracker {
    track_width: bool,
    size: AnimatedSize,
    frame: Debounced,
}

impl SizeTracker {
    pub fn new(track_width: bool) -> Self {
        Self {
            track_width,
            size: AnimatedSize::NATURAL,
            frame: Debounced::new(),
        }
    }

    pub fn size(&self) -> AnimatedSize {
        self.size
    }

    pub fn tracks_width(&self) -> bool {
        self.track_width
    }

    /// Live size of `child`, or a collapsed box when there is no child.
    pub fn measure(&self, child: Option<&dyn TransitionChild>) -> AnimatedSize {
        match child {
            Some(child) => AnimatedSize::measured(
                child.measure_height(),
                self.track_width.then(|| child.measure_width()),
            ),
            None => AnimatedSize::collapsed(self.track_width),
        }
    }

    /// Pin the container to `size`. Returns whether anything changed.
    pub fn set(&mut self, size: AnimatedSize) -> bool {
        let changed = self.size != size;
        self.size = size;
        changed
    }

    /// Let the box pick its own height again. The width is left as is. A
    /// pending re-measurement is dropped with the override, otherwise it
    /// would pin the height again.
    pub fn clear_height(&mut self) -> bool {
        self.frame.take();
        self.set(AnimatedSize {
            height: None,
            ..self.size
        })
    }

    /// Ask for a re-measurement on the next frame. Returns `true` when the
    /// host has to schedule the frame callback.
    pub fn request_settle(&mut self) -> bool {
        self.frame.request()
    }

    /// Consume the pending frame request.
    pub fn take_request(&mut self) -> bool {
        self.frame.take()
    }

    pub fn is_pending(&self) -> bool {
        self.frame.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handle::{Completion, HookResult};
    use std::time::Duration;

    struct Box2D {
        height: f64,
        width: f64,
    }

    impl TransitionChild for Box2D {
        fn on_appear(&mut self, _: Completion, _: Option<Duration>) -> HookResult {
            HookResult::Pending
        }

        fn on_enter(&mut self, _: Completion, _: Option<Duration>) -> HookResult {
            HookResult::Pending
        }

        fn on_leave(&mut self, _: Completion, _: Option<Duration>) -> HookResult {
            HookResult::Pending
        }

        fn measure_height(&self) -> f64 {
            self.height
        }

        fn measure_width(&self) -> f64 {
            self.width
        }
    }

    #[test]
    fn test_measure_without_width_tracking() {
        let tracker = SizeTracker::new(false);
        let child = Box2D {
            height: 40.0,
            width: 300.0,
        };
        assert_eq!(
            tracker.measure(Some(&child)),
            AnimatedSize::measured(40.0, None)
        );
        assert_eq!(tracker.measure(None), AnimatedSize::measured(0.0, None));
    }

    #[test]
    fn test_measure_with_width_tracking() {
        let tracker = SizeTracker::new(true);
        let child = Box2D {
            height: 40.0,
            width: 300.0,
        };
        assert_eq!(
            tracker.measure(Some(&child)),
            AnimatedSize::measured(40.0, Some(300.0))
        );
        assert_eq!(tracker.measure(None), AnimatedSize::measured(0.0, Some(0.0)));
    }

    #[test]
    fn test_set_and_clear_height() {
        let mut tracker = SizeTracker::new(false);
        assert!(tracker.size().is_natural());
        assert!(tracker.set(AnimatedSize::measured(10.0, None)));
        assert!(!tracker.set(AnimatedSize::measured(10.0, None)));
        assert!(tracker.request_settle());
        assert!(tracker.clear_height());
        assert!(tracker.size().is_natural());
        assert!(!tracker.is_pending());
        assert!(!tracker.clear_height());
    }

    #[test]
    fn test_clear_height_keeps_tracked_width() {
        let mut tracker = SizeTracker::new(true);
        tracker.set(AnimatedSize::measured(40.0, Some(80.0)));
        assert!(tracker.clear_height());
        assert_eq!(
            tracker.size(),
            AnimatedSize {
                height: None,
                width: Some(80.0)
            }
        );
    }

    #[test]
    fn test_frame_requests_coalesce() {
        let mut tracker = SizeTracker::new(false);
        assert!(tracker.request_settle());
        assert!(!tracker.request_settle());
        assert!(tracker.is_pending());
        assert!(tracker.take_request());
        assert!(!tracker.is_pending());
    }
}
