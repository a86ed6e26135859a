//! Animated vertical scrolling for the smooth-scroll shim.
//!
//! A [`ScrollAnimation`] maps animation-frame timestamps to scroll offsets.
//! An [`AnimationSlot`] owns at most one animation per scroll container:
//! starting a new one supersedes the old, and frames scheduled for the old
//! one are recognized by their generation and dropped.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Ease-in-out cubic timing curve over `t` in `[0, 1]`.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// Whether the click shim should be installed at all.
///
/// Browsers with native smooth scrolling get no listener, so their anchor
/// clicks keep native behavior.
#[must_use]
pub fn shim_needed(enabled: bool, native_support: bool) -> bool {
    enabled && !native_support
}

/// Absolute document offset of an element whose viewport-relative top is `rect_top`.
#[must_use]
pub fn target_offset(rect_top: f64, scroll_y: f64) -> f64 {
    rect_top + scroll_y
}

/// Round half up, matching the browser's `Math.round`.
fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// One scroll position to apply, and whether the animation has finished.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollFrame {
    pub position: f64,
    pub done: bool,
}

/// A single scroll from `start` to `target` over a fixed duration.
///
/// The clock starts at the timestamp of the first frame, not at creation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollAnimation {
    start: f64,
    target: f64,
    duration_ms: f64,
    start_time: Option<f64>,
}

impl ScrollAnimation {
    #[must_use]
    pub fn new(start: f64, target: f64, duration_ms: f64) -> Self {
        Self { start, target, duration_ms, start_time: None }
    }

    /// Elapsed fraction at `now_ms`, clamped to `[0, 1]`.
    #[must_use]
    pub fn progress(&self, now_ms: f64) -> f64 {
        let Some(start_time) = self.start_time else {
            return 0.0;
        };
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - start_time) / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Advance to the frame at `now_ms`.
    pub fn step(&mut self, now_ms: f64) -> ScrollFrame {
        if self.start_time.is_none() {
            self.start_time = Some(now_ms);
        }
        let t = self.progress(now_ms);
        let eased = ease_in_out_cubic(t);
        let position = round_half_up(self.start + (self.target - self.start) * eased);
        ScrollFrame { position, done: t >= 1.0 }
    }

    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }
}

/// Handle returned when an animation takes over the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Started {
    pub generation: u64,
    /// Frame request of the superseded animation, to be cancelled by the caller.
    pub cancel_frame: Option<i32>,
}

/// Owns the single in-flight animation of one scroll container.
#[derive(Debug, Default)]
pub struct AnimationSlot {
    generation: u64,
    active: Option<ScrollAnimation>,
    pending_frame: Option<i32>,
}

impl AnimationSlot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any in-flight animation with `animation`.
    pub fn start(&mut self, animation: ScrollAnimation) -> Started {
        if self.active.is_some() {
            log::debug!("scroll: superseding in-flight animation {}", self.generation);
        }
        self.generation = self.generation.wrapping_add(1);
        self.active = Some(animation);
        Started { generation: self.generation, cancel_frame: self.pending_frame.take() }
    }

    /// Record the frame request scheduled for `generation`. Stale generations are ignored.
    pub fn set_pending_frame(&mut self, generation: u64, frame_id: i32) {
        if generation == self.generation && self.active.is_some() {
            self.pending_frame = Some(frame_id);
        }
    }

    /// Run the frame for `generation` at `now_ms`.
    ///
    /// Returns `None` when that animation was superseded or cancelled. A frame
    /// with `done` set releases the slot.
    pub fn step(&mut self, generation: u64, now_ms: f64) -> Option<ScrollFrame> {
        if generation != self.generation {
            return None;
        }
        let animation = self.active.as_mut()?;
        self.pending_frame = None;
        let frame = animation.step(now_ms);
        if frame.done {
            self.active = None;
        }
        Some(frame)
    }

    /// Stop the in-flight animation, returning its frame request to cancel.
    pub fn cancel(&mut self) -> Option<i32> {
        self.active = None;
        self.generation = self.generation.wrapping_add(1);
        self.pending_frame.take()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }
}
