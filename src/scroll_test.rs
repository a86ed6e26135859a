#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-12;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Easing ---

#[test]
fn easing_hits_endpoints_and_midpoint() {
    assert!(approx_eq(ease_in_out_cubic(0.0), 0.0));
    assert!(approx_eq(ease_in_out_cubic(0.5), 0.5));
    assert!(approx_eq(ease_in_out_cubic(1.0), 1.0));
}

#[test]
fn easing_is_continuous_at_half() {
    let below = ease_in_out_cubic(0.5 - 1e-9);
    let above = ease_in_out_cubic(0.5);
    assert!((above - below).abs() < 1e-6);
}

#[test]
fn easing_is_symmetric_and_monotonic() {
    let mut prev = 0.0;
    for i in 0..=100 {
        let t = f64::from(i) / 100.0;
        let eased = ease_in_out_cubic(t);
        assert!(eased >= prev, "not monotonic at t={t}");
        assert!(approx_eq(eased + ease_in_out_cubic(1.0 - t), 1.0), "not symmetric at t={t}");
        prev = eased;
    }
}

#[test]
fn easing_first_quarter_is_slow() {
    assert!(approx_eq(ease_in_out_cubic(0.25), 0.0625));
    assert!(approx_eq(ease_in_out_cubic(0.75), 0.9375));
}

// --- Feature gate ---

#[test]
fn shim_is_skipped_with_native_support_or_when_disabled() {
    assert!(shim_needed(true, false));
    assert!(!shim_needed(true, true));
    assert!(!shim_needed(false, false));
    assert!(!shim_needed(false, true));
}

// --- Target ---

#[test]
fn target_offset_adds_current_scroll() {
    assert_eq!(target_offset(250.0, 1000.0), 1250.0);
    assert_eq!(target_offset(-300.0, 1000.0), 700.0);
}

// --- ScrollAnimation ---

#[test]
fn first_frame_starts_the_clock_at_start_position() {
    let mut anim = ScrollAnimation::new(100.0, 900.0, 468.0);
    assert_eq!(anim.progress(5000.0), 0.0);
    let frame = anim.step(5000.0);
    assert_eq!(frame, ScrollFrame { position: 100.0, done: false });
}

#[test]
fn midpoint_frame_is_halfway() {
    let mut anim = ScrollAnimation::new(0.0, 1000.0, 400.0);
    anim.step(0.0);
    let frame = anim.step(200.0);
    assert_eq!(frame.position, 500.0);
    assert!(!frame.done);
}

#[test]
fn final_frame_lands_on_target_and_finishes() {
    let mut anim = ScrollAnimation::new(0.0, 777.0, 468.0);
    anim.step(10.0);
    let frame = anim.step(10.0 + 468.0);
    assert_eq!(frame, ScrollFrame { position: 777.0, done: true });
    // Late frames clamp rather than overshoot.
    assert_eq!(anim.step(10_000.0).position, 777.0);
}

#[test]
fn positions_are_rounded_to_integers() {
    let mut anim = ScrollAnimation::new(0.0, 333.0, 468.0);
    anim.step(0.0);
    for now in [16.0, 33.0, 50.0, 117.0, 234.0, 401.0] {
        let position = anim.step(now).position;
        assert_eq!(position, position.trunc(), "fractional position at {now}");
    }
}

#[test]
fn rounding_matches_half_up() {
    assert_eq!(round_half_up(2.5), 3.0);
    assert_eq!(round_half_up(-2.5), -2.0);
    assert_eq!(round_half_up(2.49), 2.0);
}

#[test]
fn upward_scroll_moves_toward_smaller_offsets() {
    let mut anim = ScrollAnimation::new(1200.0, 200.0, 468.0);
    anim.step(0.0);
    let mid = anim.step(234.0);
    assert_eq!(mid.position, 700.0);
    assert_eq!(anim.target(), 200.0);
}

// --- AnimationSlot ---

#[test]
fn slot_runs_animation_to_completion_and_releases() {
    let mut slot = AnimationSlot::new();
    let started = slot.start(ScrollAnimation::new(0.0, 100.0, 100.0));
    assert_eq!(started.cancel_frame, None);
    assert!(slot.is_active());

    assert_eq!(slot.step(started.generation, 0.0).map(|f| f.done), Some(false));
    assert_eq!(slot.step(started.generation, 100.0).map(|f| f.done), Some(true));
    assert!(!slot.is_active());
    assert_eq!(slot.step(started.generation, 120.0), None);
}

#[test]
fn new_animation_supersedes_and_cancels_pending_frame() {
    let mut slot = AnimationSlot::new();
    let first = slot.start(ScrollAnimation::new(0.0, 500.0, 468.0));
    slot.step(first.generation, 0.0);
    slot.set_pending_frame(first.generation, 41);

    let second = slot.start(ScrollAnimation::new(120.0, 900.0, 468.0));
    assert_ne!(first.generation, second.generation);
    assert_eq!(second.cancel_frame, Some(41));

    // A frame that slipped through for the first animation is ignored.
    assert_eq!(slot.step(first.generation, 16.0), None);
    let frame = slot.step(second.generation, 16.0).map(|f| f.position);
    assert_eq!(frame, Some(120.0));
}

#[test]
fn stale_pending_frame_is_not_recorded() {
    let mut slot = AnimationSlot::new();
    let first = slot.start(ScrollAnimation::new(0.0, 10.0, 468.0));
    let second = slot.start(ScrollAnimation::new(0.0, 20.0, 468.0));
    slot.set_pending_frame(first.generation, 7);
    slot.set_pending_frame(second.generation, 8);
    let third = slot.start(ScrollAnimation::new(0.0, 30.0, 468.0));
    assert_eq!(third.cancel_frame, Some(8));
}

#[test]
fn cancel_stops_animation_and_returns_frame() {
    let mut slot = AnimationSlot::new();
    let started = slot.start(ScrollAnimation::new(0.0, 10.0, 468.0));
    slot.set_pending_frame(started.generation, 3);
    assert_eq!(slot.cancel(), Some(3));
    assert!(!slot.is_active());
    assert_eq!(slot.step(started.generation, 0.0), None);
    assert_eq!(slot.cancel(), None);
}
