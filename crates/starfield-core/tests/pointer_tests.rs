// Host-side tests for pointer tracking, timestamps and the input queue.

use starfield_core::constants::*;
use starfield_core::time::{decay_for, frames_from_elapsed_ms};
use starfield_core::{command_for_key, normalize_event_timestamp, InputEvent, InputQueue, KeyCommand, KeyboardImpulse, PointerTracker};

#[test]
fn first_sample_after_gesture_start_has_zero_energy() {
    let mut pointer = PointerTracker::default();
    pointer.energy = 25.0;

    let fast = pointer.begin_interaction(120.0, 80.0, 1000.0, 1.0);
    assert!(!fast);
    assert_eq!(pointer.energy, 0.0);
    assert_eq!(pointer.poke_timer, POKE_TIMER_MAX);
    assert_eq!(pointer.position, glam::Vec2::new(120.0, 80.0));

    // Same instant, same spot: still no spike
    pointer.update_speed(120.0, 80.0, 1000.0, 1.0);
    assert_eq!(pointer.energy, 0.0);
}

#[test]
fn repeated_identical_samples_settle_at_zero() {
    let mut pointer = PointerTracker::default();
    pointer.update_speed(10.0, 10.0, 500.0, 1.0);
    pointer.update_speed(10.0, 10.0, 500.0, 1.0);
    let snapshot = pointer.clone();
    pointer.update_speed(10.0, 10.0, 500.0, 1.0);
    assert_eq!(pointer.energy, 0.0);
    assert_eq!(pointer, snapshot);
}

#[test]
fn energy_is_capped_and_scaled() {
    let mut pointer = PointerTracker::default();
    pointer.update_speed(0.0, 0.0, 0.0, 0.5);
    // A huge jump in zero time is clamped to 1ms and then to the cap
    let fast = pointer.update_speed(5000.0, 0.0, 0.0, 0.5);
    assert_eq!(pointer.energy, 0.5 * POINTER_ENERGY_CAP);
    assert!(fast);

    let mut slow = PointerTracker::default();
    slow.update_speed(0.0, 0.0, 0.0, 1.0);
    slow.update_speed(1.0, 0.0, 100.0, 1.0);
    assert!((slow.energy - 0.01 * POINTER_SPEED_GAIN).abs() < 1e-5);
}

#[test]
fn ring_timer_rises_to_energy_but_never_drops() {
    let mut pointer = PointerTracker::default();
    pointer.ring_timer = 40.0;
    pointer.update_speed(0.0, 0.0, 0.0, 1.0);
    pointer.update_speed(1.0, 0.0, 100.0, 1.0);
    assert_eq!(pointer.ring_timer, 40.0);

    pointer.update_speed(200.0, 0.0, 101.0, 1.0);
    assert_eq!(pointer.ring_timer, POINTER_ENERGY_CAP);
}

#[test]
fn decay_snaps_small_timers_to_zero() {
    let mut pointer = PointerTracker::default();
    pointer.energy = 0.0015;
    pointer.ring_timer = 1.5;
    pointer.poke_timer = 1.1;
    pointer.decay(0.5, 0.5, 0.5);
    assert_eq!((pointer.energy, pointer.ring_timer, pointer.poke_timer), (0.0, 0.0, 0.0));
}

#[test]
fn event_timestamps_map_into_the_monotonic_base() {
    assert_eq!(normalize_event_timestamp(0.0, 900.0, None), 900.0);
    assert_eq!(normalize_event_timestamp(f64::NAN, 900.0, None), 900.0);
    assert_eq!(normalize_event_timestamp(850.0, 900.0, None), 850.0);

    let origin = 1.7e12;
    assert_eq!(normalize_event_timestamp(origin + 850.0, 900.0, Some(origin)), 850.0);
    assert_eq!(normalize_event_timestamp(origin + 850.0, 900.0, None), 900.0);
}

#[test]
fn elapsed_time_is_clamped_into_frames() {
    assert_eq!(frames_from_elapsed_ms(-3.0), 0.0);
    assert_eq!(frames_from_elapsed_ms(SIXTY_FPS_FRAME_MS), 1.0);
    assert_eq!(frames_from_elapsed_ms(1e6), MAX_STEP_MS / SIXTY_FPS_FRAME_MS);
    assert!((decay_for(0.5, 2.0) - 0.25).abs() < 1e-6);
    assert_eq!(decay_for(0.98, 0.0), 1.0);
}

#[test]
fn key_bindings() {
    assert_eq!(command_for_key("w"), Some(KeyCommand::Nudge { x: 0.0, y: -KEY_NUDGE }));
    assert_eq!(command_for_key("D"), Some(KeyCommand::Nudge { x: KEY_NUDGE, y: 0.0 }));
    assert_eq!(command_for_key("x"), Some(KeyCommand::Nudge { x: 0.4, y: 0.4 }));
    assert_eq!(command_for_key("g"), Some(KeyCommand::ScaleMomentum(KEY_SPEED_UP)));
    assert_eq!(command_for_key("v"), Some(KeyCommand::ScaleMomentum(KEY_SLOW_DOWN)));
    assert_eq!(command_for_key("p"), Some(KeyCommand::InvertDrift));
    assert_eq!(command_for_key("Enter"), None);
}

#[test]
fn impulse_applies_multiply_then_add() {
    let impulse = KeyboardImpulse {
        mult_x: 2.0,
        mult_y: 0.5,
        add_x: 1.0,
        add_y: -1.0,
    };
    let (mut mx, mut my) = (3.0, 4.0);
    impulse.apply(&mut mx, &mut my);
    assert_eq!((mx, my), (7.0, 1.0));
    assert!(!impulse.is_neutral());
    assert!(KeyboardImpulse::default().is_neutral());
}

#[test]
fn input_queue_drains_in_arrival_order() {
    let mut queue = InputQueue::default();
    for i in 0..20 {
        queue.push(InputEvent::Pointer {
            x: i as f32,
            y: 0.0,
            time_ms: i as f64,
            gesture_start: i == 0,
        });
    }
    queue.push(InputEvent::Key(KeyCommand::InvertDrift));
    assert_eq!(queue.len(), 21);

    let drained = queue.drain();
    assert!(queue.is_empty());
    assert_eq!(drained.len(), 21);
    assert!(matches!(drained[0], InputEvent::Pointer { gesture_start: true, .. }));
    assert!(matches!(drained[19], InputEvent::Pointer { x, .. } if x == 19.0));
    assert_eq!(drained[20], InputEvent::Key(KeyCommand::InvertDrift));
}
