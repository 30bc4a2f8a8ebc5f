// Host-side tests for page wiring constants and their relationship to the core.
// The main crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use starfield_core::constants::{MAX_STEP_MS, SIXTY_FPS_FRAME_MS};

#[test]
#[allow(clippy::assertions_on_constants)]
fn frame_timing_is_consistent_with_the_physics_step() {
    // The throttle must let at least one frame through per clamped step
    assert!(FRAME_THROTTLE_MS > 0.0);
    assert!(FRAME_THROTTLE_MS < MAX_STEP_MS as f64);

    // The first step behaves like one nominal frame
    assert!((FIRST_FRAME_MS - SIXTY_FPS_FRAME_MS as f64).abs() < 1e-4);
    assert!(FIRST_FRAME_MS < FRAME_THROTTLE_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn debug_readouts_refresh_slower_than_frames() {
    assert!(DEBUG_REFRESH_MS > FRAME_THROTTLE_MS);
}

#[test]
fn element_ids_are_distinct_and_non_empty() {
    let ids = [CANVAS_ID, DEBUG_MISC_ID, DEBUG_RING_ID, DEBUG_SPEED_ID, DEBUG_POKE_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(STAR_SPRITE_URL.starts_with('/'));
}
