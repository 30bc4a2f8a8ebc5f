//! Monotonic time base and frame-unit conversions.

use crate::constants::{MAX_STEP_MS, SIXTY_FPS_FRAME_MS};
use instant::Instant;

/// Source of monotonic milliseconds. Pointer timestamps are normalized into
/// the same base before they reach the tracker.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Clock anchored at construction time.
#[derive(Clone, Copy, Debug)]
pub struct InstantClock {
    origin: Instant,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_ms(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// Map a raw input-event timestamp into the monotonic base.
///
/// Some browsers stamp events with epoch milliseconds instead of the
/// page-relative clock. Those are shifted by `time_origin` when it is known.
pub fn normalize_event_timestamp(raw_ms: f64, now_ms: f64, time_origin: Option<f64>) -> f64 {
    if !raw_ms.is_finite() || raw_ms <= 0.0 {
        return now_ms;
    }
    if raw_ms > 1e12 {
        return match time_origin {
            Some(origin) if origin.is_finite() => raw_ms - origin,
            _ => now_ms,
        };
    }
    raw_ms
}

/// Clamp elapsed milliseconds into `[0, MAX_STEP_MS]` and express them in
/// nominal 60fps frames.
#[inline]
pub fn frames_from_elapsed_ms(elapsed_ms: f32) -> f32 {
    let clamped = if elapsed_ms.is_nan() {
        0.0
    } else {
        elapsed_ms.clamp(0.0, MAX_STEP_MS)
    };
    clamped / SIXTY_FPS_FRAME_MS
}

/// Turn a per-frame multiplier into one that covers `dt_frames` frames.
#[inline]
pub fn decay_for(base_per_frame: f32, dt_frames: f32) -> f32 {
    base_per_frame.powf(dt_frames)
}
