use crate::constants::*;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub position: Vec2,
    pub time_ms: f64,
}

/// Pointer position plus the decaying energy, ring and poke timers the
/// physics step and ring renderer read.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerTracker {
    pub position: Vec2,
    /// `None` until the first sample of a gesture has been taken.
    pub last_sample: Option<PointerSample>,
    pub energy: f32,
    pub ring_timer: f32,
    pub poke_timer: f32,
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            last_sample: None,
            energy: 0.0,
            ring_timer: 0.0,
            poke_timer: 0.0,
        }
    }
}

impl PointerTracker {
    /// Start a new gesture: full poke burst, fresh speed baseline.
    /// Returns whether the seeding sample counted as fast movement.
    pub fn begin_interaction(&mut self, x: f32, y: f32, now_ms: f64, scale_down: f32) -> bool {
        self.poke_timer = POKE_TIMER_MAX;
        self.last_sample = None;
        self.update_speed(x, y, now_ms, scale_down)
    }

    /// Fold a new pointer sample into the energy estimate.
    ///
    /// The first sample after a reset only records the baseline. Returns
    /// `true` when the resulting energy is high enough that link geometry
    /// should be rebuilt out of cadence.
    pub fn update_speed(&mut self, x: f32, y: f32, now_ms: f64, scale_down: f32) -> bool {
        let current = Vec2::new(x, y);
        let Some(last) = self.last_sample else {
            self.position = current;
            self.last_sample = Some(PointerSample {
                position: current,
                time_ms: now_ms,
            });
            self.energy = 0.0;
            return false;
        };

        let dt = (now_ms - last.time_ms).max(MIN_POINTER_DT_MS) as f32;
        let raw_speed = current.distance(last.position) / dt;
        let energy = scale_down * (raw_speed * POINTER_SPEED_GAIN).min(POINTER_ENERGY_CAP);
        self.energy = if energy.is_finite() { energy } else { 0.0 };
        self.ring_timer = self.ring_timer.max(self.energy);

        self.position = current;
        self.last_sample = Some(PointerSample {
            position: current,
            time_ms: now_ms,
        });
        self.energy > FAST_POINTER_ENERGY
    }

    /// Apply one step's worth of decay to the three timers.
    pub fn decay(&mut self, energy_decay: f32, ring_decay: f32, poke_decay: f32) {
        self.energy *= energy_decay;
        if self.energy < POINTER_ENERGY_SNAP {
            self.energy = 0.0;
        }
        self.ring_timer *= ring_decay;
        if self.ring_timer < RING_SNAP {
            self.ring_timer = 0.0;
        }
        self.poke_timer *= poke_decay;
        if self.poke_timer < POKE_SNAP {
            self.poke_timer = 0.0;
        }
    }
}
