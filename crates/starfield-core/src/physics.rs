//! Per-frame star motion: pointer forces, drift, clamp, edges, twinkle.

use crate::constants::*;
use crate::input::KeyboardImpulse;
use crate::particle::Particle;
use crate::pointer::PointerTracker;
use crate::scale::ScaleFactors;
use crate::settings::Settings;
use crate::time::{decay_for, frames_from_elapsed_ms};
use glam::Vec2;
use rand::Rng;

/// Radial falloff parameters for one pointer force.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Falloff {
    pub strength: f32,
    pub radius: f32,
    pub exponent: f32,
}

impl Falloff {
    /// Force magnitude at `distance` for a given drive (pointer energy or
    /// poke timer). Zero at and beyond the radius.
    #[inline]
    pub fn magnitude(&self, distance: f32, drive: f32) -> f32 {
        let gradient = (1.0 - distance / self.radius).max(0.0);
        self.strength * drive * gradient.powf(self.exponent.max(MIN_SHAPE_EXPONENT))
    }
}

/// Slider settings converted to screen-scaled physics units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForceParams {
    pub attraction: Falloff,
    pub repulsion: Falloff,
    pub poke: Falloff,
    pub momentum_limit: f32,
}

impl ForceParams {
    pub fn derive(settings: &Settings, scale: &ScaleFactors) -> Self {
        let p = &scale.powers;
        Self {
            attraction: Falloff {
                strength: settings.attract_strength * ATTRACT_STRENGTH_UNIT * p.attraction_force,
                radius: nonzero_or_one(
                    settings.attract_radius * ATTRACT_RADIUS_UNIT * p.attraction_gradient,
                ),
                exponent: settings.attract_scale * ATTRACT_SHAPE_UNIT * p.attraction_shape,
            },
            repulsion: Falloff {
                strength: settings.repel_strength * REPEL_STRENGTH_UNIT * p.repulsion_force,
                radius: nonzero_or_one(
                    settings.repel_radius * REPEL_RADIUS_UNIT * p.repulsion_gradient,
                ),
                exponent: settings.repel_scale * REPEL_SHAPE_UNIT,
            },
            poke: Falloff {
                strength: settings.poke_strength * POKE_STRENGTH_UNIT,
                radius: nonzero_or_one(scale.screen_perimeter * POKE_RADIUS_FRACTION),
                exponent: 2.0,
            },
            // A negative clamp setting pins momentum at zero
            momentum_limit: (MOMENTUM_CLAMP_FACTOR * settings.clamp * p.force_clamp).max(0.0),
        }
    }
}

#[inline]
fn nonzero_or_one(v: f32) -> f32 {
    if v == 0.0 || !v.is_finite() {
        1.0
    } else {
        v
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgePolicy {
    Wrap,
    Bounce,
}

impl EdgePolicy {
    /// Stars wrap unless an interaction is actively shaping them: a live
    /// ring, a pointer within `WRAP_DISTANCE`, and no fresh poke burst.
    #[inline]
    pub fn select(distance_sq: f32, pointer: &PointerTracker) -> EdgePolicy {
        let far = distance_sq > WRAP_DISTANCE * WRAP_DISTANCE;
        let fresh_poke = pointer.poke_timer > POKE_WRAP_FRACTION * POKE_TIMER_MAX;
        if far || pointer.ring_timer == 0.0 || fresh_poke {
            EdgePolicy::Wrap
        } else {
            EdgePolicy::Bounce
        }
    }
}

/// Wrap across a padded boundary to the opposite side.
pub fn wrap_edges(p: &mut Particle, width: f32, height: f32) {
    let r = p.draw_radius();
    if p.x < -r {
        p.x = width + r;
    } else if p.x > width + r {
        p.x = -r;
    }
    if p.y < -r {
        p.y = height + r;
    } else if p.y > height + r {
        p.y = -r;
    }
}

/// Mirror off a wall and flip the perpendicular momentum component.
pub fn bounce_edges(p: &mut Particle, width: f32, height: f32) {
    let r = p.draw_radius();
    if p.x < r {
        p.x = reflect_into(2.0 * r - p.x, r, width - r);
        p.momentum_x = -p.momentum_x;
    } else if p.x > width - r {
        p.x = reflect_into(2.0 * (width - r) - p.x, r, width - r);
        p.momentum_x = -p.momentum_x;
    }
    if p.y < r {
        p.y = reflect_into(2.0 * r - p.y, r, height - r);
        p.momentum_y = -p.momentum_y;
    } else if p.y > height - r {
        p.y = reflect_into(2.0 * (height - r) - p.y, r, height - r);
        p.momentum_y = -p.momentum_y;
    }
}

// A deep overshoot can mirror past the far wall; keep the result inside.
#[inline]
fn reflect_into(v: f32, lo: f32, hi: f32) -> f32 {
    if lo <= hi {
        v.clamp(lo, hi)
    } else {
        v
    }
}

/// Advance the twinkle cycle: fast fade, slow ember tail, then reset.
pub fn advance_twinkle<R: Rng + ?Sized>(p: &mut Particle, dt_frames: f32, rng: &mut R) {
    if p.opacity <= OPACITY_RESET_AT {
        p.opacity = 1.0;
        if rng.gen::<f32>() < FLASH_CHANCE {
            p.white_value = 1.0;
        }
    } else if p.opacity > OPACITY_EMBER_BELOW {
        p.opacity -= TWINKLE_FADE_RATE * p.fade_speed * dt_frames;
    } else {
        p.opacity -= TWINKLE_EMBER_DRIFT * dt_frames;
    }
}

/// Mutable view of everything one physics step touches.
pub struct StepInput<'a> {
    pub particles: &'a mut [Particle],
    pub pointer: &'a mut PointerTracker,
    pub impulse: &'a mut KeyboardImpulse,
    pub settings: &'a Settings,
    pub scale: &'a ScaleFactors,
}

/// Run one physics step for `elapsed_ms` of wall-clock time.
///
/// Returns `false` without touching any state when the clamped step is
/// empty (duplicate timestamps, negative clocks).
pub fn step<R: Rng + ?Sized>(input: StepInput<'_>, elapsed_ms: f32, rng: &mut R) -> bool {
    let dt = frames_from_elapsed_ms(elapsed_ms);
    if dt <= 0.0 {
        return false;
    }
    let StepInput {
        particles,
        pointer,
        impulse,
        settings,
        scale,
    } = input;

    let forces = ForceParams::derive(settings, scale);
    let momentum_decay = decay_for(MOMENTUM_DECAY_PER_FRAME, dt);
    let flash_decay = decay_for(FLASH_DECAY_PER_FRAME, dt);

    let influence = scale.screen_perimeter * INFLUENCE_RANGE_FRACTION;
    let influence_sq = influence * influence;
    let drift_boost = (DRIFT_BOOST_PER_ENERGY * pointer.energy).min(DRIFT_BOOST_MAX);
    let pointer_pos = pointer.position;

    for p in particles.iter_mut() {
        let to_pointer = pointer_pos - p.position();
        let distance_sq = to_pointer.length_squared();

        if distance_sq < influence_sq {
            let distance = distance_sq.sqrt() + DISTANCE_EPSILON;
            let unit = to_pointer / distance;

            let attract = forces.attraction.magnitude(distance, pointer.energy);
            let repel = forces.repulsion.magnitude(distance, pointer.energy);
            let poke = forces.poke.magnitude(distance, pointer.poke_timer);
            let push: Vec2 = unit * (attract - repel - poke) * dt;
            if push.is_finite() {
                p.momentum_x += push.x;
                p.momentum_y += push.y;
            }
        }

        p.momentum_x += p.vx * drift_boost * dt;
        p.momentum_y += p.vy * drift_boost * dt;

        impulse.apply(&mut p.momentum_x, &mut p.momentum_y);

        let magnitude = (p.momentum_x * p.momentum_x + p.momentum_y * p.momentum_y).sqrt();
        if !magnitude.is_finite() || forces.momentum_limit <= 0.0 {
            p.momentum_x = 0.0;
            p.momentum_y = 0.0;
        } else if magnitude > forces.momentum_limit {
            let s = forces.momentum_limit / magnitude;
            p.momentum_x *= s;
            p.momentum_y *= s;
        }

        p.x += (p.vx + p.momentum_x) * dt;
        p.y += (p.vy + p.momentum_y) * dt;
        p.momentum_x *= momentum_decay;
        p.momentum_y *= momentum_decay;

        match EdgePolicy::select(distance_sq, pointer) {
            EdgePolicy::Wrap => wrap_edges(p, scale.width, scale.height),
            EdgePolicy::Bounce => bounce_edges(p, scale.width, scale.height),
        }

        if p.white_value > 0.0 {
            p.white_value *= flash_decay;
            if p.white_value < FLASH_SNAP {
                p.white_value = 0.0;
            }
        }

        advance_twinkle(p, dt, rng);
    }

    *impulse = KeyboardImpulse::NEUTRAL;
    pointer.decay(
        decay_for(POINTER_ENERGY_DECAY_PER_FRAME, dt),
        decay_for(RING_DECAY_PER_FRAME, dt),
        decay_for(POKE_DECAY_PER_FRAME, dt),
    );
    true
}
