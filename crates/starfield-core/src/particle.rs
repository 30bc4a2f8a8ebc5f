//! Star records and the pool operations that create, restore and rescale them.

use crate::constants::*;
use crate::error::{Result, StarfieldError};
use crate::scale::ScaleFactors;
use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One simulated star.
///
/// `size`, `fade_speed` and `red_value` are fixed at creation and only
/// change through a uniform rescale. The serialized field names match the
/// records older saves wrote, so existing storage keeps restoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    #[serde(default)]
    pub momentum_x: f32,
    #[serde(default)]
    pub momentum_y: f32,
    pub size: f32,
    pub opacity: f32,
    pub fade_speed: f32,
    pub red_value: f32,
    #[serde(default)]
    pub white_value: f32,
    #[serde(default = "full_edge")]
    pub edge: f32,
}

fn full_edge() -> f32 {
    1.0
}

impl Particle {
    #[inline]
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Radius the star occupies on screen, flash included.
    #[inline]
    pub fn draw_radius(&self) -> f32 {
        let r = self.white_value * 2.0 + self.size;
        if r.is_finite() {
            r
        } else {
            0.0
        }
    }

    fn is_finite(&self) -> bool {
        [
            self.x,
            self.y,
            self.vx,
            self.vy,
            self.momentum_x,
            self.momentum_y,
            self.size,
            self.opacity,
            self.fade_speed,
            self.red_value,
            self.white_value,
            self.edge,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

#[inline]
fn random_between<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    min + rng.gen::<f32>() * (max - min)
}

/// Fill a fresh pool of `count` stars spread uniformly over the canvas.
/// `scale_factor` is the screen perimeter and sets the upper size bound.
pub fn create_population<R: Rng + ?Sized>(
    width: f32,
    height: f32,
    count: usize,
    scale_factor: f32,
    rng: &mut R,
) -> Vec<Particle> {
    let scaled_size = if scale_factor > 0.0 {
        scale_factor / STAR_SIZE_DIVISOR
    } else {
        MIN_STAR_SIZE
    };
    let size_lo = MIN_STAR_SIZE.min(scaled_size);
    let size_hi = MIN_STAR_SIZE.max(scaled_size);

    (0..count)
        .map(|_| Particle {
            x: rng.gen::<f32>() * width,
            y: rng.gen::<f32>() * height,
            vx: random_between(rng, -DRIFT_SPEED_MAX, DRIFT_SPEED_MAX),
            vy: random_between(rng, -DRIFT_SPEED_MAX, DRIFT_SPEED_MAX),
            momentum_x: 0.0,
            momentum_y: 0.0,
            size: random_between(rng, size_lo, size_hi),
            opacity: random_between(rng, OPACITY_MIN, OPACITY_MAX),
            fade_speed: random_between(rng, FADE_SPEED_MIN, FADE_SPEED_MAX),
            red_value: random_between(rng, REDNESS_MIN, REDNESS_MAX),
            white_value: 0.0,
            edge: 1.0,
        })
        .collect()
}

/// Parse a persisted particle array, rejecting empty or non-finite data.
pub fn parse_population(serialized: &str) -> Result<Vec<Particle>> {
    let particles: Vec<Particle> = serde_json::from_str(serialized)?;
    if particles.is_empty() {
        return Err(StarfieldError::EmptyPopulation);
    }
    if let Some(index) = particles.iter().position(|p| !p.is_finite()) {
        return Err(StarfieldError::NonFiniteParticle { index });
    }
    Ok(particles)
}

pub fn serialize_population(particles: &[Particle]) -> Result<String> {
    Ok(serde_json::to_string(particles)?)
}

/// Where a pool came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolOrigin {
    Created,
    Restored,
}

/// Restore a saved pool, or build a fresh one when the input is unusable.
///
/// `previous` is the canvas size the pool was saved under; when it and the
/// current canvas are both positive the stars are mapped onto the current
/// canvas.
pub fn restore<R: Rng + ?Sized>(
    serialized: &str,
    current: &ScaleFactors,
    previous: Option<(f32, f32)>,
    rng: &mut R,
) -> (Vec<Particle>, PoolOrigin) {
    let mut particles = match parse_population(serialized) {
        Ok(p) => p,
        Err(e) => {
            log::warn!("[pool] could not restore stars ({}); recreating", e);
            let fresh = create_population(
                current.width,
                current.height,
                current.star_count_limit,
                current.screen_perimeter,
                rng,
            );
            return (fresh, PoolOrigin::Created);
        }
    };
    if let Some((prev_w, prev_h)) = previous {
        let (w, h) = (current.width, current.height);
        if prev_w > 0.0 && prev_h > 0.0 && w > 0.0 && h > 0.0 {
            rescale(&mut particles, w / prev_w, h / prev_h, (w + h) / (prev_w + prev_h));
        }
    }
    log::info!("[pool] restored {} stars", particles.len());
    (particles, PoolOrigin::Restored)
}

pub fn rescale(particles: &mut [Particle], scale_x: f32, scale_y: f32, size_scale: f32) {
    for p in particles {
        p.x *= scale_x;
        p.y *= scale_y;
        p.size *= size_scale;
    }
}
