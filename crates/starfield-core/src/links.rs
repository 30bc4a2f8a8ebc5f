//! Throttled pair search that batches visible links by opacity bucket.

use crate::constants::*;
use crate::particle::Particle;
use crate::scale::ScaleFactors;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinkSegment {
    pub from: Vec2,
    pub to: Vec2,
}

/// Closest-edge dimming factor in `[0, 1]`, eased quadratically.
pub fn edge_fade(p: &Particle, scale: &ScaleFactors) -> f32 {
    let r = p.draw_radius();
    let nearest = (p.x + r)
        .min(scale.width + r - p.x)
        .min(p.y + r)
        .min(scale.height + r - p.y);
    let mut band = EDGE_FADE_BAND_MAX.min(scale.screen_perimeter * EDGE_FADE_BAND_FRACTION);
    if band <= 0.0 {
        band = 1.0;
    }
    let t = if nearest <= 0.0 {
        0.0
    } else if nearest >= band {
        1.0
    } else {
        nearest / band
    };
    t * t
}

/// Bucket for a link of the given brightness. Monotonic in `brightness`.
#[inline]
pub fn bucket_index(brightness: f32) -> usize {
    let top = LINK_BUCKET_COUNT - 1;
    let raw = (brightness * top as f32).floor();
    if raw <= 0.0 {
        0
    } else {
        (raw as usize).min(top)
    }
}

/// Stroke alpha shared by every segment in bucket `index`. The dimmest
/// bucket still strokes at `1 / LINK_BUCKET_COUNT`.
#[inline]
pub fn bucket_alpha(index: usize) -> f32 {
    (index.min(LINK_BUCKET_COUNT - 1) + 1) as f32 / LINK_BUCKET_COUNT as f32
}

/// Link geometry cache. Rebuilt every `LINK_REBUILD_EVERY` frames or
/// immediately after being marked dirty.
#[derive(Debug)]
pub struct LinkBuilder {
    buckets: Vec<Vec<LinkSegment>>,
    frame: u64,
    dirty: bool,
}

impl Default for LinkBuilder {
    fn default() -> Self {
        Self {
            buckets: vec![Vec::new(); LINK_BUCKET_COUNT],
            frame: 0,
            dirty: true,
        }
    }
}

impl LinkBuilder {
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn buckets(&self) -> &[Vec<LinkSegment>] {
        &self.buckets
    }

    pub fn segment_count(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    /// Count a frame and rebuild when due. Returns whether a rebuild ran.
    pub fn advance(&mut self, particles: &mut [Particle], scale: &ScaleFactors, pointer_energy: f32) -> bool {
        if particles.is_empty() {
            return false;
        }
        self.frame += 1;
        if pointer_energy > FAST_POINTER_ENERGY {
            self.dirty = true;
        }
        if !(self.dirty || self.frame % LINK_REBUILD_EVERY == 0) {
            return false;
        }
        self.dirty = false;
        self.rebuild(particles, scale);
        true
    }

    /// Recompute edge fades and refill every bucket from scratch.
    pub fn rebuild(&mut self, particles: &mut [Particle], scale: &ScaleFactors) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        for p in particles.iter_mut() {
            p.edge = edge_fade(p, scale);
        }

        let distance_scale = scale.screen_perimeter / LINK_DISTANCE_SCALE_DIVISOR;
        if distance_scale <= 0.0 || scale.max_link_distance <= 0.0 {
            return;
        }
        let cutoff = scale.max_link_distance / distance_scale;
        let cutoff_sq = cutoff * cutoff;

        for (i, a) in particles.iter().enumerate() {
            let pa = a.position();
            for b in &particles[i + 1..] {
                let pb = b.position();
                let d2 = pa.distance_squared(pb);
                if d2 > cutoff_sq {
                    continue;
                }
                let scaled = d2.sqrt() * distance_scale;
                let fade = (1.0 - scaled / scale.max_link_distance).clamp(0.0, 1.0);
                let brightness = fade * a.opacity.min(b.opacity) * a.edge.min(b.edge);
                if brightness <= LINK_VISIBILITY_EPSILON {
                    continue;
                }
                self.buckets[bucket_index(brightness)].push(LinkSegment { from: pa, to: pb });
            }
        }
    }
}
