//! Render pass over an abstract 2D surface.
//!
//! The pass computes every visual quantity (sprite size, darkness, glow,
//! ring geometry) here and hands finished values to a [`Surface`]; the web
//! crate implements the trait on top of a `CanvasRenderingContext2d`.

use crate::constants::*;
use crate::links::{bucket_alpha, LinkBuilder, LinkSegment};
use crate::particle::Particle;
use crate::pointer::PointerTracker;
use crate::scale::ScaleFactors;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub fn new(rgb: [u8; 3], a: f32) -> Self {
        Self {
            r: rgb[0],
            g: rgb[1],
            b: rgb[2],
            a,
        }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Everything needed to draw one star body.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarSprite {
    pub center: Vec2,
    /// Edge length of the square sprite.
    pub size: f32,
    /// Radius of the darkness/glow overlays.
    pub overlay_radius: f32,
    /// Base alpha; the stored opacity clamped to 1.
    pub alpha: f32,
    /// Alpha of the black overlay restricted to sprite pixels.
    pub darkness_alpha: f32,
    /// Alpha of the additive white overlay, `None` when not flashing.
    pub glow_alpha: Option<f32>,
}

impl StarSprite {
    pub fn from_particle(p: &Particle) -> Self {
        let r = {
            let r = p.draw_radius();
            if r == 0.0 {
                1.0
            } else {
                r
            }
        };
        let size = (r * SPRITE_SIZE_PER_RADIUS).max(SPRITE_MIN_SIZE);
        let alpha = p.opacity.clamp(0.0, 1.0);
        let glow_alpha = (p.white_value > GLOW_MIN_FLASH).then(|| alpha * p.white_value.min(1.0));
        Self {
            center: p.position(),
            size,
            overlay_radius: size * SPRITE_OVERLAY_FRACTION,
            alpha,
            darkness_alpha: alpha * darkness_for(p.red_value),
            glow_alpha,
        }
    }
}

/// Less red means a darker star.
#[inline]
pub fn darkness_for(red_value: f32) -> f32 {
    let t = ((red_value - DARKNESS_RED_OFFSET) / DARKNESS_RED_SPAN).clamp(0.0, 1.0);
    DARKNESS_BASE + DARKNESS_SPAN * (1.0 - t)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingStyle {
    pub center: Vec2,
    pub radius: f32,
    pub width: f32,
    pub color: Rgba,
}

/// Pointer ring for the current timers, or `None` when it would be invisible.
///
/// While the pointer moves the ring follows the ring timer; once it is
/// idle the poke timer drives an expanding, fading ring instead.
pub fn ring_style(pointer: &PointerTracker, scale: &ScaleFactors) -> Option<RingStyle> {
    let target = (scale.scale_up * RING_RADIUS_PER_SCALE - RING_RADIUS_OFFSET).max(0.0);
    let (radius, width, alpha) = if pointer.energy == 0.0 {
        let poke = (pointer.poke_timer / POKE_TIMER_MAX).clamp(0.0, 1.0);
        (target * (1.0 - poke), poke * RING_POKE_MAX_WIDTH, poke)
    } else {
        let ring = pointer.ring_timer;
        (
            target * (ring / RING_TIMER_FULL),
            ring * RING_WIDTH_PER_TIMER,
            (ring * RING_ALPHA_PER_TIMER).min(1.0),
        )
    };
    (alpha > RING_VISIBILITY_EPSILON).then(|| RingStyle {
        center: pointer.position,
        radius,
        width,
        color: Rgba::new(RING_RGB, alpha),
    })
}

/// Drawing backend. One call per batch; implementations own context state.
pub trait Surface {
    fn clear(&mut self, width: f32, height: f32);
    fn stroke_segments(&mut self, segments: &[LinkSegment], color: Rgba, line_width: f32);
    /// Star bodies need a loaded sprite; until then the pass skips them.
    fn sprite_ready(&self) -> bool;
    fn draw_star(&mut self, sprite: &StarSprite);
    fn stroke_ring(&mut self, ring: &RingStyle);
}

pub fn render_frame<S: Surface + ?Sized>(
    surface: &mut S,
    particles: &[Particle],
    links: &LinkBuilder,
    pointer: &PointerTracker,
    scale: &ScaleFactors,
) {
    surface.clear(scale.width, scale.height);

    if !particles.is_empty() {
        for (i, bucket) in links.buckets().iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            surface.stroke_segments(bucket, Rgba::new(LINK_RGB, bucket_alpha(i)), LINK_LINE_WIDTH);
        }
    }

    if surface.sprite_ready() {
        for p in particles {
            surface.draw_star(&StarSprite::from_particle(p));
        }
    }

    if let Some(ring) = ring_style(pointer, scale) {
        surface.stroke_ring(&ring);
    }
}

/// Surface that records calls instead of drawing. Used by host tests and
/// handy for headless inspection of a frame.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub sprite_ready: bool,
    pub clears: usize,
    pub strokes: Vec<(usize, Rgba)>,
    pub stars: Vec<StarSprite>,
    pub rings: Vec<RingStyle>,
}

impl RecordingSurface {
    pub fn with_sprite() -> Self {
        Self {
            sprite_ready: true,
            ..Self::default()
        }
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, _width: f32, _height: f32) {
        self.clears += 1;
        self.strokes.clear();
        self.stars.clear();
        self.rings.clear();
    }

    fn stroke_segments(&mut self, segments: &[LinkSegment], color: Rgba, _line_width: f32) {
        self.strokes.push((segments.len(), color));
    }

    fn sprite_ready(&self) -> bool {
        self.sprite_ready
    }

    fn draw_star(&mut self, sprite: &StarSprite) {
        self.stars.push(*sprite);
    }

    fn stroke_ring(&mut self, ring: &RingStyle) {
        self.rings.push(*ring);
    }
}
