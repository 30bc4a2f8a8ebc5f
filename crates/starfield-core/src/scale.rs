//! Canvas-size derived scaling, recomputed only on resize.

use crate::constants::*;

/// Exponents of `scale_up` that keep force feel consistent across viewports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScalePowers {
    pub attraction_gradient: f32,
    pub repulsion_gradient: f32,
    pub attraction_shape: f32,
    pub attraction_force: f32,
    pub repulsion_force: f32,
    pub force_clamp: f32,
}

impl Default for ScalePowers {
    fn default() -> Self {
        Self {
            attraction_gradient: 1.0,
            repulsion_gradient: 1.0,
            attraction_shape: 1.0,
            attraction_force: 1.0,
            repulsion_force: 1.0,
            force_clamp: 1.0,
        }
    }
}

/// Every size-derived constant in one value. The engine swaps the whole
/// struct on resize so a half-updated combination is never observable.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleFactors {
    pub width: f32,
    pub height: f32,
    pub screen_perimeter: f32,
    pub scale_up: f32,
    pub scale_down: f32,
    pub star_count_limit: usize,
    pub max_link_distance: f32,
    pub powers: ScalePowers,
}

impl Default for ScaleFactors {
    fn default() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            screen_perimeter: 0.0,
            scale_up: 0.0,
            scale_down: 0.0,
            star_count_limit: 0,
            max_link_distance: 0.0,
            powers: ScalePowers::default(),
        }
    }
}

impl ScaleFactors {
    pub fn compute(width: f32, height: f32) -> Self {
        let width = sanitize_dimension(width);
        let height = sanitize_dimension(height);
        let perimeter = width + height;
        // Floor the ratio input so a 0x0 canvas yields finite factors
        let ratio = perimeter.max(1.0) / REFERENCE_PERIMETER;
        let scale_up = ratio.powf(SCALE_EXPONENT);
        let scale_down = (1.0 / ratio).powf(SCALE_EXPONENT);

        let star_count_limit = STAR_COUNT_CAP.min(scale_down * STAR_COUNT_PER_SCALE).ceil() as usize;
        let max_link_distance = scale_up.powi(3) * LINK_DISTANCE_BASE;

        Self {
            width,
            height,
            screen_perimeter: perimeter,
            scale_up,
            scale_down,
            star_count_limit,
            max_link_distance,
            powers: ScalePowers {
                attraction_gradient: scale_up.powf(ATTRACTION_GRADIENT_POWER),
                repulsion_gradient: scale_up.powf(REPULSION_GRADIENT_POWER),
                attraction_shape: scale_up.powf(ATTRACTION_SHAPE_POWER),
                attraction_force: scale_up.powf(ATTRACTION_FORCE_POWER),
                repulsion_force: scale_up.powf(REPULSION_FORCE_POWER),
                force_clamp: scale_up.powf(FORCE_CLAMP_POWER),
            },
        }
    }

    /// True once the canvas reports a size worth simulating on. Mobile
    /// browsers can report zero for a frame or two during load.
    pub fn is_usable(&self) -> bool {
        self.width > 50.0 && self.height > 50.0
    }
}

#[inline]
fn sanitize_dimension(v: f32) -> f32 {
    if v.is_finite() && v > 0.0 {
        v
    } else {
        0.0
    }
}
