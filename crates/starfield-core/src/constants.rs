//! Simulation, link and render tuning constants.
//!
//! Per-frame values are expressed against a nominal 60fps frame and are
//! converted to time-correct multipliers inside the physics step.

// Time base
pub const SIXTY_FPS_FRAME_MS: f32 = 1000.0 / 60.0;
pub const MAX_STEP_MS: f32 = 50.0; // ~3 frames; absorbs tab sleep without teleporting

// Per-frame decay bases
pub const MOMENTUM_DECAY_PER_FRAME: f32 = 0.98;
pub const FLASH_DECAY_PER_FRAME: f32 = 0.98;
pub const POINTER_ENERGY_DECAY_PER_FRAME: f32 = 0.5;
pub const RING_DECAY_PER_FRAME: f32 = 0.95;
pub const POKE_DECAY_PER_FRAME: f32 = 0.85;

// Snap-to-zero floors so "off" is exactly representable
pub const FLASH_SNAP: f32 = 0.001;
pub const POINTER_ENERGY_SNAP: f32 = 0.001;
pub const RING_SNAP: f32 = 1.0;
pub const POKE_SNAP: f32 = 1.0;

// Screen scaling reference
pub const REFERENCE_PERIMETER: f32 = 1200.0;
pub const SCALE_EXPONENT: f32 = 0.35;
pub const STAR_COUNT_CAP: f32 = 450.0;
pub const STAR_COUNT_PER_SCALE: f32 = 126.0;
pub const LINK_DISTANCE_BASE: f32 = 246.0;

// Per-force scaling exponents applied to scale_up
pub const ATTRACTION_GRADIENT_POWER: f32 = 1.11;
pub const REPULSION_GRADIENT_POWER: f32 = 0.66;
pub const ATTRACTION_SHAPE_POWER: f32 = -8.89;
pub const ATTRACTION_FORCE_POWER: f32 = -6.46;
pub const REPULSION_FORCE_POWER: f32 = -0.89;
pub const FORCE_CLAMP_POWER: f32 = 1.8;

// Slider value -> physics unit multipliers
pub const ATTRACT_RADIUS_UNIT: f32 = 5.2;
pub const ATTRACT_SHAPE_UNIT: f32 = 0.48;
pub const ATTRACT_STRENGTH_UNIT: f32 = 0.0044;
pub const REPEL_RADIUS_UNIT: f32 = 2.8;
pub const REPEL_SHAPE_UNIT: f32 = 0.64;
pub const REPEL_STRENGTH_UNIT: f32 = 0.0182;
pub const POKE_STRENGTH_UNIT: f32 = 0.01;
pub const MIN_SHAPE_EXPONENT: f32 = 0.1;

// Pointer influence
pub const INFLUENCE_RANGE_FRACTION: f32 = 0.2; // of screen perimeter
pub const POKE_RADIUS_FRACTION: f32 = 0.2; // of screen perimeter
pub const DISTANCE_EPSILON: f32 = 0.0001;
pub const DRIFT_BOOST_PER_ENERGY: f32 = 0.01;
pub const DRIFT_BOOST_MAX: f32 = 7.0;
pub const MOMENTUM_CLAMP_FACTOR: f32 = 2.0;

// Edge policy
pub const WRAP_DISTANCE: f32 = 200.0; // px from pointer beyond which stars always wrap
pub const POKE_WRAP_FRACTION: f32 = 0.4; // of POKE_TIMER_MAX

// Pointer tracker
pub const POKE_TIMER_MAX: f32 = 200.0;
pub const POINTER_SPEED_GAIN: f32 = 50.0;
pub const POINTER_ENERGY_CAP: f32 = 50.0;
pub const FAST_POINTER_ENERGY: f32 = 10.0; // forces an out-of-cadence link rebuild
pub const MIN_POINTER_DT_MS: f64 = 1.0;

// Twinkle cycle
pub const OPACITY_RESET_AT: f32 = 0.005;
pub const OPACITY_EMBER_BELOW: f32 = 0.02;
pub const TWINKLE_FADE_RATE: f32 = 0.005;
pub const TWINKLE_EMBER_DRIFT: f32 = 0.0001;
pub const FLASH_CHANCE: f32 = 0.07;

// Population ranges
pub const DRIFT_SPEED_MAX: f32 = 0.25;
pub const MIN_STAR_SIZE: f32 = 3.0;
pub const STAR_SIZE_DIVISOR: f32 = 400.0;
pub const OPACITY_MIN: f32 = 0.005;
pub const OPACITY_MAX: f32 = 1.8; // overshoots 1 on purpose: full-brightness plateau
pub const FADE_SPEED_MIN: f32 = 1.0;
pub const FADE_SPEED_MAX: f32 = 2.1;
pub const REDNESS_MIN: f32 = 0.0;
pub const REDNESS_MAX: f32 = 200.0;

// Links
pub const LINK_BUCKET_COUNT: usize = 18;
pub const LINK_REBUILD_EVERY: u64 = 3;
pub const LINK_DISTANCE_SCALE_DIVISOR: f32 = 500.0;
pub const LINK_VISIBILITY_EPSILON: f32 = 0.002;
pub const LINK_LINE_WIDTH: f32 = 1.0;
pub const LINK_RGB: [u8; 3] = [100, 100, 100];
pub const EDGE_FADE_BAND_MAX: f32 = 90.0;
pub const EDGE_FADE_BAND_FRACTION: f32 = 0.03;

// Star sprite
pub const SPRITE_SIZE_PER_RADIUS: f32 = 2.4;
pub const SPRITE_MIN_SIZE: f32 = 2.0;
pub const SPRITE_OVERLAY_FRACTION: f32 = 0.48;
pub const DARKNESS_RED_OFFSET: f32 = 50.0;
pub const DARKNESS_RED_SPAN: f32 = 150.0;
pub const DARKNESS_BASE: f32 = 0.15;
pub const DARKNESS_SPAN: f32 = 0.55;
pub const GLOW_MIN_FLASH: f32 = 0.01;

// Pointer ring
pub const RING_RADIUS_PER_SCALE: f32 = 100.0;
pub const RING_RADIUS_OFFSET: f32 = 40.0;
pub const RING_TIMER_FULL: f32 = 50.0;
pub const RING_WIDTH_PER_TIMER: f32 = 0.15;
pub const RING_ALPHA_PER_TIMER: f32 = 0.07;
pub const RING_POKE_MAX_WIDTH: f32 = 7.0;
pub const RING_VISIBILITY_EPSILON: f32 = 0.001;
pub const RING_RGB: [u8; 3] = [189, 189, 189];

// Keyboard impulses
pub const KEY_NUDGE: f32 = 0.8;
pub const KEY_SPEED_UP: f32 = 1.0 + KEY_NUDGE;
pub const KEY_SLOW_DOWN: f32 = 1.0 - KEY_NUDGE;

// Persisted state keys (kept stable so earlier saves still restore)
pub const STARS_STORAGE_KEY: &str = "constellationStars";
pub const META_STORAGE_KEY: &str = "constellationMeta";
