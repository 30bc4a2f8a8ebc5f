/// Page wiring constants for the browser front-end.
///
/// Simulation tuning lives in `starfield_core::constants`; these only
/// describe how the page hosts the canvas and schedules frames.
// Element ids
pub const CANVAS_ID: &str = "constellations";
pub const DEBUG_MISC_ID: &str = "dbgMisc"; // sample star momentum
pub const DEBUG_RING_ID: &str = "dbgCircle"; // ring timer
pub const DEBUG_SPEED_ID: &str = "dbgSpeed"; // pointer energy
pub const DEBUG_POKE_ID: &str = "dbgPoke"; // poke timer

// Star sprite
pub const STAR_SPRITE_URL: &str = "/Resources/Star.webp";

// Frame scheduling (milliseconds)
pub const FRAME_THROTTLE_MS: f64 = 18.0; // rAF callbacks closer than this are skipped
pub const FIRST_FRAME_MS: f64 = 1000.0 / 60.0; // elapsed time assumed for the very first step
pub const DEBUG_REFRESH_MS: f64 = 100.0; // 10 Hz readouts
