//! The starfield context: owns every piece of simulation state and exposes
//! the entry points the host calls (resize, input, tick, persist).

use crate::constants::*;
use crate::input::{InputEvent, InputQueue, KeyCommand, KeyboardImpulse};
use crate::links::LinkBuilder;
use crate::particle::{create_population, rescale, restore, serialize_population, Particle, PoolOrigin};
use crate::persist::{PersistedMeta, StateStore};
use crate::physics::{self, StepInput};
use crate::pointer::PointerTracker;
use crate::render::{render_frame, Surface};
use crate::scale::ScaleFactors;
use crate::settings::Settings;
use rand::prelude::*;

pub struct Starfield {
    particles: Vec<Particle>,
    settings: Settings,
    scale: ScaleFactors,
    pointer: PointerTracker,
    links: LinkBuilder,
    impulse: KeyboardImpulse,
    input: InputQueue,
    frozen: bool,
    rng: StdRng,
}

impl Starfield {
    pub fn new(seed: u64) -> Self {
        Self {
            particles: Vec::new(),
            settings: Settings::default(),
            scale: ScaleFactors::default(),
            pointer: PointerTracker::default(),
            links: LinkBuilder::default(),
            impulse: KeyboardImpulse::NEUTRAL,
            input: InputQueue::default(),
            frozen: false,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scale(&self) -> &ScaleFactors {
        &self.scale
    }

    pub fn pointer(&self) -> &PointerTracker {
        &self.pointer
    }

    pub fn pointer_mut(&mut self) -> &mut PointerTracker {
        &mut self.pointer
    }

    pub fn links(&self) -> &LinkBuilder {
        &self.links
    }

    pub fn impulse(&self) -> &KeyboardImpulse {
        &self.impulse
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn set_frozen(&mut self, frozen: bool) {
        if self.frozen != frozen {
            log::debug!("[starfield] frozen = {}", frozen);
        }
        self.frozen = frozen;
    }

    pub fn set_setting(&mut self, name: &str, value: f32) -> bool {
        self.settings.set_named(name, value)
    }

    /// Momentum of the first star, for debug readouts.
    pub fn sample_momentum(&self) -> Option<(f32, f32)> {
        self.particles.first().map(|p| (p.momentum_x, p.momentum_y))
    }

    /// Recompute every size-derived factor and map existing stars onto the
    /// new canvas. Returns `false` when the size did not change.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        let next = ScaleFactors::compute(width, height);
        if next == self.scale {
            return false;
        }
        let prev = self.scale;
        let both_sized = prev.width > 0.0 && prev.height > 0.0 && next.width > 0.0 && next.height > 0.0;
        if both_sized && !self.particles.is_empty() {
            rescale(
                &mut self.particles,
                next.width / prev.width,
                next.height / prev.height,
                next.screen_perimeter / prev.screen_perimeter.max(1.0),
            );
        }
        self.scale = next;
        self.links.mark_dirty();
        log::info!("[starfield] resized to {}x{}", next.width, next.height);
        true
    }

    /// Build a fresh pool sized for the current canvas.
    pub fn create_population(&mut self) {
        self.particles = create_population(
            self.scale.width,
            self.scale.height,
            self.scale.star_count_limit,
            self.scale.screen_perimeter,
            &mut self.rng,
        );
        self.links.mark_dirty();
        log::info!("[starfield] created {} stars", self.particles.len());
    }

    /// Adopt the saved pool when it parses, otherwise start fresh.
    ///
    /// A broken metadata record never discards a good pool; the stars are
    /// kept at their saved coordinates and the rest of the state stays as is.
    pub fn restore_or_create(&mut self, store: &dyn StateStore) -> PoolOrigin {
        let Some(raw_stars) = store.load(STARS_STORAGE_KEY) else {
            self.create_population();
            return PoolOrigin::Created;
        };
        let meta = store
            .load(META_STORAGE_KEY)
            .and_then(|raw| match PersistedMeta::parse(&raw) {
                Ok(meta) => Some(meta),
                Err(e) => {
                    log::warn!("[starfield] skipping {}: {}", META_STORAGE_KEY, e);
                    None
                }
            });
        let previous = meta.as_ref().and_then(PersistedMeta::previous_size);

        let (particles, origin) = restore(&raw_stars, &self.scale, previous, &mut self.rng);
        if origin == PoolOrigin::Restored {
            if let Some(meta) = &meta {
                meta.apply(&mut self.pointer, &mut self.settings);
            }
        }
        self.particles = particles;
        self.links.mark_dirty();
        origin
    }

    /// Best-effort save. Failures are logged and reported as `false`.
    pub fn persist(&self, store: &mut dyn StateStore) -> bool {
        if self.particles.is_empty() {
            return false;
        }
        let meta = PersistedMeta::capture(self.scale.width, self.scale.height, &self.pointer, &self.settings);
        let result = serialize_population(&self.particles).and_then(|stars| {
            store.save(STARS_STORAGE_KEY, &stars)?;
            store.save(META_STORAGE_KEY, &meta.to_json()?)
        });
        match result {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[starfield] could not save stars: {}", e);
                false
            }
        }
    }

    /// Recreate the pool and clear interaction state; settings are kept.
    pub fn reset(&mut self) {
        self.pointer = PointerTracker::default();
        self.impulse = KeyboardImpulse::NEUTRAL;
        self.input = InputQueue::default();
        self.create_population();
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Apply every queued event in arrival order.
    pub fn drain_input(&mut self) {
        for event in self.input.drain() {
            match event {
                InputEvent::Pointer {
                    x,
                    y,
                    time_ms,
                    gesture_start,
                } => {
                    let scale_down = self.scale.scale_down;
                    let fast = if gesture_start {
                        log::debug!("[starfield] gesture start at ({:.0}, {:.0})", x, y);
                        self.pointer.begin_interaction(x, y, time_ms, scale_down)
                    } else {
                        self.pointer.update_speed(x, y, time_ms, scale_down)
                    };
                    if fast {
                        self.links.mark_dirty();
                    }
                }
                InputEvent::Key(KeyCommand::Nudge { x, y }) => {
                    if x != 0.0 {
                        self.impulse.add_x = x;
                    }
                    if y != 0.0 {
                        self.impulse.add_y = y;
                    }
                }
                InputEvent::Key(KeyCommand::ScaleMomentum(factor)) => {
                    self.impulse.mult_x = factor;
                    self.impulse.mult_y = factor;
                }
                InputEvent::Key(KeyCommand::InvertDrift) => {
                    for p in &mut self.particles {
                        p.vx = -p.vx;
                        p.vy = -p.vy;
                    }
                }
            }
        }
    }

    /// One physics step, ignoring the freeze flag.
    pub fn step(&mut self, elapsed_ms: f32) -> bool {
        physics::step(
            StepInput {
                particles: &mut self.particles,
                pointer: &mut self.pointer,
                impulse: &mut self.impulse,
                settings: &self.settings,
                scale: &self.scale,
            },
            elapsed_ms,
            &mut self.rng,
        )
    }

    /// Refresh link geometry when due, then draw the frame.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.links
            .advance(&mut self.particles, &self.scale, self.pointer.energy);
        render_frame(surface, &self.particles, &self.links, &self.pointer, &self.scale);
    }

    /// Frame entry point: drain input, step unless frozen, then render.
    /// Returns whether the simulation advanced.
    pub fn tick<S: Surface + ?Sized>(&mut self, elapsed_ms: f32, surface: &mut S) -> bool {
        self.drain_input();
        let stepped = if self.frozen {
            // Key impulses are single-frame; drop what arrived while frozen
            self.impulse = KeyboardImpulse::NEUTRAL;
            false
        } else {
            self.step(elapsed_ms)
        };
        self.render(surface);
        stepped
    }
}
