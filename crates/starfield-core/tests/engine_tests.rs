// Host-side tests for the starfield context: resize, input, freeze and tick.

use starfield_core::constants::*;
use starfield_core::{InputEvent, KeyCommand, MemoryStore, RecordingSurface, Starfield};

const FRAME: f32 = SIXTY_FPS_FRAME_MS;

fn running(seed: u64) -> Starfield {
    let mut field = Starfield::new(seed);
    field.resize(1280.0, 720.0);
    field.create_population();
    field
}

fn positions(field: &Starfield) -> Vec<(u32, u32)> {
    field
        .particles()
        .iter()
        .map(|p| (p.x.to_bits(), p.y.to_bits()))
        .collect()
}

#[test]
fn resize_before_population_is_safe() {
    let mut field = Starfield::new(3);
    assert!(field.resize(1024.0, 768.0));
    assert!(field.particles().is_empty());
    assert_eq!(field.scale().width, 1024.0);
}

#[test]
fn resize_twice_with_same_size_is_idempotent() {
    let mut field = running(3);
    assert!(field.resize(1600.0, 900.0));
    let once = field.particles().to_vec();
    let scale = *field.scale();

    assert!(!field.resize(1600.0, 900.0));
    assert_eq!(field.particles(), &once[..]);
    assert_eq!(*field.scale(), scale);
}

#[test]
fn resize_maps_stars_onto_the_new_canvas() {
    let mut field = running(3);
    let before = field.particles().to_vec();
    field.resize(640.0, 360.0);
    for (b, a) in before.iter().zip(field.particles()) {
        assert!((a.x - b.x * 0.5).abs() < 1e-3);
        assert!((a.y - b.y * 0.5).abs() < 1e-3);
        assert!((a.size - b.size * 0.5).abs() < 1e-4);
    }
}

#[test]
fn collapsing_to_zero_keeps_the_stars() {
    let mut field = running(3);
    let before = field.particles().to_vec();
    field.resize(0.0, 0.0);
    assert_eq!(field.particles(), &before[..]);
}

#[test]
fn frozen_ticks_keep_positions_but_still_render() {
    let mut field = running(5);
    field.push_input(InputEvent::Pointer {
        x: 640.0,
        y: 360.0,
        time_ms: 0.0,
        gesture_start: true,
    });
    field.tick(FRAME, &mut RecordingSurface::with_sprite());

    field.set_frozen(true);
    assert!(field.is_frozen());
    let before = positions(&field);
    let mut surface = RecordingSurface::with_sprite();
    for i in 0..10 {
        assert!(!field.tick(FRAME, &mut surface));
        assert_eq!(surface.clears, i + 1);
        assert_eq!(surface.stars.len(), field.particles().len());
    }
    assert_eq!(positions(&field), before);

    field.set_frozen(false);
    assert!(field.tick(FRAME, &mut surface));
    assert_ne!(positions(&field), before);
}

#[test]
fn gesture_start_triggers_poke() {
    let mut field = running(5);
    field.push_input(InputEvent::Pointer {
        x: 100.0,
        y: 100.0,
        time_ms: 10.0,
        gesture_start: true,
    });
    assert_eq!(field.pending_input(), 1);
    field.drain_input();
    assert_eq!(field.pending_input(), 0);
    assert_eq!(field.pointer().poke_timer, POKE_TIMER_MAX);
    assert_eq!(field.pointer().energy, 0.0);
}

#[test]
fn fast_pointer_marks_links_dirty() {
    let mut field = running(5);
    field.tick(FRAME, &mut RecordingSurface::default());
    assert!(!field.links().is_dirty());

    field.push_input(InputEvent::Pointer {
        x: 0.0,
        y: 0.0,
        time_ms: 100.0,
        gesture_start: false,
    });
    field.push_input(InputEvent::Pointer {
        x: 600.0,
        y: 0.0,
        time_ms: 101.0,
        gesture_start: false,
    });
    field.drain_input();
    assert!(field.links().is_dirty());
}

#[test]
fn key_commands_shape_the_next_impulse() {
    let mut field = running(5);
    field.push_input(InputEvent::Key(KeyCommand::Nudge { x: KEY_NUDGE, y: 0.0 }));
    field.push_input(InputEvent::Key(KeyCommand::Nudge { x: 0.0, y: -KEY_NUDGE }));
    field.push_input(InputEvent::Key(KeyCommand::ScaleMomentum(KEY_SPEED_UP)));
    field.drain_input();

    let impulse = *field.impulse();
    assert_eq!((impulse.add_x, impulse.add_y), (KEY_NUDGE, -KEY_NUDGE));
    assert_eq!((impulse.mult_x, impulse.mult_y), (KEY_SPEED_UP, KEY_SPEED_UP));

    field.step(FRAME);
    assert!(field.impulse().is_neutral());
}

#[test]
fn key_presses_while_frozen_do_not_carry_over() {
    let mut field = running(5);
    field.set_frozen(true);
    let mut surface = RecordingSurface::with_sprite();
    for _ in 0..3 {
        field.push_input(InputEvent::Key(KeyCommand::Nudge { x: KEY_NUDGE, y: 0.0 }));
        field.push_input(InputEvent::Key(KeyCommand::ScaleMomentum(KEY_SPEED_UP)));
        assert!(!field.tick(FRAME, &mut surface));
        assert!(field.impulse().is_neutral());
    }

    field.set_frozen(false);
    assert!(!field.is_frozen());
    assert!(field.tick(FRAME, &mut surface));
    // Fresh stars at rest pick up no kick on resume
    for p in field.particles() {
        assert!(p.momentum_x.abs() < 0.5 * KEY_NUDGE);
    }
}

#[test]
fn invert_drift_flips_every_star() {
    let mut field = running(5);
    let before = field.particles().to_vec();
    field.push_input(InputEvent::Key(KeyCommand::InvertDrift));
    field.drain_input();
    for (b, a) in before.iter().zip(field.particles()) {
        assert_eq!((a.vx, a.vy), (-b.vx, -b.vy));
    }
}

#[test]
fn settings_by_name() {
    let mut field = running(5);
    assert!(field.set_setting("pokeStrength", 0.0));
    assert_eq!(field.settings().poke_strength, 0.0);
    assert!(!field.set_setting("gravity", 3.0));
    assert!(!field.set_setting("clamp", f32::INFINITY));
    assert!(matches!(
        "gravity".parse::<starfield_core::SettingKey>(),
        Err(starfield_core::StarfieldError::UnknownSetting(name)) if name == "gravity"
    ));
    assert_eq!("clamp".parse::<starfield_core::SettingKey>().ok(), Some(starfield_core::SettingKey::Clamp));
    assert_eq!(field.settings().clamp, 5.0);
}

#[test]
fn reset_rebuilds_pool_and_clears_interaction() {
    let mut field = running(5);
    field.set_setting("clamp", 8.0);
    field.pointer_mut().ring_timer = 30.0;
    let before = field.particles().to_vec();

    field.reset();
    assert_eq!(field.particles().len(), before.len());
    assert_ne!(field.particles(), &before[..]);
    assert_eq!(field.pointer().ring_timer, 0.0);
    assert_eq!(field.settings().clamp, 8.0);
}

#[test]
fn long_run_stays_finite_and_on_canvas() {
    let mut field = running(9);
    let mut surface = RecordingSurface::with_sprite();
    let mut t = 0.0;
    for frame in 0..600 {
        t += 17.0;
        if frame % 40 == 0 {
            field.push_input(InputEvent::Pointer {
                x: (frame % 1280) as f32,
                y: 360.0,
                time_ms: t,
                gesture_start: frame % 120 == 0,
            });
        }
        field.tick(17.0, &mut surface);
    }
    let (w, h) = (field.scale().width, field.scale().height);
    for p in field.particles() {
        let r = p.draw_radius();
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!(p.x >= -r - 50.0 && p.x <= w + r + 50.0);
        assert!(p.y >= -r - 50.0 && p.y <= h + r + 50.0);
        assert!(p.opacity <= OPACITY_MAX);
    }
    let mut store = MemoryStore::new();
    assert!(field.persist(&mut store));
}
