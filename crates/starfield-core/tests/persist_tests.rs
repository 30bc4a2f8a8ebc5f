// Host-side tests for saving and restoring the starfield through a StateStore.

use rand::SeedableRng;
use starfield_core::constants::*;
use starfield_core::{MemoryStore, PersistedMeta, PoolOrigin, PointerTracker, SettingKey, Settings, Starfield, StateStore};

fn sized(seed: u64, w: f32, h: f32) -> Starfield {
    let mut field = Starfield::new(seed);
    field.resize(w, h);
    field
}

#[test]
fn missing_save_creates_a_fresh_pool() {
    let mut field = sized(1, 800.0, 600.0);
    let origin = field.restore_or_create(&MemoryStore::new());
    assert_eq!(origin, PoolOrigin::Created);
    assert_eq!(field.particles().len(), field.scale().star_count_limit);
}

#[test]
fn saved_state_restores_on_same_canvas() {
    let mut field = sized(1, 800.0, 600.0);
    field.restore_or_create(&MemoryStore::new());
    field.set_setting("repelStrength", 12.5);
    field.pointer_mut().ring_timer = 33.0;
    field.pointer_mut().position = glam::Vec2::new(40.0, 60.0);

    let mut store = MemoryStore::new();
    assert!(field.persist(&mut store));

    let mut restored = sized(2, 800.0, 600.0);
    assert_eq!(restored.restore_or_create(&store), PoolOrigin::Restored);
    assert_eq!(restored.particles(), field.particles());
    assert_eq!(restored.settings().repel_strength, 12.5);
    assert_eq!(restored.pointer().ring_timer, 33.0);
    assert_eq!(restored.pointer().position, glam::Vec2::new(40.0, 60.0));
    assert!(restored.pointer().last_sample.is_none());
}

#[test]
fn saved_state_rescales_onto_a_new_canvas() {
    let mut field = sized(1, 400.0, 300.0);
    field.restore_or_create(&MemoryStore::new());
    let mut store = MemoryStore::new();
    field.persist(&mut store);

    let mut bigger = sized(2, 800.0, 600.0);
    bigger.restore_or_create(&store);
    for (before, after) in field.particles().iter().zip(bigger.particles()) {
        assert!((after.x - before.x * 2.0).abs() < 1e-3);
        assert!((after.y - before.y * 2.0).abs() < 1e-3);
        assert!((after.size - before.size * 2.0).abs() < 1e-4);
    }
}

#[test]
fn corrupt_stars_recreate_and_ignore_meta() {
    let mut store = MemoryStore::new();
    store.insert(STARS_STORAGE_KEY, "{oops");
    store.insert(META_STORAGE_KEY, r#"{"repelStrength": 1}"#);

    let mut field = sized(1, 800.0, 600.0);
    assert_eq!(field.restore_or_create(&store), PoolOrigin::Created);
    assert_eq!(field.particles().len(), field.scale().star_count_limit);
    assert_eq!(field.settings().repel_strength, Settings::default().repel_strength);
}

#[test]
fn corrupt_meta_keeps_the_stars() {
    let mut source = sized(1, 800.0, 600.0);
    source.restore_or_create(&MemoryStore::new());
    let mut store = MemoryStore::new();
    source.persist(&mut store);
    store.insert(META_STORAGE_KEY, "not json at all");

    let mut field = sized(2, 1600.0, 1200.0);
    assert_eq!(field.restore_or_create(&store), PoolOrigin::Restored);
    // Without a readable size record the stars stay where they were saved
    assert_eq!(field.particles(), source.particles());
    assert_eq!(*field.settings(), Settings::default());
}

#[test]
fn meta_fields_fall_back_individually() {
    let meta = PersistedMeta::parse(
        r#"{"width": 800, "height": "tall", "pokeTimer": 50, "userX": "12",
            "userY": 7, "clamp": 9, "attractRadius": null}"#,
    )
    .unwrap();
    assert_eq!(meta.width, Some(800.0));
    assert_eq!(meta.height, None);
    assert_eq!(meta.previous_size(), None);
    assert_eq!(meta.user_x, None);
    assert_eq!(meta.settings, vec![(SettingKey::Clamp, 9.0)]);

    let mut pointer = PointerTracker::default();
    pointer.position = glam::Vec2::new(100.0, 100.0);
    pointer.ring_timer = 20.0;
    let mut settings = Settings::default();
    meta.apply(&mut pointer, &mut settings);

    assert_eq!(pointer.poke_timer, 50.0);
    assert_eq!(pointer.ring_timer, 0.0);
    assert_eq!(pointer.position, glam::Vec2::new(100.0, 7.0));
    assert_eq!(settings.clamp, 9.0);
    assert_eq!(settings.attract_radius, Settings::default().attract_radius);
}

#[test]
fn meta_that_is_not_an_object_is_rejected() {
    assert!(PersistedMeta::parse("[1, 2, 3]").is_err());
    assert!(PersistedMeta::parse("").is_err());
}

#[test]
fn meta_json_uses_stable_key_names() {
    let mut pointer = PointerTracker::default();
    pointer.poke_timer = 10.0;
    let meta = PersistedMeta::capture(640.0, 480.0, &pointer, &Settings::default());
    let json: serde_json::Value = serde_json::from_str(&meta.to_json().unwrap()).unwrap();

    for key in ["width", "height", "pokeTimer", "userSpeed", "userX", "userY", "ringTimer"] {
        assert!(json.get(key).is_some(), "missing {key}");
    }
    for key in SettingKey::ALL {
        assert!(json.get(key.name()).is_some(), "missing {}", key.name());
    }
    // No pointer sample yet, so there is no time baseline to save
    assert!(json.get("userTime").is_none());
    assert_eq!(PersistedMeta::parse(&meta.to_json().unwrap()).unwrap(), meta);
}

#[test]
fn storage_failures_are_swallowed() {
    let mut field = sized(1, 800.0, 600.0);
    field.restore_or_create(&MemoryStore::new());

    let mut store = MemoryStore::read_only();
    assert!(!field.persist(&mut store));
    assert!(store.load(STARS_STORAGE_KEY).is_none());
}

#[test]
fn empty_pool_is_not_saved() {
    let field = sized(1, 800.0, 600.0);
    let mut store = MemoryStore::new();
    assert!(!field.persist(&mut store));
    assert!(store.get(STARS_STORAGE_KEY).is_none());
}

#[test]
fn engine_restore_matches_pool_restore() {
    let mut source = sized(1, 400.0, 300.0);
    source.restore_or_create(&MemoryStore::new());
    let mut store = MemoryStore::new();
    assert!(source.persist(&mut store));

    let mut field = sized(2, 800.0, 600.0);
    assert_eq!(field.restore_or_create(&store), PoolOrigin::Restored);

    let raw = store.load(STARS_STORAGE_KEY).unwrap();
    let (expected, origin) = starfield_core::particle::restore(
        &raw,
        field.scale(),
        Some((400.0, 300.0)),
        &mut rand::rngs::StdRng::seed_from_u64(0),
    );
    assert_eq!(origin, PoolOrigin::Restored);
    assert_eq!(field.particles(), &expected[..]);
}
