//! Key-value persistence of the star pool and its metadata record.

use crate::error::{Result, StarfieldError};
use crate::pointer::PointerTracker;
use crate::settings::{SettingKey, Settings};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Host key-value storage. Reads never fail; a missing or blocked store
/// simply yields `None`.
pub trait StateStore {
    fn load(&self, key: &str) -> Option<String>;
    fn save(&mut self, key: &'static str, value: &str) -> Result<()>;
}

/// In-process store. `read_only` stores reject every write, which is how
/// a full or blocked browser store behaves.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read_only() -> Self {
        Self {
            read_only: true,
            ..Self::default()
        }
    }

    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl StateStore for MemoryStore {
    fn load(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn save(&mut self, key: &'static str, value: &str) -> Result<()> {
        if self.read_only {
            return Err(StarfieldError::StorageWrite {
                key,
                reason: "store is read-only".to_string(),
            });
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Snapshot of canvas size, pointer timers and settings saved next to the
/// particle array.
///
/// Every field is optional on the way in: a record written by an older
/// page, or one with a corrupted entry, still restores whatever numeric
/// fields it carries.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PersistedMeta {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub poke_timer: Option<f32>,
    pub user_speed: Option<f32>,
    pub user_x: Option<f32>,
    pub user_y: Option<f32>,
    pub user_time: Option<f64>,
    pub ring_timer: Option<f32>,
    pub settings: Vec<(SettingKey, f32)>,
}

impl PersistedMeta {
    pub fn capture(width: f32, height: f32, pointer: &PointerTracker, settings: &Settings) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            poke_timer: Some(pointer.poke_timer),
            user_speed: Some(pointer.energy),
            user_x: Some(pointer.position.x),
            user_y: Some(pointer.position.y),
            user_time: pointer.last_sample.map(|s| s.time_ms),
            ring_timer: Some(pointer.ring_timer),
            settings: SettingKey::ALL.iter().map(|&k| (k, settings.get(k))).collect(),
        }
    }

    /// Parse a stored record. Only a non-object payload is an error; fields
    /// with the wrong type are treated as absent.
    pub fn parse(serialized: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(serialized)?;
        let Value::Object(obj) = value else {
            return Err(StarfieldError::MalformedMeta);
        };
        let num = |key: &str| obj.get(key).and_then(Value::as_f64);
        let num32 = |key: &str| num(key).map(|v| v as f32).filter(|v| v.is_finite());

        Ok(Self {
            width: num32("width"),
            height: num32("height"),
            poke_timer: num32("pokeTimer"),
            user_speed: num32("userSpeed"),
            user_x: num32("userX"),
            user_y: num32("userY"),
            user_time: num("userTime"),
            ring_timer: num32("ringTimer"),
            settings: SettingKey::ALL
                .iter()
                .filter_map(|&k| num32(k.name()).map(|v| (k, v)))
                .collect(),
        })
    }

    pub fn to_json(&self) -> Result<String> {
        let mut obj = Map::new();
        let mut put = |key: &str, v: Option<f64>| {
            if let Some(v) = v.and_then(serde_json::Number::from_f64) {
                obj.insert(key.to_string(), Value::Number(v));
            }
        };
        put("width", self.width.map(f64::from));
        put("height", self.height.map(f64::from));
        put("pokeTimer", self.poke_timer.map(f64::from));
        put("userSpeed", self.user_speed.map(f64::from));
        put("userX", self.user_x.map(f64::from));
        put("userY", self.user_y.map(f64::from));
        put("userTime", self.user_time);
        put("ringTimer", self.ring_timer.map(f64::from));
        for &(key, value) in &self.settings {
            put(key.name(), Some(f64::from(value)));
        }
        Ok(serde_json::to_string(&Value::Object(obj))?)
    }

    /// Canvas size the pool was saved under, when both sides are positive.
    pub fn previous_size(&self) -> Option<(f32, f32)> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0.0 && h > 0.0 => Some((w, h)),
            _ => None,
        }
    }

    /// Apply timers, pointer position and settings. Missing timers fall back
    /// to zero, missing settings keep their current value, and the pointer
    /// speed baseline is reset so the next sample cannot spike.
    pub fn apply(&self, pointer: &mut PointerTracker, settings: &mut Settings) {
        pointer.poke_timer = self.poke_timer.unwrap_or(0.0);
        pointer.energy = self.user_speed.unwrap_or(0.0);
        pointer.ring_timer = self.ring_timer.unwrap_or(0.0);
        if let Some(x) = self.user_x {
            pointer.position.x = x;
        }
        if let Some(y) = self.user_y {
            pointer.position.y = y;
        }
        pointer.last_sample = None;
        for &(key, value) in &self.settings {
            settings.set(key, value);
        }
    }
}
