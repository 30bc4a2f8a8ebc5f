use crate::error::StarfieldError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Slider-controlled interaction parameters.
///
/// Values are stored exactly as the UI hands them over; the physics step
/// converts them into screen-scaled force parameters every tick, so an
/// update between frames is picked up on the next step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub attract_strength: f32,
    pub attract_radius: f32,
    pub attract_scale: f32,
    pub clamp: f32,
    pub repel_strength: f32,
    pub repel_radius: f32,
    pub repel_scale: f32,
    pub poke_strength: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            attract_strength: 50.0,
            attract_radius: 50.0,
            attract_scale: 5.0,
            clamp: 5.0,
            repel_strength: 50.0,
            repel_radius: 50.0,
            repel_scale: 5.0,
            poke_strength: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SettingKey {
    AttractStrength,
    AttractRadius,
    AttractScale,
    Clamp,
    RepelStrength,
    RepelRadius,
    RepelScale,
    PokeStrength,
}

impl SettingKey {
    pub const ALL: [SettingKey; 8] = [
        SettingKey::AttractStrength,
        SettingKey::AttractRadius,
        SettingKey::AttractScale,
        SettingKey::Clamp,
        SettingKey::RepelStrength,
        SettingKey::RepelRadius,
        SettingKey::RepelScale,
        SettingKey::PokeStrength,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SettingKey::AttractStrength => "attractStrength",
            SettingKey::AttractRadius => "attractRadius",
            SettingKey::AttractScale => "attractScale",
            SettingKey::Clamp => "clamp",
            SettingKey::RepelStrength => "repelStrength",
            SettingKey::RepelRadius => "repelRadius",
            SettingKey::RepelScale => "repelScale",
            SettingKey::PokeStrength => "pokeStrength",
        }
    }
}

impl FromStr for SettingKey {
    type Err = StarfieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::ALL
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| StarfieldError::UnknownSetting(s.to_owned()))
    }
}

impl Settings {
    pub fn get(&self, key: SettingKey) -> f32 {
        match key {
            SettingKey::AttractStrength => self.attract_strength,
            SettingKey::AttractRadius => self.attract_radius,
            SettingKey::AttractScale => self.attract_scale,
            SettingKey::Clamp => self.clamp,
            SettingKey::RepelStrength => self.repel_strength,
            SettingKey::RepelRadius => self.repel_radius,
            SettingKey::RepelScale => self.repel_scale,
            SettingKey::PokeStrength => self.poke_strength,
        }
    }

    /// Store `value` under `key`. Non-finite input is ignored and reported
    /// with `false`; any finite value, zero included, is accepted.
    pub fn set(&mut self, key: SettingKey, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        let slot = match key {
            SettingKey::AttractStrength => &mut self.attract_strength,
            SettingKey::AttractRadius => &mut self.attract_radius,
            SettingKey::AttractScale => &mut self.attract_scale,
            SettingKey::Clamp => &mut self.clamp,
            SettingKey::RepelStrength => &mut self.repel_strength,
            SettingKey::RepelRadius => &mut self.repel_radius,
            SettingKey::RepelScale => &mut self.repel_scale,
            SettingKey::PokeStrength => &mut self.poke_strength,
        };
        *slot = value;
        true
    }

    /// Name-based setter used by the JS-facing entry point.
    pub fn set_named(&mut self, name: &str, value: f32) -> bool {
        match name.parse::<SettingKey>() {
            Ok(key) => self.set(key, value),
            Err(e) => {
                log::warn!("[settings] {}", e);
                false
            }
        }
    }
}
